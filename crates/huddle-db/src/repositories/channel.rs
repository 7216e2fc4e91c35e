//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use huddle_core::entities::Channel;
use huddle_core::traits::{ChannelRepository, MemberPresence, RepoResult};
use huddle_core::value_objects::Page;

use crate::models::{ChannelModel, MemberPresenceModel};

use super::error::{channel_not_found, map_db_error};

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    /// Create a new PgChannelRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(
            r#"
            SELECT id, kind, group_id, name, is_deleted, created_at, updated_at
            FROM channels
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn find_direct_between(&self, a: Uuid, b: Uuid) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(
            r#"
            SELECT c.id, c.kind, c.group_id, c.name, c.is_deleted, c.created_at, c.updated_at
            FROM channels c
            JOIN channel_members m1 ON m1.channel_id = c.id AND m1.user_id = $1
            JOIN channel_members m2 ON m2.channel_id = c.id AND m2.user_id = $2
            WHERE c.kind = 'direct'
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self, channel))]
    async fn create_direct(&self, channel: &Channel, a: Uuid, b: Uuid) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO channels (id, kind, group_id, name, is_deleted, created_at, updated_at)
            VALUES ($1, 'direct', NULL, NULL, FALSE, $2, $3)
            "#,
        )
        .bind(channel.id)
        .bind(channel.created_at)
        .bind(channel.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO channel_members (channel_id, user_id)
            VALUES ($1, $2), ($1, $3)
            "#,
        )
        .bind(channel.id)
        .bind(a)
        .bind(b)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn is_direct_member(&self, channel_id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM channel_members
                WHERE channel_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(channel_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn direct_members(&self, channel_id: Uuid) -> RepoResult<Vec<MemberPresence>> {
        let rows = sqlx::query_as::<_, MemberPresenceModel>(
            r#"
            SELECT p.user_id, u.ws_id, p.full_name, p.avatar_url
            FROM channel_members m
            JOIN users u ON u.id = m.user_id
            JOIN profiles p ON p.user_id = u.id
            WHERE m.channel_id = $1
            "#,
        )
        .bind(channel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MemberPresence::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_recent_direct(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<Channel>, i64)> {
        // Only channels that have at least one message show up in the
        // recent list; ordering follows the updated_at bump on each message.
        let rows = sqlx::query_as::<_, ChannelModel>(
            r#"
            SELECT c.id, c.kind, c.group_id, c.name, c.is_deleted, c.created_at, c.updated_at
            FROM channels c
            JOIN channel_members m ON m.channel_id = c.id
            WHERE m.user_id = $1
              AND c.kind = 'direct'
              AND EXISTS (SELECT 1 FROM messages ms WHERE ms.channel_id = c.id)
            ORDER BY c.updated_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM channels c
            JOIN channel_members m ON m.channel_id = c.id
            WHERE m.user_id = $1
              AND c.kind = 'direct'
              AND EXISTS (SELECT 1 FROM messages ms WHERE ms.channel_id = c.id)
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((rows.into_iter().map(Channel::from).collect(), total))
    }

    #[instrument(skip(self, channel))]
    async fn create_group_channel(&self, channel: &Channel) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO channels (id, kind, group_id, name, is_deleted, created_at, updated_at)
            VALUES ($1, 'group', $2, $3, FALSE, $4, $5)
            "#,
        )
        .bind(channel.id)
        .bind(channel.group_id)
        .bind(channel.name.as_deref())
        .bind(channel.created_at)
        .bind(channel.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_group_channel(
        &self,
        group_id: Uuid,
        channel_id: Uuid,
    ) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(
            r#"
            SELECT id, kind, group_id, name, is_deleted, created_at, updated_at
            FROM channels
            WHERE id = $1 AND group_id = $2 AND kind = 'group' AND is_deleted = FALSE
            "#,
        )
        .bind(channel_id)
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn list_group_channels(
        &self,
        group_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<Channel>, i64)> {
        let rows = sqlx::query_as::<_, ChannelModel>(
            r#"
            SELECT id, kind, group_id, name, is_deleted, created_at, updated_at
            FROM channels
            WHERE group_id = $1 AND kind = 'group' AND is_deleted = FALSE
            ORDER BY name DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(group_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM channels
            WHERE group_id = $1 AND kind = 'group' AND is_deleted = FALSE
            "#,
        )
        .bind(group_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((rows.into_iter().map(Channel::from).collect(), total))
    }

    #[instrument(skip(self, channel))]
    async fn update_group_channel(&self, channel: &Channel) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE channels
            SET name = $2, updated_at = NOW()
            WHERE id = $1 AND kind = 'group' AND is_deleted = FALSE
            "#,
        )
        .bind(channel.id)
        .bind(channel.name.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(channel_not_found(channel.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn soft_delete_group_channel(&self, channel_id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE channels
            SET is_deleted = TRUE, updated_at = NOW()
            WHERE id = $1 AND kind = 'group' AND is_deleted = FALSE
            "#,
        )
        .bind(channel_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(channel_not_found(channel_id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgChannelRepository>();
    }
}
