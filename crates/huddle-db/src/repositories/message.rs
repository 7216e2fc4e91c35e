//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use huddle_core::entities::Message;
use huddle_core::traits::{MessageRepository, MessageWithAuthor, RepoResult};
use huddle_core::value_objects::Page;

use crate::models::{MessageModel, MessageWithAuthorModel};

use super::error::{map_db_error, message_not_found};

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(
        &self,
        executor: impl sqlx::PgExecutor<'_>,
        message: &Message,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, channel_id, author_id, kind, value, is_deleted, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(message.id)
        .bind(message.channel_id)
        .bind(message.author_id)
        .bind(message.kind.as_str())
        .bind(&message.value)
        .bind(message.is_deleted)
        .bind(message.created_at)
        .execute(executor)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, channel_id, author_id, kind, value, is_deleted, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_owned_active(&self, id: Uuid, author_id: Uuid) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, channel_id, author_id, kind, value, is_deleted, created_at
            FROM messages
            WHERE id = $1 AND author_id = $2 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self, message))]
    async fn create_direct(&self, message: &Message) -> RepoResult<()> {
        // Message insert and the recency bump commit together or not at all
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        self.insert(&mut *tx, message).await?;

        sqlx::query(
            r#"
            UPDATE channels
            SET updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(message.channel_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self, message))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.insert(&self.pool, message).await
    }

    #[instrument(skip(self))]
    async fn mark_deleted(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_deleted = TRUE
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(message_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_channel(
        &self,
        channel_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<MessageWithAuthor>, i64)> {
        let rows = sqlx::query_as::<_, MessageWithAuthorModel>(
            r#"
            SELECT m.id, m.channel_id, m.author_id, m.kind, m.value, m.is_deleted,
                   m.created_at, p.full_name AS author_name, p.avatar_url AS author_avatar
            FROM messages m
            JOIN profiles p ON p.user_id = m.author_id
            WHERE m.channel_id = $1
            ORDER BY m.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(channel_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM messages WHERE channel_id = $1
            "#,
        )
        .bind(channel_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((rows.into_iter().map(MessageWithAuthor::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn last_in_channel(&self, channel_id: Uuid) -> RepoResult<Option<MessageWithAuthor>> {
        let result = sqlx::query_as::<_, MessageWithAuthorModel>(
            r#"
            SELECT m.id, m.channel_id, m.author_id, m.kind, m.value, m.is_deleted,
                   m.created_at, p.full_name AS author_name, p.avatar_url AS author_avatar
            FROM messages m
            JOIN profiles p ON p.user_id = m.author_id
            WHERE m.channel_id = $1
            ORDER BY m.created_at DESC
            LIMIT 1
            "#,
        )
        .bind(channel_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(MessageWithAuthor::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMessageRepository>();
    }
}
