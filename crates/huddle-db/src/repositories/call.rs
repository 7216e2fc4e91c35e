//! PostgreSQL implementation of CallRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use huddle_core::entities::{CallChannel, CallMember};
use huddle_core::error::DomainError;
use huddle_core::traits::{CallRepository, RepoResult};

use crate::models::{CallChannelModel, CallMemberModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of CallRepository
#[derive(Clone)]
pub struct PgCallRepository {
    pool: PgPool,
}

impl PgCallRepository {
    /// Create a new PgCallRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CallRepository for PgCallRepository {
    #[instrument(skip(self))]
    async fn find_by_member(&self, user_id: Uuid) -> RepoResult<Option<CallChannel>> {
        let result = sqlx::query_as::<_, CallChannelModel>(
            r#"
            SELECT cc.id, cc.created_by, cc.accepted_at, cc.created_at
            FROM call_channels cc
            JOIN call_members cm ON cm.call_channel_id = cc.id
            WHERE cm.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CallChannel::from))
    }

    #[instrument(skip(self, channel))]
    async fn create(&self, channel: &CallChannel, caller: Uuid, callee: Uuid) -> RepoResult<()> {
        // call_members.user_id is UNIQUE: if either party is already in a
        // call, the insert fails and the whole transaction rolls back. Two
        // racing admissions cannot both commit.
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO call_channels (id, created_by, accepted_at, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(channel.id)
        .bind(channel.created_by)
        .bind(channel.accepted_at)
        .bind(channel.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO call_members (call_channel_id, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(channel.id)
        .bind(caller)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyInCall(caller)))?;

        sqlx::query(
            r#"
            INSERT INTO call_members (call_channel_id, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(channel.id)
        .bind(callee)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyInCall(callee)))?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn members(&self, channel_id: Uuid) -> RepoResult<Vec<CallMember>> {
        let rows = sqlx::query_as::<_, CallMemberModel>(
            r#"
            SELECT cm.user_id, u.ws_id, p.full_name, p.avatar_url
            FROM call_members cm
            JOIN users u ON u.id = cm.user_id
            JOIN profiles p ON p.user_id = u.id
            WHERE cm.call_channel_id = $1
            "#,
        )
        .bind(channel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(CallMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn set_accepted(&self, channel_id: Uuid, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE call_channels
            SET accepted_at = $2
            WHERE id = $1
            "#,
        )
        .bind(channel_id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotInCall);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, channel_id: Uuid) -> RepoResult<()> {
        sqlx::query(
            r#"
            DELETE FROM call_channels WHERE id = $1
            "#,
        )
        .bind(channel_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM call_channels
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCallRepository>();
    }
}
