//! PostgreSQL implementation of FriendRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use huddle_core::entities::FriendshipRequest;
use huddle_core::error::DomainError;
use huddle_core::traits::{FriendRepository, MemberPresence, RepoResult};
use huddle_core::value_objects::Page;

use crate::models::{FriendshipRequestModel, MemberPresenceModel};

use super::error::map_db_error;

/// PostgreSQL implementation of FriendRepository
#[derive(Clone)]
pub struct PgFriendRepository {
    pool: PgPool,
}

impl PgFriendRepository {
    /// Create a new PgFriendRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FriendRepository for PgFriendRepository {
    #[instrument(skip(self))]
    async fn find_request_between(
        &self,
        a: Uuid,
        b: Uuid,
    ) -> RepoResult<Option<FriendshipRequest>> {
        let result = sqlx::query_as::<_, FriendshipRequestModel>(
            r#"
            SELECT from_user_id, to_user_id, status, created_at
            FROM friendship_requests
            WHERE (from_user_id = $1 AND to_user_id = $2)
               OR (from_user_id = $2 AND to_user_id = $1)
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(FriendshipRequest::from))
    }

    #[instrument(skip(self, request))]
    async fn create_request(&self, request: &FriendshipRequest) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO friendship_requests (from_user_id, to_user_id, status, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(request.from_user_id)
        .bind(request.to_user_id)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| super::error::map_unique_violation(e, || DomainError::FriendRequestExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_requests_from(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<MemberPresence>, i64)> {
        let rows = sqlx::query_as::<_, MemberPresenceModel>(
            r#"
            SELECT p.user_id, u.ws_id, p.full_name, p.avatar_url
            FROM friendship_requests r
            JOIN users u ON u.id = r.to_user_id
            JOIN profiles p ON p.user_id = u.id
            WHERE r.from_user_id = $1 AND r.status = 'pending'
            ORDER BY r.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = self.count_requests_from(user_id).await?;

        Ok((rows.into_iter().map(MemberPresence::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn list_requests_to(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<MemberPresence>, i64)> {
        let rows = sqlx::query_as::<_, MemberPresenceModel>(
            r#"
            SELECT p.user_id, u.ws_id, p.full_name, p.avatar_url
            FROM friendship_requests r
            JOIN users u ON u.id = r.from_user_id
            JOIN profiles p ON p.user_id = u.id
            WHERE r.to_user_id = $1 AND r.status = 'pending'
            ORDER BY r.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = self.count_requests_to(user_id).await?;

        Ok((rows.into_iter().map(MemberPresence::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn count_requests_from(&self, user_id: Uuid) -> RepoResult<i64> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM friendship_requests
            WHERE from_user_id = $1 AND status = 'pending'
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_requests_to(&self, user_id: Uuid) -> RepoResult<i64> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM friendship_requests
            WHERE to_user_id = $1 AND status = 'pending'
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn accept_request(&self, from_user_id: Uuid, to_user_id: Uuid) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            UPDATE friendship_requests
            SET status = 'accepted'
            WHERE from_user_id = $1 AND to_user_id = $2 AND status = 'pending'
            "#,
        )
        .bind(from_user_id)
        .bind(to_user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FriendRequestNotFound);
        }

        // Reciprocal rows so "friends of X" is a single-column lookup
        sqlx::query(
            r#"
            INSERT INTO friendships (from_user_id, to_user_id)
            VALUES ($1, $2), ($2, $1)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(from_user_id)
        .bind(to_user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn delete_pending_between(&self, a: Uuid, b: Uuid) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM friendship_requests
            WHERE ((from_user_id = $1 AND to_user_id = $2)
                OR (from_user_id = $2 AND to_user_id = $1))
              AND status = 'pending'
            "#,
        )
        .bind(a)
        .bind(b)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn friendship_exists(&self, from_user_id: Uuid, to_user_id: Uuid) -> RepoResult<bool> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM friendships
                WHERE from_user_id = $1 AND to_user_id = $2
            )
            "#,
        )
        .bind(from_user_id)
        .bind(to_user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_friends(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<MemberPresence>, i64)> {
        let rows = sqlx::query_as::<_, MemberPresenceModel>(
            r#"
            SELECT p.user_id, u.ws_id, p.full_name, p.avatar_url
            FROM friendships f
            JOIN users u ON u.id = f.to_user_id
            JOIN profiles p ON p.user_id = u.id
            WHERE f.from_user_id = $1
            ORDER BY p.full_name ASC
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
            FROM friendships
            WHERE from_user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((rows.into_iter().map(MemberPresence::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn delete_friendship_pair(&self, a: Uuid, b: Uuid) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            DELETE FROM friendships
            WHERE (from_user_id = $1 AND to_user_id = $2)
               OR (from_user_id = $2 AND to_user_id = $1)
            "#,
        )
        .bind(a)
        .bind(b)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            DELETE FROM friendship_requests
            WHERE (from_user_id = $1 AND to_user_id = $2)
               OR (from_user_id = $2 AND to_user_id = $1)
            "#,
        )
        .bind(a)
        .bind(b)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)
    }
}
