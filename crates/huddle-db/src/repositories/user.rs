//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use huddle_core::entities::{Profile, User};
use huddle_core::traits::{MemberPresence, RepoResult, UserRepository};
use huddle_core::value_objects::Page;

use crate::models::{MemberPresenceModel, ProfileModel, UserModel};

use super::error::{map_db_error, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, email, ws_id, refresh_token, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_profile(&self, user_id: Uuid) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r#"
            SELECT user_id, full_name, avatar_url
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self, user, profile))]
    async fn create(&self, user: &User, profile: &Profile) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO users (id, email, ws_id, refresh_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(user.ws_id.as_deref())
        .bind(user.refresh_token.as_deref())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, full_name, avatar_url)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.full_name)
        .bind(profile.avatar_url.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self, profile))]
    async fn update_profile(&self, profile: &Profile) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET full_name = $2, avatar_url = $3
            WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.full_name)
        .bind(profile.avatar_url.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(profile.user_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn search_profiles(
        &self,
        query: Option<&str>,
        page: Page,
    ) -> RepoResult<(Vec<MemberPresence>, i64)> {
        let rows = sqlx::query_as::<_, MemberPresenceModel>(
            r#"
            SELECT p.user_id, u.ws_id, p.full_name, p.avatar_url
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE $1::text IS NULL OR p.full_name ILIKE '%' || $1 || '%'
            ORDER BY p.full_name ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM profiles p
            WHERE $1::text IS NULL OR p.full_name ILIKE '%' || $1 || '%'
            "#,
        )
        .bind(query)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((rows.into_iter().map(MemberPresence::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn bind_connection(&self, user_id: Uuid, ws_id: &str) -> RepoResult<()> {
        // Unconditional overwrite: concurrent connects race by design and
        // the last write wins.
        let result = sqlx::query(
            r#"
            UPDATE users
            SET ws_id = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(ws_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn release_connection(&self, user_id: Uuid, ws_id: &str) -> RepoResult<bool> {
        // Clears only when the stored connection id still matches, so a
        // stale disconnect cannot clobber a newer binding.
        let result = sqlx::query(
            r#"
            UPDATE users
            SET ws_id = NULL, updated_at = NOW()
            WHERE id = $1 AND ws_id = $2
            "#,
        )
        .bind(user_id)
        .bind(ws_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn reset_all_connections(&self) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET ws_id = NULL
            WHERE ws_id IS NOT NULL
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
