//! PostgreSQL implementation of GroupRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use huddle_core::entities::{Group, GroupMember};
use huddle_core::error::DomainError;
use huddle_core::traits::{GroupRepository, MemberPresence, RepoResult};
use huddle_core::value_objects::Page;

use crate::models::{GroupMemberModel, GroupMemberRowModel, GroupModel, MemberPresenceModel};

use super::error::{group_not_found, map_db_error};

/// PostgreSQL implementation of GroupRepository
#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    /// Create a new PgGroupRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Group>> {
        let result = sqlx::query_as::<_, GroupModel>(
            r#"
            SELECT id, name, owner_id, invite_code, invite_code_uses,
                   invite_code_max_uses, created_at, updated_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self))]
    async fn find_by_invite_code(&self, code: &str) -> RepoResult<Option<Group>> {
        let result = sqlx::query_as::<_, GroupModel>(
            r#"
            SELECT id, name, owner_id, invite_code, invite_code_uses,
                   invite_code_max_uses, created_at, updated_at
            FROM groups
            WHERE invite_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self))]
    async fn count_owned(&self, user_id: Uuid) -> RepoResult<i64> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM groups WHERE owner_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, group, owner))]
    async fn create(&self, group: &Group, owner: &GroupMember) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO groups (id, name, owner_id, invite_code, invite_code_uses,
                                invite_code_max_uses, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(group.owner_id)
        .bind(group.invite_code.as_str())
        .bind(group.invite_code_uses)
        .bind(group.invite_code_max_uses)
        .bind(group.created_at)
        .bind(group.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id, is_owner, joined_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(owner.group_id)
        .bind(owner.user_id)
        .bind(owner.is_owner)
        .bind(owner.joined_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self, group))]
    async fn update(&self, group: &Group) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE groups
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(group.id)
        .bind(&group.name)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(group_not_found(group.id));
        }

        Ok(())
    }

    #[instrument(skip(self, group))]
    async fn update_invite_code(&self, group: &Group) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE groups
            SET invite_code = $2, invite_code_uses = $3, invite_code_max_uses = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(group.id)
        .bind(group.invite_code.as_str())
        .bind(group.invite_code_uses)
        .bind(group.invite_code_max_uses)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(group_not_found(group.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_invite_uses(&self, group_id: Uuid) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE groups
            SET invite_code_uses = invite_code_uses + 1
            WHERE id = $1
            "#,
        )
        .bind(group_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_membership(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> RepoResult<Option<GroupMember>> {
        let result = sqlx::query_as::<_, GroupMemberModel>(
            r#"
            SELECT group_id, user_id, is_owner, joined_at
            FROM group_members
            WHERE group_id = $1 AND user_id = $2
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(GroupMember::from))
    }

    #[instrument(skip(self, member))]
    async fn add_member(&self, member: &GroupMember) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id, is_owner, joined_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(member.group_id)
        .bind(member.user_id)
        .bind(member.is_owner)
        .bind(member.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| super::error::map_unique_violation(e, || DomainError::AlreadyGroupMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_member(&self, group_id: Uuid, user_id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM group_members
            WHERE group_id = $1 AND user_id = $2
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotGroupMember);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn member_count(&self, group_id: Uuid) -> RepoResult<i64> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM group_members WHERE group_id = $1
            "#,
        )
        .bind(group_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_joined(&self, user_id: Uuid, page: Page) -> RepoResult<(Vec<Group>, i64)> {
        let rows = sqlx::query_as::<_, GroupModel>(
            r#"
            SELECT g.id, g.name, g.owner_id, g.invite_code, g.invite_code_uses,
                   g.invite_code_max_uses, g.created_at, g.updated_at
            FROM group_members gm
            JOIN groups g ON g.id = gm.group_id
            WHERE gm.user_id = $1
            ORDER BY gm.joined_at DESC
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
            SELECT COUNT(*) FROM group_members WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((rows.into_iter().map(Group::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn list_members(
        &self,
        group_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<(MemberPresence, bool)>, i64)> {
        let rows = sqlx::query_as::<_, GroupMemberRowModel>(
            r#"
            SELECT p.user_id, u.ws_id, p.full_name, p.avatar_url, gm.is_owner
            FROM group_members gm
            JOIN users u ON u.id = gm.user_id
            JOIN profiles p ON p.user_id = u.id
            WHERE gm.group_id = $1
            ORDER BY gm.is_owner DESC, gm.joined_at ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(group_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = self.member_count(group_id).await?;

        let members = rows
            .into_iter()
            .map(|row| {
                (
                    MemberPresence {
                        user_id: row.user_id,
                        ws_id: row.ws_id,
                        full_name: row.full_name,
                        avatar_url: row.avatar_url,
                    },
                    row.is_owner,
                )
            })
            .collect();

        Ok((members, total))
    }

    #[instrument(skip(self))]
    async fn members_presence(&self, group_id: Uuid) -> RepoResult<Vec<MemberPresence>> {
        let rows = sqlx::query_as::<_, MemberPresenceModel>(
            r#"
            SELECT p.user_id, u.ws_id, p.full_name, p.avatar_url
            FROM group_members gm
            JOIN users u ON u.id = gm.user_id
            JOIN profiles p ON p.user_id = u.id
            WHERE gm.group_id = $1
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MemberPresence::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgGroupRepository>();
    }
}
