//! Group service
//!
//! Groups with invite-code admission. Non-members are answered with
//! `GroupNotFound` rather than a distinct authorization error, so the
//! response does not confirm a group's existence.

use tracing::{info, instrument};
use uuid::Uuid;

use huddle_core::entities::{Group, GroupMember, MAX_OWNED_GROUPS};
use huddle_core::error::DomainError;
use huddle_core::value_objects::Page;

use crate::dto::{
    CreateGroupRequest, CreateInviteCodeRequest, GroupPreviewResponse, GroupResponse,
    MemberResponse, Paginated, ProfileResponse, UpdateGroupRequest, UserPresenceResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Group service
pub struct GroupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GroupService<'a> {
    /// Create a new GroupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a group, owned by the creator, with a fresh invite code
    #[instrument(skip(self, data))]
    pub async fn create(
        &self,
        owner_id: Uuid,
        data: CreateGroupRequest,
    ) -> ServiceResult<GroupResponse> {
        let owned = self.ctx.group_repo().count_owned(owner_id).await?;
        if owned >= MAX_OWNED_GROUPS {
            return Err(DomainError::OwnedGroupLimit {
                max: MAX_OWNED_GROUPS,
            }
            .into());
        }

        let group = Group::new(Uuid::new_v4(), data.name, owner_id);
        let owner = GroupMember::new(group.id, owner_id, true);
        self.ctx.group_repo().create(&group, &owner).await?;

        info!(group_id = %group.id, owner_id = %owner_id, "Group created");

        Ok(GroupResponse::from(&group))
    }

    /// Group details, member-only
    #[instrument(skip(self))]
    pub async fn get(&self, group_id: Uuid, user_id: Uuid) -> ServiceResult<GroupResponse> {
        let group = self.require_membership(group_id, user_id).await?;
        Ok(GroupResponse::from(&group))
    }

    /// Rename a group, owner-only
    #[instrument(skip(self, data))]
    pub async fn update(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        data: UpdateGroupRequest,
    ) -> ServiceResult<GroupResponse> {
        let mut group = self.require_owner(group_id, user_id).await?;

        group.name = data.name;
        self.ctx.group_repo().update(&group).await?;

        info!(group_id = %group_id, "Group updated");
        Ok(GroupResponse::from(&group))
    }

    /// Groups the user has joined
    #[instrument(skip(self))]
    pub async fn joined_list(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> ServiceResult<Paginated<GroupResponse>> {
        let (groups, total) = self.ctx.group_repo().list_joined(user_id, page).await?;
        let data = groups.iter().map(GroupResponse::from).collect();
        Ok(Paginated::new(data, total, page))
    }

    /// Member listing, member-only, owner first
    #[instrument(skip(self))]
    pub async fn member_list(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        page: Page,
    ) -> ServiceResult<Paginated<MemberResponse>> {
        self.require_membership(group_id, user_id).await?;

        let (rows, total) = self.ctx.group_repo().list_members(group_id, page).await?;
        let data = rows
            .iter()
            .map(|(member, is_owner)| MemberResponse {
                user: UserPresenceResponse::from(member),
                is_owner: *is_owner,
            })
            .collect();

        Ok(Paginated::new(data, total, page))
    }

    /// Remove a member, owner-only. The owner cannot kick themselves.
    #[instrument(skip(self))]
    pub async fn kick(
        &self,
        group_id: Uuid,
        owner_id: Uuid,
        target_id: Uuid,
    ) -> ServiceResult<()> {
        self.require_owner(group_id, owner_id).await?;

        if owner_id == target_id {
            return Err(DomainError::CannotKickSelf.into());
        }

        self.ctx
            .group_repo()
            .find_membership(group_id, target_id)
            .await?
            .ok_or(DomainError::NotGroupMember)?;

        self.ctx.group_repo().remove_member(group_id, target_id).await?;

        info!(group_id = %group_id, target_id = %target_id, "Group member removed");
        Ok(())
    }

    /// Leave the group. The owner may leave only when alone.
    #[instrument(skip(self))]
    pub async fn leave(&self, group_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let membership = self
            .ctx
            .group_repo()
            .find_membership(group_id, user_id)
            .await?
            .ok_or(DomainError::NotGroupMember)?;

        if membership.is_owner {
            let members = self.ctx.group_repo().member_count(group_id).await?;
            if members > 1 {
                return Err(DomainError::OwnerCannotLeave.into());
            }
        }

        self.ctx.group_repo().remove_member(group_id, user_id).await?;

        info!(group_id = %group_id, user_id = %user_id, "Left group");
        Ok(())
    }

    /// Rotate the invite code, owner-only, with an optional max-uses cap
    #[instrument(skip(self, data))]
    pub async fn rotate_invite_code(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        data: CreateInviteCodeRequest,
    ) -> ServiceResult<GroupResponse> {
        let mut group = self.require_owner(group_id, user_id).await?;

        group.rotate_invite_code(data.invite_code_max_uses);
        self.ctx.group_repo().update_invite_code(&group).await?;

        info!(group_id = %group_id, "Invite code rotated");
        Ok(GroupResponse::from(&group))
    }

    /// Preview a group by invite code. Members are rejected: they have the
    /// member view already.
    #[instrument(skip(self, code))]
    pub async fn check_invite_code(
        &self,
        code: &str,
        user_id: Uuid,
    ) -> ServiceResult<GroupPreviewResponse> {
        let group = self
            .ctx
            .group_repo()
            .find_by_invite_code(code)
            .await?
            .ok_or_else(|| DomainError::InviteCodeNotFound(code.to_string()))?;

        if self
            .ctx
            .group_repo()
            .find_membership(group.id, user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyGroupMember.into());
        }

        let owner = self
            .ctx
            .user_repo()
            .find_profile(group.owner_id)
            .await?
            .ok_or(DomainError::UserNotFound(group.owner_id))?;
        let member_count = self.ctx.group_repo().member_count(group.id).await?;

        Ok(GroupPreviewResponse {
            id: group.id.to_string(),
            name: group.name.clone(),
            owner: ProfileResponse::from(&owner),
            member_count,
        })
    }

    /// Join a group by invite code.
    ///
    /// With a max-uses cap, each join consumes a use; the use that would
    /// exhaust the cap rotates the code instead, so the link stops working
    /// for anyone still holding it.
    #[instrument(skip(self, code))]
    pub async fn join(&self, code: &str, user_id: Uuid) -> ServiceResult<GroupResponse> {
        let mut group = self
            .ctx
            .group_repo()
            .find_by_invite_code(code)
            .await?
            .ok_or_else(|| DomainError::InviteCodeNotFound(code.to_string()))?;

        if self
            .ctx
            .group_repo()
            .find_membership(group.id, user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyGroupMember.into());
        }

        if group.invite_code_max_uses.is_some() {
            if group.invite_code_exhausted_by_next_use() {
                let max_uses = group.invite_code_max_uses;
                group.rotate_invite_code(max_uses);
                self.ctx.group_repo().update_invite_code(&group).await?;
            } else {
                self.ctx.group_repo().increment_invite_uses(group.id).await?;
            }
        }

        let member = GroupMember::new(group.id, user_id, false);
        self.ctx.group_repo().add_member(&member).await?;

        info!(group_id = %group.id, user_id = %user_id, "Joined group");
        Ok(GroupResponse::from(&group))
    }

    /// Load the group and require the user to be a member; non-members get
    /// `GroupNotFound`.
    async fn require_membership(&self, group_id: Uuid, user_id: Uuid) -> ServiceResult<Group> {
        let group = self
            .ctx
            .group_repo()
            .find_by_id(group_id)
            .await?
            .ok_or(DomainError::GroupNotFound(group_id))?;

        self.ctx
            .group_repo()
            .find_membership(group_id, user_id)
            .await?
            .ok_or(DomainError::GroupNotFound(group_id))?;

        Ok(group)
    }

    /// Load the group and require the user to be its owner
    async fn require_owner(&self, group_id: Uuid, user_id: Uuid) -> ServiceResult<Group> {
        let group = self.require_membership(group_id, user_id).await?;
        if !group.is_owner(user_id) {
            return Err(DomainError::NotGroupOwner.into());
        }
        Ok(group)
    }
}
