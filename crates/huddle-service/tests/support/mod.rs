//! In-memory test doubles for the service layer
//!
//! One store implements every repository port over plain maps, plus a
//! recording pusher standing in for the websocket registry. Service tests
//! run the real business logic end-to-end with no database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use huddle_common::auth::JwtService;
use huddle_core::entities::{
    CallChannel, CallMember, Channel, FriendshipRequest, FriendshipRequestStatus, Group,
    GroupMember, Message, Profile, User,
};
use huddle_core::error::DomainError;
use huddle_core::events::WsEvent;
use huddle_core::traits::{
    CallRepository, ChannelRepository, ConnectionPush, FriendRepository, GroupRepository,
    MemberPresence, MessageRepository, MessageWithAuthor, RepoResult, UserRepository,
};
use huddle_core::value_objects::Page;
use huddle_service::{ServiceContext, ServiceContextBuilder};

// ============================================================================
// Recording pusher
// ============================================================================

/// A pushed event captured for assertions
#[derive(Debug, Clone)]
pub struct PushedEvent {
    pub ws_id: String,
    pub event: WsEvent,
    pub payload: serde_json::Value,
}

/// Records every push instead of delivering it
#[derive(Default)]
pub struct RecordingPusher {
    events: Mutex<Vec<PushedEvent>>,
}

impl RecordingPusher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PushedEvent> {
        self.events.lock().clone()
    }

    pub fn events_for(&self, ws_id: &str) -> Vec<PushedEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.ws_id == ws_id)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ConnectionPush for RecordingPusher {
    fn push(&self, ws_id: &str, event: WsEvent, payload: &serde_json::Value) {
        self.events.lock().push(PushedEvent {
            ws_id: ws_id.to_string(),
            event,
            payload: payload.clone(),
        });
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Backing store for every repository port
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<HashMap<Uuid, (User, Profile)>>,
    requests: Mutex<Vec<FriendshipRequest>>,
    friendships: Mutex<Vec<(Uuid, Uuid)>>,
    groups: Mutex<HashMap<Uuid, Group>>,
    group_members: Mutex<Vec<GroupMember>>,
    channels: Mutex<HashMap<Uuid, Channel>>,
    channel_members: Mutex<Vec<(Uuid, Uuid)>>,
    messages: Mutex<Vec<Message>>,
    calls: Mutex<HashMap<Uuid, CallChannel>>,
    call_members: Mutex<Vec<(Uuid, Uuid)>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn presence_of(&self, user_id: Uuid) -> Option<MemberPresence> {
        self.users.lock().get(&user_id).map(|(user, profile)| MemberPresence {
            user_id,
            ws_id: user.ws_id.clone(),
            full_name: profile.full_name.clone(),
            avatar_url: profile.avatar_url.clone(),
        })
    }

    fn with_author(&self, message: &Message) -> MessageWithAuthor {
        let users = self.users.lock();
        let (name, avatar) = users
            .get(&message.author_id)
            .map(|(_, p)| (p.full_name.clone(), p.avatar_url.clone()))
            .unwrap_or_else(|| ("unknown".to_string(), None));
        MessageWithAuthor {
            message: message.clone(),
            author_name: name,
            author_avatar: avatar,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Snapshot a channel row for assertions
    pub fn channel_snapshot(&self, id: Uuid) -> Channel {
        self.channels.lock().get(&id).cloned().expect("channel exists")
    }

    /// The direct channel between two users, if any
    pub fn direct_channel_between(&self, a: Uuid, b: Uuid) -> Option<Channel> {
        let members = self.channel_members.lock();
        let channels = self.channels.lock();
        channels
            .values()
            .filter(|c| c.is_direct())
            .find(|c| {
                members.iter().any(|(cid, u)| *cid == c.id && *u == a)
                    && members.iter().any(|(cid, u)| *cid == c.id && *u == b)
            })
            .cloned()
    }
}

fn paginate<T: Clone>(items: &[T], page: Page) -> Vec<T> {
    items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.users.lock().get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_profile(&self, user_id: Uuid) -> RepoResult<Option<Profile>> {
        Ok(self.users.lock().get(&user_id).map(|(_, p)| p.clone()))
    }

    async fn create(&self, user: &User, profile: &Profile) -> RepoResult<()> {
        self.users
            .lock()
            .insert(user.id, (user.clone(), profile.clone()));
        Ok(())
    }

    async fn update_profile(&self, profile: &Profile) -> RepoResult<()> {
        let mut users = self.users.lock();
        match users.get_mut(&profile.user_id) {
            Some((_, p)) => {
                *p = profile.clone();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(profile.user_id)),
        }
    }

    async fn search_profiles(
        &self,
        query: Option<&str>,
        page: Page,
    ) -> RepoResult<(Vec<MemberPresence>, i64)> {
        let users = self.users.lock();
        let mut rows: Vec<MemberPresence> = users
            .iter()
            .filter(|(_, (_, p))| match query {
                Some(q) => p.full_name.to_lowercase().contains(&q.to_lowercase()),
                None => true,
            })
            .map(|(id, (u, p))| MemberPresence {
                user_id: *id,
                ws_id: u.ws_id.clone(),
                full_name: p.full_name.clone(),
                avatar_url: p.avatar_url.clone(),
            })
            .collect();
        rows.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        let total = rows.len() as i64;
        Ok((paginate(&rows, page), total))
    }

    async fn bind_connection(&self, user_id: Uuid, ws_id: &str) -> RepoResult<()> {
        let mut users = self.users.lock();
        match users.get_mut(&user_id) {
            Some((u, _)) => {
                u.ws_id = Some(ws_id.to_string());
                Ok(())
            }
            None => Err(DomainError::UserNotFound(user_id)),
        }
    }

    async fn release_connection(&self, user_id: Uuid, ws_id: &str) -> RepoResult<bool> {
        let mut users = self.users.lock();
        match users.get_mut(&user_id) {
            Some((u, _)) if u.ws_id.as_deref() == Some(ws_id) => {
                u.ws_id = None;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(DomainError::UserNotFound(user_id)),
        }
    }

    async fn reset_all_connections(&self) -> RepoResult<u64> {
        let mut users = self.users.lock();
        let mut cleared = 0;
        for (u, _) in users.values_mut() {
            if u.ws_id.take().is_some() {
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

#[async_trait]
impl FriendRepository for InMemoryStore {
    async fn find_request_between(
        &self,
        a: Uuid,
        b: Uuid,
    ) -> RepoResult<Option<FriendshipRequest>> {
        Ok(self.requests.lock().iter().find(|r| r.links(a, b)).cloned())
    }

    async fn create_request(&self, request: &FriendshipRequest) -> RepoResult<()> {
        self.requests.lock().push(request.clone());
        Ok(())
    }

    async fn list_requests_from(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<MemberPresence>, i64)> {
        let rows: Vec<MemberPresence> = self
            .requests
            .lock()
            .iter()
            .filter(|r| r.from_user_id == user_id && r.is_pending())
            .filter_map(|r| self.presence_of(r.to_user_id))
            .collect();
        let total = rows.len() as i64;
        Ok((paginate(&rows, page), total))
    }

    async fn list_requests_to(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<MemberPresence>, i64)> {
        let rows: Vec<MemberPresence> = self
            .requests
            .lock()
            .iter()
            .filter(|r| r.to_user_id == user_id && r.is_pending())
            .filter_map(|r| self.presence_of(r.from_user_id))
            .collect();
        let total = rows.len() as i64;
        Ok((paginate(&rows, page), total))
    }

    async fn count_requests_from(&self, user_id: Uuid) -> RepoResult<i64> {
        Ok(self
            .requests
            .lock()
            .iter()
            .filter(|r| r.from_user_id == user_id && r.is_pending())
            .count() as i64)
    }

    async fn count_requests_to(&self, user_id: Uuid) -> RepoResult<i64> {
        Ok(self
            .requests
            .lock()
            .iter()
            .filter(|r| r.to_user_id == user_id && r.is_pending())
            .count() as i64)
    }

    async fn accept_request(&self, from_user_id: Uuid, to_user_id: Uuid) -> RepoResult<()> {
        let mut requests = self.requests.lock();
        let request = requests
            .iter_mut()
            .find(|r| r.from_user_id == from_user_id && r.to_user_id == to_user_id && r.is_pending())
            .ok_or(DomainError::FriendRequestNotFound)?;
        request.status = FriendshipRequestStatus::Accepted;

        let mut friendships = self.friendships.lock();
        friendships.push((from_user_id, to_user_id));
        friendships.push((to_user_id, from_user_id));
        Ok(())
    }

    async fn delete_pending_between(&self, a: Uuid, b: Uuid) -> RepoResult<u64> {
        let mut requests = self.requests.lock();
        let before = requests.len();
        requests.retain(|r| !(r.links(a, b) && r.is_pending()));
        Ok((before - requests.len()) as u64)
    }

    async fn friendship_exists(&self, from_user_id: Uuid, to_user_id: Uuid) -> RepoResult<bool> {
        Ok(self
            .friendships
            .lock()
            .contains(&(from_user_id, to_user_id)))
    }

    async fn list_friends(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<MemberPresence>, i64)> {
        let rows: Vec<MemberPresence> = self
            .friendships
            .lock()
            .iter()
            .filter(|(from, _)| *from == user_id)
            .filter_map(|(_, to)| self.presence_of(*to))
            .collect();
        let total = rows.len() as i64;
        Ok((paginate(&rows, page), total))
    }

    async fn delete_friendship_pair(&self, a: Uuid, b: Uuid) -> RepoResult<()> {
        self.friendships
            .lock()
            .retain(|(from, to)| !((*from == a && *to == b) || (*from == b && *to == a)));
        self.requests.lock().retain(|r| !r.links(a, b));
        Ok(())
    }
}

#[async_trait]
impl GroupRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Group>> {
        Ok(self.groups.lock().get(&id).cloned())
    }

    async fn find_by_invite_code(&self, code: &str) -> RepoResult<Option<Group>> {
        Ok(self
            .groups
            .lock()
            .values()
            .find(|g| g.invite_code.as_str() == code)
            .cloned())
    }

    async fn count_owned(&self, user_id: Uuid) -> RepoResult<i64> {
        Ok(self
            .groups
            .lock()
            .values()
            .filter(|g| g.owner_id == user_id)
            .count() as i64)
    }

    async fn create(&self, group: &Group, owner: &GroupMember) -> RepoResult<()> {
        self.groups.lock().insert(group.id, group.clone());
        self.group_members.lock().push(owner.clone());
        Ok(())
    }

    async fn update(&self, group: &Group) -> RepoResult<()> {
        match self.groups.lock().get_mut(&group.id) {
            Some(existing) => {
                *existing = group.clone();
                Ok(())
            }
            None => Err(DomainError::GroupNotFound(group.id)),
        }
    }

    async fn update_invite_code(&self, group: &Group) -> RepoResult<()> {
        self.update(group).await
    }

    async fn increment_invite_uses(&self, group_id: Uuid) -> RepoResult<()> {
        if let Some(group) = self.groups.lock().get_mut(&group_id) {
            group.invite_code_uses += 1;
        }
        Ok(())
    }

    async fn find_membership(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> RepoResult<Option<GroupMember>> {
        Ok(self
            .group_members
            .lock()
            .iter()
            .find(|m| m.group_id == group_id && m.user_id == user_id)
            .cloned())
    }

    async fn add_member(&self, member: &GroupMember) -> RepoResult<()> {
        let mut members = self.group_members.lock();
        if members
            .iter()
            .any(|m| m.group_id == member.group_id && m.user_id == member.user_id)
        {
            return Err(DomainError::AlreadyGroupMember);
        }
        members.push(member.clone());
        Ok(())
    }

    async fn remove_member(&self, group_id: Uuid, user_id: Uuid) -> RepoResult<()> {
        let mut members = self.group_members.lock();
        let before = members.len();
        members.retain(|m| !(m.group_id == group_id && m.user_id == user_id));
        if members.len() == before {
            return Err(DomainError::NotGroupMember);
        }
        Ok(())
    }

    async fn member_count(&self, group_id: Uuid) -> RepoResult<i64> {
        Ok(self
            .group_members
            .lock()
            .iter()
            .filter(|m| m.group_id == group_id)
            .count() as i64)
    }

    async fn list_joined(&self, user_id: Uuid, page: Page) -> RepoResult<(Vec<Group>, i64)> {
        let groups = self.groups.lock();
        let rows: Vec<Group> = self
            .group_members
            .lock()
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| groups.get(&m.group_id).cloned())
            .collect();
        let total = rows.len() as i64;
        Ok((paginate(&rows, page), total))
    }

    async fn list_members(
        &self,
        group_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<(MemberPresence, bool)>, i64)> {
        let mut rows: Vec<(MemberPresence, bool)> = self
            .group_members
            .lock()
            .iter()
            .filter(|m| m.group_id == group_id)
            .filter_map(|m| self.presence_of(m.user_id).map(|p| (p, m.is_owner)))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        let total = rows.len() as i64;
        Ok((paginate(&rows, page), total))
    }

    async fn members_presence(&self, group_id: Uuid) -> RepoResult<Vec<MemberPresence>> {
        Ok(self
            .group_members
            .lock()
            .iter()
            .filter(|m| m.group_id == group_id)
            .filter_map(|m| self.presence_of(m.user_id))
            .collect())
    }
}

#[async_trait]
impl ChannelRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Channel>> {
        Ok(self.channels.lock().get(&id).cloned())
    }

    async fn find_direct_between(&self, a: Uuid, b: Uuid) -> RepoResult<Option<Channel>> {
        let members = self.channel_members.lock();
        let channels = self.channels.lock();
        for channel in channels.values().filter(|c| c.is_direct()) {
            let has_a = members.iter().any(|(c, u)| *c == channel.id && *u == a);
            let has_b = members.iter().any(|(c, u)| *c == channel.id && *u == b);
            if has_a && has_b {
                return Ok(Some(channel.clone()));
            }
        }
        Ok(None)
    }

    async fn create_direct(&self, channel: &Channel, a: Uuid, b: Uuid) -> RepoResult<()> {
        self.channels.lock().insert(channel.id, channel.clone());
        let mut members = self.channel_members.lock();
        members.push((channel.id, a));
        members.push((channel.id, b));
        Ok(())
    }

    async fn is_direct_member(&self, channel_id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        Ok(self
            .channel_members
            .lock()
            .iter()
            .any(|(c, u)| *c == channel_id && *u == user_id))
    }

    async fn direct_members(&self, channel_id: Uuid) -> RepoResult<Vec<MemberPresence>> {
        Ok(self
            .channel_members
            .lock()
            .iter()
            .filter(|(c, _)| *c == channel_id)
            .filter_map(|(_, u)| self.presence_of(*u))
            .collect())
    }

    async fn list_recent_direct(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<Channel>, i64)> {
        let messages = self.messages.lock();
        let members = self.channel_members.lock();
        let channels = self.channels.lock();

        let mut rows: Vec<Channel> = channels
            .values()
            .filter(|c| c.is_direct())
            .filter(|c| members.iter().any(|(cid, u)| *cid == c.id && *u == user_id))
            .filter(|c| messages.iter().any(|m| m.channel_id == c.id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        let total = rows.len() as i64;
        Ok((paginate(&rows, page), total))
    }

    async fn create_group_channel(&self, channel: &Channel) -> RepoResult<()> {
        self.channels.lock().insert(channel.id, channel.clone());
        Ok(())
    }

    async fn find_group_channel(
        &self,
        group_id: Uuid,
        channel_id: Uuid,
    ) -> RepoResult<Option<Channel>> {
        Ok(self
            .channels
            .lock()
            .get(&channel_id)
            .filter(|c| c.is_group() && c.group_id == Some(group_id) && !c.is_deleted)
            .cloned())
    }

    async fn list_group_channels(
        &self,
        group_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<Channel>, i64)> {
        let mut rows: Vec<Channel> = self
            .channels
            .lock()
            .values()
            .filter(|c| c.is_group() && c.group_id == Some(group_id) && !c.is_deleted)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.name.cmp(&a.name));
        let total = rows.len() as i64;
        Ok((paginate(&rows, page), total))
    }

    async fn update_group_channel(&self, channel: &Channel) -> RepoResult<()> {
        match self.channels.lock().get_mut(&channel.id) {
            Some(existing) => {
                *existing = channel.clone();
                Ok(())
            }
            None => Err(DomainError::ChannelNotFound(channel.id)),
        }
    }

    async fn soft_delete_group_channel(&self, channel_id: Uuid) -> RepoResult<()> {
        match self.channels.lock().get_mut(&channel_id) {
            Some(channel) if !channel.is_deleted => {
                channel.is_deleted = true;
                Ok(())
            }
            _ => Err(DomainError::ChannelNotFound(channel_id)),
        }
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Message>> {
        Ok(self.messages.lock().iter().find(|m| m.id == id).cloned())
    }

    async fn find_owned_active(&self, id: Uuid, author_id: Uuid) -> RepoResult<Option<Message>> {
        Ok(self
            .messages
            .lock()
            .iter()
            .find(|m| m.id == id && m.author_id == author_id && !m.is_deleted)
            .cloned())
    }

    async fn create_direct(&self, message: &Message) -> RepoResult<()> {
        self.messages.lock().push(message.clone());
        if let Some(channel) = self.channels.lock().get_mut(&message.channel_id) {
            channel.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.messages.lock().push(message.clone());
        Ok(())
    }

    async fn mark_deleted(&self, id: Uuid) -> RepoResult<()> {
        let mut messages = self.messages.lock();
        match messages.iter_mut().find(|m| m.id == id && !m.is_deleted) {
            Some(message) => {
                message.is_deleted = true;
                Ok(())
            }
            None => Err(DomainError::MessageNotFound(id)),
        }
    }

    async fn list_by_channel(
        &self,
        channel_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<MessageWithAuthor>, i64)> {
        let mut rows: Vec<Message> = self
            .messages
            .lock()
            .iter()
            .filter(|m| m.channel_id == channel_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = rows.len() as i64;
        let rows = paginate(&rows, page)
            .iter()
            .map(|m| self.with_author(m))
            .collect();
        Ok((rows, total))
    }

    async fn last_in_channel(&self, channel_id: Uuid) -> RepoResult<Option<MessageWithAuthor>> {
        Ok(self
            .messages
            .lock()
            .iter()
            .filter(|m| m.channel_id == channel_id)
            .max_by_key(|m| m.created_at)
            .map(|m| self.with_author(m)))
    }
}

#[async_trait]
impl CallRepository for InMemoryStore {
    async fn find_by_member(&self, user_id: Uuid) -> RepoResult<Option<CallChannel>> {
        let members = self.call_members.lock();
        let calls = self.calls.lock();
        Ok(members
            .iter()
            .find(|(_, u)| *u == user_id)
            .and_then(|(c, _)| calls.get(c).cloned()))
    }

    async fn create(&self, channel: &CallChannel, caller: Uuid, callee: Uuid) -> RepoResult<()> {
        let mut members = self.call_members.lock();
        // The membership table's unique constraint on user id
        if members.iter().any(|(_, u)| *u == caller) {
            return Err(DomainError::AlreadyInCall(caller));
        }
        if members.iter().any(|(_, u)| *u == callee) {
            return Err(DomainError::AlreadyInCall(callee));
        }
        self.calls.lock().insert(channel.id, channel.clone());
        members.push((channel.id, caller));
        members.push((channel.id, callee));
        Ok(())
    }

    async fn members(&self, channel_id: Uuid) -> RepoResult<Vec<CallMember>> {
        Ok(self
            .call_members
            .lock()
            .iter()
            .filter(|(c, _)| *c == channel_id)
            .filter_map(|(_, u)| {
                self.presence_of(*u).map(|p| CallMember {
                    user_id: p.user_id,
                    ws_id: p.ws_id,
                    full_name: p.full_name,
                    avatar_url: p.avatar_url,
                })
            })
            .collect())
    }

    async fn set_accepted(&self, channel_id: Uuid, at: DateTime<Utc>) -> RepoResult<()> {
        match self.calls.lock().get_mut(&channel_id) {
            Some(channel) => {
                channel.accepted_at = Some(at);
                Ok(())
            }
            None => Err(DomainError::NotInCall),
        }
    }

    async fn delete(&self, channel_id: Uuid) -> RepoResult<()> {
        self.calls.lock().remove(&channel_id);
        self.call_members.lock().retain(|(c, _)| *c != channel_id);
        Ok(())
    }

    async fn delete_all(&self) -> RepoResult<u64> {
        let removed = self.calls.lock().len() as u64;
        self.calls.lock().clear();
        self.call_members.lock().clear();
        Ok(removed)
    }
}

// ============================================================================
// Test world
// ============================================================================

/// Wires the in-memory store and recording pusher into a ServiceContext
pub struct TestWorld {
    pub store: Arc<InMemoryStore>,
    pub pusher: Arc<RecordingPusher>,
    pub ctx: ServiceContext,
}

impl TestWorld {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let pusher = Arc::new(RecordingPusher::new());
        let jwt = Arc::new(JwtService::new("test-secret-key-that-is-long-enough", 900, 604800));

        let ctx = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .friend_repo(store.clone())
            .group_repo(store.clone())
            .channel_repo(store.clone())
            .message_repo(store.clone())
            .call_repo(store.clone())
            .pusher(pusher.clone())
            .jwt_service(jwt)
            .build()
            .expect("test context");

        Self { store, pusher, ctx }
    }

    /// Add a user, optionally with a live connection
    pub async fn add_user(&self, name: &str, ws_id: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        let mut user = User::new(id, format!("{name}@example.com"));
        user.ws_id = ws_id.map(String::from);
        let profile = Profile::new(id, name.to_string());
        UserRepository::create(self.store.as_ref(), &user, &profile)
            .await
            .expect("add user");
        id
    }

    /// Add a direct channel between two users
    pub async fn add_direct_channel(&self, a: Uuid, b: Uuid) -> Uuid {
        let channel = Channel::new_direct(Uuid::new_v4());
        let id = channel.id;
        ChannelRepository::create_direct(self.store.as_ref(), &channel, a, b)
            .await
            .expect("add channel");
        id
    }
}
