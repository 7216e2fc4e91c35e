//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (migrations run automatically)
//! - Environment variable: DATABASE_URL (JWT_SECRET optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth / User Tests
// ============================================================================

#[tokio::test]
async fn test_me_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/user/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (id, token) = server.seed_user("Current User").await.unwrap();

    let response = server.get_auth("/api/v1/user/me", &token).await.unwrap();
    let me: CurrentUserBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(me.id, id.to_string());
    assert_eq!(me.profile.full_name, "Current User");
}

#[tokio::test]
async fn test_update_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.seed_user("Old Name").await.unwrap();

    let body = UpdateProfileBody {
        full_name: "New Name".to_string(),
        avatar_url: None,
    };
    let response = server
        .patch_auth("/api/v1/user/me/profile", &token, &body)
        .await
        .unwrap();
    let profile: ProfileBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.full_name, "New Name");

    let response = server.get_auth("/api/v1/user/me", &token).await.unwrap();
    let me: CurrentUserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.profile.full_name, "New Name");
}

// ============================================================================
// Friend Tests
// ============================================================================

#[tokio::test]
async fn test_friend_request_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (alice_id, alice) = server.seed_user("Flow Alice").await.unwrap();
    let (bob_id, bob) = server.seed_user("Flow Bob").await.unwrap();

    // Alice sends a request to Bob
    let response = server
        .post_auth(&format!("/api/v1/friend/request/{bob_id}"), &alice, &())
        .await
        .unwrap();
    let request: FriendRequestBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(request.status, "pending");

    // A duplicate in the other direction conflicts
    let response = server
        .post_auth(&format!("/api/v1/friend/request/{alice_id}"), &bob, &())
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Bob sees it pending
    let response = server
        .get_auth("/api/v1/friend/request/count-to-me", &bob)
        .await
        .unwrap();
    let count: i64 = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count, 1);

    // Bob accepts
    let response = server
        .post_auth(
            &format!("/api/v1/friend/request/{alice_id}/accept"),
            &bob,
            &(),
        )
        .await
        .unwrap();
    let accepted: FriendRequestBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accepted.status, "accepted");

    // Both sides list each other; neither has a live socket here
    let response = server.get_auth("/api/v1/friend", &alice).await.unwrap();
    let friends: PaginatedBody<UserPresenceBody> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(friends.meta.total, 1);
    assert_eq!(friends.data[0].profile.full_name, "Flow Bob");
    assert!(!friends.data[0].is_online);

    // Unfriend removes both directions
    let response = server
        .delete_auth(&format!("/api/v1/friend/{bob_id}"), &alice)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/api/v1/friend", &bob).await.unwrap();
    let friends: PaginatedBody<UserPresenceBody> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(friends.meta.total, 0);
}

#[tokio::test]
async fn test_friend_request_to_self_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (alice_id, alice) = server.seed_user("Self Alice").await.unwrap();

    let response = server
        .post_auth(&format!("/api/v1/friend/request/{alice_id}"), &alice, &())
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

// ============================================================================
// Group Tests
// ============================================================================

#[tokio::test]
async fn test_group_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner_id, owner) = server.seed_user("Group Owner").await.unwrap();
    let (_, member) = server.seed_user("Group Member").await.unwrap();

    // Create
    let body = CreateGroupBody::unique();
    let response = server.post_auth("/api/v1/group", &owner, &body).await.unwrap();
    let group: GroupBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(group.name, body.name);
    assert_eq!(group.owner_id, owner_id.to_string());
    assert!(!group.invite_code.is_empty());

    // Joined list contains it
    let response = server.get_auth("/api/v1/group/joined", &owner).await.unwrap();
    let joined: PaginatedBody<GroupBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(joined.data.iter().any(|g| g.id == group.id));

    // A non-member cannot see the group
    let response = server
        .get_auth(&format!("/api/v1/group/{}", group.id), &member)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Join by invite code
    let response = server
        .post_auth(
            &format!("/api/v1/group/join/{}", group.invite_code),
            &member,
            &(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Member listing: owner first
    let response = server
        .get_auth(&format!("/api/v1/group/{}/members", group.id), &member)
        .await
        .unwrap();
    let members: PaginatedBody<MemberBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(members.meta.total, 2);
    assert!(members.data[0].is_owner);
}

#[tokio::test]
async fn test_invite_code_rotation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = server.seed_user("Rotate Owner").await.unwrap();

    let response = server
        .post_auth("/api/v1/group", &owner, &CreateGroupBody::unique())
        .await
        .unwrap();
    let group: GroupBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/group/{}/invite-code", group.id),
            &owner,
            &CreateInviteCodeBody {
                invite_code_max_uses: Some(5),
            },
        )
        .await
        .unwrap();
    let rotated: GroupBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_ne!(rotated.invite_code, group.invite_code);
    assert_eq!(rotated.invite_code_uses, 0);
    assert_eq!(rotated.invite_code_max_uses, Some(5));

    // The old code no longer resolves
    let (_, joiner) = server.seed_user("Rotate Joiner").await.unwrap();
    let response = server
        .post_auth(
            &format!("/api/v1/group/join/{}", group.invite_code),
            &joiner,
            &(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Channel Tests
// ============================================================================

#[tokio::test]
async fn test_group_channel_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = server.seed_user("Channel Owner").await.unwrap();

    let response = server
        .post_auth("/api/v1/group", &owner, &CreateGroupBody::unique())
        .await
        .unwrap();
    let group: GroupBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Create a channel
    let body = CreateGroupChannelBody::unique();
    let response = server
        .post_auth(
            &format!("/api/v1/group-message-channel/{}", group.id),
            &owner,
            &body,
        )
        .await
        .unwrap();
    let channel: ChannelBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(channel.name.as_deref(), Some(body.name.as_str()));
    assert_eq!(channel.group_id.as_deref(), Some(group.id.as_str()));

    // Listed
    let response = server
        .get_auth(&format!("/api/v1/group-message-channel/{}", group.id), &owner)
        .await
        .unwrap();
    let channels: PaginatedBody<ChannelBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(channels.data.iter().any(|c| c.id == channel.id));

    // Soft delete hides it from the listing
    let response = server
        .delete_auth(
            &format!("/api/v1/group-message-channel/{}/{}", group.id, channel.id),
            &owner,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/group-message-channel/{}", group.id), &owner)
        .await
        .unwrap();
    let channels: PaginatedBody<ChannelBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!channels.data.iter().any(|c| c.id == channel.id));
}

#[tokio::test]
async fn test_recent_direct_channels_empty_without_messages() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (alice_id, alice) = server.seed_user("Quiet Alice").await.unwrap();
    let (bob_id, bob) = server.seed_user("Quiet Bob").await.unwrap();

    // Becoming friends creates the direct channel
    server
        .post_auth(&format!("/api/v1/friend/request/{bob_id}"), &alice, &())
        .await
        .unwrap();
    server
        .post_auth(
            &format!("/api/v1/friend/request/{alice_id}/accept"),
            &bob,
            &(),
        )
        .await
        .unwrap();

    // Without any messages the channel stays out of the recent list
    let response = server
        .get_auth("/api/v1/direct-message-channel", &alice)
        .await
        .unwrap();
    let channels: PaginatedBody<serde_json::Value> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(channels.meta.total, 0);
}
