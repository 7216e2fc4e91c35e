//! Friendship request entity <-> model mapper

use huddle_core::entities::{FriendshipRequest, FriendshipRequestStatus};

use crate::models::FriendshipRequestModel;

impl From<FriendshipRequestModel> for FriendshipRequest {
    fn from(model: FriendshipRequestModel) -> Self {
        FriendshipRequest {
            from_user_id: model.from_user_id,
            to_user_id: model.to_user_id,
            status: parse_status(&model.status),
            created_at: model.created_at,
        }
    }
}

// The column only ever holds the two values written by this crate
fn parse_status(status: &str) -> FriendshipRequestStatus {
    match status {
        "accepted" => FriendshipRequestStatus::Accepted,
        _ => FriendshipRequestStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("accepted"), FriendshipRequestStatus::Accepted);
        assert_eq!(parse_status("pending"), FriendshipRequestStatus::Pending);
    }
}
