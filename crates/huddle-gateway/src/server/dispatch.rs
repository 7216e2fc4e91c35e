//! Command dispatch
//!
//! Routes a parsed client frame to the right service. Domain failures come
//! back as error reply frames on the same socket; they never close the
//! connection or escape the handler.

use uuid::Uuid;
use validator::Validate;

use huddle_core::events::WsEvent;
use huddle_service::dto::{
    CreateDirectMessageData, CreateGroupMessageData, DeleteDirectMessageData,
    DeleteGroupMessageData, RequestCallData,
};
use huddle_service::{CallService, MessageService, ServiceError};

use crate::protocol::{ClientFrame, ServerFrame};

use super::state::GatewayState;

/// Handle one client command. `None` means success (any resulting events
/// were already pushed through the registry); `Some` is the error reply to
/// send back.
pub async fn dispatch(state: &GatewayState, user_id: Uuid, frame: ClientFrame) -> Option<ServerFrame> {
    let event = frame.event;
    let result = match event {
        WsEvent::RequestCall => {
            let data: RequestCallData = match parse(event, frame.data) {
                Ok(data) => data,
                Err(reply) => return Some(reply),
            };
            CallService::new(state.service_context())
                .request_call(user_id, data.to_user_id)
                .await
                .map(|_| ())
        }
        WsEvent::AcceptRequestCall => CallService::new(state.service_context())
            .accept_call(user_id)
            .await
            .map(|_| ()),
        WsEvent::CancelCall => CallService::new(state.service_context())
            .cancel_call(user_id)
            .await
            .map(|_| ()),
        WsEvent::CreateDirectMessage => {
            let data: CreateDirectMessageData = match parse_validated(event, frame.data) {
                Ok(data) => data,
                Err(reply) => return Some(reply),
            };
            MessageService::new(state.service_context())
                .create_direct_message(user_id, data)
                .await
                .map(|_| ())
        }
        WsEvent::CreateGroupMessage => {
            let data: CreateGroupMessageData = match parse_validated(event, frame.data) {
                Ok(data) => data,
                Err(reply) => return Some(reply),
            };
            MessageService::new(state.service_context())
                .create_group_message(user_id, data)
                .await
                .map(|_| ())
        }
        WsEvent::DeleteDirectMessage => {
            let data: DeleteDirectMessageData = match parse(event, frame.data) {
                Ok(data) => data,
                Err(reply) => return Some(reply),
            };
            MessageService::new(state.service_context())
                .delete_direct_message(user_id, data)
                .await
                .map(|_| ())
        }
        WsEvent::DeleteGroupMessage => {
            let data: DeleteGroupMessageData = match parse(event, frame.data) {
                Ok(data) => data,
                Err(reply) => return Some(reply),
            };
            MessageService::new(state.service_context())
                .delete_group_message(user_id, data)
                .await
                .map(|_| ())
        }
        // Server-to-client only
        WsEvent::NotificationNewFriendRequest => {
            return Some(ServerFrame::error(
                event,
                "UNSUPPORTED_EVENT",
                "This event cannot be sent by clients",
            ));
        }
    };

    match result {
        Ok(()) => None,
        Err(e) => Some(to_error_frame(event, &e)),
    }
}

fn parse<T: serde::de::DeserializeOwned>(
    event: WsEvent,
    data: serde_json::Value,
) -> Result<T, ServerFrame> {
    serde_json::from_value(data)
        .map_err(|e| ServerFrame::error(event, "DECODE_ERROR", &e.to_string()))
}

fn parse_validated<T: serde::de::DeserializeOwned + Validate>(
    event: WsEvent,
    data: serde_json::Value,
) -> Result<T, ServerFrame> {
    let parsed: T = parse(event, data)?;
    parsed
        .validate()
        .map_err(|e| ServerFrame::error(event, "VALIDATION_ERROR", &e.to_string()))?;
    Ok(parsed)
}

fn to_error_frame(event: WsEvent, error: &ServiceError) -> ServerFrame {
    tracing::debug!(event = %event, error = %error, "Command failed");
    ServerFrame::error(event, error.error_code(), &error.to_string())
}
