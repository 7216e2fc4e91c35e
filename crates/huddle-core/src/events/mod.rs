//! Websocket event names exchanged with clients

mod ws_event;

pub use ws_event::WsEvent;
