//! Wire protocol for the websocket transport

mod messages;

pub use messages::{ClientFrame, ServerFrame};
