//! Gateway server pieces: shared state, the websocket handler, and command
//! dispatch

mod dispatch;
mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;
