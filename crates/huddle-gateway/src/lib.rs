//! # huddle-gateway
//!
//! The websocket layer: the connection registry (live socket map + outbound
//! push), the wire protocol, and the connection handler that translates
//! socket connect/disconnect into presence updates and routes client
//! commands to the services.
//!
//! This crate is a library; the server binary mounts [`gateway_handler`]
//! into its router and shares one [`ConnectionRegistry`] with the service
//! context's push port.

pub mod connection;
pub mod protocol;
pub mod server;

pub use connection::ConnectionRegistry;
pub use protocol::{ClientFrame, ServerFrame};
pub use server::{gateway_handler, GatewayState};
