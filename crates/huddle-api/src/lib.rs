//! # huddle-api
//!
//! The server binary: REST API built with Axum, with the websocket gateway
//! mounted into the same app. One process, one service context, one
//! in-process connection registry.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::run;
