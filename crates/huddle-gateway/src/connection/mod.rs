//! Live connection registry

mod registry;

pub use registry::ConnectionRegistry;
