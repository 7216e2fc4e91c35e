//! Entity <-> model mappers

mod call;
mod channel;
mod friend;
mod group;
mod message;
mod presence;
mod user;
