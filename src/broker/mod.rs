//! Token broker
//!
//! Exchanges the server-held API key for a short-lived streaming session
//! token. The key only ever leaves the process as the `x-api-key` header of
//! the upstream `streaming.create_token` call.

pub mod client;
pub mod error;
pub mod messages;

pub use client::TokenBroker;
pub use error::BrokerError;
pub use messages::{CreateTokenResponse, TokenData};
