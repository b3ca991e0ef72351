//! Speech-to-text session client
//!
//! This module provides the `SessionClient` state machine that manages:
//! - Token fetching from the broker
//! - Realtime session lifecycle (start, microphone, stop)
//! - Transcript accumulation from pushed chunks
//! - Disconnect handling and the UI-facing error message
//!
//! `SessionDriver` runs a client on one task, fed by UI commands and the
//! provider's event channel.

mod client;
mod config;
mod driver;
mod error;
mod provider;
mod scripted;
mod stats;
mod token;
mod transcript;

pub use client::{PendingStart, SessionClient, StartOutcome};
pub use config::{SessionSettings, StartSessionRequest, SttProvider, SttSettings};
pub use driver::{Command, SessionDriver, SessionHandle};
pub use error::SessionError;
pub use provider::{RealtimeEvent, RealtimeProvider, RealtimeSession};
pub use scripted::ScriptedProvider;
pub use stats::SessionStats;
pub use token::{HttpTokenSource, SessionToken, TokenSource};
pub use transcript::Transcript;
