//! Blocking client for the Vigil monitor API.
//!
//! Thin wrapper over the service's HTTP surface: create, read, update,
//! delete, and list monitors. The client owns transport, authentication
//! headers, and status-code interpretation; callers own retries (there
//! are none here) and any timeout policy around the calls.

pub mod client;
pub mod error;
pub mod types;

pub use client::Client;
pub use error::{Error, Result};
pub use types::{Channel, Entity, Monitor, MonitorPayload, MonitorRule};
