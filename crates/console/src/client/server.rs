//! Server trait — abstract interface for all session-server operations.
//!
//! `live.rs` provides the real HTTP implementation.
//! `fake.rs` provides a test double that records every call.

use std::pin::Pin;

use model::Agent;
use serde_json::Value;

use crate::client::error::TransportError;

/// Unified async interface over the session server.
///
/// Object-safe thanks to `Pin<Box<…>>` returns.
/// Implementations must be `Send + Sync` so they can live inside
/// `Arc<Session>`.
pub trait ServerOps: Send + Sync {
    /// `GET state.json` — one decoded session snapshot.
    fn fetch_state(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Value, TransportError>> + Send + '_>>;

    /// `GET /agents` — the fleet list on its own.
    fn fetch_agents(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Agent>, TransportError>> + Send + '_>>;

    /// `POST /changeview` with `{"edit": <bool>}`. Callers treat this as
    /// fire-and-forget; no acknowledgement is interpreted.
    fn post_view_change(
        &self,
        edit: bool,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), TransportError>> + Send + '_>>;
}
