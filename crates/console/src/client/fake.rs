//! Fake — test double for session-server operations.
//!
//! Serves canned payloads from in-memory state and records every call, so
//! tests can assert exactly which requests went out (and, just as
//! important, which never did).

use std::pin::Pin;

use model::Agent;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::client::error::TransportError;
use crate::client::server::ServerOps;

/// One recorded outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum CallRecord {
    FetchState,
    FetchAgents,
    ViewChange { edit: bool },
}

#[derive(Default)]
struct Inner {
    state_payload: Value,
    agents: Vec<Agent>,
    offline: bool,
    calls: Vec<CallRecord>,
}

/// A fake session server for deterministic testing.
pub struct FakeServer {
    inner: Mutex<Inner>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state_payload: Value::Object(serde_json::Map::new()),
                ..Default::default()
            }),
        }
    }

    /// Seed the snapshot returned by `fetch_state`.
    pub async fn set_state_payload(&self, payload: Value) {
        self.inner.lock().await.state_payload = payload;
    }

    /// Seed the fleet list returned by `fetch_agents`.
    pub async fn set_agents(&self, agents: Vec<Agent>) {
        self.inner.lock().await.agents = agents;
    }

    /// Make every subsequent request fail.
    pub async fn set_offline(&self, offline: bool) {
        self.inner.lock().await.offline = offline;
    }

    /// Everything the client has sent so far, in order.
    pub async fn recorded_calls(&self) -> Vec<CallRecord> {
        self.inner.lock().await.calls.clone()
    }
}

impl Default for FakeServer {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerOps for FakeServer {
    fn fetch_state(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Value, TransportError>> + Send + '_>> {
        Box::pin(async {
            let mut state = self.inner.lock().await;
            state.calls.push(CallRecord::FetchState);
            if state.offline {
                return Err(TransportError::Unavailable("fake server offline".to_string()));
            }
            Ok(state.state_payload.clone())
        })
    }

    fn fetch_agents(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Agent>, TransportError>> + Send + '_>> {
        Box::pin(async {
            let mut state = self.inner.lock().await;
            state.calls.push(CallRecord::FetchAgents);
            if state.offline {
                return Err(TransportError::Unavailable("fake server offline".to_string()));
            }
            Ok(state.agents.clone())
        })
    }

    fn post_view_change(
        &self,
        edit: bool,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), TransportError>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.inner.lock().await;
            state.calls.push(CallRecord::ViewChange { edit });
            if state.offline {
                return Err(TransportError::Unavailable("fake server offline".to_string()));
            }
            Ok(())
        })
    }
}
