//! Session — the client-side replica of one server session.

use std::sync::Arc;

use model::{ModelError, State};
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info};

use crate::client::{ServerOps, TransportError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Owns the replicated [`State`] and the transport used to keep it fresh.
///
/// Constructed once per run. All refresh paths go through
/// [`Session::refresh`], which keeps the previous replica on any failure
/// (stale data is better than no data).
pub struct Session {
    state: RwLock<State>,
    server: Arc<dyn ServerOps>,
}

impl Session {
    pub fn new(server: Arc<dyn ServerOps>) -> Self {
        Self {
            state: RwLock::new(State::new()),
            server,
        }
    }

    /// Read access to the current replica.
    pub async fn state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().await
    }

    /// Fetch one snapshot and absorb it into the replica.
    pub async fn refresh(&self) -> Result<(), SessionError> {
        let payload = self.server.fetch_state().await?;
        self.state.write().await.absorb(payload)?;
        Ok(())
    }

    /// Sync only the agents collection from the fleet endpoint.
    pub async fn refresh_agents(&self) -> Result<(), SessionError> {
        let agents = self.server.fetch_agents().await?;
        self.state.write().await.agents_mut().sync(agents);
        Ok(())
    }

    /// Flip the edit-mode flag and notify the server, fire-and-forget:
    /// the notification runs on a detached task, its outcome is not
    /// awaited and a failure rolls nothing back. Returns the new mode
    /// label for the status line.
    pub async fn toggle_edit(&self, to_edit_mode: bool) -> &'static str {
        let label = {
            let mut state = self.state.write().await;
            state.set_edit_mode(to_edit_mode);
            state.mode_label()
        };

        let server = Arc::clone(&self.server);
        tokio::spawn(async move {
            if let Err(e) = server.post_view_change(to_edit_mode).await {
                debug!("View change notification failed: {}", e);
            }
        });

        info!("Switched to {}", label);
        label
    }

    /// Drop an agent from the local replica. Nothing is sent to the
    /// server; the agent will reappear on the next refresh if it is still
    /// in the snapshot.
    pub async fn detach_agent(&self, agent_id: &str) -> bool {
        self.state.write().await.agents_mut().detach(agent_id).is_some()
    }

    /// Emit the one-line status summary.
    pub async fn log_status(&self) {
        let state = self.state.read().await;
        info!(
            "{} | t={:.1} | {} agents / {} tasks ({} completed) / {} hazards / {} targets",
            state.mode_label(),
            state.time(),
            state.agents().len(),
            state.tasks().len(),
            state.completed_tasks().len(),
            state.hazards().len(),
            state.targets().len(),
        );
    }
}
