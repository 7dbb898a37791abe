//! Run — spawn the sync loop and drive the status line until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

use crate::conf::ConsoleConfig;
use crate::service;
use crate::session::Session;

pub async fn run(
    session: Arc<Session>,
    config: ConsoleConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Prime the fleet list so the first status line is not empty, then
    // let the snapshot loop take over. A cold server is not fatal here.
    if let Err(e) = session.refresh_agents().await {
        info!("Fleet endpoint not ready yet: {}", e);
    }

    // Announce this console's view mode to the server.
    session.toggle_edit(config.edit_mode).await;

    tokio::spawn(service::sync_loop(
        Arc::clone(&session),
        config.poll_interval_secs,
        shutdown_rx,
    ));

    let mut status = time::interval(Duration::from_secs(config.status_interval_secs));
    status.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Received Ctrl-C, shutting down");
                let _ = shutdown_tx.send(true);
                break;
            }
            _ = status.tick() => {
                session.log_status().await;
            }
        }
    }

    Ok(())
}
