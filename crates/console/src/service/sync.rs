//! Sync — background task polling the session snapshot endpoint.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::session::Session;

/// Poll `refresh` on a fixed interval until shutdown is signalled.
///
/// A failed poll keeps the previous replica (stale data is better than no
/// data); failures are counted so persistent outages escalate from error
/// lines to a health warning.
pub async fn sync_loop(
    session: Arc<Session>,
    interval_secs: u64,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!("Starting state sync loop (interval: {}s)", interval_secs);

    let mut interval = time::interval(Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut sync_count: u64 = 0;
    let mut consecutive_failures: u32 = 0;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                sync_count = sync_count.saturating_add(1);

                match session.refresh().await {
                    Ok(()) => {
                        consecutive_failures = 0;
                        // Log periodically (every 30 syncs = ~30s at 1s interval)
                        if sync_count % 30 == 0 {
                            session.log_status().await;
                        }
                    }
                    Err(e) => {
                        consecutive_failures = consecutive_failures.saturating_add(1);
                        error!("State refresh failed (attempt {}): {}", consecutive_failures, e);

                        if consecutive_failures >= 3 {
                            warn!(
                                "State endpoint has failed {} times consecutively - check server health",
                                consecutive_failures
                            );
                        }
                    }
                }
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    info!("Received shutdown signal, stopping state sync");
                    break;
                }
            }
        }
    }

    info!("State sync loop stopped");
}
