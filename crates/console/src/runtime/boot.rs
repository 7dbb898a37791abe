//! Boot — logging init, config load, transport and session creation.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::LiveServer;
use crate::conf::ConsoleConfig;
use crate::session::Session;

/// Initialise the tracing / logging subsystem.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load config, build the transport, and create the session replica.
///
/// Returns `(Arc<Session>, ConsoleConfig)` on success.
pub fn boot() -> Result<(Arc<Session>, ConsoleConfig), Box<dyn std::error::Error>> {
    info!("Starting Gridwatch console v0.0.1");

    let config = ConsoleConfig::load()?;
    config.validate()?;
    info!(
        "Loaded configuration: server_url={}, poll_interval={}s",
        config.server_url, config.poll_interval_secs
    );

    let server = Arc::new(LiveServer::new(&config)?);
    let session = Arc::new(Session::new(server));
    info!("Initialized session replica");

    Ok((session, config))
}
