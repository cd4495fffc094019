//! HTTP service for Rootlab.
//!
//! Accepts solve requests as JSON, runs Newton-Raphson or the bracketed
//! Brent/bisection pair from [`rootlab_solvers`], optionally cross-checks the
//! root, and records every successful solve in a bounded history.

pub mod config;
pub mod history;
pub mod routes;
pub mod solve;

mod error;

pub use config::{ConfigError, ServerConfig};
pub use error::Error;

use std::sync::Arc;

use tracing::{error, info};

use crate::history::{JsonFileLedger, Ledger};

/// Serves the API until Ctrl-C is received.
///
/// # Errors
///
/// Returns an error if the listening address cannot be bound.
pub async fn run(config: ServerConfig) -> Result<(), Error> {
    let ledger: Arc<dyn Ledger> = Arc::new(JsonFileLedger::new(
        config.history_path.clone(),
        config.history_capacity,
    ));
    let routes = routes::app(ledger, config.static_dir.clone());

    let addr = config.addr();
    let (bound, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown(addr, shutdown_signal())
        .map_err(|source| Error::Bind { addr, source })?;

    info!(
        addr = %bound,
        history = %config.history_path.display(),
        "server running"
    );
    server.await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
