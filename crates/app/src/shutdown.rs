//! Shutdown signal handling

use std::io;

use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),
}

/// Resolves once the user presses Ctrl+C.
pub(crate) async fn ctrl_c() -> Result<(), ShutdownSignalError> {
    signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC)?;

    info!("ctrl_c signal received");

    Ok(())
}
