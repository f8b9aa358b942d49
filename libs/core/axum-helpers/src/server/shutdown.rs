//! Shutdown signal handling.

use tokio::signal;
use tracing::info;

/// Resolve once the process receives SIGINT or SIGTERM.
///
/// Handed to `axum::serve(...).with_graceful_shutdown(...)`: axum stops
/// accepting connections when this resolves and drains requests already in
/// flight before returning.
pub async fn shutdown_signal() {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .expect("failed to install the SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install the SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("SIGINT received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}
