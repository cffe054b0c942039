//! Interrupt handling.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Cancel `token` on the first Ctrl+C (or SIGTERM on Unix).
///
/// The handler runs as a background task and fires once; the process keeps
/// running so callers can unwind and exit cleanly.
pub fn install_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = wait_for_interrupt() => {
                info!("Received interrupt signal");
                token.cancel();
            }
            _ = token.cancelled() => {
                debug!("Cancelled elsewhere, interrupt handler exiting");
            }
        }
    });
}

#[cfg(unix)]
async fn wait_for_interrupt() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => Some(stream),
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {}", e);
            None
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
        _ = async {
            match terminate.as_mut() {
                Some(stream) => { stream.recv().await; }
                None => std::future::pending::<()>().await,
            }
        } => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
