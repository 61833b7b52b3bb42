use tokio::signal;

/// Resolves on the first of Ctrl-C or SIGTERM. A handler that fails to install never
/// fires, leaving the other one in charge.
pub(crate) async fn shutdown_signal() {
    let source = tokio::select! {
        () = interrupt() => "ctrl_c",
        () = terminate() => "sigterm",
    };

    tracing::info!(source, "Shutdown requested, draining in-flight requests");
}

async fn interrupt() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(err) => {
            tracing::error!(error = %err, "SIGTERM handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
