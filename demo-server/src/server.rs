use axum::Router;
use axum_server::{Handle, tls_rustls::RustlsConfig};
use std::time::Duration;

use crate::config::ServerConfig;

/// Time in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Serves `app` until `handle` is told to shut down.
pub(crate) async fn serve(
    config: &ServerConfig,
    app: Router,
    handle: Handle,
) -> Result<(), Box<dyn std::error::Error>> {
    match &config.tls {
        Some(tls) => {
            let rustls = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
            tracing::info!("HTTPS server listening on {}", config.addr);
            axum_server::bind_rustls(config.addr, rustls)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            tracing::info!("HTTP server listening on {}", config.addr);
            axum_server::bind(config.addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }
    Ok(())
}

/// Waits for SIGINT or SIGTERM, then starts a graceful shutdown on `handle`.
pub(crate) async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
