//! Runs the public and admin listeners side by side.
//!
//! Both listeners share one shutdown token: a signal, or either listener
//! failing, stops both. In-flight requests get `SHUTDOWN_TIMEOUT` to drain.

mod error;
mod shutdown;

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::Router;
use meta_server::middleware::SurfaceKind;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub use self::error::{ServerError, ServerResult};
use self::shutdown::shutdown_signal;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// One surface ready to be served.
pub struct Listener {
    pub surface: SurfaceKind,
    pub addr: SocketAddr,
    pub router: Router,
}

/// Binds and serves both listeners until shutdown.
pub async fn serve(
    public: Listener,
    admin: Listener,
    shutdown_timeout: Duration,
) -> ServerResult<()> {
    let start_time = Instant::now();
    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let servers = async {
        tokio::try_join!(
            serve_listener(public, shutdown.clone()),
            serve_listener(admin, shutdown.clone()),
        )
    };

    let drain_deadline = async {
        shutdown.cancelled().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    let result = tokio::select! {
        result = servers => result.map(|_| ()),
        () = drain_deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                timeout_secs = shutdown_timeout.as_secs(),
                "graceful shutdown timed out, dropping in-flight requests"
            );
            Ok(())
        }
    };

    let uptime_secs = start_time.elapsed().as_secs();
    match &result {
        Ok(()) => tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            uptime_secs,
            "shutdown completed"
        ),
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %error,
                uptime_secs,
                "fatal error"
            );

            if let Some(suggestion) = error.suggestion() {
                tracing::info!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    suggestion,
                    "recovery suggestion"
                );
            }
        }
    }

    result
}

/// Binds one listener and serves it until `shutdown` is cancelled.
///
/// Cancels `shutdown` on failure so the other listener stops too.
async fn serve_listener(listener: Listener, shutdown: CancellationToken) -> ServerResult<()> {
    let Listener {
        surface,
        addr,
        router,
    } = listener;

    let tcp_listener = TcpListener::bind(addr).await.map_err(|source| {
        shutdown.cancel();
        ServerError::Bind {
            surface,
            address: addr,
            source,
        }
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        surface = %surface,
        addr = %addr,
        "listening for connections"
    );

    let graceful = shutdown.clone().cancelled_owned();
    axum::serve(
        tcp_listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(graceful)
    .await
    .map_err(|source| {
        shutdown.cancel();
        ServerError::Runtime { surface, source }
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        surface = %surface,
        "listener stopped"
    );

    Ok(())
}
