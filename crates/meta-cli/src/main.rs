#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use meta_server::handler::surface_router;
use meta_server::middleware::SurfaceKind;
use meta_server::service::ServiceState;

use crate::config::Cli;
use crate::server::Listener;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "meta_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "meta_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "meta_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting meta server"
    );

    cli.log();
    cli.validate()?;

    let service_config = cli.service_config()?;
    let state = ServiceState::from_config(&service_config)
        .await
        .context("failed to create service state")?;

    let public_profile = cli.public.profile(&cli.server);
    let public = Listener {
        surface: SurfaceKind::Public,
        addr: cli.public.server_addr(),
        router: surface_router(&public_profile, state.clone())
            .context("failed to build the public surface")?,
    };

    let admin_profile = cli.admin.profile(&cli.server);
    let admin = Listener {
        surface: SurfaceKind::Admin,
        addr: cli.admin.server_addr(),
        router: surface_router(&admin_profile, state)
            .context("failed to build the admin surface")?,
    };

    server::serve(public, admin, cli.server.shutdown_timeout()).await?;
    Ok(())
}
