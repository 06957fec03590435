#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::sync::Arc;

use args::Args;
use clap::Parser;
use switchboard_config::Config;
use switchboard_llm::Gateway;
use switchboard_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    config.server.listen_address = Some(args.resolve_listen_address(config.server.listen_address()));

    // Initialize logging
    switchboard_telemetry::init(&config.telemetry)?;

    tracing::info!(
        config_path = ?args.config,
        mode = if args.http { "http" } else { "mcp" },
        "starting switchboard"
    );

    let gateway = Arc::new(Gateway::from_config(&config)?);

    // Set up graceful shutdown
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    if args.http {
        let server = Server::new(&config, gateway);
        tracing::info!(listen_address = %server.listen_address(), "starting http server");
        server.serve(shutdown).await?;
    } else {
        switchboard_mcp::serve_stdio(gateway, shutdown).await?;
    }

    tracing::info!("switchboard stopped");
    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
