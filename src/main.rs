use clap::Parser; // for cli
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_service::app;
use todo_service::config::{Args, ServiceConfig};
use todo_service::rate_limit::sweeper;
use todo_service::state::AppState;

// this is main async function with tokio
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // parse cli arguments
    let args = Args::parse();
    let config = ServiceConfig::from(&args);

    tracing::info!(
        mode = ?config.mode,
        allowed_origins = ?config.allowed_origins,
        rate_limit = config.rate_limit,
        rate_window_secs = config.rate_window.as_secs(),
        body_limit = config.body_limit,
        "Configuration loaded"
    );

    // creating shared state
    let state = Arc::new(AppState::new(config));

    // spawn the background sweeper
    tokio::spawn(sweeper(state.clone(), args.sweep_interval()));

    let listener = TcpListener::bind(args.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Todo service listening");

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
