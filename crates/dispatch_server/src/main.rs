//! Ride dispatch server: JSON API over the in-memory dispatcher.

use clap::Parser;
use dispatch_core::Dispatcher;
use dispatch_server::config::ServerArgs;
use dispatch_server::state::AppState;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dispatch_server=info".parse()?)
                .add_directive("dispatch_core=info".parse()?),
        )
        .init();

    let args = ServerArgs::parse();
    let addr = args.socket_addr()?;

    let dispatcher = Dispatcher::new(args.dispatch_config(), args.matching.into());
    info!(algorithm = dispatcher.algorithm_name(), "starting dispatch server");

    let app = dispatch_server::app(AppState::new(dispatcher), args.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
