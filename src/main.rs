use catch_log::{AppState, Config, HttpBackend, router};
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let backend = HttpBackend::new(&config.backend_url, config.backend_timeout)?;
    info!("using catch backend at {}", backend.base_url());

    let state = AppState::new(Arc::new(backend));
    if state.refresh(false).await.is_err() {
        warn!("starting with an empty catch list");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
