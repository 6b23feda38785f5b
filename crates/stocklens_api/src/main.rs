//! `stocklens` server entry point.
//!
//! Startup order: config, logging, store, seed, serve.

use log::{info, warn};
use std::error::Error;
use stocklens_api::{router, AppState, ServerConfig};
use stocklens_core::{core_version, init_logging, seed_if_empty};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;
    init_logging(&config.log_level, config.log_dir.as_deref())?;
    info!(
        "event=server_start module=main status=start version={} bind_addr={} db={:?}",
        core_version(),
        config.bind_addr,
        config.db
    );

    let mut conn = config.db.open()?;
    if config.seed_on_start {
        seed_if_empty(&mut conn)?;
    } else {
        warn!("event=seed module=main status=disabled");
    }

    let app = router(AppState::new(conn));
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        "event=server_start module=main status=ok local_addr={}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=main status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_stop module=main status=error error={err}");
    }
}
