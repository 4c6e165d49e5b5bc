//! Backend entry-point: loads settings, initialises logging and serves the contacts API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contacts_backend::inbound::http::health::HealthState;
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = ServerConfig::from_settings(&settings)?;

    #[cfg(feature = "metrics")]
    let config = {
        let prometheus = if settings.metrics_enabled {
            Some(server::build_metrics()?)
        } else {
            None
        };
        config.with_metrics(prometheus)
    };
    #[cfg(not(feature = "metrics"))]
    warn_metrics_unavailable(settings.metrics_enabled);

    info!(
        bind_addr = %config.bind_addr,
        allowed_origins = ?config.allowed_origins,
        max_import_rows = config.max_import_rows,
        "starting contacts backend"
    );

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

#[cfg(not(feature = "metrics"))]
fn warn_metrics_unavailable(requested: bool) {
    if requested {
        warn!("metrics requested but the binary was built without the `metrics` feature");
    }
}
