//! Server settings loaded via OrthoConfig and the resolved server configuration.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

use contacts_backend::inbound::http::state::DEFAULT_MAX_IMPORT_ROWS;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173";

/// Raw settings layered from defaults, configuration files, environment
/// (`CONTACTS_*`) and command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACTS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Comma-separated list of origins allowed by CORS.
    pub allowed_origins: Option<String>,
    /// Maximum number of contacts imported from one workbook.
    pub max_import_rows: Option<usize>,
    /// Expose Prometheus metrics on `/metrics` (requires the `metrics` feature).
    #[ortho_config(default = false)]
    pub metrics_enabled: bool,
}

impl ServerSettings {
    /// Return the configured listen address, falling back to the default.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {err}"),
            )
        })
    }

    /// Return the CORS origins, ignoring blank entries.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .as_deref()
            .unwrap_or(DEFAULT_ALLOWED_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Return the import cap, falling back to the default.
    pub fn max_import_rows(&self) -> usize {
        self.max_import_rows.unwrap_or(DEFAULT_MAX_IMPORT_ROWS)
    }
}

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) allowed_origins: Vec<String>,
    pub(crate) max_import_rows: usize,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Resolve settings into a server configuration.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the bind address does not parse.
    pub fn from_settings(settings: &ServerSettings) -> std::io::Result<Self> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            allowed_origins: settings.allowed_origins(),
            max_import_rows: settings.max_import_rows(),
            #[cfg(feature = "metrics")]
            prometheus: None,
        })
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
