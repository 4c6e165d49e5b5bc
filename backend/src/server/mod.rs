//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web::middleware::Condition;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

use contacts_backend::Trace;
#[cfg(debug_assertions)]
use contacts_backend::doc::ApiDoc;
use contacts_backend::domain::ContactService;
use contacts_backend::inbound::http::configure_contacts;
use contacts_backend::inbound::http::health::{HealthState, live, ready};
use contacts_backend::inbound::http::state::HttpState;
use contacts_backend::outbound::memory::InMemoryContactRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const CORS_MAX_AGE_SECS: usize = 3600;

/// Build the HTTP state over a fresh in-memory store.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let repository = Arc::new(InMemoryContactRepository::new());
    let service = Arc::new(ContactService::new(repository));
    HttpState::new(service.clone(), service).with_max_import_rows(config.max_import_rows)
}

/// CORS policy for the browser front-end.
fn build_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .max_age(CORS_MAX_AGE_SECS)
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    allowed_origins: Arc<[String]>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        allowed_origins,
    } = deps;

    let api = web::scope("/api/v1").configure(configure_contacts);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(build_cors(&allowed_origins))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Build the Prometheus middleware serving `/metrics`.
///
/// # Errors
/// Returns [`std::io::Error`] when the metrics registry rejects a collector.
#[cfg(feature = "metrics")]
pub fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("contacts")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: resolved [`ServerConfig`] with binding, CORS and optional metrics settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        bind_addr,
        allowed_origins,
        max_import_rows: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let allowed_origins: Arc<[String]> = allowed_origins.into();
    #[cfg(feature = "metrics")]
    let (metrics_enabled, metrics) = match prometheus {
        Some(metrics) => (true, metrics),
        None => (false, build_metrics()?),
    };

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            allowed_origins: allowed_origins.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(Condition::new(metrics_enabled, metrics.clone()));

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
