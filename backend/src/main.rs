//! Box office entry point: loads settings, prepares persistence, and serves
//! the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use box_office::domain::ports::{CheckoutMetrics, NoOpCheckoutMetrics};
use box_office::inbound::http::health::HealthState;
use box_office::inbound::http::state::HttpState;
use box_office::outbound::persistence::{DbPool, run_pending_migrations};
use box_office::settings::BoxOfficeSettings;
use server::{ServerConfig, build_database_state, build_fixture_state, create_server};

#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
#[cfg(feature = "metrics")]
use box_office::outbound::metrics::PrometheusCheckoutMetrics;

#[cfg(feature = "metrics")]
fn initialize_metrics<E, F>(make: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    make()
        .inspect_err(|error| warn!(%error, "Prometheus metrics disabled"))
        .ok()
}

async fn build_state<M>(settings: &BoxOfficeSettings, metrics: Arc<M>) -> Result<HttpState>
where
    M: CheckoutMetrics + 'static,
{
    if settings.fixture_mode {
        warn!("fixture mode: data lives in memory and is lost on exit");
        return build_fixture_state(settings, metrics);
    }

    let database_url = settings
        .database_url
        .as_deref()
        .ok_or_else(|| eyre!("BOX_OFFICE_DATABASE_URL must be set unless fixture mode is on"))?;

    if settings.skip_migrations {
        info!("skipping schema migrations");
    } else {
        run_pending_migrations(database_url)
            .await
            .wrap_err("failed to apply schema migrations")?;
    }

    let pool = DbPool::new(settings.pool_config(database_url))
        .await
        .wrap_err("failed to build database pool")?;

    build_database_state(settings, &pool, metrics)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = BoxOfficeSettings::load().wrap_err("failed to load configuration")?;

    #[cfg(feature = "metrics")]
    let prometheus = initialize_metrics(|| {
        PrometheusMetricsBuilder::new("box_office")
            .endpoint("/metrics")
            .build()
    });

    #[cfg(feature = "metrics")]
    let http_state = match prometheus.as_ref() {
        Some(prometheus) => {
            let metrics = PrometheusCheckoutMetrics::new(&prometheus.registry)
                .wrap_err("failed to register checkout metrics")?;
            build_state(&settings, Arc::new(metrics)).await?
        }
        None => build_state(&settings, Arc::new(NoOpCheckoutMetrics)).await?,
    };
    #[cfg(not(feature = "metrics"))]
    let http_state = build_state(&settings, Arc::new(NoOpCheckoutMetrics)).await?;

    let bind_addr = settings.bind_address();
    let config = ServerConfig::new(bind_addr.clone(), http_state);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(prometheus);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {}:{}", bind_addr.0, bind_addr.1))?;
    info!(host = %bind_addr.0, port = bind_addr.1, "box office listening");
    server.await.wrap_err("server terminated with an error")
}
