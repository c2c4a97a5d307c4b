//! Student records entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use std::io;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(pool) = connect_database(&settings).await? {
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(make_metrics());
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "student records server listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}

/// Build the pool and apply migrations when a database URL is configured.
async fn connect_database(settings: &AppSettings) -> io::Result<Option<DbPool>> {
    let Some(database_url) = settings.database_url() else {
        return Ok(None);
    };

    let pool_config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size());
    info!(url = %pool_config.redacted_url(), max_size = pool_config.max_size(), "connecting to postgres");

    if settings.skip_migrations {
        info!("skipping database migrations");
    } else {
        run_pending_migrations(database_url)
            .await
            .map_err(io::Error::other)?;
    }

    let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
    Ok(Some(pool))
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Option<PrometheusMetrics> {
    match PrometheusMetricsBuilder::new("students")
        .endpoint("/metrics")
        .build()
    {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            warn!(error = %e, "prometheus metrics disabled");
            None
        }
    }
}
