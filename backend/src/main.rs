//! Backend entry-point: loads settings, prepares the territory store, and
//! serves the REST endpoints.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, build_repository, create_server};
use territory_backend::domain::{SeedOutcome, seed_sample_territories};
use territory_backend::inbound::http::health::HealthState;
use territory_backend::outbound::persistence::{DbPool, run_migrations};
use territory_backend::settings::TerritorySettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings = TerritorySettings::load_from_iter(args)
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err("invalid TERRITORY_BIND_ADDR")?;

    let pool = match settings.pool_config() {
        Some(pool_config) => {
            if settings.run_migrations {
                run_migrations(pool_config.database_url())
                    .await
                    .wrap_err("database migrations failed")?;
            }
            Some(
                DbPool::new(pool_config)
                    .await
                    .wrap_err("failed to build database pool")?,
            )
        }
        None => None,
    };

    let config = ServerConfig::new(bind_addr).with_repository(build_repository(pool));
    if settings.seed_sample_data {
        match seed_sample_territories(config.repository().as_ref())
            .await
            .wrap_err("sample data seeding failed")?
        {
            SeedOutcome::Seeded { inserted } => info!(inserted, "seeded sample territories"),
            SeedOutcome::Skipped { existing } => {
                info!(existing, "store already populated, sample data skipped");
            }
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "territory service listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    info!("territory service stopped");
    outcome.wrap_err("HTTP server failed")
}
