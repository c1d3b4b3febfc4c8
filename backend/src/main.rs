//! Service entry-point: reads settings, prepares the store, and serves HTTP.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use form_intake::inbound::http::health::HealthState;
use form_intake::outbound::persistence::{DbPool, MigrationError, run_pending_migrations};
use form_intake::settings::{ServiceSettings, StartupConfigError};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let (settings, pool) = match prepare_store().await {
        Ok(prepared) => prepared,
        Err(err) => {
            error!(error = %err, "startup failed");
            return Err(std::io::Error::other(err.to_string()));
        }
    };

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(settings.bind_addr).with_db_pool(pool);
    let server = create_server(health_state, config)?;
    server.await
}

/// Validate settings, build the pool, and apply migrations, in that order.
async fn prepare_store() -> Result<(ServiceSettings, DbPool), StartupConfigError> {
    let settings = ServiceSettings::from_env(&DefaultEnv::new())?;
    let pool = DbPool::new(settings.store.pool_config()).await?;

    let database_url = Zeroizing::new(settings.store.database_url().to_owned());
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })??;
    info!(applied, "store ready");

    Ok((settings, pool))
}
