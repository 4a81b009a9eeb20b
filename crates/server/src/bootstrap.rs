use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use weatherwear_core::config::{AppConfig, ConfigError, LoadOptions};
use weatherwear_db::{connect_with_settings, migrations, DbPool};
use weatherwear_weather::{ForecastProvider, WeatherApiClient, WeatherClientError};

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub forecasts: Arc<dyn ForecastProvider>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error(transparent)]
    WeatherClient(#[from] WeatherClientError),
}

#[cfg(test)]
pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let forecasts: Arc<dyn ForecastProvider> =
        Arc::new(WeatherApiClient::from_config(&config.weather)?);
    info!(
        event_name = "system.bootstrap.weather_client_ready",
        correlation_id = "bootstrap",
        base_url = %config.weather.base_url,
        timeout_secs = config.weather.timeout_secs,
        "forecast client configured"
    );

    Ok(Application { config, db_pool, forecasts })
}
