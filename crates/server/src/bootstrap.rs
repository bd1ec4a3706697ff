use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use verdant_core::config::{AppConfig, ConfigError, LoadOptions};
use verdant_core::errors::ApplicationError;
use verdant_db::repositories::SqlProductRepository;
use verdant_db::{connect_with_settings, migrations, DbPool};
use verdant_providers::{
    HttpCarbonProvider, HttpMlProvider, HttpSearchProvider, ProviderError, ScoreService,
    ScoreServiceBuilder,
};

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub service: Arc<ScoreService>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error("provider client construction failed: {0}")]
    Provider(#[source] ProviderError),
    #[error("score service construction failed: {0}")]
    Service(#[source] ApplicationError),
}

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

    let service = Arc::new(build_service(&config, db_pool.clone())?);

    Ok(Application { config, db_pool, service })
}

fn build_service(config: &AppConfig, db_pool: DbPool) -> Result<ScoreService, BootstrapError> {
    let repository = Arc::new(SqlProductRepository::new(db_pool));
    let timeout = config.providers.timeout_secs;
    let mut builder = ScoreServiceBuilder::new(repository);

    if let Some(base_url) = &config.providers.ml_base_url {
        let provider =
            HttpMlProvider::new(base_url.clone(), timeout).map_err(BootstrapError::Provider)?;
        builder = builder.with_ml(Arc::new(provider));
    }

    if let (Some(base_url), Some(api_key)) =
        (&config.providers.carbon_base_url, &config.providers.carbon_api_key)
    {
        let provider = HttpCarbonProvider::new(base_url.clone(), api_key.clone(), timeout)
            .map_err(BootstrapError::Provider)?;
        builder = builder.with_carbon(Arc::new(provider));
    }

    if let Some(base_url) = &config.providers.search_base_url {
        let provider = HttpSearchProvider::new(
            base_url.clone(),
            config.providers.search_api_key.clone(),
            timeout,
        )
        .map_err(BootstrapError::Provider)?;
        builder = builder.with_search(Arc::new(provider));
    }

    builder.build().map_err(BootstrapError::Service)
}

#[cfg(test)]
mod tests {
    use verdant_core::config::{ConfigOverrides, LoadOptions};

    use crate::bootstrap::bootstrap;

    fn in_memory_options(database_url: &str) -> LoadOptions {
        LoadOptions {
            overrides: ConfigOverrides {
                database_url: Some(database_url.to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[tokio::test]
    async fn bootstrap_applies_migrations_and_builds_the_service() {
        let app = bootstrap(in_memory_options("sqlite::memory:?cache=shared"))
            .await
            .expect("bootstrap should succeed with in-memory database");

        let (table_count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'products'",
        )
        .fetch_one(&app.db_pool)
        .await
        .expect("expected products table after bootstrap");
        assert_eq!(table_count, 1);

        app.db_pool.close().await;
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_on_invalid_database_url() {
        let result = bootstrap(in_memory_options("postgres://nope")).await;

        assert!(result.is_err());
        let message = result.err().expect("error").to_string();
        assert!(message.contains("database.url"));
    }
}
