pub mod alternatives;
pub mod config;
pub mod doctor;
pub mod migrate;
pub mod score;

use std::sync::Arc;

use serde::Serialize;

use verdant_core::config::AppConfig;
use verdant_db::repositories::SqlProductRepository;
use verdant_db::DbPool;
use verdant_providers::{
    HttpCarbonProvider, HttpMlProvider, HttpSearchProvider, ScoreService, ScoreServiceBuilder,
};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Wires the scoring service over a live pool, attaching only the providers
/// the configuration enables.
pub(crate) fn build_service(
    config: &AppConfig,
    pool: DbPool,
) -> Result<ScoreService, (&'static str, String, u8)> {
    let repository = Arc::new(SqlProductRepository::new(pool));
    let timeout = config.providers.timeout_secs;
    let mut builder = ScoreServiceBuilder::new(repository);

    if let Some(base_url) = &config.providers.ml_base_url {
        let provider = HttpMlProvider::new(base_url.clone(), timeout)
            .map_err(|error| ("provider_init", error.to_string(), 5u8))?;
        builder = builder.with_ml(Arc::new(provider));
    }

    if let (Some(base_url), Some(api_key)) =
        (&config.providers.carbon_base_url, &config.providers.carbon_api_key)
    {
        let provider = HttpCarbonProvider::new(base_url.clone(), api_key.clone(), timeout)
            .map_err(|error| ("provider_init", error.to_string(), 5u8))?;
        builder = builder.with_carbon(Arc::new(provider));
    }

    if let Some(base_url) = &config.providers.search_base_url {
        let provider = HttpSearchProvider::new(
            base_url.clone(),
            config.providers.search_api_key.clone(),
            timeout,
        )
        .map_err(|error| ("provider_init", error.to_string(), 5u8))?;
        builder = builder.with_search(Arc::new(provider));
    }

    builder.build().map_err(|error| ("service_init", error.to_string(), 5u8))
}
