use clap::Args;

use crate::commands::{build_service, CommandResult};
use verdant_core::config::{AppConfig, LoadOptions};
use verdant_db::{connect_with_settings, migrations};

#[derive(Debug, Args)]
pub struct AlternativesArgs {
    #[arg(help = "URL of a previously scored product")]
    pub url: String,
    #[arg(long, default_value_t = 5, help = "Maximum number of alternatives to return")]
    pub limit: usize,
}

pub fn run(args: AlternativesArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "alternatives",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "alternatives",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let service = build_service(&config, pool.clone())?;
        let ranked = service
            .rank_alternatives(&args.url, args.limit.max(1))
            .await
            .map_err(|error| ("ranking", error.to_string(), 6u8))?;
        pool.close().await;

        let alternatives = ranked.ok_or_else(|| {
            (
                "not_found",
                format!("no scored record exists for `{}`; run `verdant score` first", args.url),
                7u8,
            )
        })?;

        serde_json::to_string_pretty(&alternatives)
            .map_err(|error| ("serialization", error.to_string(), 6u8))
    });

    match result {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("alternatives", error_class, message, exit_code)
        }
    }
}
