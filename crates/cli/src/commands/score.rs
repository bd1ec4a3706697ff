use clap::Args;

use crate::commands::{build_service, CommandResult};
use verdant_core::config::{AppConfig, LoadOptions};
use verdant_core::ProductSignal;
use verdant_db::{connect_with_settings, migrations};

#[derive(Debug, Args)]
pub struct ScoreArgs {
    #[arg(help = "Product name as shown on the listing")]
    pub name: String,
    #[arg(help = "Product category, e.g. Clothing or Electronics")]
    pub category: String,
    #[arg(long, help = "Listing description text")]
    pub description: Option<String>,
    #[arg(long, help = "Feature bullet, repeatable")]
    pub bullet: Vec<String>,
    #[arg(long, help = "Brand name")]
    pub brand: Option<String>,
    #[arg(long, help = "Listing price")]
    pub price: Option<f64>,
    #[arg(long, help = "Canonical product URL; scored records are cached per URL")]
    pub url: Option<String>,
    #[arg(long = "energy-kwh", help = "Annual energy consumption in kWh")]
    pub energy_kwh: Option<f64>,
    #[arg(long = "weight-kg", help = "Shipping weight in kilograms")]
    pub weight_kg: Option<f64>,
}

impl ScoreArgs {
    fn into_signal(self) -> ProductSignal {
        let mut signal = ProductSignal::new(self.name, self.category);
        signal.description = self.description;
        signal.feature_bullets = self.bullet;
        signal.brand = self.brand;
        signal.price = self.price;
        signal.url = self.url;
        signal.energy_consumption_kwh = self.energy_kwh;
        signal.weight_kg = self.weight_kg;
        signal
    }
}

pub fn run(args: ScoreArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "score",
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
                "score",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let signal = args.into_signal();
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
        let record =
            service.score_product(&signal).await.map_err(|error| match &error {
                verdant_core::ApplicationError::Domain(_) => {
                    ("invalid_signal", error.to_string(), 2u8)
                }
                _ => ("scoring", error.to_string(), 6u8),
            })?;
        pool.close().await;

        serde_json::to_string_pretty(&record)
            .map_err(|error| ("serialization", error.to_string(), 6u8))
    });

    match result {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("score", error_class, message, exit_code)
        }
    }
}
