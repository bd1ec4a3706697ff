pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::alternatives::AlternativesArgs;
use commands::score::ScoreArgs;

#[derive(Debug, Parser)]
#[command(
    name = "verdant",
    about = "Verdant operator CLI",
    long_about = "Score products for sustainability, rank greener alternatives, run migrations, and inspect runtime configuration.",
    after_help = "Examples:\n  verdant score \"Bamboo Toothbrush\" Beauty --description \"compostable handle\"\n  verdant alternatives https://shop.example/p/1 --limit 3\n  verdant doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Score a product from its listing signals and print the full record")]
    Score(ScoreArgs),
    #[command(about = "Rank greener alternatives for a previously scored product URL")]
    Alternatives(AlternativesArgs),
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, provider wiring, and DB connectivity checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Score(args) => commands::score::run(args),
        Command::Alternatives(args) => commands::alternatives::run(args),
        Command::Migrate => commands::migrate::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
