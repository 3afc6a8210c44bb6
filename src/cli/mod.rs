pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "kids-api")]
#[command(about = "Kids API - REST backend for childcare program records")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    /// Runs the server when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Apply database migrations and exit")]
    Migrate,

    #[command(about = "Check the /health endpoint of a running server")]
    Health(commands::health::HealthArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::Migrate) => commands::migrate::handle(config, output_format).await,
        Some(Commands::Health(args)) => commands::health::handle(args, config, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::parse_from(["kids-api"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_subcommands_and_global_flags() {
        let cli = Cli::parse_from(["kids-api", "serve", "--port", "9090"]);
        match cli.command {
            Some(Commands::Serve(args)) => assert_eq!(args.port, Some(9090)),
            _ => panic!("expected serve"),
        }

        let cli = Cli::parse_from(["kids-api", "health", "--url", "http://localhost:1", "--json"]);
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Some(Commands::Health(args)) => assert_eq!(args.url.as_deref(), Some("http://localhost:1")),
            _ => panic!("expected health"),
        }
    }
}
