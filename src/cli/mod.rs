//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for GenoSentinel using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// GenoSentinel - genomics catalog service
#[derive(Parser, Debug)]
#[command(name = "genosentinel")]
#[command(version, about, long_about = None)]
#[command(author = "GenoSentinel Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "genosentinel.toml",
        env = "GENOSENTINEL_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GENOSENTINEL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve(commands::serve::ServeArgs),

    /// Apply the database schema
    Migrate(commands::migrate::MigrateArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["genosentinel", "serve"]);
        assert_eq!(cli.config, "genosentinel.toml");
        assert!(matches!(cli.command, Commands::Serve(_)));
    }

    #[test]
    fn test_cli_parse_serve_with_migrate() {
        let cli = Cli::parse_from(["genosentinel", "serve", "--migrate"]);
        match cli.command {
            Commands::Serve(args) => assert!(args.migrate),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["genosentinel", "--config", "custom.toml", "migrate"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Migrate(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["genosentinel", "--log-level", "debug", "serve"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["genosentinel", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["genosentinel", "init", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert!(args.force);
                assert_eq!(args.output, "genosentinel.toml");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
