//! CLI command definitions and dispatch.

pub mod catalog;
pub mod config;
pub mod hooks;
pub mod install;

use clap::{Parser, Subcommand};

use plume_core::config::AppConfig;
use plume_core::error::AppError;
use plume_install::ModuleManager;

use crate::output::OutputFormat;

/// Plume: modular content platform
#[derive(Debug, Parser)]
#[command(name = "plume", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to apply on top of config/default.toml
    #[arg(short = 'e', long, default_value = "development")]
    pub config_env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install the configured modules
    Install(install::InstallArgs),
    /// Show the assembled system variable catalog
    Catalog,
    /// List registered hook handlers per event
    Hooks,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Install(args) => install::execute(args, &config, self.format).await,
            Commands::Catalog => catalog::execute(&config, self.format).await,
            Commands::Hooks => hooks::execute(&config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, &self.config_env, self.format),
        }
    }
}

/// Helper: resolve configured modules and register their hooks
pub async fn load_modules(config: &AppConfig) -> Result<ModuleManager, AppError> {
    let modules = plume_modules::from_config(&config.install)?;
    ModuleManager::load_all(modules).await
}
