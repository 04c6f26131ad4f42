//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use plume_core::config::AppConfig;
use plume_core::error::AppError;
use plume_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Check that every configured module exists and is listed once
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.database.url = mask_password(&shown.database.url);
            match format {
                OutputFormat::Json => output::print_json(&shown),
                OutputFormat::Table => {
                    output::print_kv("Environment", env);
                    print_summary(&shown);
                }
            }
        }
        ConfigCommand::Validate => match validate(config) {
            Ok(()) => {
                output::print_success(&format!("Configuration '{}' is valid", env));
                print_summary(config);
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}

fn validate(config: &AppConfig) -> Result<(), AppError> {
    let modules = plume_modules::from_config(&config.install)?;

    let mut seen = std::collections::HashSet::new();
    for module in &modules {
        let id = module.info().id;
        if !seen.insert(id.clone()) {
            return Err(AppError::configuration(format!(
                "Module '{}' is listed more than once",
                id
            )));
        }
    }

    if config.database.provider == plume_core::config::DatabaseProvider::Postgres
        && config.database.url.is_empty()
    {
        return Err(AppError::configuration(
            "database.url is required for the postgres provider",
        ));
    }

    Ok(())
}

fn print_summary(config: &AppConfig) {
    output::print_kv("Database", &config.database.provider.to_string());
    if !config.database.url.is_empty() {
        output::print_kv("Database URL", &mask_password(&config.database.url));
    }
    output::print_kv("Log level", &config.logging.level);
    output::print_kv("Log format", &config.logging.format);
    output::print_kv("Modules", &config.install.modules.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::error::ErrorKind;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_duplicate_module_is_invalid() {
        let config = AppConfig::from_toml(
            r#"
            [install]
            modules = ["system", "frontend", "system"]
            "#,
        )
        .unwrap();
        let err = validate(&config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_postgres_without_url_is_invalid() {
        let config = AppConfig::from_toml(
            r#"
            [database]
            provider = "postgres"
            "#,
        )
        .unwrap();
        assert!(validate(&config).is_err());
    }
}
