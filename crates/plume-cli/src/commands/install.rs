//! Installation command.

use std::sync::Arc;

use clap::Args;

use plume_core::config::{AppConfig, DatabaseProvider};
use plume_core::error::AppError;
use plume_database::Persistence;
use plume_install::Installer;

use crate::output::{self, OutputFormat};

/// Arguments for the install command
#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the install command
pub async fn execute(
    args: &InstallArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    if config.database.provider == DatabaseProvider::Postgres && !args.yes {
        let proceed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Install modules [{}] into {}?",
                config.install.modules.join(", "),
                plume_database::connection::mask_password(&config.database.url)
            ))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

        if !proceed {
            output::print_warning("Installation cancelled");
            return Ok(());
        }
    }

    let manager = super::load_modules(config).await?;
    let persistence = Persistence::connect(&config.database).await?;

    let report = Installer::new(Arc::new(manager), persistence).run().await?;

    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            output::print_success(&format!(
                "Installed {} module(s) in {} ms",
                report.modules.len(),
                report.duration_ms
            ));
            output::print_kv("Modules", &report.modules.join(", "));
            output::print_kv("Catalog entries", &report.catalog_entries.to_string());
            output::print_kv("Pages", &report.counts.pages.to_string());
            output::print_kv("Menus", &report.counts.menus.to_string());
            output::print_kv("Menu items", &report.counts.menu_items.to_string());
            output::print_kv("System variables", &report.counts.variables.to_string());
            output::print_kv("Permissions", &report.counts.permissions.to_string());

            if config.database.provider == DatabaseProvider::Memory {
                output::print_warning("Memory store in use; installed content is discarded on exit");
            }
        }
    }

    Ok(())
}
