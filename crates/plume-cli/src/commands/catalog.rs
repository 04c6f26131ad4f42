//! Catalog inspection command.

use serde::Serialize;
use tabled::Tabled;

use plume_core::config::AppConfig;
use plume_core::error::AppError;
use plume_hooks::HookContext;
use plume_install::{Catalog, CatalogItem};

use crate::output::{self, OutputFormat};

/// One catalog row
#[derive(Debug, Serialize, Tabled)]
struct CatalogRow {
    #[tabled(rename = "Module")]
    module: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Default")]
    value: String,
}

impl From<&CatalogItem> for CatalogRow {
    fn from(item: &CatalogItem) -> Self {
        Self {
            module: item.module_id.clone(),
            key: item.entry.key.clone(),
            name: item.entry.name.clone(),
            value: item
                .entry
                .value
                .as_deref()
                .map(|v| v.lines().next().unwrap_or_default().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Execute the catalog command
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let manager = super::load_modules(config).await?;
    let catalog = Catalog::collect(manager.dispatcher(), &HookContext::new()).await?;

    match format {
        OutputFormat::Json => output::print_json(&catalog.entries()),
        OutputFormat::Table => {
            let rows: Vec<CatalogRow> = catalog.entries().iter().map(CatalogRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
