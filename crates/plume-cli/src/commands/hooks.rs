//! Hook listing command.

use serde::Serialize;
use tabled::Tabled;

use plume_core::config::AppConfig;
use plume_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Handlers of one event, in dispatch order
#[derive(Debug, Serialize, Tabled)]
struct HookRow {
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Handlers")]
    count: usize,
    #[tabled(skip)]
    modules: Vec<String>,
    #[tabled(rename = "Modules")]
    #[serde(skip)]
    order: String,
}

/// Execute the hooks command
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let manager = super::load_modules(config).await?;

    let rows: Vec<HookRow> = manager
        .registry()
        .snapshot()
        .await
        .into_iter()
        .map(|(event, modules)| HookRow {
            event,
            count: modules.len(),
            order: modules.join(" → "),
            modules,
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
