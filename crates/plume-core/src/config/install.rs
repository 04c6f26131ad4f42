//! Module installation configuration.

use serde::{Deserialize, Serialize};

/// Which modules are loaded, and in what order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Module identifiers in load order.
    ///
    /// The order here is the hook registration order, and therefore the
    /// order in which contributions are collected during installation.
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            modules: default_modules(),
        }
    }
}

fn default_modules() -> Vec<String> {
    vec![
        "system".to_string(),
        "user".to_string(),
        "frontend".to_string(),
    ]
}
