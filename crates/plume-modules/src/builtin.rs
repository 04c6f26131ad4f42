//! Resolves configured module ids to module instances.

use std::sync::Arc;

use plume_core::config::InstallConfig;
use plume_core::error::AppError;
use plume_core::result::AppResult;
use plume_install::Module;

use crate::{BlogModule, FrontendModule, SystemModule, UserModule};

/// Ids of every module shipped with Plume.
pub const BUILTIN_IDS: [&str; 4] = [
    SystemModule::ID,
    UserModule::ID,
    FrontendModule::ID,
    BlogModule::ID,
];

/// Looks up a built-in module by id.
pub fn builtin(id: &str) -> Option<Arc<dyn Module>> {
    match id {
        SystemModule::ID => Some(Arc::new(SystemModule::new())),
        UserModule::ID => Some(Arc::new(UserModule::new())),
        FrontendModule::ID => Some(Arc::new(FrontendModule::new())),
        BlogModule::ID => Some(Arc::new(BlogModule::new())),
        _ => None,
    }
}

/// The configured modules, in configured order.
///
/// Duplicates are passed through; the module manager rejects them.
pub fn from_config(config: &InstallConfig) -> AppResult<Vec<Arc<dyn Module>>> {
    config
        .modules
        .iter()
        .map(|id| {
            builtin(id.trim()).ok_or_else(|| {
                AppError::configuration(format!(
                    "Unknown module '{}' (available: {})",
                    id,
                    BUILTIN_IDS.join(", ")
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::error::ErrorKind;

    #[test]
    fn test_default_config_resolves_in_order() {
        let modules = from_config(&InstallConfig::default()).unwrap();
        let ids: Vec<String> = modules.iter().map(|m| m.info().id).collect();
        assert_eq!(ids, vec!["system", "user", "frontend"]);
    }

    #[test]
    fn test_unknown_module_rejected() {
        let config = InstallConfig {
            modules: vec!["system".into(), "shop".into()],
        };
        let err = from_config(&config).err().unwrap();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.message.contains("'shop'"));
    }
}
