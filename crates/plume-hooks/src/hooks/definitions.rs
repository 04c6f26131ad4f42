//! Hook names, the context bag, and handler output types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use plume_core::result::AppResult;

/// A loosely-typed record contributed by a handler: field name to value.
pub type Record = serde_json::Map<String, Value>;

/// Well-known event names.
///
/// Names follow the `<module>-<subject>-install` convention and must match
/// exactly between the module that registers a handler and the code that
/// invokes the event. Handlers registered under a name nobody invokes are
/// simply never called.
pub mod names {
    /// Contributes items to the frontend `main` menu.
    pub const FRONTEND_MAIN_MENU_INSTALL: &str = "frontend-main-menu-install";
    /// Contributes items to the frontend `footer` menu.
    pub const FRONTEND_FOOTER_MENU_INSTALL: &str = "frontend-footer-menu-install";
    /// Contributes static pages.
    pub const FRONTEND_PAGE_INSTALL: &str = "frontend-page-install";
    /// Contributes system variable declarations.
    pub const SYSTEM_VARIABLES_INSTALL: &str = "system-variables-install";
    /// Contributes permission declarations.
    pub const USER_PERMISSION_INSTALL: &str = "user-permission-install";
}

/// Invocation-specific data handed to every handler.
///
/// Created by the caller for one invocation and passed to handlers by
/// shared reference, so handlers can read but never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookContext {
    /// Unique id of this invocation, for log correlation.
    pub invocation_id: Uuid,
    /// Arbitrary data keyed by string.
    pub data: HashMap<String, Value>,
    /// When the context was created.
    pub timestamp: DateTime<Utc>,
}

impl HookContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            data: HashMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Inserts a value.
    pub fn with_data(mut self, key: &str, value: Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    /// Inserts a string value.
    pub fn with_string(self, key: &str, value: &str) -> Self {
        self.with_data(key, Value::String(value.to_string()))
    }

    /// Inserts a boolean value.
    pub fn with_bool(self, key: &str, value: bool) -> Self {
        self.with_data(key, Value::Bool(value))
    }

    /// Gets a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Gets a string value.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }

    /// Gets a boolean value.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.data.get(key).and_then(|v| v.as_bool())
    }
}

impl Default for HookContext {
    fn default() -> Self {
        Self::new()
    }
}

/// What a single handler produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HookOutput {
    /// Nothing to aggregate (fire-and-forget handlers).
    Unit,
    /// An ordered batch of records.
    Records(Vec<Record>),
}

impl HookOutput {
    /// Wraps an iterator of records.
    pub fn records(records: impl IntoIterator<Item = Record>) -> Self {
        Self::Records(records.into_iter().collect())
    }

    /// Serializes each item into a record.
    ///
    /// Items that do not serialize to a JSON object are an error, since a
    /// handler producing them is broken rather than merely incomplete.
    pub fn from_serializable<T: Serialize>(items: &[T]) -> AppResult<Self> {
        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::to_value(item)? {
                Value::Object(record) => records.push(record),
                other => {
                    return Err(plume_core::AppError::internal(format!(
                        "Hook output must serialize to an object, got {other}"
                    )));
                }
            }
        }
        Ok(Self::Records(records))
    }

    /// Returns the records, or an empty slice for [`HookOutput::Unit`].
    pub fn as_records(&self) -> &[Record] {
        match self {
            Self::Unit => &[],
            Self::Records(records) => records,
        }
    }

    /// Consumes the output into its records.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::Unit => Vec::new(),
            Self::Records(records) => records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_accessors() {
        let ctx = HookContext::new()
            .with_string("module", "frontend")
            .with_bool("fresh", true);

        assert_eq!(ctx.get_string("module"), Some("frontend"));
        assert_eq!(ctx.get_bool("fresh"), Some(true));
        assert_eq!(ctx.get_string("fresh"), None);
        assert!(ctx.get("missing").is_none());
    }

    #[test]
    fn test_from_serializable() {
        #[derive(Serialize)]
        struct Entry {
            key: &'static str,
        }

        let output = HookOutput::from_serializable(&[Entry { key: "a.b.c" }]).unwrap();
        assert_eq!(output.as_records().len(), 1);
        assert_eq!(output.as_records()[0]["key"], json!("a.b.c"));
    }

    #[test]
    fn test_from_serializable_rejects_scalars() {
        assert!(HookOutput::from_serializable(&["just a string"]).is_err());
    }

    #[test]
    fn test_unit_has_no_records() {
        assert!(HookOutput::Unit.as_records().is_empty());
        assert!(HookOutput::Unit.into_records().is_empty());
    }
}
