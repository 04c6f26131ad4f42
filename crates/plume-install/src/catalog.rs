//! Declarative catalog of system variables.
//!
//! Every module contributes its entries through the
//! `system-variables-install` event. Assembly happens once, before any
//! module installs, so that a key declared by two modules is reported as a
//! configuration error instead of surfacing halfway through a write.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use plume_core::error::AppError;
use plume_core::result::AppResult;
use plume_entity::system::SystemVariable;
use plume_hooks::{
    FieldKind, FieldRules, HandlerOutput, HookContext, HookDispatcher, Shape, names, shape_records,
};

/// One configuration-entry descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Dot-namespaced key, unique across every module.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Help note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CatalogEntry {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            value: None,
            note: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// The persisted form of this entry.
    pub fn into_variable(self) -> SystemVariable {
        SystemVariable {
            key: self.key,
            name: self.name,
            value: self.value,
            note: self.note,
        }
    }
}

impl Shape for CatalogEntry {
    fn field_rules() -> FieldRules {
        FieldRules::new()
            .required("key", FieldKind::String)
            .required("name", FieldKind::String)
            .optional("value", FieldKind::String)
            .optional("note", FieldKind::String)
    }
}

/// A catalog entry together with the module that declared it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    /// Declaring module.
    pub module_id: String,
    /// The entry itself.
    #[serde(flatten)]
    pub entry: CatalogEntry,
}

/// The assembled, duplicate-free catalog in contribution order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Invokes `system-variables-install` and assembles the result.
    pub async fn collect(dispatcher: &HookDispatcher, ctx: &HookContext) -> AppResult<Self> {
        let outputs = dispatcher
            .invoke_each(names::SYSTEM_VARIABLES_INSTALL, ctx)
            .await?;
        Self::assemble(outputs)
    }

    /// Builds the catalog from per-module handler output.
    ///
    /// Malformed entries are dropped. Entries whose key has no module
    /// namespace are dropped with a warning. A key declared twice is an
    /// error naming both declarers.
    pub fn assemble(outputs: Vec<HandlerOutput>) -> AppResult<Self> {
        let mut items: Vec<CatalogItem> = Vec::new();
        let mut owners: HashMap<String, String> = HashMap::new();

        for HandlerOutput { module_id, output } in outputs {
            let entries: Vec<CatalogEntry> = shape_records(output.as_records());
            let dropped = output.as_records().len() - entries.len();
            if dropped > 0 {
                debug!(module_id = %module_id, dropped = dropped, "Dropped malformed catalog entries");
            }

            for entry in entries {
                if !is_namespaced(&entry.key) {
                    warn!(module_id = %module_id, key = %entry.key, "Catalog key is not namespaced, skipping");
                    continue;
                }

                if let Some(first) = owners.get(&entry.key) {
                    return Err(AppError::configuration(format!(
                        "Catalog key '{}' declared by both '{}' and '{}'",
                        entry.key, first, module_id
                    )));
                }

                owners.insert(entry.key.clone(), module_id.clone());
                items.push(CatalogItem {
                    module_id: module_id.clone(),
                    entry,
                });
            }
        }

        Ok(Self { items })
    }

    /// Entries with their declaring module, in contribution order.
    pub fn entries(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an entry by key.
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.items
            .iter()
            .map(|item| &item.entry)
            .find(|entry| entry.key == key)
    }

    /// Entries declared by one module.
    pub fn for_module<'a>(&'a self, module_id: &'a str) -> impl Iterator<Item = &'a CatalogEntry> {
        self.items
            .iter()
            .filter(move |item| item.module_id == module_id)
            .map(|item| &item.entry)
    }

    /// The catalog as persistable system variables.
    pub fn variables(&self) -> Vec<SystemVariable> {
        self.items
            .iter()
            .map(|item| item.entry.clone().into_variable())
            .collect()
    }
}

/// `module.rest` with at least two non-empty segments.
fn is_namespaced(key: &str) -> bool {
    let mut segments = key.split('.');
    let module = segments.next().unwrap_or_default();
    let rest: Vec<&str> = segments.collect();
    !module.is_empty() && !rest.is_empty() && rest.iter().all(|s| !s.is_empty())
}
