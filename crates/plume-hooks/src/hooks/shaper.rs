//! Result shaper: turns contributed records into typed values.
//!
//! Each field is either required (the record is rejected when the field is
//! absent, null, of the wrong type, or an empty string) or optional (a
//! missing or mistyped value falls back to the field's default). Rejected
//! records are dropped without error so that one bad contribution never
//! blocks the rest. Unknown fields are ignored.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::definitions::Record;

/// Expected JSON type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON string.
    String,
    /// A JSON boolean.
    Bool,
    /// A JSON integer that fits in an `i32`.
    Integer,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::Integer => value
                .as_i64()
                .is_some_and(|n| i32::try_from(n).is_ok()),
        }
    }
}

/// Rule for a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    /// Field name as it appears in contributed records.
    pub name: String,
    /// Expected type.
    pub kind: FieldKind,
    /// Whether a missing value rejects the record.
    pub required: bool,
    /// Value substituted for a missing optional field. `None` leaves the
    /// field out, which deserializes to `None` for `Option` targets.
    pub default: Option<Value>,
}

/// The full set of rules for one target type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRules {
    rules: Vec<FieldRule>,
}

impl FieldRules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required field.
    pub fn required(mut self, name: &str, kind: FieldKind) -> Self {
        self.rules.push(FieldRule {
            name: name.to_string(),
            kind,
            required: true,
            default: None,
        });
        self
    }

    /// Adds an optional field with no default.
    pub fn optional(mut self, name: &str, kind: FieldKind) -> Self {
        self.rules.push(FieldRule {
            name: name.to_string(),
            kind,
            required: false,
            default: None,
        });
        self
    }

    /// Adds an optional field with a default value.
    pub fn optional_or(mut self, name: &str, kind: FieldKind, default: Value) -> Self {
        self.rules.push(FieldRule {
            name: name.to_string(),
            kind,
            required: false,
            default: Some(default),
        });
        self
    }

    /// Returns the rules in declaration order.
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Validates one record, returning a normalized copy containing exactly
    /// the declared fields, or `None` when a required field is unusable.
    pub fn apply(&self, record: &Record) -> Option<Record> {
        let mut normalized = Record::new();

        for rule in &self.rules {
            let value = record
                .get(&rule.name)
                .filter(|v| rule.kind.accepts(v))
                .filter(|v| !(rule.required && v.as_str() == Some("")));

            match (value, rule.required) {
                (Some(v), _) => {
                    normalized.insert(rule.name.clone(), v.clone());
                }
                (None, true) => return None,
                (None, false) => {
                    if let Some(default) = &rule.default {
                        normalized.insert(rule.name.clone(), default.clone());
                    }
                }
            }
        }

        Some(normalized)
    }
}

/// A type that can be shaped from contributed records.
pub trait Shape: DeserializeOwned {
    /// The rules a record must satisfy to become `Self`.
    fn field_rules() -> FieldRules;
}

/// Shapes records with explicit rules, dropping the ones that fail.
///
/// Output order follows input order.
pub fn shape<T: DeserializeOwned>(records: &[Record], rules: &FieldRules) -> Vec<T> {
    records
        .iter()
        .filter_map(|record| rules.apply(record))
        .filter_map(|normalized| serde_json::from_value(Value::Object(normalized)).ok())
        .collect()
}

/// Shapes records into `T` using its own rules.
pub fn shape_records<T: Shape>(records: &[Record]) -> Vec<T> {
    shape(records, &T::field_rules())
}
