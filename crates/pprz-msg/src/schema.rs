//! ---
//! pprz_section: "02-messaging-data-model"
//! pprz_subsection: "module"
//! pprz_type: "source"
//! pprz_scope: "code"
//! pprz_description: "Schema lookup contract and in-memory registry."
//! pprz_version: "v0.0.0-prealpha"
//! pprz_owner: "tbd"
//! ---
//! Resolution of message metadata by class and name.
//!
//! [`SchemaLookup`] is the contract a [`crate::Message`] consumes while it is
//! constructed. [`SchemaRegistry`] is an in-memory implementation holding
//! already-resolved metadata, either registered in code or read from a TOML
//! or JSON document.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::FieldType;
use crate::{MessageError, Result};

/// Numeric identifier of a message within its class.
pub type MessageId = u32;

/// Source of message metadata keyed by class and message name.
pub trait SchemaLookup {
    /// Resolve the numeric id of `name` within `class_name`.
    fn resolve_id(&self, class_name: &str, name: &str) -> Result<MessageId>;

    /// Ordered field names of `name` within `class_name`.
    fn resolve_field_names(&self, class_name: &str, name: &str) -> Result<Vec<String>>;

    /// Ordered field type tags of the message with `id`, aligned with its field names.
    fn resolve_field_types(&self, class_name: &str, id: MessageId) -> Result<Vec<String>>;

    /// Names of every message declared in `class_name`, in declaration order.
    fn message_names(&self, class_name: &str) -> Result<Vec<String>>;
}

/// Declared field: name plus wire type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name.
    pub name: String,
    /// Field type, written as its tag (`uint8`, `char[]`, `float[]`, ...).
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldSchema {
    /// Build a field declaration from a name and raw type tag.
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::new(tag),
        }
    }
}

/// Resolved metadata for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSchema {
    /// Identifier within the class.
    pub id: MessageId,
    /// Message name within the class.
    pub name: String,
    /// Ordered field declarations.
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryDocument {
    #[serde(default, rename = "class")]
    classes: Vec<ClassDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ClassDocument {
    name: String,
    #[serde(default, rename = "message")]
    messages: Vec<MessageSchema>,
}

#[derive(Debug, Default, Clone)]
struct ClassEntry {
    messages: IndexMap<String, MessageSchema>,
    names_by_id: HashMap<MessageId, String>,
}

/// In-memory [`SchemaLookup`] backed by insertion ordered maps.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    classes: IndexMap<String, ClassEntry>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a message under `class_name`.
    ///
    /// Names and ids must be unique within a class.
    pub fn add_message(&mut self, class_name: &str, schema: MessageSchema) -> Result<()> {
        let entry = self.classes.entry(class_name.to_owned()).or_default();
        if entry.messages.contains_key(&schema.name) {
            return Err(MessageError::SchemaDefinition(format!(
                "duplicate message name {}.{}",
                class_name, schema.name
            )));
        }
        if let Some(existing) = entry.names_by_id.get(&schema.id) {
            return Err(MessageError::SchemaDefinition(format!(
                "message id {} in class {} already used by {}",
                schema.id, class_name, existing
            )));
        }
        entry.names_by_id.insert(schema.id, schema.name.clone());
        entry.messages.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Convenience wrapper around [`SchemaRegistry::add_message`].
    pub fn with_message(
        mut self,
        class_name: &str,
        id: MessageId,
        name: &str,
        fields: &[(&str, &str)],
    ) -> Result<Self> {
        let schema = MessageSchema {
            id,
            name: name.to_owned(),
            fields: fields
                .iter()
                .map(|(field, tag)| FieldSchema::new(*field, *tag))
                .collect(),
        };
        self.add_message(class_name, schema)?;
        Ok(self)
    }

    /// Parse a registry from a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let document: RegistryDocument = toml::from_str(raw)?;
        Self::from_document(document)
    }

    /// Parse a registry from a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let document: RegistryDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    /// Load a registry file; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let registry = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&raw)?,
            _ => Self::from_toml_str(&raw)?,
        };
        debug!(
            path = %path.display(),
            classes = registry.classes.len(),
            "schema registry loaded"
        );
        Ok(registry)
    }

    fn from_document(document: RegistryDocument) -> Result<Self> {
        let mut registry = Self::new();
        for class in document.classes {
            registry.classes.entry(class.name.clone()).or_default();
            for message in class.messages {
                registry.add_message(&class.name, message)?;
            }
        }
        Ok(registry)
    }

    /// Names of all registered classes.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Full metadata for one message, if registered.
    pub fn message(&self, class_name: &str, name: &str) -> Option<&MessageSchema> {
        self.classes.get(class_name)?.messages.get(name)
    }

    fn class(&self, class_name: &str, name: impl Into<String>) -> Result<&ClassEntry> {
        self.classes
            .get(class_name)
            .ok_or_else(|| MessageError::unresolved(class_name, name, "unknown message class"))
    }

    fn schema(&self, class_name: &str, name: &str) -> Result<&MessageSchema> {
        self.class(class_name, name)?
            .messages
            .get(name)
            .ok_or_else(|| MessageError::unresolved(class_name, name, "unknown message name"))
    }
}

impl SchemaLookup for SchemaRegistry {
    fn resolve_id(&self, class_name: &str, name: &str) -> Result<MessageId> {
        Ok(self.schema(class_name, name)?.id)
    }

    fn resolve_field_names(&self, class_name: &str, name: &str) -> Result<Vec<String>> {
        Ok(self
            .schema(class_name, name)?
            .fields
            .iter()
            .map(|field| field.name.clone())
            .collect())
    }

    fn resolve_field_types(&self, class_name: &str, id: MessageId) -> Result<Vec<String>> {
        let class = self.class(class_name, id.to_string())?;
        let name = class.names_by_id.get(&id).ok_or_else(|| {
            MessageError::unresolved(class_name, id.to_string(), "unknown message id")
        })?;
        Ok(self
            .schema(class_name, name)?
            .fields
            .iter()
            .map(|field| field.field_type.tag().to_owned())
            .collect())
    }

    fn message_names(&self, class_name: &str) -> Result<Vec<String>> {
        Ok(self
            .class(class_name, "*")?
            .messages
            .keys()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;

    const REGISTRY_TOML: &str = r#"
[[class]]
name = "telemetry"

[[class.message]]
id = 8
name = "GPS"
fields = [
    { name = "utm_east", type = "int32" },
    { name = "utm_north", type = "int32" },
    { name = "course", type = "uint16" },
    { name = "alt", type = "float" },
]

[[class.message]]
id = 2
name = "ALIVE"
fields = [{ name = "md5sum", type = "uint8[]" }]

[[class]]
name = "datalink"
"#;

    #[test]
    fn toml_document_resolves_in_declaration_order() {
        let registry = SchemaRegistry::from_toml_str(REGISTRY_TOML).expect("parse registry");
        assert_eq!(registry.class_names().collect::<Vec<_>>(), ["telemetry", "datalink"]);
        assert_eq!(registry.resolve_id("telemetry", "GPS").unwrap(), 8);
        assert_eq!(
            registry.resolve_field_names("telemetry", "GPS").unwrap(),
            ["utm_east", "utm_north", "course", "alt"]
        );
        assert_eq!(
            registry.resolve_field_types("telemetry", 2).unwrap(),
            ["uint8[]"]
        );
        assert_eq!(
            registry.message_names("telemetry").unwrap(),
            ["GPS", "ALIVE"]
        );
        assert!(registry.message_names("datalink").unwrap().is_empty());
        let alive = registry.message("telemetry", "ALIVE").unwrap();
        assert_eq!(alive.fields[0].field_type.kind(), FieldKind::NumericArray);
    }

    #[test]
    fn unknown_entries_are_resolution_errors() {
        let registry = SchemaRegistry::from_toml_str(REGISTRY_TOML).unwrap();
        for err in [
            registry.resolve_id("ground", "GPS").unwrap_err(),
            registry.resolve_id("telemetry", "NOPE").unwrap_err(),
            registry.resolve_field_types("telemetry", 99).unwrap_err(),
            registry.message_names("ground").unwrap_err(),
        ] {
            assert!(matches!(err, MessageError::SchemaResolution { .. }), "{err}");
        }
    }

    #[test]
    fn duplicates_are_rejected() {
        let registry = SchemaRegistry::new()
            .with_message("telemetry", 1, "A", &[])
            .unwrap();
        let err = registry
            .clone()
            .with_message("telemetry", 2, "A", &[])
            .unwrap_err();
        assert!(matches!(err, MessageError::SchemaDefinition(_)));
        let err = registry.with_message("telemetry", 1, "B", &[]).unwrap_err();
        assert!(err.to_string().contains("already used by A"));
    }

    #[test]
    fn json_document_matches_toml_shape() {
        let raw = r#"{"class": [{"name": "telemetry", "message": [
            {"id": 3, "name": "WP", "fields": [{"name": "label", "type": "char[]"}]}
        ]}]}"#;
        let registry = SchemaRegistry::from_json_str(raw).unwrap();
        assert_eq!(registry.resolve_field_types("telemetry", 3).unwrap(), ["char[]"]);
    }
}
