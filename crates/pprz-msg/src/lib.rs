//! ---
//! pprz_section: "02-messaging-data-model"
//! pprz_subsection: "module"
//! pprz_type: "source"
//! pprz_scope: "code"
//! pprz_description: "Message value model and protocol codecs."
//! pprz_version: "v0.0.0-prealpha"
//! pprz_owner: "tbd"
//! ---
//! Schema-described messages for the pprz ground-control protocol.
//!
//! A [`Message`] is built from metadata resolved through a [`SchemaLookup`]
//! (message id, ordered field names, field type tags). It owns one value per
//! field and renders them as a display string, an ordered mapping, JSON, or
//! the space-delimited payload used on the publish/subscribe text bus.
#![warn(missing_docs)]

pub mod logging;
pub mod message;
pub mod schema;
pub mod types;

/// Shared result type for message operations.
pub type Result<T> = std::result::Result<T, MessageError>;

/// Failures surfaced by schema resolution and message value handling.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The class/name (or class/id) pair is unknown to the schema lookup.
    #[error("unable to resolve message {class_name}.{name}: {reason}")]
    SchemaResolution {
        /// Message class that was queried.
        class_name: String,
        /// Message name (or id rendered as text) that was queried.
        name: String,
        /// Short description of what was missing.
        reason: String,
    },
    /// Schema metadata handed to the registry is inconsistent.
    #[error("invalid schema definition: {0}")]
    SchemaDefinition(String),
    /// A value update did not supply exactly one value per field.
    #[error("fields not matching: expected {expected} values, found {found}")]
    FieldCountMismatch {
        /// Number of fields declared by the schema.
        expected: usize,
        /// Number of values supplied by the caller.
        found: usize,
    },
    /// Positional access outside `[0, len)`.
    #[error("field index {index} out of range for message with {len} fields")]
    FieldIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of fields in the message.
        len: usize,
    },
    /// Lookup of a field name that the message does not declare.
    #[error("message has no field named '{0}'")]
    UnknownField(String),
    /// Strict update supplied a value whose shape contradicts the field type.
    #[error("field {index} ('{field}') expects a {expected} value")]
    FieldShapeMismatch {
        /// Position of the offending value.
        index: usize,
        /// Name of the offending field.
        field: String,
        /// Human readable description of the expected shape.
        expected: &'static str,
    },
    /// A float field holds NaN or an infinity, which JSON cannot carry.
    #[error("field '{field}' holds a non-finite value")]
    NonFiniteValue {
        /// Name of the offending field.
        field: String,
    },
    /// Wrapper for JSON serialization or deserialization problems.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Wrapper for TOML schema documents that fail to parse.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Wrapper for IO errors encountered while reading schema files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl MessageError {
    pub(crate) fn unresolved(
        class_name: &str,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MessageError::SchemaResolution {
            class_name: class_name.to_owned(),
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub use logging::{log_message, MessageDirection};
pub use message::{Message, MSGCLASS_KEY, MSGNAME_KEY};
pub use schema::{FieldSchema, MessageId, MessageSchema, SchemaLookup, SchemaRegistry};
pub use types::{FieldKind, FieldType, FieldValue, Number};
