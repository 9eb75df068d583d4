//! ---
//! pprz_section: "02-messaging-data-model"
//! pprz_subsection: "module"
//! pprz_type: "source"
//! pprz_scope: "code"
//! pprz_description: "Message value model and protocol codecs."
//! pprz_version: "v0.0.0-prealpha"
//! pprz_owner: "tbd"
//! ---
use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::schema::{MessageId, SchemaLookup};
use crate::types::{FieldType, FieldValue};
use crate::{MessageError, Result};

/// Mapping key carrying the message name in non payload-only projections.
pub const MSGNAME_KEY: &str = "msgname";
/// Mapping key carrying the message class in non payload-only projections.
pub const MSGCLASS_KEY: &str = "msgclass";

/// A typed, named message described by an external schema.
///
/// Identity and field layout are fixed at construction. Values can only be
/// replaced as a whole through [`Message::set_values`].
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    class_name: String,
    name: String,
    id: MessageId,
    field_names: Vec<String>,
    field_types: Vec<FieldType>,
    field_values: Vec<FieldValue>,
}

impl Message {
    /// Resolve `class_name.name` through `lookup` and default every field by type.
    pub fn new<L>(lookup: &L, class_name: &str, name: &str) -> Result<Self>
    where
        L: SchemaLookup + ?Sized,
    {
        let id = lookup.resolve_id(class_name, name)?;
        let field_names = lookup.resolve_field_names(class_name, name)?;
        let field_types: Vec<FieldType> = lookup
            .resolve_field_types(class_name, id)?
            .into_iter()
            .map(FieldType::new)
            .collect();
        if field_types.len() != field_names.len() {
            return Err(MessageError::unresolved(
                class_name,
                name,
                format!(
                    "schema lists {} field names but {} field types",
                    field_names.len(),
                    field_types.len()
                ),
            ));
        }
        let field_values = field_types.iter().map(FieldType::default_value).collect();
        debug!(
            class = class_name,
            name,
            id,
            fields = field_names.len(),
            "message constructed"
        );
        Ok(Self {
            class_name: class_name.to_owned(),
            name: name.to_owned(),
            id,
            field_names,
            field_types,
            field_values,
        })
    }

    /// Construct a message and immediately replace its values.
    pub fn with_values<L>(
        lookup: &L,
        class_name: &str,
        name: &str,
        values: Vec<FieldValue>,
    ) -> Result<Self>
    where
        L: SchemaLookup + ?Sized,
    {
        let mut message = Self::new(lookup, class_name, name)?;
        message.set_values(values)?;
        Ok(message)
    }

    /// Message name within its class.
    pub fn msg_name(&self) -> &str {
        &self.name
    }

    /// Protocol class the message belongs to.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Identifier resolved from the schema.
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Field names in schema order.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Field types in schema order.
    pub fn field_types(&self) -> &[FieldType] {
        &self.field_types
    }

    /// Current field values in schema order.
    pub fn field_values(&self) -> &[FieldValue] {
        &self.field_values
    }

    /// Value at `index`.
    pub fn field(&self, index: usize) -> Result<&FieldValue> {
        self.field_values
            .get(index)
            .ok_or(MessageError::FieldIndexOutOfRange {
                index,
                len: self.field_values.len(),
            })
    }

    /// Value of the field called `name`.
    pub fn field_by_name(&self, name: &str) -> Result<&FieldValue> {
        self.field_names
            .iter()
            .position(|field| field == name)
            .map(|index| &self.field_values[index])
            .ok_or_else(|| MessageError::UnknownField(name.to_owned()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.field_names.len()
    }

    /// Whether the message declares no fields.
    pub fn is_empty(&self) -> bool {
        self.field_names.is_empty()
    }

    /// Replace all values at once.
    ///
    /// Only the count is validated; on mismatch the current values are kept.
    pub fn set_values(&mut self, values: Vec<FieldValue>) -> Result<()> {
        self.check_count(values.len())?;
        self.field_values = values;
        debug!(class = %self.class_name, name = %self.name, "message values replaced");
        Ok(())
    }

    /// Replace all values after checking both the count and each value's shape.
    pub fn set_values_strict(&mut self, values: Vec<FieldValue>) -> Result<()> {
        self.check_count(values.len())?;
        for (index, (value, field_type)) in values.iter().zip(&self.field_types).enumerate() {
            if !value.matches(field_type.kind()) {
                warn!(
                    class = %self.class_name,
                    name = %self.name,
                    field = %self.field_names[index],
                    "rejected value with wrong shape"
                );
                return Err(MessageError::FieldShapeMismatch {
                    index,
                    field: self.field_names[index].clone(),
                    expected: field_type.kind().describe(),
                });
            }
        }
        self.field_values = values;
        Ok(())
    }

    fn check_count(&self, found: usize) -> Result<()> {
        let expected = self.field_names.len();
        if found == expected {
            return Ok(());
        }
        warn!(
            class = %self.class_name,
            name = %self.name,
            expected,
            found,
            "rejected value update with wrong field count"
        );
        Err(MessageError::FieldCountMismatch { expected, found })
    }

    fn fields(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.field_names.iter().zip(&self.field_values)
    }

    /// Ordered field name to value mapping.
    ///
    /// Unless `payload_only` is set, `msgname` and `msgclass` come first.
    pub fn to_mapping(&self, payload_only: bool) -> IndexMap<String, FieldValue> {
        let mut mapping = IndexMap::with_capacity(self.len() + 2);
        if !payload_only {
            mapping.insert(MSGNAME_KEY.to_owned(), FieldValue::from(self.name.as_str()));
            mapping.insert(
                MSGCLASS_KEY.to_owned(),
                FieldValue::from(self.class_name.as_str()),
            );
        }
        for (field, value) in self.fields() {
            mapping.insert(field.clone(), value.clone());
        }
        mapping
    }

    /// JSON object form of [`Message::to_mapping`].
    ///
    /// Fails when a float field holds NaN or an infinity.
    pub fn to_json(&self, payload_only: bool) -> Result<String> {
        if let Some((field, _)) = self.fields().find(|(_, value)| !value.is_finite()) {
            return Err(MessageError::NonFiniteValue {
                field: field.clone(),
            });
        }
        Ok(serde_json::to_string(&self.to_mapping(payload_only))?)
    }

    /// Space separated bus payload, one token per field.
    ///
    /// Every token is followed by a single space, the last one included.
    pub fn encode_payload(&self) -> String {
        let mut payload = String::new();
        for (value, field_type) in self.field_values.iter().zip(&self.field_types) {
            payload.push_str(&value.to_payload_token(field_type.kind()));
            payload.push(' ');
        }
        payload
    }

    /// [`Message::encode_payload`] without the trailing separator.
    pub fn encode_payload_trimmed(&self) -> String {
        let mut payload = self.encode_payload();
        if payload.ends_with(' ') {
            payload.pop();
        }
        payload
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} {{", self.class_name, self.name)?;
        for (idx, (field, value)) in self.fields().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field} : {value}")?;
        }
        f.write_str("}")
    }
}
