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

use serde::{Deserialize, Serialize};

/// Type tag used by the schema for variable length character arrays.
pub const CHAR_STRING_TAG: &str = "char[]";

/// Marker that flags a type tag as an array of scalars.
pub const ARRAY_MARKER: char = '[';

/// Value shape category of a field, resolved once from its schema tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Single integer or floating point value.
    Scalar,
    /// Character array carried as text.
    CharString,
    /// Array of integer or floating point values.
    NumericArray,
}

impl FieldKind {
    /// Classify a raw schema type tag such as `uint16`, `char[]` or `int8[]`.
    pub fn from_tag(tag: &str) -> Self {
        if tag == CHAR_STRING_TAG {
            FieldKind::CharString
        } else if tag.contains(ARRAY_MARKER) {
            FieldKind::NumericArray
        } else {
            FieldKind::Scalar
        }
    }

    /// Short description of the value shape expected by this kind.
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Scalar => "scalar",
            FieldKind::CharString => "string",
            FieldKind::NumericArray => "numeric array",
        }
    }
}

/// Schema declared field type: the raw tag together with its resolved kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldType {
    tag: String,
    kind: FieldKind,
}

impl FieldType {
    /// Resolve a field type from its schema tag.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let kind = FieldKind::from_tag(&tag);
        Self { tag, kind }
    }

    /// Raw tag as declared by the schema.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Resolved value shape.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Value a freshly constructed message holds for a field of this type.
    pub fn default_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::CharString => FieldValue::Text(String::new()),
            FieldKind::NumericArray => FieldValue::Array(vec![Number::Int(0)]),
            FieldKind::Scalar => FieldValue::Number(Number::Int(0)),
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        FieldType::new(tag)
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        FieldType::new(tag)
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.tag
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

/// Numeric element of a scalar or array field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Integer value of any signed or unsigned wire width up to 63 bits.
    Int(i64),
    /// Floating point value.
    Float(f64),
}

impl Number {
    /// False for NaN and infinities.
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(value) => value.is_finite(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{value}"),
            // Integral floats keep a fractional digit so they stay distinguishable
            // from integers on the text bus.
            Number::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Number::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Current value of one message field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Scalar numeric value.
    Number(Number),
    /// Array of numeric values.
    Array(Vec<Number>),
    /// Character string value.
    Text(String),
}

impl FieldValue {
    /// Whether every numeric element is finite; text is always finite.
    pub fn is_finite(&self) -> bool {
        match self {
            FieldValue::Number(number) => number.is_finite(),
            FieldValue::Array(items) => items.iter().all(Number::is_finite),
            FieldValue::Text(_) => true,
        }
    }

    /// Whether the value has the shape declared by `kind`.
    pub fn matches(&self, kind: FieldKind) -> bool {
        matches!(
            (kind, self),
            (FieldKind::Scalar, FieldValue::Number(_))
                | (FieldKind::NumericArray, FieldValue::Array(_))
                | (FieldKind::CharString, FieldValue::Text(_))
        )
    }

    /// Render the value as one token of the space separated bus payload.
    ///
    /// Strings are wrapped in double quotes without escaping, arrays are
    /// comma joined without brackets and scalars are written as-is.
    pub fn to_payload_token(&self, kind: FieldKind) -> String {
        match (kind, self) {
            (FieldKind::CharString, value) => format!("\"{value}\""),
            (FieldKind::NumericArray, FieldValue::Array(items)) => items
                .iter()
                .map(Number::to_string)
                .collect::<Vec<_>>()
                .join(","),
            (_, value) => value.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(number) => fmt::Display::fmt(number, f),
            FieldValue::Array(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

macro_rules! int_conversions {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Int(i64::from(value))
                }
            }

            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Number(Number::from(value))
                }
            }
        )*
    };
}

int_conversions!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(f64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Number(Number::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(Number::Float(value))
    }
}

impl From<Number> for FieldValue {
    fn from(value: Number) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<Number>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::Array(values.into_iter().map(Into::into).collect())
    }
}
