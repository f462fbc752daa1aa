//! Decoded messages and their values.

use alloc::{collections::BTreeMap, string::String};
use core::{fmt, ops::Index};

use chrono::{DateTime, Utc};

use crate::sans::{field::Integers, frame::TypeId};

/// A decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    /// A run of raw integers of one width.
    Integers(Integers),
    Float(f64),
    /// Decimal degrees. NaN when the sensor has no fix.
    Angle(f64),
    Timestamp(DateTime<Utc>),
    Text(&'static str),
    /// Raw bytes as lowercase hex.
    Hex(String),
}

impl Value {
    /// The value as a float, for numeric variants.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) | Self::Angle(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as text, for textual variants.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Hex(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Timestamp(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Integers(v) => write!(f, "{v}"),
            Self::Float(v) | Self::Angle(v) => write!(f, "{v}"),
            Self::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%dT%H:%M:%S")),
            Self::Text(s) => f.write_str(s),
            Self::Hex(s) => f.write_str(s),
        }
    }
}

/// The fields decoded from one frame.
///
/// Field names are unique; a layout repeating a name keeps the last value.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    type_id: TypeId,
    fields: BTreeMap<&'static str, Value>,
}

impl DecodedMessage {
    pub fn new(type_id: TypeId, fields: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        Self {
            type_id,
            fields: fields.into_iter().collect(),
        }
    }

    /// Type identifier of the frame the message was decoded from.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The message description field, naming the kind of message.
    pub fn mdesc(&self) -> Option<&str> {
        self.get("mdesc").and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> Index<&'a str> for DecodedMessage {
    type Output = Value;

    /// Panics if the message has no field of this name.
    fn index(&self, name: &'a str) -> &Value {
        match self.fields.get(name) {
            Some(value) => value,
            None => panic!("no field {name:?} in message 0x{}", self.type_id),
        }
    }
}
