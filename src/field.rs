//! Decoded records are flattened into a list of key/value [`Field`]s, the
//! shape downstream consumers index by key. With the `serde` feature the
//! list serializes to JSON such as
//! `[{"key":"MessageType","value":0},{"key":"InTrip","value":true},...]`.

/// Every record flattens into at most this many fields.
pub const MAX_FIELDS: usize = 11;

pub type Fields = heapless::Vec<Field, MAX_FIELDS>;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    Bool(bool),
    Uint(u32),
    Float(f64),
    /// A coordinate pair, ordered `[longitude, latitude]`.
    Pair([f64; 2]),
    /// The message type of a record this crate does not decode.
    Others,
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Self::Uint(value.into())
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Self::Uint(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Geo {
    pub lat: f64,
    pub long: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Field {
    pub key: &'static str,
    pub value: Value,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub geo: Option<Geo>,
}

impl Field {
    #[inline]
    pub fn new(key: &'static str, value: impl Into<Value>) -> Self {
        Self {
            key,
            value: value.into(),
            geo: None,
        }
    }

    #[inline]
    pub fn with_geo(key: &'static str, value: impl Into<Value>, geo: Geo) -> Self {
        Self {
            geo: Some(geo),
            ..Self::new(key, value)
        }
    }
}

/// Look up a field by key.
pub fn find<'a>(fields: &'a [Field], key: &str) -> Option<&'a Field> {
    fields.iter().find(|field| field.key == key)
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match *self {
            Self::Bool(value) => serializer.serialize_bool(value),
            Self::Uint(value) => serializer.serialize_u32(value),
            Self::Float(value) => serializer.serialize_f64(value),
            Self::Pair(pair) => serde::Serialize::serialize(&pair, serializer),
            Self::Others => serializer.serialize_str("others"),
        }
    }
}
