//! This crate decodes the uplink payloads of the Digital Matter Oyster, a
//! battery powered GPS tracker that reports over the Sigfox network. Sigfox
//! hands the 12 byte uplink to integrations as a hex string; [`decode`]
//! turns that string into a [`Record`], which in turn flattens into the
//! key/value [`Field`]s that downstream consumers index by name.
//!
//! ```
//! use oyster_sigfox::{decode, field, Record, Value};
//!
//! let record = decode("0x100008d0eb48b5205a2d25a0").unwrap().unwrap();
//! assert!(matches!(record, Record::Positional(_)));
//!
//! let fields = record.fields();
//! assert_eq!(field::find(&fields, "SpeedKmH").unwrap().value, Value::Uint(37));
//! ```
//!
//! Only positional data and device statistics are decoded. Every other
//! record type, including downlink acknowledgements, comes back as
//! [`Record::Unknown`]. Like the rest of the crate this uses no heap
//! allocation, so it can run on a gateway as well as in a cloud function.

#![no_std]

pub mod battery;
mod buf;
pub mod field;
pub mod payload;
pub mod positional;
pub mod stats;

use core::fmt;

use generic_array::{typenum::Unsigned, ArrayLength, GenericArray};

pub use battery::BatteryProfile;
pub use field::{Field, Fields, Geo, Value};
pub use generic_array::typenum;
pub use payload::{hex_to_bytes, HexError, Payload};
pub use positional::PositionalData;
pub use stats::DeviceStats;

/// A fixed-layout Oyster record. The layout of each record is selected by
/// the record type in the low nibble of its first byte.
pub trait Message {
    /// The record type this message is sent with.
    const RECORD_TYPE: u8;

    /// Total length of the encoded message in bytes.
    type EncodedLen: ArrayLength;

    /// The error type returned when a message fails to decode.
    type DecodeError;

    /// Decode a message from its encoded form, header byte included.
    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError>
    where
        Self: Sized;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RecordType {
    Positional,
    DeviceStats,
    /// Any record type this crate does not decode. Type 1 (downlink
    /// acknowledgement) is one of them.
    Unknown(u8),
}

impl RecordType {
    #[inline]
    #[must_use]
    pub const fn from_header(header: u8) -> Self {
        match header & 0x0f {
            PositionalData::RECORD_TYPE => Self::Positional,
            DeviceStats::RECORD_TYPE => Self::DeviceStats,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Record {
    Positional(PositionalData),
    DeviceStats(DeviceStats),
    /// Carries the record type.
    Unknown(u8),
}

impl Record {
    /// Decode a raw uplink. The record type is read from the first byte
    /// and the rest of the payload is interpreted accordingly.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let header = *bytes.first().ok_or(DecodeError::Empty)?;
        let record_type = RecordType::from_header(header);

        #[cfg(feature = "defmt")]
        defmt::debug!("Decoding {} record of {} bytes", record_type, bytes.len());

        let record = match record_type {
            RecordType::Positional => Self::Positional(decode_message(bytes)?),
            RecordType::DeviceStats => Self::DeviceStats(decode_message(bytes)?),
            RecordType::Unknown(ty) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Record type {} is not decoded", ty);

                Self::Unknown(ty)
            }
        };

        Ok(record)
    }

    #[inline]
    #[must_use]
    pub const fn record_type(&self) -> RecordType {
        match self {
            Self::Positional(_) => RecordType::Positional,
            Self::DeviceStats(_) => RecordType::DeviceStats,
            Self::Unknown(ty) => RecordType::Unknown(*ty),
        }
    }

    /// Flatten the record into fields, estimating battery charge for
    /// alkaline cells.
    pub fn fields(&self) -> Fields {
        self.fields_with(&BatteryProfile::ALKALINE)
    }

    pub fn fields_with(&self, battery: &BatteryProfile) -> Fields {
        match self {
            Self::Positional(data) => data.fields(battery),
            Self::DeviceStats(stats) => stats.fields(),
            Self::Unknown(_) => [Field::new("MessageType", Value::Others)]
                .into_iter()
                .collect(),
        }
    }
}

fn decode_message<T>(bytes: &[u8]) -> Result<T, DecodeError>
where
    T: Message<DecodeError = DecodeError>,
{
    let expected = T::EncodedLen::USIZE;
    let data: Result<&GenericArray<u8, T::EncodedLen>, _> = bytes
        .get(..expected)
        .and_then(|data| GenericArray::try_from_slice(data).ok())
        .ok_or(DecodeError::InvalidLength {
            expected,
            actual: bytes.len(),
        });

    #[cfg(feature = "defmt")]
    if data.is_err() {
        defmt::warn!("Truncated record: {} of {} bytes", bytes.len(), expected);
    }

    T::decode(data?)
}

/// Decode a hex encoded uplink, e.g. the `data` field Sigfox forwards to
/// callbacks.
///
/// Returns `Ok(None)` if there is nothing to decode: `data` is missing,
/// blank, or just a `0x` prefix.
pub fn decode<'a>(data: impl Into<Option<&'a str>>) -> Result<Option<Record>, Error> {
    let Some(data) = data.into() else {
        return Ok(None);
    };

    let payload = hex_to_bytes(data)?;
    if payload.is_empty() {
        return Ok(None);
    }

    Ok(Some(Record::decode(&payload)?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// There is no header byte to read the record type from.
    Empty,
    /// The record type needs `expected` bytes but only `actual` were given.
    InvalidLength { expected: usize, actual: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty payload"),
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected} bytes, got {actual}")
            }
        }
    }
}

impl core::error::Error for DecodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    Hex(HexError),
    Decode(DecodeError),
}

impl From<HexError> for Error {
    fn from(err: HexError) -> Self {
        Self::Hex(err)
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(err) => write!(f, "malformed hex: {err}"),
            Self::Decode(err) => write!(f, "malformed record: {err}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Hex(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}
