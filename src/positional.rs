//! Positional data (record type 0) is sent on every GPS fix attempt. Besides
//! the record type, the header byte carries trip and fix status flags in
//! its upper nibble.
//!
//! | Byte  | Content                                   |
//! |-------|-------------------------------------------|
//! | 0     | record type (bits 0-3), status (bits 4-5) |
//! | 1-4   | latitude, 1e-7 degrees, signed            |
//! | 5-8   | longitude, 1e-7 degrees, signed           |
//! | 9     | heading, 2 degree steps                   |
//! | 10    | speed, km/h                               |
//! | 11    | battery, 25 mV steps                      |

use generic_array::{typenum::U12, GenericArray};

use crate::{
    battery::BatteryProfile,
    buf::Buf,
    field::{Field, Fields, Geo, Value},
    DecodeError, Message,
};

const IN_TRIP: u8 = 0x10;
const LAST_FIX_FAILED: u8 = 0x20;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PositionalData {
    pub in_trip: bool,
    pub last_fix_failed: bool,
    /// Degrees, positive north.
    pub latitude: f64,
    /// Degrees, positive east.
    pub longitude: f64,
    /// Degrees, 0-510 in steps of 2.
    pub heading: u16,
    pub speed_kmh: u8,
    pub battery_voltage: f64,
}

impl PositionalData {
    #[inline]
    #[must_use]
    pub const fn geo(&self) -> Geo {
        Geo {
            lat: self.latitude,
            long: self.longitude,
        }
    }

    #[inline]
    #[must_use]
    pub fn battery_percentage(&self, profile: &BatteryProfile) -> u8 {
        profile.percentage(self.battery_voltage)
    }

    /// The fields of this record. The fix is emitted twice, once as a
    /// `geolocation` field with a `geo` attachment and once as a `$geo`
    /// pair in `[longitude, latitude]` order for geospatial indexes.
    pub fn fields(&self, profile: &BatteryProfile) -> Fields {
        [
            Field::new("MessageType", Self::RECORD_TYPE),
            Field::new("InTrip", self.in_trip),
            Field::new("lastFixFailed", self.last_fix_failed),
            Field::with_geo("geolocation", 1u8, self.geo()),
            Field::new("$geo", Value::Pair([self.longitude, self.latitude])),
            Field::new("Heading", self.heading),
            Field::new("SpeedKmH", self.speed_kmh),
            Field::new("BatteryVoltage", self.battery_voltage),
            Field::new("BatteryPercentage", self.battery_percentage(profile)),
        ]
        .into_iter()
        .collect()
    }
}

impl Message for PositionalData {
    const RECORD_TYPE: u8 = 0;

    type EncodedLen = U12;

    type DecodeError = DecodeError;

    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError> {
        let flags = data.u8_at(0) & 0xf0;

        Ok(Self {
            in_trip: flags & IN_TRIP != 0,
            last_fix_failed: flags & LAST_FIX_FAILED != 0,
            latitude: f64::from(data.i32_at(1)) * 1e-7,
            longitude: f64::from(data.i32_at(5)) * 1e-7,
            heading: u16::from(data.u8_at(9)) * 2,
            speed_kmh: data.u8_at(10),
            battery_voltage: f64::from(data.u8_at(11)) * 25.0 / 1000.0,
        })
    }
}
