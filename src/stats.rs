//! Device statistics (record type 2) are sent periodically and summarise the
//! tracker's lifetime activity. The counters are bit-packed back to back
//! behind the 4-bit record type, so most of them straddle byte boundaries.
//! The radio and GPS counters are transmitted in units of 32.

use generic_array::{typenum::U12, GenericArray};

use crate::{
    buf::Buf,
    field::{Field, Fields},
    DecodeError, Message,
};

/// Multiplier for counters that are sent in units of 32 events.
const COUNT_SCALE: u16 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeviceStats {
    pub uptime_weeks: u16,
    pub tx_count: u16,
    pub rx_count: u16,
    pub trip_count: u16,
    pub gps_success_count: u16,
    pub gps_failure_count: u16,
    pub average_fix_time_seconds: u16,
    pub average_fail_time_seconds: u16,
    pub average_freshen_time_seconds: u16,
    pub wake_ups_per_trip: u8,
}

impl DeviceStats {
    pub fn fields(&self) -> Fields {
        [
            Field::new("MessageType", Self::RECORD_TYPE),
            Field::new("UptimeWeeks", self.uptime_weeks),
            Field::new("TxCount", self.tx_count),
            Field::new("RxCount", self.rx_count),
            Field::new("TripCount", self.trip_count),
            Field::new("GpsSuccessCount", self.gps_success_count),
            Field::new("GpsFailureCount", self.gps_failure_count),
            Field::new("AverageFixTimeSeconds", self.average_fix_time_seconds),
            Field::new("AverageFailTimeSeconds", self.average_fail_time_seconds),
            Field::new("AverageFreshenTimeSeconds", self.average_freshen_time_seconds),
            Field::new("WakeUpsPerTrip", self.wake_ups_per_trip),
        ]
        .into_iter()
        .collect()
    }
}

impl Message for DeviceStats {
    const RECORD_TYPE: u8 = 2;

    type EncodedLen = U12;

    type DecodeError = DecodeError;

    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError> {
        Ok(Self {
            uptime_weeks: data.bits_at(0, 4, 9),
            tx_count: data.bits_at(1, 5, 11) * COUNT_SCALE,
            rx_count: u16::from(data.u8_at(3)) * COUNT_SCALE,
            trip_count: data.bits_at(4, 0, 13),
            gps_success_count: data.bits_at(5, 5, 10) * COUNT_SCALE,
            gps_failure_count: data.bits_at(6, 7, 8) * COUNT_SCALE,
            average_fix_time_seconds: data.bits_at(7, 7, 9),
            average_fail_time_seconds: data.bits_at(9, 0, 9),
            average_freshen_time_seconds: data.bits_at(10, 1, 8),
            wake_ups_per_trip: data.u8_at(11) >> 1,
        })
    }
}
