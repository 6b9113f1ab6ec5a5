/// The voltage range mapped onto 0–100 % when estimating remaining charge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BatteryProfile {
    min_volts: f64,
    max_volts: f64,
}

impl BatteryProfile {
    /// Three alkaline AA cells, the stock power source of the tracker.
    pub const ALKALINE: Self = Self {
        min_volts: 3.3,
        max_volts: 4.4,
    };

    /// Returns `None` unless `min_volts < max_volts`.
    #[must_use]
    pub fn new(min_volts: f64, max_volts: f64) -> Option<Self> {
        (min_volts < max_volts).then_some(Self {
            min_volts,
            max_volts,
        })
    }

    #[inline]
    #[must_use]
    pub const fn min_volts(&self) -> f64 {
        self.min_volts
    }

    #[inline]
    #[must_use]
    pub const fn max_volts(&self) -> f64 {
        self.max_volts
    }

    /// Linear estimate of the remaining charge, rounded half up to a whole
    /// percent. Anything above the range reads 100, anything at or below
    /// its floor reads 0.
    #[must_use]
    pub fn percentage(&self, volts: f64) -> u8 {
        if volts > self.max_volts {
            return 100;
        }

        let pct = (volts - self.min_volts) / (self.max_volts - self.min_volts) * 100.0;
        if pct > 0.0 {
            // truncation of a positive value is floor
            (pct + 0.5) as u8
        } else {
            0
        }
    }
}

impl Default for BatteryProfile {
    fn default() -> Self {
        Self::ALKALINE
    }
}

#[cfg(test)]
mod tests {
    use super::BatteryProfile;

    fn pct(raw: u8) -> u8 {
        BatteryProfile::ALKALINE.percentage(f64::from(raw) * 25.0 / 1000.0)
    }

    #[test]
    fn range_ends() {
        assert_eq!(pct(132), 0); // 3.300 V
        assert_eq!(pct(176), 100); // 4.400 V
        assert_eq!(pct(177), 100);
        assert_eq!(pct(255), 100);
    }

    #[test]
    fn below_range_clamps_to_zero() {
        assert_eq!(pct(0), 0);
        assert_eq!(pct(131), 0); // 3.275 V, about -2.3 %
    }

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(pct(154), 50); // 3.850 V
        assert_eq!(pct(133), 2); // 3.325 V, about 2.27 %
        assert_eq!(pct(175), 98); // 4.375 V, about 97.7 %
    }

    #[test]
    fn custom_profile() {
        let profile = BatteryProfile::new(3.0, 4.0).unwrap();
        assert_eq!(profile.percentage(3.5), 50);
        assert_eq!(profile.percentage(4.0), 100);
        assert_eq!(profile.percentage(2.9), 0);
    }

    #[test]
    fn rejects_inverted_range() {
        assert_eq!(BatteryProfile::new(4.4, 3.3), None);
        assert_eq!(BatteryProfile::new(3.3, 3.3), None);
        assert_eq!(BatteryProfile::default(), BatteryProfile::ALKALINE);
    }
}
