//! Player vitals: fill percentages and HP severity tiers.

/// Visual severity of a vitals percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityTier {
    /// Below 25%.
    Critical,
    /// 25% up to (not including) 60%.
    Caution,
    /// 60% and above.
    Healthy,
}

impl SeverityTier {
    /// NaN is `Critical`.
    pub fn from_percent(percent: f64) -> Self {
        if percent.is_nan() || percent < 25.0 {
            SeverityTier::Critical
        } else if percent < 60.0 {
            SeverityTier::Caution
        } else {
            SeverityTier::Healthy
        }
    }

    /// CSS class applied to the HP bar.
    pub fn css_class(self) -> &'static str {
        match self {
            SeverityTier::Critical => "bar-critical",
            SeverityTier::Caution => "bar-caution",
            SeverityTier::Healthy => "bar-healthy",
        }
    }
}

/// `100 * current / max`, or 0 when `max` is 0. Not clamped.
pub fn percent(current: f64, max: f64) -> f64 {
    if max == 0.0 {
        0.0
    } else {
        100.0 * current / max
    }
}

/// Bar fill width: `percent` clamped to [0, 100].
pub fn fill_percent(current: f64, max: f64) -> f64 {
    let p = percent(current, max);
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 100.0)
}

/// Snapshot pushed by the backend. Every update replaces the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatus {
    pub name: String,
    pub hp: f64,
    pub max_hp: f64,
    pub mp: f64,
    pub max_mp: f64,
    pub location: String,
}

impl PlayerStatus {
    pub fn hp_percent(&self) -> f64 {
        percent(self.hp, self.max_hp)
    }

    pub fn hp_fill(&self) -> f64 {
        fill_percent(self.hp, self.max_hp)
    }

    pub fn mp_fill(&self) -> f64 {
        fill_percent(self.mp, self.max_mp)
    }

    pub fn hp_tier(&self) -> SeverityTier {
        SeverityTier::from_percent(self.hp_percent())
    }
}

/// Render a vitals number without a trailing `.0` for whole values.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(hp: f64, max_hp: f64) -> PlayerStatus {
        PlayerStatus {
            name: "Hero".into(),
            hp,
            max_hp,
            mp: 0.0,
            max_mp: 0.0,
            location: "Village".into(),
        }
    }

    #[test]
    fn zero_max_is_zero_percent() {
        assert_eq!(percent(10.0, 0.0), 0.0);
        assert_eq!(fill_percent(10.0, 0.0), 0.0);
        assert_eq!(status(5.0, 0.0).hp_tier(), SeverityTier::Critical);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(SeverityTier::from_percent(0.0), SeverityTier::Critical);
        assert_eq!(SeverityTier::from_percent(24.99), SeverityTier::Critical);
        assert_eq!(SeverityTier::from_percent(25.0), SeverityTier::Caution);
        assert_eq!(SeverityTier::from_percent(59.99), SeverityTier::Caution);
        assert_eq!(SeverityTier::from_percent(60.0), SeverityTier::Healthy);
        assert_eq!(SeverityTier::from_percent(100.0), SeverityTier::Healthy);
    }

    #[test]
    fn nan_percent_is_critical() {
        assert_eq!(SeverityTier::from_percent(f64::NAN), SeverityTier::Critical);
        assert_eq!(status(f64::NAN, 100.0).hp_tier(), SeverityTier::Critical);
        assert_eq!(status(f64::NAN, 100.0).hp_fill(), 0.0);
    }

    #[test]
    fn tiers_from_status() {
        assert_eq!(status(24.0, 100.0).hp_tier(), SeverityTier::Critical);
        assert_eq!(status(25.0, 100.0).hp_tier(), SeverityTier::Caution);
        assert_eq!(status(59.0, 100.0).hp_tier(), SeverityTier::Caution);
        assert_eq!(status(60.0, 100.0).hp_tier(), SeverityTier::Healthy);
        assert_eq!(status(1.0, 4.0).hp_tier(), SeverityTier::Caution);
    }

    #[test]
    fn fill_is_clamped() {
        assert_eq!(status(150.0, 100.0).hp_fill(), 100.0);
        assert_eq!(status(-5.0, 100.0).hp_fill(), 0.0);
        assert_eq!(status(50.0, 100.0).hp_fill(), 50.0);
    }

    #[test]
    fn amounts_drop_trailing_zero() {
        assert_eq!(format_amount(42.0), "42");
        assert_eq!(format_amount(-3.0), "-3");
        assert_eq!(format_amount(2.5), "2.5");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn tier_matches_percent(hp in 0u32..10_000, max in 0u32..10_000) {
                let s = status(hp as f64, max as f64);
                let p = if max == 0 { 0.0 } else { 100.0 * hp as f64 / max as f64 };
                prop_assert_eq!(s.hp_percent(), p);
                let expected = if p < 25.0 {
                    SeverityTier::Critical
                } else if p < 60.0 {
                    SeverityTier::Caution
                } else {
                    SeverityTier::Healthy
                };
                prop_assert_eq!(s.hp_tier(), expected);
            }

            #[test]
            fn fill_stays_in_range(hp in -1e6f64..1e6, max in -1e6f64..1e6) {
                let f = fill_percent(hp, max);
                prop_assert!((0.0..=100.0).contains(&f));
            }
        }
    }
}
