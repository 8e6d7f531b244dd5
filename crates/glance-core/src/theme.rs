//! Background theming: time band, status tone, and decorative variant.
//!
//! The variant pick must be reproducible on every platform that renders the
//! widget, so it is an explicit arithmetic formula over the local ordinal
//! date, the hour, and a fixed per-status seed. Runtime string hashing and
//! RNGs are off the table: their outputs differ across language
//! implementations and versions.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::context::ContextKind;
use crate::mascot::Emotion;

/// Number of decorative background variants per (status, band).
pub const VARIANT_COUNT: u32 = 3;

/// Coarse day segment used for background theming: dawn [5,8), day [8,17),
/// dusk [17,21), night [21,5).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeBand {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl TimeBand {
    /// Band for a wall-clock hour.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=7 => TimeBand::Dawn,
            8..=16 => TimeBand::Day,
            17..=20 => TimeBand::Dusk,
            _ => TimeBand::Night,
        }
    }
}

/// Overall widget tone, derived from the presentation context and the
/// resolved emotion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Nothing to show.
    Idle,
    /// Comfortably on pace.
    OnTrack,
    /// Falling behind.
    Attention,
    /// Urgent or overdue.
    Critical,
    /// A completion is being celebrated.
    Celebrating,
}

impl Status {
    /// Fixed integer seed for the variant formula. These constants are part
    /// of the cross-platform contract; renumbering them changes rendered
    /// output everywhere.
    pub fn seed(&self) -> u32 {
        match self {
            Status::Idle => 0,
            Status::OnTrack => 1,
            Status::Attention => 2,
            Status::Critical => 3,
            Status::Celebrating => 4,
        }
    }

    /// Derive the tone from the selected context and resolved emotion.
    pub fn derive(context: ContextKind, emotion: Emotion) -> Self {
        if emotion == Emotion::Celebrate {
            return Status::Celebrating;
        }
        match context {
            ContextKind::Empty => Status::Idle,
            _ => match emotion {
                Emotion::Happy | Emotion::Neutral => Status::OnTrack,
                Emotion::Worried => Status::Attention,
                Emotion::Sad => Status::Critical,
                Emotion::Celebrate => Status::Celebrating,
            },
        }
    }
}

/// Resolved background theme for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundTheme {
    pub status: Status,
    pub band: TimeBand,
    pub variant: u32,
}

/// Background theme resolution engine. Stateless.
pub struct ThemeResolver;

impl ThemeResolver {
    /// Resolve the theme for a status at the given clock.
    pub fn resolve(status: Status, clock: &Clock) -> BackgroundTheme {
        BackgroundTheme {
            status,
            band: TimeBand::from_hour(clock.hour()),
            variant: Self::variant(clock.ordinal_date(), clock.hour(), status),
        }
    }

    /// Canonical variant formula: `1 + ((ordinal*31 + hour*7 + seed) % 3)`.
    ///
    /// Varies across days and hours for visual freshness, and is exactly
    /// reproducible for the same (date, hour, status) triple.
    pub fn variant(ordinal_date: u32, hour: u32, status: Status) -> u32 {
        1 + ((ordinal_date * 31 + hour * 7 + status.seed()) % VARIANT_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_band_boundaries() {
        assert_eq!(TimeBand::from_hour(4), TimeBand::Night);
        assert_eq!(TimeBand::from_hour(5), TimeBand::Dawn);
        assert_eq!(TimeBand::from_hour(7), TimeBand::Dawn);
        assert_eq!(TimeBand::from_hour(8), TimeBand::Day);
        assert_eq!(TimeBand::from_hour(16), TimeBand::Day);
        assert_eq!(TimeBand::from_hour(17), TimeBand::Dusk);
        assert_eq!(TimeBand::from_hour(20), TimeBand::Dusk);
        assert_eq!(TimeBand::from_hour(21), TimeBand::Night);
        assert_eq!(TimeBand::from_hour(23), TimeBand::Night);
        assert_eq!(TimeBand::from_hour(0), TimeBand::Night);
    }

    #[test]
    fn test_variant_in_range_and_reproducible() {
        for ordinal in [1, 60, 180, 366] {
            for hour in 0..24 {
                for status in [
                    Status::Idle,
                    Status::OnTrack,
                    Status::Attention,
                    Status::Critical,
                    Status::Celebrating,
                ] {
                    let v = ThemeResolver::variant(ordinal, hour, status);
                    assert!((1..=3).contains(&v));
                    assert_eq!(v, ThemeResolver::variant(ordinal, hour, status));
                }
            }
        }
    }

    #[test]
    fn test_variant_varies_with_inputs() {
        let base = ThemeResolver::variant(100, 10, Status::OnTrack);
        let other_hours: Vec<u32> = (0..24)
            .map(|h| ThemeResolver::variant(100, h, Status::OnTrack))
            .collect();
        assert!(other_hours.iter().any(|v| *v != base));
    }

    #[test]
    fn test_status_derivation() {
        assert_eq!(
            Status::derive(ContextKind::Empty, Emotion::Neutral),
            Status::Idle
        );
        assert_eq!(
            Status::derive(ContextKind::InProgress, Emotion::Happy),
            Status::OnTrack
        );
        assert_eq!(
            Status::derive(ContextKind::InProgress, Emotion::Worried),
            Status::Attention
        );
        assert_eq!(
            Status::derive(ContextKind::EndOfDay, Emotion::Sad),
            Status::Critical
        );
        assert_eq!(
            Status::derive(ContextKind::DailyCelebration, Emotion::Celebrate),
            Status::Celebrating
        );
    }

    #[test]
    fn test_resolve_uses_local_clock() {
        let clock = Clock::utc(Utc.with_ymd_and_hms(2025, 6, 10, 18, 0, 0).unwrap());
        let theme = ThemeResolver::resolve(Status::OnTrack, &clock);
        assert_eq!(theme.band, TimeBand::Dusk);
        assert_eq!(
            theme.variant,
            ThemeResolver::variant(clock.ordinal_date(), 18, Status::OnTrack)
        );
    }
}
