//! Clock pinned to one instant, for reproducible replays.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// A [`Clock`] that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Noon UTC on 1 July of `year`, so the local year matches in every
    /// timezone. Returns `None` for years chrono cannot represent.
    #[must_use]
    pub fn mid_year(year: i32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, 7, 1, 12, 0, 0)
            .single()
            .map(Self::new)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}
