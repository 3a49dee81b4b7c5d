//! Deterministic `Clock` for tests.

use chrono::{DateTime, TimeZone, Utc};
use letterbox_core::clock::Clock;

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    /// 2026-02-14 09:30:00 UTC.
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
