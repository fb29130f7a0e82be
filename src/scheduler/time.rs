//! Time slot conversions and snap-to-interval rounding.
//!
//! [`TimeSlot`] is the interchange format between the calendar grid and
//! absolute timestamps: a decomposed local wall-clock instant produced per
//! pointer move and consumed immediately.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike};

/// Scheduling granularity in minutes. Drop targets snap to this interval.
pub const SNAP_INTERVAL_MINUTES: i64 = 15;

const SNAP_INTERVAL_MS: i64 = SNAP_INTERVAL_MINUTES * 60 * 1000;

/// Snap a timestamp (epoch milliseconds) to the 15-minute grid.
///
/// `down = true` floors to the previous boundary, `false` ceils to the next
/// one. Ceiling a timestamp already on a boundary advances it a full
/// interval; callers that need idempotence use the floor direction.
pub fn round_time(timestamp_ms: i64, down: bool) -> i64 {
    if down {
        timestamp_ms - timestamp_ms % SNAP_INTERVAL_MS
    } else {
        timestamp_ms + (SNAP_INTERVAL_MS - timestamp_ms % SNAP_INTERVAL_MS)
    }
}

/// A decomposed local-time position on the calendar grid.
///
/// `month` is 1-based. Seconds and subseconds are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl TimeSlot {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    /// Decompose a local instant into a slot, discarding seconds.
    pub fn from_local(instant: DateTime<Local>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
            day: instant.day(),
            hour: instant.hour(),
            minute: instant.minute(),
        }
    }

    /// Interpret the slot as local wall-clock time.
    ///
    /// Returns `None` for slots with out-of-range fields or instants that do
    /// not exist in the local timezone (DST gaps); malformed slots from an
    /// interaction source are dropped silently rather than panicking.
    pub fn to_local(&self) -> Option<DateTime<Local>> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day)?;
        let naive = date.and_hms_opt(self.hour, self.minute, 0)?;
        Local.from_local_datetime(&naive).single()
    }

    /// The slot's absolute instant in epoch milliseconds, if representable.
    pub fn timestamp_ms(&self) -> Option<i64> {
        self.to_local().map(|instant| instant.timestamp_millis())
    }
}
