//! Snapshot timestamp selection
//!
//! The AMeDAS map feed publishes one snapshot every 10 minutes, named after
//! its observation time in JST, and each one appears a few minutes after
//! that time. The latest snapshot that is safe to request is therefore the
//! 10-minute slot containing `now - 10 minutes`.

use std::fmt;

use time::{
    format_description::BorrowedFormatItem, macros::format_description, macros::offset,
    Duration, OffsetDateTime, UtcOffset,
};

/// Fixed UTC+9 civil time used by the feed
pub const JST: UtcOffset = offset!(+9);

/// Spacing between published snapshots, in minutes
pub const SNAPSHOT_INTERVAL_MINUTES: u8 = 10;

/// How far behind the wall clock the feed is assumed to be
pub const PUBLICATION_DELAY: Duration = Duration::minutes(10);

const STAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year][month][day][hour][minute][second]");

const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute] JST");

/// A snapshot slot in JST, aligned to [`SNAPSHOT_INTERVAL_MINUTES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SnapshotTime(OffsetDateTime);

impl SnapshotTime {
    pub fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }

    /// Compact `YYYYMMDDHHMMSS` form used in the feed URL
    pub fn stamp(&self) -> Result<String, time::error::Format> {
        self.0.format(STAMP_FORMAT)
    }
}

impl fmt::Display for SnapshotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.format(DISPLAY_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Express `instant` in JST and floor it to the start of its 10-minute slot
pub fn floor_to_interval(instant: OffsetDateTime) -> SnapshotTime {
    let jst = instant.to_offset(JST);
    let excess = Duration::minutes(i64::from(jst.minute() % SNAPSHOT_INTERVAL_MINUTES))
        + Duration::seconds(i64::from(jst.second()))
        + Duration::nanoseconds(i64::from(jst.nanosecond()));
    SnapshotTime(jst - excess)
}

/// Latest snapshot slot expected to be published at `now`
pub fn latest_snapshot_time(now: OffsetDateTime) -> SnapshotTime {
    floor_to_interval(now - PUBLICATION_DELAY)
}
