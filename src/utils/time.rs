//! Run timestamp formatting

use chrono::{DateTime, Local, TimeZone};

/// Layout of the timestamped output file stem
pub const RUN_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `YYYYMMDD_HHMMSS` for the given instant
pub fn run_stamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(RUN_STAMP_FORMAT).to_string()
}

/// `YYYYMMDD_HHMMSS` for the current local time
pub fn current_run_stamp() -> String {
    run_stamp(&Local::now())
}
