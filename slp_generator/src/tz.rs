//! Local wall-clock time to UTC.
//!
//! Load profiles are stamped in local civil time, so two days a year need care:
//! - spring forward: a wall time in the skipped hour does not exist,
//! - fall back: a wall time in the repeated hour exists twice.
//!
//! Callers say which occurrence they mean with [`Occurrence`]; nonexistent
//! times are always an error.
//!
//! Example (Europe/Berlin, 2020-10-25 02:30 occurs twice):
//! `Occurrence::First` -> 00:30Z (CEST), `Occurrence::Second` -> 01:30Z (CET).

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc, offset::LocalResult};
use chrono_tz::Tz;

use crate::error::SlpError;

/// Zone the BDEW profiles are defined in.
pub const DEFAULT_TIME_ZONE: &str = "Europe/Berlin";

/// Which instant an ambiguous (fall-back) wall time refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    /// Before the clocks go back (daylight time).
    First,
    /// After the clocks go back (standard time).
    Second,
}

/// Parse an IANA zone name such as `"Europe/Berlin"`.
pub fn parse_time_zone(name: &str) -> Result<Tz, SlpError> {
    name.trim()
        .parse()
        .map_err(|_| SlpError::TimeZone(format!("unknown time zone: {name}")))
}

/// Convert a local timestamp to UTC.
///
/// - unique local time: that instant, `occurrence` is ignored
/// - ambiguous local time: earlier instant for [`Occurrence::First`], later for
///   [`Occurrence::Second`]
/// - nonexistent local time: error
pub fn local_to_utc(
    naive: NaiveDateTime,
    tz: Tz,
    occurrence: Occurrence,
) -> Result<DateTime<Utc>, SlpError> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, latest) => Ok(match occurrence {
            Occurrence::First => earliest.with_timezone(&Utc),
            Occurrence::Second => latest.with_timezone(&Utc),
        }),
        LocalResult::None => Err(SlpError::TimeZone(format!(
            "nonexistent local time {naive} in {tz}"
        ))),
    }
}
