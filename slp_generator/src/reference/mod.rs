//! Reference tables: 96 quarter-hour values for each of the nine
//! (season, day type) columns of one profile class.

pub mod delimited;
pub mod workbook;

use chrono::{NaiveTime, Timelike};

use crate::{
    error::SlpError,
    models::profile::{ProfileColumn, ProfileType},
};

pub use self::{delimited::CsvReferenceTables, workbook::WorkbookReferenceTables};

/// Quarter hours per day.
pub const SLOTS_PER_DAY: usize = 96;

/// Normalized reference values of one profile class.
///
/// Rows are sorted by time of day, starting at 00:00.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    profile: ProfileType,
    times: Vec<NaiveTime>,
    columns: [Vec<f64>; ProfileColumn::COUNT],
}

impl ReferenceTable {
    /// Build a table from unordered rows.
    ///
    /// Fails unless the rows cover each of the 96 quarter hours exactly once.
    pub fn new(
        profile: ProfileType,
        mut rows: Vec<(NaiveTime, [f64; ProfileColumn::COUNT])>,
    ) -> Result<Self, SlpError> {
        let invalid = |reason: String| {
            SlpError::source_unavailable(
                format!("reference table {profile}"),
                reason,
            )
        };

        if rows.len() != SLOTS_PER_DAY {
            return Err(invalid(format!(
                "expected {SLOTS_PER_DAY} quarter-hour rows, found {}",
                rows.len()
            )));
        }
        rows.sort_by_key(|(t, _)| *t);

        for (slot, (time, values)) in rows.iter().enumerate() {
            let expected = slot_time(slot);
            if *time != expected {
                return Err(invalid(format!(
                    "row {slot} is {time}, expected {expected}"
                )));
            }
            if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                return Err(invalid(format!("non-finite value {bad} at {time}")));
            }
        }

        let times = rows.iter().map(|(t, _)| *t).collect();
        let columns = std::array::from_fn(|c| rows.iter().map(|(_, v)| v[c]).collect());
        Ok(Self {
            profile,
            times,
            columns,
        })
    }

    pub fn profile(&self) -> &ProfileType {
        &self.profile
    }

    /// Times of day, 00:00 through 23:45.
    pub fn times(&self) -> &[NaiveTime] {
        &self.times
    }

    /// 96 values of one column, aligned with [`ReferenceTable::times`].
    pub fn column(&self, column: ProfileColumn) -> &[f64] {
        &self.columns[column.index()]
    }
}

/// Source of reference tables.
pub trait ReferenceTableProvider: Send + Sync {
    /// Load the table for `profile`.
    fn load(&self, profile: &ProfileType) -> Result<ReferenceTable, SlpError>;
}

impl<P: ReferenceTableProvider + ?Sized> ReferenceTableProvider for Box<P> {
    fn load(&self, profile: &ProfileType) -> Result<ReferenceTable, SlpError> {
        (**self).load(profile)
    }
}

fn slot_time(slot: usize) -> NaiveTime {
    let minutes = (slot * 15) as u32;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
}

/// Parse `HH:MM` or `HH:MM:SS`; `24:00` is the end of the day and maps to 00:00.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    if matches!(raw, "24:00" | "24:00:00") {
        return Some(NaiveTime::MIN);
    }
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Time of day from a spreadsheet day fraction (0.5 = noon, 1.0 = 24:00).
pub fn time_from_day_fraction(fraction: f64) -> Option<NaiveTime> {
    if !fraction.is_finite() || fraction < 0.0 {
        return None;
    }
    let minutes = (fraction.fract() * 24.0 * 60.0).round() as u32 % (24 * 60);
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Parse a decimal written with either `.` or `,` as separator.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.replace(',', ".").parse::<f64>().ok()
}

/// Whether `time` sits on a quarter-hour boundary.
pub fn is_quarter_hour(time: NaiveTime) -> bool {
    time.minute() % 15 == 0 && time.second() == 0 && time.nanosecond() == 0
}
