//! Reference tables stored as one delimited text file per profile class.
//!
//! `<dir>/<PROFILE>.csv` with a header row naming `time` and the nine value
//! columns (`winter_saturday` … `transition_workday`) in any order. Values may
//! use a decimal comma.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord};
use indexmap::IndexMap;
use tracing::debug;

use super::{ReferenceTable, ReferenceTableProvider, is_quarter_hour, parse_decimal, parse_time_of_day};
use crate::{
    error::SlpError,
    models::profile::{ProfileColumn, ProfileType},
};

const TIME_HEADER: &str = "time";

/// Directory of per-profile CSV tables.
#[derive(Debug, Clone)]
pub struct CsvReferenceTables {
    dir: PathBuf,
    delimiter: u8,
}

impl CsvReferenceTables {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            delimiter: b',',
        }
    }

    /// Use `delimiter` instead of `,` (e.g. `;` for German exports).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn table_path(&self, profile: &ProfileType) -> PathBuf {
        self.dir.join(format!("{profile}.csv"))
    }

    fn read(&self, path: &Path, profile: &ProfileType) -> Result<ReferenceTable, String> {
        let file = File::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| format!("failed to read header: {e}"))?
            .clone();
        let positions = header_positions(&headers)?;

        let mut rows = Vec::with_capacity(super::SLOTS_PER_DAY);
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| format!("CSV parse error: {e}"))?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            rows.push(parse_row(&record, &positions).map_err(|e| format!("row {}: {e}", line + 2))?);
        }

        ReferenceTable::new(profile.clone(), rows).map_err(|e| e.to_string())
    }
}

impl ReferenceTableProvider for CsvReferenceTables {
    fn load(&self, profile: &ProfileType) -> Result<ReferenceTable, SlpError> {
        let path = self.table_path(profile);
        debug!(path = %path.display(), "loading reference table");
        self.read(&path, profile)
            .map_err(|reason| SlpError::source_unavailable(format!("reference table {profile}"), reason))
    }
}

/// Column name -> field position. `time` comes first, then the value
/// columns in [`ProfileColumn::ALL`] order.
fn header_positions(headers: &StringRecord) -> Result<IndexMap<String, usize>, String> {
    let mut time_at = None;
    let mut column_at = [None; ProfileColumn::COUNT];
    for (at, header) in headers.iter().enumerate() {
        if header.eq_ignore_ascii_case(TIME_HEADER) {
            time_at.get_or_insert(at);
        } else if let Some(column) = ProfileColumn::from_name(header) {
            column_at[column.index()].get_or_insert(at);
        }
    }

    let mut positions = IndexMap::with_capacity(ProfileColumn::COUNT + 1);
    let time_at = time_at.ok_or_else(|| format!("missing column {TIME_HEADER:?}"))?;
    positions.insert(TIME_HEADER.to_string(), time_at);
    for column in ProfileColumn::ALL {
        let name = column.name();
        let at = column_at[column.index()].ok_or_else(|| format!("missing column {name:?}"))?;
        positions.insert(name, at);
    }
    Ok(positions)
}

fn parse_row(
    record: &StringRecord,
    positions: &IndexMap<String, usize>,
) -> Result<(chrono::NaiveTime, [f64; ProfileColumn::COUNT]), String> {
    let field = |at: usize| record.get(at).unwrap_or_default();

    let mut fields = positions.values().copied();
    let time_at = fields.next().ok_or("no time column")?;
    let raw_time = field(time_at);
    let time = parse_time_of_day(raw_time)
        .filter(|t| is_quarter_hour(*t))
        .ok_or_else(|| format!("invalid time of day {raw_time:?}"))?;

    let mut values = [0.0; ProfileColumn::COUNT];
    for (slot, at) in values.iter_mut().zip(fields) {
        let raw = field(at);
        *slot = parse_decimal(raw).ok_or_else(|| format!("invalid value {raw:?} at {time}"))?;
    }
    Ok((time, values))
}
