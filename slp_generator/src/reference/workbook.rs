//! Reference tables from the published BDEW workbook (`.xls`/`.xlsx`).
//!
//! One sheet per profile class, named after it. Data rows carry the time of
//! day followed by the nine value columns in [`ProfileColumn::ALL`] order;
//! header and footer rows are recognized by not starting with a time.

use std::path::PathBuf;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveTime;
use tracing::debug;

use super::{ReferenceTable, ReferenceTableProvider, is_quarter_hour, parse_decimal, parse_time_of_day, time_from_day_fraction};
use crate::{
    error::SlpError,
    models::profile::{ProfileColumn, ProfileType},
};

/// A workbook holding one sheet per profile class.
#[derive(Debug, Clone)]
pub struct WorkbookReferenceTables {
    path: PathBuf,
}

impl WorkbookReferenceTables {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read(&self, profile: &ProfileType) -> Result<ReferenceTable, String> {
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| format!("cannot open {}: {e}", self.path.display()))?;

        let sheet = workbook
            .sheet_names()
            .into_iter()
            .find(|name| name.trim().eq_ignore_ascii_case(profile.as_str()))
            .ok_or_else(|| format!("no sheet named {profile} in {}", self.path.display()))?;

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| format!("cannot read sheet {sheet}: {e}"))?;

        let rows = range.rows().filter_map(data_row).collect();
        ReferenceTable::new(profile.clone(), rows).map_err(|e| e.to_string())
    }
}

impl ReferenceTableProvider for WorkbookReferenceTables {
    fn load(&self, profile: &ProfileType) -> Result<ReferenceTable, SlpError> {
        debug!(path = %self.path.display(), %profile, "loading reference sheet");
        self.read(profile)
            .map_err(|reason| SlpError::source_unavailable(format!("reference table {profile}"), reason))
    }
}

/// A data row: a quarter-hour time followed by nine numbers.
fn data_row(row: &[Data]) -> Option<(NaiveTime, [f64; ProfileColumn::COUNT])> {
    let (first, rest) = row.split_first()?;
    let time = cell_time(first).filter(|t| is_quarter_hour(*t))?;
    if rest.len() < ProfileColumn::COUNT {
        return None;
    }
    let mut values = [0.0; ProfileColumn::COUNT];
    for (slot, cell) in values.iter_mut().zip(rest) {
        *slot = cell_number(cell)?;
    }
    Some((time, values))
}

pub(crate) fn cell_time(cell: &Data) -> Option<NaiveTime> {
    match cell {
        Data::DateTime(dt) => time_from_day_fraction(dt.as_f64()),
        Data::Float(f) => time_from_day_fraction(*f),
        Data::String(s) | Data::DateTimeIso(s) => parse_time_of_day(s),
        _ => None,
    }
}

pub(crate) fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => parse_decimal(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_cells() {
        assert_eq!(
            cell_time(&Data::Float(0.25)),
            NaiveTime::from_hms_opt(6, 0, 0)
        );
        assert_eq!(cell_time(&Data::Float(1.0)), Some(NaiveTime::MIN));
        assert_eq!(
            cell_time(&Data::String("12:45".into())),
            NaiveTime::from_hms_opt(12, 45, 0)
        );
        assert_eq!(cell_time(&Data::String("Samstag".into())), None);
        assert_eq!(cell_time(&Data::Empty), None);
    }

    #[test]
    fn number_cells() {
        assert_eq!(cell_number(&Data::Float(70.8)), Some(70.8));
        assert_eq!(cell_number(&Data::Int(12)), Some(12.0));
        assert_eq!(cell_number(&Data::String("70,8".into())), Some(70.8));
        assert_eq!(cell_number(&Data::Empty), None);
    }

    #[test]
    fn header_rows_are_skipped() {
        let header: Vec<Data> = std::iter::once(Data::String("Winter".into()))
            .chain((0..9).map(|_| Data::String("Samstag".into())))
            .collect();
        assert!(data_row(&header).is_none());

        let row: Vec<Data> = std::iter::once(Data::String("00:15".into()))
            .chain((0..9).map(|i| Data::Float(f64::from(i))))
            .collect();
        let (time, values) = data_row(&row).unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(0, 15, 0).unwrap());
        assert_eq!(values[8], 8.0);

        assert!(data_row(&row[..5]).is_none());
    }

    #[test]
    fn missing_workbook_is_source_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        let tables = WorkbookReferenceTables::new(dir.path().join("slp.xls"));
        let err = tables.load(&ProfileType::new("H0").unwrap()).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::SourceUnavailable);
        assert!(err.to_string().contains("slp.xls"), "{err}");
    }
}
