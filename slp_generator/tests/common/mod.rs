#![allow(dead_code)]

use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use public_holidays::{HolidayProvider, ProviderError, PublicHoliday, StateSelector};
use slp_generator::{
    CacheResolver, ProfileColumn, ProfileType, SeriesKey,
    reference::{CsvReferenceTables, SLOTS_PER_DAY},
    store::FsSeriesStore,
};
use tempfile::TempDir;

/// Reference value of `column` at quarter hour `slot`: distinct per column,
/// one decimal like the published tables.
pub fn reference_value(column: ProfileColumn, slot: usize) -> f64 {
    ((column.index() + 1) * 1000 + slot * 3) as f64 / 10.0
}

/// Writes `<PROFILE>.csv` for each profile into `dir`, all with the same values.
pub fn write_reference_tables(dir: &Path, profiles: &[&str]) {
    let mut body = String::from("time");
    for column in ProfileColumn::ALL {
        write!(body, ",{}", column.name()).unwrap();
    }
    body.push('\n');
    for slot in 0..SLOTS_PER_DAY {
        write!(body, "{:02}:{:02}", slot / 4, (slot % 4) * 15).unwrap();
        for column in ProfileColumn::ALL {
            write!(body, ",{}", reference_value(column, slot)).unwrap();
        }
        body.push('\n');
    }
    for profile in profiles {
        std::fs::write(dir.join(format!("{profile}.csv")), &body).unwrap();
    }
}

fn holiday(date: NaiveDate, counties: Option<&[&str]>) -> PublicHoliday {
    PublicHoliday {
        date,
        local_name: String::new(),
        name: String::new(),
        country_code: "DE".into(),
        global: counties.is_none(),
        counties: counties.map(|c| c.iter().map(|s| s.to_string()).collect()),
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// German holidays of 2020 and 2021 (subset), with Bavaria-only entries.
pub fn german_holidays() -> Vec<PublicHoliday> {
    let by: &[&str] = &["DE-BY"];
    let mut out = Vec::new();
    for (y, easter) in [(2020, (4, 12)), (2021, (4, 4))] {
        let easter = ymd(y, easter.0, easter.1);
        out.push(holiday(ymd(y, 1, 1), None));
        out.push(holiday(ymd(y, 1, 6), Some(by)));
        out.push(holiday(easter - chrono::Days::new(2), None));
        out.push(holiday(easter + chrono::Days::new(1), None));
        out.push(holiday(ymd(y, 5, 1), None));
        out.push(holiday(easter + chrono::Days::new(39), None));
        out.push(holiday(easter + chrono::Days::new(50), None));
        out.push(holiday(easter + chrono::Days::new(60), Some(by)));
        out.push(holiday(ymd(y, 10, 3), None));
        out.push(holiday(ymd(y, 11, 1), Some(by)));
        out.push(holiday(ymd(y, 12, 25), None));
        out.push(holiday(ymd(y, 12, 26), None));
    }
    out
}

/// In-memory holiday source that counts calls.
#[derive(Clone)]
pub struct StaticHolidays {
    holidays: Arc<Vec<PublicHoliday>>,
    pub calls: Arc<AtomicUsize>,
}

impl StaticHolidays {
    pub fn new(holidays: Vec<PublicHoliday>) -> Self {
        Self {
            holidays: Arc::new(holidays),
            calls: Arc::default(),
        }
    }

    pub fn german() -> Self {
        Self::new(german_holidays())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HolidayProvider for StaticHolidays {
    async fn fetch_holidays(
        &self,
        country: &str,
        year: i32,
    ) -> Result<Vec<PublicHoliday>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .holidays
            .iter()
            .filter(|h| h.country_code == country && h.date.year() == year)
            .cloned()
            .collect())
    }
}

/// Temp directories plus a resolver over an on-disk store.
pub struct Fixture {
    _dir: TempDir, // keep alive for the life of the test
    pub cache_root: PathBuf,
    pub tables_dir: PathBuf,
    pub holidays: StaticHolidays,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let cache_root = dir.path().join("cache");
        let tables_dir = dir.path().join("tables");
        std::fs::create_dir_all(&tables_dir).unwrap();
        write_reference_tables(&tables_dir, &["G0", "G1", "H0"]);
        Self {
            _dir: dir,
            cache_root,
            tables_dir,
            holidays: StaticHolidays::german(),
        }
    }

    pub fn store(&self) -> FsSeriesStore {
        FsSeriesStore::new(&self.cache_root)
    }

    pub fn resolver(&self) -> CacheResolver {
        CacheResolver::new(
            Box::new(self.store()),
            Box::new(self.holidays.clone()),
            Box::new(CsvReferenceTables::new(&self.tables_dir)),
        )
    }
}

pub fn key(state: &str, profile: &str, year: i32) -> SeriesKey {
    SeriesKey::new(
        "DE",
        StateSelector::parse(state),
        ProfileType::new(profile).unwrap(),
        year,
    )
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    ymd(y, m, d)
}
