//! Runtime configuration: TOML file plus environment overrides.
//!
//! ```toml
//! data_dir = "data"
//! time_zone = "Europe/Berlin"
//! write_back = true
//!
//! [reference]
//! path = "data/slp.xls"
//! format = "workbook"   # or "csv" (then `path` is a directory)
//! delimiter = ";"
//!
//! [holidays]
//! base_url = "https://date.nager.at/api/v3/PublicHolidays"
//! timeout_secs = 30
//! ```
//!
//! Every field is optional. `SLP_DATA_DIR` and `SLP_HOLIDAY_API_URL` override
//! the file.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use chrono_tz::Tz;
use public_holidays::{CacheFirstProvider, HolidayProvider, NagerProvider, providers::nager};
use serde::{Deserialize, Serialize};
use shared_utils::env::{env_override, env_path_override};

use crate::{
    error::SlpError,
    reference::{CsvReferenceTables, ReferenceTableProvider, WorkbookReferenceTables},
    store::FsSeriesStore,
    tz::{DEFAULT_TIME_ZONE, parse_time_zone},
};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "slp.toml";
pub const DATA_DIR_ENV: &str = "SLP_DATA_DIR";
pub const HOLIDAY_API_URL_ENV: &str = "SLP_HOLIDAY_API_URL";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlpConfig {
    /// Root of the series cache and the holiday cache.
    pub data_dir: PathBuf,
    /// IANA zone used for UTC output.
    pub time_zone: String,
    /// Store generated series for later requests.
    pub write_back: bool,
    pub reference: ReferenceCfg,
    pub holidays: HolidaysCfg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceFormat {
    Workbook,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceCfg {
    /// Workbook file, or directory of `<PROFILE>.csv` files.
    pub path: PathBuf,
    pub format: ReferenceFormat,
    /// Field separator of CSV tables.
    pub delimiter: char,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HolidaysCfg {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for SlpConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            write_back: true,
            reference: ReferenceCfg::default(),
            holidays: HolidaysCfg::default(),
        }
    }
}

impl Default for ReferenceCfg {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/slp.xls"),
            format: ReferenceFormat::Workbook,
            delimiter: ',',
        }
    }
}

impl Default for HolidaysCfg {
    fn default() -> Self {
        Self {
            base_url: nager::DEFAULT_BASE_URL.to_string(),
            timeout_secs: nager::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl SlpConfig {
    /// Replace fields set through the environment.
    pub fn apply_env_overrides(&mut self) {
        if let Some(dir) = env_path_override(DATA_DIR_ENV) {
            self.data_dir = dir;
        }
        if let Some(url) = env_override(HOLIDAY_API_URL_ENV) {
            self.holidays.base_url = url;
        }
    }

    pub fn time_zone(&self) -> Result<Tz, SlpError> {
        parse_time_zone(&self.time_zone)
    }

    /// Nager.Date client behind the on-disk holiday cache in `data_dir`.
    pub fn holiday_provider(&self) -> Result<Box<dyn HolidayProvider>, SlpError> {
        let timeout = Duration::from_secs(self.holidays.timeout_secs);
        let nager = NagerProvider::with_base_url(&self.holidays.base_url, timeout)
            .map_err(|e| SlpError::Config(format!("holiday client: {e}")))?;
        Ok(Box::new(CacheFirstProvider::new(nager, &self.data_dir)))
    }

    pub fn reference_tables(&self) -> Result<Box<dyn ReferenceTableProvider>, SlpError> {
        let path = self.reference.path.clone();
        Ok(match self.reference.format {
            ReferenceFormat::Workbook => Box::new(WorkbookReferenceTables::new(path)),
            ReferenceFormat::Csv => {
                let delimiter = self.reference.delimiter;
                if !delimiter.is_ascii() {
                    return Err(SlpError::Config(format!(
                        "delimiter {delimiter:?} is not an ASCII character"
                    )));
                }
                Box::new(CsvReferenceTables::new(path).with_delimiter(delimiter as u8))
            }
        })
    }

    pub fn series_store(&self) -> FsSeriesStore {
        FsSeriesStore::new(&self.data_dir)
    }
}

/// Parse a config from TOML text. Environment overrides are not applied.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<SlpConfig> {
    toml::from_str(toml_str).context("failed to parse config TOML")
}

/// Load `path`, or [`DEFAULT_CONFIG_FILE`] if it exists, or the defaults;
/// then apply environment overrides.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SlpConfig> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            read_config(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => SlpConfig::default(),
    };
    config.apply_env_overrides();
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<SlpConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    load_config_str(&text).with_context(|| format!("in {}", path.display()))
}
