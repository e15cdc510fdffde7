//! Cache-first wrapper: local files win, the network is only asked on a miss.
//!
//! Layout: `<data_dir>/<country>/public_holidays/ph-<year>.json`, holding the
//! raw (unfiltered) list as returned by the inner provider. A present file is
//! trusted as-is; there is no expiry. A file that cannot be read or decoded is
//! reported as an error instead of being refetched.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use snafu::ResultExt;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::{
    models::PublicHoliday,
    providers::{DecodeSnafu, EncodeSnafu, HolidayProvider, IoSnafu, ProviderError},
};

/// Directory name for holiday files below a country directory.
pub const HOLIDAY_DIR: &str = "public_holidays";

/// Serves holidays from disk when available, otherwise from `inner`.
#[derive(Debug, Clone)]
pub struct CacheFirstProvider<P> {
    inner: P,
    data_dir: PathBuf,
}

impl<P> CacheFirstProvider<P> {
    /// Wrap `inner`, caching below `data_dir`.
    pub fn new(inner: P, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            data_dir: data_dir.into(),
        }
    }

    /// File holding the calendar of `country` in `year`.
    pub fn cache_path(&self, country: &str, year: i32) -> PathBuf {
        self.data_dir
            .join(country)
            .join(HOLIDAY_DIR)
            .join(format!("ph-{year}.json"))
    }
}

fn read_cached(path: &Path) -> Result<Vec<PublicHoliday>, ProviderError> {
    let raw = fs::read_to_string(path).context(IoSnafu { path })?;
    serde_json::from_str(&raw).context(DecodeSnafu {
        origin: path.display().to_string(),
    })
}

/// Write through a temporary sibling and rename it into place, so readers
/// never see a partial file.
fn persist(path: &Path, holidays: &[PublicHoliday]) -> Result<(), ProviderError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).context(IoSnafu { path: parent })?;
    let body = serde_json::to_vec_pretty(holidays).context(EncodeSnafu)?;

    let mut staged = NamedTempFile::new_in(parent).context(IoSnafu { path: parent })?;
    staged.write_all(&body).context(IoSnafu { path })?;
    staged
        .persist(path)
        .map_err(|e| e.error)
        .context(IoSnafu { path })?;
    Ok(())
}

#[async_trait]
impl<P> HolidayProvider for CacheFirstProvider<P>
where
    P: HolidayProvider,
{
    async fn fetch_holidays(
        &self,
        country: &str,
        year: i32,
    ) -> Result<Vec<PublicHoliday>, ProviderError> {
        let path = self.cache_path(country, year);
        if path.is_file() {
            debug!(path = %path.display(), "public holidays served from cache");
            return read_cached(&path);
        }

        let holidays = self.inner.fetch_holidays(country, year).await?;
        match persist(&path, &holidays) {
            Ok(()) => info!(path = %path.display(), count = holidays.len(), "cached public holidays"),
            Err(err) => warn!(error = %err, "could not cache public holidays"),
        }
        Ok(holidays)
    }
}
