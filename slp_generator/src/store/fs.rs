//! Directory-tree store: `<root>/<country>/<state>/<profile>/<profile>-<year>.csv`.
//!
//! A file's presence is its only validity signal. Each file holds a
//! `time,power` CSV; floats are written in shortest round-trip form so a
//! reload is bit-identical. Writes go to a temporary file in the same
//! directory that is renamed over the target once complete.

use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{SeriesStore, StoreError};
use crate::models::{
    key::SeriesKey,
    series::{PowerPoint, PowerSeries},
};

#[derive(Debug, Clone)]
pub struct FsSeriesStore {
    root: PathBuf,
}

impl FsSeriesStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding all years of one (country, state, profile).
    pub fn series_dir(&self, key: &SeriesKey) -> PathBuf {
        self.root
            .join(&key.country)
            .join(key.state.as_str())
            .join(key.profile.as_str())
    }

    /// File of one year.
    pub fn series_path(&self, key: &SeriesKey) -> PathBuf {
        self.series_dir(key)
            .join(format!("{}-{}.csv", key.profile, key.year))
    }

    /// First missing level of the hierarchy, if any.
    fn missing_level(&self, key: &SeriesKey) -> Option<&'static str> {
        let country = self.root.join(&key.country);
        if !country.is_dir() {
            return Some("country");
        }
        let state = country.join(key.state.as_str());
        if !state.is_dir() {
            return Some("state");
        }
        if !self.series_dir(key).is_dir() {
            return Some("profile");
        }
        if !self.series_path(key).is_file() {
            return Some("year");
        }
        None
    }
}

impl SeriesStore for FsSeriesStore {
    fn get(&self, key: &SeriesKey) -> Result<Option<PowerSeries>, StoreError> {
        if let Some(level) = self.missing_level(key) {
            debug!(%key, level, "series cache miss");
            return Ok(None);
        }

        let path = self.series_path(key);
        let csv_err = |source| StoreError::Csv {
            path: path.clone(),
            source,
        };
        let mut reader = csv::Reader::from_path(&path).map_err(csv_err)?;
        let points = reader
            .deserialize::<PowerPoint>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)?;

        debug!(%key, points = points.len(), path = %path.display(), "series cache hit");
        Ok(Some(PowerSeries::new(points)))
    }

    fn put(&self, key: &SeriesKey, series: &PowerSeries) -> Result<(), StoreError> {
        let dir = self.series_dir(key);
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let path = self.series_path(key);
        let mut staged = NamedTempFile::new_in(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(staged.as_file_mut()));
        for point in series {
            writer.serialize(point).map_err(|source| StoreError::Csv {
                path: path.clone(),
                source,
            })?;
        }
        writer
            .into_inner()
            .map_err(|e| e.into_error())
            .and_then(|mut buf| buf.flush())
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        staged.persist(&path).map_err(|e| StoreError::Io {
            path: path.clone(),
            source: e.error,
        })?;

        debug!(%key, points = series.len(), path = %path.display(), "series stored");
        Ok(())
    }
}
