//! Persistent storage of generated per-year series.
//!
//! The unit of caching is one complete year for one
//! (country, state, profile) combination; see [`SeriesKey`].

pub mod fs;
pub mod memory;

use std::{path::PathBuf, sync::Arc};

use thiserror::Error;

use crate::models::{key::SeriesKey, series::PowerSeries};

pub use self::{fs::FsSeriesStore, memory::MemorySeriesStore};

/// Failures of a [`SeriesStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed series file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Key-value store of generated series.
pub trait SeriesStore: Send + Sync {
    /// The stored series for `key`, or `None` when absent.
    fn get(&self, key: &SeriesKey) -> Result<Option<PowerSeries>, StoreError>;

    /// Store `series` under `key`, replacing any previous entry.
    fn put(&self, key: &SeriesKey, series: &PowerSeries) -> Result<(), StoreError>;
}

impl<S: SeriesStore + ?Sized> SeriesStore for Box<S> {
    fn get(&self, key: &SeriesKey) -> Result<Option<PowerSeries>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &SeriesKey, series: &PowerSeries) -> Result<(), StoreError> {
        (**self).put(key, series)
    }
}

impl<S: SeriesStore + ?Sized> SeriesStore for Arc<S> {
    fn get(&self, key: &SeriesKey) -> Result<Option<PowerSeries>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &SeriesKey, series: &PowerSeries) -> Result<(), StoreError> {
        (**self).put(key, series)
    }
}
