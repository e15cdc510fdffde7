//! In-process [`SeriesStore`] holding series in a read-mostly snapshot.
//!
//! Readers load an `Arc<HashMap<..>>` snapshot without locking; writers swap in
//! a copy with the new entry via `ArcSwap::rcu`.

use std::{collections::HashMap, sync::Arc};

use arc_swap::ArcSwap;

use super::{SeriesStore, StoreError};
use crate::models::{key::SeriesKey, series::PowerSeries};

type Snapshot = HashMap<SeriesKey, Arc<PowerSeries>>;

pub struct MemorySeriesStore {
    entries: ArcSwap<Snapshot>,
}

impl Default for MemorySeriesStore {
    fn default() -> Self {
        Self {
            entries: ArcSwap::from_pointee(Snapshot::new()),
        }
    }
}

impl MemorySeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    pub fn contains(&self, key: &SeriesKey) -> bool {
        self.entries.load().contains_key(key)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.store(Arc::new(Snapshot::new()));
    }
}

impl SeriesStore for MemorySeriesStore {
    fn get(&self, key: &SeriesKey) -> Result<Option<PowerSeries>, StoreError> {
        Ok(self.entries.load().get(key).map(|s| PowerSeries::clone(s)))
    }

    fn put(&self, key: &SeriesKey, series: &PowerSeries) -> Result<(), StoreError> {
        let series = Arc::new(series.clone());
        self.entries.rcu(|current| {
            let mut next = Snapshot::clone(current);
            next.insert(key.clone(), Arc::clone(&series));
            next
        });
        Ok(())
    }
}
