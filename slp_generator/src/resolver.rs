//! Per-year cache resolution: serve a stored series or generate and store one.

use public_holidays::HolidayProvider;
use tracing::{debug, info, warn};

use crate::{
    assembler::assemble,
    calendar::classify,
    dynamic_sampling,
    error::SlpError,
    models::{key::SeriesKey, series::PowerSeries},
    reference::ReferenceTableProvider,
    store::SeriesStore,
};

/// Resolves [`SeriesKey`]s against a [`SeriesStore`], generating on a miss.
///
/// Concurrent resolvers sharing a backing store may both generate the same
/// key; the last writer wins.
pub struct CacheResolver {
    store: Box<dyn SeriesStore>,
    holidays: Box<dyn HolidayProvider>,
    tables: Box<dyn ReferenceTableProvider>,
    write_back: bool,
}

impl CacheResolver {
    pub fn new(
        store: Box<dyn SeriesStore>,
        holidays: Box<dyn HolidayProvider>,
        tables: Box<dyn ReferenceTableProvider>,
    ) -> Self {
        Self {
            store,
            holidays,
            tables,
            write_back: true,
        }
    }

    /// Whether generated series are written to the store (default `true`).
    pub fn with_write_back(mut self, write_back: bool) -> Self {
        self.write_back = write_back;
        self
    }

    pub fn store(&self) -> &dyn SeriesStore {
        self.store.as_ref()
    }

    /// Stored series for `key`, generating (and storing) it on a miss.
    pub async fn resolve(&self, key: &SeriesKey) -> Result<PowerSeries, SlpError> {
        if let Some(series) = self.store.get(key)? {
            debug!(%key, points = series.len(), "resolved from cache");
            return Ok(series);
        }
        let series = self.generate(key).await?;
        if self.write_back {
            self.persist(key, &series);
        }
        Ok(series)
    }

    /// Generate `key` and overwrite whatever the store holds.
    pub async fn regenerate(&self, key: &SeriesKey) -> Result<PowerSeries, SlpError> {
        let series = self.generate(key).await?;
        self.store.put(key, &series)?;
        Ok(series)
    }

    /// Build the series for `key` from scratch without touching the store.
    pub async fn generate(&self, key: &SeriesKey) -> Result<PowerSeries, SlpError> {
        if !key.profile.is_known() {
            warn!(profile = %key.profile, "not a published BDEW profile class");
        }
        let table = self.tables.load(&key.profile)?;
        let calendar = classify(self.holidays.as_ref(), key.year, &key.country, &key.state).await?;
        debug!(profile = %table.profile(), year = calendar.year(), "table and calendar ready");

        let mut series = assemble(&calendar, &table);
        if dynamic_sampling::applies_to(&key.profile) {
            series = dynamic_sampling::adjust(series);
        }

        info!(%key, points = series.len(), "generated load profile");
        Ok(series)
    }

    fn persist(&self, key: &SeriesKey, series: &PowerSeries) {
        if let Err(e) = self.store.put(key, series) {
            warn!(%key, error = %e, "failed to store generated series");
        }
    }
}
