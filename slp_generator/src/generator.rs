//! Top-level entry point: date range in, scaled quarter-hour series out.

use tracing::debug;

use crate::{
    config::SlpConfig,
    error::SlpError,
    models::{request::LoadProfileRequest, series::PowerSeries},
    resolver::CacheResolver,
};

pub struct SlpGenerator {
    resolver: CacheResolver,
}

impl SlpGenerator {
    pub fn new(resolver: CacheResolver) -> Self {
        Self { resolver }
    }

    /// Wire the on-disk store, the cached holiday client and the configured
    /// reference tables.
    pub fn from_config(config: &SlpConfig) -> Result<Self, SlpError> {
        let resolver = CacheResolver::new(
            Box::new(config.series_store()),
            config.holiday_provider()?,
            config.reference_tables()?,
        )
        .with_write_back(config.write_back);
        Ok(Self::new(resolver))
    }

    pub fn resolver(&self) -> &CacheResolver {
        &self.resolver
    }

    /// Load profile for `request`, in W.
    ///
    /// Each year touched by `[start, end]` is resolved (from cache or
    /// generated), the years are concatenated, cut to the requested dates and
    /// scaled by the annual energy, rounded to one decimal.
    pub async fn get(&self, request: &LoadProfileRequest) -> Result<PowerSeries, SlpError> {
        request.validate()?;

        let mut series = PowerSeries::default();
        for key in request.keys() {
            series.append(self.resolver.resolve(&key).await?);
        }

        let series = series
            .between_dates(request.start, request.end)
            .scaled(request.annual_energy_consumption);
        debug!(
            profile = %request.profile,
            start = %request.start,
            end = %request.end,
            points = series.len(),
            "load profile ready"
        );
        Ok(series)
    }
}
