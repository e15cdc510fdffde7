use chrono::{Datelike, NaiveDate};
use public_holidays::StateSelector;

use crate::{
    error::SlpError,
    models::{key::SeriesKey, profile::ProfileType},
};

/// A load profile request as accepted by [`crate::SlpGenerator::get`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadProfileRequest {
    /// First day to include.
    pub start: NaiveDate,
    /// Last day to include (inclusive).
    pub end: NaiveDate,
    pub profile: ProfileType,
    pub country: String,
    pub state: StateSelector,
    /// Annual consumption in MWh the normalized profile is scaled to.
    pub annual_energy_consumption: f64,
}

impl LoadProfileRequest {
    /// Request normalized to 1 MWh/a.
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        profile: ProfileType,
        country: impl Into<String>,
        state: StateSelector,
    ) -> Self {
        Self {
            start,
            end,
            profile,
            country: country.into(),
            state,
            annual_energy_consumption: 1.0,
        }
    }

    pub fn with_annual_energy(mut self, mwh: f64) -> Self {
        self.annual_energy_consumption = mwh;
        self
    }

    /// Reject ranges running backwards and unusable scale factors.
    pub fn validate(&self) -> Result<(), SlpError> {
        if self.start > self.end {
            return Err(SlpError::InvalidRequest(format!(
                "start {} is after end {}",
                self.start, self.end
            )));
        }
        if !self.annual_energy_consumption.is_finite() || self.annual_energy_consumption < 0.0 {
            return Err(SlpError::InvalidRequest(format!(
                "annual energy consumption must be a non-negative number, got {}",
                self.annual_energy_consumption
            )));
        }
        Ok(())
    }

    /// One cache key per calendar year touched by the range.
    pub fn keys(&self) -> impl Iterator<Item = SeriesKey> + '_ {
        (self.start.year()..=self.end.year()).map(|year| {
            SeriesKey::new(
                self.country.clone(),
                self.state.clone(),
                self.profile.clone(),
                year,
            )
        })
    }
}
