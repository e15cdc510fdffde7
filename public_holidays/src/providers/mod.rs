//! Provider abstraction for public holiday calendars.
//!
//! A [`HolidayProvider`] returns the complete, unfiltered calendar of one
//! country and year. Concrete sources:
//! - [`nager::NagerProvider`]: REST client for <https://date.nager.at>
//! - [`cached::CacheFirstProvider`]: on-disk cache in front of another provider
//!
//! The trait is object safe, so callers can pick the source at runtime and hold
//! it as `Box<dyn HolidayProvider>`.

pub mod cached;
pub mod nager;

use std::path::PathBuf;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::PublicHoliday;

/// Source of public holiday calendars.
#[async_trait]
pub trait HolidayProvider: Send + Sync {
    /// Fetch every holiday of `country` (ISO 3166-1 alpha-2) in `year`.
    ///
    /// The result is not filtered by state; see [`crate::select_for_state`].
    async fn fetch_holidays(
        &self,
        country: &str,
        year: i32,
    ) -> Result<Vec<PublicHoliday>, ProviderError>;
}

#[async_trait]
impl<P> HolidayProvider for Box<P>
where
    P: HolidayProvider + ?Sized,
{
    async fn fetch_holidays(
        &self,
        country: &str,
        year: i32,
    ) -> Result<Vec<PublicHoliday>, ProviderError> {
        (**self).fetch_holidays(country, year).await
    }
}

/// Errors raised while obtaining or filtering holiday data.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// Network failure, timeout or unreadable response body.
    #[snafu(display("Holiday API request failed: {source}"))]
    Request {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The API answered with a non-success status.
    #[snafu(display("Holiday API returned HTTP {status}: {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// Payload (remote or cached) is not a holiday list.
    #[snafu(display("Could not decode holiday data from {origin}: {source}"))]
    Decode {
        origin: String,
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// Holiday list could not be serialized for the cache.
    #[snafu(display("Could not encode holiday data: {source}"))]
    Encode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// Reading or writing the on-disk cache failed.
    #[snafu(display("I/O error on {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// No holiday entry lists the requested state.
    #[snafu(display("state {state} not found in public holidays of {country} {year}"))]
    UnknownJurisdiction {
        country: String,
        year: i32,
        state: String,
        backtrace: Backtrace,
    },
}

impl ProviderError {
    /// True for [`ProviderError::UnknownJurisdiction`].
    pub fn is_unknown_jurisdiction(&self) -> bool {
        matches!(self, Self::UnknownJurisdiction { .. })
    }
}
