use std::error::Error as StdError;

use public_holidays::ProviderError;
use thiserror::Error;

use crate::store::StoreError;

/// Coarse classification of failures, for callers deciding how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reference table or holiday data could not be read or fetched.
    SourceUnavailable,
    /// The requested state matches no holiday entry.
    UnknownJurisdiction,
    /// Reading or writing the series cache failed.
    Cache,
    /// Caller supplied inconsistent parameters or configuration.
    InvalidRequest,
    /// Local time could not be mapped to UTC.
    TimeZone,
}

/// The unified error type for the `slp_generator` crate.
#[derive(Debug, Error)]
pub enum SlpError {
    /// A data source (reference table, holiday calendar) failed.
    #[error("{what} unavailable: {source}")]
    SourceUnavailable {
        /// Human-readable name of the source.
        what: String,
        /// Underlying failure.
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The requested state code is not known to the holiday calendar.
    #[error("state {state} not found in public holidays of {country} {year}")]
    UnknownJurisdiction {
        country: String,
        state: String,
        year: i32,
    },

    /// The series cache failed.
    #[error("Series cache error: {0}")]
    Store(#[from] StoreError),

    /// Bad request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Bad configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Local to UTC conversion failed.
    #[error("Time zone conversion failed: {0}")]
    TimeZone(String),
}

impl SlpError {
    /// Which of the [`ErrorKind`]s this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            Self::UnknownJurisdiction { .. } => ErrorKind::UnknownJurisdiction,
            Self::Store(_) => ErrorKind::Cache,
            Self::InvalidRequest(_) | Self::Config(_) => ErrorKind::InvalidRequest,
            Self::TimeZone(_) => ErrorKind::TimeZone,
        }
    }

    pub(crate) fn source_unavailable(
        what: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::SourceUnavailable {
            what: what.into(),
            source: source.into(),
        }
    }
}

impl From<ProviderError> for SlpError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::UnknownJurisdiction {
                country,
                year,
                state,
                ..
            } => Self::UnknownJurisdiction {
                country,
                state,
                year,
            },
            other => Self::source_unavailable("public holidays", other),
        }
    }
}
