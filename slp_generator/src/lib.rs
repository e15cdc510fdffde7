//! Standard load profile (SLP) synthesis.
//!
//! Pipeline for one (country, state, profile type, year):
//! 1. [`calendar`] classifies every day into season and day type and flags the
//!    two clock-change days,
//! 2. [`assembler`] stitches the matching reference-table columns into a
//!    quarter-hour series,
//! 3. [`dynamic_sampling`] applies the seasonal drift correction to household
//!    profiles,
//! 4. [`resolver`] serves the result from a [`store::SeriesStore`] when present
//!    and writes freshly generated years back.
//!
//! [`generator::SlpGenerator`] sits on top: it spans multiple years, slices the
//! requested dates and scales to an annual energy.

pub mod assembler;
pub mod calendar;
pub mod config;
pub mod dynamic_sampling;
pub mod error;
pub mod generator;
pub mod models;
pub mod reference;
pub mod resolver;
pub mod store;
pub mod tz;

pub use error::{ErrorKind, SlpError};
pub use generator::SlpGenerator;
pub use models::{
    key::SeriesKey,
    profile::{DayType, ProfileColumn, ProfileType, Season},
    request::LoadProfileRequest,
    series::{PowerPoint, PowerSeries},
};
pub use resolver::CacheResolver;
