//! Public holiday calendars per country and year.
//!
//! Holidays come from a [`HolidayProvider`]; [`NagerProvider`] talks to the
//! public Nager.Date API and [`CacheFirstProvider`] puts an on-disk cache in
//! front of any provider. [`holidays_for`] narrows the raw calendar down to the
//! entries that apply to one state (or to the whole country).

pub mod jurisdiction;
pub mod models;
pub mod providers;

pub use jurisdiction::select_for_state;
pub use models::{ALL_STATES, HolidaySet, PublicHoliday, StateSelector};
pub use providers::{
    HolidayProvider, ProviderError, cached::CacheFirstProvider, nager::NagerProvider,
};

/// Fetch the calendar for `country`/`year` and keep the entries valid in `state`.
///
/// Errors:
/// - anything the provider fails with (network, API status, undecodable data)
/// - [`ProviderError::UnknownJurisdiction`] if `state` names a region that no
///   holiday entry lists
pub async fn holidays_for<P>(
    provider: &P,
    country: &str,
    year: i32,
    state: &StateSelector,
) -> Result<HolidaySet, ProviderError>
where
    P: HolidayProvider + ?Sized,
{
    let raw = provider.fetch_holidays(country, year).await?;
    select_for_state(raw, country, year, state)
}
