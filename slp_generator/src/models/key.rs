use std::fmt;

use public_holidays::StateSelector;

use crate::models::profile::ProfileType;

/// Identifies one cached per-year series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    /// ISO 3166-1 alpha-2 code, e.g. `DE`.
    pub country: String,
    pub state: StateSelector,
    pub profile: ProfileType,
    pub year: i32,
}

impl SeriesKey {
    pub fn new(
        country: impl Into<String>,
        state: StateSelector,
        profile: ProfileType,
        year: i32,
    ) -> Self {
        Self {
            country: country.into(),
            state,
            profile,
            year,
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.country, self.state, self.profile, self.year
        )
    }
}
