//! Holiday records as delivered by the upstream calendar and the filtered set
//! used for day-type classification.

use std::{collections::BTreeSet, convert::Infallible, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel state code meaning "the whole country".
pub const ALL_STATES: &str = "all_states";

/// One public holiday entry (Nager.Date wire shape, camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicHoliday {
    /// Calendar date of the holiday.
    pub date: NaiveDate,
    /// Name in the local language.
    #[serde(default)]
    pub local_name: String,
    /// English name.
    #[serde(default)]
    pub name: String,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default)]
    pub country_code: String,
    /// Valid in every state of the country.
    #[serde(default)]
    pub global: bool,
    /// ISO 3166-2 codes of the states the holiday is limited to (`null` when global).
    #[serde(default)]
    pub counties: Option<Vec<String>>,
}

impl PublicHoliday {
    /// Whether `state` is listed explicitly in the jurisdiction list.
    pub fn lists_state(&self, state: &str) -> bool {
        self.counties
            .as_deref()
            .is_some_and(|counties| counties.iter().any(|c| c == state))
    }
}

/// Which part of a country a request is for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StateSelector {
    /// Country-wide: only nationwide holidays count.
    AllStates,
    /// A single state, e.g. `DE-BY`.
    State(String),
}

impl StateSelector {
    /// Parse a state code; [`ALL_STATES`] selects the whole country.
    ///
    /// Any other string (even an empty one) is taken as a state code and is
    /// validated later against the holiday data.
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        if code == ALL_STATES {
            Self::AllStates
        } else {
            Self::State(code.to_string())
        }
    }

    /// Code as used in cache paths and logs.
    pub fn as_str(&self) -> &str {
        match self {
            Self::AllStates => ALL_STATES,
            Self::State(code) => code,
        }
    }
}

impl FromStr for StateSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for StateSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holidays retained for one (country, state, year) request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    /// Build a set from already filtered entries.
    pub fn new(entries: Vec<PublicHoliday>) -> Self {
        Self::from_dates(entries.into_iter().map(|h| h.date))
    }

    /// Set holding exactly `dates`; handy for fixtures and tests.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Whether `date` is a holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Distinct holiday dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    /// Number of distinct dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True when no holiday applies.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
