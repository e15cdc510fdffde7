//! Narrowing a country's calendar down to one state.

use snafu::ensure;

use crate::{
    models::{HolidaySet, PublicHoliday, StateSelector},
    providers::{ProviderError, UnknownJurisdictionSnafu},
};

/// Keep the holidays that apply to `state`.
///
/// - [`StateSelector::AllStates`]: nationwide holidays only.
/// - [`StateSelector::State`]: nationwide holidays plus those listing the state.
///   Fails if no entry at all lists the state.
pub fn select_for_state(
    holidays: Vec<PublicHoliday>,
    country: &str,
    year: i32,
    state: &StateSelector,
) -> Result<HolidaySet, ProviderError> {
    let retained = match state {
        StateSelector::AllStates => holidays.into_iter().filter(|h| h.global).collect(),
        StateSelector::State(code) => {
            ensure!(
                holidays.iter().any(|h| h.lists_state(code)),
                UnknownJurisdictionSnafu {
                    country,
                    year,
                    state: code.as_str(),
                }
            );
            holidays
                .into_iter()
                .filter(|h| h.global || h.lists_state(code))
                .collect()
        }
    };
    Ok(HolidaySet::new(retained))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn holiday(m: u32, d: u32, counties: Option<&[&str]>) -> PublicHoliday {
        PublicHoliday {
            date: NaiveDate::from_ymd_opt(2020, m, d).unwrap(),
            local_name: String::new(),
            name: String::new(),
            country_code: "DE".into(),
            global: counties.is_none(),
            counties: counties.map(|c| c.iter().map(|s| s.to_string()).collect()),
        }
    }

    fn calendar() -> Vec<PublicHoliday> {
        vec![
            holiday(1, 1, None),
            holiday(1, 6, Some(&["DE-BW", "DE-BY", "DE-ST"])),
            holiday(10, 31, Some(&["DE-BB", "DE-SN"])),
            holiday(12, 25, None),
        ]
    }

    #[test]
    fn all_states_keeps_global_only() {
        let set = select_for_state(calendar(), "DE", 2020, &StateSelector::AllStates).unwrap();
        let dates: Vec<_> = set.dates().map(|d| d.to_string()).collect();
        assert_eq!(dates, ["2020-01-01", "2020-12-25"]);
    }

    #[test]
    fn state_keeps_global_and_listed() {
        let set =
            select_for_state(calendar(), "DE", 2020, &StateSelector::parse("DE-BY")).unwrap();
        let dates: Vec<_> = set.dates().map(|d| d.to_string()).collect();
        assert_eq!(dates, ["2020-01-01", "2020-01-06", "2020-12-25"]);
    }

    #[test]
    fn unknown_state_is_rejected() {
        let err = select_for_state(calendar(), "DE", 2020, &StateSelector::parse("DE-XX"))
            .unwrap_err();
        assert!(err.is_unknown_jurisdiction());
        assert!(err.to_string().contains("DE-XX"));
    }

    #[test]
    fn empty_state_is_rejected() {
        let err =
            select_for_state(calendar(), "DE", 2020, &StateSelector::parse("")).unwrap_err();
        assert!(err.is_unknown_jurisdiction());
    }

    #[test]
    fn empty_calendar_country_wide_is_empty_set() {
        let set = select_for_state(Vec::new(), "XX", 2020, &StateSelector::AllStates).unwrap();
        assert!(set.is_empty());
    }
}
