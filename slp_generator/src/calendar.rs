//! Day classification for one year.
//!
//! Every date gets a [`Season`] and a [`DayType`]; the last Sunday before
//! April 1 and the last Sunday before November 1 are flagged as clock-change
//! days. Precedence of the day-type rules:
//! 1. weekday (Mon–Fri workday, Sat Saturday, Sun Sunday/holiday)
//! 2. public holiday -> Sunday/holiday
//! 3. Dec 24 and Dec 31 -> Saturday, unless already a holiday
//!
//! Clock-change days are derived from the plain weekday, so a holiday falling
//! on that Sunday does not move them.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use public_holidays::{HolidayProvider, HolidaySet, StateSelector, holidays_for};
use tracing::{debug, warn};

use crate::{
    error::SlpError,
    models::profile::{DayType, ProfileColumn, Season},
};

/// The two annual clock changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockChange {
    /// Spring forward, the day loses 02:00–02:45.
    ToSummer,
    /// Fall back, the day repeats 02:00–02:45.
    ToWinter,
}

/// Classification of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClassification {
    pub date: NaiveDate,
    pub season: Season,
    pub day_type: DayType,
    pub clock_change: Option<ClockChange>,
}

impl DayClassification {
    pub fn is_clock_change_to_summer(&self) -> bool {
        self.clock_change == Some(ClockChange::ToSummer)
    }

    pub fn is_clock_change_to_winter(&self) -> bool {
        self.clock_change == Some(ClockChange::ToWinter)
    }

    /// Reference-table column this day draws its values from.
    pub fn column(&self) -> ProfileColumn {
        ProfileColumn::new(self.season, self.day_type)
    }
}

/// All days of one year, Jan 1 first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearCalendar {
    year: i32,
    days: Vec<DayClassification>,
}

impl YearCalendar {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn days(&self) -> &[DayClassification] {
        &self.days
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayClassification> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn spring_forward_day(&self) -> Option<&DayClassification> {
        self.days.iter().find(|d| d.is_clock_change_to_summer())
    }

    pub fn fall_back_day(&self) -> Option<&DayClassification> {
        self.days.iter().find(|d| d.is_clock_change_to_winter())
    }
}

/// Season bucket of a date.
pub fn season_of(date: NaiveDate) -> Season {
    let md = (date.month(), date.day());
    if md <= (3, 20) || md >= (11, 1) {
        Season::Winter
    } else if (5, 15) <= md && md <= (9, 14) {
        Season::Summer
    } else {
        Season::Transition
    }
}

/// Day type from the weekday alone.
pub fn weekday_day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::SundayHoliday,
        _ => DayType::Workday,
    }
}

fn is_special_eve(date: NaiveDate) -> bool {
    date.month() == 12 && matches!(date.day(), 24 | 31)
}

/// Latest Sunday strictly before the first of `month`.
fn last_sunday_before(year: i32, month: u32) -> Result<NaiveDate, SlpError> {
    let eve = NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .ok_or_else(|| invalid_year(year))?;
    let back = u64::from(eve.weekday().num_days_from_sunday());
    eve.checked_sub_days(Days::new(back))
        .ok_or_else(|| invalid_year(year))
}

fn invalid_year(year: i32) -> SlpError {
    SlpError::InvalidRequest(format!("year {year} is outside the supported calendar"))
}

/// Spring-forward and fall-back dates of `year`.
pub fn clock_change_days(year: i32) -> Result<(NaiveDate, NaiveDate), SlpError> {
    Ok((last_sunday_before(year, 4)?, last_sunday_before(year, 11)?))
}

/// Classify every day of `year` against an already filtered holiday set.
///
/// An empty `holidays` set is allowed; the year is then treated as
/// holiday-free and a warning is logged.
pub fn classify_days(year: i32, holidays: &HolidaySet) -> Result<YearCalendar, SlpError> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| invalid_year(year))?;
    let (to_summer, to_winter) = clock_change_days(year)?;

    if holidays.is_empty() {
        warn!(year, "no public holiday considered");
    }

    let days: Vec<DayClassification> = first
        .iter_days()
        .take_while(|d| d.year() == year)
        .map(|date| {
            let day_type = if holidays.contains(date) {
                DayType::SundayHoliday
            } else if is_special_eve(date) {
                DayType::Saturday
            } else {
                weekday_day_type(date)
            };
            let clock_change = if date == to_summer {
                Some(ClockChange::ToSummer)
            } else if date == to_winter {
                Some(ClockChange::ToWinter)
            } else {
                None
            };
            DayClassification {
                date,
                season: season_of(date),
                day_type,
                clock_change,
            }
        })
        .collect();

    debug!(year, days = days.len(), %to_summer, %to_winter, "classified calendar");
    Ok(YearCalendar { year, days })
}

/// Fetch the holidays for `country`/`state` and classify `year`.
pub async fn classify<P>(
    provider: &P,
    year: i32,
    country: &str,
    state: &StateSelector,
) -> Result<YearCalendar, SlpError>
where
    P: HolidayProvider + ?Sized,
{
    let holidays = holidays_for(provider, country, year, state).await?;
    classify_days(year, &holidays)
}
