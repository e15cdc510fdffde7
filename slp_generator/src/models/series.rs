//! Quarter-hour power series.
//!
//! Timestamps are local wall-clock times. On the spring-forward day the hour
//! 02:00–02:45 is missing; on the fall-back day it appears twice, in clock
//! order (first and second occurrence back to back). [`PowerSeries::to_utc`]
//! turns this into unambiguous instants.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{
    error::SlpError,
    tz::{Occurrence, local_to_utc},
};

/// One quarter-hour value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerPoint {
    /// Local wall-clock start of the quarter hour.
    pub time: NaiveDateTime,
    pub power: f64,
}

/// Ordered sequence of [`PowerPoint`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerSeries {
    points: Vec<PowerPoint>,
}

/// Round to one decimal.
///
/// Rounds the exact binary value, so `0.35` (stored just below) becomes `0.3`;
/// exact ties go to the even digit.
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

impl PowerSeries {
    pub fn new(points: Vec<PowerPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PowerPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<PowerPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PowerPoint> {
        self.points.iter()
    }

    /// Points stamped on `date`, in series order.
    pub fn on_date(&self, date: NaiveDate) -> impl Iterator<Item = &PowerPoint> + '_ {
        self.points.iter().filter(move |p| p.time.date() == date)
    }

    /// Append `other` after the last point.
    pub fn append(&mut self, other: PowerSeries) {
        self.points.extend(other.points);
    }

    /// Keep points whose date lies in `[start, end]`.
    pub fn between_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.points.retain(|p| {
            let d = p.time.date();
            start <= d && d <= end
        });
        self
    }

    /// Multiply every value by `factor` and round to one decimal.
    pub fn scaled(mut self, factor: f64) -> Self {
        for p in &mut self.points {
            p.power = round_to_tenth(p.power * factor);
        }
        self
    }

    /// Map local stamps to UTC under `tz`.
    ///
    /// A clock time that occurs twice resolves to the earlier instant the first
    /// time it is seen and to the later instant afterwards.
    pub fn to_utc(&self, tz: Tz) -> Result<Vec<(DateTime<Utc>, f64)>, SlpError> {
        let mut seen = HashSet::new();
        self.points
            .iter()
            .map(|p| {
                let occurrence = if seen.insert(p.time) {
                    Occurrence::First
                } else {
                    Occurrence::Second
                };
                Ok((local_to_utc(p.time, tz, occurrence)?, p.power))
            })
            .collect()
    }
}

impl FromIterator<PowerPoint> for PowerSeries {
    fn from_iter<I: IntoIterator<Item = PowerPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PowerSeries {
    type Item = &'a PowerPoint;
    type IntoIter = std::slice::Iter<'a, PowerPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    fn point(d: u32, h: u32, power: f64) -> PowerPoint {
        PowerPoint {
            time: NaiveDate::from_ymd_opt(2020, 1, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
            power,
        }
    }

    #[test]
    fn date_slice_is_inclusive() {
        let series: PowerSeries = (1..=5).map(|d| point(d, 12, 1.0)).collect();
        let sliced = series.between_dates(
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 4).unwrap(),
        );
        let days: Vec<u32> = sliced.iter().map(|p| p.time.day()).collect();
        assert_eq!(days, [2, 3, 4]);
    }

    #[test]
    fn scaling_rounds_to_one_decimal() {
        let series = PowerSeries::new(vec![point(1, 0, 12.345), point(1, 1, 0.05), point(1, 2, -0.25)]);
        let scaled = series.scaled(2.0);
        let values: Vec<f64> = scaled.iter().map(|p| p.power).collect();
        assert_eq!(values, [24.7, 0.1, -0.5]);
    }

    #[test]
    fn rounding_follows_the_stored_binary_value() {
        assert_eq!(round_to_tenth(70.3 * 0.5), 35.1);
        assert_eq!(round_to_tenth(0.35), 0.3);
        assert_eq!(round_to_tenth(1.45), 1.4);
        assert_eq!(round_to_tenth(0.25), 0.2);
        assert_eq!(round_to_tenth(-2.25), -2.2);
        assert_eq!(round_to_tenth(41.96), 42.0);
    }

    #[test]
    fn repeated_clock_time_maps_to_both_instants() {
        let t = NaiveDate::from_ymd_opt(2020, 10, 25)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let series = PowerSeries::new(vec![
            PowerPoint { time: t, power: 1.0 },
            PowerPoint { time: t, power: 2.0 },
        ]);

        let utc = series.to_utc(chrono_tz::Europe::Berlin).unwrap();
        assert_eq!(utc[0].0.to_rfc3339(), "2020-10-25T00:30:00+00:00");
        assert_eq!(utc[1].0.to_rfc3339(), "2020-10-25T01:30:00+00:00");
    }
}
