//! Seasonal drift correction for household profiles.
//!
//! The reference tables describe an average day per column; real household
//! demand drifts over the year. Each point is multiplied by a fourth-order
//! polynomial in the day of the year.

use chrono::Datelike;

use crate::models::{profile::ProfileType, series::PowerSeries};

const A4: f64 = -3.92e-10;
const A3: f64 = 3.2e-7;
const A2: f64 = -7.02e-5;
const A1: f64 = 2.1e-3;
const A0: f64 = 1.24;

/// Correction factor for the 1-based day of the year.
pub fn factor(day_of_year: u32) -> f64 {
    let d = f64::from(day_of_year);
    A4 * d.powi(4) + A3 * d.powi(3) + A2 * d.powi(2) + A1 * d + A0
}

/// Whether `profile` gets the correction (household family only).
pub fn applies_to(profile: &ProfileType) -> bool {
    profile.is_household()
}

/// Multiply every point by the factor of its day. No rounding.
pub fn adjust(series: PowerSeries) -> PowerSeries {
    series
        .into_points()
        .into_iter()
        .map(|mut p| {
            p.power *= factor(p.time.ordinal());
            p
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::*;
    use crate::models::series::PowerPoint;

    #[test]
    fn factor_at_known_days() {
        assert!((factor(1) - 1.2420301).abs() < 1e-6);
        // below 1 in summer, above 1 in winter
        assert!(factor(180) < 1.0);
        assert!(factor(365) > 1.1);
    }

    #[test]
    fn only_households_are_adjusted() {
        assert!(applies_to(&ProfileType::new("H0").unwrap()));
        assert!(!applies_to(&ProfileType::new("G0").unwrap()));
        assert!(!applies_to(&ProfileType::new("L2").unwrap()));
    }

    proptest! {
        #[test]
        fn adjust_is_pointwise_multiplication(
            ordinals in prop::collection::vec(1u32..=366, 1..50),
            powers in prop::collection::vec(-1000.0f64..1000.0, 50),
        ) {
            let points: Vec<PowerPoint> = ordinals
                .iter()
                .zip(&powers)
                .map(|(o, p)| PowerPoint {
                    time: NaiveDate::from_yo_opt(2020, *o).unwrap().and_hms_opt(12, 0, 0).unwrap(),
                    power: *p,
                })
                .collect();
            let adjusted = adjust(PowerSeries::new(points.clone()));

            prop_assert_eq!(adjusted.len(), points.len());
            for (before, after) in points.iter().zip(adjusted.iter()) {
                prop_assert_eq!(after.time, before.time);
                prop_assert_eq!(after.power, before.power * factor(before.time.ordinal()));
            }
        }
    }
}
