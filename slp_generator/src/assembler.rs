//! Concatenate per-day reference columns into a year-long series.

use chrono::{NaiveTime, Timelike};

use crate::{
    calendar::{ClockChange, DayClassification, YearCalendar},
    models::series::{PowerPoint, PowerSeries},
    reference::ReferenceTable,
};

const SKIPPED_FROM: u32 = 2 * 60;
const SKIPPED_TO: u32 = 2 * 60 + 45;
const REPEAT_TO: u32 = 3 * 60;

fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Build the series for every day of `calendar` from `table`.
///
/// Ordinary days contribute 96 points. The spring-forward day drops
/// 02:00–02:45 (92 points). The fall-back day emits 00:00–02:45, then
/// 02:00–03:00 again, then 03:15–23:45 (100 points), so the repeated wall-clock
/// times appear twice in a row.
pub fn assemble(calendar: &YearCalendar, table: &ReferenceTable) -> PowerSeries {
    let mut points = Vec::with_capacity(calendar.days().len() * table.times().len() + 4);
    for day in calendar.days() {
        push_day(&mut points, day, table);
    }
    PowerSeries::new(points)
}

fn push_day(out: &mut Vec<PowerPoint>, day: &DayClassification, table: &ReferenceTable) {
    let values = table.column(day.column());
    let slots = table.times().iter().zip(values).map(|(t, v)| PowerPoint {
        time: day.date.and_time(*t),
        power: *v,
    });

    match day.clock_change {
        None => out.extend(slots),
        Some(ClockChange::ToSummer) => out.extend(slots.filter(|p| {
            let m = minute_of_day(p.time.time());
            !(SKIPPED_FROM..=SKIPPED_TO).contains(&m)
        })),
        Some(ClockChange::ToWinter) => {
            let all: Vec<PowerPoint> = slots.collect();
            out.extend(window(&all, 0, SKIPPED_TO));
            out.extend(window(&all, SKIPPED_FROM, REPEAT_TO));
            out.extend(window(&all, REPEAT_TO + 15, 24 * 60 - 15));
        }
    }
}

/// Points whose time of day lies in `[lo, hi]` minutes, inclusive.
fn window(points: &[PowerPoint], lo: u32, hi: u32) -> impl Iterator<Item = PowerPoint> + '_ {
    points
        .iter()
        .filter(move |p| (lo..=hi).contains(&minute_of_day(p.time.time())))
        .copied()
}
