//! Per-day usage sliced out of a month-long profile.
//!
//! Month timestamps count minutes from midnight of day 1. Days are uniform,
//! `PERIOD` minutes long, numbered from 1 to 365.

use crate::energy::usage::on_minutes;
use crate::models::profile::{Event, Profile, State, Window, PERIOD};
use core::fmt;
use log::debug;
use serde::Serialize;
use std::error::Error;
use std::ops::RangeInclusive;

pub const FIRST_DAY: u32 = 1;
pub const LAST_DAY: u32 = 365;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DayError {
    /// The day has a fractional part (or is not a finite number at all).
    NonIntegerDay,
    /// The day is a whole number outside `FIRST_DAY..=LAST_DAY`.
    DayOutOfRange,
}

impl fmt::Display for DayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayError::NonIntegerDay => write!(f, "must be an integer"),
            DayError::DayOutOfRange => write!(f, "day out of range"),
        }
    }
}

impl Error for DayError {}

/// A validated 1-based day number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Day(u32);

impl Day {
    pub fn new(day: i64) -> Result<Self, DayError> {
        if day < i64::from(FIRST_DAY) || day > i64::from(LAST_DAY) {
            return Err(DayError::DayOutOfRange);
        }
        Ok(Day(day as u32))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// `[PERIOD * (day - 1), PERIOD * day]`, both ends inclusive.
    pub fn window(self) -> Window {
        Window::new(PERIOD * (self.0 - 1), PERIOD * self.0)
    }

    /// Day whose window starts at or before `timestamp` and ends after it.
    fn containing(timestamp: u32) -> Day {
        Day((timestamp / PERIOD + 1).min(LAST_DAY))
    }
}

impl TryFrom<i64> for Day {
    type Error = DayError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Day::new(value)
    }
}

impl TryFrom<f64> for Day {
    type Error = DayError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(DayError::NonIntegerDay);
        }
        if value < f64::from(FIRST_DAY) || value > f64::from(LAST_DAY) {
            return Err(DayError::DayOutOfRange);
        }
        Ok(Day(value as u32))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct DayUsage {
    pub day: Day,
    pub minutes: u32,
}

/// ON minutes for `day` of a month profile.
///
/// Fails when `day` is not a whole number or falls outside `1..=365`.
pub fn usage_for_day(profile: &Profile, day: f64) -> Result<u32, DayError> {
    let day = Day::try_from(day)?;
    Ok(usage_in_day(profile, day))
}

pub fn usage_in_day(profile: &Profile, day: Day) -> u32 {
    let window = day.window();
    let events = &profile.events;

    // Data ends before this day and the appliance was left on.
    if let Some(last) = events.last()
        && last.timestamp < window.lower
        && last.state == State::On
    {
        debug!("day {}: last event at {} left the appliance on", day, last.timestamp);
        return PERIOD;
    }

    let day_events: Vec<Event> = events.iter().copied().filter(|e| window.contains(e.timestamp)).collect();

    // The day opens in the state of the event just before its first event.
    // Without such an event (or without any event in the day) the month's
    // initial state applies.
    let initial = events
        .iter()
        .position(|e| window.contains(e.timestamp))
        .and_then(|first| first.checked_sub(1))
        .map_or(profile.initial, |previous| events[previous].state);

    debug!(
        "day {}: window [{}, {}], initial {}, {} event(s)",
        day,
        window.lower,
        window.upper,
        initial,
        day_events.len()
    );

    on_minutes(&Profile::new(initial, day_events), window)
}

/// Days from day 1 through the day holding the month's last event.
pub fn covered_days(profile: &Profile) -> RangeInclusive<Day> {
    let last = profile.events.last().map_or(Day(FIRST_DAY), |e| Day::containing(e.timestamp));
    Day(FIRST_DAY)..=last
}

pub fn daily_usage<I>(profile: &Profile, days: I) -> Vec<DayUsage>
where
    I: IntoIterator<Item = Day>,
{
    days.into_iter()
        .map(|day| DayUsage {
            day,
            minutes: usage_in_day(profile, day),
        })
        .collect()
}

/// Every day in `range`, for feeding [`daily_usage`].
pub fn days_in(range: RangeInclusive<Day>) -> impl Iterator<Item = Day> {
    let (start, end) = range.into_inner();
    (start.number()..=end.number()).map(Day)
}
