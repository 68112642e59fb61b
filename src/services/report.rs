//! Summaries of a profile, rendered as text or JSON.

use crate::energy::day::{covered_days, daily_usage, days_in, Day, DayUsage};
use crate::energy::savings::savings;
use crate::energy::usage::usage;
use crate::models::profile::{Profile, State};
use crate::utils::{clock_time, format_duration};
use serde::Serialize;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Day {
        initial: State,
        events: usize,
        usage: u32,
        /// Only present when the profile carries `auto-off` events.
        #[serde(skip_serializing_if = "Option::is_none")]
        savings: Option<u32>,
    },
    Month {
        initial: State,
        events: usize,
        days: Vec<DayUsage>,
        total: u32,
    },
}

impl Report {
    pub fn for_day(profile: &Profile) -> Self {
        let saved = profile.contains_state(State::AutoOff).then(|| savings(profile));
        Report::Day {
            initial: profile.initial,
            events: profile.events.len(),
            usage: usage(profile),
            savings: saved,
        }
    }

    /// Every covered day of the month, or just `only` when given.
    pub fn for_month(profile: &Profile, only: Option<Day>) -> Self {
        let days = match only {
            Some(day) => daily_usage(profile, [day]),
            None => daily_usage(profile, days_in(covered_days(profile))),
        };
        let total = days.iter().map(|d| d.minutes).sum();
        Report::Month {
            initial: profile.initial,
            events: profile.events.len(),
            days,
            total,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text rendering; `profile` supplies the last event of a day report.
    pub fn text<'a>(&'a self, profile: &'a Profile) -> TextReport<'a> {
        TextReport { report: self, profile }
    }

    pub fn to_text(&self, profile: &Profile) -> String {
        self.text(profile).to_string()
    }
}

pub struct TextReport<'a> {
    report: &'a Report,
    profile: &'a Profile,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.report {
            Report::Day {
                initial,
                events,
                usage,
                savings,
            } => {
                writeln!(f, "day profile: initial {}, {} event(s)", initial, events)?;
                if let Some(last) = self.profile.events.last() {
                    writeln!(f, "last event:  {} at {}", last.state, clock_time(last.timestamp))?;
                }
                writeln!(f, "usage:       {} ({} min)", format_duration(*usage), usage)?;
                if let Some(saved) = savings {
                    writeln!(f, "savings:     {} ({} min)", format_duration(*saved), saved)?;
                }
            }
            Report::Month {
                initial,
                events,
                days,
                total,
            } => {
                writeln!(f, "month profile: initial {}, {} event(s)", initial, events)?;
                for d in days {
                    writeln!(f, "day {:>3}: {} ({} min)", d.day, format_duration(d.minutes), d.minutes)?;
                }
                writeln!(f, "total:   {} min over {} day(s)", total, days.len())?;
            }
        }
        Ok(())
    }
}
