use crate::models::profile::PERIOD;
use chrono::{NaiveTime, TimeDelta};

/// Render a number of minutes as `HH:MM`, e.g. `1410` -> `23:30`.
pub fn format_duration(minutes: u32) -> String {
    let delta = TimeDelta::minutes(i64::from(minutes));
    format!("{:02}:{:02}", delta.num_hours(), delta.num_minutes() % 60)
}

/// Wall-clock label of a minute offset within its day, e.g. `1500` -> `01:00`.
pub fn clock_time(timestamp: u32) -> String {
    let minute_of_day = timestamp % PERIOD;
    NaiveTime::from_num_seconds_from_midnight_opt(minute_of_day * 60, 0)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(1410), "23:30");
        assert_eq!(format_duration(1440), "24:00");
    }

    #[test]
    fn clock_times() {
        assert_eq!(clock_time(0), "00:00");
        assert_eq!(clock_time(1439), "23:59");
        assert_eq!(clock_time(1500), "01:00");
    }
}
