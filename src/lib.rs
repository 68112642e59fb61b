//! Energy usage and savings metrics for a single appliance, computed from
//! sparse state-change events.

pub mod models {
    pub mod profile;
}

pub mod energy {
    pub mod day;
    pub mod savings;
    pub mod usage;
}

pub mod config;
pub mod utils;
pub mod services {
    pub mod fake_profile;
    pub mod loader;
    pub mod report;
}

pub use energy::day::{covered_days, daily_usage, usage_for_day, usage_in_day, Day, DayError, DayUsage};
pub use energy::savings::savings;
pub use energy::usage::usage;
pub use models::profile::{Event, Profile, State, PERIOD};
