//! Appliance event profiles.
//!
//! Notes
//! - Timestamps are whole minutes from an epoch: the start of the day for a
//!   single-day profile, the start of the month for a month profile.
//! - Events are expected in ascending timestamp order. Nothing here re-sorts them.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of minutes in one day.
pub const PERIOD: u32 = 1440;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum State {
    On,
    /// Switched off manually.
    Off,
    /// Switched off by the energy-saving device.
    AutoOff,
}

impl State {
    pub fn as_str(self) -> &'static str {
        match self {
            State::On => "on",
            State::Off => "off",
            State::AutoOff => "auto-off",
        }
    }

    /// On and Off swap, AutoOff is left alone.
    pub fn flipped(self) -> State {
        match self {
            State::On => State::Off,
            State::Off => State::On,
            State::AutoOff => State::AutoOff,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub state: State,
    pub timestamp: u32,
}

impl Event {
    pub fn new(state: State, timestamp: u32) -> Self {
        Event { state, timestamp }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub initial: State,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Profile {
    pub fn new(initial: State, events: Vec<Event>) -> Self {
        Profile { initial, events }
    }

    /// True when the initial state and every event share `state`.
    pub fn is_constant(&self, state: State) -> bool {
        self.initial == state && self.events.iter().all(|e| e.state == state)
    }

    pub fn contains_state(&self, state: State) -> bool {
        self.initial == state || self.events.iter().any(|e| e.state == state)
    }

    /// Copy of the profile with every On/Off swapped, initial state included.
    pub fn flipped(&self) -> Profile {
        Profile {
            initial: self.initial.flipped(),
            events: self
                .events
                .iter()
                .map(|e| Event::new(e.state.flipped(), e.timestamp))
                .collect(),
        }
    }
}

/// Closed minute range `[lower, upper]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub lower: u32,
    pub upper: u32,
}

impl Window {
    pub fn new(lower: u32, upper: u32) -> Self {
        Window { lower, upper }
    }

    /// `[0, PERIOD]`, the window of a single-day profile.
    pub fn single_day() -> Self {
        Window::new(0, PERIOD)
    }

    pub fn len(&self) -> u32 {
        self.upper.saturating_sub(self.lower)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Both ends inclusive.
    pub fn contains(&self, timestamp: u32) -> bool {
        timestamp >= self.lower && timestamp <= self.upper
    }
}
