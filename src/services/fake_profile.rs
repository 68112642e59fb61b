//! Deterministic synthetic profiles for demos and property checks.

use crate::models::profile::{Event, Profile, State, PERIOD};
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct FakeOptions {
    /// Emit `auto-off` as well as `on`/`off`.
    pub auto_off: bool,
    pub max_events_per_day: usize,
    /// Chance that an event repeats the previous event's state.
    pub duplicate_chance: f64,
}

impl Default for FakeOptions {
    fn default() -> Self {
        FakeOptions {
            auto_off: true,
            max_events_per_day: 12,
            duplicate_chance: 0.15,
        }
    }
}

/// Month profile for `days` days, seeded so the same seed yields the same profile.
pub fn seeded_month(seed: u64, options: &FakeOptions, days: u32) -> Profile {
    let mut rng = SmallRng::seed_from_u64(seed);
    let profile = month_profile(&mut rng, options, days);
    info!(
        "Fake data: generated {} event(s) over {} day(s) (seed={:#x}, auto_off={})",
        profile.events.len(),
        days,
        seed,
        options.auto_off
    );
    profile
}

pub fn day_profile(rng: &mut SmallRng, options: &FakeOptions) -> Profile {
    let initial = random_state(rng, options);
    let count = rng.random_range(0..=options.max_events_per_day);
    let events = random_events(rng, options, initial, count, 0, PERIOD);
    Profile::new(initial, events)
}

pub fn month_profile(rng: &mut SmallRng, options: &FakeOptions, days: u32) -> Profile {
    let days = days.max(1);
    let initial = random_state(rng, options);
    let count: usize = (0..days)
        .map(|_| rng.random_range(0..=options.max_events_per_day))
        .sum();
    let events = random_events(rng, options, initial, count, 0, PERIOD * days);
    Profile::new(initial, events)
}

/// `count` events with sorted timestamps in `[lower, upper)`.
fn random_events(
    rng: &mut SmallRng,
    options: &FakeOptions,
    initial: State,
    count: usize,
    lower: u32,
    upper: u32,
) -> Vec<Event> {
    let mut timestamps: Vec<u32> = (0..count).map(|_| rng.random_range(lower..upper)).collect();
    timestamps.sort_unstable();

    let mut previous = initial;
    timestamps
        .into_iter()
        .map(|timestamp| {
            let state = if rng.random_bool(options.duplicate_chance) {
                previous
            } else {
                next_state(rng, options, previous)
            };
            previous = state;
            Event::new(state, timestamp)
        })
        .collect()
}

fn random_state(rng: &mut SmallRng, options: &FakeOptions) -> State {
    let variants = if options.auto_off { 3 } else { 2 };
    match rng.random_range(0..variants) {
        0 => State::On,
        1 => State::Off,
        _ => State::AutoOff,
    }
}

/// A state different from `previous`.
fn next_state(rng: &mut SmallRng, options: &FakeOptions, previous: State) -> State {
    match previous {
        State::On if options.auto_off && rng.random_bool(0.5) => State::AutoOff,
        State::On => State::Off,
        State::Off | State::AutoOff => {
            if options.auto_off && rng.random_bool(0.2) {
                // manual off after an auto-off and vice versa
                if previous == State::Off { State::AutoOff } else { State::Off }
            } else {
                State::On
            }
        }
    }
}
