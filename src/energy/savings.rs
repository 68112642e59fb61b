//! Minutes saved by the automatic cutoff device.
//!
//! A savings span opens on an `auto-off` and closes on the next `on` that pairs
//! with it. Manual `off` events in between are noise: the device already cut the
//! appliance, so the span keeps running.

use crate::models::profile::{Event, Profile, State, Window};
use log::{debug, trace};

/// Minutes the appliance spent switched off by the device during a single day.
pub fn savings(profile: &Profile) -> u32 {
    saved_minutes(profile, Window::single_day())
}

pub(crate) fn saved_minutes(profile: &Profile, window: Window) -> u32 {
    if window.is_empty() || profile.is_constant(State::On) || profile.is_constant(State::Off) {
        return 0;
    }
    if profile.is_constant(State::AutoOff) {
        return window.len();
    }

    let relevant: Vec<Event> = profile
        .events
        .iter()
        .copied()
        .filter(|e| matches!(e.state, State::On | State::AutoOff))
        .collect();

    let mut total = 0u32;

    // A savings span ends at the next `on` or `auto-off`, else at the window end.
    if profile.initial == State::AutoOff {
        let closed_at = relevant.first().map_or(window.upper, |e| e.timestamp);
        total = total.saturating_add(closed_at.saturating_sub(window.lower));
    }

    // auto-off timestamps still waiting for an `on`, nearest on top
    let mut open: Vec<u32> = Vec::new();
    for event in &relevant {
        match event.state {
            State::AutoOff => open.push(event.timestamp),
            State::On => {
                if let Some(opened_at) = open.pop() {
                    let span = event.timestamp.saturating_sub(opened_at);
                    trace!("savings span [{}, {}) = {}", opened_at, event.timestamp, span);
                    total = total.saturating_add(span);
                }
            }
            State::Off => {}
        }
    }

    if let Some(last) = relevant.last()
        && last.state == State::AutoOff
    {
        total = total.saturating_add(window.upper.saturating_sub(last.timestamp));
    }

    if total > window.len() {
        debug!(
            "savings of {} minutes exceeds window [{}, {}]; clamping",
            total, window.lower, window.upper
        );
        return window.len();
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::PERIOD;
    use crate::services::fake_profile::{day_profile, FakeOptions};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn profile(initial: State, events: &[(State, u32)]) -> Profile {
        Profile::new(initial, events.iter().map(|&(s, t)| Event::new(s, t)).collect())
    }

    #[test]
    fn constant_profiles() {
        assert_eq!(savings(&profile(State::On, &[])), 0);
        assert_eq!(savings(&profile(State::Off, &[])), 0);
        assert_eq!(savings(&profile(State::AutoOff, &[])), PERIOD);
        assert_eq!(savings(&profile(State::AutoOff, &[(State::AutoOff, 500)])), PERIOD);
        assert_eq!(savings(&profile(State::On, &[(State::On, 500)])), 0);
    }

    #[test]
    fn manual_off_only_saves_nothing() {
        let p = profile(State::On, &[(State::Off, 100), (State::On, 200), (State::Off, 300)]);
        assert_eq!(savings(&p), 0);
    }

    #[test]
    fn auto_off_closed_by_on() {
        let p = profile(State::On, &[(State::AutoOff, 100), (State::On, 250), (State::Off, 300)]);
        assert_eq!(savings(&p), 150);
    }

    #[test]
    fn manual_off_after_auto_off_still_counts() {
        let p = profile(State::On, &[(State::AutoOff, 100), (State::Off, 150), (State::On, 200)]);
        assert_eq!(savings(&p), 100);
    }

    #[test]
    fn initial_auto_off_runs_until_first_relevant_event() {
        let p = profile(State::AutoOff, &[(State::Off, 40), (State::On, 90), (State::Off, 300)]);
        assert_eq!(savings(&p), 90);
    }

    #[test]
    fn initial_auto_off_without_on_runs_to_window_end() {
        let p = profile(State::AutoOff, &[(State::Off, 40)]);
        assert_eq!(savings(&p), PERIOD);

        let p = profile(State::AutoOff, &[(State::Off, 40), (State::Off, 900)]);
        assert_eq!(savings(&p), PERIOD);
    }

    #[test]
    fn huge_nested_matches_clamp_to_the_window() {
        let events: Vec<Event> = (0..9000)
            .flat_map(|_| [Event::new(State::AutoOff, 0), Event::new(State::On, 525_600)])
            .collect();
        let p = Profile::new(State::On, events);
        assert_eq!(saved_minutes(&p, Window::single_day()), PERIOD);
    }

    #[test]
    fn trailing_auto_off_runs_to_end_of_day() {
        let p = profile(State::Off, &[(State::On, 100), (State::AutoOff, 1000)]);
        assert_eq!(savings(&p), 440);

        let p = profile(State::On, &[(State::AutoOff, 1000), (State::Off, 1200)]);
        assert_eq!(savings(&p), 440);
    }

    #[test]
    fn on_pairs_with_nearest_unconsumed_auto_off() {
        let p = profile(
            State::On,
            &[(State::AutoOff, 100), (State::On, 200), (State::On, 300), (State::AutoOff, 400), (State::On, 460)],
        );
        assert_eq!(savings(&p), 100 + 60);
    }

    #[test]
    fn mixed_day() {
        let p = profile(
            State::AutoOff,
            &[
                (State::On, 60),
                (State::Off, 120),
                (State::On, 180),
                (State::AutoOff, 600),
                (State::Off, 620),
                (State::On, 700),
                (State::AutoOff, 1400),
            ],
        );
        assert_eq!(savings(&p), 60 + 100 + 40);
    }

    #[test]
    fn savings_stay_within_the_day() {
        let mut rng = SmallRng::seed_from_u64(0x5eed_0002);
        let options = FakeOptions::default();
        for _ in 0..500 {
            let p = day_profile(&mut rng, &options);
            let saved = savings(&p);
            assert!(saved <= PERIOD, "profile: {:?}", p);
            assert_eq!(saved, savings(&p));
        }
    }
}
