//! ON-time accumulation over a bounded window.

use crate::models::profile::{Profile, State, Window};
use log::{debug, trace};

/// Minutes the appliance spent ON during a single day, window `[0, PERIOD]`.
pub fn usage(profile: &Profile) -> u32 {
    on_minutes(profile, Window::single_day())
}

/// Minutes the appliance spent ON inside `window`.
///
/// Every span between two consecutive events is billed once, to the state that
/// was active while it lasted. The span before the first event belongs to
/// `initial` and the span after the last event to the last event's state.
///
/// A profile with exactly one event only bills the span after that event. When
/// the appliance never changes state the whole window is resolved up front.
pub fn on_minutes(profile: &Profile, window: Window) -> u32 {
    if window.is_empty() {
        return 0;
    }
    if profile.is_constant(State::On) {
        return window.len();
    }
    if profile.is_constant(State::Off) {
        return 0;
    }

    let total = match profile.events.as_slice() {
        [] => 0,
        [only] => {
            if only.state == State::On {
                window.upper.saturating_sub(only.timestamp)
            } else {
                0
            }
        }
        [first, .., last] => {
            let mut total = 0u32;
            if profile.initial == State::On {
                total = total.saturating_add(first.timestamp.saturating_sub(window.lower));
            }
            for pair in profile.events.windows(2) {
                let (previous, current) = (pair[0], pair[1]);
                if previous.state == State::On {
                    let span = current.timestamp.saturating_sub(previous.timestamp);
                    trace!("on span [{}, {}) = {}", previous.timestamp, current.timestamp, span);
                    total = total.saturating_add(span);
                }
            }
            if last.state == State::On {
                total = total.saturating_add(window.upper.saturating_sub(last.timestamp));
            }
            total
        }
    };

    if total > window.len() {
        debug!(
            "usage of {} minutes exceeds window [{}, {}]; events out of order? clamping",
            total, window.lower, window.upper
        );
        return window.len();
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Event, PERIOD};
    use crate::services::fake_profile::{day_profile, FakeOptions};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn profile(initial: State, events: &[(State, u32)]) -> Profile {
        Profile::new(initial, events.iter().map(|&(s, t)| Event::new(s, t)).collect())
    }

    fn load_fixture() -> Profile {
        let json = std::fs::read_to_string("tests/data/day-profile.json").expect("fixture present");
        serde_json::from_str(&json).expect("parse day profile")
    }

    #[test]
    fn constant_profiles_resolve_without_scanning() {
        assert_eq!(usage(&profile(State::On, &[])), PERIOD);
        assert_eq!(usage(&profile(State::Off, &[])), 0);
        assert_eq!(usage(&profile(State::On, &[(State::On, 100), (State::On, 900)])), PERIOD);
        assert_eq!(usage(&profile(State::Off, &[(State::Off, 100), (State::Off, 900)])), 0);
    }

    #[test]
    fn on_then_off() {
        let p = profile(State::Off, &[(State::On, 30), (State::Off, 60)]);
        assert_eq!(usage(&p), 30);
    }

    #[test]
    fn counts_both_window_edges() {
        let p = profile(State::On, &[(State::Off, 50), (State::On, 304), (State::Off, 600)]);
        assert_eq!(usage(&p), 50 + (600 - 304));

        let p = profile(State::Off, &[(State::On, 100), (State::Off, 200), (State::On, 1000)]);
        assert_eq!(usage(&p), 100 + 440);
    }

    #[test]
    fn single_event_bills_only_the_following_span() {
        assert_eq!(usage(&profile(State::Off, &[(State::On, 1000)])), 440);
        // the ON span before a lone OFF event is not billed
        assert_eq!(usage(&profile(State::On, &[(State::Off, 1000)])), 0);
    }

    #[test]
    fn duplicate_events_do_not_double_count() {
        let p = profile(
            State::Off,
            &[(State::On, 100), (State::On, 200), (State::Off, 300), (State::Off, 400), (State::On, 1300)],
        );
        assert_eq!(usage(&p), 200 + 140);

        let p = profile(State::Off, &[(State::Off, 10), (State::On, 30), (State::On, 60)]);
        assert_eq!(usage(&p), PERIOD - 30);
    }

    #[test]
    fn events_sharing_a_timestamp() {
        let p = profile(State::Off, &[(State::On, 100), (State::Off, 100), (State::On, 100), (State::Off, 160)]);
        assert_eq!(usage(&p), 60);
    }

    #[test]
    fn auto_off_is_not_billed() {
        let p = profile(State::On, &[(State::AutoOff, 100), (State::On, 300), (State::Off, 400)]);
        assert_eq!(usage(&p), 200);
        assert_eq!(usage(&profile(State::AutoOff, &[])), 0);
    }

    #[test]
    fn shifted_window() {
        let p = profile(State::On, &[(State::Off, 1500), (State::On, 2000)]);
        assert_eq!(on_minutes(&p, Window::new(1440, 2880)), 60 + 880);
    }

    #[test]
    fn huge_out_of_order_spans_clamp_to_the_window() {
        let events: Vec<Event> = (0..9000)
            .flat_map(|_| [Event::new(State::On, 0), Event::new(State::Off, 525_600)])
            .collect();
        let p = Profile::new(State::Off, events);
        assert_eq!(on_minutes(&p, Window::single_day()), PERIOD);
    }

    #[test]
    fn empty_window_has_no_usage() {
        assert_eq!(on_minutes(&profile(State::On, &[]), Window::new(100, 100)), 0);
    }

    #[test]
    fn fixture_day() {
        assert_eq!(usage(&load_fixture()), 50 + 296 + 240);
    }

    #[test]
    fn on_and_off_partition_the_day() {
        let mut rng = SmallRng::seed_from_u64(0x5eed_0001);
        let options = FakeOptions { auto_off: false, ..FakeOptions::default() };
        for _ in 0..500 {
            let p = day_profile(&mut rng, &options);
            if p.events.len() == 1 {
                continue;
            }
            assert_eq!(usage(&p) + usage(&p.flipped()), PERIOD, "profile: {:?}", p);
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let p = load_fixture();
        assert_eq!(usage(&p), usage(&p));
    }
}
