//! Random call traffic for headless runs.
use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde;
use std::cmp::Ordering;

use crate::building::building::Building;
use crate::order_assigner::dispatcher::CallOutcome;
use crate::timer::event_queue::secs;
use crate::util::error::CallError;

#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduledCall {
    /// Seconds after the simulation starts.
    pub at: f64,
    pub floor: usize,
}

/// `count` calls spread uniformly over `window_sec`, ordered by time.
/// The same seed always gives the same calls.
pub fn random_calls(count: usize, max_floor: usize, window_sec: f64, seed: u64) -> Vec<ScheduledCall> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut calls: Vec<ScheduledCall> = (0..count)
        .map(|_| ScheduledCall {
            at: if window_sec > 0.0 { rng.gen_range(0.0, window_sec) } else { 0.0 },
            floor: rng.gen_range(0, max_floor + 1),
        })
        .collect();
    calls.sort_by(|a, b| a.at.partial_cmp(&b.at).unwrap_or(Ordering::Equal));
    calls
}

/// Feeds `calls` to the building at their times, then lets it run dry.
pub fn replay(building: &mut Building, calls: &[ScheduledCall]) -> Vec<Result<CallOutcome, CallError>> {
    let mut outcomes = Vec::with_capacity(calls.len());
    for call in calls {
        building.advance_to(secs(call.at));
        let outcome = building.submit_call(call.floor);
        if let Err(e) = &outcome {
            warn!("Call at {:.2}s rejected: {}", call.at, e);
        }
        outcomes.push(outcome);
    }
    building.run_until_idle();
    outcomes
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::config::SimConfig;
    use crossbeam_channel as cbc;

    #[test]
    fn it_is_reproducible_for_a_seed() {
        assert_eq!(random_calls(20, 10, 20.0, 7), random_calls(20, 10, 20.0, 7));
    }

    #[test]
    fn it_stays_inside_the_building_and_window() {
        let calls = random_calls(200, 4, 5.0, 1);
        assert_eq!(calls.len(), 200);
        assert!(calls.iter().all(|c| c.floor <= 4 && c.at >= 0.0 && c.at < 5.0));
        assert!(calls.windows(2).all(|w| w[0].at <= w[1].at));
    }

    #[test]
    fn it_replays_calls_until_the_building_is_idle() {
        let (tx, _rx) = cbc::unbounded();
        let mut building = Building::new(SimConfig::default(), tx).unwrap();
        let calls = vec![
            ScheduledCall { at: 0.0, floor: 8 },
            ScheduledCall { at: 0.0, floor: 8 },
            ScheduledCall { at: 1.5, floor: 3 },
        ];
        let outcomes = replay(&mut building, &calls);
        assert!(matches!(outcomes[0], Ok(CallOutcome::Dispatched { .. })));
        assert_eq!(outcomes[1], Ok(CallOutcome::AlreadyServed));
        assert!(matches!(outcomes[2], Ok(CallOutcome::Dispatched { .. })));
        assert_eq!(building.pending_timers(), 0);
        assert!(building.floors().iter().all(|f| !f.is_waiting()));
    }
}
