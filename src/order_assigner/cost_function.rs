use std::fmt;
use std::str::FromStr;

use crate::building::elevator::Elevator;
use crate::util::error::ConfigError;

/// Picks the elevator that should serve a call.
pub trait ElevatorSelectionStrategy: Send {
    fn name(&self) -> &'static str;

    /// Index into `elevators` of the chosen car, `None` if there is none.
    fn choose(&mut self, call_floor: usize, elevators: &[Elevator], seconds_per_floor: f64) -> Option<usize>;
}

pub fn floor_distance(a: usize, b: usize) -> usize {
    if a > b {
        a - b
    } else {
        b - a
    }
}

/// Seconds until `elevator` could reach `floor`: finish what it has, then travel.
pub fn predicted_cost(elevator: &Elevator, floor: usize, seconds_per_floor: f64) -> f64 {
    elevator.availability_time()
        + floor_distance(floor, elevator.destination_floor()) as f64 * seconds_per_floor
}

/// Minimises predicted waiting time. Ties go to the lowest index.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinWaitingTime;

impl ElevatorSelectionStrategy for MinWaitingTime {
    fn name(&self) -> &'static str {
        "min-waiting-time"
    }

    fn choose(&mut self, call_floor: usize, elevators: &[Elevator], seconds_per_floor: f64) -> Option<usize> {
        let mut lowest_cost = f64::INFINITY;
        let mut lowest_cost_id = None;
        for (i, elevator) in elevators.iter().enumerate() {
            let cost = predicted_cost(elevator, call_floor, seconds_per_floor);
            if cost < lowest_cost {
                lowest_cost = cost;
                lowest_cost_id = Some(i);
            }
        }
        lowest_cost_id
    }
}

/// Ignores how busy a car is and picks the one committed closest to the call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestElevator;

impl ElevatorSelectionStrategy for NearestElevator {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn choose(&mut self, call_floor: usize, elevators: &[Elevator], _seconds_per_floor: f64) -> Option<usize> {
        elevators
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| floor_distance(call_floor, e.destination_floor()))
            .map(|(i, _)| i)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RoundRobin {
    next: usize,
}

impl ElevatorSelectionStrategy for RoundRobin {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    fn choose(&mut self, _call_floor: usize, elevators: &[Elevator], _seconds_per_floor: f64) -> Option<usize> {
        if elevators.is_empty() {
            return None;
        }
        let chosen = self.next % elevators.len();
        self.next = chosen + 1;
        Some(chosen)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StrategyKind {
    MinWaitingTime,
    Nearest,
    RoundRobin,
}

impl StrategyKind {
    pub fn build(&self) -> Box<dyn ElevatorSelectionStrategy> {
        match self {
            StrategyKind::MinWaitingTime => Box::new(MinWaitingTime),
            StrategyKind::Nearest => Box::new(NearestElevator),
            StrategyKind::RoundRobin => Box::new(RoundRobin::default()),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min-waiting-time" | "min-wait" => Ok(StrategyKind::MinWaitingTime),
            "nearest" => Ok(StrategyKind::Nearest),
            "round-robin" => Ok(StrategyKind::RoundRobin),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::MinWaitingTime => "min-waiting-time",
            StrategyKind::Nearest => "nearest",
            StrategyKind::RoundRobin => "round-robin",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_picks_the_lowest_predicted_wait() {
        let elevators = vec![Elevator::with_state(0, 0, 0.0), Elevator::with_state(1, 5, 1.0)];
        // Costs are [1.5, 2.0].
        assert_eq!(MinWaitingTime.choose(3, &elevators, 0.5), Some(0));
        // Costs are [3.5, 1.5].
        assert_eq!(MinWaitingTime.choose(7, &elevators, 0.5), Some(1));
    }

    #[test]
    fn it_lets_the_first_elevator_win_ties() {
        let elevators = vec![
            Elevator::with_state(0, 6, 0.0),
            Elevator::with_state(1, 2, 0.0),
            Elevator::with_state(2, 4, 0.0),
        ];
        assert_eq!(MinWaitingTime.choose(4, &elevators, 0.5), Some(2));
        assert_eq!(MinWaitingTime.choose(5, &elevators, 0.5), Some(0));
        let idle = vec![Elevator::with_state(0, 0, 0.0), Elevator::with_state(1, 0, 0.0)];
        assert_eq!(MinWaitingTime.choose(3, &idle, 0.5), Some(0));
    }

    #[test]
    fn it_prefers_a_free_car_over_a_closer_busy_one() {
        let elevators = vec![Elevator::with_state(0, 4, 6.0), Elevator::with_state(1, 0, 0.0)];
        assert_eq!(MinWaitingTime.choose(4, &elevators, 0.5), Some(1));
        assert_eq!(NearestElevator.choose(4, &elevators, 0.5), Some(0));
    }

    #[test]
    fn it_returns_none_without_elevators() {
        assert_eq!(MinWaitingTime.choose(3, &[], 0.5), None);
        assert_eq!(NearestElevator.choose(3, &[], 0.5), None);
        assert_eq!(RoundRobin::default().choose(3, &[], 0.5), None);
    }

    #[test]
    fn it_cycles_round_robin() {
        let elevators: Vec<Elevator> = (0..3).map(Elevator::new).collect();
        let mut strategy = RoundRobin::default();
        let picks: Vec<_> = (0..5).map(|f| strategy.choose(f, &elevators, 0.5)).collect();
        assert_eq!(picks, vec![Some(0), Some(1), Some(2), Some(0), Some(1)]);
    }

    #[test]
    fn it_parses_strategy_names() {
        assert_eq!("min-waiting-time".parse::<StrategyKind>().unwrap(), StrategyKind::MinWaitingTime);
        assert_eq!(" Nearest ".parse::<StrategyKind>().unwrap(), StrategyKind::Nearest);
        assert_eq!(StrategyKind::RoundRobin.to_string(), "round-robin");
        assert!(matches!(
            "elevator-roulette".parse::<StrategyKind>(),
            Err(ConfigError::UnknownStrategy(_))
        ));
    }
}
