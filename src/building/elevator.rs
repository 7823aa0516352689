use log::trace;

use crate::building::building::SimEvent;
use crate::timer::countdown::{count_down, CancellableTimer, Tick};
use crate::timer::event_queue::{secs, EventQueue, TimerId};

/// One car. It serves a single destination at a time; `availability_time`
/// says how long until it can take the next one.
#[derive(Debug)]
pub struct Elevator {
    id: usize,
    destination_floor: usize,
    availability_time: f64,
    countdown: CancellableTimer,
}

impl Elevator {
    pub fn new(id: usize) -> Elevator {
        Elevator {
            id,
            destination_floor: 0,
            availability_time: 0.0,
            countdown: CancellableTimer::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_state(id: usize, destination_floor: usize, availability_time: f64) -> Elevator {
        Elevator {
            id,
            destination_floor,
            availability_time,
            countdown: CancellableTimer::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn destination_floor(&self) -> usize {
        self.destination_floor
    }
    pub fn availability_time(&self) -> f64 {
        self.availability_time
    }
    pub fn is_busy(&self) -> bool {
        self.availability_time > 0.0
    }
    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn set_destination_floor(&mut self, floor: usize) {
        self.destination_floor = floor;
    }

    /// Sets the availability time and restarts the countdown that lowers it
    /// by `tick` every `tick` seconds.
    pub fn set_availability_time(&mut self, queue: &mut EventQueue<SimEvent>, time: f64, tick: f64) {
        self.availability_time = time.max(0.0);
        let timer = queue.schedule_periodic(secs(tick), SimEvent::ElevatorCountdown { elevator: self.id });
        self.countdown.replace(queue, timer);
    }

    pub fn on_countdown_tick(&mut self, queue: &mut EventQueue<SimEvent>, timer: TimerId, tick: f64) {
        if !self.countdown.holds(timer) {
            return;
        }
        match count_down(&mut self.availability_time, tick) {
            Tick::Running(remaining) => {
                trace!("Elevator {} available in {:.1}s", self.id, remaining);
            }
            Tick::Finished => {
                trace!("Elevator {} is available", self.id);
                self.countdown.cancel(queue);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;

    fn run_ticks(elevator: &mut Elevator, queue: &mut EventQueue<SimEvent>, until: Duration) -> Vec<f64> {
        let mut seen = Vec::new();
        while let Some(fired) = queue.pop_due(until) {
            if let SimEvent::ElevatorCountdown { .. } = fired.event {
                elevator.on_countdown_tick(queue, fired.id, 0.5);
                seen.push(elevator.availability_time());
            }
        }
        seen
    }

    #[test]
    fn it_starts_idle_at_ground_floor() {
        let elevator = Elevator::new(0);
        assert_eq!(elevator.destination_floor(), 0);
        assert_eq!(elevator.availability_time(), 0.0);
        assert!(!elevator.is_busy());
        assert!(!elevator.is_counting_down());
    }

    #[test]
    fn it_counts_availability_down_to_zero_and_stops() {
        let mut queue = EventQueue::new();
        let mut elevator = Elevator::new(0);
        elevator.set_availability_time(&mut queue, 2.0, 0.5);
        let seen = run_ticks(&mut elevator, &mut queue, Duration::from_secs(10));
        assert_eq!(seen, vec![1.5, 1.0, 0.5, 0.0]);
        assert!(!elevator.is_counting_down());
        assert!(queue.is_empty());
    }

    #[test]
    fn it_replaces_the_running_countdown() {
        let mut queue = EventQueue::new();
        let mut elevator = Elevator::new(0);
        elevator.set_availability_time(&mut queue, 1.0, 0.5);
        run_ticks(&mut elevator, &mut queue, Duration::from_millis(500));
        assert_eq!(elevator.availability_time(), 0.5);

        elevator.set_availability_time(&mut queue, 3.0, 0.5);
        let seen = run_ticks(&mut elevator, &mut queue, Duration::from_secs(10));
        assert_eq!(seen, vec![2.5, 2.0, 1.5, 1.0, 0.5, 0.0]);
    }
}
