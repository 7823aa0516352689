//! A building: a fixed pool of elevators and floors, one dispatcher, and the
//! event loop that drives every deferred action between them.
use crossbeam_channel as cbc;
use log::{debug, info};
use std::time::Duration;

use crate::building::elevator::Elevator;
use crate::building::floor::Floor;
use crate::building::notification::{Notification, Notifier};
use crate::order_assigner::dispatcher::{CallOutcome, Dispatcher};
use crate::timer::event_queue::{EventQueue, Fired, SimTime};
use crate::util::config::SimConfig;
use crate::util::error::{CallError, ConfigError};

/// Deferred actions. Each carries only the ids it needs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SimEvent {
    ElevatorDispatch {
        elevator: usize,
        floor: usize,
        floors_to_move: usize,
    },
    ElevatorCountdown {
        elevator: usize,
    },
    FloorCountdown {
        floor: usize,
    },
    FloorArrival {
        floor: usize,
    },
    FloorNotificationEnd {
        floor: usize,
    },
}

pub struct Building {
    config: SimConfig,
    elevators: Vec<Elevator>,
    floors: Vec<Floor>,
    dispatcher: Dispatcher,
    queue: EventQueue<SimEvent>,
    notifier: Notifier,
}

impl Building {
    /// Builds `config.floors + 1` floors and `config.elevators` elevators.
    pub fn new(config: SimConfig, notify_tx: cbc::Sender<Notification>) -> Result<Building, ConfigError> {
        config.validate()?;
        let strategy = config.strategy_kind()?.build();
        let dispatcher = Dispatcher::new(strategy, config.seconds_per_floor, config.elevator_wait_time);
        info!(
            "Building with floors 0..={} and {} elevators, using {}",
            config.max_floor(),
            config.elevators,
            dispatcher.strategy_name()
        );
        Ok(Building {
            elevators: (0..config.elevators).map(Elevator::new).collect(),
            floors: (0..=config.max_floor()).map(Floor::new).collect(),
            dispatcher,
            queue: EventQueue::new(),
            notifier: Notifier::new(notify_tx),
            config,
        })
    }

    /// A user asks for an elevator at `floor`.
    pub fn submit_call(&mut self, floor: usize) -> Result<CallOutcome, CallError> {
        debug!("Call from floor {} at {:?}", floor, self.queue.now());
        self.dispatcher.handle_elevator_call(
            floor,
            &mut self.elevators,
            &mut self.floors,
            &mut self.queue,
            &self.notifier,
        )
    }

    pub fn now(&self) -> SimTime {
        self.queue.now()
    }

    pub fn next_event_time(&mut self) -> Option<SimTime> {
        self.queue.next_fire_time()
    }

    pub fn pending_timers(&self) -> usize {
        self.queue.pending()
    }

    /// Runs every event due up to `t` in fire-time order, then sets the clock to `t`.
    pub fn advance_to(&mut self, t: SimTime) {
        while let Some(fired) = self.queue.pop_due(t) {
            self.on_event(fired);
        }
        self.queue.advance_to(t);
    }

    pub fn advance_by(&mut self, d: Duration) {
        let t = self.now() + d;
        self.advance_to(t);
    }

    /// Runs until nothing is scheduled. Returns the time of the last event.
    pub fn run_until_idle(&mut self) -> SimTime {
        while let Some(t) = self.next_event_time() {
            self.advance_to(t);
        }
        self.now()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }
    pub fn strategy_name(&self) -> &'static str {
        self.dispatcher.strategy_name()
    }

    fn on_event(&mut self, fired: Fired<SimEvent>) {
        let tick = self.config.seconds_per_floor;
        match fired.event {
            SimEvent::ElevatorDispatch {
                elevator,
                floor,
                floors_to_move,
            } => {
                debug!("Elevator {} leaves for floor {} at {:?}", elevator, floor, fired.at);
                self.notifier.send(Notification::ElevatorDispatch {
                    elevator,
                    floor,
                    floors_to_move,
                    travel_seconds: floors_to_move as f64 * tick,
                });
            }
            SimEvent::ElevatorCountdown { elevator } => {
                if let Some(e) = self.elevators.get_mut(elevator) {
                    e.on_countdown_tick(&mut self.queue, fired.id, tick);
                }
            }
            SimEvent::FloorCountdown { floor } => {
                if let Some(f) = self.floors.get_mut(floor) {
                    f.on_countdown_tick(&mut self.queue, fired.id, tick, &self.notifier);
                }
            }
            SimEvent::FloorArrival { floor } => {
                if let Some(f) = self.floors.get_mut(floor) {
                    f.on_arrival(&mut self.queue, self.config.elevator_wait_time, &self.notifier);
                }
            }
            SimEvent::FloorNotificationEnd { floor } => {
                if let Some(f) = self.floors.get_mut(floor) {
                    f.on_notification_end(&self.notifier);
                }
            }
        }
    }
}
