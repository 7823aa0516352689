use log::{debug, trace};
use serde;

use crate::building::building::SimEvent;
use crate::building::notification::{Notification, Notifier};
use crate::timer::countdown::{count_down, CancellableTimer, Tick};
use crate::timer::event_queue::{secs, EventQueue, TimerId};

/// `Idle -> Waiting` on an accepted call, `Waiting -> Arrived` when the
/// elevator gets there, `Arrived -> Idle` once the dwell time is over.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FloorPhase {
    Idle,
    Waiting,
    Arrived,
}

#[derive(Debug)]
pub struct Floor {
    number: usize,
    phase: FloorPhase,
    arrival_time: f64,
    countdown: CancellableTimer,
}

impl Floor {
    pub fn new(number: usize) -> Floor {
        Floor {
            number,
            phase: FloorPhase::Idle,
            arrival_time: 0.0,
            countdown: CancellableTimer::new(),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }
    pub fn phase(&self) -> FloorPhase {
        self.phase
    }
    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    /// Waiting covers the whole call cycle, dwell time included.
    pub fn is_waiting(&self) -> bool {
        self.phase != FloorPhase::Idle
    }

    pub fn set_waiting(&mut self) {
        self.phase = FloorPhase::Waiting;
    }

    /// Sets the time until the elevator arrives. Schedules the arrival itself
    /// and restarts the displayed countdown.
    pub fn set_arrival_time(
        &mut self,
        queue: &mut EventQueue<SimEvent>,
        time: f64,
        tick: f64,
        notifier: &Notifier,
    ) {
        self.arrival_time = time.max(0.0);
        queue.schedule_after(secs(self.arrival_time), SimEvent::FloorArrival { floor: self.number });
        let timer = queue.schedule_periodic(secs(tick), SimEvent::FloorCountdown { floor: self.number });
        self.countdown.replace(queue, timer);
        notifier.send(Notification::FloorWaitTime {
            floor: self.number,
            remaining: self.arrival_time,
        });
    }

    pub fn on_countdown_tick(
        &mut self,
        queue: &mut EventQueue<SimEvent>,
        timer: TimerId,
        tick: f64,
        notifier: &Notifier,
    ) {
        if !self.countdown.holds(timer) {
            return;
        }
        let state = count_down(&mut self.arrival_time, tick);
        trace!("Floor {} wait time {:.1}s", self.number, self.arrival_time);
        notifier.send(Notification::FloorWaitTime {
            floor: self.number,
            remaining: self.arrival_time,
        });
        if state == Tick::Finished {
            self.countdown.cancel(queue);
        }
    }

    /// The elevator is here. The floor stays waiting for `dwell` seconds.
    /// A countdown still running is cleared first so the display reads 0
    /// before the arrival is announced.
    pub fn on_arrival(&mut self, queue: &mut EventQueue<SimEvent>, dwell: f64, notifier: &Notifier) {
        debug!("Elevator arrived at floor {}", self.number);
        if self.countdown.is_running() {
            self.countdown.cancel(queue);
            self.arrival_time = 0.0;
            notifier.send(Notification::FloorWaitTime {
                floor: self.number,
                remaining: 0.0,
            });
        }
        self.phase = FloorPhase::Arrived;
        notifier.send(Notification::FloorArrival { floor: self.number });
        queue.schedule_after(secs(dwell), SimEvent::FloorNotificationEnd { floor: self.number });
    }

    pub fn on_notification_end(&mut self, notifier: &Notifier) {
        debug!("Floor {} can be called again", self.number);
        self.phase = FloorPhase::Idle;
        notifier.send(Notification::FloorNotificationEnd { floor: self.number });
    }
}
