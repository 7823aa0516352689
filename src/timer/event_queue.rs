//! Discrete-event queue and simulated clock.
//!
//! Every deferred action in the simulation is an event pushed onto one queue,
//! keyed by fire time. Events with equal fire times fire in the order they were
//! scheduled. Periodic events re-arm themselves under the same `TimerId` until
//! cancelled.
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;

/// Simulated time since the simulation started.
pub type SimTime = Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Converts a number of seconds to a delay. Negative and NaN values become
/// zero, values too large for a `Duration` saturate.
pub fn secs(seconds: f64) -> Duration {
    if seconds > 0.0 {
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    } else {
        Duration::from_secs(0)
    }
}

#[derive(Debug)]
struct Scheduled<E> {
    at: SimTime,
    seq: u64,
    id: TimerId,
    period: Option<Duration>,
    event: E,
}

// BinaryHeap is a max-heap; reverse so the earliest (at, seq) is on top.
impl<E> Ord for Scheduled<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.at.cmp(&self.at).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<E> Eq for Scheduled<E> {}

/// An event taken off the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    pub id: TimerId,
    pub at: SimTime,
    pub event: E,
}

#[derive(Debug)]
pub struct EventQueue<E> {
    now: SimTime,
    next_seq: u64,
    next_id: u64,
    heap: BinaryHeap<Scheduled<E>>,
    live: HashSet<TimerId>,
    cancelled: HashSet<TimerId>,
}

impl<E: Clone> EventQueue<E> {
    pub fn new() -> EventQueue<E> {
        EventQueue {
            now: Duration::from_secs(0),
            next_seq: 0,
            next_id: 0,
            heap: BinaryHeap::new(),
            live: HashSet::new(),
            cancelled: HashSet::new(),
        }
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Fires `event` once, `delay` after the current time.
    pub fn schedule_after(&mut self, delay: Duration, event: E) -> TimerId {
        self.push(delay, None, event)
    }

    /// Fires `event` every `interval` until the returned timer is cancelled.
    /// The first firing is one `interval` from now.
    pub fn schedule_periodic(&mut self, interval: Duration, event: E) -> TimerId {
        // A zero interval would fire forever without time moving.
        let interval = interval.max(Duration::from_nanos(1));
        self.push(interval, Some(interval), event)
    }

    /// Stops any pending firing of `id`. Unknown or finished timers are ignored.
    pub fn cancel(&mut self, id: TimerId) {
        if self.live.remove(&id) {
            self.cancelled.insert(id);
        }
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.live.contains(&id)
    }

    /// Number of timers, one-shot or periodic, that can still fire.
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// Fire time of the earliest live event.
    pub fn next_fire_time(&mut self) -> Option<SimTime> {
        self.discard_cancelled();
        self.heap.peek().map(|s| s.at)
    }

    pub fn is_empty(&mut self) -> bool {
        self.next_fire_time().is_none()
    }

    /// Pops the earliest live event firing no later than `until` and moves the
    /// clock to its fire time.
    pub fn pop_due(&mut self, until: SimTime) -> Option<Fired<E>> {
        self.discard_cancelled();
        if self.heap.peek()?.at > until {
            return None;
        }
        let item = self.heap.pop()?;
        self.now = self.now.max(item.at);
        match item.period {
            Some(period) => {
                let seq = self.take_seq();
                self.heap.push(Scheduled {
                    at: item.at.saturating_add(period),
                    seq,
                    id: item.id,
                    period: item.period,
                    event: item.event.clone(),
                });
            }
            None => {
                self.live.remove(&item.id);
            }
        }
        Some(Fired {
            id: item.id,
            at: item.at,
            event: item.event,
        })
    }

    /// Moves the clock forward to `t`. The clock never moves backwards.
    /// Callers drain due events with `pop_due` first.
    pub fn advance_to(&mut self, t: SimTime) {
        self.now = self.now.max(t);
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.take_seq();
        self.live.insert(id);
        self.heap.push(Scheduled {
            at: self.now.saturating_add(delay),
            seq,
            id,
            period,
            event,
        });
        id
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn discard_cancelled(&mut self) {
        while let Some(top) = self.heap.peek() {
            if !self.cancelled.contains(&top.id) {
                break;
            }
            if let Some(item) = self.heap.pop() {
                self.cancelled.remove(&item.id);
            }
        }
    }
}

impl<E: Clone> Default for EventQueue<E> {
    fn default() -> Self {
        EventQueue::new()
    }
}
