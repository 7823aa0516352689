use crate::timer::event_queue::{EventQueue, TimerId};

/// Owns at most one pending timer. Starting a new one always cancels the old.
///
/// Not `Clone`: two copies would cancel each other's timer.
/// ```compile_fail
/// use elevator::timer::countdown::CancellableTimer;
/// let timer = CancellableTimer::new();
/// let _copy = timer.clone();
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct CancellableTimer {
    handle: Option<TimerId>,
}

impl CancellableTimer {
    pub fn new() -> CancellableTimer {
        CancellableTimer { handle: None }
    }

    pub fn replace<E: Clone>(&mut self, queue: &mut EventQueue<E>, id: TimerId) {
        self.cancel(queue);
        self.handle = Some(id);
    }

    pub fn cancel<E: Clone>(&mut self, queue: &mut EventQueue<E>) {
        if let Some(id) = self.handle.take() {
            queue.cancel(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// True if `id` is the timer currently held. Firings of replaced timers
    /// can still be in flight when this is checked.
    pub fn holds(&self, id: TimerId) -> bool {
        self.handle == Some(id)
    }
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    Running(f64),
    Finished,
}

/// One decrement of a display countdown, never going below zero.
pub fn count_down(remaining: &mut f64, step: f64) -> Tick {
    if *remaining > step {
        *remaining -= step;
        Tick::Running(*remaining)
    } else {
        *remaining = 0.0;
        Tick::Finished
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;

    #[test]
    fn it_cancels_the_previous_timer_on_replace() {
        let mut queue: EventQueue<u8> = EventQueue::new();
        let mut timer = CancellableTimer::new();
        let first = queue.schedule_periodic(Duration::from_millis(500), 1);
        timer.replace(&mut queue, first);
        let second = queue.schedule_periodic(Duration::from_millis(500), 2);
        timer.replace(&mut queue, second);

        assert!(!queue.is_scheduled(first));
        assert!(timer.holds(second));
        let fired = queue.pop_due(Duration::from_secs(1)).unwrap();
        assert_eq!(fired.event, 2);
    }

    #[test]
    fn it_forgets_the_handle_on_cancel() {
        let mut queue: EventQueue<u8> = EventQueue::new();
        let mut timer = CancellableTimer::new();
        let id = queue.schedule_after(Duration::from_millis(500), 1);
        timer.replace(&mut queue, id);
        timer.cancel(&mut queue);
        assert!(!timer.is_running());
        assert!(queue.is_empty());
    }

    #[test]
    fn it_counts_down_to_exactly_zero() {
        let mut remaining = 1.0;
        assert_eq!(count_down(&mut remaining, 0.5), Tick::Running(0.5));
        assert_eq!(count_down(&mut remaining, 0.5), Tick::Finished);
        assert_eq!(remaining, 0.0);
        assert_eq!(count_down(&mut remaining, 0.5), Tick::Finished);
        assert_eq!(remaining, 0.0);
    }

    #[test]
    fn it_never_goes_negative_on_uneven_steps() {
        let mut remaining = 0.7;
        assert!(matches!(count_down(&mut remaining, 0.5), Tick::Running(r) if r > 0.0 && r < 0.5));
        assert_eq!(count_down(&mut remaining, 0.5), Tick::Finished);
        assert_eq!(remaining, 0.0);
    }
}
