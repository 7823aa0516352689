use crossbeam_channel as cbc;
use log::trace;
use serde;

/// What the simulation tells the presentation layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    CallAccepted {
        floor: usize,
        elevator: usize,
    },
    /// The elevator starts moving now and needs `travel_seconds` to get there.
    ElevatorDispatch {
        elevator: usize,
        floor: usize,
        floors_to_move: usize,
        travel_seconds: f64,
    },
    /// Predicted wait at `floor`, counting down.
    FloorWaitTime {
        floor: usize,
        remaining: f64,
    },
    FloorArrival {
        floor: usize,
    },
    FloorNotificationEnd {
        floor: usize,
    },
}

/// Sending half of the notification channel. Nobody listening is fine.
#[derive(Clone, Debug)]
pub struct Notifier {
    tx: cbc::Sender<Notification>,
}

impl Notifier {
    pub fn new(tx: cbc::Sender<Notification>) -> Notifier {
        Notifier { tx }
    }

    pub fn send(&self, notification: Notification) {
        if let Err(cbc::SendError(n)) = self.tx.send(notification) {
            trace!("No listener for {:?}", n);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_serializes_with_an_event_tag() {
        let json = serde_json::to_string(&Notification::FloorArrival { floor: 3 }).unwrap();
        assert_eq!(json, r#"{"event":"floor_arrival","floor":3}"#);
    }

    #[test]
    fn it_keeps_going_without_a_listener() {
        let (tx, rx) = cbc::unbounded::<Notification>();
        drop(rx);
        let notifier = Notifier::new(tx);
        notifier.send(Notification::FloorNotificationEnd { floor: 1 });
    }
}
