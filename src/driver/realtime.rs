//! Runs a building against the wall clock.
//!
//! The simulated clock is moved up to the elapsed real time whenever the driver
//! wakes: on user input, or when a `MessageTimer` armed for the next due event
//! fires. Re-arming drops the previous guard, which cancels it.
use log::{info, warn};
use std::sync::mpsc;
use std::time::{Duration, Instant};
use ::timer::{Guard, MessageTimer};

use crate::building::building::Building;
use crate::order_assigner::dispatcher::CallOutcome;

#[derive(Clone, Debug, PartialEq)]
pub enum DriverMessage {
    Call(usize),
    Wake,
    /// No more input will come. Finish what is scheduled, then stop.
    InputClosed,
    Quit,
}

fn arm_wakeup(
    timer: &MessageTimer<DriverMessage>,
    building: &mut Building,
    elapsed: Duration,
) -> Option<Guard> {
    let next = building.next_event_time()?;
    let delay = next.checked_sub(elapsed).unwrap_or_else(|| Duration::from_secs(0));
    let delay = chrono::Duration::from_std(delay).unwrap_or_else(|_| chrono::Duration::seconds(1));
    Some(timer.schedule_with_delay(delay, DriverMessage::Wake))
}

pub fn run(building: &mut Building, rx: mpsc::Receiver<DriverMessage>, tx: mpsc::Sender<DriverMessage>) {
    let timer = MessageTimer::new(tx);
    let start = Instant::now();
    let mut input_closed = false;

    loop {
        building.advance_to(start.elapsed());
        if input_closed && building.next_event_time().is_none() {
            info!("All calls served, stopping");
            return;
        }
        let _wake_guard = arm_wakeup(&timer, building, start.elapsed());

        match rx.recv() {
            Ok(DriverMessage::Call(floor)) => {
                building.advance_to(start.elapsed());
                match building.submit_call(floor) {
                    Ok(CallOutcome::Dispatched { elevator, arrival_time }) => {
                        info!("Elevator {} will reach floor {} in {:.1}s", elevator, floor, arrival_time);
                    }
                    Ok(CallOutcome::AlreadyServed) => {}
                    Err(e) => warn!("Call rejected: {}", e),
                }
            }
            Ok(DriverMessage::Wake) => {}
            Ok(DriverMessage::InputClosed) => input_closed = true,
            Ok(DriverMessage::Quit) | Err(_) => {
                info!("Stopping simulation at {:?}", building.now());
                return;
            }
        }
    }
}
