use log::{debug, info};

use crate::building::building::SimEvent;
use crate::building::elevator::Elevator;
use crate::building::floor::Floor;
use crate::building::notification::{Notification, Notifier};
use crate::order_assigner::cost_function::{floor_distance, ElevatorSelectionStrategy};
use crate::timer::event_queue::{secs, EventQueue};
use crate::util::error::CallError;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CallOutcome {
    Dispatched { elevator: usize, arrival_time: f64 },
    /// The floor is already waiting or some elevator is already headed there.
    AlreadyServed,
}

/// Commits elevators to floor calls. The only writer of elevator and floor
/// time fields apart from their own countdowns.
pub struct Dispatcher {
    strategy: Box<dyn ElevatorSelectionStrategy>,
    seconds_per_floor: f64,
    elevator_wait_time: f64,
}

impl Dispatcher {
    pub fn new(
        strategy: Box<dyn ElevatorSelectionStrategy>,
        seconds_per_floor: f64,
        elevator_wait_time: f64,
    ) -> Dispatcher {
        Dispatcher {
            strategy,
            seconds_per_floor,
            elevator_wait_time,
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn elevator_choice(&mut self, floor: usize, elevators: &[Elevator]) -> Option<usize> {
        self.strategy.choose(floor, elevators, self.seconds_per_floor)
    }

    /// A floor is served while it waits, or while any elevator's last
    /// commitment is that floor.
    pub fn is_served(floor: usize, elevators: &[Elevator], floors: &[Floor]) -> bool {
        floors[floor].is_waiting() || elevators.iter().any(|e| e.destination_floor() == floor)
    }

    pub fn handle_elevator_call(
        &mut self,
        floor: usize,
        elevators: &mut [Elevator],
        floors: &mut [Floor],
        queue: &mut EventQueue<SimEvent>,
        notifier: &Notifier,
    ) -> Result<CallOutcome, CallError> {
        if floor >= floors.len() {
            return Err(CallError::FloorOutOfRange {
                floor,
                max_floor: floors.len().saturating_sub(1),
            });
        }
        if Dispatcher::is_served(floor, elevators, floors) {
            debug!("Floor {} is already being served", floor);
            return Ok(CallOutcome::AlreadyServed);
        }

        let id = self
            .elevator_choice(floor, elevators)
            .ok_or(CallError::NoElevatorAvailable)?;
        let elevator = elevators.get_mut(id).ok_or(CallError::NoElevatorAvailable)?;

        let current_time = elevator.availability_time();
        let floors_to_move = floor_distance(floor, elevator.destination_floor());
        let travel_time = current_time + floors_to_move as f64 * self.seconds_per_floor;

        elevator.set_availability_time(queue, travel_time + self.elevator_wait_time, self.seconds_per_floor);
        elevator.set_destination_floor(floor);

        floors[floor].set_arrival_time(queue, travel_time, self.seconds_per_floor, notifier);
        floors[floor].set_waiting();
        notifier.send(Notification::CallAccepted { floor, elevator: id });

        // The car leaves once its previous commitment is done.
        queue.schedule_after(
            secs(current_time),
            SimEvent::ElevatorDispatch {
                elevator: id,
                floor,
                floors_to_move,
            },
        );

        info!(
            "Floor {} assigned to elevator {} ({}), arrival in {:.1}s",
            floor,
            id,
            self.strategy.name(),
            travel_time
        );
        Ok(CallOutcome::Dispatched {
            elevator: id,
            arrival_time: travel_time,
        })
    }
}
