/// Seconds for an elevator to travel one floor. Also the countdown tick.
pub const SECONDS_PER_FLOOR: f64 = 0.5;
/// Seconds an elevator dwells at a served floor before it is free again.
pub const ELEVATOR_WAIT_TIME: f64 = 2.0;
/// Upper bound for any configured timing, in seconds.
pub const MAX_TIMING_SEC: f64 = 3600.0;

pub const DEFAULT_NUM_FLOORS: usize = 10;
pub const DEFAULT_NUM_ELEVATORS: usize = 3;
pub const DEFAULT_BUILDING_TYPE: &str = "office";

/// Window (seconds) over which generated demo calls are spread.
pub const DEMO_CALL_WINDOW_SEC: f64 = 20.0;
