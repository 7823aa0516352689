use std::fmt;

/// Problems found while building the simulation. None of these are recoverable;
/// the simulation must not start.
#[derive(Debug)]
pub enum ConfigError {
    NoElevators,
    NoFloors,
    InvalidTiming { name: &'static str, value: f64 },
    UnknownBuildingType(String),
    UnknownStrategy(String),
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoElevators => write!(f, "building must have at least one elevator"),
            ConfigError::NoFloors => write!(f, "building must have at least one floor above ground"),
            ConfigError::InvalidTiming { name, value } => {
                write!(
                    f,
                    "{} must be a positive number of seconds up to {}, got {}",
                    name,
                    crate::util::constants::MAX_TIMING_SEC,
                    value
                )
            }
            ConfigError::UnknownBuildingType(kind) => write!(f, "unknown building type \"{}\"", kind),
            ConfigError::UnknownStrategy(kind) => write!(f, "unknown selection strategy \"{}\"", kind),
            ConfigError::Io(e) => write!(f, "could not read configuration: {}", e),
            ConfigError::Parse(e) => write!(f, "could not parse configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Rejected calls. Calling a floor that is already being served is not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CallError {
    FloorOutOfRange { floor: usize, max_floor: usize },
    NoElevatorAvailable,
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::FloorOutOfRange { floor, max_floor } => {
                write!(f, "floor {} is outside [0, {}]", floor, max_floor)
            }
            CallError::NoElevatorAvailable => write!(f, "no elevator could be selected"),
        }
    }
}

impl std::error::Error for CallError {}
