//! Simulation configuration: defaults, optional JSON file, validation.
use serde;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::order_assigner::cost_function::StrategyKind;
use crate::util::constants as setting;
use crate::util::error::ConfigError;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BuildingType {
    Office,
}

impl BuildingType {
    /// The selection strategy a building uses unless told otherwise.
    pub fn default_strategy(&self) -> StrategyKind {
        match self {
            BuildingType::Office => StrategyKind::MinWaitingTime,
        }
    }
}

impl FromStr for BuildingType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "office" => Ok(BuildingType::Office),
            other => Err(ConfigError::UnknownBuildingType(other.to_string())),
        }
    }
}

/// Everything needed to construct a `Building`.
///
/// # Example
/// ```rust
/// use elevator::util::config::SimConfig;
/// let config = SimConfig { floors: 4, elevators: 1, ..SimConfig::default() };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Highest floor number; the building has `floors + 1` floors.
    pub floors: usize,
    pub elevators: usize,
    pub seconds_per_floor: f64,
    pub elevator_wait_time: f64,
    pub building: String,
    /// Overrides the building's default strategy when set.
    pub strategy: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            floors: setting::DEFAULT_NUM_FLOORS,
            elevators: setting::DEFAULT_NUM_ELEVATORS,
            seconds_per_floor: setting::SECONDS_PER_FLOOR,
            elevator_wait_time: setting::ELEVATOR_WAIT_TIME,
            building: setting::DEFAULT_BUILDING_TYPE.to_string(),
            strategy: None,
        }
    }
}

impl SimConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<SimConfig, ConfigError> {
        let raw = fs::read_to_string(path)?;
        SimConfig::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<SimConfig, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn building_type(&self) -> Result<BuildingType, ConfigError> {
        self.building.parse()
    }

    pub fn strategy_kind(&self) -> Result<StrategyKind, ConfigError> {
        match self.strategy.as_ref() {
            Some(name) => name.parse(),
            None => Ok(self.building_type()?.default_strategy()),
        }
    }

    /// Index of the top floor.
    pub fn max_floor(&self) -> usize {
        self.floors
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elevators == 0 {
            return Err(ConfigError::NoElevators);
        }
        if self.floors == 0 {
            return Err(ConfigError::NoFloors);
        }
        check_timing("seconds_per_floor", self.seconds_per_floor)?;
        check_timing("elevator_wait_time", self.elevator_wait_time)?;
        self.building_type()?;
        self.strategy_kind()?;
        Ok(())
    }
}

fn check_timing(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= setting::MAX_TIMING_SEC {
        Ok(())
    } else {
        Err(ConfigError::InvalidTiming { name, value })
    }
}
