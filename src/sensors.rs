//! Concrete sensor kinds layered over [`PeriodicSignal`].
//!
//! A sensor adds meaning to the raw reading of its signal: a hazard
//! contribution in `0..=100` and, where it makes sense, a comfort
//! contribution in the same range. Neither involves any scheduling; the
//! underlying signal is what the manager advances.

use crate::error::{ConfigError, ConfigResult};
use crate::signal::PeriodicSignal;
use crate::timed::{Shared, TimedItemManager};
use serde::{Deserialize, Serialize};

// CO2 concentration bands (ppm)
const CO2_NOTICEABLE_PPM: u32 = 1000;
const CO2_DROWSY_PPM: u32 = 2000;
const CO2_DANGEROUS_PPM: u32 = 5000;

pub const MAX_LEVEL: u8 = 100;

/// Aggregation category a sensor belongs to. Rule-based evaluation treats
/// occupancy as a scaling factor rather than as another hazard source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorCategory {
    Occupancy,
    Environmental,
}

pub trait HazardSensor {
    /// Danger score derived from the current reading, in `0..=100`.
    fn hazard_level(&self) -> u8;

    fn category(&self) -> SensorCategory {
        SensorCategory::Environmental
    }
}

pub trait ComfortSensor {
    fn comfort_level(&self) -> u8;
}

/// 100 when `numerator / denominator` rounds to zero, else 0.
fn comfort_band(numerator: f64, denominator: f64) -> u8 {
    if numerator / denominator < 0.5 {
        MAX_LEVEL
    } else {
        0
    }
}

#[derive(Debug, Clone)]
pub struct OccupancySensor {
    signal: Shared<PeriodicSignal>,
    capacity: u32,
}

impl OccupancySensor {
    pub fn new(
        readings: &[i32],
        update_frequency: i32,
        capacity: i32,
        manager: &mut TimedItemManager,
    ) -> ConfigResult<Self> {
        let capacity = u32::try_from(capacity).map_err(|_| ConfigError::InvalidSensorParameter {
            name: "capacity",
            reason: "must be non-negative",
        })?;
        let signal = PeriodicSignal::new(readings, update_frequency, manager)?;
        Ok(Self { signal, capacity })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn current_reading(&self) -> u32 {
        self.signal.borrow().current_reading()
    }

    pub fn signal(&self) -> &Shared<PeriodicSignal> {
        &self.signal
    }
}

impl HazardSensor for OccupancySensor {
    fn hazard_level(&self) -> u8 {
        let reading = self.current_reading();
        if reading >= self.capacity {
            return MAX_LEVEL;
        }
        (f64::from(reading) * 100.0 / f64::from(self.capacity)).round() as u8
    }

    fn category(&self) -> SensorCategory {
        SensorCategory::Occupancy
    }
}

impl ComfortSensor for OccupancySensor {
    fn comfort_level(&self) -> u8 {
        let reading = self.current_reading();
        if reading < self.capacity {
            comfort_band(f64::from(reading), f64::from(self.capacity))
        } else {
            0
        }
    }
}

#[derive(Debug, Clone)]
pub struct CarbonDioxideSensor {
    signal: Shared<PeriodicSignal>,
    ideal_value: u32,
    variation_limit: u32,
}

impl CarbonDioxideSensor {
    pub fn new(
        readings: &[i32],
        update_frequency: i32,
        ideal_value: i32,
        variation_limit: i32,
        manager: &mut TimedItemManager,
    ) -> ConfigResult<Self> {
        if ideal_value <= 0 {
            return Err(ConfigError::InvalidSensorParameter {
                name: "ideal_value",
                reason: "must be positive",
            });
        }
        if variation_limit <= 0 {
            return Err(ConfigError::InvalidSensorParameter {
                name: "variation_limit",
                reason: "must be positive",
            });
        }
        if ideal_value < variation_limit {
            return Err(ConfigError::InvalidSensorParameter {
                name: "variation_limit",
                reason: "must not exceed the ideal value",
            });
        }

        let signal = PeriodicSignal::new(readings, update_frequency, manager)?;
        Ok(Self {
            signal,
            ideal_value: ideal_value as u32,
            variation_limit: variation_limit as u32,
        })
    }

    pub fn ideal_value(&self) -> u32 {
        self.ideal_value
    }

    pub fn variation_limit(&self) -> u32 {
        self.variation_limit
    }

    pub fn current_reading(&self) -> u32 {
        self.signal.borrow().current_reading()
    }

    pub fn signal(&self) -> &Shared<PeriodicSignal> {
        &self.signal
    }
}

impl HazardSensor for CarbonDioxideSensor {
    fn hazard_level(&self) -> u8 {
        match self.current_reading() {
            r if r < CO2_NOTICEABLE_PPM => 0,
            r if r < CO2_DROWSY_PPM => 25,
            r if r < CO2_DANGEROUS_PPM => 50,
            _ => MAX_LEVEL,
        }
    }
}

impl ComfortSensor for CarbonDioxideSensor {
    fn comfort_level(&self) -> u8 {
        let difference = self.current_reading().abs_diff(self.ideal_value);
        if difference < self.variation_limit {
            comfort_band(f64::from(difference), f64::from(self.variation_limit))
        } else {
            0
        }
    }
}
