use crate::error::{ConfigError, ConfigResult};
use crate::room::RoomType;
use serde::{Deserialize, Serialize};

// Maintenance duration = round((area * MINUTES_PER_SQUARE_METRE + BASE_MINUTES) * multiplier)
const BASE_MINUTES: f64 = 5.0;
const MINUTES_PER_SQUARE_METRE: f64 = 0.2;
const STUDY_MULTIPLIER: f64 = 1.0;
const OFFICE_MULTIPLIER: f64 = 1.5;
const LABORATORY_MULTIPLIER: f64 = 2.0;

pub const MIN_UPDATE_FREQUENCY: i32 = 1;
pub const MAX_UPDATE_FREQUENCY: i32 = 5;

/// Tunables for the maintenance duration formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    pub base_minutes: f64,
    pub minutes_per_square_metre: f64,
    pub study_multiplier: f64,
    pub office_multiplier: f64,
    pub laboratory_multiplier: f64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            base_minutes: BASE_MINUTES,
            minutes_per_square_metre: MINUTES_PER_SQUARE_METRE,
            study_multiplier: STUDY_MULTIPLIER,
            office_multiplier: OFFICE_MULTIPLIER,
            laboratory_multiplier: LABORATORY_MULTIPLIER,
        }
    }
}

impl MaintenanceConfig {
    /// Parse from JSON. Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let settings = [
            ("base_minutes", self.base_minutes),
            ("study_multiplier", self.study_multiplier),
            ("office_multiplier", self.office_multiplier),
            ("laboratory_multiplier", self.laboratory_multiplier),
        ];
        for (name, value) in settings {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositiveSetting { name });
            }
        }
        if self.minutes_per_square_metre.is_nan() || self.minutes_per_square_metre < 0.0 {
            return Err(ConfigError::NonPositiveSetting {
                name: "minutes_per_square_metre",
            });
        }
        Ok(())
    }

    pub fn multiplier(&self, room_type: RoomType) -> f64 {
        match room_type {
            RoomType::Study => self.study_multiplier,
            RoomType::Office => self.office_multiplier,
            RoomType::Laboratory => self.laboratory_multiplier,
        }
    }
}

/// Accepted range for a periodic signal's update frequency, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalLimits {
    pub min_update_frequency: i32,
    pub max_update_frequency: i32,
}

impl Default for SignalLimits {
    fn default() -> Self {
        Self {
            min_update_frequency: MIN_UPDATE_FREQUENCY,
            max_update_frequency: MAX_UPDATE_FREQUENCY,
        }
    }
}

impl SignalLimits {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let limits: Self = serde_json::from_str(json)?;
        if limits.min_update_frequency < 1 {
            return Err(ConfigError::NonPositiveSetting {
                name: "min_update_frequency",
            });
        }
        if limits.max_update_frequency < limits.min_update_frequency {
            return Err(ConfigError::NonPositiveSetting {
                name: "max_update_frequency",
            });
        }
        Ok(limits)
    }

    pub fn contains(&self, frequency: i32) -> bool {
        (self.min_update_frequency..=self.max_update_frequency).contains(&frequency)
    }
}
