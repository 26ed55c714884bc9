use thiserror::Error;

/// Rejected configuration. Every constructor in the crate validates its
/// inputs up front and reports problems through this type; once construction
/// succeeds the simulation itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("update frequency {frequency} must be between {min} and {max} minutes (inclusive)")]
    UpdateFrequencyOutOfRange { frequency: i32, min: i32, max: i32 },

    #[error("sensor readings must contain at least one element")]
    EmptyReadings,

    #[error("sensor reading {value} at index {index} is negative")]
    NegativeReading { index: usize, value: i32 },

    #[error("sensor parameter `{name}` is invalid: {reason}")]
    InvalidSensorParameter { name: &'static str, reason: &'static str },

    #[error("weighting {weighting} must be between 0 and 100 (inclusive)")]
    WeightingOutOfRange { weighting: i32 },

    #[error("weightings must sum to exactly 100, got {sum}")]
    WeightingSum { sum: i32 },

    #[error("sensor appears more than once in the weightings")]
    DuplicateSensor,

    #[error("maintenance room order must contain at least one room")]
    EmptyRoomOrder,

    #[error("room #{room_number} is not a room on this floor")]
    RoomNotOnFloor { room_number: u32 },

    #[error("room #{room_number} appears twice in a row in the maintenance order")]
    ConsecutiveDuplicateRoom { room_number: u32 },

    #[error("room #{room_number} already exists on this floor")]
    DuplicateRoomNumber { room_number: u32 },

    #[error("room area {area} is below the minimum of {min}")]
    RoomAreaTooSmall { area: f64, min: f64 },

    #[error("configuration value `{name}` must be positive")]
    NonPositiveSetting { name: &'static str },

    #[error("malformed configuration: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Malformed(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
