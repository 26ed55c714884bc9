use crate::config::{SignalLimits, MAX_UPDATE_FREQUENCY, MIN_UPDATE_FREQUENCY};
use crate::error::{ConfigError, ConfigResult};
use crate::timed::{shared, Shared, TimedItem, TimedItemManager};
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

const_assert!(MIN_UPDATE_FREQUENCY >= 1);
const_assert!(MIN_UPDATE_FREQUENCY <= MAX_UPDATE_FREQUENCY);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalState {
    pub current_reading: u32,
    pub elapsed_minutes: u64,
    pub update_frequency: u32,
}

/// A cyclic series of raw readings, stepped once per simulated minute.
///
/// Each reading is held for `update_frequency` consecutive minutes; after
/// `readings.len() * update_frequency` minutes the series wraps back to the
/// first reading. What a reading means is up to the sensor built on top.
#[derive(Debug, Clone)]
pub struct PeriodicSignal {
    readings: Vec<u32>,
    update_frequency: u32,
    elapsed_minutes: u64,
    current_reading: u32,
}

impl PeriodicSignal {
    /// Validate, construct and register with `manager` using the default
    /// frequency limits.
    pub fn new(
        readings: &[i32],
        update_frequency: i32,
        manager: &mut TimedItemManager,
    ) -> ConfigResult<Shared<Self>> {
        Self::with_limits(readings, update_frequency, SignalLimits::default(), manager)
    }

    pub fn with_limits(
        readings: &[i32],
        update_frequency: i32,
        limits: SignalLimits,
        manager: &mut TimedItemManager,
    ) -> ConfigResult<Shared<Self>> {
        if !limits.contains(update_frequency) || update_frequency < 1 {
            return Err(ConfigError::UpdateFrequencyOutOfRange {
                frequency: update_frequency,
                min: limits.min_update_frequency,
                max: limits.max_update_frequency,
            });
        }
        if readings.is_empty() {
            return Err(ConfigError::EmptyReadings);
        }

        let readings = readings
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                u32::try_from(value).map_err(|_| ConfigError::NegativeReading { index, value })
            })
            .collect::<ConfigResult<Vec<u32>>>()?;

        let signal = shared(Self {
            current_reading: readings[0],
            readings,
            update_frequency: update_frequency as u32,
            elapsed_minutes: 0,
        });
        manager.register_timed_item(signal.clone());
        Ok(signal)
    }

    fn index_at(&self, elapsed_minutes: u64) -> usize {
        let frequency = u64::from(self.update_frequency);
        let rotation = self.readings.len() as u64 * frequency;
        ((elapsed_minutes % rotation) / frequency) as usize
    }

    pub fn current_reading(&self) -> u32 {
        self.current_reading
    }

    pub fn elapsed_minutes(&self) -> u64 {
        self.elapsed_minutes
    }

    pub fn update_frequency(&self) -> u32 {
        self.update_frequency
    }

    pub fn readings(&self) -> &[u32] {
        &self.readings
    }

    /// Minutes until the series returns to its first reading.
    pub fn rotation_minutes(&self) -> u64 {
        self.readings.len() as u64 * u64::from(self.update_frequency)
    }

    pub fn get_state(&self) -> SignalState {
        SignalState {
            current_reading: self.current_reading,
            elapsed_minutes: self.elapsed_minutes,
            update_frequency: self.update_frequency,
        }
    }
}

impl TimedItem for PeriodicSignal {
    fn elapse_one_minute(&mut self) {
        self.elapsed_minutes += 1;
        let index = self.index_at(self.elapsed_minutes);

        debug_assert!(
            index < self.readings.len(),
            "Reading index {} out of bounds for {} readings",
            index,
            self.readings.len()
        );

        self.current_reading = self.readings[index];
    }
}
