use crate::error::{ConfigError, ConfigResult};
use crate::sensors::{HazardSensor, SensorCategory, MAX_LEVEL};
use std::rc::Rc;

pub type SharedSensor = Rc<dyn HazardSensor>;

const WEIGHTING_TOTAL: i32 = 100;

/// Averages the non-occupancy sensors, short-circuiting to 100 when any of
/// them is maxed out. An occupancy sensor, if present, scales the average by
/// `floor(occupancy / 100)`, so it only passes the average through when the
/// room is at capacity.
#[derive(Clone, Default)]
pub struct RuleBasedEvaluator {
    sensors: Vec<SharedSensor>,
}

impl RuleBasedEvaluator {
    pub fn new(sensors: Vec<SharedSensor>) -> Self {
        Self { sensors }
    }

    pub fn sensors(&self) -> &[SharedSensor] {
        &self.sensors
    }

    pub fn evaluate(&self) -> u8 {
        match self.sensors.as_slice() {
            [] => 0,
            [only] => only.hazard_level(),
            sensors => Self::evaluate_many(sensors),
        }
    }

    fn evaluate_many(sensors: &[SharedSensor]) -> u8 {
        let mut occupancy_level = None;
        let mut total = 0u32;
        let mut count = 0u32;

        for sensor in sensors {
            let level = sensor.hazard_level();
            match sensor.category() {
                // Last occupancy sensor wins if several are supplied
                SensorCategory::Occupancy => occupancy_level = Some(level),
                SensorCategory::Environmental => {
                    if level == MAX_LEVEL {
                        return MAX_LEVEL;
                    }
                    total += u32::from(level);
                    count += 1;
                }
            }
        }

        let average = if count == 0 { 0 } else { total / count };
        let scaled = match occupancy_level {
            Some(occupancy) => average * (u32::from(occupancy) / u32::from(MAX_LEVEL)),
            None => average,
        };

        debug_assert!(scaled <= u32::from(MAX_LEVEL), "Hazard level {} above 100", scaled);
        scaled as u8
    }
}

// Data pointers only; vtable addresses are not unique per type.
fn same_sensor(a: &SharedSensor, b: &SharedSensor) -> bool {
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}

/// Weighted average of sensor hazard levels, where each sensor carries a
/// percentage weighting and the weightings sum to exactly 100. A sensor may
/// appear only once.
#[derive(Clone)]
pub struct WeightingBasedEvaluator {
    weightings: Vec<(SharedSensor, u8)>,
}

impl WeightingBasedEvaluator {
    pub fn new(weightings: Vec<(SharedSensor, i32)>) -> ConfigResult<Self> {
        let mut sum = 0;
        let mut validated = Vec::with_capacity(weightings.len());

        for (sensor, weighting) in weightings {
            if !(0..=WEIGHTING_TOTAL).contains(&weighting) {
                return Err(ConfigError::WeightingOutOfRange { weighting });
            }
            if validated.iter().any(|(existing, _)| same_sensor(existing, &sensor)) {
                return Err(ConfigError::DuplicateSensor);
            }
            sum += weighting;
            validated.push((sensor, weighting as u8));
        }

        if sum != WEIGHTING_TOTAL {
            return Err(ConfigError::WeightingSum { sum });
        }

        Ok(Self {
            weightings: validated,
        })
    }

    /// Configured weightings, in the order they were supplied.
    pub fn get_weightings(&self) -> Vec<u8> {
        self.weightings.iter().map(|(_, weighting)| *weighting).collect()
    }

    pub fn sensors(&self) -> impl Iterator<Item = &SharedSensor> {
        self.weightings.iter().map(|(sensor, _)| sensor)
    }

    pub fn evaluate(&self) -> u8 {
        let weighted: u32 = self
            .weightings
            .iter()
            .map(|(sensor, weighting)| u32::from(sensor.hazard_level()) * u32::from(*weighting))
            .sum();

        // Half-up rounding of weighted / 100
        let level = (weighted + 50) / 100;
        debug_assert!(level <= u32::from(MAX_LEVEL), "Hazard level {} above 100", level);
        level as u8
    }
}

/// The two supported hazard aggregation strategies.
#[derive(Clone)]
pub enum HazardEvaluator {
    RuleBased(RuleBasedEvaluator),
    WeightingBased(WeightingBasedEvaluator),
}

impl HazardEvaluator {
    pub fn rule_based(sensors: Vec<SharedSensor>) -> Self {
        HazardEvaluator::RuleBased(RuleBasedEvaluator::new(sensors))
    }

    pub fn weighting_based(weightings: Vec<(SharedSensor, i32)>) -> ConfigResult<Self> {
        Ok(HazardEvaluator::WeightingBased(WeightingBasedEvaluator::new(weightings)?))
    }

    pub fn evaluate(&self) -> u8 {
        match self {
            HazardEvaluator::RuleBased(evaluator) => evaluator.evaluate(),
            HazardEvaluator::WeightingBased(evaluator) => evaluator.evaluate(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HazardEvaluator::RuleBased(_) => "RuleBased",
            HazardEvaluator::WeightingBased(_) => "WeightingBased",
        }
    }
}

impl core::fmt::Debug for HazardEvaluator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
