use crate::error::{ConfigError, ConfigResult};
use crate::hazard::HazardEvaluator;
use serde::{Deserialize, Serialize};

/// Smallest permitted room area, in square metres.
pub const MIN_AREA: f64 = 5.0;

/// Hazard level above which a room must be evacuated.
const EVACUATION_HAZARD_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    Study,
    Office,
    Laboratory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomState {
    Open,
    Maintenance,
    Evacuate,
}

#[derive(Debug)]
pub struct Room {
    number: u32,
    room_type: RoomType,
    area: f64,
    fire_drill: bool,
    // Owned here, but only ever written by a maintenance rotation
    maintenance: bool,
    hazard_evaluator: Option<HazardEvaluator>,
}

impl Room {
    pub fn new(number: u32, room_type: RoomType, area: f64) -> ConfigResult<Self> {
        if area.is_nan() || area < MIN_AREA {
            return Err(ConfigError::RoomAreaTooSmall { area, min: MIN_AREA });
        }
        Ok(Self {
            number,
            room_type,
            area,
            fire_drill: false,
            maintenance: false,
            hazard_evaluator: None,
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    /// Area used for maintenance planning. Never below [`MIN_AREA`].
    pub fn effective_area(&self) -> f64 {
        self.area.max(MIN_AREA)
    }

    pub fn fire_drill_ongoing(&self) -> bool {
        self.fire_drill
    }

    pub fn set_fire_drill(&mut self, ongoing: bool) {
        self.fire_drill = ongoing;
    }

    pub fn maintenance_ongoing(&self) -> bool {
        self.maintenance
    }

    pub(crate) fn set_maintenance(&mut self, ongoing: bool) {
        self.maintenance = ongoing;
    }

    pub fn hazard_evaluator(&self) -> Option<&HazardEvaluator> {
        self.hazard_evaluator.as_ref()
    }

    pub fn set_hazard_evaluator(&mut self, evaluator: HazardEvaluator) {
        self.hazard_evaluator = Some(evaluator);
    }

    pub fn clear_hazard_evaluator(&mut self) {
        self.hazard_evaluator = None;
    }

    pub fn evaluate_state(&self) -> RoomState {
        let hazardous = self
            .hazard_evaluator
            .as_ref()
            .is_some_and(|evaluator| evaluator.evaluate() > EVACUATION_HAZARD_THRESHOLD);

        if self.fire_drill || hazardous {
            RoomState::Evacuate
        } else if self.maintenance {
            RoomState::Maintenance
        } else {
            RoomState::Open
        }
    }

    pub fn is_evacuating(&self) -> bool {
        self.evaluate_state() == RoomState::Evacuate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::SharedSensor;
    use crate::sensors::HazardSensor;
    use std::rc::Rc;

    struct Fixed(u8);

    impl HazardSensor for Fixed {
        fn hazard_level(&self) -> u8 {
            self.0
        }
    }

    #[test]
    fn test_area_below_minimum_rejected() {
        assert!(Room::new(1, RoomType::Study, 4.9).is_err());
        assert!(Room::new(1, RoomType::Study, MIN_AREA).is_ok());
    }

    #[test]
    fn test_state_precedence() {
        let mut room = Room::new(101, RoomType::Office, 20.0).unwrap();
        assert_eq!(room.evaluate_state(), RoomState::Open);

        room.set_maintenance(true);
        assert_eq!(room.evaluate_state(), RoomState::Maintenance);

        room.set_fire_drill(true);
        assert_eq!(room.evaluate_state(), RoomState::Evacuate);
        assert!(room.is_evacuating());
    }

    #[test]
    fn test_hazard_above_threshold_evacuates() {
        let mut room = Room::new(102, RoomType::Laboratory, 30.0).unwrap();
        let sensor: SharedSensor = Rc::new(Fixed(50));
        room.set_hazard_evaluator(HazardEvaluator::rule_based(vec![sensor]));
        assert!(!room.is_evacuating());

        let sensor: SharedSensor = Rc::new(Fixed(51));
        room.set_hazard_evaluator(HazardEvaluator::rule_based(vec![sensor]));
        assert!(room.is_evacuating());

        room.clear_hazard_evaluator();
        assert!(!room.is_evacuating());
    }
}
