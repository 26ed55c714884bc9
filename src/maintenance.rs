use crate::config::MaintenanceConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::room::Room;
use crate::timed::{shared, Shared, TimedItem, TimedItemManager};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    pub current_room_number: u32,
    pub current_elapsed: u32,
    pub required_duration: u32,
}

/// Cycles a fixed order of rooms through maintenance, one room at a time.
///
/// The current room is the one carrying the maintenance flag. Each minute the
/// rotation either accumulates time on it or, once the room's required
/// duration has been reached, hands the flag to the next room in the order
/// (wrapping around). Nothing progresses while the current room is being
/// evacuated.
///
/// A retired or dropped rotation releases its current room and never flags
/// another one.
#[derive(Debug)]
pub struct MaintenanceRotation {
    room_order: Vec<Shared<Room>>,
    current_index: usize,
    current_elapsed: u32,
    config: MaintenanceConfig,
    retired: bool,
}

impl MaintenanceRotation {
    /// Validate the order, flag its first room and register with `manager`.
    ///
    /// Floor membership is not checked here; see
    /// [`Floor::create_maintenance_schedule`](crate::floor::Floor::create_maintenance_schedule).
    pub fn new(
        room_order: Vec<Shared<Room>>,
        config: MaintenanceConfig,
        manager: &mut TimedItemManager,
    ) -> ConfigResult<Shared<Self>> {
        Self::validate_order(&room_order)?;
        config.validate()?;

        room_order[0].borrow_mut().set_maintenance(true);

        let rotation = shared(Self {
            room_order,
            current_index: 0,
            current_elapsed: 0,
            config,
            retired: false,
        });
        manager.register_timed_item(rotation.clone());
        Ok(rotation)
    }

    /// Rejects an empty order and any room directly followed by itself,
    /// including the wrap from last back to first.
    pub fn validate_order(room_order: &[Shared<Room>]) -> ConfigResult<()> {
        if room_order.is_empty() {
            return Err(ConfigError::EmptyRoomOrder);
        }
        if room_order.len() < 2 {
            return Ok(());
        }

        let successors = room_order.iter().cycle().skip(1);
        for (room, next) in room_order.iter().zip(successors) {
            if Rc::ptr_eq(room, next) {
                return Err(ConfigError::ConsecutiveDuplicateRoom {
                    room_number: room.borrow().number(),
                });
            }
        }
        Ok(())
    }

    /// Minutes of maintenance `room` needs, rounded to the nearest minute and
    /// never less than one.
    pub fn required_duration(&self, room: &Room) -> u32 {
        let base = room.effective_area() * self.config.minutes_per_square_metre
            + self.config.base_minutes;
        let duration = (base * self.config.multiplier(room.room_type())).round();
        duration.max(1.0) as u32
    }

    pub fn current_room(&self) -> &Shared<Room> {
        &self.room_order[self.current_index]
    }

    pub fn current_elapsed_minutes(&self) -> u32 {
        self.current_elapsed
    }

    pub fn room_order(&self) -> &[Shared<Room>] {
        &self.room_order
    }

    pub fn config(&self) -> &MaintenanceConfig {
        &self.config
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// Clear the current room's flag and stop for good. Called by the floor
    /// when this rotation is replaced, since other handles may still exist.
    pub(crate) fn retire(&mut self) {
        if self.retired {
            return;
        }
        self.current_room().borrow_mut().set_maintenance(false);
        self.retired = true;
        info!(
            room = self.current_room().borrow().number(),
            "maintenance rotation retired"
        );
    }

    /// Move straight on to the next room, whatever time has accumulated.
    pub fn skip_current_maintenance(&mut self) {
        if self.retired {
            return;
        }
        info!(
            room = self.current_room().borrow().number(),
            elapsed = self.current_elapsed,
            "skipping maintenance"
        );
        self.advance_to_next_room();
    }

    fn advance_to_next_room(&mut self) {
        let previous = self.current_room().borrow().number();
        self.current_room().borrow_mut().set_maintenance(false);

        self.current_index = (self.current_index + 1) % self.room_order.len();
        self.current_room().borrow_mut().set_maintenance(true);
        self.current_elapsed = 0;

        info!(
            from = previous,
            to = self.current_room().borrow().number(),
            "maintenance moved to next room"
        );
    }

    pub fn get_state(&self) -> RotationState {
        let room = self.current_room().borrow();
        RotationState {
            current_room_number: room.number(),
            current_elapsed: self.current_elapsed,
            required_duration: self.required_duration(&room),
        }
    }
}

impl TimedItem for MaintenanceRotation {
    fn elapse_one_minute(&mut self) {
        if self.retired {
            return;
        }
        let (number, evacuating, required) = {
            let room = self.current_room().borrow();
            debug_assert!(
                room.maintenance_ongoing(),
                "Current room #{} is not flagged for maintenance",
                room.number()
            );
            (room.number(), room.is_evacuating(), self.required_duration(&room))
        };

        if evacuating {
            warn!(room = number, "maintenance paused during evacuation");
            return;
        }

        if self.current_elapsed >= required {
            self.advance_to_next_room();
        } else {
            self.current_elapsed += 1;
        }
    }
}

impl Drop for MaintenanceRotation {
    fn drop(&mut self) {
        if self.retired {
            return;
        }
        if let Ok(mut room) = self.room_order[self.current_index].try_borrow_mut() {
            room.set_maintenance(false);
        }
    }
}
