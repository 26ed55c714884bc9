use crate::config::MaintenanceConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::maintenance::MaintenanceRotation;
use crate::room::{Room, RoomType};
use crate::timed::{shared, Shared, TimedItemManager};
use std::rc::Rc;
use tracing::info;

/// A floor's rooms and its maintenance rotation.
#[derive(Debug)]
pub struct Floor {
    number: u32,
    rooms: Vec<Shared<Room>>,
    maintenance: Option<Shared<MaintenanceRotation>>,
}

impl Floor {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            rooms: Vec::new(),
            maintenance: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn rooms(&self) -> &[Shared<Room>] {
        &self.rooms
    }

    pub fn room_by_number(&self, number: u32) -> Option<Shared<Room>> {
        self.rooms
            .iter()
            .find(|room| room.borrow().number() == number)
            .cloned()
    }

    pub fn add_room(&mut self, room: Room) -> ConfigResult<Shared<Room>> {
        if self.room_by_number(room.number()).is_some() {
            return Err(ConfigError::DuplicateRoomNumber {
                room_number: room.number(),
            });
        }
        let room = shared(room);
        self.rooms.push(room.clone());
        Ok(room)
    }

    fn contains(&self, room: &Shared<Room>) -> bool {
        self.rooms.iter().any(|candidate| Rc::ptr_eq(candidate, room))
    }

    pub fn maintenance_schedule(&self) -> Option<&Shared<MaintenanceRotation>> {
        self.maintenance.as_ref()
    }

    pub fn create_maintenance_schedule(
        &mut self,
        room_order: Vec<Shared<Room>>,
        manager: &mut TimedItemManager,
    ) -> ConfigResult<()> {
        self.create_maintenance_schedule_with(room_order, MaintenanceConfig::default(), manager)
    }

    /// Replace the floor's rotation with one over `room_order`.
    ///
    /// The order is fully validated before anything changes: every room must
    /// belong to this floor and no room may directly follow itself. On success
    /// the previous rotation is retired, releasing its current room, before
    /// the new rotation flags its first room. Handles to the old rotation held
    /// elsewhere stay valid but no longer advance.
    pub fn create_maintenance_schedule_with(
        &mut self,
        room_order: Vec<Shared<Room>>,
        config: MaintenanceConfig,
        manager: &mut TimedItemManager,
    ) -> ConfigResult<()> {
        MaintenanceRotation::validate_order(&room_order)?;
        if let Some(stranger) = room_order.iter().find(|room| !self.contains(room)) {
            return Err(ConfigError::RoomNotOnFloor {
                room_number: stranger.borrow().number(),
            });
        }
        config.validate()?;

        if let Some(previous) = self.maintenance.take() {
            previous.borrow_mut().retire();
        }

        let rotation = MaintenanceRotation::new(room_order, config, manager)?;
        info!(
            floor = self.number,
            rooms = rotation.borrow().room_order().len(),
            "maintenance schedule created"
        );
        self.maintenance = Some(rotation);
        Ok(())
    }

    /// Start a fire drill in every room of `room_type`, or in every room when
    /// no type is given.
    pub fn fire_drill(&self, room_type: Option<RoomType>) {
        for room in &self.rooms {
            let mut room = room.borrow_mut();
            let selected = match room_type {
                Some(room_type) => room.room_type() == room_type,
                None => true,
            };
            if selected {
                room.set_fire_drill(true);
            }
        }
    }

    pub fn cancel_fire_drill(&self) {
        for room in &self.rooms {
            room.borrow_mut().set_fire_drill(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_with_rooms() -> Floor {
        let mut floor = Floor::new(1);
        floor.add_room(Room::new(101, RoomType::Study, 10.0).unwrap()).unwrap();
        floor.add_room(Room::new(102, RoomType::Office, 10.0).unwrap()).unwrap();
        floor.add_room(Room::new(103, RoomType::Laboratory, 10.0).unwrap()).unwrap();
        floor
    }

    #[test]
    fn test_duplicate_room_number_rejected() {
        let mut floor = floor_with_rooms();
        let result = floor.add_room(Room::new(101, RoomType::Office, 12.0).unwrap());
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateRoomNumber { room_number: 101 })
        ));
        assert_eq!(floor.rooms().len(), 3);
    }

    #[test]
    fn test_room_from_other_floor_rejected() {
        let mut manager = TimedItemManager::new();
        let mut floor = floor_with_rooms();
        let mut other = Floor::new(2);
        let outsider = other.add_room(Room::new(201, RoomType::Study, 10.0).unwrap()).unwrap();

        let order = vec![floor.rooms()[0].clone(), outsider];
        let result = floor.create_maintenance_schedule(order, &mut manager);
        assert!(matches!(
            result,
            Err(ConfigError::RoomNotOnFloor { room_number: 201 })
        ));
        assert!(floor.maintenance_schedule().is_none());
        assert_eq!(manager.registered_count(), 0);
    }

    #[test]
    fn test_replacing_schedule_releases_previous_room() {
        let mut manager = TimedItemManager::new();
        let mut floor = floor_with_rooms();
        let rooms = floor.rooms().to_vec();

        floor
            .create_maintenance_schedule(vec![rooms[0].clone(), rooms[1].clone()], &mut manager)
            .unwrap();
        assert!(rooms[0].borrow().maintenance_ongoing());

        floor
            .create_maintenance_schedule(vec![rooms[2].clone(), rooms[1].clone()], &mut manager)
            .unwrap();
        assert!(!rooms[0].borrow().maintenance_ongoing());
        assert!(rooms[2].borrow().maintenance_ongoing());

        // The replaced rotation is dropped and no longer advanced
        assert_eq!(manager.registered_count(), 2);
        assert_eq!(manager.live_count(), 1);
    }

    #[test]
    fn test_failed_replacement_keeps_existing_schedule() {
        let mut manager = TimedItemManager::new();
        let mut floor = floor_with_rooms();
        let rooms = floor.rooms().to_vec();

        floor
            .create_maintenance_schedule(vec![rooms[0].clone(), rooms[1].clone()], &mut manager)
            .unwrap();
        let result =
            floor.create_maintenance_schedule(vec![rooms[1].clone(), rooms[1].clone()], &mut manager);

        assert!(result.is_err());
        assert!(floor.maintenance_schedule().is_some());
        assert!(rooms[0].borrow().maintenance_ongoing());
    }

    #[test]
    fn test_fire_drill_by_type() {
        let floor = floor_with_rooms();
        floor.fire_drill(Some(RoomType::Office));

        let flags: Vec<bool> = floor
            .rooms()
            .iter()
            .map(|room| room.borrow().fire_drill_ongoing())
            .collect();
        assert_eq!(flags, vec![false, true, false]);

        floor.fire_drill(None);
        assert!(floor.rooms().iter().all(|room| room.borrow().is_evacuating()));

        floor.cancel_fire_drill();
        assert!(floor.rooms().iter().all(|room| !room.borrow().fire_drill_ongoing()));
    }
}
