use bmsim::signal::PeriodicSignal;
use bmsim::{shared, Floor, Room, RoomType, Shared, TimedItem, TimedItemManager};
use std::cell::RefCell;
use std::rc::Rc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Records its id in a shared log each minute.
struct Recorder {
    id: u32,
    advanced: u32,
    log: Rc<RefCell<Vec<u32>>>,
}

impl TimedItem for Recorder {
    fn elapse_one_minute(&mut self) {
        self.advanced += 1;
        self.log.borrow_mut().push(self.id);
    }
}

/// Copies the upstream counter when advanced.
struct Follower {
    upstream: Shared<Recorder>,
    observed: Vec<u32>,
}

impl TimedItem for Follower {
    fn elapse_one_minute(&mut self) {
        self.observed.push(self.upstream.borrow().advanced);
    }
}

fn recorders(count: u32, manager: &mut TimedItemManager) -> (Vec<Shared<Recorder>>, Rc<RefCell<Vec<u32>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let items = (0..count)
        .map(|id| {
            let item = shared(Recorder {
                id,
                advanced: 0,
                log: log.clone(),
            });
            manager.register_timed_item(item.clone());
            item
        })
        .collect();
    (items, log)
}

#[test]
fn test_every_item_advanced_once_per_minute() {
    init_tracing();
    let mut manager = TimedItemManager::new();
    let (items, log) = recorders(4, &mut manager);

    manager.elapse_one_minute();
    assert!(items.iter().all(|item| item.borrow().advanced == 1));
    assert_eq!(log.borrow().len(), 4);

    manager.elapse_one_minute();
    assert!(items.iter().all(|item| item.borrow().advanced == 2));
    assert_eq!(log.borrow().len(), 8);

    let stats = manager.get_stats();
    assert_eq!(stats.minutes_elapsed, 2);
    assert_eq!(stats.total_registered, 4);
    assert_eq!(stats.last_tick_advanced, 4);
}

#[test]
fn test_items_advanced_in_registration_order() {
    let mut manager = TimedItemManager::new();
    let (_items, log) = recorders(3, &mut manager);

    manager.elapse_one_minute();
    manager.elapse_one_minute();
    assert_eq!(*log.borrow(), vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn test_later_items_see_earlier_advances() {
    let mut manager = TimedItemManager::new();
    let (items, _log) = recorders(1, &mut manager);
    let follower = shared(Follower {
        upstream: items[0].clone(),
        observed: Vec::new(),
    });
    manager.register_timed_item(follower.clone());

    manager.elapse_one_minute();
    manager.elapse_one_minute();
    assert_eq!(follower.borrow().observed, vec![1, 2]);
}

#[test]
fn test_earlier_items_see_previous_minute() {
    let mut manager = TimedItemManager::new();
    let upstream = shared(Recorder {
        id: 0,
        advanced: 0,
        log: Rc::new(RefCell::new(Vec::new())),
    });
    let follower = shared(Follower {
        upstream: upstream.clone(),
        observed: Vec::new(),
    });
    manager.register_timed_item(follower.clone());
    manager.register_timed_item(upstream.clone());

    manager.elapse_one_minute();
    manager.elapse_one_minute();
    assert_eq!(follower.borrow().observed, vec![0, 1]);
}

#[test]
fn test_signals_and_rotations_share_one_clock() {
    let mut manager = TimedItemManager::new();
    let signal = PeriodicSignal::new(&[1, 2, 3], 2, &mut manager).unwrap();

    let mut floor = Floor::new(1);
    let a = floor.add_room(Room::new(1, RoomType::Study, 5.0).unwrap()).unwrap();
    let b = floor.add_room(Room::new(2, RoomType::Study, 5.0).unwrap()).unwrap();
    floor.create_maintenance_schedule(vec![a, b], &mut manager).unwrap();
    assert_eq!(manager.registered_count(), 2);

    for _ in 0..4 {
        manager.elapse_one_minute();
    }

    assert_eq!(signal.borrow().elapsed_minutes(), 4);
    assert_eq!(signal.borrow().current_reading(), 3);
    let rotation = floor.maintenance_schedule().unwrap();
    assert_eq!(rotation.borrow().current_elapsed_minutes(), 4);
}
