use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Anything advanced one logical minute at a time.
pub trait TimedItem {
    fn elapse_one_minute(&mut self);
}

/// Handle through which simulation entities are shared between their owner,
/// the manager and any observers.
pub type Shared<T> = Rc<RefCell<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ManagerStats {
    pub total_registered: u32,
    pub minutes_elapsed: u64,
    pub last_tick_advanced: u32,
    pub last_tick_dropped: u32,
}

/// Scheduler that advances every registered timed item once per simulated
/// minute, strictly in registration order.
///
/// The manager does not own its items. It keeps weak handles; an item whose
/// owner has dropped it is no longer advanced. Items are expected to be
/// registered by whoever constructs them, which is why constructors across the
/// crate take `&mut TimedItemManager`.
///
/// Single-threaded by construction (`Rc`/`RefCell`): registration and ticking
/// can never interleave.
#[derive(Default)]
pub struct TimedItemManager {
    items: Vec<Weak<RefCell<dyn TimedItem>>>,
    stats: ManagerStats,
}

impl TimedItemManager {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            stats: ManagerStats::default(),
        }
    }

    /// Append an item to the advance list. Duplicates are permitted and are
    /// advanced once per registration.
    pub fn register_timed_item(&mut self, item: Shared<dyn TimedItem>) {
        self.items.push(Rc::downgrade(&item));
        self.stats.total_registered += 1;
        debug!(position = self.items.len() - 1, "registered timed item");
    }

    /// Advance every live registered item by one minute, in registration
    /// order. Later items observe the post-advance state of earlier ones.
    pub fn elapse_one_minute(&mut self) {
        let mut advanced = 0u32;
        let mut dropped = 0u32;

        for item in &self.items {
            match item.upgrade() {
                Some(item) => {
                    item.borrow_mut().elapse_one_minute();
                    advanced += 1;
                }
                None => dropped += 1,
            }
        }

        self.stats.minutes_elapsed += 1;
        self.stats.last_tick_advanced = advanced;
        self.stats.last_tick_dropped = dropped;

        debug!(
            minute = self.stats.minutes_elapsed,
            advanced, dropped, "elapsed one minute"
        );
    }

    /// Number of registrations, including ones whose item has since been dropped.
    pub fn registered_count(&self) -> usize {
        self.items.len()
    }

    pub fn live_count(&self) -> usize {
        self.items.iter().filter(|item| item.strong_count() > 0).count()
    }

    pub fn get_stats(&self) -> &ManagerStats {
        &self.stats
    }
}

impl core::fmt::Debug for TimedItemManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimedItemManager")
            .field("registered", &self.items.len())
            .field("stats", &self.stats)
            .finish()
    }
}
