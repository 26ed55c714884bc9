//! # Building Management Simulation
//!
//! Discrete-time simulation core for a building's environmental monitoring
//! and room-maintenance rotation. Time advances in logical minutes, driven
//! entirely by the caller; there is no wall clock and no background thread.
//!
//! ## Quick Start
//!
//! ```rust
//! use bmsim::{Floor, Room, RoomType, TimedItemManager};
//!
//! let mut manager = TimedItemManager::new();
//!
//! let mut floor = Floor::new(1);
//! let study = floor.add_room(Room::new(101, RoomType::Study, 10.0)?)?;
//! let lab = floor.add_room(Room::new(102, RoomType::Laboratory, 20.0)?)?;
//! floor.create_maintenance_schedule(vec![study.clone(), lab], &mut manager)?;
//!
//! for _ in 0..10 {
//!     manager.elapse_one_minute();
//! }
//!
//! let rotation = floor.maintenance_schedule().unwrap().borrow();
//! println!("{:?}", rotation.get_state());
//! # Ok::<(), bmsim::ConfigError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`timed`] - `TimedItem` contract and the registration-order scheduler
//! - [`signal`] - Cyclic reading series stepped every minute
//! - [`sensors`] - Occupancy and CO2 sensors built on signals
//! - [`hazard`] - Rule-based and weighting-based hazard aggregation
//! - [`room`] - Room state (maintenance, fire drill, evacuation)
//! - [`maintenance`] - Per-floor maintenance rotation state machine
//! - [`floor`] - Room membership and rotation ownership
//! - [`config`] - Tunables with serde-backed defaults
//! - [`error`] - Construction-time configuration errors

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod error;
pub mod floor;
pub mod hazard;
pub mod maintenance;
pub mod room;
pub mod sensors;
pub mod signal;
pub mod timed;

// Re-export main public types for convenience
pub use config::{MaintenanceConfig, SignalLimits};
pub use error::{ConfigError, ConfigResult};
pub use floor::Floor;
pub use hazard::{HazardEvaluator, RuleBasedEvaluator, SharedSensor, WeightingBasedEvaluator};
pub use maintenance::{MaintenanceRotation, RotationState};
pub use room::{Room, RoomState, RoomType};
pub use sensors::{CarbonDioxideSensor, ComfortSensor, HazardSensor, OccupancySensor, SensorCategory};
pub use signal::{PeriodicSignal, SignalState};
pub use timed::{shared, Shared, TimedItem, TimedItemManager};
