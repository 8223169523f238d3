//! Per-tick unit allocation across behavior managers.
//!
//! Each tick the [`UnitAllocator`] recomputes the set of controllable
//! units from the frame snapshot and partitions it between the scouting,
//! harassment, and combat roles. Managers plug in through the traits in
//! [`managers`]; the allocator only decides ownership, never behavior.

pub mod allocator;
pub mod config;
pub mod managers;

pub use allocator::{Assignment, UnitAllocator};
pub use config::{CommanderConfig, ConfigError};
pub use managers::{BaseManager, CommandSink, HarassManager, ProductionSink, ScoutManager};
