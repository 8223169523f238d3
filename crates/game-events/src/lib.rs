//! Shared game-state types for the per-tick decision core.
//!
//! This crate contains pure data structures with no decision logic.
//! It is a dependency for all other crates in the workspace.

pub mod geometry;
pub mod lifecycle;
pub mod player;
pub mod snapshot;
pub mod unit;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export geometry types
pub use geometry::{MapBounds, Point2};

// Re-export identity and player types
pub use player::{Alliance, GameInfo, PlayerId, PlayerInfo, PlayerKind};

// Re-export unit types
pub use unit::{UnitTag, UnitType};

// Re-export snapshot types
pub use snapshot::{
    Ability, AreaEffect, EffectKind, FrameSnapshot, UnitOrder, UnitSnapshot, Visibility,
};

// Re-export lifecycle events
pub use lifecycle::LifecycleEvent;
