//! Per-tick frame snapshots.
//!
//! A [`FrameSnapshot`] is the complete visible state handed to the
//! decision core each tick. Snapshots are owned by the external ingestion
//! layer; the core looks units up by tag and never retains resolved
//! references across ticks.

use serde::{Deserialize, Serialize};

use crate::{Alliance, PlayerId, Point2, UnitTag, UnitType};
use crate::lifecycle::LifecycleEvent;

/// Ability carried by a unit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Attack,
    Move,
    Load,
    Unload,
    Smart,
    Stop,
}

/// One entry in a unit's order queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOrder {
    pub ability: Ability,
}

/// How a unit is currently displayed to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Fully visible this tick
    Visible,
    /// Remembered position of a unit no longer in vision
    Snapshot,
    /// Known to exist but not currently displayable
    Hidden,
}

/// Read-only view of one unit for the current tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub tag: UnitTag,
    pub unit_type: UnitType,
    pub owner: PlayerId,
    pub alliance: Alliance,
    pub position: Point2,
    pub health: f32,
    pub health_max: f32,
    pub cargo_space_taken: u32,
    pub cargo_space_max: u32,
    /// Construction progress in `[0, 1]`; 1.0 means fully built.
    pub build_progress: f32,
    pub display: Visibility,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orders: Vec<UnitOrder>,
    pub alive: bool,
    /// Tick at which this data was last refreshed. A value older than the
    /// frame tick marks the unit as stale.
    pub last_seen_tick: u64,
}

impl UnitSnapshot {
    /// Whether the unit is at full health.
    pub fn is_full_health(&self) -> bool {
        self.health >= self.health_max
    }

    /// Whether the unit is carrying any cargo.
    pub fn has_cargo(&self) -> bool {
        self.cargo_space_taken > 0
    }

    /// Whether the front of the order queue is an attack order.
    pub fn is_attacking(&self) -> bool {
        matches!(
            self.orders.first(),
            Some(UnitOrder {
                ability: Ability::Attack
            })
        )
    }
}

/// Kind of a map-wide area effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Long-range area-denial strike in flight
    PersistentNuke,
    ScannerSweep,
    LurkerSpines,
    CorrosiveBile,
}

/// An active area effect with its anchor positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaEffect {
    pub kind: EffectKind,
    pub positions: Vec<Point2>,
}

impl AreaEffect {
    /// The effect's primary anchor position, if it has one.
    pub fn anchor(&self) -> Option<Point2> {
        self.positions.first().copied()
    }
}

/// Complete visible state for one simulation tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub units: Vec<UnitSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<AreaEffect>,
    /// Lifecycle events delivered alongside this frame.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<LifecycleEvent>,
}

impl FrameSnapshot {
    /// Creates a frame with no effects or events.
    pub fn new(tick: u64, units: Vec<UnitSnapshot>) -> Self {
        Self {
            tick,
            units,
            effects: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Resolves a tag against this frame.
    pub fn unit(&self, tag: UnitTag) -> Option<&UnitSnapshot> {
        self.units.iter().find(|u| u.tag == tag)
    }

    /// Parses one frame from a JSONL line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Serializes this frame as a single JSONL line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
