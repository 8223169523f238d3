//! Player identity and match-start information.

use serde::{Deserialize, Serialize};

use crate::{MapBounds, Point2};

/// Identifier for a player slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Sentinel for an unresolved player, e.g. when an opponent lookup
    /// finds no distinct second participant.
    pub const NONE: PlayerId = PlayerId(0);
}

/// Relationship of a unit to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alliance {
    /// The agent's own unit
    Own,
    /// An allied player's unit
    Ally,
    /// An opposing player's unit
    Enemy,
    /// Map-owned neutral unit
    Neutral,
}

/// Kind of player occupying a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    /// Competing player
    Participant,
    /// Non-competing spectator slot
    Observer,
}

/// One entry in the match player table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub kind: PlayerKind,
}

/// Match-start information, queried once and immutable thereafter.
///
/// `start_locations` holds one fixed coordinate per competing player;
/// which location belongs to which player is discovered at match start by
/// matching visible starting structures against this list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    pub bounds: MapBounds,
    pub start_locations: Vec<Point2>,
    pub players: Vec<PlayerInfo>,
}
