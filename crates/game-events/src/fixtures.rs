//! Snapshot builders for testing.
//!
//! This module provides ready-made frame and unit constructors for other
//! crates to use. Enable the `test-fixtures` feature to access them.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // game-events = { path = "../game-events", features = ["test-fixtures"] }
//!
//! use game_events::fixtures;
//!
//! let marine = fixtures::unit(1, UnitType::Marine, Alliance::Own, (10.0, 10.0), 5);
//! let frame = fixtures::frame(5, vec![marine]);
//! ```

use crate::{
    Alliance, FrameSnapshot, GameInfo, MapBounds, PlayerId, PlayerInfo, PlayerKind, Point2,
    UnitSnapshot, UnitTag, UnitType, Visibility,
};

/// Builds a unit snapshot with sensible defaults.
///
/// The unit is alive, fully built, fully healthy, visible, and freshly
/// observed at `last_seen_tick`. Owner is derived from the alliance: own
/// units belong to player 1, enemy units to player 2.
pub fn unit(
    tag: u64,
    unit_type: UnitType,
    alliance: Alliance,
    pos: (f32, f32),
    last_seen_tick: u64,
) -> UnitSnapshot {
    let owner = match alliance {
        Alliance::Own => PlayerId(1),
        Alliance::Enemy => PlayerId(2),
        Alliance::Ally | Alliance::Neutral => PlayerId::NONE,
    };
    let health_max = match unit_type {
        UnitType::Marine => 45.0,
        UnitType::Reaper => 60.0,
        UnitType::Medivac => 150.0,
        _ => 100.0,
    };
    let cargo_space_max = match unit_type {
        UnitType::Bunker => 4,
        UnitType::Medivac | UnitType::WarpPrism | UnitType::OverlordTransport => 8,
        _ => 0,
    };

    UnitSnapshot {
        tag: UnitTag(tag),
        unit_type,
        owner,
        alliance,
        position: Point2::new(pos.0, pos.1),
        health: health_max,
        health_max,
        cargo_space_taken: 0,
        cargo_space_max,
        build_progress: 1.0,
        display: Visibility::Visible,
        orders: Vec::new(),
        alive: true,
        last_seen_tick,
    }
}

/// Builds a frame with no effects or lifecycle events.
pub fn frame(tick: u64, units: Vec<UnitSnapshot>) -> FrameSnapshot {
    FrameSnapshot::new(tick, units)
}

/// Match-start info for a standard two-player map.
///
/// 160x160 bounds with start locations at (20, 20) for player 1 and
/// (140, 140) for player 2.
pub fn two_player_game() -> GameInfo {
    GameInfo {
        bounds: MapBounds::new(160.0, 160.0),
        start_locations: vec![Point2::new(20.0, 20.0), Point2::new(140.0, 140.0)],
        players: vec![
            PlayerInfo {
                id: PlayerId(1),
                kind: PlayerKind::Participant,
            },
            PlayerInfo {
                id: PlayerId(2),
                kind: PlayerKind::Participant,
            },
        ],
    }
}
