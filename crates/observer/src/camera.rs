//! Priority-driven camera focus with temporal hysteresis.
//!
//! Each tick the director walks a fixed ladder of triggers, from
//! area-denial effects down to idle scouting workers, and locks the
//! camera onto the first candidate whose urgency clears the hysteresis
//! gate. The rendered position then converges toward the focus target by
//! exponential smoothing, so accepted retargets still play out as smooth
//! pans rather than cuts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use game_events::{
    Alliance, EffectKind, FrameSnapshot, GameInfo, MapBounds, PlayerId, PlayerKind, Point2,
    UnitSnapshot, UnitTag, UnitType, Visibility,
};

use crate::config::CameraConfig;

/// Urgency tier for camera retargets.
///
/// Numeric values are part of the contract: 0 is the least urgent, 5 the
/// most. A pending focus is pre-empted early only by a strictly greater
/// tier; see [`CameraDirector::should_move`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Priority {
    /// Early-game filler: a worker wandering the map
    #[default]
    Background = 0,
    /// Army clusters and freshly trained units
    ArmyMovement = 1,
    /// Something near a main base: a loaded drop or a scouting worker
    Incursion = 2,
    /// A unit fighting or being fought
    Combat = 3,
    /// Externally detected incoming area threat
    IncomingThreat = 4,
    /// Long-range area-denial effect in flight
    AreaDenial = 5,
}

/// What the camera is locked onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Focus {
    /// A fixed map position
    Point { position: Point2 },
    /// A moving unit, re-resolved against every frame
    Unit { tag: UnitTag },
}

/// Camera move emitted to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraMove {
    pub position: Point2,
}

/// Selects and smooths the spectator camera focus, one decision per tick.
///
/// State persists across ticks; the director is driven by
/// [`on_start`](CameraDirector::on_start) once and then
/// [`on_frame`](CameraDirector::on_frame) every tick.
#[derive(Debug, Clone)]
pub struct CameraDirector {
    config: CameraConfig,
    bounds: MapBounds,
    focus: Focus,
    /// Last known focus target, refreshed from the followed unit
    target_position: Point2,
    /// Smoothed position actually handed to the renderer
    current_position: Point2,
    last_moved_tick: u64,
    last_moved_priority: Priority,
    start_locations: BTreeMap<PlayerId, Point2>,
    player_ids: Vec<PlayerId>,
}

impl CameraDirector {
    /// Creates a director with the given configuration.
    ///
    /// Map bounds and start locations are unknown until
    /// [`on_start`](CameraDirector::on_start) runs; until then no camera
    /// moves are emitted.
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            bounds: MapBounds::default(),
            focus: Focus::Point {
                position: Point2::ZERO,
            },
            target_position: Point2::ZERO,
            current_position: Point2::ZERO,
            last_moved_tick: 0,
            last_moved_priority: Priority::Background,
            start_locations: BTreeMap::new(),
            player_ids: Vec::new(),
        }
    }

    /// Creates a director with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CameraConfig::default())
    }

    /// Runs match-start discovery: collects competing player ids, matches
    /// visible starting structures to start locations, and seeds the
    /// camera on the first discovered location.
    pub fn on_start(&mut self, info: &GameInfo, frame: &FrameSnapshot) {
        self.bounds = info.bounds;
        self.player_ids = info
            .players
            .iter()
            .filter(|p| p.kind == PlayerKind::Participant)
            .map(|p| p.id)
            .collect();

        self.discover_start_locations(info, frame);

        if let Some((&player, &pos)) = self.start_locations.iter().next() {
            tracing::info!(?player, x = pos.x, y = pos.y, "seeding camera on start location");
            self.focus = Focus::Point { position: pos };
            self.target_position = pos;
            self.current_position = pos;
        }
    }

    /// Runs the per-tick trigger ladder and smoothing update.
    ///
    /// Triggers are applied in fixed order of descending urgency. Each
    /// trigger gates on its own tier independently, so a tier that finds
    /// no candidate leaves lower tiers free to retarget within the same
    /// tick. Returns the camera move for this tick, or `None` when the
    /// rendered position is out of bounds.
    pub fn on_frame(&mut self, frame: &FrameSnapshot) -> Option<CameraMove> {
        self.focus_area_denial(frame);
        self.focus_under_attack(frame);
        self.focus_attacking(frame);
        if frame.tick <= self.config.watch_scout_worker_until_tick {
            self.focus_scout_workers(frame);
        }
        self.focus_loaded_drops(frame);
        self.focus_army_cluster(frame);

        self.update_position(frame)
    }

    /// Priority-1 follow of a freshly created unit.
    ///
    /// Deployable charges are spawned as "units" by the engine but are
    /// not worth following; workers are filler, not action.
    pub fn on_unit_created(&mut self, unit: &UnitSnapshot, tick: u64) {
        let priority = Priority::ArmyMovement;
        if !self.should_move(tick, priority) || unit.unit_type == UnitType::Kd8Charge {
            return;
        }
        if !unit.unit_type.is_worker() {
            self.follow_unit(unit, priority, tick);
        }
    }

    /// Priority-4 retarget reserved for an external threat detector.
    ///
    /// Nothing inside this crate produces these; the entry point exists
    /// for detectors that can see an area strike before its effect
    /// appears on the map.
    pub fn focus_incoming_threat(&mut self, target: Point2, tick: u64) {
        let priority = Priority::IncomingThreat;
        if !self.should_move(tick, priority) {
            return;
        }
        self.move_to_point(target, priority, tick);
    }

    /// The hysteresis gate.
    ///
    /// A retarget is accepted once the full dwell interval has elapsed,
    /// or after the minimum interval when the new tier is strictly more
    /// urgent than the one that last moved the camera.
    pub fn should_move(&self, tick: u64, priority: Priority) -> bool {
        let elapsed = tick.saturating_sub(self.last_moved_tick);
        elapsed >= self.config.move_interval_ticks
            || (priority > self.last_moved_priority
                && elapsed >= self.config.min_move_interval_ticks)
    }

    /// Current focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Smoothed position currently handed to the renderer.
    pub fn current_position(&self) -> Point2 {
        self.current_position
    }

    /// Tick of the last accepted retarget.
    pub fn last_moved_tick(&self) -> u64 {
        self.last_moved_tick
    }

    /// First competing player id that is not `player`, or
    /// [`PlayerId::NONE`] when the player table has no distinct second
    /// participant.
    pub fn opponent_of(&self, player: PlayerId) -> PlayerId {
        match self.player_ids.iter().find(|&&id| id != player) {
            Some(&id) => id,
            None => {
                tracing::warn!(?player, "no distinct opponent in player table");
                PlayerId::NONE
            }
        }
    }

    // Trigger tiers, in descending urgency.

    fn focus_area_denial(&mut self, frame: &FrameSnapshot) {
        let priority = Priority::AreaDenial;
        if !self.should_move(frame.tick, priority) {
            return;
        }

        for effect in &frame.effects {
            if effect.kind == EffectKind::PersistentNuke {
                if let Some(anchor) = effect.anchor() {
                    self.move_to_point(anchor, priority, frame.tick);
                    return;
                }
            }
        }
    }

    fn focus_under_attack(&mut self, frame: &FrameSnapshot) {
        let priority = Priority::Combat;
        if !self.should_move(frame.tick, priority) {
            return;
        }

        for unit in &frame.units {
            if Self::is_under_attack(unit) {
                self.follow_unit(unit, priority, frame.tick);
            }
        }
    }

    fn focus_attacking(&mut self, frame: &FrameSnapshot) {
        let priority = Priority::Combat;
        if !self.should_move(frame.tick, priority) {
            return;
        }

        for unit in &frame.units {
            if unit.is_attacking() {
                self.follow_unit(unit, priority, frame.tick);
            }
        }
    }

    /// Early-window worker watching. A worker poking at the opponent's
    /// base is a scout worth the Incursion tier; a worker merely away
    /// from home is background filler.
    fn focus_scout_workers(&mut self, frame: &FrameSnapshot) {
        let high = Priority::Incursion;
        let low = Priority::Background;
        if !self.should_move(frame.tick, low) {
            return;
        }

        for unit in &frame.units {
            if !unit.unit_type.is_worker() {
                continue;
            }
            if self.is_near_opponent_start(unit.position, unit.owner) {
                self.follow_unit(unit, high, frame.tick);
            } else if !self.is_near_own_start(unit.position, unit.owner) {
                self.follow_unit(unit, low, frame.tick);
            }
        }
    }

    fn focus_loaded_drops(&mut self, frame: &FrameSnapshot) {
        let priority = Priority::Incursion;
        if !self.should_move(frame.tick, priority) {
            return;
        }

        for unit in &frame.units {
            let is_transport = matches!(
                unit.unit_type,
                UnitType::Medivac | UnitType::WarpPrism | UnitType::OverlordTransport
            );
            if is_transport
                && unit.has_cargo()
                && self.is_near_opponent_start(unit.position, unit.owner)
            {
                self.follow_unit(unit, priority, frame.tick);
            }
        }
    }

    /// Follows a representative of the largest army cluster, provided the
    /// cluster has more than one unit. Ties go to the first candidate
    /// encountered in scan order.
    fn focus_army_cluster(&mut self, frame: &FrameSnapshot) {
        let priority = Priority::ArmyMovement;
        if !self.should_move(frame.tick, priority) {
            return;
        }

        let radius = self.config.army_cluster_radius;
        let mut best: Option<UnitTag> = None;
        let mut most_nearby = 0usize;

        for unit in &frame.units {
            if !unit.unit_type.is_army()
                || unit.display != Visibility::Visible
                || unit.alliance == Alliance::Neutral
            {
                continue;
            }

            let mut nearby = 0usize;
            for other in &frame.units {
                // Known quirk: the display/alliance gate below inspects
                // the outer candidate, not `other`. Confirm before
                // changing; the count is part of observed behavior.
                if !other.unit_type.is_army()
                    || unit.display != Visibility::Visible
                    || unit.alliance == Alliance::Neutral
                {
                    continue;
                }
                if unit.position.dist(other.position) <= radius {
                    nearby += 1;
                }
            }

            if nearby > most_nearby {
                most_nearby = nearby;
                best = Some(unit.tag);
            }
        }

        if most_nearby > 1 {
            if let Some(tag) = best {
                if let Some(unit) = frame.unit(tag) {
                    self.follow_unit(unit, priority, frame.tick);
                }
            }
        }
    }

    // Commit and smoothing.

    fn move_to_point(&mut self, pos: Point2, priority: Priority, tick: u64) {
        if !self.should_move(tick, priority) {
            return;
        }
        // Retargeting the already-focused static point is a no-op; it
        // must not reset the dwell timer.
        if self.focus == (Focus::Point { position: pos }) {
            return;
        }

        tracing::debug!(tick, ?priority, x = pos.x, y = pos.y, "camera retarget to point");
        self.focus = Focus::Point { position: pos };
        self.target_position = pos;
        self.last_moved_tick = tick;
        self.last_moved_priority = priority;
    }

    fn follow_unit(&mut self, unit: &UnitSnapshot, priority: Priority, tick: u64) {
        if !self.should_move(tick, priority) {
            return;
        }
        // Already following this unit; keep the dwell timer running.
        if self.focus == (Focus::Unit { tag: unit.tag }) {
            return;
        }

        tracing::debug!(tick, ?priority, tag = unit.tag.0, "camera retarget to unit");
        self.focus = Focus::Unit { tag: unit.tag };
        self.target_position = unit.position;
        self.last_moved_tick = tick;
        self.last_moved_priority = priority;
    }

    /// Refreshes the follow target and advances the smoothed position.
    ///
    /// An untracked unit can report a position outside the map; such
    /// positions leave the previous target in place. The move is emitted
    /// only while the rendered position is inside the map bounds.
    fn update_position(&mut self, frame: &FrameSnapshot) -> Option<CameraMove> {
        if let Focus::Unit { tag } = self.focus {
            if let Some(unit) = frame.unit(tag) {
                if self.bounds.contains(unit.position) {
                    self.target_position = unit.position;
                }
            }
        }

        let delta = self.target_position - self.current_position;
        self.current_position = self.current_position + delta * self.config.smoothing_factor;

        if self.bounds.contains(self.current_position) {
            Some(CameraMove {
                position: self.current_position,
            })
        } else {
            None
        }
    }

    // Start-location discovery.

    /// Matches starting structures to start-location candidates.
    ///
    /// With exactly one visible starting structure (the usual case: the
    /// agent sees only its own), the matched location goes to that
    /// structure's owner and every remaining candidate to the inferred
    /// opponent. Otherwise each visible structure claims the candidate
    /// within tolerance.
    fn discover_start_locations(&mut self, info: &GameInfo, frame: &FrameSnapshot) {
        let bases: Vec<&UnitSnapshot> = frame
            .units
            .iter()
            .filter(|u| u.unit_type.is_town_hall())
            .collect();

        if let [base] = bases[..] {
            for &location in &info.start_locations {
                if base.position.dist(location) < self.config.start_location_tolerance {
                    self.start_locations.insert(base.owner, location);
                } else {
                    self.start_locations
                        .insert(self.opponent_of(base.owner), location);
                }
            }
        } else {
            for base in &bases {
                for &location in &info.start_locations {
                    if base.position.dist(location) < self.config.start_location_tolerance {
                        self.start_locations.insert(base.owner, location);
                    }
                }
            }
        }

        tracing::info!(
            resolved = self.start_locations.len(),
            candidates = info.start_locations.len(),
            "start locations discovered"
        );
    }

    fn is_near_own_start(&self, pos: Point2, player: PlayerId) -> bool {
        match self.start_locations.get(&player) {
            Some(&location) => pos.dist(location) <= self.config.near_base_distance,
            None => false,
        }
    }

    fn is_near_opponent_start(&self, pos: Point2, player: PlayerId) -> bool {
        self.is_near_own_start(pos, self.opponent_of(player))
    }

    /// Whether a unit is currently being hit.
    ///
    /// The snapshot layer exposes no damage signal, so this always
    /// reports false. Kept as the seam where such a signal would plug in.
    fn is_under_attack(_unit: &UnitSnapshot) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_events::fixtures;
    use game_events::Alliance;

    fn started_director() -> CameraDirector {
        let mut director = CameraDirector::with_defaults();
        let info = fixtures::two_player_game();
        let base = fixtures::unit(100, UnitType::CommandCenter, Alliance::Own, (20.0, 20.0), 0);
        director.on_start(&info, &fixtures::frame(0, vec![base]));
        director
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::AreaDenial > Priority::Combat);
        assert!(Priority::Combat > Priority::Incursion);
        assert!(Priority::ArmyMovement > Priority::Background);
        assert_eq!(Priority::Background as u8, 0);
        assert_eq!(Priority::AreaDenial as u8, 5);
    }

    #[test]
    fn test_gate_full_interval() {
        let director = started_director();
        // last_moved_tick is 0, same priority as initial
        assert!(!director.should_move(149, Priority::Background));
        assert!(director.should_move(150, Priority::Background));
    }

    #[test]
    fn test_gate_min_interval_requires_higher_priority() {
        let mut director = started_director();
        let marine = fixtures::unit(1, UnitType::Marine, Alliance::Own, (30.0, 30.0), 160);
        director.follow_unit(&marine, Priority::Combat, 160);

        // Equal priority must wait the full interval
        assert!(!director.should_move(160 + 60, Priority::Combat));
        assert!(director.should_move(160 + 150, Priority::Combat));
        // Strictly higher priority clears after the minimum interval
        assert!(!director.should_move(160 + 40, Priority::AreaDenial));
        assert!(director.should_move(160 + 60, Priority::AreaDenial));
        // Lower priority must also wait the full interval
        assert!(!director.should_move(160 + 60, Priority::Background));
    }

    #[test]
    fn test_static_point_retarget_is_idempotent() {
        let mut director = started_director();
        let pos = Point2::new(80.0, 80.0);

        director.move_to_point(pos, Priority::Combat, 200);
        assert_eq!(director.last_moved_tick(), 200);

        // Same point again, well past the full interval: no churn
        director.move_to_point(pos, Priority::Combat, 400);
        assert_eq!(director.last_moved_tick(), 200);
    }

    #[test]
    fn test_follow_same_unit_is_idempotent() {
        let mut director = started_director();
        let marine = fixtures::unit(1, UnitType::Marine, Alliance::Own, (30.0, 30.0), 200);

        director.follow_unit(&marine, Priority::Combat, 200);
        assert_eq!(director.last_moved_tick(), 200);

        director.follow_unit(&marine, Priority::Combat, 400);
        assert_eq!(director.last_moved_tick(), 200);
    }

    #[test]
    fn test_smoothing_contracts_distance_by_point_nine() {
        let mut director = started_director();
        let target = Point2::new(80.0, 60.0);
        director.move_to_point(target, Priority::Combat, 200);

        let frame = fixtures::frame(200, vec![]);
        let d0 = director.current_position().dist(target);
        director.update_position(&frame);
        let d1 = director.current_position().dist(target);
        director.update_position(&frame);
        let d2 = director.current_position().dist(target);

        assert!((d1 / d0 - 0.9).abs() < 1e-4);
        assert!((d2 / d1 - 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_out_of_bounds_rendered_position_is_suppressed() {
        let mut director = CameraDirector::with_defaults();
        // No on_start: bounds stay at zero, nothing can be in bounds
        let frame = fixtures::frame(1, vec![]);
        assert!(director.on_frame(&frame).is_none());
    }

    #[test]
    fn test_follow_skips_invalid_unit_position() {
        let mut director = started_director();
        let mut marine = fixtures::unit(1, UnitType::Marine, Alliance::Own, (30.0, 30.0), 200);
        director.follow_unit(&marine, Priority::Combat, 200);

        // Unit became untracked and reports garbage coordinates
        marine.position = Point2::new(-1000.0, -1000.0);
        marine.last_seen_tick = 201;
        let frame = fixtures::frame(201, vec![marine]);
        let mv = director.update_position(&frame).unwrap();

        // Target stayed at the last valid position, so the camera keeps
        // converging toward (30, 30) instead of drifting off the map
        assert!(mv.position.x > 19.0 && mv.position.x <= 30.0);
    }

    #[test]
    fn test_opponent_lookup_fallback() {
        let mut director = CameraDirector::with_defaults();
        let mut info = fixtures::two_player_game();
        info.players.truncate(1);
        director.on_start(&info, &fixtures::frame(0, vec![]));

        assert_eq!(director.opponent_of(PlayerId(1)), PlayerId::NONE);
    }

    #[test]
    fn test_start_location_discovery_single_base() {
        let director = started_director();

        // Own base matched to (20, 20); remaining candidate inferred as
        // the opponent's
        assert_eq!(
            director.start_locations.get(&PlayerId(1)),
            Some(&Point2::new(20.0, 20.0))
        );
        assert_eq!(
            director.start_locations.get(&PlayerId(2)),
            Some(&Point2::new(140.0, 140.0))
        );
    }

    #[test]
    fn test_new_unit_follow_excludes_workers_and_charges() {
        let mut director = started_director();

        let charge = fixtures::unit(5, UnitType::Kd8Charge, Alliance::Own, (30.0, 30.0), 200);
        director.on_unit_created(&charge, 200);
        assert_eq!(director.last_moved_tick(), 0);

        let worker = fixtures::unit(6, UnitType::Scv, Alliance::Own, (30.0, 30.0), 200);
        director.on_unit_created(&worker, 200);
        assert_eq!(director.last_moved_tick(), 0);

        let marine = fixtures::unit(7, UnitType::Marine, Alliance::Own, (30.0, 30.0), 200);
        director.on_unit_created(&marine, 200);
        assert_eq!(director.last_moved_tick(), 200);
        assert_eq!(director.focus(), Focus::Unit { tag: UnitTag(7) });
    }
}
