//! Per-tick partitioning of the agent's units across behavior managers.
//!
//! Every tick the allocator rebuilds the combat and harass candidate
//! sets from the valid-unit scan while the scout set persists until
//! explicitly reassigned. A unit belongs to at most one set at any time;
//! every assignment is a move between sets, never a duplicate add.

use game_events::{Alliance, FrameSnapshot, UnitSnapshot, UnitTag, UnitType};

use crate::config::CommanderConfig;
use crate::managers::{BaseManager, CommandSink, HarassManager, ProductionSink, ScoutManager};

/// Target set for an assignment move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    Combat,
    Scout,
    Harass,
}

/// Owns the assignment sets and runs the per-tick allocation pass.
#[derive(Debug, Clone, Default)]
pub struct UnitAllocator {
    config: CommanderConfig,
    valid_units: Vec<UnitTag>,
    combat_units: Vec<UnitTag>,
    scout_units: Vec<UnitTag>,
    harass_units: Vec<UnitTag>,
}

impl UnitAllocator {
    /// Creates an allocator with the given configuration.
    pub fn new(config: CommanderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Creates an allocator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CommanderConfig::default())
    }

    /// Runs one allocation pass over the current frame.
    ///
    /// Clears the combat and harass working sets, recomputes the valid
    /// unit set, then assigns scout, harass, and combat duty in that
    /// order. Units claimed by no step stay unassigned for this tick.
    pub fn on_frame(
        &mut self,
        frame: &FrameSnapshot,
        scout: &mut dyn ScoutManager,
        harass: &mut dyn HarassManager,
        production: &mut dyn ProductionSink,
    ) {
        self.valid_units.clear();
        self.combat_units.clear();
        self.harass_units.clear();

        self.collect_valid_units(frame);
        self.assign_scout(frame, scout, production);
        self.assign_harass(frame, harass);
        self.assign_combat(frame);

        tracing::debug!(
            tick = frame.tick,
            valid = self.valid_units.len(),
            combat = self.combat_units.len(),
            scout = self.scout_units.len(),
            harass = self.harass_units.len(),
            "allocation pass complete"
        );
    }

    /// Agent-owned units that are alive and freshly observed this tick.
    ///
    /// A unit whose `last_seen_tick` lags the frame tick is a stale
    /// handle and is dropped from consideration entirely.
    fn collect_valid_units(&mut self, frame: &FrameSnapshot) {
        for unit in &frame.units {
            if unit.alliance == Alliance::Own && unit.alive && unit.last_seen_tick == frame.tick {
                self.valid_units.push(unit.tag);
            }
        }
    }

    /// Scout duty.
    ///
    /// A scout count of -1 means production has never been asked for
    /// one; the request fires exactly once. A count of 0 means the
    /// manager wants a scout now: the first unaccounted unit of the
    /// designated scout type takes the job, replacing any previous scout
    /// set (single-scout policy).
    fn assign_scout(
        &mut self,
        frame: &FrameSnapshot,
        scout: &mut dyn ScoutManager,
        production: &mut dyn ProductionSink,
    ) {
        match scout.num_scouts() {
            -1 => {
                production.request_scout();
                scout.scout_requested();
            }
            0 => {
                for i in 0..self.valid_units.len() {
                    let tag = self.valid_units[i];
                    if self.is_assigned(tag) {
                        continue;
                    }
                    let Some(unit) = frame.unit(tag) else {
                        debug_assert!(false, "valid unit {tag:?} not resolvable");
                        continue;
                    };
                    if unit.unit_type == self.config.scout_unit_type {
                        scout.set_scout(unit);
                        self.scout_units.clear();
                        self.assign_unit(tag, Assignment::Scout);
                        return;
                    }
                }
            }
            _ => {}
        }
    }

    /// Harass duty.
    ///
    /// Units the manager already holds are re-affirmed into the harass
    /// set unconditionally. Unaccounted units are then offered against
    /// the manager's current needs; an offer only sticks if the
    /// manager's acceptor takes it.
    fn assign_harass(&mut self, frame: &FrameSnapshot, harass: &mut dyn HarassManager) {
        if let Some(tag) = harass.medivac() {
            self.assign_unit(tag, Assignment::Harass);
        }
        for tag in harass.marines() {
            self.assign_unit(tag, Assignment::Harass);
        }
        if let Some(tag) = harass.liberator() {
            self.assign_unit(tag, Assignment::Harass);
        }

        for i in 0..self.valid_units.len() {
            let tag = self.valid_units[i];
            if self.is_assigned(tag) {
                continue;
            }
            let Some(unit) = frame.unit(tag) else {
                debug_assert!(false, "valid unit {tag:?} not resolvable");
                continue;
            };

            match unit.unit_type {
                UnitType::Medivac if harass.need_medivac() => {
                    if harass.set_medivac(unit) {
                        self.assign_unit(tag, Assignment::Harass);
                    }
                }
                UnitType::Marine if unit.is_full_health() && harass.need_marine() => {
                    // A marine standing inside an enemy's detection
                    // bubble would drag the transport into fire on
                    // pickup; leave it to the combat manager instead.
                    let sight = unit.unit_type.sight_range();
                    let too_close = frame.units.iter().any(|e| {
                        e.alliance == Alliance::Enemy && e.position.dist(unit.position) < sight
                    });
                    if !too_close && harass.set_marine(unit) {
                        self.assign_unit(tag, Assignment::Harass);
                    }
                }
                UnitType::Liberator if harass.need_liberator() => {
                    if harass.set_liberator(unit) {
                        self.assign_unit(tag, Assignment::Harass);
                    }
                }
                _ => {}
            }
        }
    }

    /// Combat duty: every remaining unaccounted combat-type unit.
    fn assign_combat(&mut self, frame: &FrameSnapshot) {
        for i in 0..self.valid_units.len() {
            let tag = self.valid_units[i];
            if self.is_assigned(tag) {
                continue;
            }
            let Some(unit) = frame.unit(tag) else {
                debug_assert!(false, "valid unit {tag:?} not resolvable");
                continue;
            };
            if unit.unit_type.is_combat() {
                self.assign_unit(tag, Assignment::Combat);
            }
        }
    }

    /// Moves a unit into the target set.
    ///
    /// The unit is removed from whichever set currently holds it first,
    /// so the three sets stay pairwise disjoint.
    pub fn assign_unit(&mut self, tag: UnitTag, target: Assignment) {
        self.combat_units.retain(|&t| t != tag);
        self.scout_units.retain(|&t| t != tag);
        self.harass_units.retain(|&t| t != tag);

        match target {
            Assignment::Combat => self.combat_units.push(tag),
            Assignment::Scout => self.scout_units.push(tag),
            Assignment::Harass => self.harass_units.push(tag),
        }
    }

    /// Whether any of the three sets holds this unit.
    pub fn is_assigned(&self, tag: UnitTag) -> bool {
        self.combat_units.contains(&tag)
            || self.scout_units.contains(&tag)
            || self.harass_units.contains(&tag)
    }

    /// Units valid for allocation this tick.
    pub fn valid_units(&self) -> &[UnitTag] {
        &self.valid_units
    }

    /// Units handed to the combat manager this tick.
    pub fn combat_units(&self) -> &[UnitTag] {
        &self.combat_units
    }

    /// Units handed to the scout manager.
    pub fn scout_units(&self) -> &[UnitTag] {
        &self.scout_units
    }

    /// Units handed to the harass manager this tick.
    pub fn harass_units(&self) -> &[UnitTag] {
        &self.harass_units
    }

    // Lifecycle hooks.

    /// Reacts to a freshly created unit.
    ///
    /// Combat units away from the rally point are sent there: a medivac
    /// moves directly, anything else boards the first fully built,
    /// non-full own bunker or attack-moves to the rally point. Town
    /// halls register with base bookkeeping.
    pub fn on_unit_created(
        &self,
        unit: &UnitSnapshot,
        frame: &FrameSnapshot,
        bases: &mut dyn BaseManager,
        commands: &mut dyn CommandSink,
    ) {
        if unit.unit_type.is_combat() {
            let rally = bases.rally_point();
            if unit.position.dist(rally) > self.config.rally_arrival_distance {
                if unit.unit_type == UnitType::Medivac {
                    commands.move_to(unit.tag, rally);
                    return;
                }
                for bunker in &frame.units {
                    if bunker.alliance == Alliance::Own
                        && bunker.unit_type == UnitType::Bunker
                        && bunker.build_progress >= 1.0
                        && bunker.cargo_space_taken != bunker.cargo_space_max
                    {
                        commands.load_into(bunker.tag, unit.tag);
                        return;
                    }
                }
                commands.attack_move(unit.tag, rally);
            }
        } else if unit.unit_type.is_town_hall() {
            bases.register_town_hall(unit.tag);
        }
    }

    /// Reacts to a completed structure.
    pub fn on_building_complete(&self, unit: &UnitSnapshot, bases: &mut dyn BaseManager) {
        if unit.unit_type.is_town_hall() {
            bases.register_town_hall(unit.tag);
        }
    }

    /// Reserved hook; no bookkeeping is currently tied to unit death.
    pub fn on_unit_destroyed(&mut self, _tag: UnitTag) {}
}
