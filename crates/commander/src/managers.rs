//! Seams to the behavior managers that consume allocated units.
//!
//! The allocator decides *which* units a manager owns each tick; what a
//! manager does with them lives outside this crate. Managers are queried
//! mid-partition, so implementations must tolerate being called while
//! the tick's assignment sets are still being built.

use game_events::{Point2, UnitSnapshot, UnitTag};

/// Demand signals and acceptance calls for the scouting manager.
pub trait ScoutManager {
    /// Current scout count: -1 means no scout has been requested from
    /// production yet, 0 means a scout is wanted, >0 means one is active.
    fn num_scouts(&self) -> i32;

    /// Marks that a scout has been requested from production.
    fn scout_requested(&mut self);

    /// Hands the scout unit to the manager.
    fn set_scout(&mut self, unit: &UnitSnapshot);
}

/// Demand signals and acceptance calls for the harassment manager.
///
/// The getters report units the manager already holds; the allocator
/// re-affirms them into the harass set every tick (sticky assignment).
/// The `set_*` calls offer a unit and may refuse it.
pub trait HarassManager {
    /// Transport the manager currently holds, if any.
    fn medivac(&self) -> Option<UnitTag>;

    /// Fighters the manager currently holds.
    fn marines(&self) -> Vec<UnitTag>;

    /// Siege unit the manager currently holds, if any.
    fn liberator(&self) -> Option<UnitTag>;

    fn need_medivac(&self) -> bool;
    fn need_marine(&self) -> bool;
    fn need_liberator(&self) -> bool;

    /// Offers a transport; returns false if refused.
    fn set_medivac(&mut self, unit: &UnitSnapshot) -> bool;

    /// Offers a fighter; returns false if refused.
    fn set_marine(&mut self, unit: &UnitSnapshot) -> bool;

    /// Offers a siege unit; returns false if refused.
    fn set_liberator(&mut self, unit: &UnitSnapshot) -> bool;
}

/// Production pipeline hook for one-shot requests.
pub trait ProductionSink {
    /// Queues production of a scout unit.
    fn request_scout(&mut self);
}

/// Base and expansion bookkeeping owned outside the core.
pub trait BaseManager {
    /// Rally point for freshly trained units.
    fn rally_point(&self) -> Point2;

    /// Registers a completed town hall with base bookkeeping.
    fn register_town_hall(&mut self, tag: UnitTag);
}

/// Low-level unit command issuance.
pub trait CommandSink {
    fn move_to(&mut self, unit: UnitTag, target: Point2);
    fn attack_move(&mut self, unit: UnitTag, target: Point2);
    /// Loads `passenger` into `bunker`.
    fn load_into(&mut self, bunker: UnitTag, passenger: UnitTag);
}
