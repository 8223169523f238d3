//! Unit identity and the fixed unit-type classification table.
//!
//! `UnitTag` is the stable identifier used to refer to a unit across
//! ticks; resolved snapshot references must never outlive the frame they
//! came from. `UnitType` carries the classification predicates that the
//! camera and allocation rules are written against.

use serde::{Deserialize, Serialize};

/// Stable opaque identifier for a game unit.
///
/// Tags stay valid for the lifetime of the unit, but a tag only resolves
/// to fresh data through the current tick's [`crate::FrameSnapshot`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct UnitTag(pub u64);

/// Known unit types, partitioned by the classification predicates below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    // Workers
    Scv,
    Mule,
    Probe,
    Drone,
    DroneBurrowed,

    // Terran structures
    Armory,
    Barracks,
    BarracksFlying,
    BarracksReactor,
    BarracksTechLab,
    Bunker,
    CommandCenter,
    CommandCenterFlying,
    EngineeringBay,
    Factory,
    FactoryFlying,
    FusionCore,
    GhostAcademy,
    MissileTurret,
    OrbitalCommand,
    OrbitalCommandFlying,
    PlanetaryFortress,
    Refinery,
    SensorTower,
    Starport,
    StarportFlying,
    SupplyDepot,
    SupplyDepotLowered,

    // Zerg structures
    BanelingNest,
    CreepTumor,
    EvolutionChamber,
    Extractor,
    Hatchery,
    Hive,
    HydraliskDen,
    InfestationPit,
    Lair,
    NydusNetwork,
    SpawningPool,
    SpineCrawler,
    Spire,
    SporeCrawler,
    UltraliskCavern,

    // Protoss structures
    Assimilator,
    CyberneticsCore,
    DarkShrine,
    FleetBeacon,
    Forge,
    Gateway,
    Nexus,
    PhotonCannon,
    Pylon,
    RoboticsBay,
    RoboticsFacility,
    Stargate,
    TemplarArchive,
    TwilightCouncil,
    WarpGate,

    // Non-combat biological forms
    Egg,
    Larva,

    // Transport-carrier analogue, handled by logistics rather than combat
    Overlord,

    // Transports
    Medivac,
    WarpPrism,
    OverlordTransport,

    // Deployable charge, not a followable unit
    Kd8Charge,

    // Army units
    Marine,
    Marauder,
    Reaper,
    Ghost,
    Hellion,
    SiegeTank,
    Cyclone,
    Thor,
    Viking,
    Liberator,
    Banshee,
    Raven,
    Battlecruiser,
    Zergling,
    Roach,
    Hydralisk,
    Mutalisk,
    Zealot,
    Stalker,
    Adept,
    Immortal,
    Colossus,
}

impl UnitType {
    /// Returns true for the worker forms.
    pub fn is_worker(self) -> bool {
        matches!(
            self,
            UnitType::Scv
                | UnitType::Mule
                | UnitType::Probe
                | UnitType::Drone
                | UnitType::DroneBurrowed
        )
    }

    /// Returns true for structures.
    pub fn is_building(self) -> bool {
        matches!(
            self,
            // Terran
            UnitType::Armory
                | UnitType::Barracks
                | UnitType::BarracksFlying
                | UnitType::BarracksReactor
                | UnitType::BarracksTechLab
                | UnitType::Bunker
                | UnitType::CommandCenter
                | UnitType::CommandCenterFlying
                | UnitType::EngineeringBay
                | UnitType::Factory
                | UnitType::FactoryFlying
                | UnitType::FusionCore
                | UnitType::GhostAcademy
                | UnitType::MissileTurret
                | UnitType::OrbitalCommand
                | UnitType::OrbitalCommandFlying
                | UnitType::PlanetaryFortress
                | UnitType::Refinery
                | UnitType::SensorTower
                | UnitType::Starport
                | UnitType::StarportFlying
                | UnitType::SupplyDepot
                | UnitType::SupplyDepotLowered
                // Zerg
                | UnitType::BanelingNest
                | UnitType::CreepTumor
                | UnitType::EvolutionChamber
                | UnitType::Extractor
                | UnitType::Hatchery
                | UnitType::Hive
                | UnitType::HydraliskDen
                | UnitType::InfestationPit
                | UnitType::Lair
                | UnitType::NydusNetwork
                | UnitType::SpawningPool
                | UnitType::SpineCrawler
                | UnitType::Spire
                | UnitType::SporeCrawler
                | UnitType::UltraliskCavern
                // Protoss
                | UnitType::Assimilator
                | UnitType::CyberneticsCore
                | UnitType::DarkShrine
                | UnitType::FleetBeacon
                | UnitType::Forge
                | UnitType::Gateway
                | UnitType::Nexus
                | UnitType::PhotonCannon
                | UnitType::Pylon
                | UnitType::RoboticsBay
                | UnitType::RoboticsFacility
                | UnitType::Stargate
                | UnitType::TemplarArchive
                | UnitType::TwilightCouncil
                | UnitType::WarpGate
        )
    }

    /// Army-unit classification used by the camera cluster rule.
    ///
    /// Not a worker, not a building, not an egg/larva form, and not the
    /// overlord. The overlord is excluded so the transport-carrier line
    /// is handled by logistics rather than counted as army.
    pub fn is_army(self) -> bool {
        if self.is_worker() || self.is_building() {
            return false;
        }
        !matches!(self, UnitType::Egg | UnitType::Larva | UnitType::Overlord)
    }

    /// Combat-unit classification used by the allocator.
    ///
    /// Includes the medivac, which fights as part of the army even though
    /// it carries cargo. Excludes the deployable charge.
    pub fn is_combat(self) -> bool {
        self.is_army() && self != UnitType::Kd8Charge
    }

    /// Returns true for town-hall structures.
    pub fn is_town_hall(self) -> bool {
        matches!(
            self,
            UnitType::CommandCenter
                | UnitType::CommandCenterFlying
                | UnitType::OrbitalCommand
                | UnitType::OrbitalCommandFlying
                | UnitType::PlanetaryFortress
                | UnitType::Hatchery
                | UnitType::Lair
                | UnitType::Hive
                | UnitType::Nexus
        )
    }

    /// Sight radius for this unit type, in game units.
    pub fn sight_range(self) -> f32 {
        match self {
            UnitType::Scv | UnitType::Probe | UnitType::Drone => 8.0,
            UnitType::Marine | UnitType::Marauder | UnitType::Reaper => 9.0,
            UnitType::Ghost | UnitType::Banshee => 10.0,
            UnitType::SiegeTank | UnitType::Thor | UnitType::Liberator => 11.0,
            UnitType::Medivac | UnitType::Raven | UnitType::Overlord => 11.0,
            UnitType::Battlecruiser | UnitType::Colossus => 12.0,
            UnitType::SensorTower => 27.0,
            _ => 9.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_classification() {
        assert!(UnitType::Scv.is_worker());
        assert!(UnitType::DroneBurrowed.is_worker());
        assert!(!UnitType::Marine.is_worker());
        assert!(!UnitType::CommandCenter.is_worker());
    }

    #[test]
    fn test_army_excludes_non_combat_forms() {
        assert!(UnitType::Marine.is_army());
        assert!(UnitType::Medivac.is_army());
        assert!(!UnitType::Scv.is_army());
        assert!(!UnitType::Barracks.is_army());
        assert!(!UnitType::Egg.is_army());
        assert!(!UnitType::Larva.is_army());
        assert!(!UnitType::Overlord.is_army());
        // The transport variant is army; only the plain overlord is excluded
        assert!(UnitType::OverlordTransport.is_army());
    }

    #[test]
    fn test_combat_excludes_deployable_charge() {
        assert!(UnitType::Marine.is_combat());
        assert!(UnitType::Medivac.is_combat());
        assert!(!UnitType::Kd8Charge.is_combat());
    }

    #[test]
    fn test_town_halls() {
        assert!(UnitType::CommandCenter.is_town_hall());
        assert!(UnitType::OrbitalCommand.is_town_hall());
        assert!(UnitType::Hatchery.is_town_hall());
        assert!(UnitType::Nexus.is_town_hall());
        assert!(!UnitType::Barracks.is_town_hall());
        assert!(!UnitType::Bunker.is_town_hall());
    }

    #[test]
    fn test_unit_type_serialization() {
        assert_eq!(
            serde_json::to_string(&UnitType::CommandCenter).unwrap(),
            r#""command_center""#
        );
        let parsed: UnitType = serde_json::from_str(r#""kd8_charge""#).unwrap();
        assert_eq!(parsed, UnitType::Kd8Charge);
    }
}
