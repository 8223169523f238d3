//! Replay driver: feeds recorded frames through both decision engines.
//!
//! Reads a JSONL stream of [`FrameSnapshot`]s plus a match-start
//! [`GameInfo`] document, runs the camera director and the unit
//! allocator tick by tick with simple recording manager implementations,
//! and writes one [`TickDecision`] per frame as JSONL.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use commander::{
    BaseManager, CommandSink, CommanderConfig, HarassManager, ProductionSink, ScoutManager,
    UnitAllocator,
};
use game_events::{FrameSnapshot, GameInfo, LifecycleEvent, Point2, UnitSnapshot, UnitTag};
use observer::{CameraConfig, CameraDirector, CameraMove};

/// Errors surfaced by the replay driver.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("camera config error: {0}")]
    CameraConfig(#[from] observer::ConfigError),
    #[error("commander config error: {0}")]
    CommanderConfig(#[from] commander::ConfigError),
    #[error("frames file is empty")]
    NoFrames,
}

/// One unit command issued from a lifecycle hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum CommandRecord {
    Move { unit: UnitTag, target: Point2 },
    AttackMove { unit: UnitTag, target: Point2 },
    LoadInto { bunker: UnitTag, passenger: UnitTag },
}

/// Everything both engines decided for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickDecision {
    pub tick: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraMove>,
    pub combat: Vec<UnitTag>,
    pub scout: Vec<UnitTag>,
    pub harass: Vec<UnitTag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandRecord>,
}

/// Scout manager that takes the first scout it is handed.
#[derive(Debug, Default)]
pub struct RecordingScout {
    requested: bool,
    scout: Option<UnitTag>,
}

impl ScoutManager for RecordingScout {
    fn num_scouts(&self) -> i32 {
        if !self.requested {
            -1
        } else if self.scout.is_none() {
            0
        } else {
            1
        }
    }

    fn scout_requested(&mut self) {
        self.requested = true;
    }

    fn set_scout(&mut self, unit: &UnitSnapshot) {
        tracing::debug!(tag = unit.tag.0, "scout assigned");
        self.scout = Some(unit.tag);
    }
}

/// Harass manager that accepts one medivac, one liberator, and up to
/// eight marines, and never gives them back.
#[derive(Debug, Default)]
pub struct GreedyHarass {
    medivac: Option<UnitTag>,
    marines: Vec<UnitTag>,
    liberator: Option<UnitTag>,
}

impl GreedyHarass {
    const MARINE_CAPACITY: usize = 8;
}

impl HarassManager for GreedyHarass {
    fn medivac(&self) -> Option<UnitTag> {
        self.medivac
    }

    fn marines(&self) -> Vec<UnitTag> {
        self.marines.clone()
    }

    fn liberator(&self) -> Option<UnitTag> {
        self.liberator
    }

    fn need_medivac(&self) -> bool {
        self.medivac.is_none()
    }

    fn need_marine(&self) -> bool {
        self.marines.len() < Self::MARINE_CAPACITY
    }

    fn need_liberator(&self) -> bool {
        self.liberator.is_none()
    }

    fn set_medivac(&mut self, unit: &UnitSnapshot) -> bool {
        self.medivac = Some(unit.tag);
        true
    }

    fn set_marine(&mut self, unit: &UnitSnapshot) -> bool {
        self.marines.push(unit.tag);
        true
    }

    fn set_liberator(&mut self, unit: &UnitSnapshot) -> bool {
        self.liberator = Some(unit.tag);
        true
    }
}

/// Production sink that only counts requests.
#[derive(Debug, Default)]
pub struct RecordingProduction {
    pub scout_requests: u32,
}

impl ProductionSink for RecordingProduction {
    fn request_scout(&mut self) {
        tracing::info!("scout requested from production");
        self.scout_requests += 1;
    }
}

/// Base manager with a fixed rally point.
#[derive(Debug, Default)]
pub struct StaticBases {
    rally: Point2,
    pub town_halls: Vec<UnitTag>,
}

impl StaticBases {
    pub fn new(rally: Point2) -> Self {
        Self {
            rally,
            town_halls: Vec::new(),
        }
    }
}

impl BaseManager for StaticBases {
    fn rally_point(&self) -> Point2 {
        self.rally
    }

    fn register_town_hall(&mut self, tag: UnitTag) {
        tracing::info!(tag = tag.0, "town hall registered");
        self.town_halls.push(tag);
    }
}

/// Command sink that records issued commands for the decision log.
#[derive(Debug, Default)]
pub struct RecordingCommands {
    pub issued: Vec<CommandRecord>,
}

impl CommandSink for RecordingCommands {
    fn move_to(&mut self, unit: UnitTag, target: Point2) {
        self.issued.push(CommandRecord::Move { unit, target });
    }

    fn attack_move(&mut self, unit: UnitTag, target: Point2) {
        self.issued.push(CommandRecord::AttackMove { unit, target });
    }

    fn load_into(&mut self, bunker: UnitTag, passenger: UnitTag) {
        self.issued.push(CommandRecord::LoadInto { bunker, passenger });
    }
}

/// Replay run options, filled from the CLI.
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    /// JSONL file of frame snapshots
    pub frames: PathBuf,
    /// JSON file with match-start info
    pub game_info: PathBuf,
    /// Optional TOML camera configuration
    pub camera_config: Option<PathBuf>,
    /// Optional TOML commander configuration
    pub commander_config: Option<PathBuf>,
    /// Output JSONL path; stdout when absent
    pub out: Option<PathBuf>,
}

/// Runs the replay end to end.
pub fn run(options: &ReplayOptions) -> Result<(), ReplayError> {
    let game_info: GameInfo = serde_json::from_reader(BufReader::new(File::open(
        &options.game_info,
    )?))?;

    let camera_config = match &options.camera_config {
        Some(path) => CameraConfig::from_file(path)?,
        None => CameraConfig::default(),
    };
    let commander_config = match &options.commander_config {
        Some(path) => CommanderConfig::from_file(path)?,
        None => CommanderConfig::default(),
    };

    let mut director = CameraDirector::new(camera_config);
    let mut allocator = UnitAllocator::new(commander_config);
    let mut scout = RecordingScout::default();
    let mut harass = GreedyHarass::default();
    let mut production = RecordingProduction::default();
    let rally = game_info
        .start_locations
        .first()
        .copied()
        .unwrap_or(Point2::ZERO);
    let mut bases = StaticBases::new(rally);

    let reader = BufReader::new(File::open(&options.frames)?);
    let mut writer: Box<dyn Write> = match &options.out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };

    let mut started = false;
    let mut frames = 0u64;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame = FrameSnapshot::from_jsonl(&line)?;
        if !started {
            director.on_start(&game_info, &frame);
            started = true;
        }

        let decision = process_frame(
            &frame,
            &mut director,
            &mut allocator,
            &mut scout,
            &mut harass,
            &mut production,
            &mut bases,
        );
        serde_json::to_writer(&mut writer, &decision)?;
        writer.write_all(b"\n")?;
        frames += 1;
    }
    writer.flush()?;

    if frames == 0 {
        return Err(ReplayError::NoFrames);
    }
    tracing::info!(frames, "replay complete");
    Ok(())
}

/// Dispatches one frame through both engines and collects the decision.
#[allow(clippy::too_many_arguments)]
pub fn process_frame(
    frame: &FrameSnapshot,
    director: &mut CameraDirector,
    allocator: &mut UnitAllocator,
    scout: &mut RecordingScout,
    harass: &mut GreedyHarass,
    production: &mut RecordingProduction,
    bases: &mut StaticBases,
) -> TickDecision {
    let mut commands = RecordingCommands::default();

    for event in &frame.events {
        match *event {
            LifecycleEvent::UnitCreated(tag) => {
                if let Some(unit) = frame.unit(tag) {
                    director.on_unit_created(unit, frame.tick);
                    allocator.on_unit_created(unit, frame, bases, &mut commands);
                }
            }
            LifecycleEvent::ConstructionComplete(tag) => {
                if let Some(unit) = frame.unit(tag) {
                    allocator.on_building_complete(unit, bases);
                }
            }
            LifecycleEvent::UnitDestroyed(tag) => {
                allocator.on_unit_destroyed(tag);
            }
        }
    }

    allocator.on_frame(frame, scout, harass, production);
    let camera = director.on_frame(frame);

    TickDecision {
        tick: frame.tick,
        camera,
        combat: allocator.combat_units().to_vec(),
        scout: allocator.scout_units().to_vec(),
        harass: allocator.harass_units().to_vec(),
        commands: commands.issued,
    }
}
