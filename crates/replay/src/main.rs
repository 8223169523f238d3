use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use replay::{run, ReplayOptions};

/// Replays recorded frame snapshots through the decision engines.
#[derive(Parser, Debug)]
#[command(name = "replay", version, about)]
struct Args {
    /// JSONL file of per-tick frame snapshots
    #[arg(long)]
    frames: PathBuf,

    /// JSON file describing map bounds, start locations, and players
    #[arg(long)]
    game_info: PathBuf,

    /// Camera director configuration (TOML); defaults apply when omitted
    #[arg(long)]
    camera_config: Option<PathBuf>,

    /// Unit allocator configuration (TOML); defaults apply when omitted
    #[arg(long)]
    commander_config: Option<PathBuf>,

    /// Decision log output path (JSONL); stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "replay=info,observer=info,commander=info".into()),
        )
        .init();

    let args = Args::parse();
    let options = ReplayOptions {
        frames: args.frames,
        game_info: args.game_info,
        camera_config: args.camera_config,
        commander_config: args.commander_config,
        out: args.out,
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("replay failed: {err}");
            ExitCode::FAILURE
        }
    }
}
