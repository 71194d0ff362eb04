// Terminal Reversi against the minimax engine.

mod controller;

use anyhow::{Context, Result};
use clap::Parser;
use controller::{Controller, PlayerKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reversi_core::engine::config::EngineConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Who plays Black
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    black: PlayerKind,

    /// Who plays White
    #[arg(long, value_enum, default_value_t = PlayerKind::Ai)]
    white: PlayerKind,

    /// Search depth in plies (overrides the config file)
    #[arg(long)]
    depth: Option<u8>,

    /// Engine config JSON (feature scales, phase thresholds, search options)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the random player
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::load_from_json(&json)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.search_depth = depth;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let config = load_config(&args)?;
    log::debug!("engine config: {config:?}");

    let rng = args
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let mut controller = Controller::new(config, args.black, args.white, rng);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    controller.run(stdin.lock(), &mut stdout)
}
