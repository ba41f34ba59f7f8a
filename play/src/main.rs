use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use road_trip::{Level, Move, WalkOutcome};
use tracing::debug;
use tracing_subscriber::{prelude::*, registry::Registry, EnvFilter};

/// Load a road-trip level, make some moves, and show the board.
#[derive(Parser)]
#[command(name = "play", version)]
struct Cli {
    /// Level file to load.
    level: PathBuf,
    /// Moves to make in order: `b1-c1` swaps two cells, `b2` rotates one.
    moves: Vec<Move>,
    /// Only print whether the level is solved.
    #[arg(long, short)]
    quiet: bool,
}

fn init_logging() -> anyhow::Result<()> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("road_trip=info,play=info"))?;
    let subscriber = Registry::default()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::Layer::default().with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let mut level = Level::load(&cli.level)
        .with_context(|| format!("loading {}", cli.level.display()))?;
    debug!(size = level.size(), difficulty = %level.difficulty(), "loaded");

    for mv in cli.moves {
        level.apply(mv).with_context(|| format!("applying {:?}", mv))?;
    }

    let trace = level.trace_road();
    if !cli.quiet {
        print!("{}", level);
        println!("moves: {}", level.move_count());
    }

    match trace.outcome {
        WalkOutcome::Solved => println!("solved"),
        WalkOutcome::OffBoard { from, direction } | WalkOutcome::Disconnected { from, direction } => {
            println!("not solved: road breaks leaving {} {:?}", from.label(), direction)
        }
        WalkOutcome::DeadEnd { at } => println!("not solved: road stops at {}", at.label()),
        WalkOutcome::StepLimit => println!("not solved: road runs in circles"),
    }

    Ok(())
}
