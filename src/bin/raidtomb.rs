use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tomb_pathfinding::render::render_raid;
use tomb_pathfinding::{raid, RaidMap};

/// Find the minimum number of moves through a boobytrapped tomb map.
///
/// Reads a map in the textual format (trap ranking, dimensions, rows, start
/// and end positions) and prints the move count of the shortest path, or
/// IMPOSSIBLE when no path exists.
#[derive(Debug, Parser)]
#[command(name = "raidtomb")]
struct Args {
    /// Map file; reads from stdin when omitted.
    input: Option<PathBuf>,
    /// Render the map with the found path; twice to also mark visited cells.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let input = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read map file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read map from stdin")?;
            buffer
        }
    };
    let map = RaidMap::parse(&input).context("failed to parse map")?;
    let outcome = raid(&map.graph, &map.ranking, map.start, map.end)?;

    if outcome.found() {
        println!("{}", outcome.moves);
    } else {
        println!("IMPOSSIBLE");
    }
    if args.verbose > 0 {
        print!("{}", render_raid(&map, &outcome, args.verbose > 1));
    }

    Ok(if outcome.found() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
