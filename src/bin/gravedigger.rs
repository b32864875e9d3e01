use anyhow::{bail, Result};
use clap::Parser;
use grid_util::grid::Grid;
use grid_util::point::Point;
use rand::prelude::*;
use tomb_pathfinding::{TombGrid, TrapRanking, EMPTY, WALL};

/// Generate (large!) maps for testing raidtomb and write the result to
/// stdout, in the same textual format raidtomb reads.
#[derive(Debug, Parser)]
#[command(name = "gravedigger")]
struct Args {
    /// Desired width of the map.
    width: usize,
    /// Desired height of the map.
    height: usize,
    /// Trap ranking to draw trap symbols from, weakest trap first.
    #[arg(long, default_value = "ZYXWVUTSRQPONMLKJIHGFEDCBA")]
    traps: String,
    /// Probability of a cell being a wall.
    #[arg(long, default_value_t = 0.25)]
    wall_density: f64,
    /// Probability of a non-wall cell being a trap.
    #[arg(long, default_value_t = 0.05)]
    trap_density: f64,
    /// RNG seed for reproducible maps.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.width * args.height < 2 {
        bail!("map must have at least two cells");
    }
    for density in [args.wall_density, args.trap_density] {
        if !(0.0..=1.0).contains(&density) {
            bail!("densities must lie in 0..=1");
        }
    }
    let ranking = TrapRanking::new(&args.traps)?;
    let symbols: Vec<char> = ranking.symbols().collect();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut tomb = TombGrid::new(args.width, args.height, EMPTY);
    for y in 0..args.height {
        for x in 0..args.width {
            if rng.gen_bool(args.wall_density) {
                tomb.set(x, y, WALL);
            } else if !symbols.is_empty() && rng.gen_bool(args.trap_density) {
                tomb.set(x, y, symbols[rng.gen_range(0..symbols.len())]);
            }
        }
    }

    // Start and end are carved out as empty cells so the map always parses.
    let start = Point::new(
        rng.gen_range(0..args.width) as i32,
        rng.gen_range(0..args.height) as i32,
    );
    let end = loop {
        let p = Point::new(
            rng.gen_range(0..args.width) as i32,
            rng.gen_range(0..args.height) as i32,
        );
        if p != start {
            break p;
        }
    };
    tomb.set(start.x as usize, start.y as usize, EMPTY);
    tomb.set(end.x as usize, end.y as usize, EMPTY);

    println!("{}", args.traps);
    println!("{} {}", args.width, args.height);
    print!("{tomb}");
    println!("{} {}", start.x, start.y);
    println!("{} {}", end.x, end.y);
    Ok(())
}
