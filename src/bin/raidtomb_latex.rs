use std::io::Read;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tomb_pathfinding::latex::{map_draw_commands, SlideObserver, SlideOptions};
use tomb_pathfinding::{raid, raid_observed, RaidMap};

/// Generate LaTeX code for a boobytrapped tomb map read from stdin. Both
/// subcommands expect the macros from the accompanying preamble file
/// (\BTmap, \BTwall, \BTtrap, ...) to be defined in the consuming document.
#[derive(Debug, Parser)]
#[command(name = "raidtomb-latex")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the draw commands for a TikZ representation of the map and the
    /// found path.
    Map {
        /// Don't draw the shortest path.
        #[arg(long)]
        no_drawpath: bool,
        /// Draw the graph derived from the map.
        #[arg(long)]
        drawgraph: bool,
        /// Scale factor for the map, should be < 1 for large maps as the
        /// unit is 1cm2 per cell.
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },
    /// Print the source code of Beamer slides detailing every step of the
    /// path finding algorithm.
    Slides {
        /// Title of each slide; {} is a placeholder for the step number.
        #[arg(long, default_value = "")]
        title: String,
        /// Subtitle of each slide; {} is a placeholder for the step number.
        #[arg(long, default_value = "")]
        subtitle: String,
        /// Draw the graph derived from the map.
        #[arg(long)]
        drawgraph: bool,
        /// Don't highlight traps and trap cells.
        #[arg(long)]
        no_highlighttraps: bool,
        /// Don't highlight the start cell.
        #[arg(long)]
        no_highlightstart: bool,
        /// Don't highlight the end cell.
        #[arg(long)]
        no_highlightend: bool,
        /// Don't highlight the current cell.
        #[arg(long)]
        no_highlightcurrentcell: bool,
        /// Don't highlight accessible adjacent cells.
        #[arg(long)]
        no_highlightaccessibleneighbors: bool,
        /// Don't highlight inaccessible adjacent cells.
        #[arg(long)]
        no_highlightinaccessibleneighbors: bool,
        /// Maximum queue length before the rest is truncated in the output.
        #[arg(long, default_value_t = 3)]
        maxqueuelength: usize,
        /// Scale factor for the map, should be < 1 for large maps as the
        /// unit is 1cm2 per cell.
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read map from stdin")?;
    let map = RaidMap::parse(&input).context("failed to parse map")?;

    match args.command {
        Command::Map {
            no_drawpath,
            drawgraph,
            scale,
        } => {
            let outcome = raid(&map.graph, &map.ranking, map.start, map.end)?;
            let path = if no_drawpath { &[] } else { outcome.path.as_slice() };
            let graph = drawgraph.then_some(&map.graph);
            print!(
                "{}",
                map_draw_commands(&map, graph, path, &[], &[], &[], scale, true)
            );
        }
        Command::Slides {
            title,
            subtitle,
            drawgraph,
            no_highlighttraps,
            no_highlightstart,
            no_highlightend,
            no_highlightcurrentcell,
            no_highlightaccessibleneighbors,
            no_highlightinaccessibleneighbors,
            maxqueuelength,
            scale,
        } => {
            let options = SlideOptions {
                title,
                subtitle,
                draw_graph: drawgraph,
                highlight_traps: !no_highlighttraps,
                highlight_start: !no_highlightstart,
                highlight_end: !no_highlightend,
                highlight_current_cell: !no_highlightcurrentcell,
                highlight_accessible_neighbors: !no_highlightaccessibleneighbors,
                highlight_inaccessible_neighbors: !no_highlightinaccessibleneighbors,
                max_queue_length: maxqueuelength,
                scale,
            };
            let mut observer = SlideObserver::new(&map, options);
            raid_observed(&map.graph, &map.ranking, map.start, map.end, &mut observer)?;
            print!("{}", observer.into_latex());
        }
    }
    Ok(())
}
