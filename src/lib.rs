//! # tomb_pathfinding
//!
//! A grid-based pathfinding system for tomb maps riddled with boobytraps.
//! Implements a state-augmented
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search)
//! in which every partial path carries the highest trap rank it has triggered
//! so far: triggering a trap permanently disables all traps of equal or lower
//! rank for the remainder of that path, and the visited bookkeeping is
//! partitioned per trigger level so that the same cell may be re-explored
//! under a different trigger context. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! of the wall-only graph as a cheap advisory reachability query.
//!
//! The map is a single fixed 2D grid processed once per run. `'x'` cells are
//! walls, `'o'` cells are empty and any other character is a trap symbol
//! whose rank is given by a [TrapRanking].
pub mod graph;
pub mod latex;
pub mod parse;
pub mod raid;
pub mod ranking;
pub mod render;
pub mod tomb_grid;

use thiserror::Error;

pub use crate::graph::TombGraph;
pub use crate::parse::RaidMap;
pub use crate::raid::{raid, raid_observed, RaidFrame, RaidObserver, RaidOutcome, VisitedSets};
pub use crate::ranking::TrapRanking;
pub use crate::tomb_grid::{Cell, TombGrid};

/// Grid symbol for a wall cell.
pub const WALL: char = 'x';
/// Grid symbol for an empty (non-trap, traversable) cell.
pub const EMPTY: char = 'o';

/// Everything that can go wrong while turning a textual map into a search
/// problem. A map on which no path exists is *not* an error; the search
/// reports that as a regular [RaidOutcome] with a move count of -1.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// The input does not follow the map format (missing lines, ragged rows,
    /// dimension mismatches, bad ranking string).
    #[error("malformed map: {0}")]
    MalformedMap(String),
    /// A start or end position that is outside the grid or on a wall.
    #[error("position ({x}, {y}) is not a traversable cell")]
    InvalidPosition { x: i32, y: i32 },
    /// A grid symbol that is neither wall, empty nor part of the trap ranking.
    #[error("unknown symbol {symbol:?} at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: i32, y: i32 },
}
