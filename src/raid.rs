use std::collections::VecDeque;

use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::IndexSet;
use log::info;

use crate::graph::TombGraph;
use crate::ranking::TrapRanking;
use crate::tomb_grid::Cell;
use crate::MapError;

/// One queue entry of the search: a candidate partial path from the start up
/// to and including `cell`, plus the maximum trap rank triggered anywhere
/// along that path (0 if none). Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaidFrame {
    pub cell: Cell,
    pub path: Vec<Cell>,
    pub triggered: usize,
}

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Visited bookkeeping partitioned per trigger level: one set of cells per
/// rank 0..=N. A cell may be a member of several sets, meaning it has been
/// explored under several distinct trigger contexts. Sets keep insertion
/// order so observers render them reproducibly. Grows monotonically during
/// one search run and is discarded afterwards.
#[derive(Clone, Debug)]
pub struct VisitedSets {
    sets: Vec<FxIndexSet<Cell>>,
}

impl VisitedSets {
    pub fn new(max_rank: usize) -> VisitedSets {
        VisitedSets {
            sets: vec![FxIndexSet::default(); max_rank + 1],
        }
    }

    /// Marks a cell visited under the given rank; idempotent.
    pub fn insert(&mut self, rank: usize, cell: Cell) -> bool {
        self.sets[rank].insert(cell)
    }

    pub fn contains(&self, rank: usize, cell: &Cell) -> bool {
        self.sets[rank].contains(cell)
    }

    /// The cells visited under exactly the given rank, in visit order.
    pub fn rank(&self, rank: usize) -> &FxIndexSet<Cell> {
        &self.sets[rank]
    }

    /// All cells visited under any rank.
    pub fn union(&self) -> FxHashSet<Cell> {
        self.sets.iter().flatten().copied().collect()
    }
}

/// Read-only hook into the search, invoked once per dequeued frame plus once
/// at either end of the run. Purely for reporting (rendering, diagram and
/// slide generation); observers can never affect control flow or results.
///
/// `rejected` holds the graph neighbours of the dequeued frame that stayed
/// inaccessible this step, either because their trap is dominated by the
/// path's trigger level or because they were already visited under the
/// trigger context the path would produce.
pub trait RaidObserver {
    /// The seed frame was enqueued; the search loop is about to start.
    fn seeded(&mut self, _seed: &RaidFrame, _visited: &VisitedSets, _queue: &VecDeque<RaidFrame>) {}

    /// A frame was dequeued and its neighbours were processed. `step` counts
    /// dequeues starting at 1. When the end cell was admitted this step, the
    /// queue snapshot already contains its frame.
    fn step(
        &mut self,
        _step: usize,
        _frame: &RaidFrame,
        _admitted: &[Cell],
        _rejected: &[Cell],
        _visited: &VisitedSets,
        _queue: &VecDeque<RaidFrame>,
    ) {
    }

    /// The outcome is decided, successful or not.
    fn finished(&mut self, _outcome: &RaidOutcome, _visited: &VisitedSets) {}
}

/// Observer that ignores every snapshot.
pub struct NullObserver;

impl RaidObserver for NullObserver {}

/// Result of one raid. `moves == -1` signals that no path exists; `path` is
/// then the best-effort path of the last frame processed before the frontier
/// was exhausted. On success `moves == path.len() - 1` (edges, not nodes).
#[derive(Clone, Debug, PartialEq)]
pub struct RaidOutcome {
    pub moves: i32,
    pub path: Vec<Cell>,
    pub visited: FxHashSet<Cell>,
}

impl RaidOutcome {
    pub fn found(&self) -> bool {
        self.moves >= 0
    }
}

/// Finds the minimum number of moves from `start` to `end` ("raids the
/// tomb") using breadth-first search over (cell, trigger level) states.
///
/// Stepping onto a live trap raises the path's trigger level to that trap's
/// rank; a trap whose rank is at most the current level is spent and treated
/// as a wall for the rest of that path. The visited bookkeeping is keyed by
/// the exact (cell, trigger level) pair, so a cell already explored under one
/// level may be re-explored under a higher one.
///
/// The result is deterministic: neighbour enumeration order (right, down,
/// left, up) and FIFO queue order decide which of several shortest paths is
/// reported. Fails with [MapError::InvalidPosition] if `start` or `end` is
/// not a node of the graph; an exhausted frontier is a regular outcome with
/// `moves == -1`, not an error.
pub fn raid(
    graph: &TombGraph,
    ranking: &TrapRanking,
    start: Cell,
    end: Cell,
) -> Result<RaidOutcome, MapError> {
    raid_observed(graph, ranking, start, end, &mut NullObserver)
}

/// [raid], reporting every step to `observer`.
pub fn raid_observed<O: RaidObserver>(
    graph: &TombGraph,
    ranking: &TrapRanking,
    start: Cell,
    end: Cell,
    observer: &mut O,
) -> Result<RaidOutcome, MapError> {
    for cell in [&start, &end] {
        if !graph.contains(cell) {
            return Err(MapError::InvalidPosition {
                x: cell.pos.x,
                y: cell.pos.y,
            });
        }
    }
    if !graph.connected(&start, &end) {
        info!("{start} and {end} are not wall-connected, the raid will exhaust the frontier");
    }

    let seed_rank = if ranking.is_trap(start.symbol) {
        ranking.rank_of(start.symbol)
    } else {
        0
    };
    let mut visited = VisitedSets::new(ranking.len());
    visited.insert(seed_rank, start);

    if start == end {
        let outcome = RaidOutcome {
            moves: 0,
            path: vec![start],
            visited: visited.union(),
        };
        observer.finished(&outcome, &visited);
        return Ok(outcome);
    }

    let seed = RaidFrame {
        cell: start,
        path: vec![start],
        triggered: seed_rank,
    };
    let mut queue: VecDeque<RaidFrame> = VecDeque::new();
    queue.push_back(seed.clone());
    observer.seeded(&seed, &visited, &queue);

    let mut step = 0;
    let mut last = seed;
    while let Some(frame) = queue.pop_front() {
        step += 1;
        let neighbours = graph.neighbours(&frame.cell);
        let mut admitted: Vec<Cell> = Vec::new();
        let mut rejected: Vec<Cell> = neighbours.to_vec();
        for &neighbour in neighbours {
            // A trap at or below the path's trigger level is spent: skip it
            // without marking anything.
            let new_triggered = if ranking.is_trap(neighbour.symbol) {
                let rank = ranking.rank_of(neighbour.symbol);
                if rank <= frame.triggered {
                    continue;
                }
                rank
            } else {
                frame.triggered
            };
            if visited.contains(new_triggered, &neighbour) {
                continue;
            }
            let mut path = frame.path.clone();
            path.push(neighbour);
            let successor = RaidFrame {
                cell: neighbour,
                path,
                triggered: new_triggered,
            };
            visited.insert(new_triggered, neighbour);
            rejected.retain(|c| c != &neighbour);
            admitted.push(neighbour);
            if neighbour == end {
                queue.push_back(successor.clone());
                observer.step(step, &frame, &admitted, &rejected, &visited, &queue);
                let outcome = RaidOutcome {
                    moves: (successor.path.len() - 1) as i32,
                    path: successor.path,
                    visited: visited.union(),
                };
                observer.finished(&outcome, &visited);
                return Ok(outcome);
            }
            queue.push_back(successor);
        }
        observer.step(step, &frame, &admitted, &rejected, &visited, &queue);
        last = frame;
    }

    info!("frontier exhausted after {step} steps without reaching {end}");
    let outcome = RaidOutcome {
        moves: -1,
        path: last.path,
        visited: visited.union(),
    };
    observer.finished(&outcome, &visited);
    Ok(outcome)
}
