use fxhash::FxBuildHasher;
use grid_util::grid::Grid;
use grid_util::point::Point;
use indexmap::IndexMap;
use petgraph::unionfind::UnionFind;

use crate::tomb_grid::{Cell, TombGrid};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// The adjacency relation derived from a [TombGrid], keyed by cell identity.
/// Wall cells appear neither as keys nor as values; every other cell maps to
/// its in-bounds non-wall neighbours in the grid's fixed enumeration order
/// (right, down, left, up). Built once, read-only during searches.
///
/// [TombGraph] also records wall-only connected components in a [UnionFind]
/// structure. Note that component membership ignores traps entirely, so it
/// over-approximates what a raid can reach: two connected cells may still be
/// separated by the domination rule, but two disconnected cells can never be
/// part of one path.
#[derive(Clone, Debug)]
pub struct TombGraph {
    graph: FxIndexMap<Cell, Vec<Cell>>,
    components: UnionFind<usize>,
}

impl TombGraph {
    /// Derives the graph from a grid by a single row-major scan.
    pub fn build(grid: &TombGrid) -> TombGraph {
        let mut graph: FxIndexMap<Cell, Vec<Cell>> = FxIndexMap::default();
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let pos = Point::new(x, y);
                if grid.is_wall(pos) {
                    continue;
                }
                let adjacent = grid
                    .adjacent_of(pos)
                    .into_iter()
                    .map(|p| grid.cell(p))
                    .collect();
                graph.insert(grid.cell(pos), adjacent);
            }
        }
        let mut components = UnionFind::new(graph.len());
        for (ix, (_, adjacent)) in graph.iter().enumerate() {
            for neighbour in adjacent {
                components.union(ix, graph.get_index_of(neighbour).unwrap());
            }
        }
        TombGraph { graph, components }
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.graph.contains_key(cell)
    }

    /// Neighbours of a cell in enumeration order; empty for cells outside
    /// the graph.
    pub fn neighbours(&self, cell: &Cell) -> &[Cell] {
        self.graph.get(cell).map_or(&[], Vec::as_slice)
    }

    /// Whether two cells are on the same wall-only component. This ignores
    /// trap state and is advisory only; the search itself never consults it.
    pub fn connected(&self, a: &Cell, b: &Cell) -> bool {
        match (self.graph.get_index_of(a), self.graph.get_index_of(b)) {
            (Some(a_ix), Some(b_ix)) => self.components.equiv(a_ix, b_ix),
            _ => false,
        }
    }

    /// Number of non-wall cells.
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Cells and their neighbour lists in insertion (row-major) order.
    pub fn iter(&self) -> impl Iterator<Item = (&Cell, &[Cell])> {
        self.graph.iter().map(|(cell, adj)| (cell, adj.as_slice()))
    }
}
