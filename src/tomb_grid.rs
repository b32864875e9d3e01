use core::fmt;

use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;

use crate::{MapError, EMPTY, WALL};

/// A single map cell: its coordinates plus the symbol occupying it at
/// grid-construction time. Two cells are equal iff both coordinates and
/// symbol match; the symbol is fixed once the grid is built (traps are never
/// erased from the grid, reachability is filtered by the search's trigger
/// state instead).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub pos: Point,
    pub symbol: char,
}

impl Cell {
    pub fn new(x: i32, y: i32, symbol: char) -> Cell {
        Cell {
            pos: Point::new(x, y),
            symbol,
        }
    }

    pub fn is_wall(&self) -> bool {
        self.symbol == WALL
    }

    pub fn is_empty(&self) -> bool {
        self.symbol == EMPTY
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.pos.x, self.pos.y)
    }
}

/// Neighbour enumeration order: right, down, left, up. The order is fixed
/// since it decides which of several equally short paths the FIFO search
/// reports, and which best-effort path is reported when no path exists.
const ADJACENT_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// The raw tomb map: a rectangular grid of cell symbols built on
/// [SimpleGrid]. `'x'` is a wall, `'o'` is empty, anything else is a trap
/// symbol. Rows are indexed top to bottom, so y grows downwards.
#[derive(Clone, Debug)]
pub struct TombGrid {
    pub grid: SimpleGrid<char>,
}

impl TombGrid {
    /// Builds a grid from equal-length rows of symbols. Fails with
    /// [MapError::MalformedMap] on ragged or missing rows; symbols are not
    /// interpreted here.
    pub fn from_rows(rows: &[&str]) -> Result<TombGrid, MapError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 || height == 0 {
            return Err(MapError::MalformedMap("map has no cells".to_owned()));
        }
        let mut tomb = TombGrid::new(width, height, EMPTY);
        for (y, row) in rows.iter().enumerate() {
            let symbols: Vec<char> = row.chars().collect();
            if symbols.len() != width {
                return Err(MapError::MalformedMap(format!(
                    "row {y} has {} symbols, expected {width}",
                    symbols.len()
                )));
            }
            for (x, &symbol) in symbols.iter().enumerate() {
                tomb.grid.set(x, y, symbol);
            }
        }
        Ok(tomb)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.grid.index_in_bounds(x as usize, y as usize)
    }

    /// The symbol at a position that is known to be in bounds.
    pub fn symbol(&self, pos: Point) -> char {
        self.grid.get_point(pos)
    }

    /// The [Cell] at a position that is known to be in bounds.
    pub fn cell(&self, pos: Point) -> Cell {
        Cell {
            pos,
            symbol: self.grid.get_point(pos),
        }
    }

    pub fn is_wall(&self, pos: Point) -> bool {
        self.grid.get_point(pos) == WALL
    }

    /// In-bounds, non-wall neighbour positions of `pos`, enumerated right,
    /// down, left, up.
    pub fn adjacent_of(&self, pos: Point) -> Vec<Point> {
        ADJACENT_OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(pos.x + dx, pos.y + dy))
            .filter(|p| self.in_bounds(p.x, p.y) && !self.is_wall(*p))
            .collect()
    }
}

impl Grid<char> for TombGrid {
    fn new(width: usize, height: usize, default_value: char) -> Self {
        TombGrid {
            grid: SimpleGrid::new(width, height, default_value),
        }
    }
    fn get(&self, x: usize, y: usize) -> char {
        self.grid.get(x, y)
    }
    fn set(&mut self, x: usize, y: usize, value: char) {
        self.grid.set(x, y, value);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}

impl fmt::Display for TombGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                write!(f, "{}", self.grid.get(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
