use std::str::FromStr;

use grid_util::grid::Grid;
use grid_util::point::Point;

use crate::graph::TombGraph;
use crate::ranking::TrapRanking;
use crate::tomb_grid::{Cell, TombGrid};
use crate::{MapError, EMPTY, WALL};

/// A fully parsed search problem: ranking, grid, derived graph and the two
/// endpoint cells. This is the tuple every collaborator (CLI, renderers,
/// diagram generators) works from.
#[derive(Clone, Debug)]
pub struct RaidMap {
    pub ranking: TrapRanking,
    pub grid: TombGrid,
    pub graph: TombGraph,
    pub start: Cell,
    pub end: Cell,
}

impl RaidMap {
    /// Parses the textual map format:
    ///
    /// ```text
    /// <trap ranking string, weakest trap first; may be empty>
    /// <width> <height>
    /// <height> rows of exactly <width> symbols>
    /// <startX> <startY>
    /// <endX> <endY>
    /// ```
    ///
    /// Trailing input after the end position is ignored.
    pub fn parse(input: &str) -> Result<RaidMap, MapError> {
        let mut lines = input.lines().map(|line| line.trim_end_matches('\r'));

        let ranking_line = next_line(&mut lines, "trap ranking")?;
        let ranking = TrapRanking::new(ranking_line.trim())?;

        let (width, height): (usize, usize) =
            parse_pair(next_line(&mut lines, "dimensions")?, "dimensions")?;
        if width == 0 || height == 0 {
            return Err(MapError::MalformedMap(format!(
                "map dimensions {width}x{height} are empty"
            )));
        }

        let mut rows = Vec::with_capacity(height);
        for _ in 0..height {
            rows.push(next_line(&mut lines, "map row")?);
        }
        let grid = TombGrid::from_rows(&rows)?;
        if grid.width() != width || grid.height() != height {
            return Err(MapError::MalformedMap(format!(
                "map is {}x{}, expected {width}x{height}",
                grid.width(),
                grid.height()
            )));
        }
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let symbol = grid.symbol(Point::new(x, y));
                if symbol != WALL && symbol != EMPTY && !ranking.is_trap(symbol) {
                    return Err(MapError::UnknownSymbol { symbol, x, y });
                }
            }
        }

        let start = resolve(&grid, next_line(&mut lines, "start position")?, "start")?;
        let end = resolve(&grid, next_line(&mut lines, "end position")?, "end")?;
        let graph = TombGraph::build(&grid);

        Ok(RaidMap {
            ranking,
            grid,
            graph,
            start,
            end,
        })
    }
}

fn next_line<'a, I>(lines: &mut I, what: &str) -> Result<&'a str, MapError>
where
    I: Iterator<Item = &'a str>,
{
    lines
        .next()
        .ok_or_else(|| MapError::MalformedMap(format!("missing {what} line")))
}

fn parse_pair<T: FromStr>(line: &str, what: &str) -> Result<(T, T), MapError> {
    let mut tokens = line.split_whitespace();
    let pair = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(a), Some(b), None) => (a.parse::<T>(), b.parse::<T>()),
        _ => {
            return Err(MapError::MalformedMap(format!(
                "expected two {what} values, got {line:?}"
            )))
        }
    };
    match pair {
        (Ok(a), Ok(b)) => Ok((a, b)),
        _ => Err(MapError::MalformedMap(format!(
            "{what} values in {line:?} are not numbers"
        ))),
    }
}

fn resolve(grid: &TombGrid, line: &str, what: &str) -> Result<Cell, MapError> {
    let (x, y): (i32, i32) = parse_pair(line, what)?;
    if !grid.in_bounds(x, y) || grid.is_wall(Point::new(x, y)) {
        return Err(MapError::InvalidPosition { x, y });
    }
    Ok(grid.cell(Point::new(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "ZY\n3 2\noZo\noxY\n0 0\n2 0\n";

    #[test]
    fn parses_a_complete_map() {
        let map = RaidMap::parse(SAMPLE).unwrap();
        assert_eq!(map.grid.width(), 3);
        assert_eq!(map.grid.height(), 2);
        assert_eq!(map.start, Cell::new(0, 0, 'o'));
        assert_eq!(map.end, Cell::new(2, 0, 'o'));
        assert_eq!(map.ranking.rank_of('Y'), 2);
        assert_eq!(map.graph.len(), 5);
    }

    #[test]
    fn empty_ranking_line_means_no_traps() {
        let map = RaidMap::parse("\n2 1\noo\n0 0\n1 0\n").unwrap();
        assert!(map.ranking.is_empty());
    }

    #[test]
    fn rejects_dimension_mismatch() {
        assert!(matches!(
            RaidMap::parse("ZY\n4 2\noZo\noxY\n0 0\n2 0\n"),
            Err(MapError::MalformedMap(_))
        ));
        // Declared height of 3 swallows the position lines as rows and then
        // runs out of input.
        assert!(matches!(
            RaidMap::parse("ZY\n3 3\noZo\noxY\n"),
            Err(MapError::MalformedMap(_))
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        assert!(matches!(
            RaidMap::parse("ZY\n3 2\noZo\nox\n0 0\n2 0\n"),
            Err(MapError::MalformedMap(_))
        ));
    }

    #[test]
    fn rejects_unranked_trap_symbols() {
        assert_eq!(
            RaidMap::parse("ZY\n3 1\noWo\n0 0\n2 0\n").unwrap_err(),
            MapError::UnknownSymbol {
                symbol: 'W',
                x: 1,
                y: 0
            }
        );
    }

    #[test]
    fn rejects_endpoints_off_grid_or_on_walls() {
        assert_eq!(
            RaidMap::parse("ZY\n3 2\noZo\noxY\n0 5\n2 0\n").unwrap_err(),
            MapError::InvalidPosition { x: 0, y: 5 }
        );
        assert_eq!(
            RaidMap::parse("ZY\n3 2\noZo\noxY\n0 0\n1 1\n").unwrap_err(),
            MapError::InvalidPosition { x: 1, y: 1 }
        );
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!(matches!(
            RaidMap::parse("\nthree one\nooo\n0 0\n2 0\n"),
            Err(MapError::MalformedMap(_))
        ));
        assert!(matches!(
            RaidMap::parse("\n3 1\nooo\na b\n2 0\n"),
            Err(MapError::MalformedMap(_))
        ));
    }

    #[test]
    fn trailing_lines_are_ignored() {
        assert!(RaidMap::parse("\n2 1\noo\n0 0\n1 0\nextra\n").is_ok());
    }
}
