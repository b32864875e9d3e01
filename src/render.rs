use grid_util::grid::Grid;
use grid_util::point::Point;

use crate::parse::RaidMap;
use crate::raid::RaidOutcome;

/// Renders the map with a raid's result laid over it: `S` for the start,
/// `E` for the end, `*` for intermediate path cells and, with
/// `show_visited`, `+` for visited cells that did not end up on the path.
/// All other cells keep their grid symbol. Plain text, no terminal control.
pub fn render_raid(map: &RaidMap, outcome: &RaidOutcome, show_visited: bool) -> String {
    let mut out = String::new();
    for y in 0..map.grid.height() as i32 {
        for x in 0..map.grid.width() as i32 {
            let cell = map.grid.cell(Point::new(x, y));
            let symbol = if cell == map.start {
                'S'
            } else if cell == map.end {
                'E'
            } else if outcome.path.contains(&cell) {
                '*'
            } else if show_visited && outcome.visited.contains(&cell) {
                '+'
            } else {
                cell.symbol
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raid::raid;

    #[test]
    fn path_overlay_keeps_walls_and_traps() {
        let map = RaidMap::parse("Z\n3 2\nooo\nxZo\n0 0\n2 1\n").unwrap();
        let outcome = raid(&map.graph, &map.ranking, map.start, map.end).unwrap();
        assert_eq!(outcome.moves, 3);
        assert_eq!(render_raid(&map, &outcome, false), "S**\nxZE\n");
    }

    #[test]
    fn visited_marks_are_opt_in() {
        let map = RaidMap::parse("\n3 1\nooo\n0 0\n1 0\n").unwrap();
        let outcome = raid(&map.graph, &map.ranking, map.start, map.end).unwrap();
        assert_eq!(render_raid(&map, &outcome, false), "SEo\n");
        assert_eq!(render_raid(&map, &outcome, true), "SEo\n");
    }
}
