//! LaTeX code generation: TikZ draw commands for a map (and optionally a
//! path, the derived graph and assorted highlights) plus a [RaidObserver]
//! that turns a full search run into Beamer slides, one per search step.
//! The emitted macros (`\BTmap`, `\BTwall`, `\BTtrap`, ...) are expected to
//! be defined in the preamble of the consuming document.
use std::collections::{BTreeSet, VecDeque};
use std::fmt::Write;

use grid_util::grid::Grid;
use grid_util::point::Point;
use itertools::Itertools;

use crate::graph::TombGraph;
use crate::parse::RaidMap;
use crate::raid::{RaidFrame, RaidObserver, RaidOutcome, VisitedSets};
use crate::tomb_grid::Cell;

/// TikZ draw commands for the map: highlights, walls, traps, the main path,
/// alternate ("maybe") paths, rejected ("no") paths, start, end, the grid
/// outline, optional cell coordinates and the optional graph overlay, in
/// that drawing order. Paths are drawn through cell centres.
#[allow(clippy::too_many_arguments)]
pub fn map_draw_commands(
    map: &RaidMap,
    graph: Option<&TombGraph>,
    path: &[Cell],
    maybe_paths: &[Vec<Cell>],
    no_paths: &[Vec<Cell>],
    highlight: &[Cell],
    scale: f64,
    show_coords: bool,
) -> String {
    let mut out = String::new();
    writeln!(out, "\\BTmap{{{scale}}}{{").unwrap();

    for cell in each_cell(map) {
        if highlight.contains(&cell) {
            writeln!(out, "\\BThighlight{{{}}}{{{}}}", cell.pos.x, cell.pos.y).unwrap();
        }
    }
    for cell in each_cell(map) {
        if cell.is_wall() {
            writeln!(out, "\\BTwall{{{}}}{{{}}}", cell.pos.x, cell.pos.y).unwrap();
        }
    }
    for cell in each_cell(map) {
        if map.ranking.is_trap(cell.symbol) {
            writeln!(
                out,
                "\\BTtrap{{{}}}{{{}}}{{{}}}",
                cell.pos.x, cell.pos.y, cell.symbol
            )
            .unwrap();
        }
    }

    writeln!(out, "\\BTpath{{{}}}", centre_line(path)).unwrap();
    for maybe_path in maybe_paths {
        writeln!(out, "\\BTmaybepath{{{}}}", centre_line(maybe_path)).unwrap();
    }
    for no_path in no_paths {
        writeln!(out, "\\BTnopath{{{}}}", centre_line(no_path)).unwrap();
    }

    writeln!(
        out,
        "\\BTstart{{{}}}{{{}}}",
        map.start.pos.x, map.start.pos.y
    )
    .unwrap();
    writeln!(out, "\\BTend{{{}}}{{{}}}", map.end.pos.x, map.end.pos.y).unwrap();
    writeln!(
        out,
        "\\BTgrid{{{}}}{{{}}}",
        map.grid.width(),
        map.grid.height()
    )
    .unwrap();
    if show_coords {
        writeln!(
            out,
            "\\BTcoords{{{}}}{{{}}}",
            map.grid.width(),
            map.grid.height()
        )
        .unwrap();
    }

    if let Some(graph) = graph {
        for (cell, adjacent) in graph.iter() {
            writeln!(out, "\\BTnode{{{}}}{{{}}}", cell.pos.x, cell.pos.y).unwrap();
            for adj in adjacent {
                writeln!(
                    out,
                    "\\BTedge{{{}}}{{{}}}{{{}}}{{{}}}",
                    cell.pos.x, cell.pos.y, adj.pos.x, adj.pos.y
                )
                .unwrap();
            }
        }
    }

    out.push_str("}\n");
    out
}

/// The unique traps occurring in the map in rank-independent sorted order,
/// preceded by `'0'` when the map contains any non-trap cell. This is the
/// key set the slide generator renders visited sets under.
pub fn unique_traps(map: &RaidMap) -> Vec<char> {
    let mut traps = BTreeSet::new();
    for cell in each_cell(map) {
        if map.ranking.is_trap(cell.symbol) {
            traps.insert(cell.symbol);
        } else {
            traps.insert('0');
        }
    }
    traps.into_iter().collect()
}

fn each_cell(map: &RaidMap) -> impl Iterator<Item = Cell> + '_ {
    (0..map.grid.height() as i32)
        .cartesian_product(0..map.grid.width() as i32)
        .map(|(y, x)| map.grid.cell(Point::new(x, y)))
}

/// `(x.5,y.5) -- ...` through the centres of the given cells.
fn centre_line(path: &[Cell]) -> String {
    path.iter()
        .map(|cell| format!("({}.5,{}.5)", cell.pos.x, cell.pos.y))
        .join(" -- ")
}

/// Rendering options for [SlideObserver], mirroring the knobs of the CLI
/// `slides` subcommand. `title` and `subtitle` may contain `{}` as a
/// placeholder for the step number.
#[derive(Clone, Debug)]
pub struct SlideOptions {
    pub title: String,
    pub subtitle: String,
    pub draw_graph: bool,
    pub highlight_traps: bool,
    pub highlight_start: bool,
    pub highlight_end: bool,
    pub highlight_current_cell: bool,
    pub highlight_accessible_neighbors: bool,
    pub highlight_inaccessible_neighbors: bool,
    pub max_queue_length: usize,
    pub scale: f64,
}

impl Default for SlideOptions {
    fn default() -> SlideOptions {
        SlideOptions {
            title: String::new(),
            subtitle: String::new(),
            draw_graph: false,
            highlight_traps: true,
            highlight_start: true,
            highlight_end: true,
            highlight_current_cell: true,
            highlight_accessible_neighbors: true,
            highlight_inaccessible_neighbors: true,
            max_queue_length: 3,
            scale: 1.0,
        }
    }
}

/// Observer that renders every step of a raid as a Beamer slide: the map
/// with the current path, admitted neighbours as maybe-paths and rejected
/// neighbours as no-paths, next to the current queue frame, the per-rank
/// visited sets and the queue contents. On success the slide of the
/// admitting step shows the end cell already enqueued, and one closing
/// slide shows the finished path with an exhausted queue.
pub struct SlideObserver<'a> {
    map: &'a RaidMap,
    options: SlideOptions,
    output: String,
    slide: usize,
}

impl<'a> SlideObserver<'a> {
    pub fn new(map: &'a RaidMap, options: SlideOptions) -> SlideObserver<'a> {
        SlideObserver {
            map,
            options,
            output: String::new(),
            slide: 0,
        }
    }

    /// The accumulated slide source.
    pub fn into_latex(self) -> String {
        self.output
    }

    /// Formats one cell coordinate pair, wrapped in the colour and underline
    /// macros its role asks for.
    fn cell_text(
        &self,
        cell: &Cell,
        current: &Cell,
        accessible: &[Cell],
        inaccessible: &[Cell],
    ) -> String {
        let mut text = format!("({},{})", cell.pos.x, cell.pos.y);

        if *cell == self.map.start {
            if self.options.highlight_start {
                text = format!("\\textcolor{{\\BTstartcolor}}{{{text}}}");
            }
        } else if *cell == self.map.end {
            if self.options.highlight_end {
                text = format!("\\textcolor{{\\BTendcolor}}{{{text}}}");
            }
        } else if self.map.ranking.is_trap(cell.symbol) && self.options.highlight_traps {
            text = format!("\\textcolor{{\\BTtrapcolor}}{{{text}}}");
        }

        if accessible.contains(cell) {
            if self.options.highlight_accessible_neighbors {
                text = format!("\\BTmaybeunderline{{{text}}}");
            }
        } else if inaccessible.contains(cell) {
            if self.options.highlight_inaccessible_neighbors {
                text = format!("\\BTnounderline{{{text}}}");
            }
        } else if cell == current && self.options.highlight_current_cell {
            text = format!("\\BThighlighttext{{{text}}}");
        }

        text
    }

    /// Formats a queue frame as `(cell, [path], trap)`, truncating paths
    /// longer than three cells to `\dots` plus their tail.
    fn queue_frame_text(
        &self,
        frame: &RaidFrame,
        current: &Cell,
        accessible: &[Cell],
        inaccessible: &[Cell],
    ) -> String {
        let fmt = |cell: &Cell| self.cell_text(cell, current, accessible, inaccessible);

        let cell_part = fmt(&frame.cell);

        let path = &frame.path;
        let mut path_part = fmt(&path[0]);
        if path.len() > 3 {
            path_part = "\\dots".to_owned();
        }
        if path.len() > 2 {
            path_part += &format!(",{}", fmt(&path[path.len() - 2]));
        }
        if path.len() > 1 {
            path_part += &format!(",{}", fmt(&path[path.len() - 1]));
        }

        let trap_part = match self.map.ranking.symbol_of(frame.triggered) {
            Some(symbol) => format!("\\textcolor{{\\BTtrapcolor}}{{{symbol}}}"),
            None => "0".to_owned(),
        };

        format!("({cell_part}, [{path_part}], {trap_part})")
    }

    fn emit_slide(
        &mut self,
        slide: usize,
        frame: &RaidFrame,
        accessible: &[Cell],
        inaccessible: &[Cell],
        visited: &VisitedSets,
        queue: &VecDeque<RaidFrame>,
    ) {
        self.slide = slide;

        self.output.push_str("\\begin{frame}\n");
        if !self.options.title.is_empty() {
            let title = self.options.title.replace("{}", &slide.to_string());
            writeln!(self.output, "\\frametitle{{{title}}}").unwrap();
        }
        if !self.options.subtitle.is_empty() {
            let subtitle = self.options.subtitle.replace("{}", &slide.to_string());
            writeln!(self.output, "\\framesubtitle{{{subtitle}}}").unwrap();
        }
        self.output.push_str("\\begin{columns}[c,onlytextwidth]\n");
        self.output.push_str("\\begin{column}{.4\\textwidth}\n");

        let maybe_paths: Vec<Vec<Cell>> = accessible.iter().map(|n| vec![frame.cell, *n]).collect();
        let no_paths: Vec<Vec<Cell>> =
            inaccessible.iter().map(|n| vec![frame.cell, *n]).collect();
        let graph = self.options.draw_graph.then_some(&self.map.graph);
        let map_block = map_draw_commands(
            self.map,
            graph,
            &frame.path,
            &maybe_paths,
            &no_paths,
            &[frame.cell],
            self.options.scale,
            true,
        );
        self.output.push_str(&map_block);

        self.output.push_str("\\end{column}\n");
        self.output.push_str("\\hspace{1em}\n");
        self.output.push_str("\\begin{column}{.5\\textwidth}\n");
        self.output.push_str("\\begin{align*}\n");

        // Current queue frame, shown from the second slide on.
        if slide > 1 {
            let frame_text = self.queue_frame_text(frame, &frame.cell, accessible, inaccessible);
            writeln!(
                self.output,
                "\\BTvphantomfix c_{{{}}} &= {frame_text}\\\\",
                slide - 1
            )
            .unwrap();
            self.output.push_str("&\\hspace{0.25em}-\\\\\n");
        }

        // Per-rank visited sets, truncated beyond four cells.
        for trap in unique_traps(self.map) {
            let rank = if trap == '0' {
                0
            } else {
                self.map.ranking.rank_of(trap)
            };
            let mut cells: Vec<String> = visited
                .rank(rank)
                .iter()
                .map(|cell| self.cell_text(cell, &frame.cell, accessible, inaccessible))
                .collect();
            if cells.is_empty() {
                writeln!(self.output, "\\BTvphantomfix v_{trap} &= \\varnothing\\\\").unwrap();
            } else {
                if cells.len() > 4 {
                    cells.drain(..cells.len() - 4);
                    cells.insert(0, "\\dots".to_owned());
                }
                writeln!(
                    self.output,
                    "\\BTvphantomfix v_{trap} &= \\{{{}\\}}\\\\",
                    cells.join(",")
                )
                .unwrap();
            }
        }

        // Queue contents, truncated beyond the configured length.
        let mut entries: Vec<String> = queue
            .iter()
            .map(|qf| self.queue_frame_text(qf, &frame.cell, accessible, inaccessible))
            .collect();
        if entries.len() > self.options.max_queue_length {
            entries.truncate(self.options.max_queue_length);
            entries.push("\\dots".to_owned());
        }
        writeln!(
            self.output,
            "q &= [{}]",
            entries.join(",\\\\ \\BTvphantomfix &\\phantom{{}=[}")
        )
        .unwrap();

        self.output.push_str("\\end{align*}\n");
        self.output.push_str("\\end{column}\n");
        self.output.push_str("\\end{columns}\n");
        self.output.push_str("\\end{frame}\n");
    }
}

impl RaidObserver for SlideObserver<'_> {
    fn seeded(&mut self, seed: &RaidFrame, visited: &VisitedSets, queue: &VecDeque<RaidFrame>) {
        self.emit_slide(1, seed, &[], &[], visited, queue);
    }

    fn step(
        &mut self,
        step: usize,
        frame: &RaidFrame,
        admitted: &[Cell],
        rejected: &[Cell],
        visited: &VisitedSets,
        queue: &VecDeque<RaidFrame>,
    ) {
        self.emit_slide(step + 1, frame, admitted, rejected, visited, queue);
    }

    fn finished(&mut self, outcome: &RaidOutcome, visited: &VisitedSets) {
        if !outcome.found() {
            return;
        }
        // Closing slide: the complete path as the current frame, queue drained.
        let triggered = outcome
            .path
            .iter()
            .filter(|cell| self.map.ranking.is_trap(cell.symbol))
            .map(|cell| self.map.ranking.rank_of(cell.symbol))
            .max()
            .unwrap_or(0);
        let final_frame = RaidFrame {
            cell: *outcome.path.last().unwrap(),
            path: outcome.path.clone(),
            triggered,
        };
        self.emit_slide(
            self.slide + 1,
            &final_frame,
            &[],
            &[],
            visited,
            &VecDeque::new(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raid::{raid, raid_observed};

    const SAMPLE: &str = "Z\n3 2\nooo\nxZo\n0 0\n2 1\n";

    #[test]
    fn map_commands_cover_walls_traps_and_endpoints() {
        let map = RaidMap::parse(SAMPLE).unwrap();
        let outcome = raid(&map.graph, &map.ranking, map.start, map.end).unwrap();
        let tex = map_draw_commands(&map, None, &outcome.path, &[], &[], &[], 1.0, true);
        assert!(tex.starts_with("\\BTmap{1}{\n"));
        assert!(tex.contains("\\BTwall{0}{1}\n"));
        assert!(tex.contains("\\BTtrap{1}{1}{Z}\n"));
        assert!(tex.contains("\\BTpath{(0.5,0.5) -- (1.5,0.5) -- (2.5,0.5) -- (2.5,1.5)}\n"));
        assert!(tex.contains("\\BTstart{0}{0}\n"));
        assert!(tex.contains("\\BTend{2}{1}\n"));
        assert!(tex.contains("\\BTgrid{3}{2}\n"));
        assert!(tex.contains("\\BTcoords{3}{2}\n"));
        assert!(!tex.contains("\\BTnode"));
        assert!(tex.ends_with("}\n"));
    }

    #[test]
    fn graph_overlay_draws_nodes_and_edges() {
        let map = RaidMap::parse("\n2 1\noo\n0 0\n1 0\n").unwrap();
        let tex = map_draw_commands(&map, Some(&map.graph), &[], &[], &[], &[], 1.0, false);
        assert!(tex.contains("\\BTpath{}\n"));
        assert!(tex.contains("\\BTnode{0}{0}\n"));
        assert!(tex.contains("\\BTedge{0}{0}{1}{0}\n"));
        assert!(tex.contains("\\BTedge{1}{0}{0}{0}\n"));
        assert!(!tex.contains("\\BTcoords"));
    }

    #[test]
    fn unique_traps_lists_zero_and_sorted_symbols() {
        let map = RaidMap::parse("ZY\n3 1\nYZo\n2 0\n2 0\n").unwrap();
        assert_eq!(unique_traps(&map), vec!['0', 'Y', 'Z']);
    }

    #[test]
    fn slides_cover_every_step_plus_closing_slide() {
        let map = RaidMap::parse(SAMPLE).unwrap();
        let mut observer = SlideObserver::new(
            &map,
            SlideOptions {
                title: "Step {}".to_owned(),
                ..SlideOptions::default()
            },
        );
        let outcome =
            raid_observed(&map.graph, &map.ranking, map.start, map.end, &mut observer).unwrap();
        assert_eq!(outcome.moves, 3);
        let tex = observer.into_latex();
        // Seed slide, three dequeue slides, one closing slide.
        assert_eq!(tex.matches("\\begin{frame}").count(), 5);
        assert!(tex.contains("\\frametitle{Step 1}"));
        assert!(tex.contains("\\frametitle{Step 5}"));
        assert!(tex.contains("v_0 &="));
        assert!(tex.contains("v_Z &="));
        assert!(tex.contains("q &= ["));
        assert!(tex.contains("\\varnothing"));
    }
}
