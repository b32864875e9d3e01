use tomb_pathfinding::{raid, Cell, RaidMap, RaidOutcome};

fn solve(input: &str) -> (RaidMap, RaidOutcome) {
    let map = RaidMap::parse(input).unwrap();
    let outcome = raid(&map.graph, &map.ranking, map.start, map.end).unwrap();
    (map, outcome)
}

/// The ranks of the traps stepped on along a path, in path order.
fn trap_ranks(map: &RaidMap, path: &[Cell]) -> Vec<usize> {
    path.iter()
        .filter(|cell| map.ranking.is_trap(cell.symbol))
        .map(|cell| map.ranking.rank_of(cell.symbol))
        .collect()
}

#[test]
fn trap_free_map_is_plain_shortest_path() {
    let (_, outcome) = solve("\n5 5\nooooo\noxxxo\nooooo\noxxxo\nooooo\n0 0\n4 4\n");
    assert_eq!(outcome.moves, 8);
    assert_eq!(outcome.moves as usize, outcome.path.len() - 1);
}

#[test]
fn success_path_connects_start_to_end_in_unit_steps() {
    let (map, outcome) = solve("ZY\n5 3\nooooo\noZoYo\nooooo\n0 1\n4 1\n");
    assert!(outcome.found());
    assert_eq!(outcome.path[0], map.start);
    assert_eq!(*outcome.path.last().unwrap(), map.end);
    for pair in outcome.path.windows(2) {
        let dx = (pair[0].pos.x - pair[1].pos.x).abs();
        let dy = (pair[0].pos.y - pair[1].pos.y).abs();
        assert_eq!(dx + dy, 1);
    }
}

#[test]
fn weak_then_strong_trap_gate_is_passable() {
    // The only way through the two wall columns is over 'b' (rank 1) and
    // then 'a' (rank 2): triggered ranks ascend, so the gate opens.
    let input = "ba\n5 3\nooxoo\noboao\nooxoo\n0 0\n4 0\n";
    let (map, outcome) = solve(input);
    assert_eq!(outcome.moves, 6);
    assert_eq!(trap_ranks(&map, &outcome.path), vec![1, 2]);
}

#[test]
fn strong_then_weak_trap_gate_is_impossible() {
    // Same tomb with the ranking reversed: 'b' (now rank 2) dominates 'a'
    // (rank 1) before it is reached.
    let (map, outcome) = solve("ab\n5 3\nooxoo\noboao\nooxoo\n0 0\n4 0\n");
    assert_eq!(outcome.moves, -1);
    assert_eq!(outcome.path[0], map.start);
}

#[test]
fn triggered_ranks_never_descend() {
    let inputs = [
        "ZYX\n7 1\noZoYoXo\n0 0\n6 0\n",
        "ZYX\n5 5\nooooo\noZxYo\nooxoo\noXxoo\nooooo\n0 0\n4 4\n",
    ];
    for input in inputs {
        let (map, outcome) = solve(input);
        let ranks = trap_ranks(&map, &outcome.path);
        assert!(
            ranks.windows(2).all(|pair| pair[0] < pair[1]),
            "ranks {ranks:?} descend for {input:?}"
        );
    }
}

#[test]
fn detour_over_trap_beats_no_path_at_all() {
    // The direct corridor is walled; the only route steps on 'Z'.
    let (map, outcome) = solve("Z\n3 3\noxo\noZo\noxo\n0 0\n2 0\n");
    assert_eq!(outcome.moves, 4);
    assert_eq!(trap_ranks(&map, &outcome.path), vec![1]);
}

#[test]
fn search_is_deterministic() {
    let input = "ZY\n6 4\noooooo\noZxYoo\nooxxoo\noooooo\n0 0\n5 3\n";
    let map = RaidMap::parse(input).unwrap();
    let first = raid(&map.graph, &map.ranking, map.start, map.end).unwrap();
    let second = raid(&map.graph, &map.ranking, map.start, map.end).unwrap();
    assert_eq!(first, second);

    let reparsed = RaidMap::parse(input).unwrap();
    let third = raid(&reparsed.graph, &reparsed.ranking, reparsed.start, reparsed.end).unwrap();
    assert_eq!(first.moves, third.moves);
    assert_eq!(first.path, third.path);
}

#[test]
fn best_effort_path_ends_at_last_processed_frame() {
    // Starting on 'A' (rank 2) makes 'B' (rank 1) unreachable, including
    // as the destination.
    let (_, outcome) = solve("BA\n3 1\nAoB\n0 0\n2 0\n");
    assert_eq!(outcome.moves, -1);
    assert_eq!(
        outcome.path,
        vec![Cell::new(0, 0, 'A'), Cell::new(1, 0, 'o')]
    );
}

#[test]
fn visited_cells_cover_the_path() {
    let (_, outcome) = solve("ZY\n5 3\nooooo\noZoYo\nooooo\n0 1\n4 1\n");
    for cell in &outcome.path {
        assert!(outcome.visited.contains(cell));
    }
}

#[test]
fn snake_corridor_with_ascending_traps() {
    // A single snaking corridor: every route steps on 'c', 'b' and 'a' in
    // that order.
    let input = "\
cba
5 5
oocoo
xxxxo
ooboo
oxxxx
ooaoo
0 0
4 4
";
    let (map, outcome) = solve(input);
    assert_eq!(outcome.moves, 16);
    assert_eq!(outcome.moves as usize, outcome.path.len() - 1);
    assert_eq!(trap_ranks(&map, &outcome.path), vec![1, 2, 3]);
}
