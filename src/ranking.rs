use fxhash::FxHashMap;

use crate::{MapError, EMPTY, WALL};

/// The total order over trap symbols. Rank is the 1-based position in the
/// ranking string, weakest trap first, so `"ZYXWVUTSRQPONMLKJIHGFEDCBA"`
/// makes `'Z'` the weakest trap (rank 1) and `'A'` the strongest (rank 26).
/// Rank 0 is reserved for "no trap triggered" and never maps to a symbol.
///
/// A trap of rank R dominates all traps of rank <= R: once it has been
/// triggered along a path, those traps are spent for the rest of that path.
#[derive(Clone, Debug, Default)]
pub struct TrapRanking {
    order: Vec<char>,
    ranks: FxHashMap<char, usize>,
}

impl TrapRanking {
    /// Builds a ranking from the raw ranking string. The string may be empty
    /// (a trapless map); symbols must be unique and must not collide with the
    /// wall and empty symbols.
    pub fn new(order: &str) -> Result<TrapRanking, MapError> {
        let order: Vec<char> = order.chars().collect();
        let mut ranks = FxHashMap::default();
        for (i, &symbol) in order.iter().enumerate() {
            if symbol == WALL || symbol == EMPTY {
                return Err(MapError::MalformedMap(format!(
                    "trap ranking may not contain the reserved symbol {symbol:?}"
                )));
            }
            if ranks.insert(symbol, i + 1).is_some() {
                return Err(MapError::MalformedMap(format!(
                    "duplicate symbol {symbol:?} in trap ranking"
                )));
            }
        }
        Ok(TrapRanking { order, ranks })
    }

    /// Whether the symbol is a configured trap.
    pub fn is_trap(&self, symbol: char) -> bool {
        self.ranks.contains_key(&symbol)
    }

    /// The 1-based rank of a trap symbol. Looking up a symbol that is not a
    /// configured trap is a programming error; guard with [is_trap](Self::is_trap).
    pub fn rank_of(&self, symbol: char) -> usize {
        match self.ranks.get(&symbol) {
            Some(&rank) => rank,
            None => panic!("symbol {symbol:?} is not a configured trap"),
        }
    }

    /// The trap symbol carrying the given rank, or [None] for rank 0 and
    /// ranks beyond the ranking.
    pub fn symbol_of(&self, rank: usize) -> Option<char> {
        if rank == 0 {
            return None;
        }
        self.order.get(rank - 1).copied()
    }

    /// Number of configured traps, which is also the highest rank.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Trap symbols in rank order, weakest first.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_are_one_based_and_ordered() {
        let ranking = TrapRanking::new("ZYA").unwrap();
        assert!(ranking.is_trap('Z'));
        assert!(ranking.is_trap('A'));
        assert!(!ranking.is_trap('B'));
        assert!(!ranking.is_trap('o'));
        assert_eq!(ranking.rank_of('Z'), 1);
        assert_eq!(ranking.rank_of('Y'), 2);
        assert_eq!(ranking.rank_of('A'), 3);
        assert_eq!(ranking.len(), 3);
    }

    #[test]
    fn symbol_of_inverts_rank_of() {
        let ranking = TrapRanking::new("ba").unwrap();
        assert_eq!(ranking.symbol_of(0), None);
        assert_eq!(ranking.symbol_of(1), Some('b'));
        assert_eq!(ranking.symbol_of(2), Some('a'));
        assert_eq!(ranking.symbol_of(3), None);
    }

    #[test]
    fn empty_ranking_has_no_traps() {
        let ranking = TrapRanking::new("").unwrap();
        assert!(ranking.is_empty());
        assert!(!ranking.is_trap('A'));
    }

    #[test]
    fn rejects_duplicates_and_reserved_symbols() {
        assert!(matches!(
            TrapRanking::new("ABA"),
            Err(MapError::MalformedMap(_))
        ));
        assert!(matches!(
            TrapRanking::new("Axo"),
            Err(MapError::MalformedMap(_))
        ));
    }

    #[test]
    #[should_panic(expected = "not a configured trap")]
    fn rank_of_unknown_symbol_panics() {
        TrapRanking::new("AB").unwrap().rank_of('o');
    }
}
