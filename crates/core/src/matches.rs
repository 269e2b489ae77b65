//! Match detection
//!
//! A match is any horizontal or vertical run of three or more equal colors.
//! The detector scans every triple independently and unions the cells into a
//! [`MatchSet`], so runs of four or more and crossing runs (L / T shapes) are
//! merged without being counted twice.

use crate::board::Board;
use crate::types::{CELL_COUNT, GRID_HEIGHT, GRID_WIDTH, MATCH_LENGTH};

/// Set of cell indices, stored as a 64-bit mask (one bit per cell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchSet(u64);

impl MatchSet {
    /// Empty set
    pub const fn new() -> Self {
        Self(0)
    }

    /// Insert a cell index. Out-of-range indices are ignored.
    #[inline]
    pub fn insert(&mut self, index: usize) {
        if index < CELL_COUNT {
            self.0 |= 1u64 << index;
        }
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < CELL_COUNT && self.0 & (1u64 << index) != 0
    }

    /// Number of cells in the set
    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Lowest index in the set
    pub fn first(&self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    /// Iterate indices in ascending order
    pub fn iter(&self) -> MatchIter {
        MatchIter { bits: self.0 }
    }
}

impl FromIterator<usize> for MatchSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = MatchSet::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

impl IntoIterator for MatchSet {
    type Item = usize;
    type IntoIter = MatchIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over a [`MatchSet`]
#[derive(Debug, Clone)]
pub struct MatchIter {
    bits: u64,
}

impl Iterator for MatchIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            return None;
        }
        let index = self.bits.trailing_zeros() as usize;
        // Clear lowest set bit
        self.bits &= self.bits - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for MatchIter {}

/// Find every cell that is part of a run of three or more equal colors.
///
/// Horizontal triples start at columns 0..=5 and vertical triples at rows 0..=5.
/// Pure: the same board always yields the same set.
pub fn find_matches(board: &Board) -> MatchSet {
    let cells = board.cells();
    let mut matched = MatchSet::new();

    // Horizontal
    for row in 0..GRID_HEIGHT {
        for col in 0..=(GRID_WIDTH - MATCH_LENGTH) {
            let i = row * GRID_WIDTH + col;
            if cells[i] == cells[i + 1] && cells[i] == cells[i + 2] {
                matched.insert(i);
                matched.insert(i + 1);
                matched.insert(i + 2);
            }
        }
    }

    // Vertical
    for col in 0..GRID_WIDTH {
        for row in 0..=(GRID_HEIGHT - MATCH_LENGTH) {
            let i = row * GRID_WIDTH + col;
            if cells[i] == cells[i + GRID_WIDTH] && cells[i] == cells[i + 2 * GRID_WIDTH] {
                matched.insert(i);
                matched.insert(i + GRID_WIDTH);
                matched.insert(i + 2 * GRID_WIDTH);
            }
        }
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    // (col + 2 * row) % 6 never repeats between neighbours
    const NO_MATCH: &str = "
        RBGYPORB
        GYPORBGY
        PORBGYPO
        RBGYPORB
        GYPORBGY
        PORBGYPO
        RBGYPORB
        GYPORBGY";

    #[test]
    fn test_no_match_layout_is_empty() {
        let board = Board::parse(NO_MATCH).unwrap();
        assert!(find_matches(&board).is_empty());
    }

    #[test]
    fn test_run_of_four_merged() {
        let mut board = Board::parse(NO_MATCH).unwrap();
        // Row 2: make cols 2..=5 all red
        for col in 2..6 {
            board.set(2 * 8 + col, crate::types::Color::Red);
        }
        let matched = find_matches(&board);
        assert_eq!(matched.iter().collect::<Vec<_>>(), vec![18, 19, 20, 21]);
    }

    #[test]
    fn test_l_shape_counts_corner_once() {
        let mut board = Board::parse(NO_MATCH).unwrap();
        let c = crate::types::Color::Purple;
        // Corner at (4, 1): horizontal to (4, 3), vertical up to (2, 1)
        for idx in [33, 34, 35, 25, 17] {
            board.set(idx, c);
        }
        let matched = find_matches(&board);
        assert_eq!(matched.len(), 5);
        for idx in [17, 25, 33, 34, 35] {
            assert!(matched.contains(idx));
        }
    }

    #[test]
    fn test_match_set_iteration_order() {
        let set: MatchSet = [40, 3, 17, 63].into_iter().collect();
        assert_eq!(set.first(), Some(3));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 17, 40, 63]);
        assert_eq!(set.iter().len(), 4);
        assert!(!set.contains(64));
    }
}
