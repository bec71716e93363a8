//! The diversity cost model and the grid pather that applies it.

use gridpass_core::{CharClass, CharGrid, Coord};

use crate::distance::{SCALE, euclidean_centi};
use crate::trail::Trail;
use crate::traits::{Pather, ScoredPather};

/// Constants of the edge-cost function, in whole steps.
///
/// Two variants exist. [`CostModel::default`] grants the first-time bonus
/// when a class counter equals 1 and adds 1 for overlong paths;
/// [`CostModel::strict`] grants it when the counter is still 0 and adds 3.
/// They reward different occurrences of a class, so passwords differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostModel {
    /// Cost of every edge before adjustments.
    pub base: i64,
    /// Added while fewer than N nodes have a predecessor.
    pub short_penalty: i64,
    /// Added once more than N nodes have a predecessor.
    pub long_penalty: i64,
    /// Added unless the move is exempt (see [`turn_exempt`]).
    pub turn_penalty: i64,
    /// Subtracted when the target's class counter equals `first_threshold`.
    pub first_bonus: i64,
    /// Subtracted otherwise.
    pub repeat_bonus: i64,
    /// Counter value that earns `first_bonus`.
    pub first_threshold: u32,
}

impl CostModel {
    /// The variant keyed on a zero counter, with the heavier long-path
    /// penalty.
    pub const fn strict() -> Self {
        Self {
            first_threshold: 0,
            long_penalty: 3,
            ..Self::CANONICAL
        }
    }

    const CANONICAL: Self = Self {
        base: 1,
        short_penalty: 2,
        long_penalty: 1,
        turn_penalty: 4,
        first_bonus: 2,
        repeat_bonus: 1,
        first_threshold: 1,
    };
}

impl Default for CostModel {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Whether a move skips the turn penalty.
///
/// The test compares each coordinate of `from` against both coordinates of
/// `to`. It is not a geometric turn check and almost never holds; scores
/// and recorded passwords depend on it exactly as written.
#[inline]
pub fn turn_exempt(from: Coord, to: Coord) -> bool {
    (from.row == to.row && from.row == to.col) || (from.col == to.row && from.col == to.col)
}

/// Scores moves over a [`CharGrid`] to favour class diversity.
#[derive(Debug, Clone, Copy)]
pub struct DiversityPather<'a> {
    grid: &'a CharGrid,
    model: CostModel,
}

impl<'a> DiversityPather<'a> {
    /// Pather over `grid` using `model`.
    pub fn new(grid: &'a CharGrid, model: CostModel) -> Self {
        Self { grid, model }
    }

    /// The grid being searched.
    pub fn grid(&self) -> &'a CharGrid {
        self.grid
    }

    /// The cost constants in use.
    pub fn model(&self) -> CostModel {
        self.model
    }
}

impl Pather for DiversityPather<'_> {
    fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>) {
        buf.extend(self.grid.neighbors(p));
    }
}

impl ScoredPather for DiversityPather<'_> {
    fn cost(&self, from: Coord, to: Coord, trail: &mut Trail) -> i64 {
        let m = &self.model;
        let n = self.grid.size();
        let mut steps = m.base;

        let recorded = trail.recorded();
        if recorded < n {
            steps += m.short_penalty;
        } else if recorded > n {
            steps += m.long_penalty;
        }

        if !turn_exempt(from, to) {
            steps += m.turn_penalty;
        }

        if let Some(class) = self.grid.at(to).and_then(CharClass::of) {
            let seen = trail.complexity().count(class);
            steps -= if seen == m.first_threshold {
                m.first_bonus
            } else {
                m.repeat_bonus
            };
            trail.complexity_mut().record(class);
        }

        steps * SCALE
    }

    fn estimate(&self, from: Coord, goal: Coord, trail: &Trail) -> i64 {
        euclidean_centi(from, goal) - SCALE * trail.complexity().distinct() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> CharGrid {
        CharGrid::from_rows(&[
            ['a', 'b', 'c', 'd'],
            ['1', '2', '3', '4'],
            ['A', 'B', 'C', 'D'],
            ['!', '@', '#', '$'],
        ])
        .unwrap()
    }

    #[test]
    fn turn_exemption_is_literal() {
        // (1,2)->(1,1): from.row equals both to.row and to.col.
        assert!(turn_exempt(Coord::new(1, 2), Coord::new(1, 1)));
        // (2,1)->(1,1): from.col equals both coordinates of `to`.
        assert!(turn_exempt(Coord::new(2, 1), Coord::new(1, 1)));
        // (2,3)->(3,3): from.col equals both coordinates of `to`.
        assert!(turn_exempt(Coord::new(2, 3), Coord::new(3, 3)));
        // No coordinate of `from` matches both of `to`: penalised, even
        // along the diagonal.
        assert!(!turn_exempt(Coord::new(0, 0), Coord::new(1, 1)));
        assert!(!turn_exempt(Coord::new(2, 2), Coord::new(3, 3)));
        assert!(!turn_exempt(Coord::new(0, 0), Coord::new(0, 1)));
    }

    #[test]
    fn short_trail_penalty_and_repeat_bonus() {
        let g = grid();
        let p = DiversityPather::new(&g, CostModel::default());
        let mut trail = Trail::new();
        // 1 + 2 (short) + 4 (turn) - 1 (digit counter 0, threshold 1)
        assert_eq!(p.cost(Coord::new(0, 0), Coord::new(1, 1), &mut trail), 600);
        // Digit counter is now 1: first-time bonus.
        assert_eq!(p.cost(Coord::new(0, 0), Coord::new(1, 0), &mut trail), 500);
        // Counter at 2: back to the repeat bonus.
        assert_eq!(p.cost(Coord::new(0, 0), Coord::new(1, 1), &mut trail), 600);
        assert_eq!(trail.complexity().count(CharClass::Digit), 3);
    }

    #[test]
    fn strict_rewards_the_first_visit() {
        let g = grid();
        let p = DiversityPather::new(&g, CostModel::strict());
        let mut trail = Trail::new();
        assert_eq!(p.cost(Coord::new(0, 0), Coord::new(1, 1), &mut trail), 500);
        assert_eq!(p.cost(Coord::new(0, 0), Coord::new(1, 0), &mut trail), 600);
    }

    #[test]
    fn length_penalties() {
        let g = grid();
        let exempt = (Coord::new(1, 2), Coord::new(1, 1));
        for (recorded, model, expected) in [
            (4, CostModel::default(), 0),
            (5, CostModel::default(), 100),
            (5, CostModel::strict(), 300),
            (0, CostModel::default(), 200),
        ] {
            let p = DiversityPather::new(&g, model);
            let mut trail = Trail::new();
            trail.recorded = recorded;
            // '2' is the first digit: repeat bonus under default, first bonus
            // under strict.
            let bonus = if model.first_threshold == 0 { 100 } else { 0 };
            assert_eq!(
                p.cost(exempt.0, exempt.1, &mut trail),
                expected - bonus,
                "recorded={recorded} model={model:?}"
            );
        }
    }

    #[test]
    fn unclassified_targets_earn_nothing() {
        let g = CharGrid::from_rows(&[[',', 'a'], ['b', 'c']]).unwrap();
        let p = DiversityPather::new(&g, CostModel::default());
        let mut trail = Trail::new();
        assert_eq!(p.cost(Coord::new(1, 1), Coord::new(0, 0), &mut trail), 700);
        assert_eq!(trail.complexity().distinct(), 0);
    }

    #[test]
    fn estimate_subtracts_active_classes() {
        let g = grid();
        let p = DiversityPather::new(&g, CostModel::default());
        let mut trail = Trail::new();
        let goal = Coord::new(3, 3);
        assert_eq!(p.estimate(Coord::ZERO, goal, &trail), 424);
        trail.complexity_mut().record(CharClass::Upper);
        trail.complexity_mut().record(CharClass::Upper);
        trail.complexity_mut().record(CharClass::Lower);
        assert_eq!(p.estimate(Coord::ZERO, goal, &trail), 224);
    }

    #[test]
    fn neighbors_stay_in_bounds() {
        let g = grid();
        let p = DiversityPather::new(&g, CostModel::default());
        let mut buf = Vec::new();
        p.neighbors(Coord::new(0, 3), &mut buf);
        assert_eq!(
            buf,
            vec![Coord::new(0, 2), Coord::new(1, 2), Coord::new(1, 3)]
        );
    }
}
