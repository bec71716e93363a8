use gridpass_core::Coord;

use crate::trail::Trail;

/// Minimal search interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>);
}

/// Pather whose scores depend on the search history.
///
/// Both methods see the [`Trail`] of the running search. `cost` may update
/// it, so calling it twice for the same edge can give different results.
/// Scores are fixed-point, in units of 1/[`SCALE`](crate::SCALE).
pub trait ScoredPather: Pather {
    /// Cost of stepping from `from` to adjacent `to`. May be negative.
    fn cost(&self, from: Coord, to: Coord, trail: &mut Trail) -> i64;

    /// Estimate of the remaining cost from `from` to `goal`. Not required to
    /// be admissible.
    fn estimate(&self, from: Coord, goal: Coord, trail: &Trail) -> i64;
}
