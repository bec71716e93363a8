//! Best-first search driven by a [`ScoredPather`].

use std::collections::BinaryHeap;
use std::fmt;

use gridpass_core::Coord;
use log::{debug, trace};

use crate::trail::{Complexity, Trail};
use crate::traits::ScoredPather;

/// Sentinel parent index meaning "no predecessor".
const NO_PARENT: usize = usize::MAX;

/// Pops allowed per grid cell before the search gives up.
const EXPANSIONS_PER_CELL: usize = 8;

// ---------------------------------------------------------------------------
// Internal nodes for the priority-queue search
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Node {
    g: i64,
    f: i64,
    open: bool,
    closed: bool,
}

/// Reference into the node array, ordered by `f` then push order for use in
/// `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    f: i64,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, oldest
        // entry first among equals.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Predecessors
// ---------------------------------------------------------------------------

/// The came-from map of a finished search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predecessors {
    parents: Vec<usize>,
    size: usize,
}

impl Predecessors {
    /// An empty map over a `size`×`size` grid.
    pub fn new(size: usize) -> Self {
        Self {
            parents: vec![NO_PARENT; size * size],
            size,
        }
    }

    fn idx(&self, c: Coord) -> Option<usize> {
        let (Ok(row), Ok(col)) = (usize::try_from(c.row), usize::try_from(c.col)) else {
            return None;
        };
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    fn coord(&self, idx: usize) -> Coord {
        Coord::new((idx / self.size) as i32, (idx % self.size) as i32)
    }

    /// Record `from` as the predecessor of `to`. Out-of-bounds coordinates
    /// are ignored.
    pub fn insert(&mut self, to: Coord, from: Coord) {
        if let (Some(t), Some(f)) = (self.idx(to), self.idx(from)) {
            self.parents[t] = f;
        }
    }

    /// Predecessor of `c`, if one was recorded.
    pub fn get(&self, c: Coord) -> Option<Coord> {
        let i = self.idx(c)?;
        match self.parents[i] {
            NO_PARENT => None,
            p => Some(self.coord(p)),
        }
    }

    /// Number of coordinates with a recorded predecessor.
    pub fn len(&self) -> usize {
        self.parents.iter().filter(|&&p| p != NO_PARENT).count()
    }

    /// Whether no predecessor was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walk predecessor links back from `goal` to the first coordinate
    /// without one, and return the walk in forward order.
    ///
    /// Fails with [`SearchError::BrokenTrail`] if the links loop.
    pub fn path_to(&self, goal: Coord) -> Result<Vec<Coord>, SearchError> {
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(prev) = self.get(current) {
            if path.len() > self.parents.len() {
                return Err(SearchError::BrokenTrail { from: goal });
            }
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a search produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Start or goal lies outside the grid.
    OutOfBounds(Coord),
    /// The frontier ran dry before reaching the goal.
    Exhausted,
    /// The expansion cap was hit.
    ExpansionLimit { expansions: usize },
    /// Predecessor links from this coordinate loop instead of ending.
    BrokenTrail { from: Coord },
}

impl SearchError {
    /// Whether a retry with other anchors or another grid may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::OutOfBounds(_))
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(c) => write!(f, "coordinate {c} is outside the grid"),
            Self::Exhausted => write!(f, "search frontier exhausted before reaching the goal"),
            Self::ExpansionLimit { expansions } => {
                write!(f, "search gave up after {expansions} expansions")
            }
            Self::BrokenTrail { from } => {
                write!(f, "predecessor links from {from} form a loop")
            }
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Result of a successful search.
#[derive(Debug, Clone)]
pub struct Route {
    /// Coordinates from start to goal inclusive.
    pub path: Vec<Coord>,
    /// The came-from map the path was read from.
    pub predecessors: Predecessors,
    /// Class counters at the moment the goal was reached.
    pub complexity: Complexity,
    /// Nodes expanded.
    pub expansions: usize,
}

/// Search a `size`×`size` grid for a path from `start` to `goal`.
///
/// Nodes are expanded in order of lowest `f = g + estimate`. Edge costs come
/// from `pather` and may depend on everything explored so far. A neighbour
/// that is not yet closed always takes the newest tentative cost; a closed
/// one is re-opened only when the new cost is strictly lower.
pub fn search<P: ScoredPather>(
    pather: &P,
    size: usize,
    start: Coord,
    goal: Coord,
) -> Result<Route, SearchError> {
    let mut state = SearchState::new(size);
    let start_idx = state.idx(start).ok_or(SearchError::OutOfBounds(start))?;
    let goal_idx = state.idx(goal).ok_or(SearchError::OutOfBounds(goal))?;

    if start_idx == goal_idx {
        return Ok(Route {
            path: vec![start],
            predecessors: state.preds,
            complexity: Complexity::default(),
            expansions: 0,
        });
    }

    let expansions = state.run(pather, start_idx, goal_idx)?;
    let path = state.preds.path_to(goal)?;
    debug!(
        "search {start} -> {goal}: {} steps, {expansions} expansions, classes {:?}",
        path.len(),
        state.trail.complexity().counts()
    );
    Ok(Route {
        path,
        predecessors: state.preds,
        complexity: *state.trail.complexity(),
        expansions,
    })
}

/// Everything one search run owns.
struct SearchState {
    size: usize,
    nodes: Vec<Node>,
    preds: Predecessors,
    trail: Trail,
    seq: u64,
}

impl SearchState {
    fn new(size: usize) -> Self {
        Self {
            size,
            nodes: vec![Node::default(); size * size],
            preds: Predecessors::new(size),
            trail: Trail::new(),
            seq: 0,
        }
    }

    #[inline]
    fn idx(&self, c: Coord) -> Option<usize> {
        self.preds.idx(c)
    }

    #[inline]
    fn point(&self, idx: usize) -> Coord {
        self.preds.coord(idx)
    }

    fn entry(&mut self, idx: usize) -> NodeRef {
        let r = NodeRef {
            idx,
            f: self.nodes[idx].f,
            seq: self.seq,
        };
        self.seq += 1;
        r
    }

    /// Run the main loop. Returns the number of expansions once the goal is
    /// popped.
    fn run<P: ScoredPather>(
        &mut self,
        pather: &P,
        start_idx: usize,
        goal_idx: usize,
    ) -> Result<usize, SearchError> {
        let goal = self.point(goal_idx);
        let limit = EXPANSIONS_PER_CELL * self.size * self.size + 64;

        {
            let start = self.point(start_idx);
            let f = pather.estimate(start, goal, &self.trail);
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.f = f;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let first = self.entry(start_idx);
        open.push(first);

        let mut nbuf: Vec<Coord> = Vec::with_capacity(8);
        let mut expansions = 0;

        while let Some(current) = open.pop() {
            let ci = current.idx;

            // Skip stale entries.
            let node = &self.nodes[ci];
            if !node.open || node.f != current.f {
                continue;
            }

            if ci == goal_idx {
                return Ok(expansions);
            }

            expansions += 1;
            if expansions > limit {
                return Err(SearchError::ExpansionLimit { expansions: limit });
            }

            self.nodes[ci].open = false;
            self.nodes[ci].closed = true;
            let current_g = self.nodes[ci].g;
            let cp = self.point(ci);
            trace!("expand {cp} g={current_g} f={}", current.f);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g + pather.cost(cp, np, &mut self.trail);

                let n = &self.nodes[ni];
                if n.closed && tentative >= n.g {
                    continue;
                }
                if self.preds.parents[ni] == NO_PARENT {
                    self.trail.recorded += 1;
                }

                let f = tentative + pather.estimate(np, goal, &self.trail);
                let n = &mut self.nodes[ni];
                n.g = tentative;
                n.f = f;
                n.open = true;
                self.preds.parents[ni] = ci;

                let entry = self.entry(ni);
                open.push(entry);
            }
        }

        Err(SearchError::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{CostModel, DiversityPather};
    use gridpass_core::CharGrid;

    fn golden_grid() -> CharGrid {
        CharGrid::from_rows(&[
            ['a', 'b', 'c', 'd'],
            ['1', '2', '3', '4'],
            ['A', 'B', 'C', 'D'],
            ['!', '@', '#', '$'],
        ])
        .unwrap()
    }

    fn coords(v: &[(i32, i32)]) -> Vec<Coord> {
        v.iter().map(|&c| Coord::from(c)).collect()
    }

    fn letters(grid: &CharGrid, path: &[Coord]) -> String {
        path.iter().filter_map(|&c| grid.at(c)).collect()
    }

    // The two cost variants reward different occurrences of a class, so the
    // same grid and anchors give different passwords. Both are pinned here.

    #[test]
    fn golden_path_default_model() {
        let g = golden_grid();
        let pather = DiversityPather::new(&g, CostModel::default());
        let route = search(&pather, 4, Coord::new(0, 0), Coord::new(3, 3)).unwrap();
        assert_eq!(
            route.path,
            coords(&[(0, 0), (1, 1), (2, 1), (2, 2), (3, 3)])
        );
        assert_eq!(letters(&g, &route.path), "a2BC$");
    }

    #[test]
    fn golden_path_strict_model() {
        let g = golden_grid();
        let pather = DiversityPather::new(&g, CostModel::strict());
        let route = search(&pather, 4, Coord::new(0, 0), Coord::new(3, 3)).unwrap();
        assert_eq!(
            route.path,
            coords(&[(0, 0), (1, 0), (1, 1), (2, 2), (3, 3)])
        );
        assert_eq!(letters(&g, &route.path), "a12C$");
    }

    #[test]
    fn search_is_repeatable() {
        let g = golden_grid();
        let pather = DiversityPather::new(&g, CostModel::default());
        let a = search(&pather, 4, Coord::new(0, 3), Coord::new(3, 0)).unwrap();
        let b = search(&pather, 4, Coord::new(0, 3), Coord::new(3, 0)).unwrap();
        assert_eq!(a.path, b.path);
        assert_eq!(a.complexity, b.complexity);
    }

    #[test]
    fn start_equals_goal() {
        let g = golden_grid();
        let pather = DiversityPather::new(&g, CostModel::default());
        let route = search(&pather, 4, Coord::new(2, 2), Coord::new(2, 2)).unwrap();
        assert_eq!(route.path, vec![Coord::new(2, 2)]);
        assert_eq!(route.expansions, 0);
    }

    #[test]
    fn out_of_bounds_anchors() {
        let g = golden_grid();
        let pather = DiversityPather::new(&g, CostModel::default());
        let err = search(&pather, 4, Coord::new(0, 4), Coord::new(3, 3)).unwrap_err();
        assert_eq!(err, SearchError::OutOfBounds(Coord::new(0, 4)));
        assert!(!err.is_retryable());
        let err = search(&pather, 4, Coord::new(0, 0), Coord::new(-1, 3)).unwrap_err();
        assert_eq!(err, SearchError::OutOfBounds(Coord::new(-1, 3)));
    }

    #[test]
    fn paths_are_king_walks_between_anchors() {
        let g = golden_grid();
        for model in [CostModel::default(), CostModel::strict()] {
            let pather = DiversityPather::new(&g, model);
            for start in g.coords() {
                for goal in g.coords() {
                    let route = search(&pather, 4, start, goal).unwrap();
                    let path = &route.path;
                    assert_eq!(path.first(), Some(&start));
                    assert_eq!(path.last(), Some(&goal));
                    assert!(path.iter().all(|&c| g.contains(c)));
                    assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
                }
            }
        }
    }

    #[test]
    fn two_by_two() {
        let g = CharGrid::from_rows(&[['a', 'B'], ['3', '%']]).unwrap();
        let pather = DiversityPather::new(&g, CostModel::default());
        let route = search(&pather, 2, Coord::new(0, 0), Coord::new(1, 1)).unwrap();
        assert_eq!(route.path.first(), Some(&Coord::new(0, 0)));
        assert_eq!(route.path.last(), Some(&Coord::new(1, 1)));
        assert!(route.path.len() >= 2);
    }

    #[test]
    fn predecessors_walk_and_loop_detection() {
        let mut preds = Predecessors::new(3);
        assert!(preds.is_empty());
        preds.insert(Coord::new(1, 1), Coord::new(0, 0));
        preds.insert(Coord::new(2, 2), Coord::new(1, 1));
        assert_eq!(preds.len(), 2);
        assert_eq!(preds.get(Coord::new(2, 2)), Some(Coord::new(1, 1)));
        assert_eq!(preds.get(Coord::new(0, 0)), None);
        assert_eq!(
            preds.path_to(Coord::new(2, 2)).unwrap(),
            coords(&[(0, 0), (1, 1), (2, 2)])
        );

        preds.insert(Coord::new(0, 0), Coord::new(2, 2));
        assert_eq!(
            preds.path_to(Coord::new(2, 2)),
            Err(SearchError::BrokenTrail {
                from: Coord::new(2, 2)
            })
        );
    }

    /// Explicit directed edges with fixed costs and a zero estimate.
    struct EdgePather {
        edges: Vec<((i32, i32), (i32, i32), i64)>,
    }

    impl crate::traits::Pather for EdgePather {
        fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>) {
            buf.extend(
                self.edges
                    .iter()
                    .filter(|(from, _, _)| Coord::from(*from) == p)
                    .map(|(_, to, _)| Coord::from(*to)),
            );
        }
    }

    impl ScoredPather for EdgePather {
        fn cost(&self, from: Coord, to: Coord, _trail: &mut Trail) -> i64 {
            self.edges
                .iter()
                .find(|(f, t, _)| Coord::from(*f) == from && Coord::from(*t) == to)
                .map_or(i64::MAX / 4, |&(_, _, c)| c)
        }

        fn estimate(&self, _from: Coord, _goal: Coord, _trail: &Trail) -> i64 {
            0
        }
    }

    const S: (i32, i32) = (0, 0);
    const A: (i32, i32) = (0, 1);
    const C: (i32, i32) = (1, 0);
    const G: (i32, i32) = (2, 2);

    // S expands first, then A (g 1) is closed before C (g 2) offers A again
    // at 2 + `c_to_a`.
    fn reopen_graph(c_to_a: i64) -> EdgePather {
        EdgePather {
            edges: vec![
                (S, A, 1),
                (S, C, 2),
                (A, G, 10),
                (C, A, c_to_a),
                (C, G, 20),
            ],
        }
    }

    #[test]
    fn closed_node_reopens_when_strictly_cheaper() {
        let route = search(&reopen_graph(-5), 3, S.into(), G.into()).unwrap();
        assert_eq!(route.predecessors.get(A.into()), Some(Coord::from(C)));
        assert_eq!(route.path, coords(&[S, C, A, G]));
    }

    #[test]
    fn closed_node_keeps_equal_cost() {
        // 2 - 1 == 1: not cheaper, A stays closed under S.
        let route = search(&reopen_graph(-1), 3, S.into(), G.into()).unwrap();
        assert_eq!(route.predecessors.get(A.into()), Some(Coord::from(S)));
        // G was overwritten by the worse offer through C while open.
        assert_eq!(route.path, coords(&[S, C, G]));
    }

    #[test]
    fn open_node_takes_newest_cost_even_if_worse() {
        let pather = EdgePather {
            edges: vec![(S, A, 1), (S, G, 3), (A, G, 10)],
        };
        let route = search(&pather, 3, S.into(), G.into()).unwrap();
        assert_eq!(route.predecessors.get(G.into()), Some(Coord::from(A)));
        assert_eq!(route.path, coords(&[S, A, G]));
    }

    #[test]
    fn heap_pops_lowest_f_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 0, f: 5, seq: 0 });
        heap.push(NodeRef { idx: 1, f: 3, seq: 1 });
        heap.push(NodeRef { idx: 2, f: 3, seq: 2 });
        heap.push(NodeRef { idx: 3, f: -1, seq: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop()).map(|r| r.idx).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }
}
