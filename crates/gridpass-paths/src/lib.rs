//! Diversity-biased path search over password grids.
//!
//! The search is structurally A*, with two departures:
//!
//! - **History-dependent costs.** [`DiversityPather`] keeps per-class
//!   counters in the search's [`Trail`] and discounts edges into character
//!   classes by how often they were seen, so the cost of an edge depends on
//!   the order of exploration.
//! - **Inadmissible heuristic.** The estimate is the Euclidean distance to
//!   the goal minus one per class seen so far.
//!
//! The result is a plausible, class-diverse path rather than a provably
//! shortest one.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`ScoredPather`] : [`Pather`] | edge cost and heuristic over a [`Trail`] |

mod cost;
mod distance;
mod search;
mod trail;
mod traits;

pub use cost::{CostModel, DiversityPather, turn_exempt};
pub use distance::{SCALE, euclidean_centi};
pub use search::{Predecessors, Route, SearchError, search};
pub use trail::{Complexity, Trail};
pub use traits::{Pather, ScoredPather};
