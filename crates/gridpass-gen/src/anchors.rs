//! Start and goal selection on the grid perimeter.

use std::fmt;

use gridpass_core::{ConfigError, Coord, config};
use log::{debug, trace};
use rand::Rng;

/// One side of the grid's outer edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// All four sides.
    pub const ALL: [Side; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// The cell `offset` steps along this side of a `size`×`size` grid.
    pub fn coord(self, size: usize, offset: usize) -> Coord {
        let last = size.saturating_sub(1) as i32;
        let offset = offset as i32;
        match self {
            Self::Top => Coord::new(0, offset),
            Self::Bottom => Coord::new(last, offset),
            Self::Left => Coord::new(offset, 0),
            Self::Right => Coord::new(offset, last),
        }
    }

    /// Whether `c` lies on this side of a `size`×`size` grid.
    pub fn contains(self, size: usize, c: Coord) -> bool {
        let last = size as i32 - 1;
        let along = |v: i32| (0..=last).contains(&v);
        match self {
            Self::Top => c.row == 0 && along(c.col),
            Self::Bottom => c.row == last && along(c.col),
            Self::Left => c.col == 0 && along(c.row),
            Self::Right => c.col == last && along(c.row),
        }
    }

    fn random_coord<R: Rng + ?Sized>(self, size: usize, rng: &mut R) -> Coord {
        self.coord(size, rng.random_range(0..size))
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Start and goal of a password path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorPair {
    pub start: Coord,
    pub goal: Coord,
    pub start_side: Side,
    pub goal_side: Side,
}

impl AnchorPair {
    /// Whether the anchors are strictly farther apart than half the grid
    /// side.
    pub fn is_separated(&self, size: usize) -> bool {
        far_enough(self.start, self.goal, size)
    }
}

impl fmt::Display for AnchorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "start {} ({}), goal {} ({})",
            self.start, self.start_side, self.goal, self.goal_side
        )
    }
}

/// distance(a, b) > size / 2, compared exactly as 4·d² > size².
fn far_enough(a: Coord, b: Coord, size: usize) -> bool {
    let size = size as i64;
    4 * a.distance_sq(b) > size * size
}

/// Pick a start and a goal on two different sides of a `size`×`size` grid,
/// farther apart than half the side.
///
/// The start side and position are drawn once. The goal is redrawn, side
/// and position, from the remaining three sides until it is far enough.
pub fn select_anchors<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<AnchorPair, ConfigError> {
    config::check_size(size)?;

    let mut sides = Side::ALL.to_vec();
    let start_side = sides.remove(rng.random_range(0..sides.len()));
    let start = start_side.random_coord(size, rng);

    let mut goal_side = sides[rng.random_range(0..sides.len())];
    let mut goal = goal_side.random_coord(size, rng);
    while !far_enough(start, goal, size) {
        trace!("goal {goal} too close to start {start}, redrawing");
        goal_side = sides[rng.random_range(0..sides.len())];
        goal = goal_side.random_coord(size, rng);
    }

    let pair = AnchorPair {
        start,
        goal,
        start_side,
        goal_side,
    };
    debug!("anchors: {pair}");
    Ok(pair)
}
