//! Random grid construction with neighbour repair.
//!
//! A grid is filled by independent draws from a symbol pool, then every cell
//! is checked against its eight neighbours. A neighbour that repeats the
//! cell's character is redrawn until it differs, and the redrawn neighbour is
//! checked in turn before the scan moves on. The cascade is driven by an
//! explicit stack so deep chains of repairs cannot exhaust the call stack.

use std::fmt;

use gridpass_core::charset::distinct_count;
use gridpass_core::{CharGrid, ConfigError, Coord, config};
use log::{debug, trace};
use rand::Rng;

/// Distinct symbols needed for a repairable grid: every 2×2 block is four
/// mutually adjacent cells.
pub const MIN_DISTINCT_SYMBOLS: usize = 4;

/// Default redraw allowance per cell.
pub const REDRAWS_PER_CELL: usize = 1000;

/// Grid builder operating on a caller-supplied random source.
pub struct GridBuilder<R: Rng> {
    pub rng: R,
    redraws_per_cell: usize,
}

impl<R: Rng> GridBuilder<R> {
    /// Create a builder drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            redraws_per_cell: REDRAWS_PER_CELL,
        }
    }

    /// Override the redraw allowance per cell.
    pub fn with_redraws_per_cell(mut self, redraws: usize) -> Self {
        self.redraws_per_cell = redraws;
        self
    }

    /// Build a `size`×`size` grid from `pool` in which no cell repeats any
    /// of its neighbours.
    pub fn build(&mut self, size: usize, pool: &[char]) -> Result<CharGrid, BuildError> {
        config::check_size(size)?;
        if pool.is_empty() {
            return Err(ConfigError::EmptyPool.into());
        }
        let distinct = distinct_count(pool);
        if distinct < MIN_DISTINCT_SYMBOLS {
            return Err(BuildError::Unsatisfiable {
                distinct,
                required: MIN_DISTINCT_SYMBOLS,
            });
        }

        let mut grid = self.fill(size, pool);
        let redraws = self.repair(&mut grid, pool)?;
        debug!("built {size}x{size} grid from {distinct} symbols, {redraws} redraws");
        Ok(grid)
    }

    /// Fill a grid with independent draws from `pool`, without repair.
    ///
    /// `pool` must not be empty.
    pub fn fill(&mut self, size: usize, pool: &[char]) -> CharGrid {
        let mut grid = CharGrid::new(size, ' ');
        for c in grid.coords().collect::<Vec<_>>() {
            let ch = self.draw(pool);
            grid.set(c, ch);
        }
        grid
    }

    /// Repair duplicate neighbours in place. Returns the number of redraws.
    ///
    /// Cells are scanned row-major. Each conflict is resolved depth-first:
    /// the redrawn neighbour's own neighbourhood is settled before the scan
    /// resumes where it left off.
    pub fn repair(&mut self, grid: &mut CharGrid, pool: &[char]) -> Result<usize, BuildError> {
        let budget = self
            .redraws_per_cell
            .saturating_mul(grid.size() * grid.size());
        let mut redraws = 0usize;
        // Frames: (cell, index of the next neighbour to examine).
        let mut stack: Vec<(Coord, usize)> = Vec::new();

        for origin in grid.coords().collect::<Vec<_>>() {
            stack.push((origin, 0));
            'frames: while let Some((cell, next)) = stack.pop() {
                let Some(ch) = grid.at(cell) else {
                    continue;
                };
                let around = cell.neighbors_8();
                for (k, &n) in around.iter().enumerate().skip(next) {
                    if grid.at(n) != Some(ch) {
                        continue;
                    }
                    trace!("repair {n}: repeats {ch:?} of {cell}");
                    self.redraw_until_different(grid, n, ch, pool, &mut redraws, budget)?;
                    stack.push((cell, k + 1));
                    stack.push((n, 0));
                    continue 'frames;
                }
            }
        }
        Ok(redraws)
    }

    fn redraw_until_different(
        &mut self,
        grid: &mut CharGrid,
        at: Coord,
        avoid: char,
        pool: &[char],
        redraws: &mut usize,
        budget: usize,
    ) -> Result<(), BuildError> {
        loop {
            *redraws += 1;
            if *redraws > budget {
                return Err(BuildError::RedrawBudgetExhausted { redraws: budget });
            }
            let ch = self.draw(pool);
            grid.set(at, ch);
            if ch != avoid {
                return Ok(());
            }
        }
    }

    #[inline]
    fn draw(&mut self, pool: &[char]) -> char {
        pool[self.rng.random_range(0..pool.len())]
    }
}

/// Why a grid could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Size or pool rejected up front.
    Config(ConfigError),
    /// The pool cannot satisfy the no-repeat constraint.
    Unsatisfiable { distinct: usize, required: usize },
    /// Repair kept finding conflicts past the redraw allowance.
    RedrawBudgetExhausted { redraws: usize },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid grid config: {e}"),
            Self::Unsatisfiable { distinct, required } => write!(
                f,
                "symbol pool has {distinct} distinct characters, need at least {required}"
            ),
            Self::RedrawBudgetExhausted { redraws } => {
                write!(f, "neighbour repair did not settle within {redraws} redraws")
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for BuildError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
