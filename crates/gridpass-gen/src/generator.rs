//! End-to-end password generation.

use std::fmt;

use gridpass_core::{CharGrid, ConfigError, Coord, GridConfig, SymbolSet, config};
use gridpass_paths::{CostModel, DiversityPather, SearchError, search};
use log::{debug, warn};
use rand::Rng;
use rand::rngs::ThreadRng;

use crate::anchors::{AnchorPair, select_anchors};
use crate::builder::{BuildError, GridBuilder, REDRAWS_PER_CELL};
use crate::password::{Password, assemble};

/// Anchor pairs tried before a retryable search failure is reported.
pub const ANCHOR_ATTEMPTS: usize = 3;

/// A password derived from a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Derivation {
    pub anchors: AnchorPair,
    pub path: Vec<Coord>,
    pub password: Password,
}

/// A fresh grid and the password derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generated {
    pub grid: CharGrid,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub derivation: Derivation,
}

/// Generates grids and passwords from a random source.
pub struct Generator<R: Rng> {
    pub rng: R,
    model: CostModel,
    anchor_attempts: usize,
    redraws_per_cell: usize,
}

impl Generator<ThreadRng> {
    /// Generator backed by the thread-local random source.
    pub fn from_thread_rng() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> Generator<R> {
    /// Create a generator with the default cost model.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            model: CostModel::default(),
            anchor_attempts: ANCHOR_ATTEMPTS,
            redraws_per_cell: REDRAWS_PER_CELL,
        }
    }

    /// Use `model` for path scoring.
    pub fn with_cost_model(mut self, model: CostModel) -> Self {
        self.model = model;
        self
    }

    /// Anchor pairs to try per derivation (at least one).
    pub fn with_anchor_attempts(mut self, attempts: usize) -> Self {
        self.anchor_attempts = attempts.max(1);
        self
    }

    /// Redraw allowance per cell during grid repair.
    pub fn with_redraws_per_cell(mut self, redraws: usize) -> Self {
        self.redraws_per_cell = redraws;
        self
    }

    /// The cost model in use.
    pub fn cost_model(&self) -> CostModel {
        self.model
    }

    /// Build a new grid per `config` and derive a password from it.
    pub fn generate_new(&mut self, config: &GridConfig) -> Result<Generated, GenerateError> {
        config.validate()?;
        let pool = config.symbols.pool();
        let grid = GridBuilder::new(&mut self.rng)
            .with_redraws_per_cell(self.redraws_per_cell)
            .build(config.size, &pool)?;
        let derivation = self.generate_from_existing(&grid)?;
        Ok(Generated { grid, derivation })
    }

    /// Derive a new password from an existing grid.
    ///
    /// Anchors are re-rolled when the search fails in a retryable way.
    pub fn generate_from_existing(&mut self, grid: &CharGrid) -> Result<Derivation, GenerateError> {
        let size = grid.size();
        config::check_size(size)?;
        let pather = DiversityPather::new(grid, self.model);

        let mut last = SearchError::Exhausted;
        for attempt in 1..=self.anchor_attempts {
            let anchors = select_anchors(size, &mut self.rng)?;
            match search(&pather, size, anchors.start, anchors.goal) {
                Ok(route) => {
                    let password = assemble(&route.predecessors, anchors.goal, grid)?;
                    debug!(
                        "derived {}-character password on attempt {attempt}",
                        password.len()
                    );
                    return Ok(Derivation {
                        anchors,
                        path: route.path,
                        password,
                    });
                }
                Err(e) if e.is_retryable() => {
                    warn!("search from {anchors} failed: {e}; re-rolling anchors");
                    last = e;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(last.into())
    }
}

/// Generate a grid of `size` from `symbols` and a password, using the
/// thread-local random source.
pub fn generate_new(size: usize, symbols: SymbolSet) -> Result<Generated, GenerateError> {
    Generator::from_thread_rng().generate_new(&GridConfig::new(size, symbols))
}

/// Derive a password from `grid` using the thread-local random source.
pub fn generate_from_existing(grid: &CharGrid) -> Result<Derivation, GenerateError> {
    Generator::from_thread_rng().generate_from_existing(grid)
}

/// Why generation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    Config(ConfigError),
    Build(BuildError),
    Search(SearchError),
}

impl GenerateError {
    /// Whether trying again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Config(_) => false,
            Self::Build(e) => matches!(e, BuildError::RedrawBudgetExhausted { .. }),
            Self::Search(e) => e.is_retryable(),
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Build(e) => write!(f, "grid construction failed: {e}"),
            Self::Search(e) => write!(f, "no password path: {e}"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Build(e) => Some(e),
            Self::Search(e) => Some(e),
        }
    }
}

impl From<ConfigError> for GenerateError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<BuildError> for GenerateError {
    fn from(e: BuildError) -> Self {
        match e {
            BuildError::Config(c) => Self::Config(c),
            other => Self::Build(other),
        }
    }
}

impl From<SearchError> for GenerateError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_round_trip() {
        let out = Generator::new(StdRng::seed_from_u64(1))
            .generate_new(&GridConfig::new(4, SymbolSet::All))
            .unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("grid").is_some());
        assert!(json.get("anchors").is_some());
        assert_eq!(
            json["password"].as_str(),
            Some(out.derivation.password.as_str())
        );
        let back: Generated = serde_json::from_value(json).unwrap();
        assert_eq!(back, out);
    }
}
