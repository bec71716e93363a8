//! Password-grid generation: grid construction, anchor selection, password
//! assembly and grid persistence.
//!
//! The pipeline runs leaf-first:
//!
//! 1. [`GridBuilder`] fills an N×N grid from a [`SymbolSet`](gridpass_core::SymbolSet)
//!    pool and repairs repeated neighbours.
//! 2. [`select_anchors`] picks a start and a goal on two sides of the
//!    perimeter.
//! 3. [`gridpass_paths::search`] finds a class-diverse path between them.
//! 4. [`assemble`] reads the password off the path.
//!
//! [`Generator`] chains these steps; [`persist`] stores grids so a new
//! password can later be derived from the same grid.

pub mod anchors;
pub mod builder;
pub mod generator;
pub mod password;
pub mod persist;

pub use anchors::{AnchorPair, Side, select_anchors};
pub use builder::{BuildError, GridBuilder, MIN_DISTINCT_SYMBOLS};
pub use generator::{
    Derivation, GenerateError, Generated, Generator, generate_from_existing, generate_new,
};
pub use password::{Password, assemble};
pub use persist::{PersistError, load, read_grid, save, write_grid};
