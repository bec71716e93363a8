//! **gridpass-core** — shared types for password-grid generation.
//!
//! This crate provides the foundational types used across the *gridpass*
//! workspace: cell coordinates, the square character grid, the character
//! classes a password is scored against, generation settings, and a
//! box-drawn text rendering of grids.

pub mod charset;
pub mod config;
pub mod geom;
pub mod grid;
pub mod render;

pub use charset::{CharClass, SymbolSet};
pub use config::{ConfigError, GridConfig, MIN_SIZE};
pub use geom::Coord;
pub use grid::{CharGrid, GridError};
pub use render::{RenderOptions, render};
