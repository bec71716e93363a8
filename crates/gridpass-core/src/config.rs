//! Generation settings and their validation.

use std::fmt;

use crate::charset::SymbolSet;

/// Smallest grid side that can host two separated anchors.
pub const MIN_SIZE: usize = 2;

/// What to generate: grid side length and which alphabets to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub size: usize,
    pub symbols: SymbolSet,
}

impl GridConfig {
    /// Create a config.
    pub const fn new(size: usize, symbols: SymbolSet) -> Self {
        Self { size, symbols }
    }

    /// Check the config before any grid work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_size(self.size)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(8, SymbolSet::All)
    }
}

/// Reject sizes below [`MIN_SIZE`].
pub fn check_size(size: usize) -> Result<(), ConfigError> {
    if size < MIN_SIZE {
        return Err(ConfigError::SizeTooSmall { size });
    }
    Ok(())
}

/// Invalid generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid side below [`MIN_SIZE`].
    SizeTooSmall { size: usize },
    /// No characters to fill the grid with.
    EmptyPool,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeTooSmall { size } => {
                write!(f, "grid size {size} is too small, need at least {MIN_SIZE}")
            }
            Self::EmptyPool => write!(f, "symbol pool is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn round_trip() {
        let cfg = GridConfig::new(6, SymbolSet::NoSpecial);
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"size":6,"symbols":"no_special"}"#);
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
