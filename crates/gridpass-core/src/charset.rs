//! Character classes and the symbol pools grids are filled from.

/// Lowercase ASCII letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
/// Uppercase ASCII letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Decimal digits.
pub const DIGITS: &str = "0123456789";
/// Punctuation symbols. The comma is left out because it separates cells in
/// stored grids.
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{};:<>./?\\|";

/// The class a password character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CharClass {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharClass {
    /// Every class, in counter-slot order.
    pub const ALL: [CharClass; 4] = [Self::Lower, Self::Upper, Self::Digit, Self::Symbol];

    /// Classify `ch`. Characters outside the four alphabets have no class.
    pub fn of(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.alphabet().contains(ch))
    }

    /// Slot of this class in a four-slot counter array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The alphabet backing this class.
    pub const fn alphabet(self) -> &'static str {
        match self {
            Self::Lower => LOWERCASE,
            Self::Upper => UPPERCASE,
            Self::Digit => DIGITS,
            Self::Symbol => SYMBOLS,
        }
    }
}

/// Which alphabets go into the fill pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SymbolSet {
    /// Letters, digits and punctuation.
    #[default]
    All,
    /// Letters and digits only.
    NoSpecial,
}

impl SymbolSet {
    /// The classes this set draws from.
    pub fn classes(self) -> &'static [CharClass] {
        match self {
            Self::All => &CharClass::ALL,
            Self::NoSpecial => &CharClass::ALL[..3],
        }
    }

    /// Build the combined pool of characters.
    pub fn pool(self) -> Vec<char> {
        self.classes()
            .iter()
            .flat_map(|class| class.alphabet().chars())
            .collect()
    }
}

/// Number of distinct characters in `pool`.
pub fn distinct_count(pool: &[char]) -> usize {
    let mut seen: Vec<char> = pool.to_vec();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}
