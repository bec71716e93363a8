//! Per-search mutable state the cost function reads and writes.

use gridpass_core::CharClass;

/// Tally of how many explored edges landed on each character class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complexity {
    counts: [u32; 4],
}

impl Complexity {
    /// How many times `class` was recorded.
    #[inline]
    pub fn count(&self, class: CharClass) -> u32 {
        self.counts[class.index()]
    }

    /// Bump the counter of `class`.
    #[inline]
    pub fn record(&mut self, class: CharClass) {
        self.counts[class.index()] += 1;
    }

    /// Number of classes recorded at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Raw counters in [`CharClass::ALL`] order.
    pub fn counts(&self) -> [u32; 4] {
        self.counts
    }
}

/// Search history visible to a [`ScoredPather`](crate::ScoredPather).
///
/// One `Trail` belongs to exactly one search run; it is created with the run
/// and dropped with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trail {
    pub(crate) recorded: usize,
    pub(crate) complexity: Complexity,
}

impl Trail {
    /// A fresh trail, as seen before the first expansion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct nodes that have been given a predecessor so far.
    #[inline]
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Class counters accumulated so far.
    #[inline]
    pub fn complexity(&self) -> &Complexity {
        &self.complexity
    }

    /// Mutable access to the class counters.
    #[inline]
    pub fn complexity_mut(&mut self) -> &mut Complexity {
        &mut self.complexity
    }
}
