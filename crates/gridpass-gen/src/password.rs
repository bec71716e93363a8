//! Turning a found path into the password text.

use std::fmt;

use gridpass_core::{CharClass, CharGrid, Coord};
use gridpass_paths::{Predecessors, SearchError};

/// The characters read along a path, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Password(String);

impl Password {
    /// Read the grid characters at each coordinate of `path`.
    ///
    /// Coordinates outside the grid are skipped.
    pub fn from_path(path: &[Coord], grid: &CharGrid) -> Self {
        Self(path.iter().filter_map(|&c| grid.at(c)).collect())
    }

    /// The password text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the password is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Character classes present, in [`CharClass::ALL`] order.
    pub fn classes(&self) -> Vec<CharClass> {
        CharClass::ALL
            .into_iter()
            .filter(|class| self.0.chars().any(|ch| CharClass::of(ch) == Some(*class)))
            .collect()
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Password> for String {
    fn from(p: Password) -> Self {
        p.0
    }
}

/// Rebuild the password ending at `goal` from a search's came-from map.
pub fn assemble(
    predecessors: &Predecessors,
    goal: Coord,
    grid: &CharGrid,
) -> Result<Password, SearchError> {
    let path = predecessors.path_to(goal)?;
    Ok(Password::from_path(&path, grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpass_paths::{CostModel, DiversityPather, search};

    fn grid() -> CharGrid {
        CharGrid::from_rows(&[
            ['a', 'b', 'c', 'd'],
            ['1', '2', '3', '4'],
            ['A', 'B', 'C', 'D'],
            ['!', '@', '#', '$'],
        ])
        .unwrap()
    }

    #[test]
    fn assemble_from_predecessors() {
        let g = grid();
        let mut preds = Predecessors::new(4);
        preds.insert(Coord::new(1, 1), Coord::new(0, 0));
        preds.insert(Coord::new(2, 2), Coord::new(1, 1));
        preds.insert(Coord::new(3, 3), Coord::new(2, 2));
        let pw = assemble(&preds, Coord::new(3, 3), &g).unwrap();
        assert_eq!(pw.as_str(), "a2C$");
        assert_eq!(pw.len(), 4);
        assert_eq!(pw.classes(), CharClass::ALL.to_vec());
    }

    #[test]
    fn assemble_matches_search_route() {
        let g = grid();
        let pather = DiversityPather::new(&g, CostModel::default());
        let route = search(&pather, 4, Coord::new(0, 0), Coord::new(3, 3)).unwrap();
        let pw = assemble(&route.predecessors, Coord::new(3, 3), &g).unwrap();
        assert_eq!(pw.to_string(), "a2BC$");
        for (i, ch) in pw.as_str().chars().enumerate() {
            assert_eq!(g.at(route.path[i]), Some(ch));
        }
    }

    #[test]
    fn goal_without_predecessor_is_single_char() {
        let pw = assemble(&Predecessors::new(4), Coord::new(2, 0), &grid()).unwrap();
        assert_eq!(pw.as_str(), "A");
        assert_eq!(pw.classes(), vec![CharClass::Upper]);
    }

    #[test]
    fn looping_links_are_an_error() {
        let mut preds = Predecessors::new(4);
        preds.insert(Coord::new(1, 1), Coord::new(0, 0));
        preds.insert(Coord::new(0, 0), Coord::new(1, 1));
        assert!(matches!(
            assemble(&preds, Coord::new(1, 1), &grid()),
            Err(SearchError::BrokenTrail { .. })
        ));
    }
}
