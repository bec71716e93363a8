//! [`CharGrid`]: a square matrix of single characters.

use std::fmt;

use crate::geom::Coord;

/// A square N×N grid of characters stored row-major.
///
/// Grids are built once and then only read; the builder is the one place
/// that calls [`set`](CharGrid::set).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<char>>", into = "Vec<Vec<char>>")
)]
pub struct CharGrid {
    cells: Vec<char>,
    size: usize,
}

impl CharGrid {
    /// Create a `size`×`size` grid with every cell set to `fill`.
    pub fn new(size: usize, fill: char) -> Self {
        Self {
            cells: vec![fill; size * size],
            size,
        }
    }

    /// Build a grid from rows. Every row must be as long as there are rows.
    pub fn from_rows<R: AsRef<[char]>>(rows: &[R]) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(size * size);
        let expected = rows[0].as_ref().len();
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != expected {
                return Err(GridError::RaggedRow {
                    row,
                    expected,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
        }
        if expected != size {
            return Err(GridError::NotSquare {
                rows: size,
                cols: expected,
            });
        }
        Ok(Self { cells, size })
    }

    /// Side length N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.index(c).is_some()
    }

    /// Flat index of `c`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, c: Coord) -> Option<usize> {
        let (Ok(row), Ok(col)) = (usize::try_from(c.row), usize::try_from(c.col)) else {
            return None;
        };
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    /// Coordinate of a flat index.
    #[inline]
    pub fn coord(&self, idx: usize) -> Coord {
        Coord::new((idx / self.size) as i32, (idx % self.size) as i32)
    }

    /// Character at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Coord) -> Option<char> {
        self.index(c).map(|i| self.cells[i])
    }

    /// Overwrite the character at `c`. No-op when out of bounds.
    pub fn set(&mut self, c: Coord, ch: char) {
        if let Some(i) = self.index(c) {
            self.cells[i] = ch;
        }
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.cells.len()).map(|i| self.coord(i))
    }

    /// Row-major iterator over `(Coord, char)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &ch)| (self.coord(i), ch))
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.size.max(1))
    }

    /// In-bounds king-move neighbours of `c`, row-major.
    pub fn neighbors(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        c.neighbors_8().into_iter().filter(|&n| self.contains(n))
    }

    /// Pairs of adjacent cells holding the same character. Each pair is
    /// reported once, lower coordinate first.
    pub fn conflicts(&self) -> Vec<(Coord, Coord)> {
        let mut out = Vec::new();
        for (c, ch) in self.iter() {
            for n in self.neighbors(c) {
                if n > c && self.at(n) == Some(ch) {
                    out.push((c, n));
                }
            }
        }
        out
    }
}

impl TryFrom<Vec<Vec<char>>> for CharGrid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<char>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<CharGrid> for Vec<Vec<char>> {
    fn from(grid: CharGrid) -> Self {
        grid.rows().map(<[char]>::to_vec).collect()
    }
}

/// A rows-of-characters shape that does not form a square grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows at all.
    Empty,
    /// A row whose length differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Rows are consistent but their length differs from the row count.
    NotSquare { rows: usize, cols: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid has no rows"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid row {row} has {found} cells, expected {expected}"
            ),
            Self::NotSquare { rows, cols } => {
                write!(f, "grid is not square: {rows} rows of {cols} cells")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CharGrid {
        CharGrid::from_rows(&[['a', 'b', 'c'], ['1', '2', '3'], ['A', 'B', 'C']]).unwrap()
    }

    #[test]
    fn from_rows_and_at() {
        let g = sample();
        assert_eq!(g.size(), 3);
        assert_eq!(g.at(Coord::new(0, 0)), Some('a'));
        assert_eq!(g.at(Coord::new(1, 2)), Some('3'));
        assert_eq!(g.at(Coord::new(2, 1)), Some('B'));
        assert_eq!(g.at(Coord::new(3, 0)), None);
        assert_eq!(g.at(Coord::new(0, -1)), None);
    }

    #[test]
    fn index_round_trip() {
        let g = CharGrid::new(5, '.');
        for c in g.coords() {
            let i = g.index(c).unwrap();
            assert_eq!(g.coord(i), c);
        }
        assert_eq!(g.coords().count(), 25);
    }

    #[test]
    fn set_in_and_out_of_bounds() {
        let mut g = CharGrid::new(2, '.');
        g.set(Coord::new(1, 0), 'x');
        g.set(Coord::new(5, 5), 'y');
        assert_eq!(g.at(Coord::new(1, 0)), Some('x'));
        assert_eq!(g.iter().filter(|&(_, ch)| ch == 'y').count(), 0);
    }

    #[test]
    fn shape_errors() {
        let empty: [[char; 0]; 0] = [];
        assert_eq!(CharGrid::from_rows(&empty), Err(GridError::Empty));
        let ragged: Vec<Vec<char>> = vec![vec!['a', 'b'], vec!['c']];
        assert_eq!(
            CharGrid::from_rows(&ragged),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            CharGrid::from_rows(&[['a', 'b', 'c'], ['d', 'e', 'f']]),
            Err(GridError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn neighbors_clip_at_edges() {
        let g = sample();
        assert_eq!(g.neighbors(Coord::new(0, 0)).count(), 3);
        assert_eq!(g.neighbors(Coord::new(0, 1)).count(), 5);
        assert_eq!(g.neighbors(Coord::new(1, 1)).count(), 8);
    }

    #[test]
    fn conflicts_found_once() {
        assert!(sample().conflicts().is_empty());
        let g = CharGrid::from_rows(&[['a', 'b'], ['c', 'a']]).unwrap();
        assert_eq!(g.conflicts(), vec![(Coord::new(0, 0), Coord::new(1, 1))]);
    }

    #[test]
    fn rows_round_trip() {
        let g = sample();
        let rows: Vec<Vec<char>> = g.clone().into();
        assert_eq!(rows[1], vec!['1', '2', '3']);
        assert_eq!(CharGrid::try_from(rows), Ok(g));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serializes_as_rows() {
        let g = CharGrid::from_rows(&[['a', 'b'], ['c', 'd']]).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"[["a","b"],["c","d"]]"#);
        let back: CharGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn rejects_ragged_rows() {
        let res: Result<CharGrid, _> = serde_json::from_str(r#"[["a","b"],["c"]]"#);
        assert!(res.is_err());
    }
}
