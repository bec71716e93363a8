//! Grid storage as comma-separated text.
//!
//! One grid row per line, cells separated by `,`, no header and no quoting.
//! A comma cannot itself be stored as a cell; the built-in symbol pools never
//! contain one.
//!
//! ```text
//! a,b,c
//! 1,2,3
//! A,B,C
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use gridpass_core::{CharGrid, GridError};
use log::debug;

/// Write `grid` to `w`, one line per row.
pub fn write_grid<W: Write>(grid: &CharGrid, mut w: W) -> io::Result<()> {
    let mut line = String::with_capacity(grid.size() * 2);
    for row in grid.rows() {
        line.clear();
        for (i, ch) in row.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            line.push(*ch);
        }
        writeln!(w, "{line}")?;
    }
    Ok(())
}

/// Read a grid written by [`write_grid`].
///
/// Trailing blank lines and `\r\n` line endings are accepted.
pub fn read_grid<R: BufRead>(r: R) -> Result<CharGrid, PersistError> {
    let mut lines: Vec<String> = Vec::new();
    for line in r.lines() {
        let mut line = line?;
        if line.ends_with('\r') {
            line.pop();
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    let mut rows: Vec<Vec<char>> = Vec::with_capacity(lines.len());
    for (n, line) in lines.iter().enumerate() {
        let mut row = Vec::new();
        for (column, field) in line.split(',').enumerate() {
            let mut chars = field.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => row.push(ch),
                _ => {
                    return Err(PersistError::Cell {
                        line: n + 1,
                        column: column + 1,
                        field: field.to_string(),
                    });
                }
            }
        }
        rows.push(row);
    }

    Ok(CharGrid::from_rows(&rows)?)
}

/// Save `grid` to the file at `path`, replacing it.
pub fn save(grid: &CharGrid, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();
    let mut w = BufWriter::new(File::create(path)?);
    write_grid(grid, &mut w)?;
    w.flush()?;
    debug!("saved {}x{} grid to {}", grid.size(), grid.size(), path.display());
    Ok(())
}

/// Load a grid from the file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<CharGrid, PersistError> {
    let path = path.as_ref();
    let grid = read_grid(BufReader::new(File::open(path)?))?;
    debug!("loaded {}x{} grid from {}", grid.size(), grid.size(), path.display());
    Ok(grid)
}

/// Errors while storing or loading a grid.
#[derive(Debug)]
pub enum PersistError {
    /// The underlying file operation failed.
    Io(io::Error),
    /// A field is not exactly one character. Lines and columns are 1-based.
    Cell {
        line: usize,
        column: usize,
        field: String,
    },
    /// The rows do not form a square grid.
    Shape(GridError),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::Cell {
                line,
                column,
                field,
            } => write!(
                f,
                "line {line}, column {column}: expected one character, found {field:?}"
            ),
            Self::Shape(e) => write!(f, "malformed grid: {e}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Shape(e) => Some(e),
            Self::Cell { .. } => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<GridError> for PersistError {
    fn from(e: GridError) -> Self {
        Self::Shape(e)
    }
}
