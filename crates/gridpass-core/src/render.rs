//! Box-drawn text rendering of a [`CharGrid`].

use std::fmt;

use crate::grid::CharGrid;

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Print row and column indices around the box.
    pub headers: bool,
}

impl RenderOptions {
    /// Options with index headers turned on.
    pub const fn with_headers() -> Self {
        Self { headers: true }
    }
}

// Box-drawing pieces: corners, tees, cross and the two straight lines.
const H: char = '\u{2500}';
const V: char = '\u{2502}';

struct Rule {
    left: char,
    mid: char,
    right: char,
}

const TOP: Rule = Rule {
    left: '\u{250c}',
    mid: '\u{252c}',
    right: '\u{2510}',
};
const INNER: Rule = Rule {
    left: '\u{251c}',
    mid: '\u{253c}',
    right: '\u{2524}',
};
const BOTTOM: Rule = Rule {
    left: '\u{2514}',
    mid: '\u{2534}',
    right: '\u{2518}',
};

/// Render `grid` as a box-drawn table, one line per text row.
pub fn render(grid: &CharGrid, opts: RenderOptions) -> String {
    Rendered { grid, opts }.to_string()
}

/// A grid paired with its rendering options.
struct Rendered<'a> {
    grid: &'a CharGrid,
    opts: RenderOptions,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self.grid, self.opts)
    }
}

fn write_grid(out: &mut impl fmt::Write, grid: &CharGrid, opts: RenderOptions) -> fmt::Result {
    let n = grid.size();
    if n == 0 {
        return Ok(());
    }
    let label_width = if opts.headers {
        (n - 1).to_string().len()
    } else {
        0
    };
    let margin = if opts.headers {
        " ".repeat(label_width + 1)
    } else {
        String::new()
    };

    if opts.headers {
        let mut line = format!("{margin} ");
        for col in 0..n {
            if col > 0 {
                line.push(' ');
            }
            line.push_str(&format!("{col:^3}"));
        }
        writeln!(out, "{}", line.trim_end())?;
    }

    write_rule(out, &margin, n, &TOP)?;
    for (row, cells) in grid.rows().enumerate() {
        if row > 0 {
            write_rule(out, &margin, n, &INNER)?;
        }
        if opts.headers {
            write!(out, "{row:>label_width$} ")?;
        }
        write!(out, "{V}")?;
        for ch in cells {
            write!(out, " {ch} {V}")?;
        }
        writeln!(out)?;
    }
    write_rule(out, &margin, n, &BOTTOM)
}

fn write_rule(out: &mut impl fmt::Write, margin: &str, n: usize, rule: &Rule) -> fmt::Result {
    write!(out, "{margin}{}", rule.left)?;
    for col in 0..n {
        if col > 0 {
            write!(out, "{}", rule.mid)?;
        }
        write!(out, "{H}{H}{H}")?;
    }
    writeln!(out, "{}", rule.right)
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self, RenderOptions::default())
    }
}
