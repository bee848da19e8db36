//! Projection of the screen grid into styled text
//!
//! The renderer never mutates the buffer; it reads the grid and produces
//! attributed runs plus a flat cursor offset for hosts that place a text
//! cursor in a flattened representation.
//!
//! Full-grid policy: every row renders as exactly `cols` characters and rows
//! are joined by `\n`, so the cursor offset is `row * (cols + 1) + col` (in
//! chars). [`content_string`] trims trailing blanks for logs and tests and
//! is deliberately not paired with the offset computation.

use crate::screen::{ScreenBuffer, TextStyle};

/// A maximal run of adjacent cells sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: TextStyle,
}

/// One rendered row as a sequence of styled runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub runs: Vec<StyledRun>,
}

impl StyledLine {
    /// The row's text with styling stripped.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Render the visible grid as styled runs, one line per row.
///
/// Adjacent cells with identical attributes merge into a single run, so a
/// plain line is one run and a fully styled line stays bounded by the number
/// of attribute changes.
pub fn styled_lines(screen: &ScreenBuffer) -> Vec<StyledLine> {
    screen
        .lines()
        .iter()
        .map(|row| {
            let mut line = StyledLine::default();
            for cell in row {
                match line.runs.last_mut() {
                    Some(run) if run.style == cell.style => run.text.push(cell.c),
                    _ => line.runs.push(StyledRun {
                        text: cell.c.to_string(),
                        style: cell.style,
                    }),
                }
            }
            line
        })
        .collect()
}

/// The full-grid flat text: each row exactly `cols` chars, newline-joined.
pub fn full_text(screen: &ScreenBuffer) -> String {
    let mut out = String::with_capacity(screen.rows() * (screen.cols() + 1));
    for (i, row) in screen.lines().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.extend(row.iter().map(|cell| cell.c));
    }
    out
}

/// Flat char offset of the cursor within [`full_text`].
pub fn cursor_offset(screen: &ScreenBuffer) -> usize {
    let (row, col) = screen.cursor();
    row * (screen.cols() + 1) + col
}

/// The grid with trailing blanks trimmed from each row. For logs and
/// assertions only; offsets into this string are not meaningful.
pub fn content_string(screen: &ScreenBuffer) -> String {
    screen
        .lines()
        .iter()
        .map(|row| {
            let text: String = row.iter().map(|cell| cell.c).collect();
            text.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
