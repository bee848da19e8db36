//! Terminal screen buffer: cell grid, cursor, scroll region, and erase ops
//!
//! [`ScreenBuffer`] owns the visible `rows x cols` grid plus a bounded
//! scrollback of rows that scrolled off the top. It exposes named grid
//! operations (write, cursor movement, erase, insert/delete) and is mutated
//! only through them; escape-sequence dispatch lives in [`crate::emulator`]
//! and rendering in [`crate::render`].

use std::cmp::{max, min};
use std::collections::VecDeque;

use tracing::debug;
use unicode_width::UnicodeWidthChar;

use crate::color::Color;

/// Default scrollback line limit.
pub const DEFAULT_SCROLLBACK: usize = 10_000;

/// Default grid size when none is configured.
pub const DEFAULT_ROWS: usize = 24;
pub const DEFAULT_COLS: usize = 80;

/// Tab stops every 8 columns.
const TAB_WIDTH: usize = 8;

/// Graphic attributes applied to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

/// One character position in the grid.
///
/// Always holds a valid character (blank cells hold a space) and valid
/// colors ([`Color::Default`] stands in for the terminal defaults).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub c: char,
    pub style: TextStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            c: ' ',
            style: TextStyle::default(),
        }
    }
}

impl Cell {
    pub fn new(c: char, style: TextStyle) -> Self {
        Self { c, style }
    }

    /// A blank cell with default attributes.
    pub fn is_blank(&self) -> bool {
        self.c == ' ' && self.style == TextStyle::default()
    }
}

fn blank_row(cols: usize) -> Vec<Cell> {
    vec![Cell::default(); cols]
}

fn blank_grid(rows: usize, cols: usize) -> Vec<Vec<Cell>> {
    vec![blank_row(cols); rows]
}

/// Resize a grid in place, preserving the top-left overlapping region.
fn resize_grid(grid: &mut Vec<Vec<Cell>>, rows: usize, cols: usize) {
    for row in grid.iter_mut() {
        row.resize(cols, Cell::default());
    }
    grid.resize_with(rows, || blank_row(cols));
}

/// Terminal screen buffer.
pub struct ScreenBuffer {
    rows: usize,
    cols: usize,
    /// Visible grid, `rows` vectors of `cols` cells each.
    grid: Vec<Vec<Cell>>,
    /// Rows that scrolled off the top, oldest first.
    scrollback: VecDeque<Vec<Cell>>,
    max_scrollback: usize,
    cursor_row: usize,
    cursor_col: usize,
    /// Attributes applied to the next written character.
    style: TextStyle,
    /// Scroll region (top, bottom), inclusive. None means full screen.
    scroll_region: Option<(usize, usize)>,
    saved_cursor: Option<(usize, usize)>,
    cursor_visible: bool,
    /// Main grid parked here while the alternate screen is active.
    main_grid: Option<Vec<Vec<Cell>>>,
    main_saved_cursor: Option<(usize, usize)>,
    alt_active: bool,
    window_title: Option<String>,
    icon_name: Option<String>,
}

impl Default for ScreenBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl ScreenBuffer {
    /// Create a buffer of the given size. Dimensions are clamped to 1x1.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_scrollback(rows, cols, DEFAULT_SCROLLBACK)
    }

    pub fn with_scrollback(rows: usize, cols: usize, max_scrollback: usize) -> Self {
        let rows = max(1, rows);
        let cols = max(1, cols);
        Self {
            rows,
            cols,
            grid: blank_grid(rows, cols),
            scrollback: VecDeque::new(),
            max_scrollback,
            cursor_row: 0,
            cursor_col: 0,
            style: TextStyle::default(),
            scroll_region: None,
            saved_cursor: None,
            cursor_visible: true,
            main_grid: None,
            main_saved_cursor: None,
            alt_active: false,
            window_title: None,
            icon_name: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cursor position as (row, col).
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    /// The visible grid rows.
    pub fn lines(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    /// One visible row. Panics if `row >= rows`.
    pub fn line(&self, row: usize) -> &[Cell] {
        &self.grid[row]
    }

    /// Rows that scrolled off the top, oldest first.
    pub fn scrollback(&self) -> impl Iterator<Item = &[Cell]> {
        self.scrollback.iter().map(|row| row.as_slice())
    }

    pub fn scrollback_len(&self) -> usize {
        self.scrollback.len()
    }

    /// Current attributes for subsequently written characters.
    pub fn style(&self) -> TextStyle {
        self.style
    }

    pub fn style_mut(&mut self) -> &mut TextStyle {
        &mut self.style
    }

    pub fn alternate_screen_active(&self) -> bool {
        self.alt_active
    }

    pub fn window_title(&self) -> Option<&str> {
        self.window_title.as_deref()
    }

    pub fn icon_name(&self) -> Option<&str> {
        self.icon_name.as_deref()
    }

    pub(crate) fn set_window_title(&mut self, title: String) {
        self.window_title = Some(title);
    }

    pub(crate) fn set_icon_name(&mut self, name: String) {
        self.icon_name = Some(name);
    }

    /// Resize the grid, preserving the top-left overlapping region.
    ///
    /// Degenerate dimensions are clamped to 1x1. The cursor is clamped into
    /// the new bounds and the scroll region is reset.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let rows = max(1, rows);
        let cols = max(1, cols);
        if rows == self.rows && cols == self.cols {
            return;
        }
        debug!(rows, cols, "resizing screen buffer");

        resize_grid(&mut self.grid, rows, cols);
        if let Some(main) = self.main_grid.as_mut() {
            resize_grid(main, rows, cols);
        }
        self.rows = rows;
        self.cols = cols;
        self.cursor_row = min(self.cursor_row, rows - 1);
        self.cursor_col = min(self.cursor_col, cols - 1);
        if let Some((r, c)) = self.saved_cursor {
            self.saved_cursor = Some((min(r, rows - 1), min(c, cols - 1)));
        }
        self.scroll_region = None;
    }

    /// Scroll region bounds, inclusive.
    fn scroll_bounds(&self) -> (usize, usize) {
        self.scroll_region.unwrap_or((0, self.rows - 1))
    }

    /// Set the scroll region (inclusive bounds, clamped). A degenerate or
    /// full-screen region resets to whole-screen scrolling.
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let top = min(top, self.rows - 1);
        let bottom = min(bottom, self.rows - 1);
        if top < bottom && !(top == 0 && bottom == self.rows - 1) {
            self.scroll_region = Some((top, bottom));
        } else {
            self.scroll_region = None;
        }
    }

    /// Write a character at the cursor with the current attributes, then
    /// advance the cursor, wrapping (and scrolling) as needed.
    ///
    /// Wide (CJK) characters occupy two cells; the continuation cell is a
    /// blank with the same attributes. Zero-width characters are dropped.
    pub fn put_char(&mut self, ch: char) {
        let width = match UnicodeWidthChar::width(ch) {
            Some(0) | None => return,
            Some(w) if self.cols >= 2 => min(w, 2),
            _ => 1,
        };

        if self.cursor_col + width > self.cols {
            self.carriage_return();
            self.newline();
        }

        self.grid[self.cursor_row][self.cursor_col] = Cell::new(ch, self.style);
        self.cursor_col += 1;
        if width == 2 {
            self.grid[self.cursor_row][self.cursor_col] = Cell::new(' ', self.style);
            self.cursor_col += 1;
        }
        if self.cursor_col >= self.cols {
            self.carriage_return();
            self.newline();
        }
    }

    /// Absolute cursor move, clamped into bounds.
    pub fn move_cursor(&mut self, row: usize, col: usize) {
        self.cursor_row = min(row, self.rows - 1);
        self.cursor_col = min(col, self.cols - 1);
    }

    /// Relative cursor move, clamped into bounds (no wraparound).
    pub fn move_cursor_relative(&mut self, delta_row: isize, delta_col: isize) {
        let row = self.cursor_row as isize + delta_row;
        let col = self.cursor_col as isize + delta_col;
        self.cursor_row = row.clamp(0, self.rows as isize - 1) as usize;
        self.cursor_col = col.clamp(0, self.cols as isize - 1) as usize;
    }

    /// Cursor up, stopping at the scroll region top.
    pub fn cursor_up(&mut self, n: usize) {
        let (top, _) = self.scroll_bounds();
        self.cursor_row = max(top, self.cursor_row.saturating_sub(n));
    }

    /// Cursor down, stopping at the scroll region bottom.
    pub fn cursor_down(&mut self, n: usize) {
        let (_, bottom) = self.scroll_bounds();
        self.cursor_row = min(bottom, self.cursor_row + n);
    }

    pub fn cursor_forward(&mut self, n: usize) {
        self.cursor_col = min(self.cols - 1, self.cursor_col + n);
    }

    pub fn cursor_back(&mut self, n: usize) {
        self.cursor_col = self.cursor_col.saturating_sub(n);
    }

    pub fn carriage_return(&mut self) {
        self.cursor_col = 0;
    }

    /// Line feed: advance the row, scrolling at the region bottom. The
    /// column is unchanged (CR is a separate operation).
    pub fn newline(&mut self) {
        let (_, bottom) = self.scroll_bounds();
        if self.cursor_row == bottom {
            self.scroll_up(1);
        } else if self.cursor_row < self.rows - 1 {
            self.cursor_row += 1;
        }
    }

    /// Cursor-only retreat; does not erase.
    pub fn backspace(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    /// Advance to the next multiple-of-8 tab stop, clamped to the last column.
    pub fn tab(&mut self) {
        let next_stop = (self.cursor_col / TAB_WIDTH + 1) * TAB_WIDTH;
        self.cursor_col = min(next_stop, self.cols - 1);
    }

    /// Scroll the region up by `n` lines. Rows leaving the top of a
    /// full-screen region are pushed to scrollback (main screen only).
    pub fn scroll_up(&mut self, n: usize) {
        let (top, bottom) = self.scroll_bounds();
        for _ in 0..n {
            let line = self.grid.remove(top);
            if top == 0 && !self.alt_active {
                self.scrollback.push_back(line);
                if self.scrollback.len() > self.max_scrollback {
                    self.scrollback.pop_front();
                }
            }
            self.grid.insert(bottom, blank_row(self.cols));
        }
    }

    /// Scroll the region down by `n` lines, discarding rows leaving the bottom.
    pub fn scroll_down(&mut self, n: usize) {
        let (top, bottom) = self.scroll_bounds();
        for _ in 0..n {
            self.grid.remove(bottom);
            self.grid.insert(top, blank_row(self.cols));
        }
    }

    /// Blank the row from the cursor to the end of the line, inclusive.
    pub fn erase_to_end_of_line(&mut self) {
        let row = self.cursor_row;
        for cell in &mut self.grid[row][self.cursor_col..] {
            *cell = Cell::default();
        }
    }

    /// Blank the row from the start of the line through the cursor.
    pub fn erase_to_start_of_line(&mut self) {
        let row = self.cursor_row;
        for cell in &mut self.grid[row][..=self.cursor_col] {
            *cell = Cell::default();
        }
    }

    pub fn erase_line(&mut self) {
        self.grid[self.cursor_row] = blank_row(self.cols);
    }

    /// Blank from the cursor to the end of the screen (rest of the current
    /// line plus all rows below). The cursor does not move.
    pub fn erase_to_end_of_screen(&mut self) {
        self.erase_to_end_of_line();
        for row in &mut self.grid[self.cursor_row + 1..] {
            *row = blank_row(self.cols);
        }
    }

    /// Blank from the start of the screen through the cursor.
    pub fn erase_to_start_of_screen(&mut self) {
        for row in &mut self.grid[..self.cursor_row] {
            *row = blank_row(self.cols);
        }
        self.erase_to_start_of_line();
    }

    /// Blank the whole screen. The cursor does not move.
    pub fn erase_screen(&mut self) {
        for row in &mut self.grid {
            *row = blank_row(self.cols);
        }
    }

    pub fn clear_scrollback(&mut self) {
        self.scrollback.clear();
    }

    /// Blank `n` cells starting at the cursor, clipped to the row end.
    pub fn erase_chars(&mut self, n: usize) {
        let start = self.cursor_col;
        let end = min(self.cols, start + n);
        for cell in &mut self.grid[self.cursor_row][start..end] {
            *cell = Cell::default();
        }
    }

    /// Insert `n` blank cells at the cursor, shifting the remainder right
    /// and truncating at the row end.
    pub fn insert_chars(&mut self, n: usize) {
        let start = self.cursor_col;
        let n = min(n, self.cols - start);
        let row = &mut self.grid[self.cursor_row];
        row.truncate(self.cols - n);
        for _ in 0..n {
            row.insert(start, Cell::default());
        }
    }

    /// Delete `n` cells at the cursor, shifting the remainder left and
    /// blank-filling at the row end.
    pub fn delete_chars(&mut self, n: usize) {
        let start = self.cursor_col;
        let n = min(n, self.cols - start);
        let row = &mut self.grid[self.cursor_row];
        row.drain(start..start + n);
        row.extend(std::iter::repeat(Cell::default()).take(n));
    }

    /// Erase the whole screen and home the cursor.
    pub fn clear(&mut self) {
        debug!("clearing screen");
        self.erase_screen();
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    pub fn save_cursor(&mut self) {
        self.saved_cursor = Some((self.cursor_row, self.cursor_col));
    }

    pub fn restore_cursor(&mut self) {
        if let Some((row, col)) = self.saved_cursor {
            self.cursor_row = min(row, self.rows - 1);
            self.cursor_col = min(col, self.cols - 1);
        }
    }

    /// Switch to a fresh alternate screen, parking the main grid.
    pub fn enter_alternate_screen(&mut self) {
        if self.alt_active {
            return;
        }
        debug!("entering alternate screen");
        let blank = blank_grid(self.rows, self.cols);
        self.main_grid = Some(std::mem::replace(&mut self.grid, blank));
        self.main_saved_cursor = self.saved_cursor.take();
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.scroll_region = None;
        self.alt_active = true;
    }

    /// Restore the main grid, discarding the alternate screen.
    pub fn leave_alternate_screen(&mut self) {
        if !self.alt_active {
            return;
        }
        debug!("leaving alternate screen");
        if let Some(main) = self.main_grid.take() {
            self.grid = main;
        }
        self.saved_cursor = self.main_saved_cursor.take();
        self.scroll_region = None;
        self.alt_active = false;
    }
}
