//! Escape-sequence interpretation
//!
//! [`TerminalEmulator`] owns a [`vte::Parser`] and a [`ScreenBuffer`] and
//! feeds raw subprocess output through the parser with the buffer as the
//! dispatch target. The parser is an incremental state machine kept alive
//! across [`TerminalEmulator::feed`] calls, so escape sequences split over
//! arbitrary chunk boundaries resume on the next chunk, and a truncated
//! sequence at end of stream simply stays pending without touching the grid.

use tracing::trace;
use vte::{Params, Parser, Perform};

use crate::color::Color;
use crate::config::TerminalConfig;
use crate::screen::{Cell, ScreenBuffer};

/// Owned read-only view of the screen for a rendering thread.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Visible grid rows, top to bottom.
    pub lines: Vec<Vec<Cell>>,
    /// Cursor position as (row, col).
    pub cursor: (usize, usize),
    pub cursor_visible: bool,
}

/// Virtual terminal: ANSI parser plus screen buffer.
///
/// Single-writer: exactly one stream feeds [`TerminalEmulator::feed`]; reads
/// via [`TerminalEmulator::screen`] or [`TerminalEmulator::snapshot`] see a
/// consistent state between feeds.
pub struct TerminalEmulator {
    parser: Parser,
    screen: ScreenBuffer,
}

impl Default for TerminalEmulator {
    fn default() -> Self {
        Self::with_config(&TerminalConfig::default())
    }
}

impl TerminalEmulator {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            parser: Parser::new(),
            screen: ScreenBuffer::new(rows, cols),
        }
    }

    pub fn with_config(config: &TerminalConfig) -> Self {
        Self {
            parser: Parser::new(),
            screen: ScreenBuffer::with_scrollback(
                config.rows,
                config.cols,
                config.scrollback_lines,
            ),
        }
    }

    /// Process a chunk of raw subprocess output.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.parser.advance(&mut self.screen, byte);
        }
    }

    pub fn feed_str(&mut self, text: &str) {
        self.feed(text.as_bytes());
    }

    pub fn screen(&self) -> &ScreenBuffer {
        &self.screen
    }

    /// Host-driven resize (e.g. the terminal view changed size).
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.screen.resize(rows, cols);
    }

    /// Host-driven clear (e.g. a "clear terminal" action).
    pub fn clear(&mut self) {
        self.screen.clear();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lines: self.screen.lines().to_vec(),
            cursor: self.screen.cursor(),
            cursor_visible: self.screen.cursor_visible(),
        }
    }
}

/// First parameter with a default; 0 means "use the default" per ECMA-48.
fn param_or(params: &Params, default: u16) -> u16 {
    params
        .iter()
        .next()
        .map(|p| p[0])
        .filter(|&v| v != 0)
        .unwrap_or(default)
}

/// First parameter as a selector mode, where 0 is meaningful.
fn mode_param(params: &Params) -> u16 {
    params.iter().next().map(|p| p[0]).unwrap_or(0)
}

impl ScreenBuffer {
    /// Apply SGR (Select Graphic Rendition) parameters to the current style.
    fn apply_sgr(&mut self, params: &Params) {
        if params.is_empty() {
            *self.style_mut() = Default::default();
            return;
        }

        let mut iter = params.iter();
        while let Some(param) = iter.next() {
            let value = param[0];
            match value {
                0 => *self.style_mut() = Default::default(),
                1 => self.style_mut().bold = true,
                3 => self.style_mut().italic = true,
                4 => self.style_mut().underline = true,
                7 => self.style_mut().reverse = true,
                22 => self.style_mut().bold = false,
                23 => self.style_mut().italic = false,
                24 => self.style_mut().underline = false,
                27 => self.style_mut().reverse = false,
                // Foreground colors
                30..=37 => self.style_mut().fg = Color::Indexed((value - 30) as u8),
                38 => {
                    if let Some(color) = extended_color(&mut iter) {
                        self.style_mut().fg = color;
                    }
                }
                39 => self.style_mut().fg = Color::Default,
                // Background colors
                40..=47 => self.style_mut().bg = Color::Indexed((value - 40) as u8),
                48 => {
                    if let Some(color) = extended_color(&mut iter) {
                        self.style_mut().bg = color;
                    }
                }
                49 => self.style_mut().bg = Color::Default,
                // Bright variants
                90..=97 => self.style_mut().fg = Color::Indexed((value - 90 + 8) as u8),
                100..=107 => self.style_mut().bg = Color::Indexed((value - 100 + 8) as u8),
                _ => trace!(code = value, "ignoring unrecognized SGR code"),
            }
        }
    }

    /// DEC private mode set/reset (CSI ? ... h / l).
    fn set_private_mode(&mut self, params: &Params, enable: bool) {
        for param in params.iter() {
            match param[0] {
                // DECTCEM cursor visibility
                25 => self.set_cursor_visible(enable),
                1049 => {
                    if enable {
                        self.save_cursor();
                        self.enter_alternate_screen();
                    } else {
                        self.leave_alternate_screen();
                        self.restore_cursor();
                    }
                }
                47 | 1047 => {
                    if enable {
                        self.enter_alternate_screen();
                    } else {
                        self.leave_alternate_screen();
                    }
                }
                mode => trace!(mode, enable, "ignoring private mode"),
            }
        }
    }
}

impl Perform for ScreenBuffer {
    fn print(&mut self, c: char) {
        self.put_char(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            // LF, VT and FF all advance the line
            b'\n' | 0x0b | 0x0c => self.newline(),
            b'\r' => self.carriage_return(),
            0x08 => self.backspace(),
            b'\t' => self.tab(),
            // BEL: nothing to ring here
            0x07 => {}
            _ => trace!(byte, "dropping control byte"),
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _action: char) {
        // DCS sequences are consumed without effect
    }

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, params: &[&[u8]], _bell_terminated: bool) {
        if params.is_empty() {
            return;
        }
        let command = String::from_utf8_lossy(params[0]);
        match command.parse::<u16>() {
            Ok(0) if params.len() > 1 => {
                let title = String::from_utf8_lossy(params[1]).to_string();
                self.set_icon_name(title.clone());
                self.set_window_title(title);
            }
            Ok(1) if params.len() > 1 => {
                self.set_icon_name(String::from_utf8_lossy(params[1]).to_string());
            }
            Ok(2) if params.len() > 1 => {
                self.set_window_title(String::from_utf8_lossy(params[1]).to_string());
            }
            // Titles are the only OSC this model retains; everything else
            // (hyperlinks, clipboard, cwd) is consumed and discarded.
            _ => trace!(osc = %command, "discarding OSC sequence"),
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], _ignore: bool, action: char) {
        if intermediates.contains(&b'?') {
            match action {
                'h' => self.set_private_mode(params, true),
                'l' => self.set_private_mode(params, false),
                _ => trace!(action = %action, "ignoring private CSI sequence"),
            }
            return;
        }

        match action {
            // Cursor movement
            'A' => self.cursor_up(param_or(params, 1) as usize),
            'B' => self.cursor_down(param_or(params, 1) as usize),
            'C' => self.cursor_forward(param_or(params, 1) as usize),
            'D' => self.cursor_back(param_or(params, 1) as usize),
            'G' => {
                let col = param_or(params, 1) as usize - 1;
                let (row, _) = self.cursor();
                self.move_cursor(row, col);
            }
            'H' | 'f' => {
                // CUP/HVP, 1-based in the wire format
                let mut iter = params.iter();
                let row = iter.next().map(|p| p[0]).filter(|&v| v != 0).unwrap_or(1);
                let col = iter.next().map(|p| p[0]).filter(|&v| v != 0).unwrap_or(1);
                self.move_cursor(row as usize - 1, col as usize - 1);
            }
            // Erase in display
            'J' => match mode_param(params) {
                0 => self.erase_to_end_of_screen(),
                1 => self.erase_to_start_of_screen(),
                2 => self.erase_screen(),
                3 => {
                    self.erase_screen();
                    self.clear_scrollback();
                }
                mode => trace!(mode, "ignoring ED mode"),
            },
            // Erase in line
            'K' => match mode_param(params) {
                0 => self.erase_to_end_of_line(),
                1 => self.erase_to_start_of_line(),
                2 => self.erase_line(),
                mode => trace!(mode, "ignoring EL mode"),
            },
            '@' => self.insert_chars(param_or(params, 1) as usize),
            'P' => self.delete_chars(param_or(params, 1) as usize),
            'X' => self.erase_chars(param_or(params, 1) as usize),
            'm' => self.apply_sgr(params),
            'r' => {
                let mut iter = params.iter();
                let top = iter.next().map(|p| p[0]).filter(|&v| v != 0).unwrap_or(1);
                let bottom = iter
                    .next()
                    .map(|p| p[0])
                    .filter(|&v| v != 0)
                    .unwrap_or(self.rows() as u16);
                self.set_scroll_region(top as usize - 1, bottom as usize - 1);
            }
            's' => self.save_cursor(),
            'u' => self.restore_cursor(),
            'S' => self.scroll_up(param_or(params, 1) as usize),
            'T' => self.scroll_down(param_or(params, 1) as usize),
            _ => trace!(action = %action, "ignoring CSI sequence"),
        }
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, byte: u8) {
        // Unrecognized ESC sequences are consumed without effect so unknown
        // input can never print as garbage or corrupt the grid.
        trace!(byte, "ignoring ESC sequence");
    }
}

/// Parse the tail of an SGR 38/48 extended color: `;5;n` or `;2;r;g;b`.
fn extended_color(iter: &mut vte::ParamsIter<'_>) -> Option<Color> {
    match iter.next()?[0] {
        2 => {
            let r = iter.next()?[0];
            let g = iter.next()?[0];
            let b = iter.next()?[0];
            Some(Color::Rgb(r as u8, g as u8, b as u8))
        }
        5 => Some(Color::Palette256(iter.next()?[0] as u8)),
        _ => None,
    }
}
