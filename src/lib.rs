//! termscreen
//!
//! A headless virtual-terminal screen model: a cell grid with cursor state
//! and text attributes, an ANSI/VT100 escape-sequence interpreter on top of
//! [`vte`], and a renderer projecting the grid into styled text runs.
//!
//! The crate owns no GUI, PTY, or subprocess. A host feeds raw output bytes
//! in via [`TerminalEmulator::feed`] and pulls styled lines or a
//! [`Snapshot`] back out:
//!
//! ```
//! use termscreen::{render, TerminalEmulator};
//!
//! let mut term = TerminalEmulator::new(24, 80);
//! term.feed(b"\x1b[32m$ \x1b[0mls\r\n");
//! let lines = render::styled_lines(term.screen());
//! assert_eq!(lines[0].runs[0].text, "$ ");
//! ```

pub mod color;
pub mod config;
pub mod emulator;
pub mod error;
pub mod render;
pub mod screen;

pub use color::{Color, Rgb8};
pub use config::TerminalConfig;
pub use emulator::{Snapshot, TerminalEmulator};
pub use error::{ConfigError, ConfigResult};
pub use screen::{Cell, ScreenBuffer, TextStyle};
