//! Integration tests for shell output rendering
//!
//! Drives the emulator with typical interactive-shell byte streams (prompts,
//! colored ls output, progress-style rewrites) and checks the resulting grid
//! and styled projection.

use pretty_assertions::assert_eq;
use termscreen::{render, Color, TerminalEmulator};

#[test]
fn test_simple_text_output() {
    let mut term = TerminalEmulator::new(24, 80);

    term.feed(b"$ echo 'Hello, World!'\r\n");
    term.feed(b"Hello, World!\r\n");
    term.feed(b"$ ");

    let screen = term.screen();
    assert_eq!(screen.line(0)[0].c, '$');
    assert_eq!(screen.line(0)[2].c, 'e');
    assert_eq!(screen.line(1)[0].c, 'H');
    assert_eq!(screen.line(1)[5].c, ',');
    assert_eq!(screen.line(2)[0].c, '$');
    assert_eq!(screen.cursor(), (2, 2));
}

#[test]
fn test_multiline_output() {
    let mut term = TerminalEmulator::new(24, 80);

    for i in 1..=5 {
        term.feed(format!("Line {i}\r\n").as_bytes());
    }

    let content = render::content_string(term.screen());
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Line 1");
    assert_eq!(lines[4], "Line 5");
}

#[test]
fn test_ls_colored_output() {
    let mut term = TerminalEmulator::new(24, 80);

    // Simulate 'ls --color=auto': blue directory, green executable, plain file
    term.feed(b"\x1b[34mDocuments\x1b[0m  ");
    term.feed(b"\x1b[32mrun.sh\x1b[0m  ");
    term.feed(b"notes.txt\r\n");

    let line = term.screen().line(0);
    assert_eq!(line[0].c, 'D');
    assert_eq!(line[0].style.fg, Color::Indexed(4));
    assert_eq!(line[8].style.fg, Color::Indexed(4));
    // Separator spaces are back to default
    assert_eq!(line[9].style.fg, Color::Default);
    assert_eq!(line[11].c, 'r');
    assert_eq!(line[11].style.fg, Color::Indexed(2));
    assert_eq!(line[19].c, 'n');
    assert_eq!(line[19].style.fg, Color::Default);
}

#[test]
fn test_colored_prompt_runs() {
    let mut term = TerminalEmulator::new(24, 80);

    // Typical PS1: bold green user@host, default colon, blue cwd
    term.feed(b"\x1b[1;32muser@host\x1b[0m:\x1b[34m~/src\x1b[0m$ ");

    let lines = render::styled_lines(term.screen());
    let runs = &lines[0].runs;
    assert_eq!(runs[0].text, "user@host");
    assert!(runs[0].style.bold);
    assert_eq!(runs[0].style.fg, Color::Indexed(2));
    assert_eq!(runs[1].text, ":");
    assert_eq!(runs[1].style.fg, Color::Default);
    assert_eq!(runs[2].text, "~/src");
    assert_eq!(runs[2].style.fg, Color::Indexed(4));
}

#[test]
fn test_progress_line_rewrite() {
    let mut term = TerminalEmulator::new(24, 80);

    // Progress indicators rewrite the same line with CR + erase
    term.feed(b"Downloading... 10%");
    term.feed(b"\r\x1b[KDownloading... 50%");
    term.feed(b"\r\x1b[KDone.");

    let content = render::content_string(term.screen());
    assert_eq!(content.lines().next().unwrap(), "Done.");
}

#[test]
fn test_backspace_echo_sequence() {
    let mut term = TerminalEmulator::new(24, 80);

    // Shells erase a typed char by echoing BS SP BS
    term.feed(b"cat");
    term.feed(b"\x08 \x08");

    let screen = term.screen();
    assert_eq!(screen.line(0)[0].c, 'c');
    assert_eq!(screen.line(0)[1].c, 'a');
    assert_eq!(screen.line(0)[2].c, ' ');
    assert_eq!(screen.cursor(), (0, 2));
}

#[test]
fn test_cjk_output() {
    let mut term = TerminalEmulator::new(24, 80);

    term.feed("ファイル.txt\r\n".as_bytes());

    let line = term.screen().line(0);
    assert_eq!(line[0].c, 'フ');
    // Continuation cell after a wide char
    assert_eq!(line[1].c, ' ');
    assert_eq!(line[2].c, 'ァ');
    assert_eq!(line[8].c, '.');
}

#[test]
fn test_long_line_wraps() {
    let mut term = TerminalEmulator::new(24, 80);

    term.feed("A".repeat(200).as_bytes());

    let screen = term.screen();
    assert_eq!(screen.line(0)[0].c, 'A');
    assert_eq!(screen.line(0)[79].c, 'A');
    assert_eq!(screen.line(1)[0].c, 'A');
    assert_eq!(screen.line(2)[39].c, 'A');
    assert_eq!(screen.line(2)[40].c, ' ');
}
