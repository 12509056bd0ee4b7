//! Interactive line editor for the REPL front end (component L).
//!
//! Built directly on raw-mode terminal primitives rather than a full TUI
//! toolkit: printable characters insert at the cursor, a handful of control
//! keys edit the line, and a single previous line can be recalled with
//! `Up`. Falls back to plain buffered reads when standard input is not a
//! terminal (piped input, redirected files, test harnesses), so batch use
//! is never blocked waiting on terminal events.
//!
//! Grounded on the teacher's raw-mode helpers (`internals::terminal`'s
//! `enable_raw`/`disable_raw`) and its console read loop, generalized from
//! direct stdin blocking reads to a `crossterm` key-event loop.

use std::io::{self, IsTerminal, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::queue;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

pub struct LineEditor {
    history: Option<String>,
    interactive: bool,
}

impl LineEditor {
    pub fn new() -> Self {
        LineEditor {
            history: None,
            interactive: io::stdin().is_terminal(),
        }
    }

    /// Force plain buffered reads even on a terminal (batch mode).
    pub fn force_plain(&mut self) {
        self.interactive = false;
    }

    /// Reads one line, or `None` at end of input / on `Ctrl-C`.
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        if self.interactive {
            self.read_line_raw(prompt)
        } else {
            self.read_line_plain()
        }
    }

    fn read_line_plain(&mut self) -> Option<String> {
        let mut buf = String::new();
        let n = io::stdin().read_line(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        Some(buf.trim_end_matches(['\n', '\r']).to_string())
    }

    fn read_line_raw(&mut self, prompt: &str) -> Option<String> {
        enable_raw_mode().ok()?;
        let result = self.edit_loop(prompt);
        disable_raw_mode().ok();
        result
    }

    fn edit_loop(&mut self, prompt: &str) -> Option<String> {
        let mut line: Vec<char> = Vec::new();
        let mut cursor = 0usize;
        self.redraw(prompt, &line, cursor);

        loop {
            let event = event::read().ok()?;
            let Event::Key(KeyEvent { code, modifiers, .. }) = event else {
                continue;
            };
            match (code, modifiers) {
                (KeyCode::Enter, _) => {
                    print!("\r\n");
                    io::stdout().flush().ok();
                    let text: String = line.iter().collect();
                    self.history = Some(text.clone());
                    return Some(text);
                }
                (KeyCode::Char('c'), KeyModifiers::CONTROL) => return None,
                (KeyCode::Esc, _) => {
                    line.clear();
                    cursor = 0;
                }
                (KeyCode::Backspace, _) => {
                    if cursor > 0 {
                        cursor -= 1;
                        line.remove(cursor);
                    }
                }
                (KeyCode::Left, _) => cursor = cursor.saturating_sub(1),
                (KeyCode::Right, _) => cursor = (cursor + 1).min(line.len()),
                (KeyCode::Up, _) => {
                    if let Some(prev) = self.history.clone() {
                        line = prev.chars().collect();
                        cursor = line.len();
                    }
                }
                (KeyCode::Char('a'), KeyModifiers::CONTROL) => cursor = 0,
                (KeyCode::Char('e'), KeyModifiers::CONTROL) => cursor = line.len(),
                (KeyCode::Char('k'), KeyModifiers::CONTROL) => line.truncate(cursor),
                (KeyCode::Char(c), _) => {
                    line.insert(cursor, c);
                    cursor += 1;
                }
                _ => continue,
            }
            self.redraw(prompt, &line, cursor);
        }
    }

    /// Clears the current line and repaints it, placing the terminal
    /// cursor at `cursor`'s position within the line.
    fn redraw(&self, prompt: &str, line: &[char], cursor: usize) {
        let text: String = line.iter().collect();
        let mut out = io::stdout();
        queue!(out, MoveToColumn(0)).ok();
        print!("\x1b[2K{prompt}{text}");
        let col = (prompt.chars().count() + cursor) as u16;
        queue!(out, MoveToColumn(col)).ok();
        out.flush().ok();
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}
