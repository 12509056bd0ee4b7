//! The VM's character sink, abstracted behind a trait so tests can capture
//! output instead of writing to the real terminal.

use std::any::Any;
use std::io::{self, Write};

pub trait ForthOutput {
    fn emit_char(&mut self, c: char);
    fn emit_str(&mut self, s: &str) {
        for c in s.chars() {
            self.emit_char(c);
        }
    }
    fn newline(&mut self);
    fn flush(&mut self);
    fn as_any(&self) -> &dyn Any;
}

/// Binds output to standard output, buffered until an explicit flush (the
/// `FLUSH` word) or a newline forces it out.
pub struct StdoutOutput;

impl ForthOutput for StdoutOutput {
    fn emit_char(&mut self, c: char) {
        print!("{}", c);
    }

    fn emit_str(&mut self, s: &str) {
        print!("{}", s);
    }

    fn newline(&mut self) {
        println!();
    }

    fn flush(&mut self) {
        io::stdout().flush().ok();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// In-memory sink for tests.
#[derive(Default)]
pub struct BufferOutput {
    pub buf: String,
}

impl ForthOutput for BufferOutput {
    fn emit_char(&mut self, c: char) {
        self.buf.push(c);
    }

    fn newline(&mut self) {
        self.buf.push('\n');
    }

    fn flush(&mut self) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_output_collects_characters() {
        let mut out = BufferOutput::default();
        out.emit_str("hi ");
        out.emit_char('!');
        out.newline();
        assert_eq!(out.buf, "hi !\n");
    }
}
