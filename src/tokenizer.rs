//! Splits one input line into whitespace-delimited tokens.
//!
//! Holds no state beyond the current line and cursor — there is no
//! persistent multi-line input buffer; reading lines is the host's job (see
//! the terminal front end and `Vm::interpret_line`).

use crate::error::VmError;

pub struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
}

impl Tokenizer {
    pub fn new(line: &str) -> Self {
        Tokenizer {
            chars: line.chars().collect(),
            pos: 0,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.chars.len() && self.chars[self.pos].is_whitespace() {
            self.pos += 1;
        }
    }

    /// Next whitespace-delimited token, or `None` at end of line.
    pub fn next_token(&mut self) -> Option<String> {
        self.skip_whitespace();
        if self.pos >= self.chars.len() {
            return None;
        }
        let start = self.pos;
        while self.pos < self.chars.len() && !self.chars[self.pos].is_whitespace() {
            self.pos += 1;
        }
        Some(self.chars[start..self.pos].iter().collect())
    }

    /// Discard a single whitespace character at the cursor, if present.
    /// Used after `."` to drop the mandatory separator before the string body.
    pub fn skip_one_space(&mut self) {
        if self.pos < self.chars.len() && self.chars[self.pos].is_whitespace() {
            self.pos += 1;
        }
    }

    /// Return the slice up to (not including) the next `delim`, advancing
    /// past the delimiter. Fails if `delim` never appears.
    pub fn take_until(&mut self, delim: char) -> Result<String, VmError> {
        let start = self.pos;
        while self.pos < self.chars.len() && self.chars[self.pos] != delim {
            self.pos += 1;
        }
        if self.pos >= self.chars.len() {
            self.pos = start;
            return Err(VmError::UnterminatedString);
        }
        let slice: String = self.chars[start..self.pos].iter().collect();
        self.pos += 1; // consume the delimiter
        Ok(slice)
    }
}
