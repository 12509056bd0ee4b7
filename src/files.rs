//! Line-at-a-time input for a script file (`-f`), read to completion
//! independent of whether standard input is a terminal.
//!
//! Grounded on the teacher's `FileHandle`/`FType` shape, trimmed to the
//! read-only, line-oriented access this system needs: no write mode, no
//! open-file-table-by-index (`OPEN-FILE`/`CLOSE-FILE` are FORTH-visible
//! primitives this system does not expose — file I/O as a FORTH-visible
//! surface is a non-goal).

use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::messages::Msg;

enum Source {
    BufReader(BufReader<File>),
}

pub struct FileHandle {
    source: Source,
    msg: Msg,
}

impl FileHandle {
    /// Opens `path` for line-at-a-time reading, reporting through `msg` and
    /// returning `None` if the file cannot be opened.
    pub fn open(path: &str, msg: Msg) -> Option<FileHandle> {
        match File::open(path) {
            Ok(file) => Some(FileHandle {
                source: Source::BufReader(BufReader::new(file)),
                msg,
            }),
            Err(e) => {
                msg.error("FileHandle::open", "unable to open file", Some(format!("{path}: {e}")));
                None
            }
        }
    }

    /// Returns the next line (trailing newline stripped), or `None` at EOF.
    pub fn get_line(&mut self) -> Option<String> {
        let Source::BufReader(ref mut reader) = self.source;
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
            Err(e) => {
                self.msg.error("FileHandle::get_line", "read error", Some(e.to_string()));
                None
            }
        }
    }
}
