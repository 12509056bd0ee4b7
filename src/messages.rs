//! Leveled diagnostic reporting.
//!
//! `Msg` is independent of [`crate::error::VmError`]: a failing primitive
//! both calls `Msg::error` (for a human watching the session) and returns a
//! typed `VmError` (for the caller). One is for eyes, one is for control
//! flow.

use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Error,
    Warning,
    Info,
    Debug,
}

#[derive(Debug, Clone)]
pub struct Msg {
    level: DebugLevel,
}

impl Msg {
    pub fn new() -> Msg {
        Msg {
            level: DebugLevel::Error,
        }
    }

    pub fn set_level(&mut self, level: DebugLevel) {
        self.level = level;
    }

    pub fn get_level(&self) -> DebugLevel {
        self.level
    }

    fn emit<T: Debug>(&self, severity: DebugLevel, tag: &str, caller: &str, text: &str, context: Option<T>) {
        if severity > self.level {
            return;
        }
        match context {
            Some(ctx) => eprintln!("{}: {}: {} ({:?})", tag, caller, text, ctx),
            None => eprintln!("{}: {}: {}", tag, caller, text),
        }
    }

    pub fn error<T: Debug>(&self, caller: &str, text: &str, context: Option<T>) {
        self.emit(DebugLevel::Error, "error", caller, text, context);
    }

    pub fn warning<T: Debug>(&self, caller: &str, text: &str, context: Option<T>) {
        self.emit(DebugLevel::Warning, "warning", caller, text, context);
    }

    pub fn info<T: Debug>(&self, caller: &str, text: &str, context: Option<T>) {
        self.emit(DebugLevel::Info, "info", caller, text, context);
    }

    pub fn debug<T: Debug>(&self, caller: &str, text: &str, context: Option<T>) {
        self.emit(DebugLevel::Debug, "debug", caller, text, context);
    }
}

impl Default for Msg {
    fn default() -> Self {
        Msg::new()
    }
}
