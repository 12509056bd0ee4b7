//! Command-line configuration layer (component K): parses argv, resolves an
//! optional preload file, and builds the `VmOptions` the binary hands to
//! `Vm::with_options`.
//!
//! Grounded on the teacher's `Config::process_args` shape (clap, a
//! `--debuglevel` flag with a fixed value set, `-f`/`--file`), narrowed to
//! this system's word list: no `--nocore`/`--library` flags, since this
//! implementation carries no corelib-file dependency (a conforming ANS
//! standard library is an explicit non-goal).

use ::clap::{arg, Command};

use crate::messages::DebugLevel;
use crate::vm::VmOptions;

pub const VERSION: &str = "0.1.0";

pub struct Config {
    pub debug_level: DebugLevel,
    pub file: Option<String>,
    pub batch: bool,
    pub vm_options: VmOptions,
}

impl Config {
    pub fn new() -> Config {
        Config {
            debug_level: DebugLevel::Error,
            file: None,
            batch: false,
            vm_options: VmOptions::default(),
        }
    }

    /// Parses `std::env::args`, updating `self` in place.
    pub fn process_args(&mut self) -> &Config {
        let arguments = Command::new("picoforth")
            .version(VERSION)
            .about("An interactive FORTH virtual machine for constrained targets")
            .arg(
                arg!(--debuglevel <VALUE>)
                    .required(false)
                    .value_parser(["error", "warning", "info", "debug"]),
            )
            .arg(arg!(-f --file <VALUE>).required(false))
            .arg(arg!(-b --batch).required(false))
            .arg(arg!(--"data-stack" <VALUE>).required(false))
            .arg(arg!(--"return-stack" <VALUE>).required(false))
            .arg(arg!(--dictionary <VALUE>).required(false))
            .arg(arg!(--"code-space" <VALUE>).required(false))
            .get_matches();

        if let Some(level) = arguments.get_one::<String>("debuglevel") {
            self.debug_level = match level.as_str() {
                "debug" => DebugLevel::Debug,
                "info" => DebugLevel::Info,
                "warning" => DebugLevel::Warning,
                _ => DebugLevel::Error,
            };
        }

        if let Some(file) = arguments.get_one::<String>("file") {
            self.file = Some(file.clone());
        }

        if arguments.get_flag("batch") {
            self.batch = true;
        }

        if let Some(v) = arguments.get_one::<String>("data-stack").and_then(|s| s.parse().ok()) {
            self.vm_options.data_stack_capacity = v;
        }
        if let Some(v) = arguments.get_one::<String>("return-stack").and_then(|s| s.parse().ok()) {
            self.vm_options.return_stack_capacity = v;
        }
        if let Some(v) = arguments.get_one::<String>("dictionary").and_then(|s| s.parse().ok()) {
            self.vm_options.dictionary_capacity = v;
        }
        if let Some(v) = arguments.get_one::<String>("code-space").and_then(|s| s.parse().ok()) {
            self.vm_options.code_space_capacity = v;
        }

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
