//! picoforth — an interactive FORTH virtual machine for constrained
//! targets.
//!
//! This binary is the thin wiring the core spec treats as an external
//! collaborator: command-line configuration (`config`), an optional
//! preload script (`files`), and a terminal front end (`terminal`). None
//! of it affects VM semantics, which live entirely in `vm` and `internals`.

mod code_space;
mod config;
mod dictionary;
mod error;
mod files;
mod internals;
mod messages;
mod number;
mod output;
mod stack;
mod terminal;
mod tokenizer;
mod vm;

use config::Config;
use files::FileHandle;
use messages::Msg;
use terminal::LineEditor;
use vm::Vm;

fn main() {
    let mut config = Config::new();
    config.process_args();

    let mut vm = Vm::with_options(config.vm_options);
    vm.msg.set_level(config.debug_level);

    if let Some(path) = config.file.clone() {
        run_file(&mut vm, &path);
        if config.batch {
            return;
        }
    }

    let mut editor = LineEditor::new();
    if config.batch {
        editor.force_plain();
    }
    run_repl(&mut vm, &mut editor);
}

/// Loads and interprets a script file line by line before handing control
/// to the interactive loop (or exiting, in batch mode).
fn run_file(vm: &mut Vm, path: &str) {
    match FileHandle::open(path, Msg::new()) {
        Some(mut handle) => {
            while let Some(line) = handle.get_line() {
                vm.interpret_line(&line);
            }
        }
        None => eprintln!("picoforth: could not open {path}"),
    }
}

/// Drives the outer interpreter one line at a time from the terminal front
/// end until end-of-input (`Ctrl-D`) or `Ctrl-C`.
fn run_repl(vm: &mut Vm, editor: &mut LineEditor) {
    while let Some(line) = editor.read_line("") {
        vm.interpret_line(&line);
    }
}
