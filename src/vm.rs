//! The assembled virtual machine: stacks, dictionary, code space, and the
//! outer/inner interpreter loops that tie them together.

use crate::code_space::{CodeSpace, Op};
use crate::dictionary::Dictionary;
use crate::dictionary::WordKind;
use crate::error::{VmError, VmResult};
use crate::internals;
use crate::messages::Msg;
use crate::number::parse_number;
use crate::output::{ForthOutput, StdoutOutput};
use crate::stack::Stack;
use crate::tokenizer::Tokenizer;

pub const DEFAULT_DATA_STACK: usize = 64;
pub const DEFAULT_RETURN_STACK: usize = 32;
pub const DEFAULT_DICTIONARY: usize = 128;
pub const DEFAULT_CODE_SPACE: usize = 1024;

pub type PrimitiveFn = fn(&mut Vm) -> VmResult<()>;

#[derive(Debug, Clone, Copy)]
pub struct VmOptions {
    pub data_stack_capacity: usize,
    pub return_stack_capacity: usize,
    pub dictionary_capacity: usize,
    pub code_space_capacity: usize,
}

impl Default for VmOptions {
    fn default() -> Self {
        VmOptions {
            data_stack_capacity: DEFAULT_DATA_STACK,
            return_stack_capacity: DEFAULT_RETURN_STACK,
            dictionary_capacity: DEFAULT_DICTIONARY,
            code_space_capacity: DEFAULT_CODE_SPACE,
        }
    }
}

pub struct Vm {
    pub data: Stack<i16>,
    pub ret: Stack<i16>,
    pub control_stack: Vec<usize>,
    pub dict: Dictionary,
    pub code: CodeSpace,
    pub msg: Msg,
    pub output: Box<dyn ForthOutput>,
    pub compiling: bool,
    pub running: bool,
    last_error: Option<VmError>,
    primitives: Vec<PrimitiveFn>,
}

impl Vm {
    pub fn new() -> Self {
        Self::with_options(VmOptions::default())
    }

    pub fn with_options(options: VmOptions) -> Self {
        let mut vm = Vm {
            data: Stack::new(options.data_stack_capacity),
            ret: Stack::new(options.return_stack_capacity),
            control_stack: Vec::new(),
            dict: Dictionary::new(options.dictionary_capacity),
            code: CodeSpace::new(options.code_space_capacity),
            msg: Msg::new(),
            output: Box::new(StdoutOutput),
            compiling: false,
            running: true,
            last_error: None,
            primitives: Vec::new(),
        };
        internals::register_all(&mut vm);
        vm
    }

    pub fn set_output(&mut self, output: Box<dyn ForthOutput>) {
        self.output = output;
    }

    /// Installs a primitive in both the primitive table and the dictionary.
    /// Capacity exhaustion here is a build-time programming error, not a
    /// user-triggered one, so it panics rather than returning a `VmError`.
    pub fn register_primitive(&mut self, name: &str, f: PrimitiveFn, immediate: bool) {
        let idx = self.primitives.len();
        self.primitives.push(f);
        self.dict
            .add_primitive(name, idx, immediate)
            .expect("dictionary capacity exceeded while registering primitives");
    }

    pub fn last_error(&self) -> Option<&VmError> {
        self.last_error.as_ref()
    }

    pub fn data_depth(&self) -> usize {
        self.data.depth()
    }

    pub fn return_depth(&self) -> usize {
        self.ret.depth()
    }

    pub fn is_compiling(&self) -> bool {
        self.compiling
    }

    #[cfg(test)]
    pub fn output_as_buffer(&self) -> String {
        self.output
            .as_any()
            .downcast_ref::<crate::output::BufferOutput>()
            .expect("output is not a BufferOutput")
            .buf
            .clone()
    }

    /// Drives the outer interpreter over one line of input. Resets
    /// `running` at entry (the caller — this method — is the "next line"
    /// the error-handling design refers to); `last_error` persists across
    /// lines until a fully successful line clears it.
    pub fn interpret_line(&mut self, line: &str) {
        self.running = true;
        let mut tokens = Tokenizer::new(line);
        let mut had_error = false;
        while self.running {
            let tok = match tokens.next_token() {
                Some(t) => t,
                None => break,
            };
            if let Err(e) = self.handle_token(&tok, &mut tokens) {
                had_error = true;
                self.msg.error("interpret", &e.to_string(), None::<bool>);
                self.last_error = Some(e);
                if self.compiling {
                    self.dict.abandon_definition();
                    self.compiling = false;
                }
                self.running = false;
            }
        }
        if !had_error {
            self.last_error = None;
        }
    }

    fn handle_token(&mut self, tok: &str, tokens: &mut Tokenizer) -> VmResult<()> {
        if let Some(result) = internals::compiler::dispatch_syntax(self, tok, tokens) {
            return result;
        }

        if let Some(idx) = self.dict.find_index(tok) {
            let immediate = self.dict.entry_at(idx).expect("index from find_index").immediate;
            if self.compiling && !immediate {
                self.code.emit(Op::Call(idx))?;
                return Ok(());
            }
            return self.execute_index(idx);
        }

        if let Some(n) = parse_number(tok) {
            if self.compiling {
                self.code.emit(Op::Literal(n))?;
            } else {
                self.data.push(n, VmError::StackOverflow)?;
            }
            return Ok(());
        }

        Err(VmError::UnknownWord(tok.to_string()))
    }

    /// Invoke a dictionary entry by its stable index: a primitive call, or
    /// the inner interpreter started at a user word's body.
    pub fn execute_index(&mut self, idx: usize) -> VmResult<()> {
        let entry = self.dict.entry_at(idx).ok_or(VmError::InvalidWordIndex)?;
        match entry.kind {
            WordKind::Primitive(pidx) => {
                let f = *self.primitives.get(pidx).ok_or(VmError::InvalidWordIndex)?;
                f(self)
            }
            WordKind::User(body) => self.run_user(body),
        }
    }

    /// The inner interpreter (component G): fetch, decode, dispatch. Nested
    /// user-word calls recurse here directly — the host call stack supplies
    /// the "save/restore resume offset" behavior a return-stack-based
    /// threaded interpreter would otherwise need to do explicitly.
    fn run_user(&mut self, start: usize) -> VmResult<()> {
        let mut ip = start;
        loop {
            let op = self.code.get(ip).ok_or(VmError::InvalidWordIndex)?;
            ip += 1;
            match op {
                Op::Literal(n) => self.data.push(n, VmError::StackOverflow)?,
                Op::Call(idx) => self.execute_index(idx)?,
                Op::Branch(target) => ip = target,
                Op::Branch0(target) => {
                    let v = self.data.pop(VmError::StackUnderflow)?;
                    if v == 0 {
                        ip = target;
                    }
                }
                Op::Exit => return Ok(()),
            }
        }
    }
}

impl Default for Vm {
    fn default() -> Self {
        Vm::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::BufferOutput;

    fn vm_with_buffer() -> Vm {
        let mut vm = Vm::new();
        vm.set_output(Box::new(BufferOutput::default()));
        vm
    }

    #[test]
    fn scenario_add_and_print() {
        let mut vm = vm_with_buffer();
        vm.interpret_line("3 4 + .");
        assert_eq!(vm.output_as_buffer(), "7 ");
    }

    #[test]
    fn scenario_arithmetic_sequence() {
        let mut vm = vm_with_buffer();
        vm.interpret_line("10 3 - .");
        vm.interpret_line("3 4 * .");
        vm.interpret_line("10 2 / .");
        assert_eq!(vm.output_as_buffer(), "7 12 5 ");
    }

    #[test]
    fn scenario_dup_and_dot_s() {
        let mut vm = vm_with_buffer();
        vm.interpret_line("5 DUP");
        vm.interpret_line(".S");
        assert_eq!(vm.output_as_buffer(), "[ 5 5 ] ");
    }

    #[test]
    fn scenario_user_defined_square() {
        let mut vm = vm_with_buffer();
        vm.interpret_line(": SQUARE DUP * ;");
        vm.interpret_line("5 SQUARE .");
        assert_eq!(vm.output_as_buffer(), "25 ");
    }

    #[test]
    fn scenario_hello_world_string_literal() {
        let mut vm = vm_with_buffer();
        vm.interpret_line(".\" Hello, World!\"");
        assert_eq!(vm.output_as_buffer(), "Hello, World!");
    }

    #[test]
    fn scenario_literal_saturation() {
        let mut vm = vm_with_buffer();
        vm.interpret_line("100000");
        assert_eq!(vm.data.as_slice(), &[i16::MAX]);
        vm.interpret_line("-100000");
        assert_eq!(vm.data.as_slice(), &[i16::MAX, i16::MIN]);
    }

    #[test]
    fn scenario_underflow_reports_error_and_leaves_stack_empty() {
        let mut vm = vm_with_buffer();
        vm.interpret_line("DROP");
        assert_eq!(vm.last_error(), Some(&VmError::StackUnderflow));
        assert_eq!(vm.data_depth(), 0);
    }

    #[test]
    fn scenario_division_by_zero_pushes_zero_and_errors() {
        let mut vm = vm_with_buffer();
        vm.interpret_line("5 0 /");
        assert_eq!(vm.last_error(), Some(&VmError::DivisionByZero));
        assert_eq!(vm.data.as_slice(), &[0]);
    }

    #[test]
    fn unknown_word_is_reported_and_next_line_still_runs() {
        let mut vm = vm_with_buffer();
        vm.interpret_line("BOGUS");
        assert_eq!(
            vm.last_error(),
            Some(&VmError::UnknownWord("BOGUS".to_string()))
        );
        vm.interpret_line("3 4 + .");
        assert_eq!(vm.last_error(), None);
        assert_eq!(vm.output_as_buffer(), "7 ");
    }

    #[test]
    fn a_compile_error_abandons_the_pending_definition() {
        let mut vm = vm_with_buffer();
        vm.interpret_line(": BAD BOGUS ;");
        assert!(vm.dict.find("BAD").is_none());
        assert!(!vm.is_compiling());
    }

    #[test]
    fn shadowing_a_word_makes_find_return_the_newest() {
        let mut vm = vm_with_buffer();
        vm.interpret_line(": GREETING 1 ;");
        vm.interpret_line(": GREETING 2 ;");
        vm.interpret_line("GREETING .");
        assert_eq!(vm.output_as_buffer(), "2 ");
    }
}
