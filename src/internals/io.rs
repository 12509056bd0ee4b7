//! Character output words.
//!
//! Grounded on `console.rs`'s `f_emit_p`/`f_dot_s`, generalized from direct
//! `print!`/`io::stdout()` calls to the VM's `ForthOutput` hook so tests can
//! capture output without touching the real terminal.

use crate::error::{VmError, VmResult};
use crate::vm::Vm;

/// `emit` ( c -- ) outputs the character, wrapping mod 128 as the teacher's
/// `(emit)` does.
pub fn emit(vm: &mut Vm) -> VmResult<()> {
    let c = vm.data.pop(VmError::StackUnderflow)?;
    let c = (c.rem_euclid(128)) as u8 as char;
    vm.output.emit_char(c);
    Ok(())
}

/// `cr` ( -- ) outputs a line terminator.
pub fn cr(vm: &mut Vm) -> VmResult<()> {
    vm.output.newline();
    Ok(())
}

/// `.` ( n -- ) prints the popped cell in decimal, followed by a space.
pub fn dot(vm: &mut Vm) -> VmResult<()> {
    let n = vm.data.pop(VmError::StackUnderflow)?;
    vm.output.emit_str(&format!("{} ", n));
    Ok(())
}

/// `.s` ( -- ) non-destructively prints the stack, oldest first, bracketed.
pub fn dot_s(vm: &mut Vm) -> VmResult<()> {
    vm.output.emit_str("[ ");
    for v in vm.data.as_slice() {
        vm.output.emit_str(&format!("{} ", v));
    }
    vm.output.emit_str("] ");
    Ok(())
}

pub fn register(vm: &mut Vm) {
    vm.register_primitive("EMIT", emit, false);
    vm.register_primitive("CR", cr, false);
    vm.register_primitive(".", dot, false);
    vm.register_primitive(".S", dot_s, false);
}
