//! Arithmetic, bitwise, and comparison words.
//!
//! Grounded on the teacher's `pop2_push1!`/`pop1_push1!` pattern from
//! `general.rs`: pop the operands, compute, push the result. Cell width is
//! enforced by the `i16` type itself, and arithmetic uses wrapping ops so a
//! result never needs a separate clamp.

use crate::error::{VmError, VmResult};
use crate::vm::Vm;

fn pop2(vm: &mut Vm) -> VmResult<(i16, i16)> {
    let b = vm.data.pop(VmError::StackUnderflow)?;
    let a = vm.data.pop(VmError::StackUnderflow)?;
    Ok((a, b))
}

fn push_bool(vm: &mut Vm, cond: bool) -> VmResult<()> {
    vm.data.push(if cond { -1 } else { 0 }, VmError::StackOverflow)
}

pub fn plus(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    vm.data.push(a.wrapping_add(b), VmError::StackOverflow)
}

pub fn minus(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    vm.data.push(a.wrapping_sub(b), VmError::StackOverflow)
}

pub fn times(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    vm.data.push(a.wrapping_mul(b), VmError::StackOverflow)
}

pub fn divide(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    if b == 0 {
        vm.data.push(0, VmError::StackOverflow)?;
        return Err(VmError::DivisionByZero);
    }
    vm.data.push(a.wrapping_div(b), VmError::StackOverflow)
}

pub fn modulo(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    if b == 0 {
        vm.data.push(0, VmError::StackOverflow)?;
        return Err(VmError::DivisionByZero);
    }
    vm.data.push(a.wrapping_rem(b), VmError::StackOverflow)
}

pub fn and(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    vm.data.push(a & b, VmError::StackOverflow)
}

pub fn or(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    vm.data.push(a | b, VmError::StackOverflow)
}

pub fn xor(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    vm.data.push(a ^ b, VmError::StackOverflow)
}

pub fn not(vm: &mut Vm) -> VmResult<()> {
    let a = vm.data.pop(VmError::StackUnderflow)?;
    vm.data.push(!a, VmError::StackOverflow)
}

pub fn equal(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    push_bool(vm, a == b)
}

pub fn not_equal(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    push_bool(vm, a != b)
}

pub fn less_than(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    push_bool(vm, a < b)
}

pub fn greater_than(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    push_bool(vm, a > b)
}

pub fn less_equal(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    push_bool(vm, a <= b)
}

pub fn greater_equal(vm: &mut Vm) -> VmResult<()> {
    let (a, b) = pop2(vm)?;
    push_bool(vm, a >= b)
}

pub fn zero_equal(vm: &mut Vm) -> VmResult<()> {
    let a = vm.data.pop(VmError::StackUnderflow)?;
    push_bool(vm, a == 0)
}

pub fn zero_less(vm: &mut Vm) -> VmResult<()> {
    let a = vm.data.pop(VmError::StackUnderflow)?;
    push_bool(vm, a < 0)
}

pub fn push_true(vm: &mut Vm) -> VmResult<()> {
    vm.data.push(-1, VmError::StackOverflow)
}

pub fn push_false(vm: &mut Vm) -> VmResult<()> {
    vm.data.push(0, VmError::StackOverflow)
}

pub fn register(vm: &mut Vm) {
    vm.register_primitive("+", plus, false);
    vm.register_primitive("-", minus, false);
    vm.register_primitive("*", times, false);
    vm.register_primitive("/", divide, false);
    vm.register_primitive("MOD", modulo, false);
    vm.register_primitive("AND", and, false);
    vm.register_primitive("OR", or, false);
    vm.register_primitive("XOR", xor, false);
    vm.register_primitive("NOT", not, false);
    vm.register_primitive("=", equal, false);
    vm.register_primitive("<>", not_equal, false);
    vm.register_primitive("<", less_than, false);
    vm.register_primitive(">", greater_than, false);
    vm.register_primitive("<=", less_equal, false);
    vm.register_primitive(">=", greater_equal, false);
    vm.register_primitive("0=", zero_equal, false);
    vm.register_primitive("0<", zero_less, false);
    vm.register_primitive("TRUE", push_true, false);
    vm.register_primitive("FALSE", push_false, false);
}
