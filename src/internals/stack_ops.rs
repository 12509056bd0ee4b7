//! Stack-shuffling and return-stack transfer words.
//!
//! Grounded on `general.rs`'s `f_dup`/`f_swap`/`f_over`/`f_rot`/`f_to_r`
//! family, generalized from panic-on-corruption to typed `Result`s.

use crate::error::{VmError, VmResult};
use crate::vm::Vm;

pub fn dup(vm: &mut Vm) -> VmResult<()> {
    let top = vm.data.top(VmError::StackUnderflow)?;
    vm.data.push(top, VmError::StackOverflow)
}

pub fn drop_(vm: &mut Vm) -> VmResult<()> {
    vm.data.pop(VmError::StackUnderflow)?;
    Ok(())
}

pub fn swap(vm: &mut Vm) -> VmResult<()> {
    let b = vm.data.pop(VmError::StackUnderflow)?;
    let a = vm.data.pop(VmError::StackUnderflow)?;
    vm.data.push(b, VmError::StackOverflow)?;
    vm.data.push(a, VmError::StackOverflow)
}

pub fn over(vm: &mut Vm) -> VmResult<()> {
    let second = vm.data.peek(1, VmError::StackUnderflow)?;
    vm.data.push(second, VmError::StackOverflow)
}

pub fn rot(vm: &mut Vm) -> VmResult<()> {
    let c = vm.data.pop(VmError::StackUnderflow)?;
    let b = vm.data.pop(VmError::StackUnderflow)?;
    let a = vm.data.pop(VmError::StackUnderflow)?;
    vm.data.push(b, VmError::StackOverflow)?;
    vm.data.push(c, VmError::StackOverflow)?;
    vm.data.push(a, VmError::StackOverflow)
}

/// `pick` ( ... n -- ... x ) copy the nth item (0 = top, after n is popped).
pub fn pick(vm: &mut Vm) -> VmResult<()> {
    let n = vm.data.pop(VmError::StackUnderflow)? as usize;
    let value = vm.data.peek(n, VmError::StackUnderflow)?;
    vm.data.push(value, VmError::StackOverflow)
}

/// `roll` ( ... n -- ... x ) move the nth item to the top, shifting others down.
pub fn roll(vm: &mut Vm) -> VmResult<()> {
    let n = vm.data.pop(VmError::StackUnderflow)? as usize;
    if n == 0 {
        return Ok(());
    }
    let value = vm.data.peek(n, VmError::StackUnderflow)?;
    let mut buf = Vec::with_capacity(n);
    for _ in 0..n {
        buf.push(vm.data.pop(VmError::StackUnderflow)?);
    }
    for v in buf.into_iter().rev() {
        vm.data.push(v, VmError::StackOverflow)?;
    }
    vm.data.push(value, VmError::StackOverflow)
}

pub fn to_r(vm: &mut Vm) -> VmResult<()> {
    let v = vm.data.pop(VmError::StackUnderflow)?;
    vm.ret.push(v, VmError::ReturnStackOverflow)
}

pub fn r_from(vm: &mut Vm) -> VmResult<()> {
    let v = vm.ret.pop(VmError::ReturnStackUnderflow)?;
    vm.data.push(v, VmError::StackOverflow)
}

pub fn r_get(vm: &mut Vm) -> VmResult<()> {
    let v = vm.ret.top(VmError::ReturnStackUnderflow)?;
    vm.data.push(v, VmError::StackOverflow)
}

/// `i` ( -- n ) current loop index: whatever is on top of the return stack.
/// This is the acknowledged gap in `DO`/`LOOP`: there is no automatic
/// index/limit push, so `I`/`J` read whatever a loop body placed there
/// itself via `>R` (see design notes).
pub fn i(vm: &mut Vm) -> VmResult<()> {
    let v = vm.ret.top(VmError::ReturnStackUnderflow)?;
    vm.data.push(v, VmError::StackOverflow)
}

/// `j` ( -- n ) outer loop index: third cell from the top of the return stack.
pub fn j(vm: &mut Vm) -> VmResult<()> {
    let v = vm.ret.peek(2, VmError::ReturnStackUnderflow)?;
    vm.data.push(v, VmError::StackOverflow)
}

pub fn register(vm: &mut Vm) {
    vm.register_primitive("DUP", dup, false);
    vm.register_primitive("DROP", drop_, false);
    vm.register_primitive("SWAP", swap, false);
    vm.register_primitive("OVER", over, false);
    vm.register_primitive("ROT", rot, false);
    vm.register_primitive("PICK", pick, false);
    vm.register_primitive("ROLL", roll, false);
    vm.register_primitive(">R", to_r, false);
    vm.register_primitive("R>", r_from, false);
    vm.register_primitive("R@", r_get, false);
    vm.register_primitive("I", i, false);
    vm.register_primitive("J", j, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::VmOptions;

    fn vm_with(values: &[i16]) -> Vm {
        let mut vm = Vm::with_options(VmOptions::default());
        for &v in values {
            vm.data.push(v, VmError::StackOverflow).unwrap();
        }
        vm
    }

    #[test]
    fn dup_duplicates_top() {
        let mut vm = vm_with(&[5]);
        dup(&mut vm).unwrap();
        assert_eq!(vm.data.as_slice(), &[5, 5]);
    }

    #[test]
    fn swap_exchanges_top_two() {
        let mut vm = vm_with(&[1, 2]);
        swap(&mut vm).unwrap();
        assert_eq!(vm.data.as_slice(), &[2, 1]);
    }

    #[test]
    fn over_copies_second_to_top() {
        let mut vm = vm_with(&[1, 2]);
        over(&mut vm).unwrap();
        assert_eq!(vm.data.as_slice(), &[1, 2, 1]);
    }

    #[test]
    fn rot_rotates_three_deep() {
        let mut vm = vm_with(&[1, 2, 3]);
        rot(&mut vm).unwrap();
        assert_eq!(vm.data.as_slice(), &[2, 3, 1]);
    }

    #[test]
    fn to_r_and_r_from_round_trip() {
        let mut vm = vm_with(&[42]);
        to_r(&mut vm).unwrap();
        assert_eq!(vm.data.depth(), 0);
        assert_eq!(vm.ret.depth(), 1);
        r_from(&mut vm).unwrap();
        assert_eq!(vm.data.as_slice(), &[42]);
    }

    #[test]
    fn i_reads_top_of_return_stack() {
        let mut vm = Vm::with_options(VmOptions::default());
        vm.ret.push(7, VmError::ReturnStackOverflow).unwrap();
        i(&mut vm).unwrap();
        assert_eq!(vm.data.as_slice(), &[7]);
    }

    #[test]
    fn j_reads_third_from_top_of_return_stack() {
        let mut vm = Vm::with_options(VmOptions::default());
        vm.ret.push(100, VmError::ReturnStackOverflow).unwrap();
        vm.ret.push(50, VmError::ReturnStackOverflow).unwrap();
        vm.ret.push(7, VmError::ReturnStackOverflow).unwrap();
        j(&mut vm).unwrap();
        assert_eq!(vm.data.as_slice(), &[100]);
    }

    #[test]
    fn roll_moves_nth_item_to_top() {
        let mut vm = vm_with(&[1, 2, 3, 4, 2]);
        roll(&mut vm).unwrap();
        assert_eq!(vm.data.as_slice(), &[1, 3, 4, 2]);
    }
}
