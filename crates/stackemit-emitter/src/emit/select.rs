//! Shortest-form selection.
//!
//! Each helper picks the cheapest opcode whose operand range covers the
//! requested value: a dedicated zero-operand form where one exists, then the
//! 1-byte operand form, then the full-width form.

use crate::bytecode::{ArgSlot, LocalSlot, OpCode, Operand};

/// Loads of the integer constant `value`.
///
/// `0..=8` use `ldc.i4.N`, the rest of the int8 range uses `ldc.i4.s`, and
/// everything else `ldc.i4`.
pub fn int_constant(value: i32) -> (OpCode, Operand) {
    match value {
        0..=8 => (OpCode::SMALL_INT_LOADS[value as usize], Operand::None),
        -128..=127 => (OpCode::LdcI4S, Operand::Int8(value as i8)),
        _ => (OpCode::LdcI4, Operand::Int32(value)),
    }
}

/// Load of argument `slot`.
pub fn argument_load(slot: ArgSlot) -> (OpCode, Operand) {
    match slot.index() {
        index @ 0..=3 => (OpCode::ARG_LOADS[index as usize], Operand::None),
        4..=255 => (OpCode::LdargS, Operand::Argument(slot)),
        _ => (OpCode::Ldarg, Operand::Argument(slot)),
    }
}

/// Load of local `slot`.
pub fn local_load(slot: LocalSlot) -> (OpCode, Operand) {
    match slot.index() {
        index @ 0..=3 => (OpCode::LOCAL_LOADS[index as usize], Operand::None),
        4..=255 => (OpCode::LdlocS, Operand::Local(slot)),
        _ => (OpCode::Ldloc, Operand::Local(slot)),
    }
}

/// Store into local `slot`.
pub fn local_store(slot: LocalSlot) -> (OpCode, Operand) {
    match slot.index() {
        index @ 0..=3 => (OpCode::LOCAL_STORES[index as usize], Operand::None),
        4..=255 => (OpCode::StlocS, Operand::Local(slot)),
        _ => (OpCode::Stloc, Operand::Local(slot)),
    }
}
