//! # stackemit
//!
//! Emitter for method bodies of a typed, stack-based virtual machine.
//!
//! Callers describe *what* to push or store; the emitter picks the shortest
//! encoding (`ldc.i4.3` rather than `ldc.i4 3`, `ldarg.s 4` rather than
//! `ldarg 4`), rejects opcode/operand pairings outside the grammar, and tracks
//! the type on top of the operand stack.
//!
//! ```
//! use stackemit::{Emitter, OpCode, TypeRef};
//!
//! let mut emitter = Emitter::new(vec![TypeRef::Object; 5]);
//! emitter.push_argument(4)?;
//! emitter.push_int(128);
//! emitter.emit_return();
//!
//! emitter
//!     .instructions()
//!     .assert_opcodes(&[OpCode::LdargS, OpCode::LdcI4, OpCode::Ret]);
//! assert!(emitter.emit_simple(OpCode::Nop).unwrap_err().is_unsupported());
//! # Ok::<(), stackemit::EmitError>(())
//! ```
//!
//! ## Crates
//!
//! - `stackemit-core`: type references, method and constructor references, type hashes
//! - `stackemit-emitter`: opcodes, operands, the emitter and the materializer seam

pub use stackemit_core::{
    CtorRef, MethodRef, PrimitiveKind, TypeHash, TypeRef, hash_constants, primitives,
};
pub use stackemit_emitter::{
    ArgSlot, ConstantPool, EmitError, Emitter, ImpliedSlot, Instruction, InstructionSink,
    InstructionStream, LocalSlot, LocalTable, MethodBody, OpCode, Operand, OperandKind,
};

/// Selection helpers, usable without an emitter.
pub mod select {
    pub use stackemit_emitter::emit::{argument_load, int_constant, local_load, local_store};
}
