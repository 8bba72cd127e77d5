//! Stack-machine instruction emitter.
//!
//! Builds method bodies for a typed stack machine, always choosing the
//! shortest encoding of constant pushes and argument/local accesses.
//!
//! ## Modules
//!
//! - [`bytecode`]: Instruction set types (OpCode, Operand, InstructionStream, ConstantPool)
//! - [`emit`]: The emitter, its errors and the local table
//! - [`sink`]: Hand-off of finished bodies to a materializer

pub mod bytecode;
pub mod emit;
pub mod sink;

pub use bytecode::{
    ArgSlot, ConstantPool, ImpliedSlot, Instruction, InstructionStream, LocalSlot, OpCode,
    Operand, OperandKind,
};
pub use emit::{EmitError, Emitter, LocalTable};
pub use sink::{InstructionSink, MethodBody};
