//! Instruction stream types.
//!
//! - [`OpCode`] - The instruction set of the target stack machine
//! - [`Operand`] and [`OperandKind`] - What an instruction carries
//! - [`Instruction`] and [`InstructionStream`] - Emitted output
//! - [`ConstantPool`] - Values loaded from the argument-0 constant array

mod constant;
mod instruction;
mod opcode;
mod operand;
mod stream;

pub use constant::ConstantPool;
pub use instruction::Instruction;
pub use opcode::{ImpliedSlot, OpCode};
pub use operand::{ArgSlot, LocalSlot, Operand, OperandKind};
pub use stream::InstructionStream;
