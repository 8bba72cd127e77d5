//! A single emitted instruction.

use std::fmt;

use super::{OpCode, Operand};

/// One emitted unit: an opcode and the operand it carries.
///
/// Construction does not validate the pairing; the emitter checks the grammar
/// before anything is appended to a stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instruction {
    opcode: OpCode,
    operand: Operand,
}

impl Instruction {
    pub fn new(opcode: OpCode, operand: Operand) -> Self {
        Self { opcode, operand }
    }

    /// An instruction without operand.
    pub fn simple(opcode: OpCode) -> Self {
        Self::new(opcode, Operand::None)
    }

    pub fn opcode(&self) -> OpCode {
        self.opcode
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Encoded size in bytes, opcode plus operand.
    pub fn size(&self) -> usize {
        self.opcode.opcode_size() + self.opcode.operand_size()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operand.is_none() {
            write!(f, "{}", self.opcode)
        } else {
            write!(f, "{} {}", self.opcode, self.operand)
        }
    }
}
