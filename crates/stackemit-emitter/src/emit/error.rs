//! Errors raised while emitting instructions.

use thiserror::Error;

use crate::bytecode::{OpCode, OperandKind};

/// Failure to append an instruction.
///
/// Two families exist: an instruction shape outside the grammar
/// ([`is_unsupported`](Self::is_unsupported)), and a slot index beyond what was
/// declared ([`is_out_of_range`](Self::is_out_of_range)). Nothing is appended
/// when an error is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// The opcode is not part of the recognized grammar.
    #[error("opcode '{opcode}' is not supported")]
    UnsupportedOpCode { opcode: OpCode },

    /// The opcode was paired with an operand kind it does not accept.
    #[error("opcode '{opcode}' expects {expected}, got {found}")]
    UnsupportedOperand {
        opcode: OpCode,
        expected: OperandKind,
        found: OperandKind,
    },

    /// The slot index cannot be encoded in the opcode's operand width.
    #[error("slot {index} does not fit the operand of '{opcode}'")]
    OperandTooWide { opcode: OpCode, index: u32 },

    /// Argument index beyond the declared argument list.
    #[error("argument {index} is out of range ({count} declared)")]
    ArgumentOutOfRange { index: u32, count: usize },

    /// Local slot beyond the declared locals.
    #[error("local {index} is out of range ({count} declared)")]
    LocalOutOfRange { index: u32, count: usize },
}

impl EmitError {
    /// The instruction shape is not part of the grammar.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            EmitError::UnsupportedOpCode { .. }
                | EmitError::UnsupportedOperand { .. }
                | EmitError::OperandTooWide { .. }
        )
    }

    /// A slot index beyond what was declared.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            EmitError::ArgumentOutOfRange { .. } | EmitError::LocalOutOfRange { .. }
        )
    }

    /// The opcode involved, when the failure is about an instruction shape.
    pub fn opcode(&self) -> Option<OpCode> {
        match self {
            EmitError::UnsupportedOpCode { opcode }
            | EmitError::UnsupportedOperand { opcode, .. }
            | EmitError::OperandTooWide { opcode, .. } => Some(*opcode),
            EmitError::ArgumentOutOfRange { .. } | EmitError::LocalOutOfRange { .. } => None,
        }
    }
}
