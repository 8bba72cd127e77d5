//! Ordered instruction stream for a single method body.
//!
//! An `InstructionStream` is append-only: position is identity and order is
//! execution order. Only the emitter appends, so every instruction in a stream
//! has passed the grammar check.

use std::fmt;
use std::ops::Index;

use super::{Instruction, OpCode};

/// The instructions emitted so far, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionStream {
    instructions: Vec<Instruction>,
}

impl InstructionStream {
    /// Create a new empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stream with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instructions: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn last(&self) -> Option<&Instruction> {
        self.instructions.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Total encoded size in bytes.
    pub fn code_size(&self) -> usize {
        self.instructions.iter().map(Instruction::size).sum()
    }

    /// Byte offset of each instruction, in order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.instructions.iter().scan(0, |offset, instruction| {
            let start = *offset;
            *offset += instruction.size();
            Some(start)
        })
    }

    /// Extract the opcode sequence, ignoring operands.
    pub fn opcodes(&self) -> Vec<OpCode> {
        self.instructions.iter().map(Instruction::opcode).collect()
    }

    /// Check that this stream contains exactly the given opcode sequence.
    ///
    /// Panics with both sequences spelled out if they differ.
    #[track_caller]
    pub fn assert_opcodes(&self, expected: &[OpCode]) {
        let actual = self.opcodes();
        assert_eq!(
            actual,
            expected,
            "Instruction mismatch.\nExpected: {:?}\nActual:   {:?}",
            expected.iter().map(|op| op.name()).collect::<Vec<_>>(),
            actual.iter().map(|op| op.name()).collect::<Vec<_>>(),
        );
    }

    /// Check that the given opcodes appear in order, not necessarily contiguous.
    #[track_caller]
    pub fn assert_contains_opcodes(&self, expected: &[OpCode]) {
        let actual = self.opcodes();
        let mut expected_iter = expected.iter().peekable();

        for op in &actual {
            if expected_iter.peek() == Some(&op) {
                expected_iter.next();
            }
        }

        if expected_iter.peek().is_some() {
            let remaining: Vec<_> = expected_iter.map(|op| op.name()).collect();
            panic!(
                "Missing opcodes in sequence.\nExpected to find: {:?}\nActual stream:    {:?}",
                remaining,
                actual.iter().map(|op| op.name()).collect::<Vec<_>>(),
            );
        }
    }
}

impl Index<usize> for InstructionStream {
    type Output = Instruction;

    fn index(&self, index: usize) -> &Instruction {
        &self.instructions[index]
    }
}

impl<'a> IntoIterator for &'a InstructionStream {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

/// Listing with byte offsets, one instruction per line.
impl fmt::Display for InstructionStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (offset, instruction) in self.offsets().zip(&self.instructions) {
            writeln!(f, "IL_{:04x}: {}", offset, instruction)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::Operand;

    fn sample() -> InstructionStream {
        let mut stream = InstructionStream::new();
        stream.push(Instruction::new(OpCode::LdcI4S, Operand::Int8(9)));
        stream.push(Instruction::new(OpCode::LdcI4, Operand::Int32(1000)));
        stream.push(Instruction::simple(OpCode::Add));
        stream.push(Instruction::simple(OpCode::Ret));
        stream
    }

    #[test]
    fn new_stream_is_empty() {
        let stream = InstructionStream::new();
        assert!(stream.is_empty());
        assert_eq!(stream.code_size(), 0);
        assert_eq!(stream.to_string(), "");
    }

    #[test]
    fn offsets_and_size() {
        let stream = sample();
        assert_eq!(stream.offsets().collect::<Vec<_>>(), vec![0, 2, 7, 8]);
        assert_eq!(stream.code_size(), 9);
    }

    #[test]
    fn listing() {
        let listing = sample().to_string();
        assert_eq!(
            listing,
            "IL_0000: ldc.i4.s 9\nIL_0002: ldc.i4 1000\nIL_0007: add\nIL_0008: ret\n"
        );
    }

    #[test]
    fn indexing() {
        let stream = sample();
        assert_eq!(stream[2].opcode(), OpCode::Add);
        assert_eq!(stream.last().map(Instruction::opcode), Some(OpCode::Ret));
        assert!(stream.get(4).is_none());
    }

    #[test]
    fn assert_opcodes_success() {
        sample().assert_opcodes(&[OpCode::LdcI4S, OpCode::LdcI4, OpCode::Add, OpCode::Ret]);
    }

    #[test]
    #[should_panic(expected = "Instruction mismatch")]
    fn assert_opcodes_failure() {
        sample().assert_opcodes(&[OpCode::Ret]);
    }

    #[test]
    fn assert_contains_opcodes_success() {
        sample().assert_contains_opcodes(&[OpCode::LdcI4S, OpCode::Ret]);
    }

    #[test]
    #[should_panic(expected = "Missing opcodes")]
    fn assert_contains_opcodes_failure() {
        sample().assert_contains_opcodes(&[OpCode::Ret, OpCode::Add]);
    }
}
