//! Hand-off of a finished method body to whatever materializes it.

use stackemit_core::TypeRef;

use crate::bytecode::{Instruction, InstructionStream, LocalSlot};

/// Receiver of a finished method body.
///
/// Implemented by the component that turns instructions into executable
/// code. The emitter never calls a sink itself; [`MethodBody::replay`] does.
pub trait InstructionSink {
    type Error;

    /// Declare a local. Called once per local, in slot order, before any
    /// instruction.
    fn declare_local(&mut self, slot: LocalSlot, ty: &TypeRef) -> Result<(), Self::Error>;

    /// Receive the next instruction.
    fn instruction(&mut self, instruction: &Instruction) -> Result<(), Self::Error>;
}

/// Output of [`Emitter::finish`](crate::Emitter::finish).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBody {
    /// Argument types, in slot order
    pub arguments: Vec<TypeRef>,
    /// Local types, in slot order
    pub locals: Vec<TypeRef>,
    pub instructions: InstructionStream,
}

impl MethodBody {
    /// Drive `sink` with every local and then every instruction.
    ///
    /// Stops at the first error the sink returns.
    pub fn replay<S: InstructionSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        for (index, ty) in self.locals.iter().enumerate() {
            sink.declare_local(LocalSlot::new(index as u32), ty)?;
        }
        for instruction in &self.instructions {
            sink.instruction(instruction)?;
        }
        Ok(())
    }
}
