//! Instruction emitter.
//!
//! The [`Emitter`] turns semantic requests ("push 9", "load argument 4",
//! "store into this local") into the shortest instruction that does the job,
//! validates every opcode/operand pairing, and tracks the type left on top of
//! the operand stack so callers can pick follow-up casts and calls.
//!
//! # Example
//!
//! ```
//! use stackemit_core::TypeRef;
//! use stackemit_emitter::{Emitter, OpCode};
//!
//! let mut emitter = Emitter::new(vec![TypeRef::array_of(TypeRef::Object)]);
//! let counter = emitter.declare_local(TypeRef::INT32);
//!
//! emitter.push_int(9);
//! assert_eq!(emitter.stack_type(), Some(&TypeRef::INT8));
//! emitter.store_local(counter)?;
//! emitter.push_local(counter)?;
//! emitter.emit_return();
//!
//! let body = emitter.finish();
//! body.instructions.assert_opcodes(&[OpCode::LdcI4S, OpCode::Stloc0, OpCode::Ldloc0, OpCode::Ret]);
//! # Ok::<(), stackemit_emitter::EmitError>(())
//! ```

mod error;
mod helpers;
mod locals;
mod select;
mod stack;

use stackemit_core::TypeRef;
use tracing::{debug, trace};

use crate::bytecode::{
    ArgSlot, ImpliedSlot, Instruction, InstructionStream, LocalSlot, OpCode, Operand,
};
use crate::sink::MethodBody;
use stack::StackEffect;

pub use error::EmitError;
pub use locals::LocalTable;
pub use select::{argument_load, int_constant, local_load, local_store};

/// Builds the instruction stream for one method body.
///
/// The emitter is append-only: instructions and locals can be added but never
/// removed. A failed call appends nothing.
#[derive(Debug, Clone)]
pub struct Emitter {
    /// Argument types, fixed at construction
    arguments: Vec<TypeRef>,
    /// Declared locals
    locals: LocalTable,
    /// Instructions appended so far
    instructions: InstructionStream,
    /// Type of the value the last modeled push left on top
    stack_type: Option<TypeRef>,
}

impl Emitter {
    /// Create an emitter for a method taking `arguments`.
    pub fn new(arguments: impl Into<Vec<TypeRef>>) -> Self {
        Self::with_capacity(arguments, 0)
    }

    /// Create an emitter with room for `capacity` instructions.
    pub fn with_capacity(arguments: impl Into<Vec<TypeRef>>, capacity: usize) -> Self {
        Self {
            arguments: arguments.into(),
            locals: LocalTable::new(),
            instructions: InstructionStream::with_capacity(capacity),
            stack_type: None,
        }
    }

    pub fn arguments(&self) -> &[TypeRef] {
        &self.arguments
    }

    pub fn locals(&self) -> &[TypeRef] {
        self.locals.types()
    }

    /// Instructions appended so far.
    pub fn instructions(&self) -> &InstructionStream {
        &self.instructions
    }

    /// Type on top of the operand stack after the last modeled push.
    ///
    /// `None` until something has been pushed.
    pub fn stack_type(&self) -> Option<&TypeRef> {
        self.stack_type.as_ref()
    }

    // ==========================================================================
    // Locals
    // ==========================================================================

    /// Declare a local of type `ty`.
    ///
    /// The Nth declaration always gets slot N.
    pub fn declare_local(&mut self, ty: TypeRef) -> LocalSlot {
        debug!(slot = self.locals.len(), ty = %ty, "local declared");
        self.locals.declare(ty)
    }

    // ==========================================================================
    // Pushes and stores
    // ==========================================================================

    /// Push a 32-bit integer constant using the shortest encoding.
    ///
    /// The tracked stack type is `int8` when the 1-byte operand form is used
    /// and `int` otherwise, including the dedicated `ldc.i4.0`..`ldc.i4.8`.
    pub fn push_int(&mut self, value: i32) {
        let (opcode, operand) = select::int_constant(value);
        self.append_valid(opcode, operand, None);
    }

    /// Push argument `index` using the shortest encoding.
    ///
    /// Indices above 65535 cannot be encoded and fail with
    /// [`EmitError::OperandTooWide`].
    pub fn push_argument(&mut self, index: u32) -> Result<(), EmitError> {
        let (opcode, operand) = select::argument_load(ArgSlot::new(index));
        self.append_selected(opcode, operand)
    }

    /// Push the value of `local` using the shortest encoding.
    pub fn push_local(&mut self, local: LocalSlot) -> Result<(), EmitError> {
        let (opcode, operand) = select::local_load(local);
        self.append_selected(opcode, operand)
    }

    /// Pop the top of the stack into `local` using the shortest encoding.
    ///
    /// The tracked stack type is left as it was.
    pub fn store_local(&mut self, local: LocalSlot) -> Result<(), EmitError> {
        let (opcode, operand) = select::local_store(local);
        self.append_selected(opcode, operand)
    }

    /// Append `ret`.
    pub fn emit_return(&mut self) {
        self.append_valid(OpCode::Ret, Operand::None, None);
    }

    // ==========================================================================
    // Generic emission
    // ==========================================================================

    /// Append `opcode` with `operand` after checking the pairing.
    ///
    /// Fails when the opcode is outside the recognized grammar, when the
    /// operand kind is not the one the opcode accepts (including a missing or
    /// superfluous operand), when a slot does not fit the opcode's operand
    /// width, or when the addressed argument or local was never declared.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn emit(&mut self, opcode: OpCode, operand: impl Into<Operand>) -> Result<(), EmitError> {
        let operand = operand.into();
        check_shape(opcode, &operand)?;
        let slot_type = self.resolve_slot(opcode, &operand)?;
        self.append(Instruction::new(opcode, operand), slot_type);
        Ok(())
    }

    /// Append an opcode that takes no operand.
    pub fn emit_simple(&mut self, opcode: OpCode) -> Result<(), EmitError> {
        self.emit(opcode, Operand::None)
    }

    /// Hand the finished body over for materialization.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn finish(self) -> MethodBody {
        debug!(
            instructions = self.instructions.len(),
            code_size = self.instructions.code_size(),
            locals = self.locals.len(),
            "method body finished"
        );
        MethodBody {
            arguments: self.arguments,
            locals: self.locals.into_types(),
            instructions: self.instructions,
        }
    }

    // ==========================================================================
    // Internals
    // ==========================================================================

    fn argument_type(&self, index: u32) -> Result<&TypeRef, EmitError> {
        self.arguments
            .get(index as usize)
            .ok_or(EmitError::ArgumentOutOfRange {
                index,
                count: self.arguments.len(),
            })
    }

    /// Declared type of the slot an instruction addresses, if any.
    fn resolve_slot(&self, opcode: OpCode, operand: &Operand) -> Result<Option<TypeRef>, EmitError> {
        let (slot, is_argument) = match (operand, opcode.implied_slot()) {
            (Operand::Argument(slot), _) => (slot.index(), true),
            (Operand::Local(slot), _) => (slot.index(), false),
            (_, Some(ImpliedSlot::Argument(index))) => (index, true),
            (_, Some(ImpliedSlot::Local(index))) => (index, false),
            _ => return Ok(None),
        };

        let ty = if is_argument {
            self.argument_type(slot)?
        } else {
            self.locals.get(slot)?
        };
        check_width(opcode, operand)?;
        Ok(Some(ty.clone()))
    }

    /// Append a slot access picked by the selection helpers.
    ///
    /// Goes through the same slot resolution as [`emit`](Self::emit), so
    /// range and width are checked before anything is appended.
    fn append_selected(&mut self, opcode: OpCode, operand: Operand) -> Result<(), EmitError> {
        debug_assert!(check_shape(opcode, &operand).is_ok());
        let slot_type = self.resolve_slot(opcode, &operand)?;
        self.append(Instruction::new(opcode, operand), slot_type);
        Ok(())
    }

    /// Append an instruction that addresses no slot.
    fn append_valid(&mut self, opcode: OpCode, operand: Operand, slot_type: Option<TypeRef>) {
        debug_assert!(check_shape(opcode, &operand).is_ok());
        debug_assert!(check_width(opcode, &operand).is_ok());
        self.append(Instruction::new(opcode, operand), slot_type);
    }

    /// The single place instructions enter the stream; the stack effect is
    /// applied here so the two never disagree.
    fn append(&mut self, instruction: Instruction, slot_type: Option<TypeRef>) {
        StackEffect::of(instruction.opcode(), instruction.operand(), slot_type.as_ref())
            .apply(&mut self.stack_type);
        trace!(
            instruction = %instruction,
            stack_type = ?self.stack_type,
            "instruction appended"
        );
        self.instructions.push(instruction);
    }
}

/// Check that a slot operand fits the opcode's encoded width.
fn check_width(opcode: OpCode, operand: &Operand) -> Result<(), EmitError> {
    let index = match operand {
        Operand::Argument(slot) => slot.index(),
        Operand::Local(slot) => slot.index(),
        _ => return Ok(()),
    };
    match opcode.max_slot_index() {
        Some(max) if index > max => Err(EmitError::OperandTooWide { opcode, index }),
        _ => Ok(()),
    }
}

/// Check an opcode/operand pairing against the grammar.
fn check_shape(opcode: OpCode, operand: &Operand) -> Result<(), EmitError> {
    let expected = opcode
        .operand_kind()
        .ok_or(EmitError::UnsupportedOpCode { opcode })?;
    let found = operand.kind();
    if expected != found {
        return Err(EmitError::UnsupportedOperand {
            opcode,
            expected,
            found,
        });
    }
    Ok(())
}
