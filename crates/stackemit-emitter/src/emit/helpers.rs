//! Convenience emission used when building factory delegates.
//!
//! Every helper lands in the same append path as [`Emitter::emit`], so the
//! grammar and the stack-type model apply unchanged.

use std::ops::Range;

use stackemit_core::{CtorRef, MethodRef, TypeRef};

use super::{EmitError, Emitter};
use crate::bytecode::{ArgSlot, OpCode, Operand};

impl Emitter {
    /// Append `ldnull`.
    pub fn push_null(&mut self) {
        self.append_valid(OpCode::Ldnull, Operand::None, None);
    }

    /// Call `method`, using `callvirt` when it is virtual.
    pub fn call(&mut self, method: &MethodRef) {
        let opcode = if method.is_virtual {
            OpCode::Callvirt
        } else {
            OpCode::Call
        };
        self.append_valid(opcode, Operand::Method(method.clone()), None);
    }

    /// Append `newobj` for `ctor`.
    pub fn new_object(&mut self, ctor: &CtorRef) {
        self.append_valid(OpCode::Newobj, Operand::Constructor(ctor.clone()), None);
    }

    /// Append `newarr` with `element` as the element type.
    ///
    /// The length must already be on the stack.
    pub fn new_array(&mut self, element: &TypeRef) {
        self.append_valid(OpCode::Newarr, Operand::Type(element.clone()), None);
    }

    pub fn cast(&mut self, ty: &TypeRef) {
        self.append_valid(OpCode::Castclass, Operand::Type(ty.clone()), None);
    }

    /// `unbox.any` for value types, `castclass` for everything else.
    pub fn unbox_or_cast(&mut self, ty: &TypeRef) {
        let opcode = if ty.is_value_type() {
            OpCode::UnboxAny
        } else {
            OpCode::Castclass
        };
        self.append_valid(opcode, Operand::Type(ty.clone()), None);
    }

    /// `box` for value types; reference types are left alone.
    pub fn box_if_value_type(&mut self, ty: &TypeRef) {
        if ty.is_value_type() {
            self.append_valid(OpCode::Box, Operand::Type(ty.clone()), None);
        }
    }

    /// Push every argument in `range`, in order.
    ///
    /// The whole range is checked before anything is appended.
    pub fn push_arguments(&mut self, range: Range<u32>) -> Result<(), EmitError> {
        if let Some(last) = range.clone().last() {
            let (opcode, operand) = super::argument_load(ArgSlot::new(last));
            self.resolve_slot(opcode, &operand)?;
        }
        for index in range {
            self.push_argument(index)?;
        }
        Ok(())
    }

    /// Load element `index` of the constant array held in argument 0 and
    /// convert it to `ty`.
    ///
    /// Emits `ldarg.0`, the shortest push of `index`, `ldelem.ref` and then
    /// [`unbox_or_cast`](Self::unbox_or_cast).
    pub fn push_constant(&mut self, index: u32, ty: &TypeRef) -> Result<(), EmitError> {
        let value = i32::try_from(index).map_err(|_| EmitError::OperandTooWide {
            opcode: OpCode::LdcI4,
            index,
        })?;
        self.push_argument(0)?;
        self.push_int(value);
        self.append_valid(OpCode::LdelemRef, Operand::None, None);
        self.unbox_or_cast(ty);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constants_emitter() -> Emitter {
        Emitter::new(vec![TypeRef::array_of(TypeRef::Object)])
    }

    #[test]
    fn call_picks_dispatch() {
        let scope = TypeRef::class("Scope");
        let mut emitter = Emitter::new(Vec::new());

        emitter.call(&MethodRef::new(scope.clone(), "Dispose").virtual_dispatch());
        emitter.call(&MethodRef::new(scope.clone(), "Current").as_static().returns(scope.clone()));

        emitter
            .instructions()
            .assert_opcodes(&[OpCode::Callvirt, OpCode::Call]);
        assert_eq!(emitter.stack_type(), Some(&scope));
    }

    #[test]
    fn unbox_or_cast_by_kind() {
        let mut emitter = Emitter::new(Vec::new());
        emitter.unbox_or_cast(&TypeRef::INT32);
        emitter.unbox_or_cast(&TypeRef::value_type("Point"));
        emitter.unbox_or_cast(&TypeRef::class("Service"));

        emitter.instructions().assert_opcodes(&[
            OpCode::UnboxAny,
            OpCode::UnboxAny,
            OpCode::Castclass,
        ]);
        assert_eq!(emitter.stack_type(), Some(&TypeRef::class("Service")));
    }

    #[test]
    fn box_only_value_types() {
        let mut emitter = Emitter::new(Vec::new());
        emitter.box_if_value_type(&TypeRef::class("Service"));
        assert!(emitter.instructions().is_empty());

        emitter.box_if_value_type(&TypeRef::INT32);
        emitter.instructions().assert_opcodes(&[OpCode::Box]);
        assert_eq!(emitter.stack_type(), Some(&TypeRef::Object));
    }

    #[test]
    fn new_array_and_object() {
        let service = TypeRef::class("Service");
        let mut emitter = Emitter::new(Vec::new());

        emitter.push_int(3);
        emitter.new_array(&service);
        assert_eq!(emitter.stack_type(), Some(&TypeRef::array_of(service.clone())));

        emitter.new_object(&CtorRef::new(service.clone(), []));
        assert_eq!(emitter.stack_type(), Some(&service));

        emitter.push_null();
        assert_eq!(emitter.stack_type(), Some(&TypeRef::Object));
    }

    #[test]
    fn push_arguments_in_order() {
        let mut emitter = Emitter::new(vec![TypeRef::Object; 6]);
        emitter.push_arguments(1..6).unwrap();

        emitter.instructions().assert_opcodes(&[
            OpCode::Ldarg1,
            OpCode::Ldarg2,
            OpCode::Ldarg3,
            OpCode::LdargS,
            OpCode::LdargS,
        ]);
    }

    #[test]
    fn push_arguments_checks_whole_range_first() {
        let mut emitter = Emitter::new(vec![TypeRef::Object; 2]);
        assert_eq!(
            emitter.push_arguments(0..3),
            Err(EmitError::ArgumentOutOfRange { index: 2, count: 2 })
        );
        assert!(emitter.instructions().is_empty());
    }

    #[test]
    fn push_arguments_rejects_unencodable_tail_up_front() {
        let mut emitter = Emitter::new(vec![TypeRef::Object; 70_000]);
        assert_eq!(
            emitter.push_arguments(65_530..65_540),
            Err(EmitError::OperandTooWide {
                opcode: OpCode::Ldarg,
                index: 65_539
            })
        );
        assert!(emitter.instructions().is_empty());
    }

    #[test]
    fn push_constant_sequence() {
        let mut emitter = constants_emitter();
        emitter.push_constant(2, &TypeRef::class("Service")).unwrap();
        emitter.push_constant(20, &TypeRef::INT32).unwrap();

        emitter.instructions().assert_opcodes(&[
            OpCode::Ldarg0,
            OpCode::LdcI4_2,
            OpCode::LdelemRef,
            OpCode::Castclass,
            OpCode::Ldarg0,
            OpCode::LdcI4S,
            OpCode::LdelemRef,
            OpCode::UnboxAny,
        ]);
        assert_eq!(emitter.stack_type(), Some(&TypeRef::INT32));
    }

    #[test]
    fn push_constant_needs_argument_zero() {
        let mut emitter = Emitter::new(Vec::new());
        assert_eq!(
            emitter.push_constant(0, &TypeRef::Object),
            Err(EmitError::ArgumentOutOfRange { index: 0, count: 0 })
        );
        assert!(emitter.instructions().is_empty());
    }
}
