//! Depth-1 model of the operand stack.
//!
//! The emitter only tracks the type of whatever the last modeled push left on
//! top. Instructions whose effect is not modeled (stores, `pop`, `ret`,
//! arithmetic) leave the tracked type as it was.
//!
//! With depth 1 the array under an `ldelem.ref` index is never visible, so
//! reference element loads are modeled as `object`.

use stackemit_core::{PrimitiveKind, TypeRef};

use crate::bytecode::{OpCode, Operand};

/// What an instruction does to the tracked top-of-stack type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StackEffect {
    /// A value of this type is now on top.
    Push(TypeRef),
    /// Not modeled.
    Unchanged,
}

impl StackEffect {
    /// Compute the effect of `opcode`.
    ///
    /// `slot_type` is the declared type of the argument or local the
    /// instruction addresses, already resolved by the caller.
    pub(crate) fn of(opcode: OpCode, operand: &Operand, slot_type: Option<&TypeRef>) -> Self {
        use OpCode::*;
        match opcode {
            LdcI4_0 | LdcI4_1 | LdcI4_2 | LdcI4_3 | LdcI4_4 | LdcI4_5 | LdcI4_6 | LdcI4_7
            | LdcI4_8 | LdcI4 | Ceq | Cgt | Clt | Ldlen | ConvI4 => StackEffect::Push(TypeRef::INT32),
            LdcI4S => StackEffect::Push(TypeRef::INT8),

            Ldarg0 | Ldarg1 | Ldarg2 | Ldarg3 | LdargS | Ldarg | Ldloc0 | Ldloc1 | Ldloc2
            | Ldloc3 | LdlocS | Ldloc => match slot_type {
                Some(ty) => StackEffect::Push(ty.clone()),
                None => StackEffect::Unchanged,
            },
            LdargaS | Ldarga | LdlocaS | Ldloca => match slot_type {
                Some(ty) => StackEffect::Push(TypeRef::by_ref(ty.clone())),
                None => StackEffect::Unchanged,
            },

            Ldnull | Box | LdelemRef => StackEffect::Push(TypeRef::Object),
            Ldftn => StackEffect::Push(TypeRef::Primitive(PrimitiveKind::Int64)),

            Ldelem | Castclass | Isinst | UnboxAny => match operand {
                Operand::Type(ty) => StackEffect::Push(ty.clone()),
                _ => StackEffect::Unchanged,
            },
            Newarr => match operand {
                Operand::Type(ty) => StackEffect::Push(TypeRef::array_of(ty.clone())),
                _ => StackEffect::Unchanged,
            },
            Newobj => match operand {
                Operand::Constructor(ctor) => StackEffect::Push(ctor.owner.clone()),
                _ => StackEffect::Unchanged,
            },
            Call | Callvirt => match operand {
                Operand::Method(method) if !method.return_type.is_void() => {
                    StackEffect::Push(method.return_type.clone())
                }
                _ => StackEffect::Unchanged,
            },

            _ => StackEffect::Unchanged,
        }
    }

    pub(crate) fn apply(self, top: &mut Option<TypeRef>) {
        match self {
            StackEffect::Push(ty) => *top = Some(ty),
            StackEffect::Unchanged => {}
        }
    }
}
