//! Operation codes of the target stack machine.
//!
//! [`OpCode`] covers more of the instruction set than the emitter accepts.
//! Opcodes whose [`OpCode::operand_kind`] is `None` (branches, exception flow,
//! `nop`, some arithmetic) are known to the machine but outside the emitter's
//! grammar and are always rejected.

use std::fmt;

use super::OperandKind;

/// Stack machine operation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    // =========================================================================
    // Outside the recognized grammar
    // =========================================================================
    Nop,
    Break,
    Br,
    Brfalse,
    Brtrue,
    Leave,
    Throw,
    Xor,
    Neg,
    Not,

    // =========================================================================
    // Integer constants
    // =========================================================================
    LdcI4_0,
    LdcI4_1,
    LdcI4_2,
    LdcI4_3,
    LdcI4_4,
    LdcI4_5,
    LdcI4_6,
    LdcI4_7,
    LdcI4_8,
    /// Operand: int8
    LdcI4S,
    /// Operand: int32
    LdcI4,

    // =========================================================================
    // Arguments
    // =========================================================================
    Ldarg0,
    Ldarg1,
    Ldarg2,
    Ldarg3,
    /// Operand: 1-byte argument slot
    LdargS,
    /// Operand: 2-byte argument slot
    Ldarg,
    LdargaS,
    Ldarga,
    StargS,
    Starg,

    // =========================================================================
    // Locals
    // =========================================================================
    Ldloc0,
    Ldloc1,
    Ldloc2,
    Ldloc3,
    Stloc0,
    Stloc1,
    Stloc2,
    Stloc3,
    /// Operand: 1-byte local slot
    LdlocS,
    /// Operand: 2-byte local slot
    Ldloc,
    LdlocaS,
    Ldloca,
    StlocS,
    Stloc,

    // =========================================================================
    // Stack and arithmetic
    // =========================================================================
    Ldnull,
    Dup,
    Pop,
    Add,
    Sub,
    Mul,
    Ceq,
    Cgt,
    Clt,
    ConvI4,

    // =========================================================================
    // Arrays
    // =========================================================================
    Newarr,
    Ldlen,
    LdelemRef,
    StelemRef,
    Ldelem,
    Stelem,

    // =========================================================================
    // Objects and calls
    // =========================================================================
    Call,
    Callvirt,
    Ldftn,
    Newobj,
    Castclass,
    Isinst,
    Box,
    UnboxAny,
    Initobj,
    Ret,
}

impl OpCode {
    /// Dedicated constant loads, indexed by the value they push.
    pub const SMALL_INT_LOADS: [OpCode; 9] = [
        OpCode::LdcI4_0,
        OpCode::LdcI4_1,
        OpCode::LdcI4_2,
        OpCode::LdcI4_3,
        OpCode::LdcI4_4,
        OpCode::LdcI4_5,
        OpCode::LdcI4_6,
        OpCode::LdcI4_7,
        OpCode::LdcI4_8,
    ];

    /// Dedicated argument loads, indexed by slot.
    pub const ARG_LOADS: [OpCode; 4] = [OpCode::Ldarg0, OpCode::Ldarg1, OpCode::Ldarg2, OpCode::Ldarg3];

    /// Dedicated local loads, indexed by slot.
    pub const LOCAL_LOADS: [OpCode; 4] = [OpCode::Ldloc0, OpCode::Ldloc1, OpCode::Ldloc2, OpCode::Ldloc3];

    /// Dedicated local stores, indexed by slot.
    pub const LOCAL_STORES: [OpCode; 4] = [OpCode::Stloc0, OpCode::Stloc1, OpCode::Stloc2, OpCode::Stloc3];

    /// The single operand kind this opcode accepts, or `None` if the emitter
    /// does not recognize the opcode at all.
    pub fn operand_kind(self) -> Option<OperandKind> {
        use OpCode::*;
        let kind = match self {
            Nop | Break | Br | Brfalse | Brtrue | Leave | Throw | Xor | Neg | Not => return None,

            LdcI4_0 | LdcI4_1 | LdcI4_2 | LdcI4_3 | LdcI4_4 | LdcI4_5 | LdcI4_6 | LdcI4_7
            | LdcI4_8 | Ldarg0 | Ldarg1 | Ldarg2 | Ldarg3 | Ldloc0 | Ldloc1 | Ldloc2 | Ldloc3
            | Stloc0 | Stloc1 | Stloc2 | Stloc3 | Ldnull | Dup | Pop | Add | Sub | Mul | Ceq
            | Cgt | Clt | ConvI4 | Ldlen | LdelemRef | StelemRef | Ret => OperandKind::None,

            LdcI4S => OperandKind::Int8,
            LdcI4 => OperandKind::Int32,

            LdargS | Ldarg | LdargaS | Ldarga | StargS | Starg => OperandKind::Argument,
            LdlocS | Ldloc | LdlocaS | Ldloca | StlocS | Stloc => OperandKind::Local,

            Call | Callvirt | Ldftn => OperandKind::Method,
            Newarr | Castclass | Isinst | Box | UnboxAny | Initobj | Ldelem | Stelem => {
                OperandKind::Type
            }
            Newobj => OperandKind::Constructor,
        };
        Some(kind)
    }

    /// Whether `emit` accepts this opcode with some operand.
    pub fn is_recognized(self) -> bool {
        self.operand_kind().is_some()
    }

    /// Largest slot index a slot-bearing opcode can encode.
    ///
    /// Short forms carry a 1-byte index, long forms a 2-byte index.
    pub fn max_slot_index(self) -> Option<u32> {
        use OpCode::*;
        match self {
            LdargS | LdargaS | StargS | LdlocS | LdlocaS | StlocS => Some(u8::MAX as u32),
            Ldarg | Ldarga | Starg | Ldloc | Ldloca | Stloc => Some(u16::MAX as u32),
            _ => None,
        }
    }

    /// Slot implied by a dedicated zero-operand form (`ldarg.2`, `stloc.0`, ...).
    pub fn implied_slot(self) -> Option<ImpliedSlot> {
        use OpCode::*;
        let slot = match self {
            Ldarg0 => ImpliedSlot::Argument(0),
            Ldarg1 => ImpliedSlot::Argument(1),
            Ldarg2 => ImpliedSlot::Argument(2),
            Ldarg3 => ImpliedSlot::Argument(3),
            Ldloc0 | Stloc0 => ImpliedSlot::Local(0),
            Ldloc1 | Stloc1 => ImpliedSlot::Local(1),
            Ldloc2 | Stloc2 => ImpliedSlot::Local(2),
            Ldloc3 | Stloc3 => ImpliedSlot::Local(3),
            _ => return None,
        };
        Some(slot)
    }

    /// Size of the encoded opcode itself (prefixed forms take two bytes).
    pub fn opcode_size(self) -> usize {
        use OpCode::*;
        match self {
            Ceq | Cgt | Clt | Ldftn | Ldarg | Ldarga | Starg | Ldloc | Ldloca | Stloc
            | Initobj => 2,
            _ => 1,
        }
    }

    /// Get the size of operands for this opcode in bytes.
    ///
    /// This does NOT include the opcode itself.
    pub fn operand_size(self) -> usize {
        use OpCode::*;
        match self {
            Br | Brfalse | Brtrue | Leave => 4,
            _ => match self.operand_kind() {
                None | Some(OperandKind::None) => 0,
                Some(OperandKind::Int8) => 1,
                Some(OperandKind::Int32) => 4,
                Some(OperandKind::Argument | OperandKind::Local) => {
                    if self.max_slot_index() == Some(u8::MAX as u32) {
                        1
                    } else {
                        2
                    }
                }
                Some(OperandKind::Method | OperandKind::Type | OperandKind::Constructor) => 4,
            },
        }
    }

    /// Get the mnemonic of this opcode.
    pub fn name(self) -> &'static str {
        use OpCode::*;
        match self {
            Nop => "nop",
            Break => "break",
            Br => "br",
            Brfalse => "brfalse",
            Brtrue => "brtrue",
            Leave => "leave",
            Throw => "throw",
            Xor => "xor",
            Neg => "neg",
            Not => "not",
            LdcI4_0 => "ldc.i4.0",
            LdcI4_1 => "ldc.i4.1",
            LdcI4_2 => "ldc.i4.2",
            LdcI4_3 => "ldc.i4.3",
            LdcI4_4 => "ldc.i4.4",
            LdcI4_5 => "ldc.i4.5",
            LdcI4_6 => "ldc.i4.6",
            LdcI4_7 => "ldc.i4.7",
            LdcI4_8 => "ldc.i4.8",
            LdcI4S => "ldc.i4.s",
            LdcI4 => "ldc.i4",
            Ldarg0 => "ldarg.0",
            Ldarg1 => "ldarg.1",
            Ldarg2 => "ldarg.2",
            Ldarg3 => "ldarg.3",
            LdargS => "ldarg.s",
            Ldarg => "ldarg",
            LdargaS => "ldarga.s",
            Ldarga => "ldarga",
            StargS => "starg.s",
            Starg => "starg",
            Ldloc0 => "ldloc.0",
            Ldloc1 => "ldloc.1",
            Ldloc2 => "ldloc.2",
            Ldloc3 => "ldloc.3",
            Stloc0 => "stloc.0",
            Stloc1 => "stloc.1",
            Stloc2 => "stloc.2",
            Stloc3 => "stloc.3",
            LdlocS => "ldloc.s",
            Ldloc => "ldloc",
            LdlocaS => "ldloca.s",
            Ldloca => "ldloca",
            StlocS => "stloc.s",
            Stloc => "stloc",
            Ldnull => "ldnull",
            Dup => "dup",
            Pop => "pop",
            Add => "add",
            Sub => "sub",
            Mul => "mul",
            Ceq => "ceq",
            Cgt => "cgt",
            Clt => "clt",
            ConvI4 => "conv.i4",
            Newarr => "newarr",
            Ldlen => "ldlen",
            LdelemRef => "ldelem.ref",
            StelemRef => "stelem.ref",
            Ldelem => "ldelem",
            Stelem => "stelem",
            Call => "call",
            Callvirt => "callvirt",
            Ldftn => "ldftn",
            Newobj => "newobj",
            Castclass => "castclass",
            Isinst => "isinst",
            Box => "box",
            UnboxAny => "unbox.any",
            Initobj => "initobj",
            Ret => "ret",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Slot addressed by a dedicated zero-operand opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpliedSlot {
    Argument(u32),
    Local(u32),
}
