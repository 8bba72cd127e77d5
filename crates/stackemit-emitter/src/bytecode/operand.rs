//! Instruction operands.

use std::fmt;

use stackemit_core::{CtorRef, MethodRef, TypeRef};

/// Index of a method argument.
///
/// Arguments are positional, so callers may name any index; the emitter checks
/// it against the declared argument list when the instruction is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArgSlot(u32);

impl ArgSlot {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Handle to a local declared with [`Emitter::declare_local`].
///
/// Only the emitter hands these out. The index equals the declaration order
/// and is never reused.
///
/// [`Emitter::declare_local`]: crate::Emitter::declare_local
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalSlot(u32);

impl LocalSlot {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

/// The kind of operand an opcode accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    None,
    Int8,
    Int32,
    Argument,
    Local,
    Method,
    Type,
    Constructor,
}

impl OperandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperandKind::None => "no operand",
            OperandKind::Int8 => "int8 operand",
            OperandKind::Int32 => "int32 operand",
            OperandKind::Argument => "argument slot",
            OperandKind::Local => "local slot",
            OperandKind::Method => "method reference",
            OperandKind::Type => "type reference",
            OperandKind::Constructor => "constructor reference",
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value an instruction carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Operand {
    #[default]
    None,
    Int8(i8),
    Int32(i32),
    Argument(ArgSlot),
    Local(LocalSlot),
    Method(MethodRef),
    Type(TypeRef),
    Constructor(CtorRef),
}

impl Operand {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::None => OperandKind::None,
            Operand::Int8(_) => OperandKind::Int8,
            Operand::Int32(_) => OperandKind::Int32,
            Operand::Argument(_) => OperandKind::Argument,
            Operand::Local(_) => OperandKind::Local,
            Operand::Method(_) => OperandKind::Method,
            Operand::Type(_) => OperandKind::Type,
            Operand::Constructor(_) => OperandKind::Constructor,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Operand::None)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Int8(value) => write!(f, "{}", value),
            Operand::Int32(value) => write!(f, "{}", value),
            Operand::Argument(slot) => write!(f, "{}", slot.index()),
            Operand::Local(slot) => write!(f, "{}", slot.index()),
            Operand::Method(method) => write!(f, "{}", method),
            Operand::Type(ty) => write!(f, "{}", ty),
            Operand::Constructor(ctor) => write!(f, "{}", ctor),
        }
    }
}

impl From<i8> for Operand {
    fn from(value: i8) -> Self {
        Operand::Int8(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Int32(value)
    }
}

impl From<ArgSlot> for Operand {
    fn from(slot: ArgSlot) -> Self {
        Operand::Argument(slot)
    }
}

impl From<LocalSlot> for Operand {
    fn from(slot: LocalSlot) -> Self {
        Operand::Local(slot)
    }
}

impl From<MethodRef> for Operand {
    fn from(method: MethodRef) -> Self {
        Operand::Method(method)
    }
}

impl From<TypeRef> for Operand {
    fn from(ty: TypeRef) -> Self {
        Operand::Type(ty)
    }
}

impl From<CtorRef> for Operand {
    fn from(ctor: CtorRef) -> Self {
        Operand::Constructor(ctor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Operand::None.kind(), OperandKind::None);
        assert_eq!(Operand::from(9i8).kind(), OperandKind::Int8);
        assert_eq!(Operand::from(128).kind(), OperandKind::Int32);
        assert_eq!(Operand::from(ArgSlot::new(4)).kind(), OperandKind::Argument);
        assert_eq!(Operand::from(TypeRef::Object).kind(), OperandKind::Type);
    }

    #[test]
    fn display() {
        assert_eq!(Operand::None.to_string(), "");
        assert_eq!(Operand::Int8(-5).to_string(), "-5");
        assert_eq!(Operand::Argument(ArgSlot::new(1)).to_string(), "1");
        assert_eq!(Operand::Local(LocalSlot::new(300)).to_string(), "300");
        assert_eq!(Operand::Type(TypeRef::array_of(TypeRef::Object)).to_string(), "object[]");
    }
}
