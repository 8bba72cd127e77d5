//! Core types shared by the emitter and its callers.
//!
//! - [`TypeHash`]: deterministic identity for types, methods and constructors
//! - [`PrimitiveKind`]: built-in numeric and boolean types
//! - [`TypeRef`]: the semantic type of a slot or stack value
//! - [`MethodRef`] and [`CtorRef`]: call targets carried as instruction operands

mod member_ref;
mod primitive_kind;
mod type_hash;
mod type_ref;

pub use member_ref::{CtorRef, MethodRef};
pub use primitive_kind::PrimitiveKind;
pub use type_hash::{TypeHash, hash_constants, primitives};
pub use type_ref::TypeRef;
