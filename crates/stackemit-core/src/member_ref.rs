//! Method and constructor references carried as instruction operands.

use std::fmt;
use std::sync::Arc;

use crate::{TypeHash, TypeRef};

/// A callable method.
///
/// # Example
///
/// ```
/// use stackemit_core::{MethodRef, TypeRef};
///
/// let get = MethodRef::new(TypeRef::class("Scope"), "GetInstance")
///     .with_params([TypeRef::INT32])
///     .returns(TypeRef::Object)
///     .virtual_dispatch();
/// assert!(get.is_virtual);
/// assert_eq!(get.to_string(), "Scope::GetInstance");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    /// Declaring type
    pub owner: TypeRef,
    /// Method name
    pub name: Arc<str>,
    /// Parameter types, excluding the receiver
    pub params: Vec<TypeRef>,
    /// Return type (`void` when nothing is pushed)
    pub return_type: TypeRef,
    /// Dispatched through the receiver's vtable
    pub is_virtual: bool,
    /// Called without a receiver
    pub is_static: bool,
}

impl MethodRef {
    /// A non-virtual instance method with no parameters returning void.
    pub fn new(owner: TypeRef, name: impl Into<Arc<str>>) -> Self {
        Self {
            owner,
            name: name.into(),
            params: Vec::new(),
            return_type: TypeRef::VOID,
            is_virtual: false,
            is_static: false,
        }
    }

    pub fn with_params(mut self, params: impl IntoIterator<Item = TypeRef>) -> Self {
        self.params = params.into_iter().collect();
        self
    }

    pub fn returns(mut self, return_type: TypeRef) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn virtual_dispatch(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self.is_virtual = false;
        self
    }

    /// Hash of owner, name and parameter list.
    pub fn type_hash(&self) -> TypeHash {
        let params: Vec<TypeHash> = self.params.iter().map(TypeRef::type_hash).collect();
        TypeHash::from_method(self.owner.type_hash(), &self.name, &params)
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.owner, self.name)
    }
}

/// A constructor of `owner`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CtorRef {
    pub owner: TypeRef,
    pub params: Vec<TypeRef>,
}

impl CtorRef {
    pub fn new(owner: TypeRef, params: impl IntoIterator<Item = TypeRef>) -> Self {
        Self {
            owner,
            params: params.into_iter().collect(),
        }
    }

    /// Hash of owner and parameter list.
    pub fn type_hash(&self) -> TypeHash {
        let params: Vec<TypeHash> = self.params.iter().map(TypeRef::type_hash).collect();
        TypeHash::from_constructor(self.owner.type_hash(), &params)
    }
}

impl fmt::Display for CtorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::.ctor", self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_builder_defaults() {
        let method = MethodRef::new(TypeRef::class("Foo"), "Run");
        assert!(method.return_type.is_void());
        assert!(method.params.is_empty());
        assert!(!method.is_virtual);
        assert!(!method.is_static);
    }

    #[test]
    fn static_clears_virtual() {
        let method = MethodRef::new(TypeRef::class("Foo"), "Run")
            .virtual_dispatch()
            .as_static();
        assert!(method.is_static);
        assert!(!method.is_virtual);
    }

    #[test]
    fn overloads_hash_differently() {
        let owner = TypeRef::class("Foo");
        let a = MethodRef::new(owner.clone(), "Run").with_params([TypeRef::INT32]);
        let b = MethodRef::new(owner, "Run").with_params([TypeRef::Object]);
        assert_ne!(a.type_hash(), b.type_hash());
    }

    #[test]
    fn ctor_display_and_hash() {
        let ctor = CtorRef::new(TypeRef::class("Foo"), [TypeRef::String]);
        assert_eq!(ctor.to_string(), "Foo::.ctor");
        assert_eq!(
            ctor.type_hash(),
            CtorRef::new(TypeRef::class("Foo"), [TypeRef::String]).type_hash()
        );
        assert_ne!(
            ctor.type_hash(),
            CtorRef::new(TypeRef::class("Foo"), []).type_hash()
        );
    }
}
