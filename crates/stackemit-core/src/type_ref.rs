//! TypeRef - the semantic type of a slot or stack value.
//!
//! Callers describe argument and local types with `TypeRef`, and the emitter
//! reports the modeled top-of-stack type with it.
//!
//! # Example
//!
//! ```
//! use stackemit_core::TypeRef;
//!
//! let service = TypeRef::class("App::Service");
//! let services = TypeRef::array_of(service.clone());
//! assert_eq!(services.element_type(), Some(&service));
//! assert_eq!(services.to_string(), "App::Service[]");
//! ```

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use crate::{PrimitiveKind, TypeHash, primitives};

/// A type as seen by the emitter.
///
/// Named types are compared by name and value-type flag; two `TypeRef`s with
/// the same spelling denote the same type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Built-in numeric, boolean or void type.
    Primitive(PrimitiveKind),
    /// The root reference type.
    Object,
    /// The built-in string type.
    String,
    /// A user type, either a reference type or a value type.
    Named {
        name: Arc<str>,
        is_value_type: bool,
    },
    /// Single-dimension array of the element type.
    Array(Box<TypeRef>),
    /// Managed pointer to a slot of the target type.
    ByRef(Box<TypeRef>),
}

impl TypeRef {
    pub const VOID: TypeRef = TypeRef::Primitive(PrimitiveKind::Void);
    pub const INT8: TypeRef = TypeRef::Primitive(PrimitiveKind::Int8);
    pub const INT32: TypeRef = TypeRef::Primitive(PrimitiveKind::Int32);
    pub const INT64: TypeRef = TypeRef::Primitive(PrimitiveKind::Int64);
    pub const BOOL: TypeRef = TypeRef::Primitive(PrimitiveKind::Bool);

    /// A reference type with the given qualified name.
    pub fn class(name: impl Into<Arc<str>>) -> Self {
        TypeRef::Named {
            name: name.into(),
            is_value_type: false,
        }
    }

    /// A value type with the given qualified name.
    pub fn value_type(name: impl Into<Arc<str>>) -> Self {
        TypeRef::Named {
            name: name.into(),
            is_value_type: true,
        }
    }

    /// Array of `element`.
    pub fn array_of(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    /// Managed pointer to `target`.
    pub fn by_ref(target: TypeRef) -> Self {
        TypeRef::ByRef(Box::new(target))
    }

    /// Whether values of this type are stored inline rather than by reference.
    ///
    /// Value types must be boxed before they can be treated as `object` and
    /// unboxed (not cast) when coming back.
    pub fn is_value_type(&self) -> bool {
        match self {
            TypeRef::Primitive(kind) => !kind.is_void(),
            TypeRef::Named { is_value_type, .. } => *is_value_type,
            TypeRef::Object | TypeRef::String | TypeRef::Array(_) | TypeRef::ByRef(_) => false,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Primitive(PrimitiveKind::Void))
    }

    /// Element type of an array, or the target of a by-ref.
    pub fn element_type(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Array(element) | TypeRef::ByRef(element) => Some(element),
            _ => None,
        }
    }

    /// Deterministic identity used by the materializer for type tokens.
    pub fn type_hash(&self) -> TypeHash {
        match self {
            TypeRef::Primitive(kind) => kind.type_hash(),
            TypeRef::Object => primitives::OBJECT,
            TypeRef::String => primitives::STRING,
            TypeRef::Named { name, .. } => TypeHash::from_name(name),
            TypeRef::Array(element) => TypeHash::array_of(element.type_hash()),
            TypeRef::ByRef(target) => TypeHash::by_ref(target.type_hash()),
        }
    }
}

impl From<PrimitiveKind> for TypeRef {
    fn from(kind: PrimitiveKind) -> Self {
        TypeRef::Primitive(kind)
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(kind) => write!(f, "{}", kind),
            TypeRef::Object => write!(f, "object"),
            TypeRef::String => write!(f, "string"),
            TypeRef::Named { name, .. } => write!(f, "{}", name),
            TypeRef::Array(element) => write!(f, "{}[]", element),
            TypeRef::ByRef(target) => write!(f, "{}&", target),
        }
    }
}
