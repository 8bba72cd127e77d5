//! Deterministic hash-based identity for emitted operands.
//!
//! [`TypeHash`] is a 64-bit hash that identifies a type, method or constructor
//! referenced by an instruction. The materializer uses it as a token key, so it
//! must be stable across runs and independent of the order in which callers
//! first mention a type.
//!
//! # Hash Computation
//!
//! Uses XXHash64 with domain-specific mixing constants so that a type, a method
//! and a constructor spelled the same way never share a hash.
//!
//! # Examples
//!
//! ```
//! use stackemit_core::TypeHash;
//!
//! let int_hash = TypeHash::from_name("int");
//! assert_eq!(int_hash, TypeHash::from_name("int"));
//!
//! let owner = TypeHash::from_name("Foo");
//! let a = TypeHash::from_method(owner, "Create", &[int_hash]);
//! let b = TypeHash::from_method(owner, "Create", &[]);
//! assert_ne!(a, b);
//! ```

use std::fmt;

use xxhash_rust::const_xxh64;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Separator constant used when folding parameter lists.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for type hashes
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for method hashes
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for constructor hashes
    pub const CONSTRUCTOR: u64 = 0x9a7f3d5e2b8c4601;

    /// Domain marker for array types
    pub const ARRAY: u64 = 0x5ea77ffbcdf5f302;

    /// Domain marker for by-ref types
    pub const BY_REF: u64 = 0x3e9f5d2a8c7b1403;

    /// Parameter position mixing constants.
    /// Each position gets its own constant so parameter order matters.
    pub const PARAM_MARKERS: [u64; 16] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
        0x7c3e9f2a5b8d1403,
        0x5d8c7b4a3e9f2106,
        0x3f1e9d8c7b5a4203,
        0x1a2b3c4d5e6f7089,
        0x9f8e7d6c5b4a3210,
        0x2468ace013579bdf,
        0xfdb97531eca86420,
        0x123456789abcdef0,
    ];
}

/// A deterministic 64-bit hash identifying a type, method or constructor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a qualified type name.
    ///
    /// This is a `const fn` so well-known hashes can be computed at compile time.
    #[inline]
    pub const fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ const_xxh64::xxh64(name.as_bytes(), 0))
    }

    /// Create a method hash from owner type, method name and parameter type hashes.
    ///
    /// Parameter order matters: `(int, object)` differs from `(object, int)`.
    #[inline]
    pub fn from_method(owner: TypeHash, name: &str, param_hashes: &[TypeHash]) -> Self {
        let seed = hash_constants::METHOD ^ owner.0 ^ xxh64(name.as_bytes(), 0);
        TypeHash(mix_params(seed, param_hashes))
    }

    /// Create a constructor hash from owner type and parameter type hashes.
    ///
    /// Constructors have no name, so they're identified by owner + params.
    #[inline]
    pub fn from_constructor(owner: TypeHash, param_hashes: &[TypeHash]) -> Self {
        TypeHash(mix_params(hash_constants::CONSTRUCTOR ^ owner.0, param_hashes))
    }

    /// Hash of the array type whose elements have the given hash.
    #[inline]
    pub fn array_of(element: TypeHash) -> Self {
        TypeHash(mix_params(hash_constants::ARRAY, &[element]))
    }

    /// Hash of a by-ref (managed pointer) to the given type.
    #[inline]
    pub fn by_ref(target: TypeHash) -> Self {
        TypeHash(mix_params(hash_constants::BY_REF, &[target]))
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

fn mix_params(seed: u64, param_hashes: &[TypeHash]) -> u64 {
    let mut hash = seed;
    for (i, param) in param_hashes.iter().enumerate() {
        let marker = hash_constants::PARAM_MARKERS
            .get(i)
            .copied()
            .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
        // wrapping_mul keeps the fold order-sensitive, unlike a plain XOR
        hash = hash.wrapping_mul(hash_constants::SEP).wrapping_add(marker ^ param.0);
    }
    hash
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Well-known hashes, computed at compile time from [`TypeHash::from_name`].
pub mod primitives {
    use super::TypeHash;

    /// Hash for `void`
    pub const VOID: TypeHash = TypeHash::from_name("void");
    /// Hash for `bool`
    pub const BOOL: TypeHash = TypeHash::from_name("bool");
    /// Hash for `int8`
    pub const INT8: TypeHash = TypeHash::from_name("int8");
    /// Hash for `int16`
    pub const INT16: TypeHash = TypeHash::from_name("int16");
    /// Hash for `int` (32-bit signed integer)
    pub const INT32: TypeHash = TypeHash::from_name("int");
    /// Hash for `int64`
    pub const INT64: TypeHash = TypeHash::from_name("int64");
    /// Hash for `uint8`
    pub const UINT8: TypeHash = TypeHash::from_name("uint8");
    /// Hash for `uint16`
    pub const UINT16: TypeHash = TypeHash::from_name("uint16");
    /// Hash for `uint` (32-bit unsigned integer)
    pub const UINT32: TypeHash = TypeHash::from_name("uint");
    /// Hash for `uint64`
    pub const UINT64: TypeHash = TypeHash::from_name("uint64");
    /// Hash for `float`
    pub const FLOAT: TypeHash = TypeHash::from_name("float");
    /// Hash for `double`
    pub const DOUBLE: TypeHash = TypeHash::from_name("double");
    /// Hash for the root reference type `object`
    pub const OBJECT: TypeHash = TypeHash::from_name("object");
    /// Hash for `string`
    pub const STRING: TypeHash = TypeHash::from_name("string");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_hash_determinism() {
        assert_eq!(TypeHash::from_name("int"), TypeHash::from_name("int"));
        assert_eq!(
            TypeHash::from_name("App::Service"),
            TypeHash::from_name("App::Service")
        );
    }

    #[test]
    fn type_hash_uniqueness() {
        let int_hash = TypeHash::from_name("int");
        let object_hash = TypeHash::from_name("object");
        let service_hash = TypeHash::from_name("Service");

        assert_ne!(int_hash, object_hash);
        assert_ne!(int_hash, service_hash);
        assert_ne!(object_hash, service_hash);
    }

    #[test]
    fn method_hash_parameter_order_matters() {
        let owner = TypeHash::from_name("Factory");
        let a = TypeHash::from_method(owner, "Create", &[primitives::INT32, primitives::OBJECT]);
        let b = TypeHash::from_method(owner, "Create", &[primitives::OBJECT, primitives::INT32]);
        assert_ne!(a, b);
    }

    #[test]
    fn method_hash_includes_owner() {
        let a = TypeHash::from_method(TypeHash::from_name("A"), "Get", &[]);
        let b = TypeHash::from_method(TypeHash::from_name("B"), "Get", &[]);
        assert_ne!(a, b);
    }

    #[test]
    fn constructor_differs_from_method() {
        let owner = TypeHash::from_name("Service");
        let ctor = TypeHash::from_constructor(owner, &[primitives::INT32]);
        let method = TypeHash::from_method(owner, "", &[primitives::INT32]);
        assert_ne!(ctor, method);
    }

    #[test]
    fn composite_hashes() {
        let array = TypeHash::array_of(primitives::INT32);
        let by_ref = TypeHash::by_ref(primitives::INT32);
        assert_ne!(array, by_ref);
        assert_ne!(array, primitives::INT32);
        assert_eq!(array, TypeHash::array_of(primitives::INT32));
    }

    #[test]
    fn primitive_constants_match_from_name() {
        assert_eq!(primitives::INT8, TypeHash::from_name("int8"));
        assert_eq!(primitives::INT32, TypeHash::from_name("int"));
        assert!(!primitives::VOID.is_empty());
        assert!(TypeHash::EMPTY.is_empty());
    }

    #[test]
    fn hash_formatting() {
        let hash = TypeHash::from_name("int");
        assert!(format!("{}", hash).starts_with("0x"));
        assert!(format!("{:?}", hash).starts_with("TypeHash(0x"));
    }
}
