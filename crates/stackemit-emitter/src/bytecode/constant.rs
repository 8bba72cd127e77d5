//! Constant table for generated method bodies.
//!
//! Values a generated body cannot express as instructions (service instances,
//! delegates, boxed configuration) live in a constant array passed as
//! argument 0. The pool hands out stable indices into that array and
//! [`Emitter::push_constant`] loads them back.
//!
//! [`Emitter::push_constant`]: crate::Emitter::push_constant

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Deduplicating, index-stable table of constants.
#[derive(Debug, Clone)]
pub struct ConstantPool<T> {
    /// The constants, in index order.
    constants: Vec<T>,
    /// Deduplication index: maps constant to its index.
    index: FxHashMap<T, u32>,
}

impl<T> Default for ConstantPool<T> {
    fn default() -> Self {
        Self {
            constants: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<T: Clone + Eq + Hash> ConstantPool<T> {
    /// Create a new empty constant pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a constant pool with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            constants: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Add or get existing constant, returns index.
    pub fn add(&mut self, constant: T) -> u32 {
        if let Some(&idx) = self.index.get(&constant) {
            return idx;
        }

        let idx = self.constants.len() as u32;
        self.index.insert(constant.clone(), idx);
        self.constants.push(constant);
        idx
    }

    /// Get constant by index.
    pub fn get(&self, index: u32) -> Option<&T> {
        self.constants.get(index as usize)
    }

    /// Index of a constant already in the pool.
    pub fn index_of(&self, constant: &T) -> Option<u32> {
        self.index.get(constant).copied()
    }

    /// All constants in index order, ready to become the argument-0 array.
    pub fn constants(&self) -> &[T] {
        &self.constants
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    /// Consume the pool, returning the constants in index order.
    pub fn into_constants(self) -> Vec<T> {
        self.constants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplication() {
        let mut pool = ConstantPool::new();
        let a = pool.add("connection-string");
        let b = pool.add("timeout");
        let c = pool.add("connection-string");

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(c, a);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn lookup() {
        let mut pool = ConstantPool::with_capacity(4);
        pool.add(42u64);
        pool.add(7u64);

        assert_eq!(pool.get(1), Some(&7));
        assert_eq!(pool.get(2), None);
        assert_eq!(pool.index_of(&42), Some(0));
        assert_eq!(pool.index_of(&99), None);
        assert_eq!(pool.constants(), &[42, 7]);
        assert_eq!(pool.into_constants(), vec![42, 7]);
    }

    #[test]
    fn empty_pool() {
        let pool: ConstantPool<String> = ConstantPool::new();
        assert!(pool.is_empty());
        assert!(pool.constants().is_empty());
    }
}
