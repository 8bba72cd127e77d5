//! Local-slot table.
//!
//! Locals are declared in order and never removed, so a slot's index is its
//! declaration position and stays valid for the life of the emitter.

use stackemit_core::TypeRef;

use super::EmitError;
use crate::bytecode::LocalSlot;

/// Append-only table of declared locals.
#[derive(Debug, Clone, Default)]
pub struct LocalTable {
    types: Vec<TypeRef>,
}

impl LocalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new local, returning its slot.
    pub fn declare(&mut self, ty: TypeRef) -> LocalSlot {
        let slot = LocalSlot::new(self.types.len() as u32);
        self.types.push(ty);
        slot
    }

    /// Declared type of a slot.
    pub fn get(&self, index: u32) -> Result<&TypeRef, EmitError> {
        self.types
            .get(index as usize)
            .ok_or(EmitError::LocalOutOfRange {
                index,
                count: self.types.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> &[TypeRef] {
        &self.types
    }

    pub fn into_types(self) -> Vec<TypeRef> {
        self.types
    }
}
