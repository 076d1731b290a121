//! Flat symbol table for one compile pass.

use std::collections::BTreeMap;

/// Variable name → non-negative integer value.
///
/// There is a single scope: loop bodies see the same table as the code
/// around them. Assigning an existing name overwrites it.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    bindings: BTreeMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, returning the previous value if any.
    pub fn define(&mut self, name: &str, value: u32) -> Option<u32> {
        self.bindings.insert(name.to_string(), value)
    }

    /// Look up the current value of a variable.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.bindings.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
