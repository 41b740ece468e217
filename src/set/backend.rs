//! Set Backends
//!
//! The storage capability behind the set service. Implementations are shared across
//! every in-flight request, so they must be safe to call concurrently.

use dashmap::DashSet;

use crate::error::SetError;

/// Storage capability consulted by the set service.
///
/// Every method reports whether the item was a member *before* the call.
pub trait SetBackend: Send + Sync {
    fn add(&self, item: &str) -> Result<bool, SetError>;

    fn remove(&self, item: &str) -> Result<bool, SetError>;

    fn contains(&self, item: &str) -> Result<bool, SetError>;
}

/// Backend that rejects every operation.
///
/// Useful as a placeholder when a node is started without storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnimplementedSet;

impl SetBackend for UnimplementedSet {
    fn add(&self, _item: &str) -> Result<bool, SetError> {
        Err(SetError::NotImplemented)
    }

    fn remove(&self, _item: &str) -> Result<bool, SetError> {
        Err(SetError::NotImplemented)
    }

    fn contains(&self, _item: &str) -> Result<bool, SetError> {
        Err(SetError::NotImplemented)
    }
}

/// In-memory hash set with no persistence.
#[derive(Debug, Default)]
pub struct MemorySet {
    items: DashSet<String>,
}

impl MemorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SetBackend for MemorySet {
    fn add(&self, item: &str) -> Result<bool, SetError> {
        // insert() is atomic per shard, so concurrent adds of one item agree on who was first
        Ok(!self.items.insert(item.to_string()))
    }

    fn remove(&self, item: &str) -> Result<bool, SetError> {
        Ok(self.items.remove(item).is_some())
    }

    fn contains(&self, item: &str) -> Result<bool, SetError> {
        Ok(self.items.contains(item))
    }
}
