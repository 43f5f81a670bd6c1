//! Storage factory backed by a kind-to-storer map.

use std::collections::HashMap;
use std::sync::Arc;

use crate::project::{
    domain::StorageKind,
    ports::{SourceCodeStorer, StorageFactory},
};

/// Registry of storage backends keyed by [`StorageKind`].
#[derive(Clone, Default)]
pub struct StorageRegistry {
    storers: HashMap<StorageKind, Arc<dyn SourceCodeStorer>>,
}

impl StorageRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `storer` for `kind`, replacing any previous registration.
    #[must_use]
    pub fn with_storer(mut self, kind: StorageKind, storer: Arc<dyn SourceCodeStorer>) -> Self {
        self.storers.insert(kind, storer);
        self
    }

    /// Returns the registered kinds in no particular order.
    #[must_use]
    pub fn kinds(&self) -> Vec<StorageKind> {
        self.storers.keys().copied().collect()
    }
}

impl StorageFactory for StorageRegistry {
    fn get(&self, kind: StorageKind) -> Option<Arc<dyn SourceCodeStorer>> {
        self.storers.get(&kind).cloned()
    }
}

impl std::fmt::Debug for StorageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
