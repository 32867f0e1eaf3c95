//! InMemoryStore - RwLock-backed store for testing and embedding.

use std::sync::{Arc, RwLock};

use super::{Artifact, Store};
use crate::error::StoreError;

/// In-memory store. Clone-friendly via Arc: clones share the same value.
#[derive(Clone)]
pub struct InMemoryStore<T> {
    value: Arc<RwLock<Option<T>>>,
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryStore<T> {
    /// An empty store; `load` returns the artifact default until the first save.
    pub fn new() -> Self {
        Self {
            value: Arc::new(RwLock::new(None)),
        }
    }

    /// A store that already holds `value`.
    pub fn with_value(value: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(Some(value))),
        }
    }
}

impl<T: Artifact> Store<T> for InMemoryStore<T> {
    fn load(&self) -> Result<T, StoreError> {
        let value = self
            .value
            .read()
            .map_err(|_| StoreError::LockPoisoned("load"))?;
        Ok(value.clone().unwrap_or_default())
    }

    fn save(&self, value: &T) -> Result<(), StoreError> {
        let mut slot = self
            .value
            .write()
            .map_err(|_| StoreError::LockPoisoned("save"))?;
        *slot = Some(value.clone());
        Ok(())
    }
}
