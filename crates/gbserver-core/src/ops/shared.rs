use std::sync::{Arc, PoisonError, RwLock};

use super::store::Store;

/// Process-wide handle to the store behind one reader/writer lock
///
/// Read-only operations go through `read`, mutating operations through
/// `write`; each call holds the lock for the whole closure so validation,
/// mutation and response shaping see one consistent graph. A poisoned lock
/// is recovered: ops only mutate after every check has passed.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` under the read lock
    pub fn read<T>(&self, f: impl FnOnce(&Store) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` under the write lock
    pub fn write<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Clone of the current store contents
    pub fn snapshot(&self) -> Store {
        self.read(Store::clone)
    }
}

impl From<Store> for SharedStore {
    fn from(store: Store) -> Self {
        Self::new(store)
    }
}
