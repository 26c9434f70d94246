use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use slotmap::{Key, SlotMap};
use uuid::Uuid;

struct StorageInner<H: Key, T> {
    map: SlotMap<H, Arc<T>>,
    lookup: FxHashMap<Uuid, H>,
}

impl<H: Key, T> Default for StorageInner<H, T> {
    fn default() -> Self {
        Self {
            map: SlotMap::default(),
            lookup: FxHashMap::default(),
        }
    }
}

/// Handle-indexed store of shared, immutable assets.
///
/// Every asset is kept behind an `Arc`, so scene nodes can hold on to it
/// without borrowing the store. Assets registered under a UUID are
/// deduplicated: the same UUID always yields the same handle.
pub struct AssetStorage<H: Key, T> {
    inner: RwLock<StorageInner<H, T>>,
}

impl<H: Key, T> Default for AssetStorage<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Key, T> AssetStorage<H, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::default(),
        }
    }

    /// Adds an anonymous asset.
    pub fn add(&self, asset: impl Into<T>) -> H {
        self.inner.write().map.insert(Arc::new(asset.into()))
    }

    /// Returns the handle registered for `uuid`, or runs `load` and registers
    /// its result. A failed load registers nothing.
    pub fn get_or_try_insert<E>(&self, uuid: Uuid, load: impl FnOnce() -> Result<T, E>) -> Result<H, E> {
        if let Some(handle) = self.handle_by_uuid(&uuid) {
            return Ok(handle);
        }

        // Loading happens outside the lock; a racing loader for the same
        // uuid loses and its result is dropped.
        let asset = Arc::new(load()?);
        let mut guard = self.inner.write();
        if let Some(&handle) = guard.lookup.get(&uuid) {
            return Ok(handle);
        }
        let handle = guard.map.insert(asset);
        guard.lookup.insert(uuid, handle);
        Ok(handle)
    }

    pub fn get(&self, handle: H) -> Option<Arc<T>> {
        self.inner.read().map.get(handle).cloned()
    }

    pub fn get_by_uuid(&self, uuid: &Uuid) -> Option<Arc<T>> {
        let guard = self.inner.read();
        let handle = guard.lookup.get(uuid)?;
        guard.map.get(*handle).cloned()
    }

    pub fn handle_by_uuid(&self, uuid: &Uuid) -> Option<H> {
        self.inner.read().lookup.get(uuid).copied()
    }

    /// Drops the store's reference. Nodes still holding the `Arc` keep the
    /// asset alive.
    pub fn remove(&self, handle: H) -> Option<Arc<T>> {
        let mut guard = self.inner.write();
        let asset = guard.map.remove(handle)?;
        guard.lookup.retain(|_, h| *h != handle);
        Some(asset)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
