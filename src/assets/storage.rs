use parking_lot::{MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard};
use slotmap::{Key, SlotMap};

/// Thread-safe slotmap pool behind typed handles.
///
/// Assets are added at scene build, mutated in place during animation (the
/// particle field's size attribute), and removed at teardown; `len` lets
/// tests assert that every mount's resources are released by the matching
/// dispose.
pub struct AssetStorage<H: Key, T> {
    inner: RwLock<SlotMap<H, T>>,
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
            inner: RwLock::new(SlotMap::with_key()),
        }
    }

    /// Adds a resource and returns its handle.
    pub fn add(&self, asset: T) -> H {
        self.inner.write().insert(asset)
    }

    /// Read access to a single resource.
    pub fn get(&self, handle: H) -> Option<MappedRwLockReadGuard<'_, T>> {
        RwLockReadGuard::try_map(self.inner.read(), |map| map.get(handle)).ok()
    }

    /// Write access to a single resource.
    pub fn get_mut(&self, handle: H) -> Option<MappedRwLockWriteGuard<'_, T>> {
        parking_lot::RwLockWriteGuard::try_map(self.inner.write(), |map| map.get_mut(handle)).ok()
    }

    /// Removes a resource. Missing handles are a no-op returning `None`, so
    /// release passes can run against partially built or already-released
    /// state.
    pub fn remove(&self, handle: H) -> Option<T> {
        self.inner.write().remove(handle)
    }

    /// Batch read access for the render loop, acquiring the lock once.
    pub fn read_lock(&self) -> RwLockReadGuard<'_, SlotMap<H, T>> {
        self.inner.read()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
