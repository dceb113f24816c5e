//! Flat slot storage backing the tree.
//!
//! The tree never allocates nodes; it reads and writes aggregates by slot
//! index through [`SlotStore`]. Indexing past `slot_count()` panics just like
//! slice indexing. Callers size the store with
//! [`required_slots`](crate::index::required_slots) or more.

pub trait SlotStore<T: Copy> {
    fn slot_count(&self) -> usize;
    fn slot(&self, p: usize) -> T;
    fn set_slot(&mut self, p: usize, value: T);
}

impl<T: Copy> SlotStore<T> for [T] {
    #[inline]
    fn slot_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn slot(&self, p: usize) -> T {
        self[p]
    }

    #[inline]
    fn set_slot(&mut self, p: usize, value: T) {
        self[p] = value;
    }
}

impl<T: Copy> SlotStore<T> for Vec<T> {
    #[inline]
    fn slot_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn slot(&self, p: usize) -> T {
        self[p]
    }

    #[inline]
    fn set_slot(&mut self, p: usize, value: T) {
        self[p] = value;
    }
}

impl<T: Copy> SlotStore<T> for Box<[T]> {
    #[inline]
    fn slot_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn slot(&self, p: usize) -> T {
        self[p]
    }

    #[inline]
    fn set_slot(&mut self, p: usize, value: T) {
        self[p] = value;
    }
}

// =============================================================================
// Allocation
// =============================================================================

/// Allocate `k` slots, each set to `T::default()` (zero for integers).
pub fn alloc_zeroed<T: Default + Clone>(k: usize) -> Vec<T> {
    vec![T::default(); k]
}

/// Allocate `k` slots, each set to `value`.
pub fn alloc_filled<T: Clone>(k: usize, value: T) -> Vec<T> {
    vec![value; k]
}

/// Like [`alloc_filled`], but returns `None` instead of aborting when `k`
/// slots cannot be reserved.
pub fn try_alloc_filled<T: Clone>(k: usize, value: T) -> Option<Vec<T>> {
    let mut store = Vec::new();
    store.try_reserve_exact(k).ok()?;
    store.resize(k, value);
    Some(store)
}

/// Like [`alloc_zeroed`], but returns `None` instead of aborting when `k`
/// slots cannot be reserved.
pub fn try_alloc_zeroed<T: Default + Clone>(k: usize) -> Option<Vec<T>> {
    try_alloc_filled(k, T::default())
}

/// Release a store in one step.
#[inline]
pub fn release<T>(store: Vec<T>) {
    drop(store);
}
