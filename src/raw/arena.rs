use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use super::handle::Handle;

/// Slot storage owning every node of a tree.
///
/// Vacated slots go on a free list and are handed out again by the next
/// [`insert`](Arena::insert), so a tree that churns at a steady size stops
/// allocating.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    vacant: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of occupied slots.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }

    pub(crate) fn insert(&mut self, element: T) -> Handle {
        if let Some(handle) = self.vacant.pop() {
            self.slots[handle.slot()] = Some(element);
            return handle;
        }

        assert!(
            self.slots.len() <= Handle::MAX,
            "`Arena::insert()` - arena is at maximum capacity ({})",
            Handle::MAX + 1
        );
        self.slots.push(Some(element));
        Handle::from_slot(self.slots.len() - 1)
    }

    pub(crate) fn remove(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.slot()].take().expect("`Arena::remove()` - `handle` is vacant!");
        self.vacant.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, handle: Handle) -> &T {
        self.slots[handle.slot()].as_ref().expect("`Arena::index()` - `handle` is vacant!")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.slot()].as_mut().expect("`Arena::index_mut()` - `handle` is vacant!")
    }
}
