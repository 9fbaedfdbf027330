use super::RBTreeSet;
use crate::raw::RawRBTree;

impl<T> RBTreeSet<T> {
    /// Creates an empty set with room for at least `capacity` elements before
    /// its node storage reallocates.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set: RBTreeSet<i32> = RBTreeSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeSet {
            tree: RawRBTree::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the set can hold without reallocating.
    ///
    /// Slots freed by removals are reused before the storage grows, so a set
    /// that stays at or below this size never allocates again.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::with_capacity(4);
    /// let capacity = set.capacity();
    /// for i in 0..100 {
    ///     set.insert(i);
    ///     set.remove(&(i - 1));
    /// }
    /// assert_eq!(set.capacity(), capacity);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}
