use alloc::vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::InvariantViolation;
use crate::raw::{Handle, RawRBTree, Side};

mod capacity;

/// An ordered set based on a red-black tree.
///
/// Elements are kept in a single arena and linked by compact handles; every
/// insertion and removal rebalances along one root-to-leaf path, so lookups,
/// insertions and removals are all O(log n) in the worst case.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `RBTreeSet` that observed the logic error and not result in undefined behavior.
///
/// Iterators returned by [`RBTreeSet::iter`] and [`RBTreeSet::into_iter`] produce their items in
/// ascending order.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use rbtree_set::RBTreeSet;
///
/// let mut primes = RBTreeSet::new();
/// for p in [7, 2, 11, 3, 5] {
///     primes.insert(p);
/// }
///
/// assert!(primes.contains(&5));
/// assert!(!primes.contains(&4));
///
/// primes.remove(&7);
/// assert_eq!(primes.iter().copied().collect::<Vec<_>>(), [2, 3, 5, 11]);
/// ```
pub struct RBTreeSet<T> {
    tree: RawRBTree<T>,
}

/// An iterator over the items of a `RBTreeSet`.
///
/// This `struct` is created by the [`iter`] method on [`RBTreeSet`].
/// See its documentation for more.
///
/// [`iter`]: RBTreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    tree: Option<&'a RawRBTree<T>>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the items of a `RBTreeSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTreeSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: RBTreeSet#method.into_iter
pub struct IntoIter<T> {
    inner: vec::IntoIter<T>,
}

impl<T> RBTreeSet<T> {
    /// Makes a new, empty `RBTreeSet`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set: RBTreeSet<i32> = RBTreeSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> RBTreeSet<T> {
        RBTreeSet {
            tree: RawRBTree::new(),
        }
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut v = RBTreeSet::from([1, 2]);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut a = RBTreeSet::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1);
    /// assert_eq!(a.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) - the count is maintained on every insertion and removal.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Gets an iterator that visits the elements in the `RBTreeSet` in ascending order.
    ///
    /// Each call starts a fresh traversal of the set as it is now, so the
    /// sequence can be restarted freely.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([3, 1, 2]);
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; each step is amortized O(1).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: Some(&self.tree),
            front: self.tree.first(),
            back: self.tree.last(),
            remaining: self.tree.len(),
        }
    }

    /// Returns the first element in the set, if any. This is the minimum element.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|h| self.tree.key(h))
    }

    /// Returns the last element in the set, if any. This is the maximum element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|h| self.tree.key(h))
    }

    /// Removes and returns the first element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([1, 2]);
    /// while let Some(n) = set.pop_first() {
    ///     assert!(set.iter().all(|&k| k > n));
    /// }
    /// assert!(set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    /// Removes and returns the last element in the set.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last()
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` for which `f(&e)` returns `false`.
    /// The elements are visited in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set: RBTreeSet<i32> = (1..=10).collect();
    /// set.retain(|&k| k % 3 != 0);
    /// assert!(set.iter().eq([1, 2, 4, 5, 7, 8, 10].iter()));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n + k log n) where k is the number of removed elements.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.tree.retain(f);
    }

    /// Returns the number of nodes on the longest path from the root to a leaf,
    /// or `0` for an empty set.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    /// The red-black invariants bound it by `2 * log2(len + 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set: RBTreeSet<u32> = (0..1023).collect();
    /// assert!(set.height() <= 20);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.tree.height()
    }
}

impl<T: Ord> RBTreeSet<T> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal value, `true` is
    ///   returned.
    /// - If the set already contained an equal value, `false` is returned, and
    ///   the set is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the set already holds `u32::MAX` elements.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value)
    }

    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// The value may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.contains(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.find(value).map(|h| self.tree.key(h))
    }

    /// If the set contains an element equal to the value, removes it from the
    /// set and drops it. Returns whether such an element was present.
    ///
    /// Removing an absent value is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    ///
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.remove(value).is_some()
    }

    /// Removes and returns the element in the set, if any, that is equal to
    /// the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.remove(value)
    }

    /// Checks the red-black and ordering invariants of the set.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    /// A set built only through this crate's API always validates; the check
    /// exists for tests and for diagnosing a logic error in a key's [`Ord`]
    /// implementation.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set: RBTreeSet<i32> = (0..100).rev().collect();
    /// assert_eq!(set.validate(), Ok(()));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.tree.validate()
    }
}

impl<T: Hash> Hash for RBTreeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: PartialEq> PartialEq for RBTreeSet<T> {
    fn eq(&self, other: &RBTreeSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RBTreeSet<T> {}

impl<T: PartialOrd> PartialOrd for RBTreeSet<T> {
    fn partial_cmp(&self, other: &RBTreeSet<T>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for RBTreeSet<T> {
    fn cmp(&self, other: &RBTreeSet<T>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Clone> Clone for RBTreeSet<T> {
    fn clone(&self) -> Self {
        RBTreeSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RBTreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for RBTreeSet<T> {
    fn default() -> Self {
        RBTreeSet::new()
    }
}

impl<T: Ord> FromIterator<T> for RBTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = RBTreeSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for RBTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for RBTreeSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RBTreeSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for RBTreeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `RBTreeSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([4, 2, 3, 1]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.tree.into_sorted_vec().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RBTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree?;
        let handle = self.front?;
        self.remaining -= 1;
        self.front = tree.step(handle, Side::Right);
        Some(tree.key(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree?;
        let handle = self.back?;
        self.remaining -= 1;
        self.back = tree.step(handle, Side::Left);
        Some(tree.key(handle))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Default for Iter<'_, T> {
    /// Creates an empty `rbtree_set::Iter`.
    ///
    /// ```
    /// # use rbtree_set::rbtree_set;
    /// let iter: rbtree_set::Iter<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            tree: None,
            front: None,
            back: None,
            remaining: 0,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}

impl<T> Default for IntoIter<T> {
    /// Creates an empty `rbtree_set::IntoIter`.
    ///
    /// ```
    /// # use rbtree_set::rbtree_set;
    /// let iter: rbtree_set::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: vec::Vec::new().into_iter(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn iter_meets_in_the_middle() {
        let set = RBTreeSet::from([1, 2, 3, 4, 5]);
        let mut iter = set.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn debug_formats_as_set() {
        let set = RBTreeSet::from([2, 1]);
        assert_eq!(format!("{set:?}"), "{1, 2}");
        assert_eq!(format!("{:?}", set.iter()), "[1, 2]");
    }

    #[test]
    fn equal_sets_built_in_different_orders() {
        let a = RBTreeSet::from([1, 2, 3, 4]);
        let b = RBTreeSet::from([4, 3, 2, 1]);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert!(RBTreeSet::from([1, 2]) < RBTreeSet::from([1, 3]));
    }
}
