//! A red-black tree ordered set for Rust.
//!
//! This crate provides [`RBTreeSet`], an ordered set with an API modelled on the
//! standard library's `BTreeSet`, backed by a classic red-black binary search tree:
//!
//! - [`insert`](RBTreeSet::insert), [`remove`](RBTreeSet::remove) and
//!   [`contains`](RBTreeSet::contains) run in O(log n) worst case
//! - [`iter`](RBTreeSet::iter) walks the elements in ascending order, from either end
//! - [`len`](RBTreeSet::len) and [`is_empty`](RBTreeSet::is_empty) are O(1)
//!
//! # Example
//!
//! ```
//! use rbtree_set::RBTreeSet;
//!
//! let mut set: RBTreeSet<i32> = [50, 25, 75, 10, 30, 60, 80].into_iter().collect();
//! assert_eq!(set.len(), 7);
//!
//! set.remove(&25);
//! assert!(!set.contains(&25));
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), [10, 30, 50, 60, 75, 80]);
//!
//! set.insert(25);
//! assert!(set.contains(&25));
//! assert_eq!(set.validate(), Ok(()));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **No unsafe code** - Nodes live in an arena and refer to each other by index
//! - **Instrumented** - Rebalancing steps are reported through the [`log`] facade
//!   at `trace` level
//!
//! # Implementation
//!
//! Every node holds its element, a color, a parent link and two child links.
//! Child links own the structure top-down; parent links are back-references used
//! to walk upward while rebalancing and iterating. After every insertion and
//! removal the tree satisfies the red-black invariants: the root is black, no red
//! node has a red child, and every path from a node down to an empty child slot
//! passes the same number of black nodes. Together these bound the height by
//! `2 * log2(n + 1)`.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod rbtree_set;

pub use error::InvariantViolation;
pub use rbtree_set::RBTreeSet;
