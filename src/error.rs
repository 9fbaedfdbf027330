use thiserror::Error;

/// A broken structural invariant, as reported by
/// [`RBTreeSet::validate`](crate::RBTreeSet::validate).
///
/// Slots identify nodes by their position in the set's internal storage; they
/// are stable until the node is removed, which is enough to correlate several
/// reports about the same tree.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum InvariantViolation {
    /// The root node is red.
    #[error("root at slot {slot} is red")]
    RedRoot { slot: usize },

    /// The root node has a parent link.
    #[error("root at slot {slot} has a parent")]
    RootHasParent { slot: usize },

    /// A red node has a red child.
    #[error("red node at slot {parent} has red child at slot {child}")]
    RedRedViolation { parent: usize, child: usize },

    /// Two paths below the same node pass through different numbers of black nodes.
    #[error("black-height below slot {slot} differs: left {left}, right {right}")]
    BlackHeightMismatch { slot: usize, left: usize, right: usize },

    /// An in-order neighbour is not strictly greater than its predecessor.
    #[error("element at slot {slot} is not greater than its in-order predecessor")]
    OrderViolation { slot: usize },

    /// A child does not point back at the node holding it.
    #[error("child at slot {child} does not point back to parent at slot {parent}")]
    BrokenParentLink { parent: usize, child: usize },

    /// The cached length disagrees with the nodes reachable from the root.
    #[error("cached length {cached} but {reachable} nodes reachable and {stored} stored")]
    LengthMismatch { cached: usize, reachable: usize, stored: usize },
}
