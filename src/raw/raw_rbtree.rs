use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use log::trace;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};
use crate::InvariantViolation;

/// The red-black tree backing `RBTreeSet`.
///
/// Nodes live in an arena and link to each other by [`Handle`]. Child links
/// define the tree; parent links are plain back-references used to walk upward
/// during rebalancing and iteration, never a second path of ownership.
#[derive(Clone)]
pub(crate) struct RawRBTree<T> {
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
    /// Number of elements, kept in step with the arena.
    len: usize,
}

impl<T> RawRBTree<T> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &T {
        self.nodes[handle].key()
    }

    /// Absent children count as black.
    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.nodes[h].is_red())
    }

    /// The node furthest toward `side` in the subtree rooted at `from`.
    fn extreme(&self, from: Handle, side: Side) -> Handle {
        let mut current = from;
        while let Some(next) = self.nodes[current].child(side) {
            current = next;
        }
        current
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    /// The in-order neighbour of `handle` toward `side`: `Right` is the
    /// successor, `Left` the predecessor.
    pub(crate) fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.nodes[handle].child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        // Climb until we arrive from the far side of an ancestor.
        let mut current = handle;
        let mut parent = self.nodes[handle].parent;
        while let Some(p) = parent {
            if self.nodes[p].child(side) != Some(current) {
                return Some(p);
            }
            current = p;
            parent = self.nodes[p].parent;
        }
        None
    }

    /// Handles in ascending key order.
    pub(crate) fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        core::iter::successors(self.first(), move |&h| self.step(h, Side::Right))
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        fn subtree_height<T>(nodes: &Arena<Node<T>>, handle: Option<Handle>) -> usize {
            handle.map_or(0, |h| {
                let node = &nodes[h];
                1 + subtree_height(nodes, node.left()).max(subtree_height(nodes, node.right()))
            })
        }
        subtree_height(&self.nodes, self.root)
    }

    /// Moves every element out in ascending order without rebalancing.
    pub(crate) fn into_sorted_vec(mut self) -> Vec<T> {
        let order: Vec<Handle> = self.handles().collect();
        order.into_iter().map(|h| self.nodes.remove(h).into_key()).collect()
    }

    /// Points whatever held `old` (a parent's child slot, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.nodes[p].side_of(old).expect("`RawRBTree::replace_child()` - parent does not hold child!");
                self.nodes[p].set_child(side, new);
            }
        }
    }

    /// Rotates the subtree at `pivot` toward `side`.
    ///
    /// `Side::Left` promotes the right child (rotate-left); `Side::Right`
    /// promotes the left child. The promoted child's inner subtree moves across
    /// to `pivot`. In-order sequence is preserved.
    fn rotate(&mut self, pivot: Handle, side: Side) {
        let outer = side.opposite();
        let promoted = self.nodes[pivot].child(outer).expect("`RawRBTree::rotate()` - no child to promote!");
        trace!("rotate {side:?} at {pivot:?}, promoting {promoted:?}");

        let inner = self.nodes[promoted].child(side);
        self.nodes[pivot].set_child(outer, inner);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(pivot);
        }

        let parent = self.nodes[pivot].parent;
        self.replace_child(parent, pivot, Some(promoted));
        self.nodes[promoted].parent = parent;

        self.nodes[promoted].set_child(side, Some(pivot));
        self.nodes[pivot].parent = Some(promoted);
    }

    /// Puts `new` where `old` hangs. `old`'s own children are left untouched.
    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.nodes[old].parent;
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    /// Restores the red-black invariants after `node` was attached as a red leaf.
    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(mut parent) = self.nodes[node].parent.filter(|&p| self.nodes[p].is_red()) {
            // A red parent is never the root.
            let grandparent =
                self.nodes[parent].parent.expect("`RawRBTree::insert_fixup()` - red parent without grandparent!");
            let side =
                self.nodes[grandparent].side_of(parent).expect("`RawRBTree::insert_fixup()` - broken parent link!");
            let uncle = self.nodes[grandparent].child(side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self.nodes[u].is_red()) {
                trace!("insert fixup at {node:?}: red uncle {uncle:?}, recolor {grandparent:?}");
                self.nodes[parent].color = Color::Black;
                self.nodes[uncle].color = Color::Black;
                self.nodes[grandparent].color = Color::Red;
                node = grandparent;
                continue;
            }

            if self.nodes[parent].child(side.opposite()) == Some(node) {
                trace!("insert fixup at {node:?}: inner grandchild, straighten at {parent:?}");
                self.rotate(parent, side);
                (node, parent) = (parent, node);
            }

            trace!("insert fixup at {node:?}: outer grandchild, rotate at {grandparent:?}");
            self.nodes[parent].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            self.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }

    /// Restores black-heights after a black node was unlinked.
    ///
    /// `node` is the child that took the removed node's place and may be
    /// absent, in which case `parent` says where the empty slot is.
    fn remove_fixup(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>) {
        while node != self.root && !self.is_red(node) {
            let Some(p) = parent else {
                break;
            };
            let side = if self.nodes[p].left() == node {
                Side::Left
            } else {
                Side::Right
            };
            let outer = side.opposite();
            let sibling_of = |tree: &Self| {
                tree.nodes[p].child(outer).expect("`RawRBTree::remove_fixup()` - short side has no sibling!")
            };
            let mut sibling = sibling_of(self);

            if self.nodes[sibling].is_red() {
                trace!("remove fixup under {p:?}: red sibling {sibling:?}");
                self.nodes[sibling].color = Color::Black;
                self.nodes[p].color = Color::Red;
                self.rotate(p, side);
                sibling = sibling_of(self);
            }

            let near = self.nodes[sibling].child(side);
            let far = self.nodes[sibling].child(outer);
            if !self.is_red(near) && !self.is_red(far) {
                trace!("remove fixup under {p:?}: black nephews, push deficit up");
                self.nodes[sibling].color = Color::Red;
                node = Some(p);
                parent = self.nodes[p].parent;
                continue;
            }

            if !self.is_red(far) {
                trace!("remove fixup under {p:?}: red near nephew, rotate at {sibling:?}");
                if let Some(near) = near {
                    self.nodes[near].color = Color::Black;
                }
                self.nodes[sibling].color = Color::Red;
                self.rotate(sibling, outer);
                sibling = sibling_of(self);
            }

            trace!("remove fixup under {p:?}: red far nephew, rotate at {p:?}");
            self.nodes[sibling].color = self.nodes[p].color;
            self.nodes[p].color = Color::Black;
            if let Some(far) = self.nodes[sibling].child(outer) {
                self.nodes[far].color = Color::Black;
            }
            self.rotate(p, side);
            node = self.root;
            break;
        }

        if let Some(node) = node {
            self.nodes[node].color = Color::Black;
        }
    }

    /// Unlinks `target`, rebalances, and hands back its element.
    pub(crate) fn remove_handle(&mut self, target: Handle) -> T {
        let left = self.nodes[target].left();
        let right = self.nodes[target].right();

        // `replacement` moves into the removed node's position and `parent`
        // records where, since `replacement` may be absent.
        let (removed_color, replacement, parent) = match (left, right) {
            (None, _) | (_, None) => {
                let child = left.or(right);
                let parent = self.nodes[target].parent;
                self.transplant(target, child);
                (self.nodes[target].color, child, parent)
            }
            (Some(left), Some(right)) => {
                let successor = self.extreme(right, Side::Left);
                let successor_color = self.nodes[successor].color;
                let child = self.nodes[successor].right();

                let parent = if successor == right {
                    successor
                } else {
                    let parent = self.nodes[successor].parent;
                    self.transplant(successor, child);
                    self.nodes[successor].set_child(Side::Right, Some(right));
                    self.nodes[right].parent = Some(successor);
                    parent.expect("`RawRBTree::remove_handle()` - successor without parent!")
                };

                self.transplant(target, Some(successor));
                self.nodes[successor].set_child(Side::Left, Some(left));
                self.nodes[left].parent = Some(successor);
                self.nodes[successor].color = self.nodes[target].color;
                (successor_color, child, Some(parent))
            }
        };

        if removed_color == Color::Black {
            self.remove_fixup(replacement, parent);
        }

        self.len -= 1;
        self.nodes.remove(target).into_key()
    }

    pub(crate) fn pop_first(&mut self) -> Option<T> {
        let first = self.first()?;
        Some(self.remove_handle(first))
    }

    pub(crate) fn pop_last(&mut self) -> Option<T> {
        let last = self.last()?;
        Some(self.remove_handle(last))
    }

    /// Removes every element for which `keep` returns `false`, visiting in
    /// ascending order.
    pub(crate) fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        // Removal relinks nodes but never moves them between slots, so the
        // collected handles stay valid throughout.
        let doomed: Vec<Handle> = self.handles().filter(|&h| !keep(self.nodes[h].key())).collect();
        for handle in doomed {
            self.remove_handle(handle);
        }
    }
}

impl<T: Ord> RawRBTree<T> {
    /// Finds the node holding a key equal to `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = &self.nodes[handle];
            current = match key.cmp(node.key().borrow()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }
        None
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(key).is_some()
    }

    /// Inserts `key` unless an equal key is present. Returns whether it was inserted.
    pub(crate) fn insert(&mut self, key: T) -> bool {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = &self.nodes[handle];
            side = match key.cmp(node.key()) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => return false,
            };
            parent = Some(handle);
            current = node.child(side);
        }

        let mut node = Node::new(key);
        node.parent = parent;
        let handle = self.nodes.insert(node);
        self.len += 1;

        match parent {
            None => {
                self.nodes[handle].color = Color::Black;
                self.root = Some(handle);
            }
            Some(parent) => {
                self.nodes[parent].set_child(side, Some(handle));
                self.insert_fixup(handle);
            }
        }
        true
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let target = self.find(key)?;
        Some(self.remove_handle(target))
    }

    /// Checks every structural invariant, reporting the first one broken.
    pub(crate) fn validate(&self) -> Result<(), InvariantViolation> {
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return Err(InvariantViolation::RootHasParent { slot: root.slot() });
            }
            if self.nodes[root].is_red() {
                return Err(InvariantViolation::RedRoot { slot: root.slot() });
            }
        }

        let mut reachable = 0;
        self.black_height(self.root, &mut reachable)?;
        if reachable != self.len || self.nodes.len() != self.len {
            return Err(InvariantViolation::LengthMismatch {
                cached: self.len,
                reachable,
                stored: self.nodes.len(),
            });
        }

        let mut previous: Option<&T> = None;
        for handle in self.handles() {
            let key = self.key(handle);
            if previous.is_some_and(|p| p >= key) {
                return Err(InvariantViolation::OrderViolation { slot: handle.slot() });
            }
            previous = Some(key);
        }
        Ok(())
    }

    /// Black nodes strictly below `handle` on any path to an absent child,
    /// checking colors and parent links on the way.
    fn black_height(&self, handle: Option<Handle>, reachable: &mut usize) -> Result<usize, InvariantViolation> {
        let Some(handle) = handle else {
            return Ok(0);
        };
        *reachable += 1;

        let node = &self.nodes[handle];
        let mut heights = [0; 2];
        for side in [Side::Left, Side::Right] {
            let Some(child) = node.child(side) else {
                continue;
            };
            let child_node = &self.nodes[child];
            if child_node.parent != Some(handle) {
                return Err(InvariantViolation::BrokenParentLink {
                    parent: handle.slot(),
                    child: child.slot(),
                });
            }
            if node.is_red() && child_node.is_red() {
                return Err(InvariantViolation::RedRedViolation {
                    parent: handle.slot(),
                    child: child.slot(),
                });
            }
            heights[side as usize] = self.black_height(Some(child), reachable)? + usize::from(!child_node.is_red());
        }

        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch {
                slot: handle.slot(),
                left,
                right,
            });
        }
        Ok(left)
    }
}
