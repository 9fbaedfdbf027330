use super::handle::Handle;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of a node, and for rotations, the direction the subtree turns.
///
/// Every rebalancing case has a mirror image; the tree code is written once
/// against a `Side` and runs again with [`Side::opposite`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    key: T,
    pub(crate) color: Color,
    pub(crate) parent: Option<Handle>,
    children: [Option<Handle>; 2],
}

impl<T> Node<T> {
    /// A detached red node, the shape every insertion starts from.
    pub(crate) const fn new(key: T) -> Self {
        Self {
            key,
            color: Color::Red,
            parent: None,
            children: [None, None],
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &T {
        &self.key
    }

    pub(crate) fn into_key(self) -> T {
        self.key
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        self.children[side as usize]
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        self.children[side as usize] = child;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.child(Side::Left)
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.child(Side::Right)
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Which side of `self` holds `child`, if either.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left() == Some(child) {
            Some(Side::Left)
        } else if self.right() == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}
