use core::fmt;
use core::num::NonZero;

// Narrow under test so the capacity limit is reachable.
#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Names one slot of an [`Arena`](super::arena::Arena).
///
/// Stored as `slot + 1` so that `Option<Handle>` costs nothing over `Handle`,
/// which matters because every node carries three of them.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Largest slot index a handle can name.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_slot(slot: usize) -> Self {
        assert!(slot <= Self::MAX, "`Handle::from_slot()` - `slot` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new((slot + 1) as RawHandle).unwrap())
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.slot())
    }
}
