use std::hash::Hash;

/// Convert the given `usize` to the chosen node identifier representation.
/// Returns `None` if the value doesn't fit (the Non-goal on >32-bit node
/// index ranges is enforced here for the default `u32` instantiation).
pub(crate) fn usize_to_node_id<N: NodeId>(value: usize) -> Option<N> {
    if value > N::max_id() {
        None
    } else {
        Some(N::from_usize(value))
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for usize {}
}

/// A node identifier representation for the trie automaton.
///
/// The trie stores every cross-reference (`parent`, `pre`, `fail`, `ch[]`) as
/// one of these rather than a pointer, so growing the automaton never
/// invalidates existing ids and the node table stays a single contiguous
/// `Vec`. `u32` is the default and matches the 32-bit node-index range this
/// crate targets; `u64`/`usize` are available for callers who need more
/// headroom.
pub trait NodeId: private::Sealed + Copy + Clone + Eq + Hash + PartialOrd + Ord {
    fn from_usize(n: usize) -> Self;

    fn to_usize(self) -> usize;

    fn max_id() -> usize;

    /// The root node's id is always zero.
    fn root() -> Self {
        Self::from_usize(0)
    }
}

impl NodeId for u16 {
    #[inline]
    fn from_usize(n: usize) -> u16 {
        n as u16
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }

    #[inline]
    fn max_id() -> usize {
        u16::MAX as usize
    }
}

impl NodeId for u32 {
    #[inline]
    fn from_usize(n: usize) -> u32 {
        n as u32
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }

    #[inline]
    fn max_id() -> usize {
        u32::MAX as usize
    }
}

#[cfg(target_pointer_width = "64")]
impl NodeId for u64 {
    #[inline]
    fn from_usize(n: usize) -> u64 {
        n as u64
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }

    #[inline]
    fn max_id() -> usize {
        u64::MAX as usize
    }
}

impl NodeId for usize {
    #[inline]
    fn from_usize(n: usize) -> usize {
        n
    }

    #[inline]
    fn to_usize(self) -> usize {
        self
    }

    #[inline]
    fn max_id() -> usize {
        usize::MAX
    }
}
