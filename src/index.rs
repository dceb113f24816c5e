//! Slot addressing for the implicit tree.
//!
//! The root lives at slot `0`. A node at slot `p` covering `[l, r]` keeps its
//! left half `[l, split_point(l, r)]` at `2p + 1` and its right half at
//! `2p + 2`. Build and query both derive child intervals from
//! [`split_point`], so a store written by one is always readable by the other.

/// Slot of the left child of `p`.
#[inline]
pub const fn left_child(p: usize) -> usize {
    2 * p + 1
}

/// Slot of the right child of `p`.
#[inline]
pub const fn right_child(p: usize) -> usize {
    2 * p + 2
}

/// Slot of the parent of `p`. The root has no parent.
#[inline]
pub const fn parent(p: usize) -> Option<usize> {
    if p == 0 {
        None
    } else {
        Some((p - 1) / 2)
    }
}

/// Upper bound of the left partition of `[l, r]`.
///
/// The right partition starts at `split_point(l, r) + 1`. Requires `l <= r`;
/// `l + (r - l) / 2` cannot overflow under that precondition.
#[inline]
pub const fn split_point(l: usize, r: usize) -> usize {
    debug_assert!(l <= r);
    l + (r - l) / 2
}

/// Number of levels below the root of a tree over `n` leaves, i.e. `ceil(log2 n)`.
///
/// This is also the recursion depth of a single build or query call, so the
/// call stack never grows past `depth(n) + 1` frames.
#[inline]
pub const fn depth(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        n.next_power_of_two().trailing_zeros() as usize
    }
}

/// Exact number of slots addressed by a tree over `n` leaves.
///
/// Every slot touched by a build or query rooted at `(0, 0, n - 1)` is below
/// this bound. The largest addressed slot is the rightmost node on the deepest
/// level, found by walking down and preferring the right child whenever it is
/// as deep as the left one.
pub const fn required_slots(n: usize) -> usize {
    if n == 0 {
        return 0;
    }

    let mut slot = 0;
    let mut len = n;
    while len > 1 {
        // [l, mid] holds ceil(len / 2) leaves.
        let left_len = len - len / 2;
        let right_len = len / 2;
        if depth(right_len) == depth(left_len) {
            slot = right_child(slot);
            len = right_len;
        } else {
            slot = left_child(slot);
            len = left_len;
        }
    }
    slot + 1
}

// =============================================================================
// Sizing policy
// =============================================================================

/// How many slots to allocate for a tree over `n` leaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sizing {
    /// Exactly [`required_slots`].
    #[default]
    Exact,
    /// `k * n` slots, never fewer than [`required_slots`].
    Factor(usize),
}

impl Sizing {
    /// The fixed `5n` over-provisioning policy.
    pub const REFERENCE: Sizing = Sizing::Factor(5);

    /// Slot count for `n` leaves, or `None` if `k * n` overflows.
    pub fn slots_for(self, n: usize) -> Option<usize> {
        let exact = required_slots(n);
        match self {
            Sizing::Exact => Some(exact),
            Sizing::Factor(k) => k.checked_mul(n).map(|slots| slots.max(exact)),
        }
    }
}
