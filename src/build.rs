//! Point updates and bulk construction.
//!
//! These are the raw recursive routines. They trust their arguments: the
//! interval must satisfy `l <= r` and the store must hold every slot of the
//! subtree rooted at `slot`. Argument checking lives in
//! [`TourneyTree`](crate::TourneyTree).

use crate::index::{left_child, right_child, split_point};
use crate::merge::{Max, Merge};
use crate::store::SlotStore;

/// Write `value` into the leaf for `target_idx` and refresh every ancestor on
/// the path back to `slot`.
///
/// A `target_idx` outside `[l, r]` is a no-op. Both children are visited at
/// every level; the one that cannot contain `target_idx` returns on its first
/// check, so a call touches `O(log n)` slots. Slots off the path are never
/// written.
///
/// Running this for every index `0..n` from an arbitrary initial store leaves
/// the whole tree consistent.
pub fn build<M, S>(
    tree: &mut S,
    slot: usize,
    l: usize,
    r: usize,
    target_idx: usize,
    value: M::Value,
) where
    M: Merge,
    S: SlotStore<M::Value> + ?Sized,
{
    if target_idx < l || target_idx > r {
        return;
    }

    if l == r {
        tree.set_slot(slot, value);
        return;
    }

    let mid = split_point(l, r);
    let left = left_child(slot);
    let right = right_child(slot);
    build::<M, S>(tree, left, l, mid, target_idx, value);
    build::<M, S>(tree, right, mid + 1, r, target_idx, value);
    tree.set_slot(slot, M::combine(tree.slot(left), tree.slot(right)));
}

/// [`build`] over a plain word array with the max operator.
#[inline]
pub fn build_max(tree: &mut [i64], slot: usize, l: usize, r: usize, target_idx: usize, value: i64) {
    build::<Max<i64>, [i64]>(tree, slot, l, r, target_idx, value)
}

/// Fill every slot of the subtree covering `[l, r]` from `values[l..=r]`.
///
/// Each slot is written exactly once, so building a full tree this way is
/// `O(n)` rather than the `O(n log n)` of `n` point updates. The result is
/// identical to running [`build`] for every index in the interval.
///
/// # Panics
/// Panics if `values.len() <= r`.
pub fn build_from<M, S>(tree: &mut S, slot: usize, l: usize, r: usize, values: &[M::Value])
where
    M: Merge,
    S: SlotStore<M::Value> + ?Sized,
{
    if l == r {
        tree.set_slot(slot, values[l]);
        return;
    }

    let mid = split_point(l, r);
    let left = left_child(slot);
    let right = right_child(slot);
    build_from::<M, S>(tree, left, l, mid, values);
    build_from::<M, S>(tree, right, mid + 1, r, values);
    tree.set_slot(slot, M::combine(tree.slot(left), tree.slot(right)));
}
