//! Range aggregate queries.

use crate::index::{left_child, right_child, split_point};
use crate::merge::{Max, Merge};
use crate::store::SlotStore;

/// How a node's interval `[l, r]` relates to a query `[query_l, query_r]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Disjoint: the node contributes the identity.
    None,
    /// The node's interval lies inside the query: use its stored aggregate.
    Total,
    /// Anything else: descend into both children.
    Partial,
}

impl Overlap {
    #[inline]
    pub fn classify(l: usize, r: usize, query_l: usize, query_r: usize) -> Overlap {
        if query_l > r || query_r < l {
            Overlap::None
        } else if r <= query_r && l >= query_l {
            Overlap::Total
        } else {
            Overlap::Partial
        }
    }
}

/// Aggregate of the leaves in `[query_l, query_r]` under the node `(slot, l, r)`.
///
/// `[l, r]` must be the interval the node was built for. Once a node is fully
/// covered its stored value is returned without descending, so only
/// `O(log n)` nodes are visited. Ranges that miss the node entirely yield
/// [`Merge::identity`].
pub fn range_query<M, S>(
    tree: &S,
    slot: usize,
    l: usize,
    r: usize,
    query_l: usize,
    query_r: usize,
) -> M::Value
where
    M: Merge,
    S: SlotStore<M::Value> + ?Sized,
{
    match Overlap::classify(l, r, query_l, query_r) {
        Overlap::None => M::identity(),
        Overlap::Total => tree.slot(slot),
        Overlap::Partial => {
            let mid = split_point(l, r);
            let left = range_query::<M, S>(tree, left_child(slot), l, mid, query_l, query_r);
            let right = range_query::<M, S>(tree, right_child(slot), mid + 1, r, query_l, query_r);
            M::combine(left, right)
        }
    }
}

/// Maximum of `a[query_l..=query_r]` over a plain word array.
///
/// A disjoint range returns `i64::MIN`, which is neutral for any later
/// `max` with real values.
#[inline]
pub fn range_max(
    tree: &[i64],
    slot: usize,
    l: usize,
    r: usize,
    query_l: usize,
    query_r: usize,
) -> i64 {
    range_query::<Max<i64>, [i64]>(tree, slot, l, r, query_l, query_r)
}
