//! # tourney-rs
//!
//! Range maximum queries over a fixed-size array using a tournament tree
//! (segment tree) stored as a flat array of slots.
//!
//! The tree is implicit: the root sits at slot `0` and a node at slot `p` has
//! children at `2p + 1` and `2p + 2`. Point updates and range queries both run
//! in `O(log n)`.
//!
//! ## Example
//!
//! ```rust
//! use tourney_rs::TourneyTree;
//!
//! let mut tree: TourneyTree = TourneyTree::from_slice(&[5, 3, 8, 1]);
//! assert_eq!(tree.query(0, 3), Ok(8));
//!
//! tree.set(1, 9).unwrap();
//! assert_eq!(tree.query(0, 3), Ok(9));
//! assert_eq!(tree.query(2, 3), Ok(8));
//! ```
//!
//! The raw recursive routines ([`build`], [`range_query`], [`range_max`]) are
//! exported as well. They operate on any [`SlotStore`] and skip all argument
//! checks; [`TourneyTree`] is the checked wrapper around them.
//!
//! Any [`Merge`] operator can replace max:
//!
//! ```rust
//! use tourney_rs::{Sum, TourneyTree};
//!
//! let tree: TourneyTree<Sum<u64>> = TourneyTree::from_slice(&[1, 2, 3, 4]);
//! assert_eq!(tree.query_range(1..3), Ok(5));
//! ```

#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod build;
mod error;
mod index;
mod merge;
mod query;
mod store;

pub use build::{build, build_from, build_max};
pub use error::{Result, TreeError};
pub use index::{depth, left_child, parent, required_slots, right_child, split_point, Sizing};
pub use merge::{combine, Bounded, Gcd, Max, Merge, Min, Sum};
pub use query::{range_max, range_query, Overlap};
pub use store::{
    alloc_filled, alloc_zeroed, release, try_alloc_filled, try_alloc_zeroed, SlotStore,
};

use std::marker::PhantomData;
use std::ops::{Bound, RangeBounds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tournament tree over `len` leaves with bounds-checked operations.
///
/// Leaves are addressed `0..len`. Every aggregate lives in one `Vec` of
/// slots sized by a [`Sizing`] policy; no other allocation happens after
/// construction.
///
/// With the `serde` feature the tree serializes as its raw slots. Input whose
/// slot array is too short for `len` is rejected on deserialization.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(bound(serialize = "M::Value: Serialize")))]
pub struct TourneyTree<M: Merge = Max<i64>> {
    slots: Vec<M::Value>,
    len: usize,
    sizing: Sizing,
    #[cfg_attr(feature = "serde", serde(skip))]
    _marker: PhantomData<M>,
}

impl<M: Merge> TourneyTree<M> {
    /// A tree of `len` leaves, all holding the identity of `M`.
    pub fn with_len(len: usize) -> Self {
        let slots = alloc_filled(required_slots(len), M::identity());
        Self::from_parts(slots, len, Sizing::Exact)
    }

    /// Like [`with_len`](Self::with_len), with slots allocated per `sizing`.
    ///
    /// Fails with [`TreeError::CapacityOverflow`] when the policy asks for more
    /// slots than can be reserved.
    pub fn with_len_and_sizing(len: usize, sizing: Sizing) -> Result<Self> {
        let slots = sizing
            .slots_for(len)
            .and_then(|k| try_alloc_filled(k, M::identity()))
            .ok_or(TreeError::CapacityOverflow { len })?;
        Ok(Self::from_parts(slots, len, sizing))
    }

    /// Build a tree over `values` in `O(n)`.
    pub fn from_slice(values: &[M::Value]) -> Self {
        let mut tree = Self::with_len(values.len());
        tree.fill(values);
        tree
    }

    pub fn from_slice_with_sizing(values: &[M::Value], sizing: Sizing) -> Result<Self> {
        let mut tree = Self::with_len_and_sizing(values.len(), sizing)?;
        tree.fill(values);
        Ok(tree)
    }

    /// Build a tree by point-updating indices `0..n` in order, starting from a
    /// store of default (zero) values.
    ///
    /// Every node ends up holding the same aggregate as with
    /// [`from_slice_with_sizing`](Self::from_slice_with_sizing); slots that
    /// belong to no node keep their zero. Takes `O(n log n)`.
    pub fn build_sequential(values: &[M::Value], sizing: Sizing) -> Result<Self>
    where
        M::Value: Default,
    {
        let len = values.len();
        let mut slots = sizing
            .slots_for(len)
            .and_then(try_alloc_zeroed::<M::Value>)
            .ok_or(TreeError::CapacityOverflow { len })?;
        for (idx, &value) in values.iter().enumerate() {
            build::<M, _>(&mut slots, 0, 0, len - 1, idx, value);
        }
        Ok(Self::from_parts(slots, len, sizing))
    }

    fn from_parts(slots: Vec<M::Value>, len: usize, sizing: Sizing) -> Self {
        debug_assert!(slots.len() >= required_slots(len));
        tdebug!(len, slots = slots.len(), ?sizing, "TourneyTree::from_parts");
        Self {
            slots,
            len,
            sizing,
            _marker: PhantomData,
        }
    }

    fn fill(&mut self, values: &[M::Value]) {
        debug_assert_eq!(values.len(), self.len);
        if !values.is_empty() {
            build_from::<M, _>(&mut self.slots, 0, 0, values.len() - 1, values);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots. At least [`required_slots`]`(len)`.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Recursion depth of a single update or query.
    #[inline]
    pub fn depth(&self) -> usize {
        depth(self.len)
    }

    #[inline]
    pub fn sizing(&self) -> Sizing {
        self.sizing
    }

    /// The raw slot array. Slot `0` is the root.
    #[inline]
    pub fn as_slots(&self) -> &[M::Value] {
        &self.slots
    }

    /// Aggregate over every leaf, or `None` for an empty tree.
    pub fn all(&self) -> Option<M::Value> {
        if self.is_empty() {
            None
        } else {
            Some(self.slots[0])
        }
    }

    pub fn get(&self, idx: usize) -> Result<M::Value> {
        self.check_index(idx)?;
        Ok(range_query::<M, _>(&self.slots, 0, 0, self.len - 1, idx, idx))
    }

    /// Overwrite leaf `idx` and refresh its ancestors.
    pub fn set(&mut self, idx: usize, value: M::Value) -> Result<()> {
        self.check_index(idx)?;
        ttrace!(idx, "TourneyTree::set");
        build::<M, _>(&mut self.slots, 0, 0, self.len - 1, idx, value);
        Ok(())
    }

    /// Aggregate of leaves `left..=right`.
    pub fn query(&self, left: usize, right: usize) -> Result<M::Value> {
        if self.is_empty() {
            twarn!(left, right, "TourneyTree::query on empty tree");
            return Err(TreeError::Empty);
        }
        if left > right {
            twarn!(left, right, "TourneyTree::query: inverted range");
            return Err(TreeError::InvalidRange { left, right });
        }
        if right >= self.len {
            twarn!(right, len = self.len, "TourneyTree::query: out-of-bounds range");
            return Err(TreeError::IndexOutOfBounds {
                index: right,
                len: self.len,
            });
        }
        ttrace!(left, right, "TourneyTree::query");
        Ok(range_query::<M, _>(&self.slots, 0, 0, self.len - 1, left, right))
    }

    /// Aggregate over a Rust range of leaves. Empty ranges such as `2..2`
    /// yield the identity of `M`.
    pub fn query_range<R: RangeBounds<usize>>(&self, range: R) -> Result<M::Value> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len,
        };

        if end > self.len {
            twarn!(end, len = self.len, "TourneyTree::query_range: out-of-bounds range");
            return Err(TreeError::IndexOutOfBounds {
                index: end - 1,
                len: self.len,
            });
        }
        if start > end {
            return Err(TreeError::InvalidRange {
                left: start,
                right: end.saturating_sub(1),
            });
        }
        if start == end {
            return Ok(M::identity());
        }
        self.query(start, end - 1)
    }

    fn check_index(&self, idx: usize) -> Result<()> {
        if self.is_empty() {
            twarn!(idx, "TourneyTree: index into empty tree");
            return Err(TreeError::Empty);
        }
        if idx >= self.len {
            twarn!(idx, len = self.len, "TourneyTree: out-of-bounds index");
            return Err(TreeError::IndexOutOfBounds {
                index: idx,
                len: self.len,
            });
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<'de, M: Merge> Deserialize<'de> for TourneyTree<M>
where
    M::Value: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawTree<V> {
            slots: Vec<V>,
            len: usize,
            sizing: Sizing,
        }

        let raw = RawTree::<M::Value>::deserialize(deserializer)?;
        // A tree over `len` leaves has at least `len` slots; checking that
        // first keeps `required_slots` away from absurd lengths.
        let required = if raw.len > raw.slots.len() {
            raw.len
        } else {
            required_slots(raw.len)
        };
        if raw.slots.len() < required {
            twarn!(len = raw.len, slots = raw.slots.len(), "TourneyTree: short slot array");
            return Err(serde::de::Error::custom(TreeError::StoreTooSmall {
                slots: raw.slots.len(),
                required,
            }));
        }
        Ok(Self::from_parts(raw.slots, raw.len, raw.sizing))
    }
}

impl<M: Merge> Default for TourneyTree<M> {
    fn default() -> Self {
        Self::with_len(0)
    }
}

impl<M: Merge> Clone for TourneyTree<M> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            len: self.len,
            sizing: self.sizing,
            _marker: PhantomData,
        }
    }
}

impl<M: Merge> std::fmt::Debug for TourneyTree<M>
where
    M::Value: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TourneyTree")
            .field("len", &self.len)
            .field("sizing", &self.sizing)
            .field("slots", &self.slots)
            .finish()
    }
}

impl<M: Merge> FromIterator<M::Value> for TourneyTree<M> {
    fn from_iter<I: IntoIterator<Item = M::Value>>(iter: I) -> Self {
        let values: Vec<M::Value> = iter.into_iter().collect();
        Self::from_slice(&values)
    }
}


#[cfg(test)]
mod proptests;
