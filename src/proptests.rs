use super::tests::node_slots;
use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;

/// Reject any slot that disagrees with the aggregate of its two children.
fn validate_tree<M>(t: &TourneyTree<M>)
where
    M: Merge,
    M::Value: PartialEq + std::fmt::Debug,
{
    fn walk<M>(slots: &[M::Value], slot: usize, l: usize, r: usize)
    where
        M: Merge,
        M::Value: PartialEq + std::fmt::Debug,
    {
        if l == r {
            return;
        }
        let mid = split_point(l, r);
        let (left, right) = (left_child(slot), right_child(slot));
        assert_eq!(
            slots[slot],
            M::combine(slots[left], slots[right]),
            "slot {slot} covering [{l}, {r}] is stale"
        );
        walk::<M>(slots, left, l, mid);
        walk::<M>(slots, right, mid + 1, r);
    }

    assert!(t.slot_count() >= required_slots(t.len()));
    if !t.is_empty() {
        walk::<M>(t.as_slots(), 0, 0, t.len() - 1);
    }
}

fn naive_max(values: &[i64], l: usize, r: usize) -> i64 {
    values[l..=r].iter().copied().fold(i64::MIN, i64::max)
}

fn values_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000_000i64..1_000_000, 1..=300)
}

fn values_and_range() -> impl Strategy<Value = (Vec<i64>, usize, usize)> {
    values_strategy().prop_flat_map(|values| {
        let n = values.len();
        (Just(values), 0..n, 0..n)
            .prop_map(|(values, a, b)| (values, a.min(b), a.max(b)))
    })
}

fn sizing_strategy() -> impl Strategy<Value = Sizing> {
    prop_oneof![
        Just(Sizing::Exact),
        Just(Sizing::REFERENCE),
        (1usize..8).prop_map(Sizing::Factor),
    ]
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Set(usize, #[proptest(strategy = "-1_000_000i64..1_000_000")] i64),
    Query(usize, usize),
    Get(usize),
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_point_queries_after_sequential_build(
        values in values_strategy(),
        sizing in sizing_strategy()
    ) {
        let t: TourneyTree = TourneyTree::build_sequential(&values, sizing).unwrap();
        validate_tree(&t);
        for (i, &v) in values.iter().enumerate() {
            prop_assert_eq!(t.query(i, i), Ok(v));
            prop_assert_eq!(t.get(i), Ok(v));
        }
    }

    #[test]
    fn prop_global_max(values in values_strategy()) {
        let t: TourneyTree = TourneyTree::from_slice(&values);
        let expected = values.iter().copied().max();
        prop_assert_eq!(t.all(), expected);
        prop_assert_eq!(t.query(0, values.len() - 1).ok(), expected);
    }

    #[test]
    fn prop_arbitrary_range((values, l, r) in values_and_range()) {
        let t: TourneyTree = TourneyTree::from_slice(&values);
        let expected = naive_max(&values, l, r);
        prop_assert_eq!(t.query(l, r), Ok(expected));
        // Repeated queries on an unchanged tree agree.
        prop_assert_eq!(t.query(l, r), Ok(expected));
        prop_assert_eq!(t.query_range(l..=r), Ok(expected));
    }

    #[test]
    fn prop_raw_range_max_on_oversized_store((values, l, r) in values_and_range()) {
        let n = values.len();
        let mut store: Vec<i64> = alloc_zeroed(Sizing::REFERENCE.slots_for(n).unwrap());
        for (i, &v) in values.iter().enumerate() {
            build_max(&mut store, 0, 0, n - 1, i, v);
        }
        prop_assert_eq!(range_max(&store, 0, 0, n - 1, l, r), naive_max(&values, l, r));
        // Slots past the exact bound are never touched.
        prop_assert!(store[required_slots(n)..].iter().all(|&v| v == 0));
        release(store);
    }

    #[test]
    fn prop_bulk_build_equals_sequential(values in values_strategy()) {
        let bulk: TourneyTree = TourneyTree::from_slice(&values);
        let seq: TourneyTree = TourneyTree::build_sequential(&values, Sizing::Exact).unwrap();
        // Only node slots are compared; the rest keep each constructor's fill.
        let nodes = node_slots(&bulk);
        prop_assert_eq!(nodes.len(), 2 * values.len() - 1);
        prop_assert_eq!(nodes, node_slots(&seq));
    }

    #[test]
    fn prop_updates_match_naive(
        mut values in values_strategy(),
        ops in prop::collection::vec(any::<Op>(), 0..=500)
    ) {
        let n = values.len();
        let mut t: TourneyTree = TourneyTree::from_slice(&values);

        for op in ops {
            match op {
                Op::Set(idx, v) => {
                    let idx = idx % n;
                    let mut others: Vec<(usize, usize, i64)> = Vec::new();
                    if idx > 0 {
                        others.push((0, idx - 1, naive_max(&values, 0, idx - 1)));
                    }
                    if idx + 1 < n {
                        others.push((idx + 1, n - 1, naive_max(&values, idx + 1, n - 1)));
                    }

                    values[idx] = v;
                    prop_assert_eq!(t.set(idx, v), Ok(()));
                    prop_assert_eq!(t.query(idx, idx), Ok(v));

                    // Ranges that exclude `idx` keep their aggregate.
                    for (l, r, expected) in others {
                        prop_assert_eq!(t.query(l, r), Ok(expected));
                    }
                }
                Op::Query(a, b) => {
                    let (l, r) = ((a % n).min(b % n), (a % n).max(b % n));
                    prop_assert_eq!(t.query(l, r), Ok(naive_max(&values, l, r)));
                }
                Op::Get(idx) => {
                    let idx = idx % n;
                    prop_assert_eq!(t.get(idx), Ok(values[idx]));
                }
            }
        }

        validate_tree(&t);
    }

    #[test]
    fn prop_out_of_bounds_is_rejected(values in values_strategy(), extra in 0usize..1000) {
        let n = values.len();
        let mut t: TourneyTree = TourneyTree::from_slice(&values);
        let before = t.as_slots().to_vec();

        let oob = TreeError::IndexOutOfBounds { index: n + extra, len: n };
        prop_assert_eq!(t.set(n + extra, 1), Err(oob));
        prop_assert_eq!(t.query(0, n + extra), Err(oob));
        prop_assert_eq!(t.as_slots(), before.as_slice());
    }

    #[test]
    fn prop_min_tree(
        values in prop::collection::vec(any::<i32>(), 1..=200),
        a in any::<usize>(),
        b in any::<usize>()
    ) {
        let n = values.len();
        let (l, r) = ((a % n).min(b % n), (a % n).max(b % n));
        let t: TourneyTree<Min<i32>> = TourneyTree::from_slice(&values);
        validate_tree(&t);
        prop_assert_eq!(t.query(l, r), Ok(*values[l..=r].iter().min().unwrap()));
    }
}

#[test]
fn exhaustive_ranges_small_trees() {
    for n in 1..=24usize {
        // Alternate signs so zero-initialised slots would show up as wrong maxima.
        let values: Vec<i64> = (0..n as i64)
            .map(|i| if i % 2 == 0 { -i - 1 } else { i * 3 - 50 })
            .collect();
        let t: TourneyTree = TourneyTree::build_sequential(&values, Sizing::Exact).unwrap();
        validate_tree(&t);
        assert_eq!(t.slot_count(), required_slots(n));

        for l in 0..n {
            for r in l..n {
                assert_eq!(t.query(l, r), Ok(naive_max(&values, l, r)), "n = {n}, [{l}, {r}]");
            }
        }
    }
}

#[test]
fn exhaustive_single_updates_small_trees() {
    for n in 1..=12usize {
        let values: Vec<i64> = (0..n as i64).map(|i| (i * 7) % 5).collect();
        for idx in 0..n {
            let mut expected = values.clone();
            expected[idx] = 100;

            let mut t: TourneyTree = TourneyTree::from_slice(&values);
            t.set(idx, 100).unwrap();
            validate_tree(&t);

            for l in 0..n {
                for r in l..n {
                    assert_eq!(t.query(l, r), Ok(naive_max(&expected, l, r)));
                }
            }
        }
    }
}
