// klujur-seq - Property-based tests for sequence laws
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests for sequence operations and invariants.
//!
//! Tests the following properties:
//! - materialization agrees with first/rest traversal
//! - map fusion and filter idempotence
//! - take/count and take/drop invariants
//! - chunked and eager-head representations agree
//! - partition_all covers the source exactly

mod common;

use common::*;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generate small integers for sequence elements
fn arb_small_int() -> impl Strategy<Value = i64> {
    -1000i64..1000i64
}

fn arb_items(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(arb_small_int(), 0..=max_len)
}

/// Same elements in either representation, with a random chunk size
fn arb_seq(max_len: usize) -> impl Strategy<Value = (Vec<i64>, Seq<i64>)> {
    (arb_items(max_len), 1usize..10, any::<bool>()).prop_map(|(items, size, as_chunks)| {
        let seq = if as_chunks {
            chunked(items.clone(), size)
        } else {
            cons_list(&items)
        };
        (items, seq)
    })
}

// =============================================================================
// Laws
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn materialize_matches_source((items, seq) in arb_seq(40)) {
        prop_assert_eq!(collect(&seq), items.clone());
        prop_assert_eq!(seq.count().unwrap(), items.len());
    }

    #[test]
    fn map_fusion((_items, seq) in arb_seq(40)) {
        let composed = seq.map(|x| x * 3).map(|x| x - 1);
        let fused = seq.map(|x| x * 3 - 1);
        prop_assert_eq!(collect(&composed), collect(&fused));
    }

    #[test]
    fn filter_idempotent((_items, seq) in arb_seq(40), m in 2i64..5) {
        let once = seq.filter(move |x| x % m == 0);
        let twice = once.filter(move |x| x % m == 0);
        prop_assert_eq!(collect(&once), collect(&twice));
    }

    #[test]
    fn filter_matches_iterator((items, seq) in arb_seq(40)) {
        let expected: Vec<i64> = items.iter().copied().filter(|x| *x > 0).collect();
        prop_assert_eq!(collect(&seq.filter(|x| *x > 0)), expected);
    }

    #[test]
    fn take_count((items, seq) in arb_seq(40), n in 0usize..60) {
        prop_assert_eq!(seq.take(n).count().unwrap(), n.min(items.len()));
    }

    #[test]
    fn take_concat_drop((items, seq) in arb_seq(40), n in 0usize..60) {
        let rejoined = seq.take(n).concat(&seq.drop(n));
        prop_assert_eq!(collect(&rejoined), items);
    }

    #[test]
    fn take_while_concat_drop_while((items, seq) in arb_seq(40), limit in arb_small_int()) {
        let front = seq.take_while(move |x| *x < limit);
        let back = seq.drop_while(move |x| *x < limit);
        prop_assert_eq!(collect(&front.concat(&back)), items);
    }

    #[test]
    fn reductions_last_is_reduce((_items, seq) in arb_seq(40)) {
        let scan = collect(&seq.reductions(0i64, |acc, x| acc + x));
        let total = seq.reduce(0i64, |acc, x| acc + x).unwrap();
        prop_assert_eq!(scan.last().copied(), Some(total));
        prop_assert_eq!(scan.len(), seq.count().unwrap() + 1);
    }

    #[test]
    fn distinct_has_no_duplicates((items, seq) in arb_seq(40)) {
        let result = collect(&seq.map(|x| x % 7).distinct());
        let set: std::collections::HashSet<i64> = items.iter().map(|x| x % 7).collect();
        prop_assert_eq!(result.len(), set.len());
    }

    #[test]
    fn nth_matches_index((items, seq) in arb_seq(40), i in 0i64..50) {
        match items.get(i as usize) {
            Some(x) => {
                prop_assert_eq!(seq.nth(i).unwrap(), *x);
            }
            None => {
                prop_assert_eq!(seq.nth(i), Err(Error::index(i)));
            }
        }
    }

    #[test]
    fn partition_all_covers_source((items, seq) in arb_seq(40), n in 1i64..8) {
        let flattened: Vec<i64> = collect(&seq.partition_all(n))
            .into_iter()
            .flatten()
            .collect();
        prop_assert_eq!(flattened, items);
    }

    #[test]
    fn chunked_and_cons_agree(items in arb_items(40), size in 1usize..10) {
        let a = chunked(items.clone(), size);
        let b = cons_list(&items);
        let run = |s: &Seq<i64>| collect(&s.drop(2).filter(|x| x % 2 == 0).map(|x| x / 2).take(10));
        prop_assert_eq!(run(&a), run(&b));
    }

    #[test]
    fn sorted_matches_vec_sort((items, seq) in arb_seq(40)) {
        let mut expected = items.clone();
        expected.sort();
        prop_assert_eq!(collect(&seq.sorted().unwrap()), expected);
    }
}
