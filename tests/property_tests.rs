//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify that the
//! heap invariants are always maintained. The array heap doubles as a model
//! for the tree heap: both must agree position by position.

use proptest::prelude::*;
use rust_tree_heaps::array::ArrayHeap;
use rust_tree_heaps::tree::TreeHeap;
use rust_tree_heaps::{Heap, HeapError};

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    Remove,
    Change(usize, i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-100i32..100).prop_map(Op::Insert),
        1 => Just(Op::Remove),
        2 => (0usize..64, -100i32..100).prop_map(|(i, v)| Op::Change(i, v)),
    ]
}

fn positions<H: Heap<i32>>(heap: &H) -> Vec<i32> {
    (0..heap.len()).map(|i| *heap.get(i).unwrap()).collect()
}

fn check_heap_property<H: Heap<i32>>(heap: &H) -> Result<(), TestCaseError> {
    let values = positions(heap);
    for i in 1..values.len() {
        prop_assert!(
            values[(i - 1) / 2] >= values[i],
            "heap property broken at {}: {:?}",
            i,
            values
        );
    }
    prop_assert_eq!(heap.get(values.len()), None);
    Ok(())
}

/// Apply `ops` to any heap, checking invariants after every step
fn test_ops_invariant<H: Heap<i32>>(
    capacity: Option<usize>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut heap = match capacity {
        Some(c) => H::bounded(c),
        None => H::new(),
    };
    let mut model: Vec<i32> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(v) => {
                let result = heap.insert(v);
                if capacity == Some(model.len()) {
                    prop_assert_eq!(
                        result,
                        Err(HeapError::CapacityExceeded {
                            capacity: model.len()
                        })
                    );
                } else {
                    prop_assert_eq!(result, Ok(()));
                    model.push(v);
                }
            }
            Op::Remove => match model.iter().copied().max() {
                Some(max) => {
                    prop_assert_eq!(heap.remove(), Ok(max));
                    let pos = model.iter().position(|&v| v == max).unwrap();
                    model.swap_remove(pos);
                }
                None => prop_assert_eq!(heap.remove(), Err(HeapError::EmptyContainer)),
            },
            Op::Change(index, v) => {
                let result = heap.change(index, v);
                if model.is_empty() {
                    prop_assert_eq!(result, Err(HeapError::EmptyContainer));
                } else if index >= model.len() {
                    prop_assert_eq!(
                        result,
                        Err(HeapError::InvalidIndex {
                            index,
                            len: model.len()
                        })
                    );
                } else {
                    let old = result.unwrap();
                    let pos = model.iter().position(|&x| x == old).unwrap();
                    model[pos] = v;
                }
            }
        }

        prop_assert_eq!(heap.len(), model.len());
        prop_assert_eq!(heap.is_empty(), model.is_empty());
        prop_assert_eq!(heap.peek().copied(), model.iter().copied().max());
        check_heap_property(&heap)?;
    }

    Ok(())
}

/// Test that all removed elements come out in non-increasing order
fn test_remove_order_invariant<H: Heap<i32>>(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap = H::new();
    for v in &values {
        heap.insert(*v).unwrap();
    }

    let mut drained = Vec::with_capacity(values.len());
    while let Ok(v) = heap.remove() {
        drained.push(v);
    }

    let mut expected = values;
    expected.sort_unstable_by(|a, b| b.cmp(a));
    prop_assert_eq!(drained, expected);
    Ok(())
}

/// Test that k inserts and r removes leave k - r elements
fn test_len_invariant<H: Heap<i32>>(ops: Vec<(bool, i32)>) -> Result<(), TestCaseError> {
    let mut heap = H::new();
    let mut expected_len = 0;

    for (should_remove, value) in ops {
        if should_remove && !heap.is_empty() {
            heap.remove().unwrap();
            expected_len -= 1;
        } else {
            heap.insert(value).unwrap();
            expected_len += 1;
        }

        prop_assert_eq!(heap.len(), expected_len);
        prop_assert_eq!(heap.is_empty(), expected_len == 0);
    }

    Ok(())
}

proptest! {
    #[test]
    fn test_tree_ops_invariant(ops in prop::collection::vec(op_strategy(), 0..150)) {
        test_ops_invariant::<TreeHeap<i32>>(None, ops)?;
    }

    #[test]
    fn test_tree_bounded_ops_invariant(
        capacity in 0usize..20,
        ops in prop::collection::vec(op_strategy(), 0..150)
    ) {
        test_ops_invariant::<TreeHeap<i32>>(Some(capacity), ops)?;
    }

    #[test]
    fn test_array_ops_invariant(ops in prop::collection::vec(op_strategy(), 0..150)) {
        test_ops_invariant::<ArrayHeap<i32>>(None, ops)?;
    }

    #[test]
    fn test_tree_remove_order_invariant(values in prop::collection::vec(-100i32..100, 0..100)) {
        test_remove_order_invariant::<TreeHeap<i32>>(values)?;
    }

    #[test]
    fn test_array_remove_order_invariant(values in prop::collection::vec(-100i32..100, 0..100)) {
        test_remove_order_invariant::<ArrayHeap<i32>>(values)?;
    }

    #[test]
    fn test_tree_len_invariant(ops in prop::collection::vec((prop::bool::ANY, -100i32..100), 0..100)) {
        test_len_invariant::<TreeHeap<i32>>(ops)?;
    }

    #[test]
    fn test_tree_matches_array(ops in prop::collection::vec(op_strategy(), 0..150)) {
        let mut tree = TreeHeap::new();
        let mut array = ArrayHeap::new();
        for op in ops {
            let (t, a) = match op {
                Op::Insert(v) => (tree.insert(v).map(|_| None), array.insert(v).map(|_| None)),
                Op::Remove => (tree.remove().map(Some), array.remove().map(Some)),
                Op::Change(i, v) => (tree.change(i, v).map(Some), array.change(i, v).map(Some)),
            };
            prop_assert_eq!(t, a);
            prop_assert_eq!(positions(&tree), array.as_slice().to_vec());
            prop_assert!(tree.verify_internal_structure());
        }
        prop_assert_eq!(tree.render(), array.render());
    }

    #[test]
    fn test_change_round_trip(
        values in prop::collection::vec(-100i32..100, 1..60),
        index in 0usize..60,
        value in -100i32..100
    ) {
        let mut heap: TreeHeap<i32> = values.into_iter().collect();
        let index = index % heap.len();
        let parent = (index > 0).then(|| *heap.get((index - 1) / 2).unwrap());
        let children: Vec<i32> = [2 * index + 1, 2 * index + 2]
            .iter()
            .filter_map(|&c| heap.get(c).copied())
            .collect();

        heap.change(index, value).unwrap();
        prop_assert!(heap.verify_internal_structure());

        let fits = parent.map_or(true, |p| value <= p) && children.iter().all(|&c| c <= value);
        if fits {
            prop_assert_eq!(heap.get(index), Some(&value));
        }
    }

    #[test]
    fn test_in_order_visits_every_value(values in prop::collection::vec(-100i32..100, 0..100)) {
        let heap: TreeHeap<i32> = values.iter().copied().collect();
        let mut visited: Vec<i32> = heap.in_order().copied().collect();
        let mut expected = values;
        visited.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(visited, expected);
    }
}
