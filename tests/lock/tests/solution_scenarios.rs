//! Solution lock tests over the standard graph.
//!
//! Proves:
//! 1. Plate 0000: every node reachable from (0, 0) is a solution, and (0, 0)
//!    itself is one with two empty chains
//! 2. Plate 1234: the answer set is locked and every chain replays
//! 3. Solutions are symmetric: swapping halves swaps the chains
//! 4. A catalog too small to connect two pairs yields no solutions

use emplaka_kernel::carrier::value_key::ValueKey;
use emplaka_kernel::operators::operator_catalog::{Operation, OperationCatalog};
use emplaka_kernel::proof::replay::verify_chain;
use emplaka_search::engine::build_graph;
use emplaka_search::policy::EnginePolicyV1;
use emplaka_search::solution::SolutionFinder;
use lock_tests::standard_graph;

#[test]
fn zero_plate_solves_to_its_whole_closure() {
    let registry = &standard_graph().registry;
    let finder = SolutionFinder::new(registry);
    let zero = ValueKey::Pair(0, 0);

    let all = finder.solve(&zero, &zero).expect("kernel is closed");
    let payloads: Vec<ValueKey> = all.iter().map(|s| s.payload).collect();
    let mut sorted = payloads.clone();
    sorted.sort();
    assert_eq!(
        sorted,
        vec![
            ValueKey::Single(-1),
            ValueKey::Single(0),
            ValueKey::Single(1),
            ValueKey::Single(2),
            ValueKey::Pair(0, 0),
            ValueKey::Pair(0, 1),
            ValueKey::Pair(1, 0),
            ValueKey::Pair(1, 1),
        ]
    );

    let own = all.iter().find(|s| s.payload == zero).expect("self solution");
    assert!(own.left_chain.is_empty());
    assert!(own.right_chain.is_empty());

    let answers = finder.answers(&zero, &zero).expect("kernel is closed");
    let values: Vec<i64> = answers.iter().filter_map(|s| s.value()).collect();
    assert_eq!(values.len(), 4);
    assert!(answers.iter().all(|s| s.left_chain == s.right_chain));
}

/// ACCEPTANCE: answer values for plate 1234.
#[test]
fn plate_1234_answers_are_locked_and_replay() {
    let registry = &standard_graph().registry;
    let finder = SolutionFinder::new(registry);
    let left = ValueKey::Pair(1, 2);
    let right = ValueKey::Pair(3, 4);

    let answers = finder.answers(&left, &right).expect("kernel is closed");
    let mut values: Vec<i64> = answers.iter().filter_map(|s| s.value()).collect();
    values.sort_unstable();
    assert_eq!(
        values,
        vec![-1, 0, 1, 2, 3, 4, 5, 6, 10, 11, 24, 26, 27, 120, 720]
    );

    for s in &answers {
        verify_chain(&left, &s.left_chain, &s.payload).expect("left chain replays");
        verify_chain(&right, &s.right_chain, &s.payload).expect("right chain replays");
    }
    let three = answers.iter().find(|s| s.value() == Some(3)).expect("3");
    assert_eq!(three.left_chain, vec![Operation::Add]);
}

#[test]
fn swapping_halves_swaps_chains() {
    let registry = &standard_graph().registry;
    let finder = SolutionFinder::new(registry);
    let a = ValueKey::Pair(9, 7);
    let b = ValueKey::Pair(2, 5);
    let forward = finder.solve(&a, &b).expect("kernel is closed");
    let backward = finder.solve(&b, &a).expect("kernel is closed");
    assert_eq!(forward.len(), backward.len());
    for (f, r) in forward.iter().zip(&backward) {
        assert_eq!(f.node, r.node);
        assert_eq!(f.left_chain, r.right_chain);
        assert_eq!(f.right_chain, r.left_chain);
    }
}

#[test]
fn add_only_catalog_has_no_solution_for_1234() {
    let catalog = OperationCatalog::from_operations(&[Operation::Add]).expect("one op");
    let built = build_graph(&catalog, &EnginePolicyV1::default()).expect("builds");
    let finder = SolutionFinder::new(&built.registry);
    let all = finder
        .solve(&ValueKey::Pair(1, 2), &ValueKey::Pair(3, 4))
        .expect("kernel is closed");
    assert!(all.is_empty());
}
