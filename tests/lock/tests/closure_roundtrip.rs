//! Closure lock tests.
//!
//! Proves:
//! 1. Every stored chain replays from its node's payload to its target,
//!    including the links closure leaves on intermediate nodes
//! 2. Kernel coverage equals breadth-first reachability over `apply`
//! 3. Every node's own chain is empty
//! 4. Re-closing a closed kernel changes nothing
//! 5. The total number of kernel link entries is locked

use emplaka_kernel::operators::operator_catalog::OperationCatalog;
use emplaka_kernel::proof::replay::verify_chain;
use emplaka_search::closure::close_kernel;
use lock_tests::{bfs_reachable, standard_graph};

#[test]
fn every_stored_chain_replays() {
    let registry = &standard_graph().registry;
    for id in registry.kernel_ids() {
        assert!(registry.node(id).closed);
    }
    for (_, node) in registry.iter() {
        for (&target, chain) in &node.links {
            let target = registry.node(target).payload;
            if let Err(e) = verify_chain(&node.payload, chain, &target) {
                panic!("{} -> {target}: {e}", node.payload);
            }
        }
    }
}

#[test]
fn coverage_equals_reachability() {
    let registry = &standard_graph().registry;
    let catalog = OperationCatalog::standard();
    for id in registry.kernel_ids() {
        let expected = bfs_reachable(registry, &catalog, id);
        let actual: Vec<_> = registry.node(id).links.keys().copied().collect();
        assert_eq!(
            actual,
            expected.into_iter().collect::<Vec<_>>(),
            "coverage of {}",
            registry.node(id).payload
        );
    }
}

#[test]
fn own_chain_is_empty_everywhere() {
    let registry = &standard_graph().registry;
    for (id, node) in registry.iter() {
        assert_eq!(node.chain_to(id), Some(&[][..]), "{}", node.payload);
    }
}

#[test]
fn reclosing_is_a_no_op() {
    let mut registry = standard_graph().registry.clone();
    close_kernel(&mut registry).expect("kernel present");
    assert_eq!(&registry, &standard_graph().registry);
}

/// ACCEPTANCE: sum of kernel closure sizes, self included.
#[test]
fn kernel_link_total_is_locked() {
    let registry = &standard_graph().registry;
    let total: usize = registry
        .kernel_ids()
        .into_iter()
        .map(|id| registry.node(id).links.len())
        .sum();
    assert_eq!(total, 40202);
}
