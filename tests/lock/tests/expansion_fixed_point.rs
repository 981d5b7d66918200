//! Expansion fixed-point lock tests.
//!
//! Proves:
//! 1. A second expansion over a finished graph adds no node and no edge
//! 2. Every direct edge replays through `apply`
//! 3. Every applicable (operation, node) result is present in the registry
//! 4. The direct edge count is locked

use emplaka_kernel::operators::apply::apply;
use emplaka_kernel::operators::operator_catalog::OperationCatalog;
use emplaka_search::expansion::{direct_steps, expand_once, expand_to_fixed_point};
use emplaka_search::policy::EnginePolicyV1;
use emplaka_search::registry::NodeRegistry;

fn expanded() -> NodeRegistry {
    let mut registry = NodeRegistry::with_kernel();
    expand_to_fixed_point(
        &mut registry,
        &OperationCatalog::standard(),
        &EnginePolicyV1::default(),
    )
    .expect("expansion within budget");
    registry
}

#[test]
fn second_expansion_is_a_no_op() {
    let mut registry = expanded();
    let before = registry.clone();
    let pass = expand_once(&mut registry, &OperationCatalog::standard());
    assert_eq!(pass.nodes_added, 0);
    assert_eq!(pass.edges_added, 0);
    assert_eq!(registry, before);
}

#[test]
fn every_direct_edge_replays() {
    let registry = expanded();
    for (_, node) in registry.iter() {
        for (&target, chain) in &node.links {
            let target = registry.node(target).payload;
            if target == node.payload {
                assert!(chain.is_empty());
                continue;
            }
            assert_eq!(chain.len(), 1, "direct edge {} -> {target}", node.payload);
            assert_eq!(apply(chain[0], &node.payload), Ok(target));
        }
    }
}

#[test]
fn every_applicable_result_is_registered() {
    let registry = expanded();
    let catalog = OperationCatalog::standard();
    for (_, node) in registry.iter() {
        for (op, target) in direct_steps(&catalog, &node.payload) {
            let id = registry.get(&target).unwrap_or_else(|| {
                panic!("{} --{}--> {target} is not registered", node.payload, op.label())
            });
            if target != node.payload {
                assert!(node.links.contains_key(&id));
            }
        }
    }
}

/// ACCEPTANCE: direct edge count for the standard catalog.
#[test]
fn direct_edge_count_is_locked() {
    assert_eq!(expanded().edge_count(), 9220);
}
