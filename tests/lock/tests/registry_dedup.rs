//! Registry identity lock tests.
//!
//! Proves:
//! 1. The kernel is exactly the 100 digit pairs, interned first, in row-major order
//! 2. No payload is held by two nodes after the fixed point
//! 3. `get` and `lookup` agree with the arena for every node
//! 4. The standard graph's size is locked

use std::collections::BTreeSet;

use emplaka_kernel::carrier::value_key::ValueKey;
use emplaka_search::error::GraphError;
use emplaka_search::registry::KERNEL_SIZE;
use lock_tests::standard_graph;

#[test]
fn kernel_is_interned_first_in_row_major_order() {
    let registry = &standard_graph().registry;
    let kernel_ids = registry.kernel_ids();
    assert_eq!(kernel_ids.len(), KERNEL_SIZE);
    for (i, (id, payload)) in kernel_ids.iter().zip(ValueKey::kernel()).enumerate() {
        assert_eq!(id.index(), i, "kernel node {payload} is not at position {i}");
        assert_eq!(registry.node(*id).payload, payload);
        assert!(payload.is_kernel());
    }
}

#[test]
fn no_duplicate_payloads() {
    let registry = &standard_graph().registry;
    let payloads: BTreeSet<ValueKey> = registry.iter().map(|(_, n)| n.payload).collect();
    assert_eq!(payloads.len(), registry.len());
}

#[test]
fn get_and_lookup_agree_with_the_arena() {
    let registry = &standard_graph().registry;
    for (id, node) in registry.iter() {
        assert_eq!(registry.get(&node.payload), Some(id));
        assert_eq!(registry.lookup(&node.payload), Ok(id));
    }
    let absent = ValueKey::Pair(-7, 1_000_003);
    assert_eq!(registry.get(&absent), None);
    assert_eq!(
        registry.lookup(&absent),
        Err(GraphError::NotFound { payload: absent })
    );
}

/// ACCEPTANCE: if this count changes, a transform or guard changed.
#[test]
fn standard_graph_size_is_locked() {
    let registry = &standard_graph().registry;
    let pairs = registry.iter().filter(|(_, n)| n.payload.arity() == 2).count();
    assert_eq!(registry.len(), 1952);
    assert_eq!(pairs, 841);
    assert!(registry.iter().all(|(_, n)| n.filled));
}
