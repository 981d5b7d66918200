//! Shared helpers for the lock tests.
//!
//! The standard graph is built once per test binary and shared by its tests.

use std::collections::{BTreeSet, VecDeque};
use std::sync::OnceLock;

use emplaka_kernel::operators::operator_catalog::OperationCatalog;
use emplaka_search::engine::{build_graph, BuiltGraph};
use emplaka_search::expansion::direct_steps;
use emplaka_search::node::NodeId;
use emplaka_search::policy::EnginePolicyV1;
use emplaka_search::registry::NodeRegistry;

/// The full graph for [`OperationCatalog::standard`], built once.
///
/// # Panics
///
/// Panics if the standard graph fails to build.
pub fn standard_graph() -> &'static BuiltGraph {
    static GRAPH: OnceLock<BuiltGraph> = OnceLock::new();
    GRAPH.get_or_init(|| {
        build_graph(&OperationCatalog::standard(), &EnginePolicyV1::default())
            .expect("standard graph builds")
    })
}

/// Nodes reachable from `start` by direct catalog steps, `start` included.
///
/// Computed from `apply` alone, independently of any stored links.
///
/// # Panics
///
/// Panics if a step reaches a payload the registry does not hold.
pub fn bfs_reachable(
    registry: &NodeRegistry,
    catalog: &OperationCatalog,
    start: NodeId,
) -> BTreeSet<NodeId> {
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(id) = queue.pop_front() {
        for (_, target) in direct_steps(catalog, &registry.node(id).payload) {
            let target = registry
                .get(&target)
                .unwrap_or_else(|| panic!("{target} is missing from the registry"));
            if seen.insert(target) {
                queue.push_back(target);
            }
        }
    }
    seen
}
