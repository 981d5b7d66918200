//! Graph build pipeline.
//!
//! ```text
//! with_kernel() → expand_to_fixed_point() → close_kernel()
//! ```
//!
//! The result is immutable for query purposes: every kernel node is closed
//! and [`crate::SolutionFinder`] can answer any plate.

use log::info;

use emplaka_kernel::operators::operator_catalog::OperationCatalog;

use crate::closure::{close_kernel, ClosureStats};
use crate::error::GraphError;
use crate::expansion::{expand_to_fixed_point, ExpansionSummary};
use crate::policy::EnginePolicyV1;
use crate::registry::NodeRegistry;

/// A fully built graph plus the counters gathered while building it.
#[derive(Debug, Clone)]
pub struct BuiltGraph {
    pub registry: NodeRegistry,
    pub expansion: ExpansionSummary,
    /// One entry per kernel node, in row-major payload order.
    pub closures: Vec<ClosureStats>,
}

/// Build the complete graph for `catalog`.
///
/// # Errors
///
/// Returns [`GraphError`] if the policy is invalid or expansion runs out of
/// budget.
pub fn build_graph(
    catalog: &OperationCatalog,
    policy: &EnginePolicyV1,
) -> Result<BuiltGraph, GraphError> {
    let mut registry = NodeRegistry::with_kernel();
    let expansion = expand_to_fixed_point(&mut registry, catalog, policy)?;
    info!(
        "fixed point: {} nodes, {} direct edges, {} passes",
        expansion.node_count,
        expansion.edge_count,
        expansion.passes.len()
    );

    let closures = close_kernel(&mut registry)?;
    let frames: u64 = closures.iter().map(|s| s.frames).sum();
    info!(
        "closed {} kernel nodes ({} frames, {} link entries)",
        closures.len(),
        frames,
        registry.edge_count()
    );

    Ok(BuiltGraph {
        registry,
        expansion,
        closures,
    })
}
