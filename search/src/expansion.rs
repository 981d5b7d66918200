//! Expansion: grow the registry until no operation yields a new payload.
//!
//! One pass fills every node that existed when the pass started. Filling a
//! node applies each catalog operation of matching arity, interns the
//! result, and records a one-operation direct edge to it. Nodes created
//! during a pass wait for the next one.

use log::{debug, info};

use emplaka_kernel::carrier::value_key::ValueKey;
use emplaka_kernel::operators::apply::apply;
use emplaka_kernel::operators::operator_catalog::{Operation, OperationCatalog};

use crate::error::GraphError;
use crate::node::{Chain, NodeId};
use crate::policy::EnginePolicyV1;
use crate::registry::NodeRegistry;

/// Counters for one expansion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionPass {
    /// Nodes filled during this pass.
    pub nodes_filled: usize,
    /// Nodes created during this pass.
    pub nodes_added: usize,
    /// Direct edges recorded during this pass.
    pub edges_added: usize,
}

/// Outcome of [`expand_to_fixed_point`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionSummary {
    /// Per-pass counters, in order. The last pass added no nodes.
    pub passes: Vec<ExpansionPass>,
    /// Registry size at the fixed point.
    pub node_count: usize,
    /// Direct edges over the whole registry at the fixed point.
    pub edge_count: usize,
}

/// Every legal one-operation step from `payload`, in catalog order.
///
/// Operations whose guard rejects the payload are skipped silently.
#[must_use]
pub fn direct_steps(catalog: &OperationCatalog, payload: &ValueKey) -> Vec<(Operation, ValueKey)> {
    catalog
        .for_arity(payload.arity())
        .iter()
        .filter_map(|&op| apply(op, payload).ok().map(|result| (op, result)))
        .collect()
}

/// Fill one node: intern each step result and record a direct edge.
///
/// When two operations reach the same target, the later one in catalog order
/// is kept. A step back onto the node's own payload records nothing, so
/// `links[self]` stays empty. Returns the number of distinct targets linked.
fn fill(registry: &mut NodeRegistry, catalog: &OperationCatalog, id: NodeId) -> usize {
    let payload = registry.node(id).payload;
    let mut edges: Vec<(NodeId, Operation)> = Vec::new();
    for (op, result) in direct_steps(catalog, &payload) {
        let target = registry.intern(result);
        if target != id {
            edges.push((target, op));
        }
    }

    let node = registry.node_mut(id);
    let before = node.links.len();
    for (target, op) in edges {
        node.links.insert(target, Chain::from([op]));
    }
    node.filled = true;
    node.links.len() - before
}

/// Fill every unfilled node that exists at the start of the pass.
///
/// Marks each visited node `filled` even when it produced no edges.
pub fn expand_once(registry: &mut NodeRegistry, catalog: &OperationCatalog) -> ExpansionPass {
    let snapshot_len = registry.len();
    let mut pass = ExpansionPass::default();

    for index in 0..snapshot_len {
        let Some(id) = NodeId::from_index(index) else {
            break;
        };
        if registry.node(id).filled {
            continue;
        }
        pass.edges_added += fill(registry, catalog, id);
        pass.nodes_filled += 1;
    }

    pass.nodes_added = registry.len() - snapshot_len;
    debug!(
        "expansion pass: filled={} added={} edges={}",
        pass.nodes_filled, pass.nodes_added, pass.edges_added
    );
    pass
}

/// Run [`expand_once`] until a pass registers no new nodes.
///
/// Calling it again on a finished registry performs one empty pass.
///
/// # Errors
///
/// Returns [`GraphError::InvalidPolicy`] if the policy fails validation, or
/// [`GraphError::ExpansionBudgetExceeded`] if the pass or node budget runs
/// out before the fixed point.
pub fn expand_to_fixed_point(
    registry: &mut NodeRegistry,
    catalog: &OperationCatalog,
    policy: &EnginePolicyV1,
) -> Result<ExpansionSummary, GraphError> {
    policy.validate()?;
    let mut summary = ExpansionSummary::default();

    loop {
        let pass_number = summary.passes.len() as u64;
        if pass_number >= policy.max_passes {
            return Err(GraphError::ExpansionBudgetExceeded {
                passes: pass_number,
                node_count: registry.len(),
                detail: format!("max_passes={} reached", policy.max_passes),
            });
        }

        let pass = expand_once(registry, catalog);
        summary.passes.push(pass);
        info!(
            "expansion pass {}: {} nodes (+{})",
            pass_number + 1,
            registry.len(),
            pass.nodes_added
        );

        if registry.len() > policy.max_nodes {
            return Err(GraphError::ExpansionBudgetExceeded {
                passes: pass_number + 1,
                node_count: registry.len(),
                detail: format!("max_nodes={} exceeded", policy.max_nodes),
            });
        }
        if pass.nodes_added == 0 {
            break;
        }
    }

    summary.node_count = registry.len();
    summary.edge_count = registry.edge_count();
    Ok(summary)
}
