//! Closure: every node reachable from a root, with one operation chain each.
//!
//! Explicit-stack depth-first traversal; no recursion, so chain depth is not
//! limited by the call stack.
//!
//! # Frame protocol
//!
//! Entering node `n` with exclusion set `E`:
//! 1. `E ∪= {n}`; snapshot the keys of `n.links` as the pending list.
//! 2. For each pending `m ∉ E`, descend into `m` with exclusion
//!    `E ∪ (keys(n.links) \ {n, m})`, read at the moment of descent.
//! 3. When `m`'s frame finishes, every `r` in `m.links` that `n` cannot yet
//!    reach gets `n.links[r] = n.links[m] ++ m.links[r]`.
//!
//! Existing chains are never replaced: the first chain found wins. The links
//! of intermediate nodes grow along the way; those entries are valid chains,
//! and later roots reuse them instead of rediscovering them.

use std::collections::BTreeSet;

use log::debug;

use crate::error::GraphError;
use crate::node::{Chain, NodeId};
use crate::registry::NodeRegistry;

/// Counters for one [`close_node`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosureStats {
    /// Frames pushed, root included.
    pub frames: u64,
    /// Deepest stack reached.
    pub max_depth: usize,
    /// Link entries the root holds afterwards, itself included.
    pub reachable: usize,
}

struct Frame {
    node: NodeId,
    exclusion: BTreeSet<NodeId>,
    pending: Vec<NodeId>,
    cursor: usize,
    /// Child whose frame is on top of this one, merged on return.
    child: Option<NodeId>,
}

impl Frame {
    fn enter(registry: &NodeRegistry, node: NodeId, mut exclusion: BTreeSet<NodeId>) -> Self {
        exclusion.insert(node);
        let pending = registry.node(node).links.keys().copied().collect();
        Self {
            node,
            exclusion,
            pending,
            cursor: 0,
            child: None,
        }
    }

    fn next_unexcluded(&mut self) -> Option<NodeId> {
        while let Some(&candidate) = self.pending.get(self.cursor) {
            self.cursor += 1;
            if !self.exclusion.contains(&candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// `E ∪ (keys(n.links) \ {n, child})`.
    fn child_exclusion(&self, registry: &NodeRegistry, child: NodeId) -> BTreeSet<NodeId> {
        let mut exclusion = self.exclusion.clone();
        exclusion.extend(
            registry
                .node(self.node)
                .links
                .keys()
                .copied()
                .filter(|&k| k != self.node && k != child),
        );
        exclusion
    }
}

/// Merge `child`'s links into `parent`'s, prefixing the hop to `child`.
fn merge_child(registry: &mut NodeRegistry, parent: NodeId, child: NodeId) {
    let parent_links = &registry.node(parent).links;
    let Some(hop) = parent_links.get(&child) else {
        return;
    };
    let additions: Vec<(NodeId, Chain)> = registry
        .node(child)
        .links
        .iter()
        .filter(|(target, _)| !parent_links.contains_key(target))
        .map(|(&target, tail)| {
            let mut chain = hop.clone();
            chain.extend_from_slice(tail);
            (target, chain)
        })
        .collect();

    registry.node_mut(parent).links.extend(additions);
}

/// Compute the full closure of `root` into `root.links` and mark it closed.
///
/// Running it again on a closed node finds nothing new.
pub fn close_node(registry: &mut NodeRegistry, root: NodeId) -> ClosureStats {
    let mut stats = ClosureStats::default();
    let mut stack = vec![Frame::enter(registry, root, BTreeSet::new())];
    stats.frames = 1;
    stats.max_depth = 1;

    while let Some(frame) = stack.last_mut() {
        if let Some(child) = frame.child.take() {
            merge_child(registry, frame.node, child);
        }

        let Some(child) = frame.next_unexcluded() else {
            stack.pop();
            continue;
        };
        let exclusion = frame.child_exclusion(registry, child);
        frame.child = Some(child);

        stack.push(Frame::enter(registry, child, exclusion));
        stats.frames += 1;
        stats.max_depth = stats.max_depth.max(stack.len());
    }

    let node = registry.node_mut(root);
    node.closed = true;
    stats.reachable = node.links.len();
    stats
}

/// Close every kernel node, in row-major payload order.
///
/// # Errors
///
/// Returns [`GraphError::NotFound`] if a kernel payload is missing from the
/// registry.
pub fn close_kernel(registry: &mut NodeRegistry) -> Result<Vec<ClosureStats>, GraphError> {
    let mut all = Vec::new();
    for payload in emplaka_kernel::carrier::value_key::ValueKey::kernel() {
        let id = registry.lookup(&payload)?;
        let stats = close_node(registry, id);
        debug!(
            "closed {payload}: reachable={} frames={} depth={}",
            stats.reachable, stats.frames, stats.max_depth
        );
        all.push(stats);
    }
    Ok(all)
}
