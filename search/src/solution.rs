//! Puzzle answers: nodes reachable from both halves of a plate.

use emplaka_kernel::carrier::value_key::ValueKey;
use emplaka_kernel::operators::operator_catalog::Operation;

use crate::error::GraphError;
use crate::node::{Node, NodeId};
use crate::registry::NodeRegistry;

/// A node reachable from both the left and right pair, with one chain each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub node: NodeId,
    pub payload: ValueKey,
    pub left_chain: Vec<Operation>,
    pub right_chain: Vec<Operation>,
}

impl Solution {
    /// The solution value, for arity-1 payloads.
    #[must_use]
    pub fn value(&self) -> Option<i64> {
        self.payload.as_single()
    }

    /// Whether this is a player-facing answer (a single produced integer).
    ///
    /// Shared pair nodes are valid graph intersections but not answers.
    #[must_use]
    pub fn is_answer(&self) -> bool {
        self.payload.arity() == 1
    }
}

/// Query interface over a closed registry.
#[derive(Debug, Clone, Copy)]
pub struct SolutionFinder<'a> {
    registry: &'a NodeRegistry,
}

impl<'a> SolutionFinder<'a> {
    #[must_use]
    pub fn new(registry: &'a NodeRegistry) -> Self {
        Self { registry }
    }

    fn closed_node(&self, payload: &ValueKey) -> Result<&'a Node, GraphError> {
        let node = self.registry.node(self.registry.lookup(payload)?);
        if node.closed {
            Ok(node)
        } else {
            Err(GraphError::NotClosed { payload: *payload })
        }
    }

    /// Every node in both closures, ordered by [`NodeId`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotFound`] if either payload has no node, or
    /// [`GraphError::NotClosed`] if its closure was never computed.
    pub fn solve(&self, left: &ValueKey, right: &ValueKey) -> Result<Vec<Solution>, GraphError> {
        let left_node = self.closed_node(left)?;
        let right_node = self.closed_node(right)?;

        Ok(left_node
            .links
            .iter()
            .filter_map(|(&id, left_chain)| {
                right_node.links.get(&id).map(|right_chain| Solution {
                    node: id,
                    payload: self.registry.node(id).payload,
                    left_chain: left_chain.clone(),
                    right_chain: right_chain.clone(),
                })
            })
            .collect())
    }

    /// The arity-1 subset of [`Self::solve`]: what the player is shown.
    ///
    /// # Errors
    ///
    /// Same as [`Self::solve`].
    pub fn answers(&self, left: &ValueKey, right: &ValueKey) -> Result<Vec<Solution>, GraphError> {
        let mut all = self.solve(left, right)?;
        all.retain(Solution::is_answer);
        Ok(all)
    }
}
