//! `NodeRegistry`: the node arena with payload interning.
//!
//! Nodes live in a `Vec` indexed by [`NodeId`]; a `HashMap` from payload to id
//! makes `intern` and `get` O(1). The arena is append-only, so an id handed
//! out once stays valid and any prefix `0..len` is a stable snapshot.

use std::collections::HashMap;

use emplaka_kernel::carrier::value_key::ValueKey;

use crate::error::GraphError;
use crate::node::{Node, NodeId};

/// Number of kernel nodes, `(0,0)..=(9,9)`.
pub const KERNEL_SIZE: usize = 100;

/// Owns every node. No two nodes hold equal payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
    index: HashMap<ValueKey, NodeId>,
}

impl NodeRegistry {
    /// An empty registry. Most callers want [`Self::with_kernel`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// A registry holding exactly the 100 kernel nodes, ids `0..100` in
    /// row-major order.
    #[must_use]
    pub fn with_kernel() -> Self {
        let mut registry = Self::new();
        for payload in ValueKey::kernel() {
            registry.intern(payload);
        }
        registry
    }

    /// Return the node holding `payload`, creating it if absent.
    ///
    /// # Panics
    ///
    /// Panics if the registry already holds `u32::MAX` nodes.
    pub fn intern(&mut self, payload: ValueKey) -> NodeId {
        if let Some(&id) = self.index.get(&payload) {
            return id;
        }
        let id = NodeId::from_index(self.nodes.len())
            .unwrap_or_else(|| panic!("node registry exceeded u32 capacity"));
        self.nodes.push(Node::new(id, payload));
        self.index.insert(payload, id);
        id
    }

    /// Look up without creating.
    #[must_use]
    pub fn get(&self, payload: &ValueKey) -> Option<NodeId> {
        self.index.get(payload).copied()
    }

    /// Look up, failing with [`GraphError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotFound`] if no node holds `payload`.
    pub fn lookup(&self, payload: &ValueKey) -> Result<NodeId, GraphError> {
        self.get(payload)
            .ok_or(GraphError::NotFound { payload: *payload })
    }

    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All `(id, node)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| NodeId::from_index(i).map(|id| (id, node)))
    }

    /// Ids of the kernel nodes present, in row-major payload order.
    #[must_use]
    pub fn kernel_ids(&self) -> Vec<NodeId> {
        ValueKey::kernel().filter_map(|p| self.get(&p)).collect()
    }

    /// Total link entries over all nodes, excluding each node's self-link.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.links.len() - 1).sum()
    }

    /// Rebuild from decoded nodes. Caller guarantees ids match positions and
    /// payloads are unique.
    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| NodeId::from_index(i).map(|id| (node.payload, id)))
            .collect();
        Self { nodes, index }
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
