//! Graph node and node handle types.

use std::collections::BTreeMap;

use emplaka_kernel::carrier::value_key::ValueKey;
use emplaka_kernel::operators::operator_catalog::Operation;

/// Stable handle of a node inside its [`crate::NodeRegistry`].
///
/// Dense: ids are `0..registry.len()` in creation order. The 100 kernel nodes
/// always hold ids `0..100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Position in the registry arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Build from an arena position. `None` if it does not fit.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Operation chain from one node's payload to another's.
pub type Chain = Vec<Operation>;

/// A graph node. Owned by the registry; referenced elsewhere by [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The payload that identifies this node.
    pub payload: ValueKey,
    /// Expansion has been attempted on this node.
    pub filled: bool,
    /// Closure has been computed with this node as the root.
    pub closed: bool,
    /// Known targets with one chain each. Always contains `self -> []`.
    ///
    /// `BTreeMap` so that traversal order, and therefore which chain is found
    /// first, is deterministic.
    pub links: BTreeMap<NodeId, Chain>,
}

impl Node {
    /// A fresh, unfilled node that only knows how to reach itself.
    #[must_use]
    pub fn new(id: NodeId, payload: ValueKey) -> Self {
        let mut links = BTreeMap::new();
        links.insert(id, Chain::new());
        Self {
            payload,
            filled: false,
            closed: false,
            links,
        }
    }

    /// Chain to `target`, if known.
    #[must_use]
    pub fn chain_to(&self, target: NodeId) -> Option<&[Operation]> {
        self.links.get(&target).map(Vec::as_slice)
    }
}
