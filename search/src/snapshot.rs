//! Graph snapshot: canonical JSON form of a finished registry.
//!
//! # Format (`emplaka.graph.v1`)
//!
//! ```text
//! {
//!   "catalog_digest": "sha256:...",
//!   "nodes": [
//!     {"closed": true, "filled": true, "id": 0,
//!      "links": [[0, []], [101, ["+"]], ...], "payload": [0, 0]},
//!     ...
//!   ],
//!   "schema_version": "emplaka.graph.v1"
//! }
//! ```
//!
//! Nodes appear in id order; links in target-id order. Decoding is
//! fail-closed: any structural problem rejects the whole snapshot, because a
//! partially loaded graph would answer queries wrongly.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use emplaka_kernel::carrier::value_key::ValueKey;
use emplaka_kernel::operators::operator_catalog::{Operation, OperationCatalog};
use emplaka_kernel::proof::canon::canonical_json_bytes;

use crate::node::{Chain, Node, NodeId};
use crate::registry::NodeRegistry;

/// Snapshot schema identifier.
pub const GRAPH_SCHEMA_VERSION: &str = "emplaka.graph.v1";

/// Error encoding or decoding a graph snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Bytes are not JSON.
    Parse { detail: String },
    /// `schema_version` is missing or not recognized.
    SchemaMismatch { found: String },
    /// The snapshot was built with a different operation catalog.
    CatalogMismatch { expected: String, found: String },
    /// A field is missing or has the wrong shape.
    Malformed { detail: String },
    /// Two nodes hold the same payload.
    DuplicatePayload { payload: ValueKey },
    /// A link points at a node id that does not exist.
    DanglingLink { from: u64, to: u64 },
    /// A link chain names an unknown operation.
    UnknownOperation { label: String },
    /// Canonical JSON or catalog digest failed.
    Canon { detail: String },
    /// A kernel payload has no node.
    KernelMissing { payload: ValueKey },
    /// A kernel node's closure was never computed.
    KernelNotClosed { payload: ValueKey },
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { detail } => write!(f, "snapshot parse error: {detail}"),
            Self::SchemaMismatch { found } => {
                write!(f, "snapshot schema mismatch: found {found:?}")
            }
            Self::CatalogMismatch { expected, found } => write!(
                f,
                "snapshot catalog mismatch: expected {expected}, found {found}"
            ),
            Self::Malformed { detail } => write!(f, "malformed snapshot: {detail}"),
            Self::DuplicatePayload { payload } => {
                write!(f, "duplicate payload in snapshot: {payload}")
            }
            Self::DanglingLink { from, to } => {
                write!(f, "node {from} links to missing node {to}")
            }
            Self::UnknownOperation { label } => {
                write!(f, "unknown operation label in snapshot: {label:?}")
            }
            Self::Canon { detail } => write!(f, "snapshot canonicalization failed: {detail}"),
            Self::KernelMissing { payload } => {
                write!(f, "snapshot has no node for kernel payload {payload}")
            }
            Self::KernelNotClosed { payload } => {
                write!(f, "snapshot kernel node {payload} is not closed")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

fn malformed(detail: impl Into<String>) -> SnapshotError {
    SnapshotError::Malformed {
        detail: detail.into(),
    }
}

fn catalog_digest(catalog: &OperationCatalog) -> Result<String, SnapshotError> {
    catalog
        .digest()
        .map(|d| d.as_str().to_string())
        .map_err(|e| SnapshotError::Canon {
            detail: e.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

fn node_to_json(id: NodeId, node: &Node) -> Value {
    let links: Vec<Value> = node
        .links
        .iter()
        .map(|(target, chain)| {
            let labels: Vec<&str> = chain.iter().map(|op| op.label()).collect();
            serde_json::json!([target.index() as u64, labels])
        })
        .collect();
    serde_json::json!({
        "closed": node.closed,
        "filled": node.filled,
        "id": id.index() as u64,
        "links": links,
        "payload": node.payload.to_vec(),
    })
}

/// Snapshot as a JSON value.
///
/// # Errors
///
/// Returns [`SnapshotError::Canon`] if the catalog digest cannot be computed.
pub fn to_json_value(
    registry: &NodeRegistry,
    catalog: &OperationCatalog,
) -> Result<Value, SnapshotError> {
    let nodes: Vec<Value> = registry
        .iter()
        .map(|(id, node)| node_to_json(id, node))
        .collect();
    Ok(serde_json::json!({
        "catalog_digest": catalog_digest(catalog)?,
        "nodes": nodes,
        "schema_version": GRAPH_SCHEMA_VERSION,
    }))
}

/// Snapshot as canonical JSON bytes.
///
/// # Errors
///
/// Returns [`SnapshotError::Canon`] if serialization fails.
pub fn encode(registry: &NodeRegistry, catalog: &OperationCatalog) -> Result<Vec<u8>, SnapshotError> {
    let value = to_json_value(registry, catalog)?;
    canonical_json_bytes(&value).map_err(|e| SnapshotError::Canon {
        detail: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

fn field<'v>(obj: &'v Value, key: &str, context: &str) -> Result<&'v Value, SnapshotError> {
    obj.get(key)
        .ok_or_else(|| malformed(format!("{context}: missing field {key:?}")))
}

fn as_u64(value: &Value, context: &str) -> Result<u64, SnapshotError> {
    value
        .as_u64()
        .ok_or_else(|| malformed(format!("{context}: expected unsigned integer")))
}

fn as_bool(value: &Value, context: &str) -> Result<bool, SnapshotError> {
    value
        .as_bool()
        .ok_or_else(|| malformed(format!("{context}: expected bool")))
}

fn as_array<'v>(value: &'v Value, context: &str) -> Result<&'v Vec<Value>, SnapshotError> {
    value
        .as_array()
        .ok_or_else(|| malformed(format!("{context}: expected array")))
}

fn decode_payload(value: &Value, context: &str) -> Result<ValueKey, SnapshotError> {
    let members = as_array(value, context)?
        .iter()
        .map(|v| {
            v.as_i64()
                .ok_or_else(|| malformed(format!("{context}: payload member is not i64")))
        })
        .collect::<Result<Vec<i64>, _>>()?;
    ValueKey::from_values(&members).map_err(|e| malformed(format!("{context}: {e}")))
}

fn decode_chain(value: &Value, context: &str) -> Result<Chain, SnapshotError> {
    as_array(value, context)?
        .iter()
        .map(|label| {
            let label = label
                .as_str()
                .ok_or_else(|| malformed(format!("{context}: label is not a string")))?;
            Operation::parse(label).map_err(|e| SnapshotError::UnknownOperation { label: e.label })
        })
        .collect()
}

fn decode_links(
    value: &Value,
    from: u64,
    node_count: usize,
    context: &str,
) -> Result<BTreeMap<NodeId, Chain>, SnapshotError> {
    let mut links = BTreeMap::new();
    for entry in as_array(value, context)? {
        let pair = as_array(entry, context)?;
        let [target, chain] = pair.as_slice() else {
            return Err(malformed(format!("{context}: link is not [target, chain]")));
        };
        let to = as_u64(target, context)?;
        let target_id = usize::try_from(to)
            .ok()
            .filter(|&i| i < node_count)
            .and_then(NodeId::from_index)
            .ok_or(SnapshotError::DanglingLink { from, to })?;
        if links.insert(target_id, decode_chain(chain, context)?).is_some() {
            return Err(malformed(format!("{context}: duplicate link target {to}")));
        }
    }
    Ok(links)
}

/// Decode and validate a snapshot produced by [`encode`] with `catalog`.
///
/// Checks: schema version, catalog digest, dense ordered ids, payload arity,
/// unique payloads, link targets exist, labels parse, every node's
/// self-link is present and empty, and every kernel payload has a closed
/// node.
///
/// # Errors
///
/// Returns the first [`SnapshotError`] found.
pub fn decode(bytes: &[u8], catalog: &OperationCatalog) -> Result<NodeRegistry, SnapshotError> {
    let root: Value = serde_json::from_slice(bytes).map_err(|e| SnapshotError::Parse {
        detail: e.to_string(),
    })?;

    let version = root
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if version != GRAPH_SCHEMA_VERSION {
        return Err(SnapshotError::SchemaMismatch {
            found: version.to_string(),
        });
    }

    let expected = catalog_digest(catalog)?;
    let found = field(&root, "catalog_digest", "snapshot")?
        .as_str()
        .unwrap_or_default();
    if found != expected {
        return Err(SnapshotError::CatalogMismatch {
            expected,
            found: found.to_string(),
        });
    }

    let entries = as_array(field(&root, "nodes", "snapshot")?, "nodes")?;
    let node_count = entries.len();
    let mut seen: HashSet<ValueKey> = HashSet::with_capacity(node_count);
    let mut nodes = Vec::with_capacity(node_count);

    for (index, entry) in entries.iter().enumerate() {
        let context = format!("node[{index}]");
        let id = as_u64(field(entry, "id", &context)?, &context)?;
        let node_id = NodeId::from_index(index)
            .filter(|n| n.index() as u64 == id)
            .ok_or_else(|| malformed(format!("{context}: id {id} out of order")))?;

        let payload = decode_payload(field(entry, "payload", &context)?, &context)?;
        if !seen.insert(payload) {
            return Err(SnapshotError::DuplicatePayload { payload });
        }

        let links = decode_links(field(entry, "links", &context)?, id, node_count, &context)?;
        if links.get(&node_id).map(Vec::is_empty) != Some(true) {
            return Err(malformed(format!("{context}: self-link missing or non-empty")));
        }

        nodes.push(Node {
            payload,
            filled: as_bool(field(entry, "filled", &context)?, &context)?,
            closed: as_bool(field(entry, "closed", &context)?, &context)?,
            links,
        });
    }

    let registry = NodeRegistry::from_nodes(nodes);
    for payload in ValueKey::kernel() {
        let id = registry
            .get(&payload)
            .ok_or(SnapshotError::KernelMissing { payload })?;
        if !registry.node(id).closed {
            return Err(SnapshotError::KernelNotClosed { payload });
        }
    }
    Ok(registry)
}
