//! Harness runner: orchestrates search and kernel APIs for the binaries.
//!
//! # Pipelines
//!
//! ```text
//! build:  build_graph() → verify_chains() → write_graph_dir()
//! query:  read_graph_dir() → verify_chains() → Plate::parse() → SolutionFinder::answers()
//! ```
//!
//! Nothing here computes reachability; chain verification goes through the
//! kernel's `verify_chain`, so a graph is audited by an independent replay
//! of every stored link both before it reaches disk and after it is loaded.

use std::path::Path;

use log::info;
use serde_json::{json, Value};

use emplaka_kernel::operators::operator_catalog::{CatalogError, OperationCatalog};
use emplaka_kernel::proof::hash::ContentHash;
use emplaka_kernel::proof::replay::{verify_chain, ReplayError};
use emplaka_search::engine::{build_graph, BuiltGraph};
use emplaka_search::error::GraphError;
use emplaka_search::policy::EnginePolicyV1;
use emplaka_search::registry::NodeRegistry;
use emplaka_search::solution::{Solution, SolutionFinder};

use crate::graph_dir::{read_graph_dir, write_graph_dir, GraphDirReadError, GraphDirWriteError};
use crate::plate::{Plate, PlateError};

/// Default snapshot directory for both binaries.
pub const DEFAULT_GRAPH_DIR: &str = "emplaka_graph";

/// Error during a harness run.
#[derive(Debug)]
pub enum RunError {
    /// Graph construction or query failed.
    Graph(GraphError),
    /// The catalog could not be digested.
    Catalog(CatalogError),
    /// A stored kernel chain does not replay to its target.
    ChainReplay {
        from: String,
        to: String,
        error: ReplayError,
    },
    /// Writing the snapshot directory failed.
    Write(GraphDirWriteError),
    /// Reading the snapshot directory failed.
    Read(GraphDirReadError),
    /// The plate input was rejected.
    Plate(PlateError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Graph(e) => write!(f, "graph error: {e}"),
            Self::Catalog(e) => write!(f, "catalog error: {e}"),
            Self::ChainReplay { from, to, error } => {
                write!(f, "chain {from} -> {to} does not replay: {error}")
            }
            Self::Write(e) => write!(f, "cannot write graph: {e}"),
            Self::Read(e) => write!(f, "cannot read graph: {e}"),
            Self::Plate(e) => write!(f, "invalid plate: {e}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<GraphError> for RunError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

impl From<CatalogError> for RunError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

impl From<GraphDirWriteError> for RunError {
    fn from(e: GraphDirWriteError) -> Self {
        Self::Write(e)
    }
}

impl From<GraphDirReadError> for RunError {
    fn from(e: GraphDirReadError) -> Self {
        Self::Read(e)
    }
}

impl From<PlateError> for RunError {
    fn from(e: PlateError) -> Self {
        Self::Plate(e)
    }
}

/// Replay every stored link of every node. Returns the number of chains
/// checked.
///
/// Kernel links are the ones queries read; the rest are closure by-products
/// that the snapshot persists too.
///
/// # Errors
///
/// Returns [`RunError::ChainReplay`] for the first chain that fails.
pub fn verify_chains(registry: &NodeRegistry) -> Result<usize, RunError> {
    let mut checked = 0;
    for (_, node) in registry.iter() {
        for (&target, chain) in &node.links {
            let target_payload = registry.node(target).payload;
            verify_chain(&node.payload, chain, &target_payload).map_err(|error| {
                RunError::ChainReplay {
                    from: node.payload.to_string(),
                    to: target_payload.to_string(),
                    error,
                }
            })?;
            checked += 1;
        }
    }
    Ok(checked)
}

/// Build the full graph and audit it by replay.
///
/// # Errors
///
/// Returns [`RunError`] if building fails or any kernel chain diverges.
pub fn build_and_verify(
    catalog: &OperationCatalog,
    policy: &EnginePolicyV1,
) -> Result<BuiltGraph, RunError> {
    policy.validate()?;
    let built = build_graph(catalog, policy)?;
    let checked = verify_chains(&built.registry)?;
    info!("replayed {checked} chains");
    Ok(built)
}

/// Build, verify and write the graph to `dir`. Returns the graph and the
/// digest written to `graph_digest.txt`.
///
/// # Errors
///
/// Returns [`RunError`] on build, verification or write failure.
pub fn build_to_dir(
    catalog: &OperationCatalog,
    policy: &EnginePolicyV1,
    dir: &Path,
) -> Result<(BuiltGraph, ContentHash), RunError> {
    let built = build_and_verify(catalog, policy)?;
    let digest = write_graph_dir(&built.registry, catalog, dir)?;
    info!("wrote graph to {} ({digest})", dir.display());
    Ok((built, digest))
}

/// Load a snapshot directory written for `catalog` and replay its chains.
///
/// # Errors
///
/// Returns [`RunError::Read`] if the directory is missing, corrupt, not
/// fully closed or was written for another catalog, and
/// [`RunError::ChainReplay`] if a stored chain does not reach its target.
pub fn load_graph(dir: &Path, catalog: &OperationCatalog) -> Result<NodeRegistry, RunError> {
    let registry = read_graph_dir(dir, catalog)?;
    verify_chains(&registry)?;
    info!(
        "loaded graph from {}: {} nodes, {} link entries",
        dir.display(),
        registry.len(),
        registry.edge_count()
    );
    Ok(registry)
}

/// Player-facing answers for a parsed plate.
///
/// # Errors
///
/// Returns [`RunError::Graph`] if either half is absent or not closed.
pub fn answer(registry: &NodeRegistry, plate: &Plate) -> Result<Vec<Solution>, RunError> {
    let finder = SolutionFinder::new(registry);
    Ok(finder.answers(&plate.left(), &plate.right())?)
}

/// Parse `input` as a plate and answer it.
///
/// # Errors
///
/// Returns [`RunError::Plate`] for bad input, otherwise as [`answer`].
pub fn answer_input(
    registry: &NodeRegistry,
    input: &str,
) -> Result<(Plate, Vec<Solution>), RunError> {
    let plate = Plate::parse(input)?;
    let solutions = answer(registry, &plate)?;
    Ok((plate, solutions))
}

/// Build summary printed by `emplaka-build`.
///
/// # Errors
///
/// Returns [`RunError::Catalog`] if the catalog cannot be digested.
pub fn build_report(
    built: &BuiltGraph,
    catalog: &OperationCatalog,
    digest: &ContentHash,
) -> Result<Value, RunError> {
    let frames: u64 = built.closures.iter().map(|s| s.frames).sum();
    let max_depth = built
        .closures
        .iter()
        .map(|s| s.max_depth)
        .max()
        .unwrap_or(0);
    Ok(json!({
        "catalog_digest": catalog.digest()?.as_str(),
        "closure_frames": frames,
        "closure_max_depth": max_depth,
        "expansion_passes": built.expansion.passes.len(),
        "graph_digest": digest.as_str(),
        "link_entries": built.registry.edge_count(),
        "node_count": built.registry.len(),
    }))
}
