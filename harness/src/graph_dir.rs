//! Graph directory persistence: write/read a finished graph to/from disk.
//!
//! # Directory layout (`GraphDirectoryV1`)
//!
//! ```text
//! <dir>/
//!   graph.json          -- canonical JSON snapshot (see `emplaka_search::snapshot`)
//!   graph_digest.txt    -- ASCII digest of graph.json ("sha256:...")
//! ```
//!
//! # Fail-closed semantics
//!
//! - Missing file → error
//! - Extra files → error
//! - Digest mismatch → error
//! - Snapshot that fails decoding or validation → error
//!
//! A graph that cannot be read completely is never returned in part.

use std::collections::BTreeSet;
use std::path::Path;

use log::warn;

use emplaka_kernel::operators::operator_catalog::OperationCatalog;
use emplaka_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use emplaka_search::registry::NodeRegistry;
use emplaka_search::snapshot::{self, SnapshotError};

/// Snapshot filename.
pub const GRAPH_FILENAME: &str = "graph.json";
/// Digest filename.
pub const DIGEST_FILENAME: &str = "graph_digest.txt";

const DIR_FILENAMES: &[&str] = &[GRAPH_FILENAME, DIGEST_FILENAME];

/// Error writing a graph directory.
#[derive(Debug)]
pub enum GraphDirWriteError {
    /// I/O error during write.
    Io { detail: String },
    /// The registry could not be encoded.
    Snapshot(SnapshotError),
}

impl std::fmt::Display for GraphDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::Snapshot(e) => write!(f, "snapshot error: {e}"),
        }
    }
}

impl std::error::Error for GraphDirWriteError {}

/// Error reading a graph directory.
#[derive(Debug)]
pub enum GraphDirReadError {
    /// I/O error during read.
    Io { detail: String },
    /// A required file is missing.
    MissingFile { filename: String },
    /// A file that is not part of the layout exists in the directory.
    ExtraFile { name: String },
    /// `graph_digest.txt` does not hold a digest.
    InvalidDigest { raw: String },
    /// `graph_digest.txt` does not match the recomputed digest.
    DigestMismatch { stored: String, recomputed: String },
    /// The snapshot failed decoding or validation.
    Snapshot(SnapshotError),
}

impl std::fmt::Display for GraphDirReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingFile { filename } => write!(f, "missing file: {filename}"),
            Self::ExtraFile { name } => write!(f, "undeclared extra file: {name}"),
            Self::InvalidDigest { raw } => write!(f, "invalid digest: {raw:?}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(
                    f,
                    "digest mismatch: stored={stored}, recomputed={recomputed}"
                )
            }
            Self::Snapshot(e) => write!(f, "snapshot error: {e}"),
        }
    }
}

impl std::error::Error for GraphDirReadError {}

/// Digest of snapshot bytes as written to `graph_digest.txt`.
#[must_use]
pub fn graph_digest(graph_bytes: &[u8]) -> ContentHash {
    canonical_hash(HashDomain::GraphSnapshot, graph_bytes)
}

/// Write `registry` to `dir` in `GraphDirectoryV1` format.
///
/// Creates the directory if it does not exist. Returns the digest written.
///
/// # Errors
///
/// Returns [`GraphDirWriteError`] on encoding or I/O failure.
pub fn write_graph_dir(
    registry: &NodeRegistry,
    catalog: &OperationCatalog,
    dir: &Path,
) -> Result<ContentHash, GraphDirWriteError> {
    let bytes = snapshot::encode(registry, catalog).map_err(GraphDirWriteError::Snapshot)?;
    let digest = graph_digest(&bytes);

    std::fs::create_dir_all(dir).map_err(|e| GraphDirWriteError::Io {
        detail: format!("create_dir_all {}: {e}", dir.display()),
    })?;
    // Digest last: a crash between the two writes leaves a mismatch, not a
    // stale-but-valid pair.
    write_atomic(dir, GRAPH_FILENAME, &bytes)?;
    write_atomic(dir, DIGEST_FILENAME, digest.as_str().as_bytes())?;
    Ok(digest)
}

/// Read and fully validate a `GraphDirectoryV1` directory.
///
/// # Errors
///
/// Returns [`GraphDirReadError`] on any validation failure.
pub fn read_graph_dir(
    dir: &Path,
    catalog: &OperationCatalog,
) -> Result<NodeRegistry, GraphDirReadError> {
    let graph_bytes = read_required(dir, GRAPH_FILENAME)?;
    let digest_bytes = read_required(dir, DIGEST_FILENAME)?;

    let allowed: BTreeSet<&str> = DIR_FILENAMES.iter().copied().collect();
    for name in list_files(dir)? {
        if !allowed.contains(name.as_str()) {
            return Err(GraphDirReadError::ExtraFile { name });
        }
    }

    let raw = String::from_utf8_lossy(&digest_bytes).trim().to_string();
    let stored = ContentHash::parse(&raw).ok_or(GraphDirReadError::InvalidDigest { raw })?;
    let recomputed = graph_digest(&graph_bytes);
    if stored != recomputed {
        warn!(
            "graph digest mismatch in {}: stored={stored} recomputed={recomputed}",
            dir.display()
        );
        return Err(GraphDirReadError::DigestMismatch {
            stored: stored.as_str().to_string(),
            recomputed: recomputed.as_str().to_string(),
        });
    }

    snapshot::decode(&graph_bytes, catalog).map_err(|e| {
        warn!("graph snapshot in {} rejected: {e}", dir.display());
        GraphDirReadError::Snapshot(e)
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Write via temp file + rename in the same directory.
fn write_atomic(dir: &Path, filename: &str, content: &[u8]) -> Result<(), GraphDirWriteError> {
    let path = dir.join(filename);
    let temp_path = dir.join(format!(".tmp_{filename}"));
    std::fs::write(&temp_path, content).map_err(|e| GraphDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, &path).map_err(|e| GraphDirWriteError::Io {
        detail: format!("rename {} → {}: {e}", temp_path.display(), path.display()),
    })
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, GraphDirReadError> {
    std::fs::read(dir.join(filename)).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => GraphDirReadError::MissingFile {
            filename: filename.to_string(),
        },
        _ => GraphDirReadError::Io {
            detail: format!("read {filename}: {e}"),
        },
    })
}

/// Regular files in `dir`, by name.
fn list_files(dir: &Path) -> Result<Vec<String>, GraphDirReadError> {
    let io = |e: std::io::Error| GraphDirReadError::Io {
        detail: format!("read_dir {}: {e}", dir.display()),
    };
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io)? {
        let entry = entry.map_err(io)?;
        if entry.file_type().map_err(io)?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
