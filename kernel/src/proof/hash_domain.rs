//! Typed domain separators for canonical hashing.
//!
//! Every production hash computation selects a domain via [`HashDomain`].
//! This module is the single authority for domain-separator byte strings.

/// Typed domain separator for [`super::hash::canonical_hash`].
///
/// Every variant maps to a unique, null-terminated byte string used as a
/// SHA-256 prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// Operation catalog canonical form (binds a snapshot to its catalog).
    OperationCatalog,
    /// Graph snapshot bytes (`graph.json`).
    GraphSnapshot,
    /// Benchmark determinism guard.
    BenchGuard,
}

impl HashDomain {
    /// All domain variants in declaration order.
    pub const ALL: &'static [HashDomain] =
        &[Self::OperationCatalog, Self::GraphSnapshot, Self::BenchGuard];

    /// The raw domain-separator bytes (null-terminated).
    #[must_use]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::OperationCatalog => b"EMPLAKA::OPERATION_CATALOG::V1\0",
            Self::GraphSnapshot => b"EMPLAKA::GRAPH_SNAPSHOT::V1\0",
            Self::BenchGuard => b"EMPLAKA::BENCH_GUARD::V1\0",
        }
    }
}

impl std::fmt::Display for HashDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::OperationCatalog => "OperationCatalog",
            Self::GraphSnapshot => "GraphSnapshot",
            Self::BenchGuard => "BenchGuard",
        };
        f.write_str(name)
    }
}
