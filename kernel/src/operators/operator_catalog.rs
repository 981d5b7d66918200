//! `OperationCatalog`: the normative set of arithmetic operations.
//!
//! Each [`Operation`] declares its label (the stable identifier written to
//! snapshots and printed to players), the payload arity it consumes and the
//! arity it produces. Guards and transforms live in `apply.rs`; the catalog is
//! the **contract surface**, `apply` is the **implementation**.
//!
//! Content-addressed via canonical JSON so a persisted graph can be bound to
//! the catalog that produced it.

use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// One arithmetic operation of the plate puzzle.
///
/// Variant order is catalog order: unary operations first, then binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    UnarySqrtFloor,
    UnarySqrtCeil,
    UnaryFactorial,
    Abs,
    Add,
    Sub,
    Mul,
    DivFloor,
    DivCeil,
    Pow,
    FactorialLeft,
    FactorialRight,
    SqrtFloorLeft,
    SqrtCeilLeft,
    SqrtFloorRight,
    SqrtCeilRight,
}

impl Operation {
    /// Every operation in catalog order.
    pub const ALL: [Operation; 16] = [
        Self::UnarySqrtFloor,
        Self::UnarySqrtCeil,
        Self::UnaryFactorial,
        Self::Abs,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::DivFloor,
        Self::DivCeil,
        Self::Pow,
        Self::FactorialLeft,
        Self::FactorialRight,
        Self::SqrtFloorLeft,
        Self::SqrtCeilLeft,
        Self::SqrtFloorRight,
        Self::SqrtCeilRight,
    ];

    /// Canonical label. Persisted and printed; never change an existing one.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnarySqrtFloor => "unary √floor",
            Self::UnarySqrtCeil => "unary √ceil",
            Self::UnaryFactorial => "unary !",
            Self::Abs => "abs",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::DivFloor => "/floor",
            Self::DivCeil => "/ceil",
            Self::Pow => "^",
            Self::FactorialLeft => "binary ! (left)",
            Self::FactorialRight => "binary ! (right)",
            Self::SqrtFloorLeft => "binary √floor (left)",
            Self::SqrtCeilLeft => "binary √ceil (left)",
            Self::SqrtFloorRight => "binary √floor (right)",
            Self::SqrtCeilRight => "binary √ceil (right)",
        }
    }

    /// Parse from canonical label.
    ///
    /// # Errors
    ///
    /// Returns [`OperationParseError`] if `label` names no operation.
    pub fn parse(label: &str) -> Result<Self, OperationParseError> {
        Self::ALL
            .into_iter()
            .find(|op| op.label() == label)
            .ok_or_else(|| OperationParseError {
                label: label.to_string(),
            })
    }

    /// Arity of the payload this operation consumes.
    #[must_use]
    pub const fn input_arity(self) -> usize {
        match self {
            Self::UnarySqrtFloor | Self::UnarySqrtCeil | Self::UnaryFactorial | Self::Abs => 1,
            _ => 2,
        }
    }

    /// Arity of the payload this operation produces.
    ///
    /// One-sided binary operations keep the pair and transform one member.
    #[must_use]
    pub const fn output_arity(self) -> usize {
        match self {
            Self::FactorialLeft
            | Self::FactorialRight
            | Self::SqrtFloorLeft
            | Self::SqrtCeilLeft
            | Self::SqrtFloorRight
            | Self::SqrtCeilRight => 2,
            _ => 1,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A label that names no catalog operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationParseError {
    pub label: String,
}

impl std::fmt::Display for OperationParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown operation label: {:?}", self.label)
    }
}

impl std::error::Error for OperationParseError {}

// ---------------------------------------------------------------------------
// CatalogError
// ---------------------------------------------------------------------------

/// Error type for catalog construction and serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The same operation was listed twice.
    DuplicateOperation { op: Operation },
    /// Canonical JSON serialization failed.
    CanonicalizationError { detail: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateOperation { op } => {
                write!(f, "duplicate operation in catalog: {op}")
            }
            Self::CanonicalizationError { detail } => {
                write!(f, "operation catalog canonicalization failed: {detail}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<CanonError> for CatalogError {
    fn from(e: CanonError) -> Self {
        Self::CanonicalizationError {
            detail: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// OperationCatalog
// ---------------------------------------------------------------------------

/// The operations available to expansion, split by input arity.
///
/// Within each arity, operations keep the order they were given in. That order
/// decides which label wins when two operations produce the same neighbor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationCatalog {
    unary: Vec<Operation>,
    binary: Vec<Operation>,
}

impl OperationCatalog {
    /// The full puzzle catalog: all 16 operations in catalog order.
    #[must_use]
    pub fn standard() -> Self {
        let (unary, binary): (Vec<Operation>, Vec<Operation>) = Operation::ALL
            .into_iter()
            .partition(|op| op.input_arity() == 1);
        Self { unary, binary }
    }

    /// Build a catalog from an explicit operation list (e.g. a test subset).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateOperation`] if an operation repeats.
    pub fn from_operations(ops: &[Operation]) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            unary: Vec::new(),
            binary: Vec::new(),
        };
        for &op in ops {
            if catalog.contains(op) {
                return Err(CatalogError::DuplicateOperation { op });
            }
            if op.input_arity() == 1 {
                catalog.unary.push(op);
            } else {
                catalog.binary.push(op);
            }
        }
        Ok(catalog)
    }

    /// Operations that consume a payload of `arity`, in catalog order.
    #[must_use]
    pub fn for_arity(&self, arity: usize) -> &[Operation] {
        match arity {
            1 => &self.unary,
            2 => &self.binary,
            _ => &[],
        }
    }

    /// Whether `op` is part of this catalog.
    #[must_use]
    pub fn contains(&self, op: Operation) -> bool {
        self.unary.contains(&op) || self.binary.contains(&op)
    }

    /// All operations: unary first, then binary.
    pub fn iter(&self) -> impl Iterator<Item = Operation> + '_ {
        self.unary.iter().chain(self.binary.iter()).copied()
    }

    /// Number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unary.len() + self.binary.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Canonical JSON bytes: labels with their arities, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CanonicalizationError`] if canonical JSON
    /// serialization fails.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CatalogError> {
        let ops: Vec<serde_json::Value> = self
            .iter()
            .map(|op| {
                serde_json::json!({
                    "input_arity": op.input_arity() as u64,
                    "label": op.label(),
                    "output_arity": op.output_arity() as u64,
                })
            })
            .collect();
        let value = serde_json::json!({
            "operations": ops,
            "schema_version": "emplaka.catalog.v1",
        });
        Ok(canonical_json_bytes(&value)?)
    }

    /// Content hash of [`Self::canonical_bytes`].
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogError`] from canonicalization.
    pub fn digest(&self) -> Result<ContentHash, CatalogError> {
        let bytes = self.canonical_bytes()?;
        Ok(canonical_hash(HashDomain::OperationCatalog, &bytes))
    }
}

impl Default for OperationCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
