//! `ValueKey`: canonical numeric payload of a graph node.
//!
//! A payload is either a single integer (a produced value) or an ordered pair
//! (a leftover operand pair). Arity is fixed at construction. Equality and
//! hashing are value-based; this is the only identity criterion for nodes.

/// Number of distinct decimal digits; the kernel is `DIGITS × DIGITS` pairs.
pub const DIGITS: i64 = 10;

/// A node payload of arity 1 or 2.
///
/// `Ord` sorts all singles before all pairs, then element-wise. Only used for
/// deterministic output ordering, never for identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKey {
    /// A single produced integer, e.g. the result of `x + y`.
    Single(i64),
    /// An operand pair `(x, y)`.
    Pair(i64, i64),
}

/// Error building a `ValueKey` from an untyped integer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKeyError {
    /// Only arity 1 and 2 are representable.
    UnsupportedArity { arity: usize },
}

impl std::fmt::Display for ValueKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedArity { arity } => {
                write!(f, "payload arity must be 1 or 2, got {arity}")
            }
        }
    }
}

impl std::error::Error for ValueKeyError {}

impl ValueKey {
    /// Number of integers in the payload (1 or 2).
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Pair(..) => 2,
        }
    }

    /// The single produced value, if this payload has arity 1.
    #[must_use]
    pub const fn as_single(&self) -> Option<i64> {
        match self {
            Self::Single(x) => Some(*x),
            Self::Pair(..) => None,
        }
    }

    /// Payload members in order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<i64> {
        match *self {
            Self::Single(x) => vec![x],
            Self::Pair(x, y) => vec![x, y],
        }
    }

    /// Rebuild a payload from its members.
    ///
    /// # Errors
    ///
    /// Returns [`ValueKeyError::UnsupportedArity`] unless `values` has exactly
    /// one or two members.
    pub fn from_values(values: &[i64]) -> Result<Self, ValueKeyError> {
        match *values {
            [x] => Ok(Self::Single(x)),
            [x, y] => Ok(Self::Pair(x, y)),
            _ => Err(ValueKeyError::UnsupportedArity {
                arity: values.len(),
            }),
        }
    }

    /// Whether this is one of the 100 digit pairs `(0,0)..=(9,9)`.
    #[must_use]
    pub fn is_kernel(&self) -> bool {
        match *self {
            Self::Pair(x, y) => (0..DIGITS).contains(&x) && (0..DIGITS).contains(&y),
            Self::Single(_) => false,
        }
    }

    /// All kernel payloads in row-major order: `(0,0), (0,1), ..., (9,9)`.
    pub fn kernel() -> impl Iterator<Item = ValueKey> {
        (0..DIGITS).flat_map(|i| (0..DIGITS).map(move |j| ValueKey::Pair(i, j)))
    }
}

impl std::fmt::Display for ValueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(x) => write!(f, "({x})"),
            Self::Pair(x, y) => write!(f, "({x}, {y})"),
        }
    }
}
