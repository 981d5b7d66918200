//! Canonical JSON bytes: the single serialization used for snapshots and digests.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order).
//! 2. Compact form, no whitespace: `{"a":1,"b":[2,3]}`.
//! 3. Numbers must be integers (`i64` or `u64`). Floats are rejected.
//! 4. Strings use `serde_json`'s RFC 8259 escaping.
//!
//! Same `Value` in, same bytes out, independent of map insertion order.

use serde_json::Value;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A JSON number was not an integer.
    NonIntegerNumber { raw: String },
    /// The underlying writer failed (string escaping).
    Encode { detail: String },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerNumber { raw } => {
                write!(f, "non-integer number in canonical JSON: {raw}")
            }
            Self::Encode { detail } => write!(f, "canonical JSON encoding failed: {detail}"),
        }
    }
}

impl std::error::Error for CanonError {}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is not
/// representable as `i64` or `u64`.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    let mut out = Vec::new();
    emit(&mut out, value)?;
    Ok(out)
}

fn emit(out: &mut Vec<u8>, value: &Value) -> Result<(), CanonError> {
    match value {
        Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => {
            Err(CanonError::NonIntegerNumber { raw: n.to_string() })
        }
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                emit(out, item)?;
            }
            out.push(b']');
            Ok(())
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                emit_scalar(out, &Value::String(key.clone()))?;
                out.push(b':');
                emit(out, item)?;
            }
            out.push(b'}');
            Ok(())
        }
        scalar => emit_scalar(out, scalar),
    }
}

/// Null, bool, integer and string have exactly one compact encoding.
fn emit_scalar(out: &mut Vec<u8>, value: &Value) -> Result<(), CanonError> {
    serde_json::to_writer(out, value).map_err(|e| CanonError::Encode {
        detail: e.to_string(),
    })
}
