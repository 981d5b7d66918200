//! `apply()`: apply one catalog operation to a payload.
//!
//! The single exported transform entry point. Two-phase check:
//! 1. Arity check: the payload arity must match the operation's input arity.
//! 2. Guard check: the operation-specific applicability guard must pass.
//!
//! Arithmetic is checked; an overflow fails like a guard. Expansion treats
//! every failure as "this operation produces no edge"; replay treats it as a
//! broken chain.

use crate::carrier::value_key::ValueKey;
use crate::operators::operator_catalog::Operation;

/// Largest operand accepted by factorial and by both sides of `^`.
pub const MAX_SMALL_OPERAND: i64 = 9;

/// `n!` for `n` in `0..=MAX_SMALL_OPERAND`.
const FACTORIALS: [i64; 10] = [1, 1, 2, 6, 24, 120, 720, 5040, 40_320, 362_880];

/// Typed failure for operation application. Fail-closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyFailure {
    /// Payload arity does not match the operation's input arity.
    ArityMismatch {
        op: Operation,
        expected: usize,
        found: usize,
    },
    /// The operation's applicability guard rejected the payload.
    GuardRejected { op: Operation, payload: ValueKey },
    /// The result is not representable as `i64`.
    Overflow { op: Operation, payload: ValueKey },
}

impl std::fmt::Display for ApplyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArityMismatch {
                op,
                expected,
                found,
            } => write!(f, "{op} expects arity {expected}, got {found}"),
            Self::GuardRejected { op, payload } => write!(f, "{op} not applicable to {payload}"),
            Self::Overflow { op, payload } => write!(f, "{op} overflows on {payload}"),
        }
    }
}

impl std::error::Error for ApplyFailure {}

/// Result type for apply.
pub type ApplyResult = Result<ValueKey, ApplyFailure>;

/// Apply `op` to `payload`.
///
/// # Errors
///
/// Returns [`ApplyFailure`] on:
/// - `ArityMismatch`: unary op on a pair or binary op on a single
/// - `GuardRejected`: negative root, factorial outside `0..=9`, division by
///   zero, `^` with an operand above 9 or a negative exponent
/// - `Overflow`: checked arithmetic failed
pub fn apply(op: Operation, payload: &ValueKey) -> ApplyResult {
    let rejected = || ApplyFailure::GuardRejected {
        op,
        payload: *payload,
    };
    let overflow = || ApplyFailure::Overflow {
        op,
        payload: *payload,
    };

    match (op, *payload) {
        (Operation::UnarySqrtFloor, ValueKey::Single(x)) => {
            floor_sqrt(x).map(ValueKey::Single).ok_or_else(rejected)
        }
        (Operation::UnarySqrtCeil, ValueKey::Single(x)) => {
            ceil_sqrt(x).map(ValueKey::Single).ok_or_else(rejected)
        }
        (Operation::UnaryFactorial, ValueKey::Single(x)) => {
            factorial(x).map(ValueKey::Single).ok_or_else(rejected)
        }
        (Operation::Abs, ValueKey::Single(x)) => {
            x.checked_abs().map(ValueKey::Single).ok_or_else(overflow)
        }

        (Operation::Add, ValueKey::Pair(x, y)) => {
            x.checked_add(y).map(ValueKey::Single).ok_or_else(overflow)
        }
        (Operation::Sub, ValueKey::Pair(x, y)) => {
            x.checked_sub(y).map(ValueKey::Single).ok_or_else(overflow)
        }
        (Operation::Mul, ValueKey::Pair(x, y)) => {
            x.checked_mul(y).map(ValueKey::Single).ok_or_else(overflow)
        }
        (Operation::DivFloor | Operation::DivCeil, ValueKey::Pair(_, 0)) => Err(rejected()),
        (Operation::DivFloor, ValueKey::Pair(x, y)) => {
            div_floor(x, y).map(ValueKey::Single).ok_or_else(overflow)
        }
        (Operation::DivCeil, ValueKey::Pair(x, y)) => {
            div_ceil(x, y).map(ValueKey::Single).ok_or_else(overflow)
        }
        (Operation::Pow, ValueKey::Pair(x, y)) => {
            if x > MAX_SMALL_OPERAND || y > MAX_SMALL_OPERAND {
                return Err(rejected());
            }
            let exp = u32::try_from(y).map_err(|_| rejected())?;
            x.checked_pow(exp).map(ValueKey::Single).ok_or_else(overflow)
        }

        (Operation::FactorialLeft, ValueKey::Pair(x, y)) => factorial(x)
            .map(|fx| ValueKey::Pair(fx, y))
            .ok_or_else(rejected),
        (Operation::FactorialRight, ValueKey::Pair(x, y)) => factorial(y)
            .map(|fy| ValueKey::Pair(x, fy))
            .ok_or_else(rejected),
        (Operation::SqrtFloorLeft, ValueKey::Pair(x, y)) => floor_sqrt(x)
            .map(|rx| ValueKey::Pair(rx, y))
            .ok_or_else(rejected),
        (Operation::SqrtCeilLeft, ValueKey::Pair(x, y)) => ceil_sqrt(x)
            .map(|rx| ValueKey::Pair(rx, y))
            .ok_or_else(rejected),
        (Operation::SqrtFloorRight, ValueKey::Pair(x, y)) => floor_sqrt(y)
            .map(|ry| ValueKey::Pair(x, ry))
            .ok_or_else(rejected),
        (Operation::SqrtCeilRight, ValueKey::Pair(x, y)) => ceil_sqrt(y)
            .map(|ry| ValueKey::Pair(x, ry))
            .ok_or_else(rejected),

        _ => Err(ApplyFailure::ArityMismatch {
            op,
            expected: op.input_arity(),
            found: payload.arity(),
        }),
    }
}

fn factorial(x: i64) -> Option<i64> {
    usize::try_from(x)
        .ok()
        .and_then(|i| FACTORIALS.get(i))
        .copied()
}

/// Exact `⌊√x⌋`; `None` for negative `x`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn floor_sqrt(x: i64) -> Option<i64> {
    if x < 0 {
        return None;
    }
    let x = x as u64;
    // Float estimate, then exact correction in integers.
    let mut r = (x as f64).sqrt() as u64;
    while r.checked_mul(r).map_or(true, |sq| sq > x) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= x) {
        r += 1;
    }
    i64::try_from(r).ok()
}

/// Exact `⌈√x⌉`; `None` for negative `x`.
fn ceil_sqrt(x: i64) -> Option<i64> {
    let r = floor_sqrt(x)?;
    if r * r == x {
        Some(r)
    } else {
        Some(r + 1)
    }
}

/// Division rounding toward negative infinity. `y != 0`.
fn div_floor(x: i64, y: i64) -> Option<i64> {
    let q = x.checked_div(y)?;
    if x % y != 0 && ((x < 0) != (y < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

/// Division rounding toward positive infinity. `y != 0`.
fn div_ceil(x: i64, y: i64) -> Option<i64> {
    let q = x.checked_div(y)?;
    if x % y != 0 && ((x < 0) == (y < 0)) {
        Some(q + 1)
    } else {
        Some(q)
    }
}
