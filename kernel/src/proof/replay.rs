//! Chain replay: re-apply a stored operation chain and compare the result.
//!
//! A stored link `n.links[r] = chain` is only trustworthy if applying `chain`
//! to `n`'s payload, one operation at a time and under each guard, lands
//! exactly on `r`'s payload. Replay is how snapshots and closure output are
//! audited.

use crate::carrier::value_key::ValueKey;
use crate::operators::apply::{apply, ApplyFailure};
use crate::operators::operator_catalog::Operation;

/// Error during chain replay.
///
/// `StepFailed` means the chain could not be replayed at all; `Divergence`
/// means it replayed but ended on the wrong payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// Operation `step_index` failed its arity or guard check.
    StepFailed {
        step_index: usize,
        failure: ApplyFailure,
    },
    /// The chain replayed cleanly but produced a different payload.
    Divergence {
        expected: ValueKey,
        actual: ValueKey,
    },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StepFailed {
                step_index,
                failure,
            } => write!(f, "chain step {step_index} failed: {failure}"),
            Self::Divergence { expected, actual } => {
                write!(f, "chain diverged: expected {expected}, reached {actual}")
            }
        }
    }
}

impl std::error::Error for ReplayError {}

/// Apply `chain` to `start` in order and return the final payload.
///
/// An empty chain returns `start` unchanged.
///
/// # Errors
///
/// Returns [`ReplayError::StepFailed`] at the first operation that fails.
pub fn replay_chain(start: &ValueKey, chain: &[Operation]) -> Result<ValueKey, ReplayError> {
    chain
        .iter()
        .enumerate()
        .try_fold(*start, |current, (step_index, &op)| {
            apply(op, &current).map_err(|failure| ReplayError::StepFailed {
                step_index,
                failure,
            })
        })
}

/// Verify that `chain` takes `start` to `expected`.
///
/// # Errors
///
/// Returns [`ReplayError::StepFailed`] if an operation fails, or
/// [`ReplayError::Divergence`] if the chain ends elsewhere.
pub fn verify_chain(
    start: &ValueKey,
    chain: &[Operation],
    expected: &ValueKey,
) -> Result<(), ReplayError> {
    let actual = replay_chain(start, chain)?;
    if actual == *expected {
        Ok(())
    } else {
        Err(ReplayError::Divergence {
            expected: *expected,
            actual,
        })
    }
}
