//! Shared helpers for the emplaka benchmark suites.

use emplaka_kernel::carrier::value_key::ValueKey;
use emplaka_kernel::operators::operator_catalog::OperationCatalog;
use emplaka_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use emplaka_search::expansion::expand_to_fixed_point;
use emplaka_search::policy::EnginePolicyV1;
use emplaka_search::registry::NodeRegistry;
use emplaka_search::snapshot::encode;

/// Registry at the expansion fixed point, not yet closed.
///
/// # Panics
///
/// Panics if expansion exceeds the default budget.
#[must_use]
pub fn expanded_registry(catalog: &OperationCatalog) -> NodeRegistry {
    let mut registry = NodeRegistry::with_kernel();
    expand_to_fixed_point(&mut registry, catalog, &EnginePolicyV1::default())
        .expect("expansion within budget");
    registry
}

/// Digest of a registry's snapshot under the benchmark guard domain.
///
/// Compared before and after timing; a mismatch fails the run.
///
/// # Panics
///
/// Panics if the snapshot cannot be encoded.
#[must_use]
pub fn guard_digest(registry: &NodeRegistry, catalog: &OperationCatalog) -> ContentHash {
    let bytes = encode(registry, catalog).expect("snapshot encodes");
    canonical_hash(HashDomain::BenchGuard, &bytes)
}

/// Every plate as a (left, right) pair of kernel payloads, in plate order.
#[must_use]
pub fn all_plates() -> Vec<(ValueKey, ValueKey)> {
    let kernel: Vec<ValueKey> = ValueKey::kernel().collect();
    kernel
        .iter()
        .flat_map(|&l| kernel.iter().map(move |&r| (l, r)))
        .collect()
}
