//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. Canonical domain set has expected count
//! 2. All domain byte strings are unique
//! 3. All domains follow the `EMPLAKA::*::V1\0` convention
//! 4. No raw `EMPLAKA::` domain literals in production source outside `hash_domain.rs`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use emplaka_kernel::proof::hash::HashDomain;

#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        3,
        "expected 3 domain variants; if you added a new domain, update this count"
    );
}

#[test]
fn hash_domain_all_unique_bytes() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(
            seen.insert(domain.as_bytes()),
            "duplicate domain bytes: {domain}"
        );
    }
}

#[test]
fn hash_domain_all_follow_naming_convention() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(bytes.starts_with(b"EMPLAKA::"), "{domain}: bad prefix");
        assert!(bytes.ends_with(b"::V1\0"), "{domain}: bad suffix");
    }
}

/// Literal domain bytes may appear only in `hash_domain.rs`.
#[test]
fn no_raw_domain_literals_outside_authority() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let pattern = "b\"EMPLAKA::";
    let mut violations = Vec::new();
    for crate_dir in ["kernel/src", "search/src", "harness/src"] {
        let dir = root.join(crate_dir);
        assert!(dir.is_dir(), "{} does not exist", dir.display());
        for path in rust_files(&dir) {
            if path.file_name().and_then(|n| n.to_str()) == Some("hash_domain.rs") {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            for (i, line) in content.lines().enumerate() {
                let trimmed = line.trim();
                if !trimmed.starts_with("//") && trimmed.contains(pattern) {
                    violations.push(format!("  {}:{}: {trimmed}", path.display(), i + 1));
                }
            }
        }
    }
    assert!(
        violations.is_empty(),
        "raw EMPLAKA:: domain literals found outside hash_domain.rs:\n{}",
        violations.join("\n")
    );
}

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                results.extend(rust_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                results.push(path);
            }
        }
    }
    results
}
