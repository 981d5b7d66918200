//! Snapshot directory lock tests.
//!
//! Proves:
//! 1. Write then read yields an identical registry that answers identically
//! 2. Writing the same graph twice produces byte-identical files
//! 3. A tampered snapshot is rejected by digest
//! 4. An extra file, a missing snapshot or a foreign catalog is rejected
//! 5. Re-closing a loaded graph changes nothing
//! 6. A snapshot that is never closed, or lacks kernel nodes, is rejected even
//!    with a correct digest

use emplaka_kernel::carrier::value_key::ValueKey;
use emplaka_kernel::operators::operator_catalog::{Operation, OperationCatalog};
use emplaka_harness::graph_dir::{
    graph_digest, read_graph_dir, write_graph_dir, GraphDirReadError, DIGEST_FILENAME,
    GRAPH_FILENAME,
};
use emplaka_harness::runner::{load_graph, RunError};
use emplaka_kernel::proof::canon::canonical_json_bytes;
use emplaka_search::closure::close_kernel;
use emplaka_search::expansion::expand_to_fixed_point;
use emplaka_search::policy::EnginePolicyV1;
use emplaka_search::registry::NodeRegistry;
use emplaka_search::snapshot::{to_json_value, SnapshotError};
use emplaka_search::solution::SolutionFinder;
use lock_tests::standard_graph;

fn written() -> (tempfile::TempDir, OperationCatalog) {
    let catalog = OperationCatalog::standard();
    let dir = tempfile::tempdir().expect("tempdir");
    write_graph_dir(&standard_graph().registry, &catalog, dir.path()).expect("write");
    (dir, catalog)
}

#[test]
fn round_trip_is_identical_and_answers_identically() {
    let (dir, catalog) = written();
    let loaded = read_graph_dir(dir.path(), &catalog).expect("read");
    let in_memory = &standard_graph().registry;
    assert_eq!(&loaded, in_memory);

    let (l, r) = (ValueKey::Pair(1, 2), ValueKey::Pair(3, 4));
    assert_eq!(
        SolutionFinder::new(&loaded).solve(&l, &r),
        SolutionFinder::new(in_memory).solve(&l, &r)
    );
}

#[test]
fn writes_are_byte_identical() {
    let (a, _) = written();
    let (b, _) = written();
    for name in [GRAPH_FILENAME, DIGEST_FILENAME] {
        let left = std::fs::read(a.path().join(name)).expect("read a");
        let right = std::fs::read(b.path().join(name)).expect("read b");
        assert!(left == right, "{name} differs between writes");
    }
}

#[test]
fn tampered_snapshot_fails_digest() {
    let (dir, catalog) = written();
    let path = dir.path().join(GRAPH_FILENAME);
    let mut bytes = std::fs::read(&path).expect("read");
    let last = bytes.len() - 2;
    bytes[last] = b' ';
    std::fs::write(&path, bytes).expect("write");
    assert!(matches!(
        read_graph_dir(dir.path(), &catalog),
        Err(GraphDirReadError::DigestMismatch { .. })
    ));
}

#[test]
fn extra_file_is_rejected() {
    let (dir, catalog) = written();
    std::fs::write(dir.path().join("notes.txt"), b"hi").expect("write");
    assert!(matches!(
        read_graph_dir(dir.path(), &catalog),
        Err(GraphDirReadError::ExtraFile { ref name }) if name == "notes.txt"
    ));
}

#[test]
fn missing_snapshot_is_rejected() {
    let (dir, catalog) = written();
    std::fs::remove_file(dir.path().join(GRAPH_FILENAME)).expect("remove");
    assert!(matches!(
        read_graph_dir(dir.path(), &catalog),
        Err(GraphDirReadError::MissingFile { .. })
    ));
}

#[test]
fn foreign_catalog_is_rejected() {
    let (dir, _) = written();
    let other = OperationCatalog::from_operations(&[Operation::Add]).expect("catalog");
    assert!(matches!(
        read_graph_dir(dir.path(), &other),
        Err(GraphDirReadError::Snapshot(SnapshotError::CatalogMismatch { .. }))
    ));
}

#[test]
fn reclosing_a_loaded_graph_is_a_no_op() {
    let (dir, catalog) = written();
    let mut loaded = read_graph_dir(dir.path(), &catalog).expect("read");
    let before = loaded.clone();
    close_kernel(&mut loaded).expect("kernel present");
    assert_eq!(loaded, before);
}

#[test]
fn never_closed_snapshot_is_rejected() {
    let catalog = OperationCatalog::standard();
    let mut registry = NodeRegistry::with_kernel();
    expand_to_fixed_point(&mut registry, &catalog, &EnginePolicyV1::default()).expect("expand");
    let dir = tempfile::tempdir().expect("tempdir");
    write_graph_dir(&registry, &catalog, dir.path()).expect("write");

    assert!(matches!(
        read_graph_dir(dir.path(), &catalog),
        Err(GraphDirReadError::Snapshot(SnapshotError::KernelNotClosed {
            payload: ValueKey::Pair(0, 0)
        }))
    ));
    assert!(matches!(
        load_graph(dir.path(), &catalog),
        Err(RunError::Read(GraphDirReadError::Snapshot(
            SnapshotError::KernelNotClosed { .. }
        )))
    ));
}

#[test]
fn kernel_less_snapshot_is_rejected() {
    let catalog = OperationCatalog::standard();
    let mut value = to_json_value(&standard_graph().registry, &catalog).expect("json");
    value["nodes"] = serde_json::json!([{
        "closed": true,
        "filled": true,
        "id": 0,
        "links": [[0, []]],
        "payload": [0, 0],
    }]);
    let bytes = canonical_json_bytes(&value).expect("canonical");
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(GRAPH_FILENAME), &bytes).expect("write graph");
    std::fs::write(
        dir.path().join(DIGEST_FILENAME),
        graph_digest(&bytes).as_str(),
    )
    .expect("write digest");

    assert!(matches!(
        read_graph_dir(dir.path(), &catalog),
        Err(GraphDirReadError::Snapshot(SnapshotError::KernelMissing {
            payload: ValueKey::Pair(0, 1)
        }))
    ));
    assert!(load_graph(dir.path(), &catalog).is_err());
}
