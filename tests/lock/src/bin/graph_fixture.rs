//! Binary that builds the standard graph and prints deterministic
//! `key=value` lines for cross-process verification.
//!
//! Output:
//!   `catalog_digest`=sha256:...
//!   `node_count`=N
//!   `link_entries`=N
//!   `graph_digest`=sha256:...

use emplaka_harness::graph_dir::graph_digest;
use emplaka_kernel::operators::operator_catalog::OperationCatalog;
use emplaka_search::engine::build_graph;
use emplaka_search::policy::EnginePolicyV1;
use emplaka_search::snapshot::encode;

fn main() {
    let catalog = OperationCatalog::standard();
    let built = build_graph(&catalog, &EnginePolicyV1::default()).expect("graph builds");
    let bytes = encode(&built.registry, &catalog).expect("snapshot encodes");

    println!(
        "catalog_digest={}",
        catalog.digest().expect("catalog digests").as_str()
    );
    println!("node_count={}", built.registry.len());
    println!("link_entries={}", built.registry.edge_count());
    println!("graph_digest={}", graph_digest(&bytes).as_str());
}
