//! Build the full Emplaka graph and write it to a snapshot directory.
//!
//! Usage: `emplaka-build [DIR]` (default `emplaka_graph`).
//! Prints a one-line canonical JSON build report on success.

use std::path::PathBuf;
use std::process::ExitCode;

use log::error;

use emplaka_harness::runner::{build_report, build_to_dir, DEFAULT_GRAPH_DIR};
use emplaka_kernel::operators::operator_catalog::OperationCatalog;
use emplaka_kernel::proof::canon::canonical_json_bytes;
use emplaka_search::policy::EnginePolicyV1;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_GRAPH_DIR), PathBuf::from);
    let catalog = OperationCatalog::standard();
    let policy = EnginePolicyV1::default();

    let report = build_to_dir(&catalog, &policy, &dir)
        .and_then(|(built, digest)| build_report(&built, &catalog, &digest));
    let report = match report {
        Ok(report) => report,
        Err(e) => {
            error!("build failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    match canonical_json_bytes(&report) {
        Ok(bytes) => {
            println!("{}", String::from_utf8_lossy(&bytes));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("cannot encode build report: {e}");
            ExitCode::FAILURE
        }
    }
}
