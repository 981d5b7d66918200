//! Cross-process determinism test.
//!
//! Spawns `graph_fixture` under several environment variants and asserts
//! byte-identical output. Graph construction must not depend on cwd, locale
//! or hash-map seeding.

use std::process::Command;

fn run_variant(work_dir: &std::path::Path, env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_graph_fixture");
    let mut command = Command::new(bin);
    command
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LANG")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn {bin}: {e}"));
    assert!(
        output.status.success(),
        "graph_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_three_env_variants() {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let temp = tempfile::tempdir().expect("tempdir");

    let baseline = run_variant(manifest_dir, &[]);
    let other_cwd = run_variant(temp.path(), &[]);
    let other_locale = run_variant(manifest_dir, &[("LC_ALL", "C"), ("LANG", "tr_TR.UTF-8")]);

    assert!(baseline.contains("node_count=1952"), "{baseline}");
    assert!(baseline.contains("graph_digest=sha256:"), "{baseline}");
    assert_eq!(baseline, other_cwd);
    assert_eq!(baseline, other_locale);
}
