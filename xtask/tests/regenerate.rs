//! Tests for `xtask regenerate`

use std::fs;
use std::path::Path;
use std::process::Command;

fn fixture() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../tests/fixtures/schema-full.json")
        .leak()
}

#[test]
fn test_regenerate_uses_root_config_and_paths() {
    let root = tempfile::tempdir().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();
    fs::copy(fixture(), root.path().join("schema-full.json")).unwrap();
    fs::write(
        root.path().join("r3xa.toml"),
        "[render]\ntitle = \"Root Title\"\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_xtask"))
        .current_dir(elsewhere.path())
        .args(["regenerate", "--root"])
        .arg(root.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let spec = fs::read_to_string(root.path().join("docs/specification.md")).unwrap();
    assert!(spec.contains("# Root Title"));
    assert!(spec.contains("<!-- Source: schema-full.json -->"));

    let runtime: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.path().join("schema.json")).unwrap()).unwrap();
    assert!(runtime.get("$comment").is_none());

    let check = Command::new(env!("CARGO_BIN_EXE_xtask"))
        .current_dir(elsewhere.path())
        .args(["regenerate", "--check", "--root"])
        .arg(root.path())
        .output()
        .unwrap();
    assert!(check.status.success());
}
