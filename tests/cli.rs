mod common;

use std::process::Command;

use common::{read_bands, write_raster};
use tempfile::TempDir;

fn rio_merge() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rio-merge"))
}

#[test]
fn test_cli_merges_and_exits_zero() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.tif");
    let b = dir.path().join("b.tif");
    let out = dir.path().join("out.tif");

    write_raster(&a, 2, 1, &[vec![1u8, 0]], Some(0.0));
    write_raster(&b, 2, 1, &[vec![2u8, 2]], Some(0.0));

    let status = rio_merge()
        .args([&a, &b, &out])
        .args(["--format", "GTiff"])
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(read_bands::<u8>(&out), vec![vec![1, 2]]);
}

#[test]
fn test_cli_missing_input_exits_one() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.tif");
    let out = dir.path().join("out.tif");

    let output = rio_merge()
        .arg(&missing)
        .arg(&out)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed"), "stderr: {stderr}");
    assert!(stderr.contains("missing.tif"), "stderr: {stderr}");
    assert!(!out.exists());
}

#[test]
fn test_cli_requires_two_paths() {
    let output = rio_merge().arg("only.tif").output().unwrap();
    assert!(!output.status.success());
}
