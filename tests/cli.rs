//! End-to-end tests for the `fxsort` binary.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn fxsort(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fxsort"))
        .args(args)
        .output()
        .expect("failed to run fxsort")
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn test_external_subcommand_sorts_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    let spills = dir.path().join("spills");
    fs::create_dir(&spills).unwrap();
    fs::write(&input, "6\n2\n9\n1\n5\n3\n").unwrap();

    let out = fxsort(&[
        "external",
        "-k",
        "2",
        "-m",
        "3",
        "-T",
        path_str(&spills),
        path_str(&input),
        path_str(&output),
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(&output).unwrap(), "1\n2\n3\n5\n6\n9\n");
    assert_eq!(fs::read_dir(&spills).unwrap().count(), 0);
}

#[test]
fn test_external_subcommand_keeps_spills() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "4\n3\n2\n1\n9\n").unwrap();

    let out = fxsort(&[
        "external",
        "-k",
        "2",
        "-m",
        "3",
        "-T",
        path_str(dir.path()),
        "--prefix",
        "chunk",
        "--keep-spills",
        path_str(&input),
        path_str(&output),
    ]);
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(dir.path().join("chunk0.txt")).unwrap(), "3\n4\n");
    assert_eq!(fs::read_to_string(dir.path().join("chunk2.txt")).unwrap(), "9\n");
}

#[test]
fn test_external_subcommand_capacity_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    fs::write(&input, "1\n2\n3\n").unwrap();

    let out = fxsort(&[
        "external",
        "-k",
        "1",
        "-m",
        "2",
        path_str(&input),
        path_str(&dir.path().join("out.txt")),
    ]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("fxsort: "));
}

#[test]
fn test_memory_subcommand_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_fxsort"))
        .args(["memory", "-a", "quick", "--seed", "3"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"5\n3\n8\n1\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, b"1\n3\n5\n8\n");
}

#[test]
fn test_memory_subcommand_reverse_algorithms() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    fs::write(&input, "3\n10\n1\n7\n").unwrap();

    for algorithm in ["quick", "hybrid", "insertion", "merge", "bucket"] {
        let output = dir.path().join(format!("{algorithm}.txt"));
        let out = fxsort(&[
            "memory",
            "-a",
            algorithm,
            "-r",
            "-o",
            path_str(&output),
            path_str(&input),
        ]);
        assert!(out.status.success(), "{algorithm}: {}", String::from_utf8_lossy(&out.stderr));
        assert_eq!(fs::read_to_string(&output).unwrap(), "10\n7\n3\n1\n", "{algorithm}");
    }
}

#[test]
fn test_memory_subcommand_rejects_negative_bucket_keys() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    fs::write(&input, "3\n-1\n").unwrap();

    let out = fxsort(&["memory", "-a", "bucket", path_str(&input)]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("non-negative"));
}

#[test]
fn test_check_subcommand() {
    let dir = TempDir::new().unwrap();
    let sorted = dir.path().join("sorted.txt");
    let unsorted = dir.path().join("unsorted.txt");
    fs::write(&sorted, "1\n2\n2\n").unwrap();
    fs::write(&unsorted, "1\n3\n2\n").unwrap();

    assert!(fxsort(&["check", path_str(&sorted)]).status.success());

    let out = fxsort(&["check", path_str(&unsorted)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains(":3: disorder: 2"));
}
