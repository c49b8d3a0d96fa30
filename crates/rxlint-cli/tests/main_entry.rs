//! Integration tests for the `rxlint` binary entry point.
//!
//! Verifies exit codes, stream separation and user-facing errors.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

#[test]
fn list_checks_succeeds() {
    let mut command = cargo_bin_cmd!("rxlint");
    command.args(["--list-checks", "--format", "json"]);
    command
        .assert()
        .success()
        .stdout(contains("\"id\": \"no-unsafe-first\""));
}

#[test]
fn findings_exit_with_one() {
    let directory = tempfile::tempdir().expect("temp dir");
    let file = directory.path().join("effect.ts");
    std::fs::write(
        &file,
        "declare const source$: Observable<number>;\nsource$.subscribe();\n",
    )
    .expect("write source");

    let mut command = cargo_bin_cmd!("rxlint");
    command.arg("--format").arg("human").arg(&file);
    command
        .assert()
        .code(1)
        .stdout(contains("effect.ts:2:9: no-ignored-subscribe"))
        .stderr(contains("no-ignored-subscribe").not());
}

#[test]
fn long_pipe_chains_are_checked() {
    let directory = tempfile::tempdir().expect("temp dir");
    let file = directory.path().join("chain.ts");
    let source = format!(
        "declare const a$: Observable<number>;\nconst b$ = a${};\nb$.subscribe();\n",
        ".pipe()".repeat(10_000)
    );
    std::fs::write(&file, source).expect("write source");

    let mut command = cargo_bin_cmd!("rxlint");
    command.arg("--format").arg("human").arg(&file);
    command
        .assert()
        .code(1)
        .stdout(contains("chain.ts:3:4: no-ignored-subscribe"));
}

#[test]
fn missing_paths_exit_with_two() {
    let mut command = cargo_bin_cmd!("rxlint");
    command.arg("no/such/file.ts");
    command
        .assert()
        .code(2)
        .stderr(contains("failed to read no/such/file.ts"));
}

#[test]
fn paths_are_required() {
    let mut command = cargo_bin_cmd!("rxlint");
    command.assert().code(2).stderr(contains("<PATH>"));
}
