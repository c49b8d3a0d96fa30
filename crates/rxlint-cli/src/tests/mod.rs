//! In-process tests for the CLI runtime.


use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use insta::assert_snapshot;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::{OutputFormat, ResolvedOutputFormat, run};

/// Captured result of one in-process invocation.
pub(crate) struct Outcome {
    pub(crate) code: ExitCode,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

/// Runs the CLI with `args` as if stdout were redirected.
pub(crate) fn invoke(args: &[&str]) -> Outcome {
    let argv: Vec<OsString> = std::iter::once("rxlint")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect();
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(argv, &mut stdout, &mut stderr, false);
    Outcome {
        code,
        stdout: String::from_utf8(stdout).expect("utf-8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf-8 stderr"),
    }
}

pub(crate) fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create directories");
    }
    fs::write(path, contents).expect("write file");
}

pub(crate) fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

#[fixture]
fn project() -> TempDir {
    let root = tempfile::tempdir().expect("temp dir");
    write(
        root.path(),
        "src/effects.ts",
        "declare const action$: Observable<Action>;\nconst epic = action$.pipe(ofType('LOAD'), take(1));\n",
    );
    write(
        root.path(),
        "src/app.ts",
        "declare const source$: Observable<number>;\nsource$.subscribe();\n",
    );
    write(root.path(), "src/clean.ts", "const total = 1 + 2;\n");
    write(root.path(), "src/notes.md", "source$.subscribe();\n");
    write(root.path(), "node_modules/lib/index.ts", "of(1);\n");
    root
}

#[rstest]
#[case::auto_terminal(OutputFormat::Auto, true, ResolvedOutputFormat::Human)]
#[case::auto_redirected(OutputFormat::Auto, false, ResolvedOutputFormat::Json)]
#[case::human(OutputFormat::Human, false, ResolvedOutputFormat::Human)]
#[case::json(OutputFormat::Json, true, ResolvedOutputFormat::Json)]
fn output_format_resolves(
    #[case] format: OutputFormat,
    #[case] terminal: bool,
    #[case] expected: ResolvedOutputFormat,
) {
    assert_eq!(format.resolve(terminal), expected);
}

#[rstest]
fn human_output_lists_findings_in_path_order(project: TempDir) {
    let root = project.path().join("src");
    let outcome = invoke(&["--format", "human", path_str(&root)]);
    assert_eq!(outcome.code, ExitCode::from(1));
    let prefix = format!("{}/", path_str(&root));
    let relative = outcome.stdout.replace(&prefix, "");
    assert_snapshot!(relative, @r"
    app.ts:2:9: no-ignored-subscribe: Calling subscribe without arguments is forbidden.
    effects.ts:2:43: no-unsafe-first: Unsafe first and take usage in effects and epics are forbidden.
    ");
}

#[rstest]
fn json_output_is_an_array_of_file_reports(project: TempDir) {
    let root = project.path().join("src");
    let outcome = invoke(&["--format", "json", path_str(&root)]);
    assert_eq!(outcome.code, ExitCode::from(1));
    let reports: serde_json::Value = serde_json::from_str(&outcome.stdout).expect("json output");
    let files: Vec<(String, usize)> = reports
        .as_array()
        .expect("array")
        .iter()
        .map(|report| {
            let uri = report["uri"].as_str().expect("uri");
            let name = Path::new(uri)
                .file_name()
                .and_then(|name| name.to_str())
                .expect("file name")
                .to_owned();
            let findings = report["findings"].as_array().expect("findings").len();
            (name, findings)
        })
        .collect();
    assert_eq!(
        files,
        [
            (String::from("app.ts"), 1),
            (String::from("clean.ts"), 0),
            (String::from("effects.ts"), 1),
        ]
    );
}

#[rstest]
fn clean_files_exit_successfully(project: TempDir) {
    let clean = project.path().join("src/clean.ts");
    let outcome = invoke(&["--format", "human", path_str(&clean)]);
    assert_eq!(outcome.code, ExitCode::SUCCESS);
    assert!(outcome.stdout.is_empty());
}

#[rstest]
fn settings_can_disable_checks(project: TempDir) {
    write(
        project.path(),
        "rxlint.json",
        r#"{ "checks": { "no-ignored-subscribe": { "enabled": false } } }"#,
    );
    let config = project.path().join("rxlint.json");
    let app = project.path().join("src/app.ts");
    let outcome = invoke(&["--config", path_str(&config), "--format", "human", path_str(&app)]);
    assert_eq!(outcome.code, ExitCode::SUCCESS);
}

#[rstest]
fn invalid_options_are_reported_and_exit_with_an_error(project: TempDir) {
    write(
        project.path(),
        "rxlint.json",
        r#"{ "checks": { "no-unsafe-first": { "options": { "observable": "(" } } } }"#,
    );
    let config = project.path().join("rxlint.json");
    let app = project.path().join("src/app.ts");
    let outcome = invoke(&["--config", path_str(&config), "--format", "human", path_str(&app)]);
    assert_eq!(outcome.code, ExitCode::from(2));
    assert!(outcome.stderr.contains("E_RXLINT_INVALID_REGEX"), "{}", outcome.stderr);
    assert!(outcome.stdout.contains("no-ignored-subscribe"));
}

#[rstest]
#[case::missing_path(&["does/not/exist.ts"], "failed to read")]
#[case::unsupported_file(&["Cargo.toml"], "unsupported file extension")]
#[case::bad_flag(&["--no-such-flag"], "unexpected argument")]
fn usage_and_io_errors_exit_with_two(#[case] args: &[&str], #[case] message: &str) {
    let outcome = invoke(args);
    assert_eq!(outcome.code, ExitCode::from(2));
    assert!(outcome.stderr.contains(message), "{}", outcome.stderr);
}

#[test]
fn list_checks_prints_every_check() {
    let outcome = invoke(&["--list-checks", "--format", "human"]);
    assert_eq!(outcome.code, ExitCode::SUCCESS);
    assert_snapshot!(outcome.stdout, @r"
    no-ignored-observable  Forbids the ignoring of observables returned by functions.
    no-ignored-subscribe   Forbids the calling of `subscribe` without specifying arguments.
    no-unsafe-first        Forbids unsafe `first`/`take` usage in effects and epics.
    ");
}
