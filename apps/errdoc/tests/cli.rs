use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A repository-like fixture: `<tmp>/repo/x/...` plus `<tmp>/repo/tools/error_doc`.
struct Repo {
    _tmp: TempDir,
    repo: PathBuf,
}

impl Repo {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let repo = tmp.path().join("repo");
        fs::create_dir_all(repo.join("x")).expect("create x");
        fs::create_dir_all(repo.join("tools/error_doc")).expect("create tool dir");
        Self { _tmp: tmp, repo }
    }

    fn file(&self, relative: &str, content: &str) -> &Self {
        let path = self.repo.join("x").join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(path, content).expect("write fixture");
        self
    }

    fn root(&self) -> PathBuf {
        self.repo.join("x")
    }

    fn report(&self) -> PathBuf {
        self.root().join("errors.md")
    }

    /// Runs from the tool directory so the default `../../x` root applies.
    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("errdoc");
        cmd.current_dir(self.repo.join("tools/error_doc")).env_remove("RUST_LOG");
        cmd
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read report")
}

#[test]
fn generates_report_from_default_root() {
    let repo = Repo::new();
    repo.file("bank/types/errors.go", "ErrX = sdkerrors.Register(ModuleName, 2, \"insufficient funds\")\n")
        .file("bank/types/keys.go", "const ModuleName = \"bank\"\n");

    repo.cmd()
        .assert()
        .success()
        .stdout(contains("1 errors across 1 modules"));

    let report = read(&repo.report());
    assert!(report.contains("  * [Bank](#bank)"));
    assert!(report.contains("|ErrX|bank|2|insufficient funds|"));
}

#[test]
fn no_declaration_files_exits_with_failure_and_no_report() {
    let repo = Repo::new();
    repo.file("bank/types/keys.go", "const ModuleName = \"bank\"\n");

    repo.cmd().assert().code(1).stdout(contains("No 'errors.go' files found"));

    assert!(!repo.report().exists());
}

#[test]
fn malformed_registration_warns_and_continues() {
    let repo = Repo::new();
    repo.file(
        "auth/types/errors.go",
        "ErrBroken = sdkerrors.Register(\"auth\", 2, \"broken\"\nErrFine = sdkerrors.Register(\"auth\", 3, \"fine\")\n",
    );

    repo.cmd()
        .assert()
        .success()
        .stdout(contains("auth/types/errors.go:1").and(contains("ErrBroken")));

    let report = read(&repo.report());
    assert!(report.contains("|ErrFine|auth|3|fine|"));
    assert!(!report.contains("ErrBroken"));
}

#[test]
fn malformed_constant_aborts_without_report() {
    let repo = Repo::new();
    repo.file(
        "bank/types/errors.go",
        "ErrX = sdkerrors.Register(\"bank\", 2, \"x\")\nconst A = \"b\" = \"c\"\n",
    );

    repo.cmd().assert().code(1).stdout(contains("Malformed constant declaration"));

    assert!(!repo.report().exists());
}

#[test]
fn fatal_error_keeps_previous_report() {
    let repo = Repo::new();
    repo.file("bank/types/errors.go", "const A = \"b\" = \"c\"\n");
    fs::write(repo.report(), "previous\n").expect("seed report");

    repo.cmd().assert().failure();

    assert_eq!(read(&repo.report()), "previous\n");
}

#[test]
fn check_mode_detects_stale_report() {
    let repo = Repo::new();
    repo.file("bank/types/errors.go", "ErrX = sdkerrors.Register(\"bank\", 2, \"x\")\n");

    repo.cmd().arg("--check").assert().code(1).stdout(contains("out of date"));
    assert!(!repo.report().exists());

    repo.cmd().assert().success();
    repo.cmd().arg("--check").assert().success().stdout(contains("up to date"));
}

#[test]
fn explicit_root_and_output_flags() {
    let repo = Repo::new();
    repo.file("bank/types/errors.go", "ErrX = sdkerrors.Register(\"bank\", 2, \"x\")\n");
    let output = repo.repo.join("docs/errors.md");

    cargo_bin_cmd!("errdoc")
        .arg("--root")
        .arg(repo.root())
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(read(&output).contains("|ErrX|bank|2|x|"));
    assert!(!repo.report().exists());
}

#[test]
fn environment_overrides_module_marker() {
    let tmp = TempDir::new().expect("create temp dir");
    let root = tmp.path().join("modules");
    fs::create_dir_all(root.join("bank/types")).expect("create dirs");
    fs::write(root.join("bank/types/errors.go"), "ErrX = sdkerrors.Register(\"bank\", 2, \"x\")\n")
        .expect("write fixture");

    cargo_bin_cmd!("errdoc")
        .arg("--root")
        .arg(&root)
        .env("ERRDOC__MODULE_MARKER", "modules")
        .assert()
        .success();

    assert!(read(&root.join("errors.md")).contains("## Bank"));
}

#[test]
fn logs_go_to_stderr_and_stay_quiet_by_default() {
    let repo = Repo::new();
    repo.file("bank/types/errors.go", "ErrX = sdkerrors.Register(\"bank\", 2, \"x\")\n");

    repo.cmd().assert().success().stderr(predicate::str::is_empty());

    repo.cmd()
        .arg("-vv")
        .assert()
        .success()
        .stderr(contains("Grouped declaration files"))
        .stdout(contains("Grouped declaration files").not());
}
