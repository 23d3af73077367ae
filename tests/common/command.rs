use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const FIXED_COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_jit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// main: `a.txt`="hello" committed at position 0
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    commit_file(init_repository_dir.path(), "a.txt", "hello", "first");

    init_repository_dir
}

/// main at 1 with `a.txt`="hello world", feat at 2 with `a.txt`="hello" and
/// `b.txt`="new", HEAD on main
#[fixture]
pub fn diverged_repository_dir(committed_repository_dir: TempDir) -> TempDir {
    let dir = committed_repository_dir.path();

    run_jit_command(dir, &["branch", "create", "feat"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "hello world", "edit");

    run_jit_command(dir, &["switch", "feat"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "hello".to_string()));
    write_file(FileSpec::new(dir.join("b.txt"), "new".to_string()));
    run_jit_command(dir, &["add", "a.txt", "b.txt"])
        .assert()
        .success();
    jit_commit(dir, "add b").assert().success();

    run_jit_command(dir, &["switch", "main"]).assert().success();

    committed_repository_dir
}

pub fn run_jit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("jit").expect("Failed to find jit binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("JIT_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn jit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_jit_command(dir, &["commit", "-m", message]);
    cmd.env("JIT_COMMIT_DATE", FIXED_COMMIT_DATE); // %Y-%m-%d %H:%M:%S %z
    cmd
}

/// Write, stage and commit a single file
pub fn commit_file(dir: &Path, path: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(path), content.to_string()));
    run_jit_command(dir, &["add", path]).assert().success();
    jit_commit(dir, message).assert().success();
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout is not utf-8")
}
