use crate::common::command::{
    commit_file, init_repository_dir, jit_commit, run_jit_command, stdout_of,
};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn first_commit_is_a_root_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "hello".to_string()));
    run_jit_command(dir, &["add", "a.txt"]).assert().success();

    jit_commit(dir, "first")
        .assert()
        .success()
        .stdout(predicate::str::diff("[main (root-commit) 0] first\n"));

    Ok(())
}

#[rstest]
fn positions_follow_the_log(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "a.txt", "one", "first");
    write_generated_files(dir, 2);
    run_jit_command(dir, &["add", "."]).assert().success();

    jit_commit(dir, "second")
        .assert()
        .success()
        .stdout(predicate::str::diff("[main 1] second\n"));

    Ok(())
}

#[rstest]
fn empty_stage_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    jit_commit(dir, "nothing")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "nothing to commit, the staging index is empty",
        ));

    Ok(())
}

#[rstest]
fn stage_is_cleared_by_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "a.txt", "hello", "first");

    jit_commit(dir, "again").assert().failure();

    let log = stdout_of(&mut run_jit_command(dir, &["log"]));
    assert_eq!(log.matches("commit ").count(), 1);

    Ok(())
}
