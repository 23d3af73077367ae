use crate::areas::commit_log::CommitPosition;
use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::conflict::conflict_block;
use crate::artifacts::merge::strategy::MergePlan;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::snapshot::Snapshot;
use crate::errors::RepositoryError;
use std::io::Write;
use tracing::{debug, info};

impl Repository {
    /// Merge the tip of `source` into the current branch
    ///
    /// Paths only the source tracks are written to the working directory and
    /// the merge is committed straight from the merged snapshot, leaving the
    /// index as it was. When any path conflicts the working files carry
    /// conflict markers, nothing is committed, and `Conflict` lists the paths.
    pub fn merge(&mut self, source: &str) -> crate::errors::Result<CommitPosition> {
        let source_name = BranchName::try_parse(source.to_string())
            .map_err(|_| RepositoryError::branch_not_found(source))?;
        let mut state = self.load_state()?;

        let source_position = state.refs.read_ref(&source_name)?;
        if state.refs.is_current_branch(&source_name) {
            return Err(RepositoryError::SelfMerge(source_name.to_string()));
        }

        let current = tip_snapshot(&state, state.refs.read_head())?;
        let incoming = tip_snapshot(&state, source_position)?;

        let plan = self.merge_strategy().plan(&current, &incoming);
        debug!(
            strategy = self.merge_strategy().name(),
            added = plan.added.len(),
            conflicts = plan.conflicts.len(),
            "planned merge"
        );

        self.apply_merge_plan(&plan, &source_name)?;

        if !plan.is_clean() {
            return Err(RepositoryError::Conflict {
                branch: source_name.to_string(),
                paths: plan.conflict_paths(),
            });
        }

        let message = format!("Merge branch '{}' into {}", source_name, state.refs.head());
        let position = state.record_commit(Commit::new(message.clone(), plan.merged));
        self.persist_state(&state)?;

        info!(position, source = %source_name, "merge committed");
        writeln!(self.writer(), "Merge made commit {}: {}", position, message)?;

        Ok(position)
    }

    fn apply_merge_plan(
        &self,
        plan: &MergePlan,
        source_name: &BranchName,
    ) -> crate::errors::Result<()> {
        for (path, digest) in &plan.added {
            let blob = self.database().load(digest)?;
            self.workspace().write_file(path, blob.data())?;
            writeln!(
                self.writer(),
                "Added {} from {}",
                path.display(),
                source_name
            )?;
        }

        for conflict in &plan.conflicts {
            let ours = self.database().load(&conflict.ours)?;
            let theirs = self.database().load(&conflict.theirs)?;

            self.workspace().write_file(
                &conflict.path,
                &conflict_block(ours.data(), theirs.data(), source_name.as_ref()),
            )?;
            writeln!(
                self.writer(),
                "CONFLICT (content): Merge conflict in {}",
                conflict.path.display()
            )?;
        }

        Ok(())
    }
}

// a branch cut before the first commit contributes nothing
fn tip_snapshot(
    state: &RepositoryState,
    position: Option<CommitPosition>,
) -> crate::errors::Result<Snapshot> {
    match position {
        Some(position) => Ok(state.log.get(position)?.snapshot().clone()),
        None => Ok(Snapshot::new()),
    }
}

#[cfg(test)]
mod tests {
    use crate::areas::repository::fixtures::{
        commit_files, open, open_with_output, repository_dir,
    };
    use crate::artifacts::merge::strategy::{MergePlan, MergeStrategy};
    use crate::artifacts::objects::content_digest::ContentDigest;
    use crate::artifacts::objects::snapshot::Snapshot;
    use crate::errors::{Missing, RepositoryError};
    use assert_fs::TempDir;
    use assert_fs::prelude::{FileWriteStr, PathChild};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::{Path, PathBuf};

    fn read(dir: &TempDir, path: &str) -> String {
        std::fs::read_to_string(dir.path().join(path)).expect("Failed to read file")
    }

    /// main: a.txt="hello world" at 1, feat: a.txt="hello", b.txt="new" at 2
    fn diverged(dir: &TempDir) {
        commit_files(dir, &[("a.txt", "hello")], "first");
        open(dir)
            .create_branch("feat")
            .expect("Failed to create branch");
        commit_files(dir, &[("a.txt", "hello world")], "edit");
        open(dir).switch_branch("feat").expect("Failed to switch");
        commit_files(dir, &[("a.txt", "hello"), ("b.txt", "new")], "add b");
        open(dir).switch_branch("main").expect("Failed to switch");
    }

    #[rstest]
    fn diverged_edit_conflicts_and_commits_nothing(repository_dir: TempDir) -> anyhow::Result<()> {
        diverged(&repository_dir);
        let (mut repository, output) = open_with_output(&repository_dir);
        let before = repository.load_state()?;

        let result = repository.merge("feat");

        match result {
            Err(RepositoryError::Conflict { branch, paths }) => {
                assert_eq!(branch, "feat");
                assert_eq!(paths, vec![PathBuf::from("a.txt")]);
            }
            other => panic!("expected a conflict, got {other:?}"),
        }
        assert_eq!(repository.load_state()?, before);
        assert_eq!(before.log.len(), 3);
        assert_eq!(read(&repository_dir, "b.txt"), "new");
        assert_eq!(
            read(&repository_dir, "a.txt"),
            "<<<<<<< HEAD\nhello world\n=======\nhello\n>>>>>>> feat\n"
        );
        let contents = output.contents();
        assert!(contents.contains("Added b.txt from feat"));
        assert!(contents.contains("Merge conflict in a.txt"));
        Ok(())
    }

    #[rstest]
    fn disjoint_branches_merge_into_the_union(repository_dir: TempDir) -> anyhow::Result<()> {
        commit_files(&repository_dir, &[("a.txt", "a")], "a");
        open(&repository_dir).create_branch("feat")?;
        open(&repository_dir).switch_branch("feat")?;
        commit_files(&repository_dir, &[("b.txt", "b")], "b");
        open(&repository_dir).switch_branch("main")?;
        let mut repository = open(&repository_dir);
        let log_len = repository.load_state()?.log.len();

        let position = repository.merge("feat")?;

        let state = repository.load_state()?;
        let merge_commit = state.log.get(position)?;
        let expected: Snapshot = [("a.txt", "a"), ("b.txt", "b")]
            .into_iter()
            .map(|(path, content)| {
                (
                    PathBuf::from(path),
                    ContentDigest::compute(content.as_bytes()),
                )
            })
            .collect();
        assert_eq!(state.log.len(), log_len + 1);
        assert_eq!(merge_commit.snapshot(), &expected);
        assert_eq!(merge_commit.message(), "Merge branch 'feat' into main");
        assert_eq!(state.refs.read_head(), Some(position));
        assert_eq!(read(&repository_dir, "b.txt"), "b");
        Ok(())
    }

    #[rstest]
    fn merge_bypasses_the_index(repository_dir: TempDir) -> anyhow::Result<()> {
        commit_files(&repository_dir, &[("a.txt", "a")], "a");
        open(&repository_dir).create_branch("feat")?;
        open(&repository_dir).switch_branch("feat")?;
        commit_files(&repository_dir, &[("b.txt", "b")], "b");
        open(&repository_dir).switch_branch("main")?;
        repository_dir.child("c.txt").write_str("staged")?;
        let mut repository = open(&repository_dir);
        repository.add(&["c.txt"])?;

        let position = repository.merge("feat")?;

        let state = repository.load_state()?;
        let merged = state.log.get(position)?.snapshot();
        assert!(!merged.contains(Path::new("c.txt")));
        assert!(state.index.entry_by_path(Path::new("c.txt")).is_some());
        assert!(state.index.entry_by_path(Path::new("b.txt")).is_none());
        Ok(())
    }

    #[rstest]
    fn identical_content_is_not_a_conflict(repository_dir: TempDir) -> anyhow::Result<()> {
        commit_files(&repository_dir, &[("a.txt", "same")], "first");
        open(&repository_dir).create_branch("feat")?;

        let position = open(&repository_dir).merge("feat")?;

        assert_eq!(position, 1);
        Ok(())
    }

    #[rstest]
    fn path_dropped_on_current_branch_comes_back(repository_dir: TempDir) -> anyhow::Result<()> {
        commit_files(
            &repository_dir,
            &[("a.txt", "a"), ("gone.txt", "old")],
            "both",
        );
        open(&repository_dir).create_branch("feat")?;
        commit_files(&repository_dir, &[("a.txt", "a")], "only a");
        std::fs::remove_file(repository_dir.path().join("gone.txt"))?;

        let position = open(&repository_dir).merge("feat")?;

        let state = open(&repository_dir).load_state()?;
        let merged = state.log.get(position)?.snapshot();
        assert!(merged.contains(Path::new("gone.txt")));
        assert_eq!(read(&repository_dir, "gone.txt"), "old");
        Ok(())
    }

    #[rstest]
    fn merging_current_branch_is_rejected(repository_dir: TempDir) -> anyhow::Result<()> {
        commit_files(&repository_dir, &[("a.txt", "a")], "a");

        let result = open(&repository_dir).merge("main");

        assert!(matches!(
            result,
            Err(RepositoryError::SelfMerge(ref name)) if name == "main"
        ));
        Ok(())
    }

    #[rstest]
    #[case("missing")]
    #[case("..")]
    fn unknown_source_is_not_found(
        repository_dir: TempDir,
        #[case] source: &str,
    ) -> anyhow::Result<()> {
        let result = open(&repository_dir).merge(source);

        assert!(matches!(
            result,
            Err(RepositoryError::NotFound(Missing::Branch(_)))
        ));
        Ok(())
    }

    #[rstest]
    fn resolved_conflict_commits_normally(repository_dir: TempDir) -> anyhow::Result<()> {
        diverged(&repository_dir);
        let _ = open(&repository_dir).merge("feat");
        repository_dir
            .child("a.txt")
            .write_str("hello world, resolved")?;
        let mut repository = open(&repository_dir);
        repository.add(&["a.txt", "b.txt"])?;

        let position = repository.commit("resolve")?;

        let state = repository.load_state()?;
        assert_eq!(position, 3);
        assert_eq!(state.refs.read_head(), Some(3));
        assert_eq!(state.log.get(3)?.snapshot().len(), 2);
        Ok(())
    }

    /// Keeps the current side of every shared path
    struct OursWins;

    impl MergeStrategy for OursWins {
        fn name(&self) -> &'static str {
            "ours"
        }

        fn plan(&self, current: &Snapshot, source: &Snapshot) -> MergePlan {
            let mut plan = MergePlan {
                merged: current.clone(),
                ..MergePlan::default()
            };
            for (path, digest) in source.iter() {
                if !current.contains(path) {
                    plan.merged.insert(path.clone(), digest.clone());
                    plan.added.push((path.clone(), digest.clone()));
                }
            }
            plan
        }
    }

    #[rstest]
    fn strategy_is_pluggable(repository_dir: TempDir) -> anyhow::Result<()> {
        diverged(&repository_dir);
        let mut repository = open(&repository_dir).with_merge_strategy(Box::new(OursWins));

        let position = repository.merge("feat")?;

        let state = repository.load_state()?;
        let snapshot = state.log.get(position)?.snapshot();
        assert_eq!(position, 3);
        assert_eq!(
            snapshot.get(Path::new("a.txt")),
            Some(&ContentDigest::compute(b"hello world"))
        );
        assert!(snapshot.contains(Path::new("b.txt")));
        Ok(())
    }
}
