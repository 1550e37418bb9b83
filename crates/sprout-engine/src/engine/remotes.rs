//! Remotes: `remote add/remove`, `push`, `fetch`, `pull`.

use tracing::info;

use sprout_sync::{FetchResult, MergeStatus, PullResult, PushResult, RefUpdate, SyncError};

use super::Engine;
use crate::error::EngineResult;
use crate::materialize::materialize;
use crate::timeline::EventKind;
use crate::types::RemoteInfo;

impl Engine {
    /// Register an empty remote.
    pub fn add_remote(&mut self, name: &str, url: &str) -> EngineResult<()> {
        self.transact(|txn| {
            txn.state.repo_mut()?.remotes.add(name, url)?;
            txn.record_detail(EventKind::Git, format!("git remote add {name}"), url);
            Ok(())
        })
    }

    /// Forget a remote and its tracking refs.
    pub fn remove_remote(&mut self, name: &str) -> EngineResult<()> {
        self.transact(|txn| {
            let repo = txn.state.repo_mut()?;
            repo.remotes.remove(name)?;
            let dropped = repo.refs.remove_tracking_for(name);
            txn.record_detail(
                EventKind::Git,
                format!("git remote remove {name}"),
                format!("{dropped} tracking ref(s) dropped"),
            );
            Ok(())
        })
    }

    /// Configured remotes sorted by name. Empty before `git init`.
    pub fn list_remotes(&self) -> Vec<RemoteInfo> {
        self.state
            .repo
            .as_ref()
            .map(|repo| {
                repo.remotes
                    .list()
                    .map(|remote| RemoteInfo {
                        name: remote.name.clone(),
                        url: remote.url.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Send `branch` and every commit the remote lacks.
    pub fn push(&mut self, remote: &str, branch: &str) -> EngineResult<PushResult> {
        self.transact(|txn| {
            let repo = txn.state.repo_mut()?;
            let result = repo.remotes.push(remote, branch, &repo.history, &mut repo.refs)?;
            txn.record_detail(
                EventKind::Git,
                format!("git push {remote} {branch}"),
                format!("{} commit(s) sent", result.commits_sent.len()),
            );
            Ok(result)
        })
    }

    /// Copy every remote commit unknown locally and refresh tracking refs.
    pub fn fetch(&mut self, remote: &str) -> EngineResult<FetchResult> {
        self.transact(|txn| {
            let repo = txn.state.repo_mut()?;
            let result = repo.remotes.fetch(remote, &mut repo.history, &mut repo.refs)?;
            txn.record_detail(
                EventKind::Git,
                format!("git fetch {remote}"),
                format!("{} commit(s) received", result.commits_received.len()),
            );
            Ok(result)
        })
    }

    /// Fetch, then move `branch` to the remote tip and check it out.
    ///
    /// There is no merge: a diverged local branch is overwritten. When the
    /// branch is already checked out at the remote tip nothing is touched.
    pub fn pull(&mut self, remote: &str, branch: &str) -> EngineResult<PullResult> {
        self.transact(|txn| {
            let repo = txn.state.repo_mut()?;
            let fetch = repo.remotes.fetch(remote, &mut repo.history, &mut repo.refs)?;
            let tip = repo
                .remotes
                .get(remote)
                .and_then(|source| source.branch(branch))
                .cloned()
                .ok_or_else(|| SyncError::RemoteBranchNotFound {
                    remote: remote.to_string(),
                    branch: branch.to_string(),
                })?;

            let old = repo.refs.branch(branch).flatten().cloned();
            let merge_status = match &old {
                Some(old) if *old == tip => MergeStatus::UpToDate,
                Some(old) if repo.history.commits.is_ancestor(old, &tip) => MergeStatus::FastForward,
                Some(_) => MergeStatus::Overwritten,
                None => MergeStatus::FastForward,
            };
            let checked_out = repo.refs.current_branch() == Some(branch);

            if merge_status != MergeStatus::UpToDate || !checked_out {
                let snapshot = repo.history.snapshots.require(&tip)?.clone();
                materialize(&mut txn.state, &snapshot)?;
                let repo = txn.state.repo_mut()?;
                repo.refs.set_branch(branch, tip.clone())?;
                repo.refs.attach_head(branch)?;
                repo.staging.clear();
            }

            info!(remote, branch, tip = %tip, status = ?merge_status, "pull complete");
            txn.record_detail(
                EventKind::Git,
                format!("git pull {remote} {branch}"),
                format!("{merge_status:?}"),
            );
            Ok(PullResult {
                fetch,
                branch: branch.to_string(),
                update: RefUpdate {
                    name: branch.to_string(),
                    old,
                    new: tip,
                },
                merge_status,
                switched_branch: !checked_out,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use sprout_types::{CommitId, EntryId, ErrorKind};

    fn engine(scenario: &str) -> Engine {
        Engine::new(EngineConfig::default().with_scenario(scenario)).unwrap()
    }

    fn id_of(engine: &Engine, path: &str) -> EntryId {
        engine.get_entry_by_path(path).unwrap().id().clone()
    }

    fn commit_edit(engine: &mut Engine, path: &str, text: &str) -> CommitId {
        let id = id_of(engine, path);
        engine.update_file_content(&id, text).unwrap();
        engine.stage_entry_ids(&[id]).unwrap();
        engine.commit_changes(text).unwrap().id
    }

    #[test]
    fn add_and_remove_remote() {
        let mut engine = engine("first-commit");
        engine.add_remote("origin", "https://example.com/playground.git").unwrap();
        assert_eq!(
            engine.add_remote("origin", "x").unwrap_err().kind(),
            ErrorKind::RemoteExists
        );
        assert_eq!(engine.list_remotes()[0].name, "origin");

        engine.push("origin", "main").unwrap();
        assert_eq!(engine.list_tracking_refs().len(), 1);
        engine.remove_remote("origin").unwrap();
        assert!(engine.list_remotes().is_empty());
        assert!(engine.list_tracking_refs().is_empty());
    }

    #[test]
    fn push_error_order() {
        let mut engine = engine("starter");
        assert_eq!(
            engine.push("origin", "main").unwrap_err().kind(),
            ErrorKind::NotARepository
        );
        engine.initialize_repo().unwrap();
        assert_eq!(
            engine.push("origin", "main").unwrap_err().kind(),
            ErrorKind::RemoteNotFound
        );
        engine.add_remote("origin", "u").unwrap();
        assert_eq!(
            engine.push("origin", "main").unwrap_err().kind(),
            ErrorKind::NoCommitsYet
        );
        assert_eq!(
            engine.push("origin", "ghost").unwrap_err().kind(),
            ErrorKind::RefNotFound
        );
    }

    #[test]
    fn push_twice_sends_nothing_second_time() {
        let mut engine = engine("feature-branch");
        engine.add_remote("origin", "u").unwrap();
        let first = engine.push("origin", "main").unwrap();
        assert_eq!(first.commits_sent.len(), 2);
        let second = engine.push("origin", "main").unwrap();
        assert!(second.commits_sent.is_empty());
        assert!(second.is_up_to_date());
    }

    #[test]
    fn fetch_reports_up_to_date() {
        let mut engine = engine("first-commit");
        engine.add_remote("origin", "u").unwrap();
        engine.push("origin", "main").unwrap();
        let fetched = engine.fetch("origin").unwrap();
        assert!(fetched.is_up_to_date());
        assert_eq!(
            engine.fetch("upstream").unwrap_err().kind(),
            ErrorKind::RemoteNotFound
        );
    }

    #[test]
    fn pull_brings_remote_commits_into_a_fresh_clone() {
        let mut origin = engine("first-commit");
        origin.add_remote("origin", "u").unwrap();
        commit_edit(&mut origin, "/README.md", "from upstream");
        origin.push("origin", "main").unwrap();

        // A second repository that shares only the remote.
        let remotes = origin.repository().unwrap().remotes.clone();
        let mut clone = engine("blank");
        clone.initialize_repo().unwrap();
        clone
            .transact(|txn| {
                txn.state.repo_mut()?.remotes = remotes;
                Ok(())
            })
            .unwrap();

        let pulled = clone.pull("origin", "main").unwrap();
        assert_eq!(pulled.fetch.commits_received.len(), 2);
        assert_eq!(pulled.merge_status, MergeStatus::FastForward);
        assert_eq!(clone.head_label(), "HEAD -> main");
        let readme = clone.get_entry_by_path("/README.md").unwrap().as_file().unwrap();
        assert_eq!(readme.content, "from upstream");
        assert!(readme.flags.tracked);
    }

    #[test]
    fn pull_up_to_date_leaves_tree_alone() {
        let mut engine = engine("first-commit");
        engine.add_remote("origin", "u").unwrap();
        engine.push("origin", "main").unwrap();
        let readme = id_of(&engine, "/README.md");
        engine.update_file_content(&readme, "local wip").unwrap();

        let pulled = engine.pull("origin", "main").unwrap();
        assert_eq!(pulled.merge_status, MergeStatus::UpToDate);
        assert_eq!(engine.tree().get_file(&readme).unwrap().content, "local wip");
    }

    #[test]
    fn pull_overwrites_diverged_branch() {
        let mut engine = engine("first-commit");
        engine.add_remote("origin", "u").unwrap();
        engine.push("origin", "main").unwrap();
        let pushed = engine.head_commit().unwrap();
        commit_edit(&mut engine, "/README.md", "local only");

        engine.hard_reset(Some(pushed.as_str())).unwrap();
        commit_edit(&mut engine, "/README.md", "remote side");
        engine.push("origin", "main").unwrap();
        let remote_tip = engine.head_commit().unwrap();

        engine.hard_reset(Some("HEAD~1")).unwrap();
        commit_edit(&mut engine, "/README.md", "diverged");
        let pulled = engine.pull("origin", "main").unwrap();
        assert_eq!(pulled.merge_status, MergeStatus::Overwritten);
        assert_eq!(engine.head_commit(), Some(remote_tip));
    }

    #[test]
    fn pull_from_another_branch_switches_to_it() {
        let mut engine = engine("feature-branch");
        engine.add_remote("origin", "u").unwrap();
        engine.push("origin", "main").unwrap();
        engine.checkout_branch("feature/graph").unwrap();

        let pulled = engine.pull("origin", "main").unwrap();
        assert_eq!(pulled.merge_status, MergeStatus::UpToDate);
        assert!(pulled.switched_branch);
        assert_eq!(engine.head_label(), "HEAD -> main");
        let main_ts = engine.get_entry_by_path("/src/main.ts").unwrap().as_file().unwrap();
        assert!(!main_ts.content.contains("graph"));

        assert!(!engine.pull("origin", "main").unwrap().switched_branch);
    }

    #[test]
    fn pull_unknown_remote_branch_fails() {
        let mut engine = engine("first-commit");
        engine.add_remote("origin", "u").unwrap();
        assert_eq!(
            engine.pull("origin", "main").unwrap_err().kind(),
            ErrorKind::RefNotFound
        );
    }
}
