//! Property tests over randomly generated working trees.

use std::collections::BTreeMap;

use proptest::prelude::*;

use sprout_engine::{CommitId, Engine, EngineConfig, EntryId, EntryKind};

/// Distinct file names mapped to contents.
fn files() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("[a-z]{1,8}\\.txt", "[a-zA-Z0-9 ]{0,24}", 1..6)
        .prop_map(|map| map.into_iter().collect())
}

fn repo_with(files: &[(String, String)]) -> (Engine, Vec<EntryId>) {
    let mut engine = Engine::new(EngineConfig::default().with_scenario("blank")).unwrap();
    engine.initialize_repo().unwrap();
    let root = engine.tree().root_id().clone();
    let ids = files
        .iter()
        .map(|(name, content)| {
            let id = engine.create_entry(&root, name, EntryKind::File).unwrap();
            engine.update_file_content(&id, content.clone()).unwrap();
            id
        })
        .collect();
    (engine, ids)
}

/// Names edits draw from, so renames and re-creations collide often.
const NAMES: &[&str] = &["a.txt", "b.txt", "c.txt", "d.txt", "e.txt"];

/// One working tree or git step. File indexes wrap around the visible files.
#[derive(Clone, Debug)]
enum Op {
    Edit(usize, String),
    Rename(usize, usize),
    Delete(usize),
    Create(usize, String),
    Stage(usize),
    StageAll,
    Commit,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<usize>(), "[a-z]{0,6}").prop_map(|(file, content)| Op::Edit(file, content)),
        (any::<usize>(), 0..NAMES.len()).prop_map(|(file, name)| Op::Rename(file, name)),
        any::<usize>().prop_map(Op::Delete),
        (0..NAMES.len(), "[a-z]{0,6}").prop_map(|(name, content)| Op::Create(name, content)),
        any::<usize>().prop_map(Op::Stage),
        Just(Op::StageAll),
        Just(Op::Commit),
    ]
}

fn root_files(engine: &Engine) -> Vec<EntryId> {
    let tree = engine.tree();
    tree.visible_children(tree.root_id())
        .into_iter()
        .filter_map(|entry| entry.as_file())
        .map(|file| file.id.clone())
        .collect()
}

/// Apply `ops`, ignoring refused steps. Returns the commits made.
fn apply(engine: &mut Engine, ops: &[Op]) -> Vec<CommitId> {
    let mut commits = Vec::new();
    for op in ops {
        let files = root_files(engine);
        let pick = |index: &usize| files.get(index % files.len().max(1)).cloned();
        match op {
            Op::Edit(index, content) => {
                if let Some(id) = pick(index) {
                    let _ = engine.update_file_content(&id, content.clone());
                }
            }
            Op::Rename(index, name) => {
                if let Some(id) = pick(index) {
                    let _ = engine.rename_entry(&id, NAMES[*name]);
                }
            }
            Op::Delete(index) => {
                if let Some(id) = pick(index) {
                    let _ = engine.delete_entry(&id);
                }
            }
            Op::Create(name, content) => {
                let root = engine.tree().root_id().clone();
                if let Ok(id) = engine.create_entry(&root, NAMES[*name], EntryKind::File) {
                    let _ = engine.update_file_content(&id, content.clone());
                }
            }
            Op::Stage(index) => {
                if let Some(id) = pick(index) {
                    let _ = engine.stage_entry_ids(&[id]);
                }
            }
            Op::StageAll => {
                let _ = engine.stage_all_dirty();
            }
            Op::Commit => {
                if let Ok(summary) = engine.commit_changes("step") {
                    commits.push(summary.id);
                }
            }
        }
    }
    commits
}

/// Remove every untracked file so nothing can shadow a snapshot path.
fn drop_untracked(engine: &mut Engine) {
    let untracked: Vec<EntryId> = engine
        .tree()
        .files()
        .filter(|file| file.is_untracked())
        .map(|file| file.id.clone())
        .collect();
    for id in untracked {
        engine.delete_entry(&id).unwrap();
    }
}

fn visible_files(engine: &Engine) -> BTreeMap<String, String> {
    engine
        .tree()
        .files()
        .filter(|file| file.is_visible())
        .map(|file| (file.path.clone(), file.content.clone()))
        .collect()
}

fn snapshot_files(engine: &Engine, id: &CommitId) -> BTreeMap<String, String> {
    engine
        .repository()
        .unwrap()
        .history
        .snapshot(id)
        .unwrap()
        .iter()
        .map(|(path, content)| (path.to_string(), content.to_string()))
        .collect()
}

proptest! {
    #[test]
    fn staging_twice_stages_nothing_new(files in files()) {
        let (mut engine, _) = repo_with(&files);
        let first = engine.stage_all_dirty().unwrap();
        prop_assert_eq!(first.len(), files.len());
        prop_assert!(engine.stage_all_dirty().unwrap().is_empty());
        prop_assert!(engine.stage_paths(&["."]).unwrap().is_empty());
    }

    #[test]
    fn hard_reset_to_any_commit_is_exact(
        files in files(),
        ops in prop::collection::vec(op(), 0..32),
        pick in any::<usize>(),
    ) {
        let (mut engine, _) = repo_with(&files);
        engine.stage_all_dirty().unwrap();
        let base = engine.commit_changes("base").unwrap().id;
        let mut commits = vec![base];
        commits.extend(apply(&mut engine, &ops));
        drop_untracked(&mut engine);

        let target = commits[pick % commits.len()].clone();
        engine.hard_reset(Some(target.as_str())).unwrap();
        prop_assert_eq!(visible_files(&engine), snapshot_files(&engine, &target));
        prop_assert!(engine.status().unwrap().is_clean());
        prop_assert!(engine.repository().unwrap().staging.is_empty());

        let tip = commits[commits.len() - 1].clone();
        engine.hard_reset(Some(tip.as_str())).unwrap();
        prop_assert_eq!(visible_files(&engine), snapshot_files(&engine, &tip));
        prop_assert!(engine.status().unwrap().is_clean());
    }

    #[test]
    fn checkout_round_trip_is_exact(
        files in files(),
        ops in prop::collection::vec(op(), 0..32),
    ) {
        let (mut engine, _) = repo_with(&files);
        engine.stage_all_dirty().unwrap();
        let base = engine.commit_changes("base").unwrap().id;

        engine.switch_branch("topic", true).unwrap();
        apply(&mut engine, &ops);
        drop_untracked(&mut engine);
        let topic = engine.head_commit().unwrap();

        engine.checkout_branch("main").unwrap();
        prop_assert_eq!(visible_files(&engine), snapshot_files(&engine, &base));
        prop_assert!(engine.status().unwrap().is_clean());

        engine.checkout_branch("topic").unwrap();
        prop_assert_eq!(visible_files(&engine), snapshot_files(&engine, &topic));
        prop_assert!(engine.status().unwrap().is_clean());

        engine.checkout_commit(&base).unwrap();
        prop_assert_eq!(visible_files(&engine), snapshot_files(&engine, &base));
    }

    #[test]
    fn committing_everything_records_the_visible_tree(
        files in files(),
        ops in prop::collection::vec(op(), 0..32),
    ) {
        let (mut engine, _) = repo_with(&files);
        engine.stage_all_dirty().unwrap();
        engine.commit_changes("base").unwrap();
        apply(&mut engine, &ops);

        engine.stage_all_dirty().unwrap();
        let _ = engine.commit_changes("everything");
        let head = engine.head_commit().unwrap();
        prop_assert_eq!(visible_files(&engine), snapshot_files(&engine, &head));
        prop_assert!(engine.status().unwrap().is_clean());
        prop_assert!(engine.stage_all_dirty().unwrap().is_empty());
    }

    #[test]
    fn branch_delete_without_force_never_loses_an_unmerged_tip(files in files()) {
        let (mut engine, ids) = repo_with(&files);
        engine.stage_all_dirty().unwrap();
        engine.commit_changes("base").unwrap();

        engine.switch_branch("ahead", true).unwrap();
        engine.update_file_content(&ids[0], "changed on ahead!").unwrap();
        engine.stage_all_dirty().unwrap();
        let tip = engine.commit_changes("ahead").unwrap().id;
        engine.checkout_branch("main").unwrap();

        prop_assert!(engine.delete_branch("ahead", false).is_err());
        prop_assert_eq!(engine.resolve_revision("ahead").unwrap(), tip.clone());
        prop_assert_eq!(engine.delete_branch("ahead", true).unwrap(), Some(tip.clone()));
        // The commit itself survives the branch.
        prop_assert!(engine.repository().unwrap().history.contains(&tip));
    }

    #[test]
    fn repeated_push_sends_nothing(files in files()) {
        let (mut engine, _) = repo_with(&files);
        engine.stage_all_dirty().unwrap();
        engine.commit_changes("base").unwrap();
        engine.add_remote("origin", "memory://origin").unwrap();

        let first = engine.push("origin", "main").unwrap();
        prop_assert_eq!(first.commits_sent.len(), 1);
        let second = engine.push("origin", "main").unwrap();
        prop_assert!(second.is_up_to_date());
        prop_assert!(second.commits_sent.is_empty());
        prop_assert!(engine.fetch("origin").unwrap().is_up_to_date());
    }
}
