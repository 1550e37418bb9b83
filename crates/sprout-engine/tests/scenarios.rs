//! End-to-end flows through the public engine API and the text protocol.

use sprout_engine::{
    run_line_args, CommandOutput, Engine, EngineConfig, EntryKind, ErrorKind, Head,
};

fn blank() -> Engine {
    Engine::new(EngineConfig::default().with_scenario("blank")).unwrap()
}

fn run(engine: &mut Engine, line: &str) -> CommandOutput {
    let args: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    run_line_args(engine, &args)
}

fn content(engine: &Engine, path: &str) -> Option<String> {
    engine
        .get_entry_by_path(path)
        .and_then(|entry| entry.as_file())
        .map(|file| file.content.clone())
}

#[test]
fn branch_checkout_restores_committed_content() {
    let mut engine = blank();
    engine.initialize_repo().unwrap();

    let root = engine.tree().root_id().clone();
    let file = engine.create_entry(&root, "a.txt", EntryKind::File).unwrap();
    engine.update_file_content(&file, "hi").unwrap();
    engine.stage_entry_ids(&[file.clone()]).unwrap();
    let first = engine.commit_changes("first").unwrap();

    engine.create_branch("feat").unwrap();
    engine.update_file_content(&file, "bye").unwrap();
    assert_eq!(engine.stage_entry_ids(&[file.clone()]).unwrap(), vec!["/a.txt"]);
    assert!(engine.stage_entry_ids(&[file.clone()]).unwrap().is_empty());
    let second = engine.commit_changes("second").unwrap();
    assert_ne!(first.id, second.id);

    let outcome = engine.checkout_branch("feat").unwrap();
    assert_eq!(outcome.head, Head::Attached("feat".to_string()));
    assert_eq!(content(&engine, "/a.txt").as_deref(), Some("hi"));
    assert_eq!(engine.head_label(), "HEAD -> feat");
    assert_eq!(engine.head_commit(), Some(first.id.clone()));

    engine.checkout_branch("main").unwrap();
    assert_eq!(content(&engine, "/a.txt").as_deref(), Some("bye"));
    assert!(engine.status().unwrap().is_clean());
}

#[test]
fn the_same_flow_through_the_text_protocol() {
    let mut engine = blank();
    assert!(run(&mut engine, "git init").success);
    assert!(run(&mut engine, "touch a.txt").success);
    assert!(run(&mut engine, "write a.txt hi").success);
    assert_eq!(run(&mut engine, "git add .").output, vec!["Staged 1 file(s)."]);
    assert!(run(&mut engine, "git commit -m first").success);
    assert!(run(&mut engine, "git branch feat").success);
    assert!(run(&mut engine, "write a.txt bye").success);
    assert!(run(&mut engine, "git add a.txt").success);
    assert!(run(&mut engine, "git commit -m second").success);

    assert_eq!(
        run(&mut engine, "git checkout feat").output,
        vec!["Switched to branch 'feat'"]
    );
    assert_eq!(run(&mut engine, "cat a.txt").output, vec!["hi"]);
    assert_eq!(run(&mut engine, "git status").output[0], "HEAD -> feat");

    let oneline = run(&mut engine, "git log --oneline");
    assert_eq!(oneline.output.len(), 1);
    assert!(oneline.output[0].ends_with(" first"));
}

#[test]
fn deleted_files_come_back_on_checkout() {
    let mut engine = blank();
    for line in [
        "git init",
        "mkdir docs",
        "touch docs/guide.md",
        "write docs/guide.md v1",
        "git add .",
        "git commit -m docs",
        "git switch -c cleanup",
        "rm docs/guide.md",
        "git add docs/guide.md",
        "git commit -m remove",
    ] {
        let out = run(&mut engine, line);
        assert!(out.success, "{line}: {:?}", out.output);
    }
    assert!(engine.get_entry_by_path("/docs/guide.md").is_none());

    run(&mut engine, "git checkout main");
    assert_eq!(content(&engine, "/docs/guide.md").as_deref(), Some("v1"));

    run(&mut engine, "git checkout cleanup");
    assert!(engine.get_entry_by_path("/docs/guide.md").is_none());
    assert!(engine.status().unwrap().is_clean());
}

#[test]
fn renamed_files_follow_the_branch() {
    let mut engine = blank();
    for line in [
        "git init",
        "touch old.txt",
        "write old.txt body",
        "git add .",
        "git commit -m add",
        "git switch -c rename",
        "mv old.txt new.txt",
        "git add .",
        "git commit -m rename",
        "git checkout main",
    ] {
        let out = run(&mut engine, line);
        assert!(out.success, "{line}: {:?}", out.output);
    }
    assert_eq!(content(&engine, "/old.txt").as_deref(), Some("body"));
    assert!(engine.get_entry_by_path("/new.txt").is_none());

    run(&mut engine, "git checkout rename");
    assert_eq!(content(&engine, "/new.txt").as_deref(), Some("body"));
    assert!(engine.get_entry_by_path("/old.txt").is_none());
}

#[test]
fn failures_leave_the_engine_untouched() {
    let mut engine = blank();
    run(&mut engine, "git init");
    let before = engine.state().clone();
    let events = engine.timeline().events().len();

    for line in [
        "git commit -m nothing",
        "git checkout nowhere",
        "git branch -d main",
        "git push origin main",
        "git add missing.txt",
        "git reset --hard",
    ] {
        assert!(!run(&mut engine, line).success, "{line}");
    }
    assert_eq!(engine.state(), &before);
    assert_eq!(engine.timeline().events().len(), events);
}

#[test]
fn commits_are_refused_while_detached() {
    let mut engine = Engine::new(EngineConfig::default().with_scenario("first-commit")).unwrap();
    let head = engine.head_commit().unwrap();
    engine.checkout_commit(&head).unwrap();

    let root = engine.tree().root_id().clone();
    engine.create_entry(&root, "x.txt", EntryKind::File).unwrap();
    engine.stage_all_dirty().unwrap();
    let err = engine.commit_changes("detached").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DetachedHeadCommit);
}

#[test]
fn clone_style_pull_populates_an_empty_repository() {
    let mut origin = Engine::new(EngineConfig::default().with_scenario("feature-branch")).unwrap();
    origin.add_remote("origin", "memory://playground").unwrap();
    origin.push("origin", "main").unwrap();
    origin.push("origin", "feature/graph").unwrap();
    let remotes = origin.repository().unwrap().remotes.clone();

    let mut clone = blank();
    clone.initialize_repo().unwrap();
    let mut state = clone.state().clone();
    state.repo_mut().unwrap().remotes = remotes;
    let mut clone = Engine::with_state(EngineConfig::default(), state);

    let pulled = clone.pull("origin", "feature/graph").unwrap();
    assert_eq!(pulled.fetch.refs_updated.len(), 2);
    assert_eq!(clone.head_label(), "HEAD -> feature/graph");
    let main_ts = content(&clone, "/src/main.ts").unwrap();
    assert!(main_ts.contains("export function graph"));
    assert_eq!(clone.get_commit_log(10).unwrap().len(), 2);
}

fn listing(engine: &mut Engine, path: &str) -> Vec<String> {
    let mut names = run(engine, &format!("ls {path}")).output;
    names.sort();
    names
}

#[test]
fn hard_reset_undoes_swapped_names() {
    let mut engine = blank();
    for line in [
        "git init",
        "touch a.txt",
        "write a.txt AAA",
        "touch b.txt",
        "write b.txt BBB",
        "git add .",
        "git commit -m base",
        "mv a.txt tmp.txt",
        "mv b.txt a.txt",
        "mv tmp.txt b.txt",
    ] {
        assert!(run(&mut engine, line).success, "{line}");
    }
    assert_eq!(content(&engine, "/a.txt").as_deref(), Some("BBB"));

    assert!(run(&mut engine, "git reset --hard").success);
    assert_eq!(content(&engine, "/a.txt").as_deref(), Some("AAA"));
    assert_eq!(content(&engine, "/b.txt").as_deref(), Some("BBB"));
    assert_eq!(listing(&mut engine, "/"), vec!["a.txt", "b.txt"]);
    assert!(engine.status().unwrap().is_clean());
}

#[test]
fn renaming_onto_a_deleted_path_keeps_the_commit() {
    let mut engine = blank();
    for line in [
        "git init",
        "touch a.txt",
        "write a.txt AAA",
        "touch b.txt",
        "write b.txt BBB",
        "git add .",
        "git commit -m base",
        "rm b.txt",
        "mv a.txt b.txt",
        "git add b.txt",
        "git commit -m move",
    ] {
        assert!(run(&mut engine, line).success, "{line}");
    }
    assert_eq!(
        run(&mut engine, "git status").output,
        vec!["HEAD -> main", "", "nothing to commit, working tree clean"]
    );
    assert_eq!(run(&mut engine, "git add .").output, vec!["Nothing to stage."]);
    assert!(!run(&mut engine, "git commit -m again").success);

    let head = engine.repository().unwrap().head_snapshot();
    assert_eq!(head.get("/b.txt"), Some("AAA"));
    assert!(!head.contains("/a.txt"));
    assert_eq!(content(&engine, "/b.txt").as_deref(), Some("AAA"));
}

#[test]
fn file_over_a_deleted_directory_survives_reset() {
    let mut engine = blank();
    for line in [
        "git init",
        "mkdir d",
        "touch d/x.txt",
        "write d/x.txt x",
        "git add .",
        "git commit -m base",
        "rm d",
        "touch d",
    ] {
        assert!(run(&mut engine, line).success, "{line}");
    }

    assert!(run(&mut engine, "git reset --hard").success);
    assert_eq!(listing(&mut engine, "/"), vec!["d"]);
    assert!(engine.get_entry_by_path("/d").unwrap().as_file().is_some());

    assert!(run(&mut engine, "rm d").success);
    assert!(run(&mut engine, "git reset --hard").success);
    assert_eq!(listing(&mut engine, "/"), vec!["d/"]);
    assert_eq!(content(&engine, "/d/x.txt").as_deref(), Some("x"));
}
