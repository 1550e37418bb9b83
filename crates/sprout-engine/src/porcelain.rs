//! Text protocol: tokenized command lines in, output lines out.
//!
//! Each command produces a [`CommandOutput`]. Failures are reported as
//! output lines with `success = false`; nothing here panics or returns an
//! error to the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use sprout_index::{FileStatus, StatusEntry};
use sprout_refs::Head;
use sprout_sync::{MergeStatus, RefUpdate};
use sprout_tree::{path, Entry, EntryKind};
use sprout_types::ErrorKind;

use crate::engine::Engine;
use crate::error::EngineError;
use crate::timeline::EventKind;
use crate::types::{CheckoutOutcome, InitOutcome};

const DEFAULT_REMOTE: &str = "origin";
const DEFAULT_TIMELINE_LINES: usize = 10;
const STATUS_INDENT: &str = "        ";

/// Result of one command line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub success: bool,
    pub output: Vec<String>,
}

impl CommandOutput {
    pub fn ok(output: Vec<String>) -> Self {
        Self {
            success: true,
            output,
        }
    }

    pub fn fail(output: Vec<String>) -> Self {
        Self {
            success: false,
            output,
        }
    }

    fn line(text: impl Into<String>) -> Self {
        Self::ok(vec![text.into()])
    }

    fn error(text: impl Into<String>) -> Self {
        Self::fail(vec![text.into()])
    }
}

impl From<EngineError> for CommandOutput {
    fn from(err: EngineError) -> Self {
        Self::error(render_error(&err))
    }
}

/// Render an engine error the way git prints it.
pub fn render_error(err: &EngineError) -> String {
    match err.kind() {
        ErrorKind::NotARepository
        | ErrorKind::RefNotFound
        | ErrorKind::RemoteNotFound
        | ErrorKind::EntryNotFound
        | ErrorKind::NoCommitsYet => format!("fatal: {err}"),
        _ => format!("error: {err}"),
    }
}

/// Run one tokenized command line against `engine`.
pub fn run_line_args(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let Some((command, rest)) = args.split_first() else {
        return CommandOutput::ok(Vec::new());
    };
    let command = command.to_lowercase();
    debug!(command = %command, args = rest.len(), "running command");
    match command.as_str() {
        "help" => help(),
        "ls" => ls(engine, rest),
        "cat" => cat(engine, rest),
        "open" => open(engine, rest),
        "touch" => create(engine, rest, EntryKind::File),
        "mkdir" => create(engine, rest, EntryKind::Directory),
        "rm" => remove(engine, rest),
        "mv" => rename(engine, rest),
        "write" => write(engine, rest),
        "timeline" => timeline(engine, rest),
        "scenario" => scenario(engine, rest),
        "task" => task(engine, rest),
        "hint" => hint(engine, rest),
        "git" => git(engine, rest),
        other => CommandOutput::error(format!("Command not found: {other}")),
    }
}

// ---------------------------------------------------------------
// Shell commands
// ---------------------------------------------------------------

fn help() -> CommandOutput {
    CommandOutput::ok(
        [
            "Available commands:",
            "help, ls [path], open <path>, cat <path>, touch <path>, mkdir <path>",
            "rm <path>, mv <path> <new-name>, write <path> <text>, timeline [n], scenario [id]",
            "task [id], hint [id]",
            "git commands: init, status, add, commit, checkout, switch, branch, log, reset,",
            "              remote, push, fetch, pull",
        ]
        .map(str::to_string)
        .to_vec(),
    )
}

fn ls(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let target = args.first().map(String::as_str).unwrap_or("/");
    let lines = match engine.get_entry_by_path(target) {
        None => return CommandOutput::error(format!("ls: cannot access '{target}': No such entry")),
        Some(Entry::File(file)) => vec![file.name.clone()],
        Some(Entry::Directory(dir)) => engine
            .tree()
            .visible_children(&dir.id)
            .into_iter()
            .map(|child| match child {
                Entry::Directory(dir) => format!("{}/", dir.name),
                Entry::File(file) => file.name.clone(),
            })
            .collect(),
    };
    engine.log_event(EventKind::Command, format!("ls {target}"), None);
    if lines.is_empty() {
        CommandOutput::line("(empty)")
    } else {
        CommandOutput::ok(lines)
    }
}

fn cat(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let Some(target) = args.first() else {
        return CommandOutput::error("Usage: cat <path>");
    };
    let Some(file) = engine.get_entry_by_path(target).and_then(Entry::as_file) else {
        return CommandOutput::error(format!("cat: {target}: not a file"));
    };
    let label = format!("Cat {}", file.path);
    let lines = file.content.split('\n').map(str::to_string).collect();
    engine.log_event(EventKind::Command, label, None);
    CommandOutput::ok(lines)
}

fn open(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let Some(target) = args.first() else {
        return CommandOutput::error("Usage: open <path>");
    };
    let Some(file) = engine.get_entry_by_path(target).and_then(Entry::as_file) else {
        return CommandOutput::error(format!("open: {target} is not a file"));
    };
    let (id, path) = (file.id.clone(), file.path.clone());
    match engine.select_file(&id) {
        Ok(()) => CommandOutput::line(format!("Opened {path}")),
        Err(err) => CommandOutput::error(format!("open: {err}")),
    }
}

fn create(engine: &mut Engine, args: &[String], kind: EntryKind) -> CommandOutput {
    let verb = match kind {
        EntryKind::File => "touch",
        EntryKind::Directory => "mkdir",
    };
    let Some(raw) = args.first() else {
        return CommandOutput::error(format!("Usage: {verb} <path>"));
    };
    let target = path::sanitize(raw);
    let Some(parent) = engine.tree().find_id_by_path(path::parent(&target)) else {
        return CommandOutput::error(format!(
            "{verb}: cannot create '{raw}': No such file or directory"
        ));
    };
    match engine.create_entry(&parent, path::file_name(&target), kind) {
        Ok(_) => CommandOutput::line(format!("Created {kind} {target}")),
        Err(err) => CommandOutput::error(format!("{verb}: {err}")),
    }
}

fn remove(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let Some(raw) = args.first() else {
        return CommandOutput::error("Usage: rm <path>");
    };
    let Some(id) = engine.tree().find_id_by_path(raw) else {
        return CommandOutput::error(format!("rm: cannot remove '{raw}': No such entry"));
    };
    match engine.delete_entry(&id) {
        Ok(report) => CommandOutput::line(format!("Removed {}", report.path)),
        Err(err) => CommandOutput::error(format!("rm: {err}")),
    }
}

fn rename(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let [raw, name, ..] = args else {
        return CommandOutput::error("Usage: mv <path> <new-name>");
    };
    let Some(entry) = engine.get_entry_by_path(raw) else {
        return CommandOutput::error(format!("mv: cannot stat '{raw}': No such entry"));
    };
    let (id, old) = (entry.id().clone(), entry.path().to_string());
    match engine.rename_entry(&id, name) {
        Ok(new) => CommandOutput::line(format!("Renamed {old} -> {new}")),
        Err(err) => CommandOutput::error(format!("mv: {err}")),
    }
}

fn write(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let Some((raw, words)) = args.split_first() else {
        return CommandOutput::error("Usage: write <path> <text>");
    };
    let Some(file) = engine.get_entry_by_path(raw).and_then(Entry::as_file) else {
        return CommandOutput::error(format!("write: {raw}: not a file"));
    };
    let (id, path) = (file.id.clone(), file.path.clone());
    let content = words.join(" ").replace("\\n", "\n");
    let bytes = content.len();
    match engine.update_file_content(&id, content) {
        Ok(()) => CommandOutput::line(format!("Wrote {bytes} byte(s) to {path}")),
        Err(err) => CommandOutput::error(format!("write: {err}")),
    }
}

fn timeline(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let limit = match args.first() {
        None => DEFAULT_TIMELINE_LINES,
        Some(raw) => match raw.parse::<usize>() {
            Ok(limit) if limit > 0 => limit,
            _ => return CommandOutput::error("Usage: timeline [n]"),
        },
    };
    let lines: Vec<String> = engine
        .timeline()
        .recent(limit)
        .iter()
        .map(ToString::to_string)
        .collect();
    if lines.is_empty() {
        CommandOutput::line("(no events yet)")
    } else {
        CommandOutput::ok(lines)
    }
}

fn scenario(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let Some(id) = args.first() else {
        let active = engine.scenario_id().to_string();
        let lines = engine
            .scenario_catalog()
            .iter()
            .map(|info| {
                let marker = if info.id == active { '*' } else { ' ' };
                format!("{marker} {:<15} {} [{}]", info.id, info.title, info.difficulty)
            })
            .collect();
        return CommandOutput::ok(lines);
    };
    match engine.load_scenario(id) {
        Ok(info) => CommandOutput::ok(vec![
            format!("Loaded scenario '{}'.", info.title),
            info.summary.to_string(),
        ]),
        Err(err) => CommandOutput::error(format!("scenario: {err}")),
    }
}

fn task(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let Some(id) = args.first() else {
        return CommandOutput::ok(engine.tasks().iter().map(ToString::to_string).collect());
    };
    match engine.toggle_task(id) {
        Ok(true) => CommandOutput::line(format!("Marked {id} done.")),
        Ok(false) => CommandOutput::line(format!("Marked {id} not done.")),
        Err(err) => CommandOutput::error(format!("task: {err}")),
    }
}

fn hint(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let Some(id) = args.first() else {
        let active = engine.active_hint().map(|hint| hint.id.clone());
        let lines = engine
            .hints()
            .iter()
            .map(|hint| {
                let marker = if active.as_ref() == Some(&hint.id) { '*' } else { ' ' };
                format!("{marker} {} {}", hint.id, hint.title)
            })
            .collect();
        return CommandOutput::ok(lines);
    };
    match engine.view_hint(id) {
        Ok(hint) => CommandOutput::ok(vec![format!("{}:", hint.title), hint.body]),
        Err(err) => CommandOutput::error(format!("hint: {err}")),
    }
}

// ---------------------------------------------------------------
// git
// ---------------------------------------------------------------

const GIT_COMMANDS: &[&str] = &[
    "init", "status", "add", "commit", "checkout", "switch", "branch", "log", "reset", "remote",
    "push", "fetch", "pull",
];

fn git(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let Some((sub, rest)) = args.split_first() else {
        return CommandOutput::error("usage: git <command>");
    };
    if !GIT_COMMANDS.contains(&sub.as_str()) {
        return CommandOutput::error(format!("git: '{sub}' is not supported yet."));
    }
    if sub != "init" && !engine.is_initialized() {
        return EngineError::NotARepository.into();
    }
    match sub.as_str() {
        "init" => git_init(engine),
        "status" => git_status(engine),
        "add" => git_add(engine, rest),
        "commit" => git_commit(engine, rest),
        "checkout" => git_checkout(engine, rest),
        "switch" => git_switch(engine, rest),
        "branch" => git_branch(engine, rest),
        "log" => git_log(engine, rest),
        "reset" => git_reset(engine, rest),
        "remote" => git_remote(engine, rest),
        "push" => git_push(engine, rest),
        "fetch" => git_fetch(engine, rest),
        _ => git_pull(engine, rest),
    }
}

fn git_init(engine: &mut Engine) -> CommandOutput {
    let root = engine.tree().root_name().to_string();
    match engine.initialize_repo() {
        Ok(InitOutcome::Created) => {
            CommandOutput::line(format!("Initialized empty Git repository in {root}/.git/"))
        }
        Ok(InitOutcome::Reinitialized) => {
            CommandOutput::line(format!("Reinitialized existing Git repository in {root}/.git/"))
        }
        Err(err) => err.into(),
    }
}

fn git_status(engine: &mut Engine) -> CommandOutput {
    let status = match engine.status() {
        Ok(status) => status,
        Err(err) => return err.into(),
    };
    let mut lines = vec![engine.head_label(), String::new()];
    if status.has_staged_changes() {
        lines.push("Changes to be committed:".to_string());
        lines.push("  (use \"git reset HEAD <file>...\" to unstage)".to_string());
        lines.extend(status.staged.iter().map(status_line));
        lines.push(String::new());
    }
    if status.has_unstaged_changes() {
        lines.push("Changes not staged for commit:".to_string());
        lines.push("  (use \"git add <file>...\" to update what will be committed)".to_string());
        lines.extend(status.modified.iter().map(status_line));
        lines.extend(
            status
                .deleted
                .iter()
                .map(|path| format!("{STATUS_INDENT}{}{path}", FileStatus::Deleted.label())),
        );
        lines.push(String::new());
    }
    if !status.untracked.is_empty() {
        lines.push("Untracked files:".to_string());
        lines.push("  (use \"git add <file>...\" to include in what will be committed)".to_string());
        lines.extend(status.untracked.iter().map(|path| format!("{STATUS_INDENT}{path}")));
        lines.push(String::new());
    }
    if status.is_clean() {
        lines.push("nothing to commit, working tree clean".to_string());
    }
    engine.log_event(EventKind::Git, "git status", None);
    CommandOutput::ok(lines)
}

fn status_line(entry: &StatusEntry) -> String {
    match &entry.status {
        FileStatus::Renamed { from } => {
            format!("{STATUS_INDENT}{}{from} -> {}", entry.status.label(), entry.path)
        }
        status => format!("{STATUS_INDENT}{}{}", status.label(), entry.path),
    }
}

fn git_add(engine: &mut Engine, args: &[String]) -> CommandOutput {
    if args.is_empty() {
        return CommandOutput::error("usage: git add <path|.>");
    }
    if args.iter().any(|arg| arg == "." || arg == "-A" || arg == "--all") {
        return match engine.stage_all_dirty() {
            Ok(staged) if staged.is_empty() => CommandOutput::line("Nothing to stage."),
            Ok(staged) => CommandOutput::line(format!("Staged {} file(s).", staged.len())),
            Err(err) => err.into(),
        };
    }
    match engine.stage_paths(args) {
        Ok(staged) if staged.is_empty() => CommandOutput::line("Nothing new to stage."),
        Ok(staged) => CommandOutput::ok(staged.iter().map(|path| format!("staged: {path}")).collect()),
        Err(err) => err.into(),
    }
}

fn git_commit(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let message = args
        .iter()
        .position(|arg| arg == "-m")
        .and_then(|idx| args.get(idx + 1));
    let Some(message) = message else {
        return CommandOutput::error("error: use git commit -m \"message\"");
    };
    match engine.commit_changes(message) {
        Ok(summary) => CommandOutput::ok(vec![
            format!("[{}] {}", summary.branch, summary.id),
            format!(" {}", summary.message),
            String::new(),
            format!("{} file(s) committed.", summary.files),
        ]),
        Err(err) => err.into(),
    }
}

fn git_checkout(engine: &mut Engine, args: &[String]) -> CommandOutput {
    match args {
        [] => CommandOutput::error("usage: git checkout <branch|commit>"),
        [flag] if flag == "-b" => CommandOutput::error("usage: git checkout -b <branch>"),
        [flag, name, ..] if flag == "-b" => checkout_output(engine.switch_branch(name, true)),
        [target, ..] => checkout_output(engine.checkout(target)),
    }
}

fn git_switch(engine: &mut Engine, args: &[String]) -> CommandOutput {
    match args {
        [] => CommandOutput::error("usage: git switch <branch>"),
        [flag] if flag == "-c" => CommandOutput::error("usage: git switch -c <branch>"),
        [flag, name, ..] if flag == "-c" => checkout_output(engine.switch_branch(name, true)),
        [name, ..] => checkout_output(engine.switch_branch(name, false)),
    }
}

fn checkout_output(result: Result<CheckoutOutcome, EngineError>) -> CommandOutput {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => return err.into(),
    };
    let mut lines = match &outcome.head {
        Head::Attached(branch) if outcome.created => {
            vec![format!("Switched to a new branch '{branch}'")]
        }
        Head::Attached(branch) => vec![format!("Switched to branch '{branch}'")],
        Head::Detached(id) => vec![
            format!("Note: switching to '{id}'."),
            String::new(),
            "You are in 'detached HEAD' state. Create a branch before committing.".to_string(),
            format!("HEAD is now at {id} {}", outcome.commit.summary()),
        ],
    };
    if !outcome.report.skipped.is_empty() {
        lines.push(format!(
            "warning: untracked files kept in place: {}",
            outcome.report.skipped.join(", ")
        ));
    }
    CommandOutput::ok(lines)
}

fn git_branch(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let Some((flag, rest)) = args.split_first() else {
        return list_branches(engine, false, true);
    };
    match flag.as_str() {
        "-r" => list_branches(engine, true, false),
        "-a" => list_branches(engine, true, true),
        "-m" | "-M" => {
            let force = flag == "-M";
            let (old, new) = match rest {
                [new] => match engine.repository().and_then(|repo| repo.refs.current_branch()) {
                    Some(current) => (current.to_string(), new.clone()),
                    None => {
                        return CommandOutput::error(
                            "fatal: cannot rename the current branch while not on any",
                        )
                    }
                },
                [old, new, ..] => (old.clone(), new.clone()),
                [] => return CommandOutput::error("usage: git branch -m [old] <new>"),
            };
            match engine.rename_branch(&old, &new, force) {
                Ok(()) => CommandOutput::line(format!("Renamed branch '{old}' to '{new}'.")),
                Err(err) => err.into(),
            }
        }
        "-d" | "-D" => {
            let Some(name) = rest.first() else {
                return CommandOutput::error("usage: git branch -d <branch>");
            };
            match engine.delete_branch(name, flag == "-D") {
                Ok(Some(tip)) => CommandOutput::line(format!("Deleted branch {name} (was {tip}).")),
                Ok(None) => CommandOutput::line(format!("Deleted branch {name}.")),
                Err(err) => err.into(),
            }
        }
        other if other.starts_with('-') => {
            CommandOutput::error(format!("error: unknown switch '{other}'"))
        }
        name => match engine.create_branch(name) {
            Ok(at) => CommandOutput::line(format!("Created branch '{name}' at {at}.")),
            Err(err) => err.into(),
        },
    }
}

fn list_branches(engine: &Engine, remote: bool, local: bool) -> CommandOutput {
    let mut lines = Vec::new();
    if local {
        let branches = engine.list_branches();
        if branches.is_empty() && !remote {
            return CommandOutput::line("No branches created yet.");
        }
        lines.extend(branches.into_iter().map(|branch| {
            let marker = if branch.is_current { '*' } else { ' ' };
            let suffix = branch
                .commit
                .map(|commit| format!(" ({commit})"))
                .unwrap_or_default();
            format!("{marker} {}{suffix}", branch.name)
        }));
    }
    if remote {
        let prefix = if local { "remotes/" } else { "" };
        lines.extend(
            engine
                .list_tracking_refs()
                .into_iter()
                .map(|tracking| format!("  {prefix}{} ({})", tracking.short_name(), tracking.commit)),
        );
    }
    CommandOutput::ok(lines)
}

fn git_log(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let mut limit = engine.config().log_limit;
    if let Some(idx) = args.iter().position(|arg| arg == "-n") {
        match args.get(idx + 1).map(|raw| raw.parse::<usize>()) {
            Some(Ok(parsed)) if parsed > 0 => limit = parsed,
            _ => return CommandOutput::error("usage: git log [-n <count>] [--oneline]"),
        }
    }
    let oneline = args.iter().any(|arg| arg == "--oneline");

    let commits = match engine.get_commit_log(limit) {
        Ok(commits) => commits,
        Err(err) => return err.into(),
    };
    if commits.is_empty() {
        return CommandOutput::line("No commits yet. Make one with git commit -m \"message\".");
    }
    engine.log_event(EventKind::Git, "git log", None);

    if oneline {
        return CommandOutput::ok(
            commits
                .iter()
                .map(|commit| format!("{} {}", commit.id, commit.summary()))
                .collect(),
        );
    }
    let mut lines = Vec::new();
    for (idx, commit) in commits.iter().enumerate() {
        if idx > 0 {
            lines.push(String::new());
        }
        lines.push(format!("commit {}", commit.id));
        lines.push(format!("Author: {}", commit.author));
        lines.push(format!("Date:   {}", commit.timestamp.format_log()));
        lines.push(String::new());
        lines.push(format!("    {}", commit.message));
    }
    CommandOutput::ok(lines)
}

fn git_reset(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let paths: Vec<&String> = match args {
        [] => Vec::new(),
        [flag, rest @ ..] if flag == "--hard" => {
            return match engine.hard_reset(rest.first().map(String::as_str)) {
                Ok(outcome) => CommandOutput::line(format!(
                    "HEAD is now at {} {}",
                    outcome.commit.id,
                    outcome.commit.summary()
                )),
                Err(err) => err.into(),
            };
        }
        [flag, ..] if flag.starts_with('-') && flag != "--" => {
            return CommandOutput::error(
                "Supported reset commands: git reset, git reset --hard [ref], git reset <path>...",
            )
        }
        _ => args
            .iter()
            .skip_while(|arg| *arg == "HEAD" || *arg == "--")
            .collect(),
    };

    if paths.is_empty() {
        return match engine.clear_stage() {
            Ok(_) => CommandOutput::line("Unstaged all files (mixed reset)."),
            Err(err) => err.into(),
        };
    }
    match engine.unstage_paths(&paths) {
        Ok(removed) if removed.is_empty() => CommandOutput::line("Nothing to unstage."),
        Ok(removed) => CommandOutput::ok(removed.iter().map(|path| format!("unstaged: {path}")).collect()),
        Err(err) => err.into(),
    }
}

fn git_remote(engine: &mut Engine, args: &[String]) -> CommandOutput {
    match args {
        [] => CommandOutput::ok(engine.list_remotes().into_iter().map(|remote| remote.name).collect()),
        [flag] if flag == "-v" => CommandOutput::ok(
            engine
                .list_remotes()
                .into_iter()
                .flat_map(|remote| {
                    [
                        format!("{}\t{} (fetch)", remote.name, remote.url),
                        format!("{}\t{} (push)", remote.name, remote.url),
                    ]
                })
                .collect(),
        ),
        [sub, name, url, ..] if sub == "add" => match engine.add_remote(name, url) {
            Ok(()) => CommandOutput::line(format!("Added remote '{name}' ({url}).")),
            Err(err) => err.into(),
        },
        [sub, ..] if sub == "add" => CommandOutput::error("usage: git remote add <name> <url>"),
        [sub, name, ..] if sub == "remove" || sub == "rm" => match engine.remove_remote(name) {
            Ok(()) => CommandOutput::line(format!("Removed remote '{name}'.")),
            Err(err) => err.into(),
        },
        [sub, ..] if sub == "remove" || sub == "rm" => {
            CommandOutput::error("usage: git remote remove <name>")
        }
        [other, ..] => CommandOutput::error(format!("error: unknown subcommand: {other}")),
    }
}

/// `[remote] [branch]` with flags dropped; defaults to `origin` and the
/// current branch.
fn remote_and_branch(engine: &Engine, args: &[String]) -> Result<(String, String), CommandOutput> {
    let mut positional = args.iter().filter(|arg| !arg.starts_with('-'));
    let remote = positional
        .next()
        .cloned()
        .unwrap_or_else(|| DEFAULT_REMOTE.to_string());
    let branch = match positional.next() {
        Some(branch) => branch.clone(),
        None => engine
            .repository()
            .and_then(|repo| repo.refs.current_branch())
            .map(str::to_string)
            .ok_or_else(|| CommandOutput::error("fatal: You are not currently on a branch."))?,
    };
    Ok((remote, branch))
}

fn remote_url(engine: &Engine, name: &str) -> String {
    engine
        .list_remotes()
        .into_iter()
        .find(|remote| remote.name == name)
        .map(|remote| remote.url)
        .unwrap_or_else(|| name.to_string())
}

fn update_line(update: &RefUpdate, source: &str) -> String {
    if update.old.is_none() {
        format!(" * [new branch]      {source} -> {}", update.name)
    } else {
        format!("   {}  {source} -> {}", update.range(), update.name)
    }
}

fn git_push(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let (remote, branch) = match remote_and_branch(engine, args) {
        Ok(pair) => pair,
        Err(output) => return output,
    };
    match engine.push(&remote, &branch) {
        Ok(result) if result.is_up_to_date() => CommandOutput::line("Everything up-to-date"),
        Ok(result) => CommandOutput::ok(vec![
            format!("To {}", remote_url(engine, &remote)),
            update_line(&result.update, &branch),
            format!("{} commit(s) pushed.", result.commits_sent.len()),
        ]),
        Err(err) => err.into(),
    }
}

fn git_fetch(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let remote = args
        .iter()
        .find(|arg| !arg.starts_with('-'))
        .cloned()
        .unwrap_or_else(|| DEFAULT_REMOTE.to_string());
    match engine.fetch(&remote) {
        Ok(result) if result.is_up_to_date() => CommandOutput::line("Already up to date."),
        Ok(result) => {
            let mut lines = vec![format!("From {}", remote_url(engine, &remote))];
            lines.extend(result.refs_updated.iter().map(|update| {
                let source = update.name.rsplit_once('/').map(|(_, b)| b).unwrap_or(update.name.as_str());
                update_line(update, source)
            }));
            lines.push(format!("{} commit(s) received.", result.commits_received.len()));
            CommandOutput::ok(lines)
        }
        Err(err) => err.into(),
    }
}

fn git_pull(engine: &mut Engine, args: &[String]) -> CommandOutput {
    let (remote, branch) = match remote_and_branch(engine, args) {
        Ok(pair) => pair,
        Err(output) => return output,
    };
    let result = match engine.pull(&remote, &branch) {
        Ok(result) => result,
        Err(err) => return err.into(),
    };
    let mut lines = Vec::new();
    if !result.fetch.is_up_to_date() {
        lines.push(format!("From {}", remote_url(engine, &remote)));
    }
    match result.merge_status {
        MergeStatus::UpToDate => lines.push("Already up to date.".to_string()),
        MergeStatus::FastForward => {
            if let Some(old) = &result.update.old {
                lines.push(format!("Updating {old}..{}", result.update.new));
            }
            lines.push("Fast-forward".to_string());
        }
        MergeStatus::Overwritten => lines.push(format!(
            "Reset {branch} to {remote}/{branch}; local commits are no longer on the branch."
        )),
    }
    if result.switched_branch {
        lines.push(format!("Switched to branch '{branch}'"));
    }
    CommandOutput::ok(lines)
}
