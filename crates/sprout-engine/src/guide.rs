//! Practice tasks and hints attached to each scenario.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A checklist item the learner ticks off by hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub detail: String,
    pub done: bool,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.done { 'x' } else { ' ' };
        write!(f, "[{mark}] {} {}: {}", self.id, self.title, self.detail)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub id: String,
    pub title: String,
    pub body: String,
}

type Item = (&'static str, &'static str, &'static str);

const BLANK_TASKS: &[Item] = &[
    ("task-1", "Create a repository", "Run git init in the empty folder."),
    ("task-2", "Add a first file", "Create a file with touch and give it text with write."),
    ("task-3", "Make the first commit", "Stage the file with git add and record it with git commit -m."),
];

const STARTER_TASKS: &[Item] = &[
    ("task-1", "Explore the repo", "Read README.md and inspect src/main.ts."),
    ("task-2", "Practice file edits", "Modify journal.md and note the timeline update."),
    ("task-3", "Review git graph", "Select a commit in the graph to see metadata."),
];

const FIRST_COMMIT_TASKS: &[Item] = &[
    ("task-1", "Read the history", "Run git log to see the initial commit."),
    ("task-2", "Commit an edit", "Change notes/journal.md, stage it, and commit it."),
    ("task-3", "Undo a mistake", "Edit a file, then run git reset --hard to restore it."),
];

const FEATURE_BRANCH_TASKS: &[Item] = &[
    ("task-1", "List branches", "Run git branch and find feature/graph."),
    ("task-2", "Switch branches", "Check out feature/graph and compare src/main.ts."),
    ("task-3", "Share the work", "Add a remote with git remote add and push feature/graph."),
];

const GETTING_STARTED: Item = (
    "hint-1",
    "Getting started",
    "Use the terminal to run `ls` and see folders. Type `help` to view available commands.",
);

const BLANK_HINTS: &[Item] = &[
    GETTING_STARTED,
    (
        "hint-2",
        "Staging",
        "`git add .` stages every changed file. `git status` shows what the next commit will record.",
    ),
];

const STARTER_HINTS: &[Item] = &[
    GETTING_STARTED,
    (
        "hint-2",
        "Editing files",
        "Select a file in the tree, edit it, and the dirty badge will reflect unsaved changes vs. baseline.",
    ),
    (
        "hint-3",
        "Graph insight",
        "Click commits in the graph to sync the details panel and timeline.",
    ),
];

const FIRST_COMMIT_HINTS: &[Item] = &[
    GETTING_STARTED,
    (
        "hint-2",
        "Reading the log",
        "`git log --oneline` prints one commit per line, newest first.",
    ),
    (
        "hint-3",
        "Resetting",
        "`git reset --hard` throws away working tree changes and empties the staging area.",
    ),
];

const FEATURE_BRANCH_HINTS: &[Item] = &[
    GETTING_STARTED,
    (
        "hint-2",
        "Branches",
        "`git switch <name>` moves HEAD; files on disk follow the branch tip.",
    ),
    (
        "hint-3",
        "Remotes",
        "A remote needs a name and a URL. `git push origin <branch>` sends the commits it is missing.",
    ),
];

/// Fresh, unticked tasks for scenario `id`.
pub fn tasks_for(scenario: &str) -> Vec<Task> {
    let entries = match scenario {
        "starter" => STARTER_TASKS,
        "first-commit" => FIRST_COMMIT_TASKS,
        "feature-branch" => FEATURE_BRANCH_TASKS,
        _ => BLANK_TASKS,
    };
    entries
        .iter()
        .map(|(id, title, detail)| Task {
            id: id.to_string(),
            title: title.to_string(),
            detail: detail.to_string(),
            done: false,
        })
        .collect()
}

pub fn hints_for(scenario: &str) -> Vec<Hint> {
    let entries = match scenario {
        "starter" => STARTER_HINTS,
        "first-commit" => FIRST_COMMIT_HINTS,
        "feature-branch" => FEATURE_BRANCH_HINTS,
        _ => BLANK_HINTS,
    };
    entries
        .iter()
        .map(|(id, title, body)| Hint {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::scenario::CATALOG;

    #[test]
    fn every_scenario_has_unique_ids() {
        for info in CATALOG {
            let tasks = tasks_for(info.id);
            let hints = hints_for(info.id);
            assert!(!tasks.is_empty() && !hints.is_empty(), "{}", info.id);
            assert!(tasks.iter().all(|task| !task.done));

            let ids: BTreeSet<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
            assert_eq!(ids.len(), tasks.len());
            let ids: BTreeSet<&str> = hints.iter().map(|hint| hint.id.as_str()).collect();
            assert_eq!(ids.len(), hints.len());
        }
    }

    #[test]
    fn starter_guide() {
        let tasks = tasks_for("starter");
        assert_eq!(tasks[0].title, "Explore the repo");
        assert_eq!(
            tasks[1].to_string(),
            "[ ] task-2 Practice file edits: Modify journal.md and note the timeline update."
        );
        let hints = hints_for("starter");
        assert_eq!(
            hints.iter().map(|hint| hint.title.as_str()).collect::<Vec<_>>(),
            vec!["Getting started", "Editing files", "Graph insight"]
        );
    }
}
