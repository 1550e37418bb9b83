//! Built-in practice scenarios.
//!
//! Each scenario is built by replaying ordinary engine operations on a
//! throwaway engine, so every scenario state is one a user could reach.

use std::fmt;

use sprout_tree::{path, EntryKind, EntryTree};

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};
use crate::guide;
use crate::state::EngineState;

/// Name of the root directory in every scenario.
pub const ROOT_NAME: &str = "git-playground";

const STARTER_FILES: &[(&str, &str)] = &[
    (
        "/README.md",
        "# Git Practice Playground\n\nStart by exploring tasks in the left panel.",
    ),
    (
        "/src/main.ts",
        "export function greet(name: string) {\n  return `Hello, ${name}! Welcome to the Git lab.`;\n}",
    ),
    ("/notes/journal.md", "- [ ] Record what you learned today.\n"),
];

const GRAPH_HELPER: &str = "\n\nexport function graph(commits: string[]) {\n  return commits.join(\" <- \");\n}";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Intro,
    Beginner,
    Intermediate,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Intro => "intro",
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
        };
        write!(f, "{s}")
    }
}

/// Catalog entry describing a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScenarioInfo {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub difficulty: Difficulty,
}

pub const CATALOG: &[ScenarioInfo] = &[
    ScenarioInfo {
        id: "blank",
        title: "Blank slate",
        summary: "An empty folder with no repository.",
        difficulty: Difficulty::Intro,
    },
    ScenarioInfo {
        id: "starter",
        title: "Starter project",
        summary: "A few files and no repository yet. Run git init.",
        difficulty: Difficulty::Intro,
    },
    ScenarioInfo {
        id: "first-commit",
        title: "First commit",
        summary: "The starter project with one commit on main.",
        difficulty: Difficulty::Beginner,
    },
    ScenarioInfo {
        id: "feature-branch",
        title: "Feature branch",
        summary: "A feature/graph branch one commit ahead of main.",
        difficulty: Difficulty::Intermediate,
    },
];

pub fn find(id: &str) -> Option<&'static ScenarioInfo> {
    CATALOG.iter().find(|info| info.id == id)
}

/// Build the state of scenario `id`.
pub fn build(id: &str, config: &EngineConfig) -> EngineResult<EngineState> {
    let info = find(id).ok_or_else(|| EngineError::UnknownScenario(id.to_string()))?;
    let mut state = match info.id {
        "blank" => EngineState::new(EntryTree::new(ROOT_NAME), info.id),
        "starter" => EngineState::new(starter_tree()?, info.id),
        "first-commit" => first_commit(config)?.into_state(),
        _ => feature_branch(config)?.into_state(),
    };
    state.scenario = info.id.to_string();
    state.tasks = guide::tasks_for(info.id);
    state.hints = guide::hints_for(info.id);
    state.active_hint = None;
    Ok(state)
}

fn starter_tree() -> EngineResult<EntryTree> {
    let mut tree = EntryTree::new(ROOT_NAME);
    for (file, content) in STARTER_FILES {
        let parent = tree.ensure_directory(path::parent(file))?;
        let id = tree.create_entry(&parent, path::file_name(file), EntryKind::File)?;
        tree.update_file_content(&id, *content)?;
    }
    Ok(tree)
}

fn first_commit(config: &EngineConfig) -> EngineResult<Engine> {
    let state = EngineState::new(starter_tree()?, "first-commit");
    let mut engine = Engine::with_state(config.clone(), state);
    engine.initialize_repo()?;
    engine.stage_all_dirty()?;
    engine.commit_changes("Initial commit")?;
    Ok(engine)
}

fn feature_branch(config: &EngineConfig) -> EngineResult<Engine> {
    let mut engine = first_commit(config)?;
    engine.switch_branch("feature/graph", true)?;
    let main_ts = engine
        .get_entry_by_path("/src/main.ts")
        .and_then(|entry| entry.as_file())
        .map(|file| (file.id.clone(), format!("{}{GRAPH_HELPER}", file.content)))
        .ok_or_else(|| EngineError::EntryNotFound("/src/main.ts".to_string()))?;
    engine.update_file_content(&main_ts.0, main_ts.1)?;
    engine.stage_entry_ids(&[main_ts.0])?;
    engine.commit_changes("Add graph helper")?;
    engine.checkout_branch(&config.default_branch)?;
    Ok(engine)
}
