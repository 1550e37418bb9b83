//! Engine construction from config and state files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use sprout_engine::{run_line_args, CommandOutput, Engine, EngineConfig, EngineState};

use crate::tokenize::tokenize;

/// Read an [`EngineConfig`] from TOML. Missing keys take their defaults.
pub fn load_config(path: &Path) -> anyhow::Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
}

pub fn load_state(path: &Path) -> anyhow::Result<EngineState> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid state file {}", path.display()))
}

pub fn save_state(path: &Path, state: &EngineState) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json).with_context(|| format!("failed to write state file {}", path.display()))
}

/// One engine plus the file its state is persisted to.
pub struct Session {
    engine: Engine,
    state_path: Option<PathBuf>,
}

impl Session {
    /// Resume from `state_path` when that file exists, otherwise start the
    /// configured scenario.
    pub fn open(config: EngineConfig, state_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let engine = match state_path.as_deref() {
            Some(path) if path.exists() => {
                let state = load_state(path)?;
                info!(path = %path.display(), scenario = %state.scenario, "resumed session");
                Engine::with_state(config, state)
            }
            _ => {
                let scenario = config.starting_scenario.clone();
                let engine = Engine::new(config)
                    .with_context(|| format!("failed to start scenario {scenario}"))?;
                debug!(scenario = %scenario, "new session");
                engine
            }
        };
        Ok(Self { engine, state_path })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Tokenize and run one line, then persist the state.
    pub fn execute(&mut self, line: &str) -> anyhow::Result<CommandOutput> {
        self.execute_args(&tokenize(line))
    }

    pub fn execute_args(&mut self, args: &[String]) -> anyhow::Result<CommandOutput> {
        let output = run_line_args(&mut self.engine, args);
        self.save()?;
        Ok(output)
    }

    fn save(&self) -> anyhow::Result<()> {
        match &self.state_path {
            Some(path) => save_state(path, self.engine.state()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn starter() -> EngineConfig {
        EngineConfig::default().with_scenario("starter")
    }

    #[test]
    fn config_file_fills_missing_keys_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "author = \"sam\"\nlog_limit = 3").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.author, "sam");
        assert_eq!(config.log_limit, 3);
        assert_eq!(config.default_branch, "main");
        assert_eq!(config.starting_scenario, "starter");
    }

    #[test]
    fn bad_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_limit = \"many\"").unwrap();
        assert!(load_config(file.path()).is_err());
        assert!(load_config(Path::new("/definitely/not/here.toml")).is_err());
    }

    #[test]
    fn state_survives_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = Session::open(starter(), Some(path.clone())).unwrap();
        assert!(session.execute("git init").unwrap().success);
        assert!(session.execute("git add .").unwrap().success);
        assert!(session.execute(r#"git commit -m "saved work""#).unwrap().success);
        let head = session.engine().head_commit();
        assert!(path.exists());

        let resumed = Session::open(starter(), Some(path)).unwrap();
        assert_eq!(resumed.engine().head_commit(), head);
        assert_eq!(resumed.engine().state(), session.engine().state());
    }

    #[test]
    fn without_a_state_file_nothing_is_written() {
        let mut session = Session::open(starter(), None).unwrap();
        let output = session.execute("git status").unwrap();
        assert!(!output.success);
        assert!(session.state_path.is_none());
    }
}
