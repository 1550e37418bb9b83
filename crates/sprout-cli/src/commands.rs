use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use colored::Colorize;
use serde_json::json;

use sprout_engine::{CommandOutput, Engine, EngineConfig, Head, CATALOG};

use crate::cli::{Cli, Command, OutputFormat};
use crate::session::{self, Session};

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = build_config(&cli)?;
    let Cli {
        command,
        state,
        format,
        ..
    } = cli;
    match command.unwrap_or(Command::Repl) {
        Command::Repl => cmd_repl(config, state, format),
        Command::Run(args) => cmd_run(config, state, format, args.words),
        Command::Scenarios => cmd_scenarios(&config, format),
    }
}

/// Defaults, then the config file, then command-line overrides.
fn build_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => session::load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(author) = &cli.author {
        config = config.with_author(author.clone());
    }
    if let Some(scenario) = &cli.scenario {
        config = config.with_scenario(scenario.clone());
    }
    Ok(config)
}

fn cmd_repl(
    config: EngineConfig,
    state: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let mut session = Session::open(config, state)?;
    println!(
        "{} {}",
        "sprout".green().bold(),
        "git playground. Type help for commands, exit to quit.".dimmed()
    );

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{} ", prompt(session.engine()));
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed, "exit" | "quit") {
            break;
        }
        let output = session.execute(trimmed)?;
        print_output(&output, format)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_run(
    config: EngineConfig,
    state: Option<PathBuf>,
    format: OutputFormat,
    words: Vec<String>,
) -> anyhow::Result<ExitCode> {
    let mut session = Session::open(config, state)?;
    // A single word is a whole command line quoted by the caller's shell.
    let output = match words.as_slice() {
        [line] => session.execute(line)?,
        _ => session.execute_args(&words)?,
    };
    print_output(&output, format)?;
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_scenarios(config: &EngineConfig, format: OutputFormat) -> anyhow::Result<ExitCode> {
    match format {
        OutputFormat::Json => {
            let list: Vec<_> = CATALOG
                .iter()
                .map(|info| {
                    json!({
                        "id": info.id,
                        "title": info.title,
                        "summary": info.summary,
                        "difficulty": info.difficulty.to_string(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        OutputFormat::Text => {
            for info in CATALOG {
                let marker = if info.id == config.starting_scenario {
                    "*".green().bold()
                } else {
                    " ".normal()
                };
                println!(
                    "{marker} {:<15} {} {}",
                    info.id.yellow(),
                    info.title.bold(),
                    format!("[{}]", info.difficulty).dimmed()
                );
                println!("  {:<15} {}", "", info.summary);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn prompt(engine: &Engine) -> String {
    let location = match engine.repository().map(|repo| repo.refs.head()) {
        None => String::new(),
        Some(Head::Attached(branch)) => format!(" ({branch})"),
        Some(Head::Detached(id)) => format!(" ({id})"),
    };
    format!(
        "{}{}{}",
        engine.tree().root_name().blue().bold(),
        location.yellow(),
        " $".bold()
    )
}

fn print_output(output: &CommandOutput, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(output)?),
        OutputFormat::Text => {
            for (line, tone) in output.output.iter().zip(tones(output)) {
                println!("{}", paint(line, tone));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------
// Output colouring
// ---------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Plain,
    Good,
    Bad,
    Accent,
}

/// Pick a tone per line the way git colours its output: staged entries
/// green, unstaged and untracked entries red, commit headers yellow.
fn tones(output: &CommandOutput) -> Vec<Tone> {
    if !output.success {
        return vec![Tone::Bad; output.output.len()];
    }
    let mut section = Tone::Plain;
    output
        .output
        .iter()
        .map(|line| {
            match line.as_str() {
                "Changes to be committed:" => section = Tone::Good,
                "Changes not staged for commit:" | "Untracked files:" => section = Tone::Bad,
                "" => section = Tone::Plain,
                _ => {}
            }
            if line.starts_with("        ") {
                section
            } else if line.starts_with("commit ") || line.starts_with("* ") {
                Tone::Accent
            } else {
                Tone::Plain
            }
        })
        .collect()
}

fn paint(line: &str, tone: Tone) -> String {
    match tone {
        Tone::Plain => line.to_string(),
        Tone::Good => line.green().to_string(),
        Tone::Bad => line.red().to_string(),
        Tone::Accent => line.yellow().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn status_sections_are_coloured_like_git() {
        let output = CommandOutput::ok(lines(&[
            "HEAD -> main",
            "",
            "Changes to be committed:",
            "  (use \"git reset HEAD <file>...\" to unstage)",
            "        new file:  /a.txt",
            "",
            "Untracked files:",
            "  (use \"git add <file>...\" to include in what will be committed)",
            "        /b.txt",
            "",
        ]));
        assert_eq!(
            tones(&output),
            vec![
                Tone::Plain,
                Tone::Plain,
                Tone::Plain,
                Tone::Plain,
                Tone::Good,
                Tone::Plain,
                Tone::Plain,
                Tone::Plain,
                Tone::Bad,
                Tone::Plain,
            ]
        );
    }

    #[test]
    fn failures_are_all_bad() {
        let output = CommandOutput::fail(lines(&["fatal: nope"]));
        assert_eq!(tones(&output), vec![Tone::Bad]);
    }

    #[test]
    fn log_headers_and_current_branch_are_accented() {
        let output = CommandOutput::ok(lines(&["commit abc1234", "Author: you", "* main (abc1234)"]));
        assert_eq!(tones(&output), vec![Tone::Accent, Tone::Plain, Tone::Accent]);
    }

    #[test]
    fn flags_override_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprout.toml");
        std::fs::write(&path, "author = \"file\"\nstarting_scenario = \"blank\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "sprout",
            "--config",
            path.to_str().unwrap(),
            "--author",
            "flag",
        ])
        .unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.author, "flag");
        assert_eq!(config.starting_scenario, "blank");
    }
}
