//! Revision expressions.
//!
//! Supported forms:
//! - `HEAD`, or its alias `@`
//! - a branch name: `main`, `feature/graph`
//! - a remote-tracking ref: `origin/main`
//! - a commit id, full or abbreviated to at least four hex characters
//! - parent notation: `<rev>^`
//! - ancestor notation: `<rev>~<n>` (`<rev>~` means `<rev>~1`)
//!
//! Names are tried as refs first and as commit ids only when no ref
//! matches, the same precedence git uses.

use sprout_dag::CommitGraph;
use sprout_types::CommitId;

use crate::error::{RefError, Result};
use crate::refdb::RefDb;

/// Minimum length of an abbreviated commit id.
pub const MIN_ABBREV_LEN: usize = 4;

/// A parsed revision expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Revision {
    /// `HEAD` or `@`.
    Head,
    /// A branch, tracking ref, or commit id, resolved in that order.
    Name(String),
    /// The first parent of a revision.
    Parent(Box<Revision>),
    /// The nth first-parent ancestor of a revision.
    Ancestor(Box<Revision>, usize),
}

impl Revision {
    /// Parse a revision expression.
    pub fn parse(raw: &str) -> Result<Revision> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(RefError::InvalidRevision(raw.to_string()));
        }
        if let Some(base) = raw.strip_suffix('^') {
            return Ok(Revision::Parent(Box::new(Self::parse(base)?)));
        }
        if let Some((base, count)) = raw.rsplit_once('~') {
            let generations = if count.is_empty() {
                1
            } else {
                count
                    .parse::<usize>()
                    .map_err(|_| RefError::InvalidRevision(raw.to_string()))?
            };
            return Ok(Revision::Ancestor(Box::new(Self::parse(base)?), generations));
        }
        match raw {
            "HEAD" | "@" => Ok(Revision::Head),
            name => Ok(Revision::Name(name.to_string())),
        }
    }

    /// Resolve to a commit id against the given refs and history.
    pub fn resolve(&self, refs: &RefDb, graph: &CommitGraph) -> Result<CommitId> {
        match self {
            Revision::Head => refs.head_commit().ok_or_else(|| RefError::NotFound {
                name: "HEAD".to_string(),
            }),
            Revision::Name(name) => resolve_name(name, refs, graph),
            Revision::Parent(base) => step_back(base.resolve(refs, graph)?, 1, graph),
            Revision::Ancestor(base, generations) => {
                step_back(base.resolve(refs, graph)?, *generations, graph)
            }
        }
    }
}

fn resolve_name(name: &str, refs: &RefDb, graph: &CommitGraph) -> Result<CommitId> {
    if let Some(target) = refs.branch(name) {
        return target.cloned().ok_or_else(|| RefError::NotFound {
            name: name.to_string(),
        });
    }
    if let Some(tracking) = refs.tracking_ref(name) {
        return Ok(tracking.commit.clone());
    }
    resolve_commit_id(name, graph)
}

fn resolve_commit_id(raw: &str, graph: &CommitGraph) -> Result<CommitId> {
    let not_found = || RefError::NotFound {
        name: raw.to_string(),
    };
    let id = CommitId::parse(raw).map_err(|_| not_found())?;
    if graph.contains(&id) {
        return Ok(id);
    }
    if raw.len() < MIN_ABBREV_LEN {
        return Err(not_found());
    }
    let mut matches = graph
        .ids()
        .iter()
        .filter(|candidate| candidate.as_str().starts_with(id.as_str()));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Ok(only.clone()),
        (Some(_), Some(_)) => Err(RefError::AmbiguousRevision {
            prefix: raw.to_string(),
        }),
        (None, _) => Err(not_found()),
    }
}

fn step_back(id: CommitId, generations: usize, graph: &CommitGraph) -> Result<CommitId> {
    graph
        .ancestor(&id, generations)
        .map(|commit| commit.id.clone())
        .map_err(|_| RefError::NotFound {
            name: format!("{id}~{generations}"),
        })
}
