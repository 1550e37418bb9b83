//! Branch and remote name validation following git-style conventions.
//!
//! Branch names must be non-empty and must not:
//! - contain whitespace, control characters, `~`, `^`, `:`, `?`, `*`, `[`, `\`
//! - contain `..` or `@{`, or be exactly `@` or `HEAD`
//! - start or end with `/`, end with `.` or `.lock`
//! - have an empty path component or one starting with `.`
//!
//! Remote names follow the same character rules and may not contain `/`.

use crate::error::{RefError, Result};

/// Characters that are forbidden anywhere in a name.
const FORBIDDEN_CHARS: &[char] = &['~', '^', ':', '?', '*', '[', '\\'];

fn invalid(name: &str, reason: impl Into<String>) -> RefError {
    RefError::InvalidName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn check_characters(name: &str) -> Result<()> {
    if let Some(ch) = name
        .chars()
        .find(|ch| ch.is_whitespace() || ch.is_control() || FORBIDDEN_CHARS.contains(ch))
    {
        return Err(invalid(name, format!("contains forbidden character {ch:?}")));
    }
    Ok(())
}

/// Validate a branch name.
///
/// # Examples
///
/// ```
/// use sprout_refs::names::validate_branch_name;
///
/// assert!(validate_branch_name("main").is_ok());
/// assert!(validate_branch_name("feature/graph").is_ok());
/// assert!(validate_branch_name("").is_err());
/// assert!(validate_branch_name("bad..name").is_err());
/// ```
pub fn validate_branch_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(name, "name must not be empty"));
    }
    if name == "HEAD" || name == "@" {
        return Err(invalid(name, "name is reserved"));
    }
    check_characters(name)?;

    if name.contains("..") {
        return Err(invalid(name, "must not contain '..'"));
    }
    if name.contains("@{") {
        return Err(invalid(name, "must not contain '@{'"));
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Err(invalid(name, "must not start or end with '/'"));
    }
    if name.ends_with('.') || name.ends_with(".lock") {
        return Err(invalid(name, "must not end with '.' or '.lock'"));
    }
    for component in name.split('/') {
        if component.is_empty() {
            return Err(invalid(name, "path components must not be empty"));
        }
        if component.starts_with('.') {
            return Err(invalid(
                name,
                format!("component must not start with '.': {component:?}"),
            ));
        }
    }
    Ok(())
}

/// Validate a remote name. Must be a single component (no slashes).
pub fn validate_remote_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(name, "remote name must not be empty"));
    }
    if name.contains('/') {
        return Err(invalid(name, "remote name must not contain '/'"));
    }
    if name.starts_with('.') || name.contains("..") {
        return Err(invalid(name, "remote name must not start with '.' or contain '..'"));
    }
    check_characters(name)
}
