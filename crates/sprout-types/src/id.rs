use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Number of hex characters in a generated commit id.
pub const COMMIT_ID_LEN: usize = 7;

/// Number of characters in a generated entry id.
pub const ENTRY_ID_LEN: usize = 8;

/// Identifier of a node in the working tree.
///
/// Entry ids are opaque and stable for the lifetime of the entry: renames and
/// moves change the entry's path, never its id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Id reserved for the root directory.
    pub const ROOT: &'static str = "root";

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(random_hex(ENTRY_ID_LEN))
    }

    /// The root directory's id.
    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    /// Wrap an existing id string.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse a user-supplied id, rejecting blanks and whitespace.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidEntryId(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a commit.
///
/// Commit ids are generated, not derived from content: two commits with
/// identical trees still get distinct ids.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    /// Generate a random id.
    pub fn generate() -> Self {
        Self(random_hex(COMMIT_ID_LEN))
    }

    /// Generate a random id that `taken` does not claim.
    pub fn generate_unless(taken: impl Fn(&CommitId) -> bool) -> Self {
        loop {
            let candidate = Self::generate();
            if !taken(&candidate) {
                return candidate;
            }
        }
    }

    /// Wrap an existing id string without validation.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse a user-supplied commit id (non-empty, ASCII hex).
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidCommitId(raw.to_string()));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitId({})", self.0)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn random_hex(len: usize) -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    simple[..len].to_string()
}
