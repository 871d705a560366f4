//! Structured results of store operations.
//!
//! The store never prints anything.  Each call hands back an `Outcome`,
//! and a front-end turns it into whatever presentation it needs via
//! `Outcome::notices`.

use zeroize::Zeroizing;

use crate::errors::SnipVaultError;

/// What a store operation did.
///
/// "Already exists", "not found", and "empty" are ordinary outcomes, not
/// errors.
#[derive(Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `save` inserted a new snippet.
    Saved { name: String },
    /// `save` found an existing snippet and left it untouched.
    AlreadyExists { name: String },
    /// `get` decrypted the snippet's value.
    Found {
        name: String,
        value: Zeroizing<String>,
    },
    /// `update` replaced the snippet's value.
    Updated { name: String },
    /// `delete` removed the snippet.
    Deleted { name: String },
    /// `get`, `update`, or `delete` found no snippet with this name.
    NotFound { name: String },
    /// `clear_all` ran; `removed` may be zero.
    Cleared { removed: usize },
    /// `list` returned at least one name.
    Listed { names: Vec<String> },
    /// `list` found no snippets.
    Empty,
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// A human-readable notification for the front-end to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    /// Error-level notice for an infrastructure failure.
    pub fn from_error(err: &SnipVaultError) -> Self {
        Self {
            level: Level::Error,
            message: err.to_string(),
        }
    }
}

impl Outcome {
    /// Notifications describing this outcome.
    ///
    /// `Found` yields none: the value itself is the payload, and it is never
    /// copied into a message.
    pub fn notices(&self) -> Vec<Notice> {
        match self {
            Outcome::Saved { name } => vec![Notice::info(format!("Stored snippet '{name}'"))],
            Outcome::AlreadyExists { name } => vec![Notice::warning(format!(
                "Snippet '{name}' already exists (use `update` to change it)"
            ))],
            Outcome::Found { .. } => Vec::new(),
            Outcome::Updated { name } => vec![Notice::info(format!("Updated snippet '{name}'"))],
            Outcome::Deleted { name } => vec![Notice::info(format!("Deleted snippet '{name}'"))],
            Outcome::NotFound { name } => {
                vec![Notice::warning(format!("Snippet '{name}' not found"))]
            }
            Outcome::Cleared { removed: 0 } => vec![Notice::info("No snippets to delete")],
            Outcome::Cleared { removed } => {
                vec![Notice::info(format!("Deleted all snippets ({removed} removed)"))]
            }
            Outcome::Listed { names } => {
                vec![Notice::info(format!("{} snippet(s) stored", names.len()))]
            }
            Outcome::Empty => vec![Notice::warning("No snippets found")],
        }
    }

    /// `true` when the operation changed or returned what was asked for.
    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            Outcome::AlreadyExists { .. } | Outcome::NotFound { .. } | Outcome::Empty
        )
    }
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Saved { name } => f.debug_struct("Saved").field("name", name).finish(),
            Outcome::AlreadyExists { name } => {
                f.debug_struct("AlreadyExists").field("name", name).finish()
            }
            Outcome::Found { name, .. } => f
                .debug_struct("Found")
                .field("name", name)
                .field("value", &"[REDACTED]")
                .finish(),
            Outcome::Updated { name } => f.debug_struct("Updated").field("name", name).finish(),
            Outcome::Deleted { name } => f.debug_struct("Deleted").field("name", name).finish(),
            Outcome::NotFound { name } => f.debug_struct("NotFound").field("name", name).finish(),
            Outcome::Cleared { removed } => {
                f.debug_struct("Cleared").field("removed", removed).finish()
            }
            Outcome::Listed { names } => f.debug_struct("Listed").field("names", names).finish(),
            Outcome::Empty => f.write_str("Empty"),
        }
    }
}
