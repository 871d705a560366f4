use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SnipVaultError};

/// Default database file name, placed in the home directory.
pub const DEFAULT_DB_FILE: &str = "snip_vault.db";

/// Default key file name, placed in the home directory.
pub const DEFAULT_KEY_FILE: &str = ".secure_snippet_key";

/// User-level configuration, loaded from `~/.snipvault.toml`.
///
/// Every field has a sensible default so SnipVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Database path (`~/` is expanded).  Defaults to `~/snip_vault.db`.
    #[serde(default)]
    pub db_path: Option<String>,

    /// Key file path (`~/` is expanded).  Defaults to `~/.secure_snippet_key`.
    #[serde(default)]
    pub key_path: Option<String>,

    /// How long to wait on a locked database, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

/// Where the database and key file live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultPaths {
    pub db_path: PathBuf,
    pub key_path: PathBuf,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_busy_timeout_ms() -> u64 {
    5_000
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: None,
            key_path: None,
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the home directory.
    pub const FILE_NAME: &'static str = ".snipvault.toml";

    /// Load settings from `<home>/.snipvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = home.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            SnipVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Resolve the final paths.  Explicit overrides win over the config
    /// file, which wins over the defaults in `home`.
    pub fn resolve(
        &self,
        home: &Path,
        db_override: Option<&Path>,
        key_override: Option<&Path>,
    ) -> VaultPaths {
        let defaults = VaultPaths::in_dir(home);

        let db_path = match (db_override, &self.db_path) {
            (Some(p), _) => p.to_path_buf(),
            (None, Some(raw)) => expand_home(raw, home),
            (None, None) => defaults.db_path,
        };

        let key_path = match (key_override, &self.key_path) {
            (Some(p), _) => p.to_path_buf(),
            (None, Some(raw)) => expand_home(raw, home),
            (None, None) => defaults.key_path,
        };

        VaultPaths { db_path, key_path }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl VaultPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DEFAULT_DB_FILE),
            key_path: dir.join(DEFAULT_KEY_FILE),
        }
    }

    /// Default locations under the user's home directory.
    pub fn defaults() -> Result<Self> {
        Ok(Self::in_dir(&home_dir()?))
    }
}

/// The current user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| SnipVaultError::Config("could not determine home directory".into()))
}

/// Expand a leading `~` or `~/` against `home`.
fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        home.to_path_buf()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(raw)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
