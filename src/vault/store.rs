//! SQLite-backed snippet store.
//!
//! `SnippetStore` maps snippet names to encrypted values in a single
//! `snippets` table.  Values are sealed with the vault key before they are
//! written and opened after they are read; plaintext never reaches disk.
//!
//! Every operation opens its own connection, runs one statement (writes
//! inside an IMMEDIATE transaction that is committed before returning),
//! and drops the connection on the way out, whether it succeeded or not.
//! Cross-process safety is left to SQLite's own locking.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use tracing::debug;
use zeroize::Zeroizing;

use super::outcome::Outcome;
use crate::config::VaultPaths;
use crate::crypto::encryption::{open, seal};
use crate::crypto::keyfile::load_or_create_key;
use crate::crypto::VaultKey;
use crate::errors::{Result, SnipVaultError};

/// How long an operation waits on another process's lock by default.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS snippets (
    id   INTEGER PRIMARY KEY,
    name TEXT UNIQUE NOT NULL,
    data TEXT NOT NULL
);";

/// Handle to a snippet database and the key that protects it.
///
/// The key is loaded once and never modified afterwards.
#[derive(Debug)]
pub struct SnippetStore {
    db_path: PathBuf,
    key: VaultKey,
    busy_timeout: Duration,
}

impl SnippetStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open (or create) the database at `db_path`, protected by `key`,
    /// waiting up to [`DEFAULT_BUSY_TIMEOUT`] on a locked database.
    pub fn open(db_path: &Path, key: VaultKey) -> Result<Self> {
        Self::open_with_timeout(db_path, key, DEFAULT_BUSY_TIMEOUT)
    }

    /// Open (or create) the database at `db_path`, protected by `key`.
    ///
    /// Creates parent directories and the `snippets` table if needed.
    /// `busy_timeout` applies to every connection, including the one that
    /// creates the schema here.
    pub fn open_with_timeout(
        db_path: &Path,
        key: VaultKey,
        busy_timeout: Duration,
    ) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SnipVaultError::store_io(db_path, e))?;
            }
        }

        let store = Self {
            db_path: db_path.to_path_buf(),
            key,
            busy_timeout,
        };

        let conn = store.connect()?;
        conn.execute_batch(SCHEMA)?;
        drop(conn);

        // Owner-only access to the database file.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&store.db_path, perms)
                .map_err(|e| SnipVaultError::store_io(&store.db_path, e))?;
        }

        debug!(db = %store.db_path.display(), "snippet store opened");
        Ok(store)
    }

    /// Load (or generate) the key file, then open the database.
    ///
    /// A key file that cannot be read or created fails here, before the
    /// database is touched.
    pub fn open_with_paths(paths: &VaultPaths, busy_timeout: Duration) -> Result<Self> {
        let key = load_or_create_key(&paths.key_path)?;
        Self::open_with_timeout(&paths.db_path, key, busy_timeout)
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    // ------------------------------------------------------------------
    // Snippet operations
    // ------------------------------------------------------------------

    /// Store a new snippet.  An existing snippet with the same name is left
    /// untouched and `AlreadyExists` is returned.
    pub fn save(&self, name: &str, value: &str) -> Result<Outcome> {
        let data = seal(&self.key, value)?;

        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let inserted = tx.execute(
            "INSERT INTO snippets (name, data) VALUES (?1, ?2)
             ON CONFLICT(name) DO NOTHING",
            params![name, data],
        )?;

        if inserted == 0 {
            debug!(name = %name, "save skipped, snippet already exists");
            return Ok(Outcome::AlreadyExists {
                name: name.to_string(),
            });
        }

        tx.commit()?;
        debug!(name = %name, "snippet stored");
        Ok(Outcome::Saved {
            name: name.to_string(),
        })
    }

    /// Decrypt and return a snippet's value.
    pub fn get(&self, name: &str) -> Result<Outcome> {
        let Some(data) = self.stored_data(name)? else {
            return Ok(Outcome::NotFound {
                name: name.to_string(),
            });
        };

        let value: Zeroizing<String> = open(&self.key, &data)?;
        debug!(name = %name, "snippet decrypted");
        Ok(Outcome::Found {
            name: name.to_string(),
            value,
        })
    }

    /// Replace the value of an existing snippet.  Never creates one.
    pub fn update(&self, name: &str, value: &str) -> Result<Outcome> {
        let data = seal(&self.key, value)?;

        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE snippets SET data = ?1 WHERE name = ?2",
            params![data, name],
        )?;

        if changed == 0 {
            return Ok(Outcome::NotFound {
                name: name.to_string(),
            });
        }

        tx.commit()?;
        debug!(name = %name, "snippet updated");
        Ok(Outcome::Updated {
            name: name.to_string(),
        })
    }

    /// Remove a snippet.
    pub fn delete(&self, name: &str) -> Result<Outcome> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = tx.execute("DELETE FROM snippets WHERE name = ?1", params![name])?;

        if removed == 0 {
            return Ok(Outcome::NotFound {
                name: name.to_string(),
            });
        }

        tx.commit()?;
        debug!(name = %name, "snippet deleted");
        Ok(Outcome::Deleted {
            name: name.to_string(),
        })
    }

    /// Remove every snippet.  Succeeds on an empty store too.
    pub fn clear_all(&self) -> Result<Outcome> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = tx.execute("DELETE FROM snippets", [])?;
        tx.commit()?;

        debug!(removed, "all snippets deleted");
        Ok(Outcome::Cleared { removed })
    }

    /// All snippet names in insertion order.  Values are not decrypted.
    pub fn list(&self) -> Result<Outcome> {
        let names = self.names()?;
        if names.is_empty() {
            Ok(Outcome::Empty)
        } else {
            Ok(Outcome::Listed { names })
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The raw `data` column for `name`, exactly as stored (ciphertext).
    pub fn stored_data(&self, name: &str) -> Result<Option<String>> {
        let conn = self.connect()?;
        let data = conn
            .query_row(
                "SELECT data FROM snippets WHERE name = ?1",
                params![name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(data)
    }

    /// Number of stored snippets.
    pub fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM snippets", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn names(&self) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT name FROM snippets ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, SnippetStore) {
        let dir = TempDir::new().unwrap();
        let store = SnippetStore::open(&dir.path().join("snips.db"), VaultKey::generate()).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_database_file() {
        let (dir, store) = store();
        assert!(dir.path().join("snips.db").exists());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn open_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("snips.db");
        SnippetStore::open(&path, VaultKey::generate()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn reopening_keeps_existing_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snips.db");
        let key = VaultKey::generate();

        let first = SnippetStore::open(&path, key.clone()).unwrap();
        first.save("a", "1").unwrap();

        let second = SnippetStore::open(&path, key).unwrap();
        assert_eq!(second.count().unwrap(), 1);
    }

    #[test]
    fn stored_data_reflects_save_and_delete() {
        let (_dir, store) = store();
        assert!(store.stored_data("x").unwrap().is_none());
        store.save("x", "1").unwrap();
        assert!(store.stored_data("x").unwrap().is_some());
        store.delete("x").unwrap();
        assert!(store.stored_data("x").unwrap().is_none());
    }

    #[test]
    fn busy_timeout_applies_while_creating_the_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snips.db");

        // Another process holds an exclusive lock on a fresh database.
        let locker = Connection::open(&path).unwrap();
        locker
            .execute_batch("CREATE TABLE other (x INTEGER); BEGIN EXCLUSIVE;")
            .unwrap();

        let started = std::time::Instant::now();
        let result =
            SnippetStore::open_with_timeout(&path, VaultKey::generate(), Duration::from_millis(100));

        assert!(matches!(result, Err(SnipVaultError::Store(_))));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn unusable_parent_directory_is_a_store_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file.txt");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let path = blocker.join("sub").join("snips.db");
        let result = SnippetStore::open(&path, VaultKey::generate());

        match result {
            Err(SnipVaultError::StoreIo { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected StoreIo, got {other:?}"),
        }
    }

    #[test]
    fn list_is_in_insertion_order() {
        let (_dir, store) = store();
        store.save("zeta", "1").unwrap();
        store.save("alpha", "2").unwrap();
        store.save("mid", "3").unwrap();

        assert_eq!(
            store.list().unwrap(),
            Outcome::Listed {
                names: vec!["zeta".into(), "alpha".into(), "mid".into()]
            }
        );
    }

    #[test]
    fn clear_reports_removed_count() {
        let (_dir, store) = store();
        store.save("a", "1").unwrap();
        store.save("b", "2").unwrap();
        assert_eq!(store.clear_all().unwrap(), Outcome::Cleared { removed: 2 });
        assert_eq!(store.clear_all().unwrap(), Outcome::Cleared { removed: 0 });
    }

    #[cfg(unix)]
    #[test]
    fn database_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, _store) = store();
        let perms = std::fs::metadata(dir.path().join("snips.db"))
            .unwrap()
            .permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }
}
