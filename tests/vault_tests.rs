//! Integration tests for the SnipVault snippet store.

use std::fs;

use snipvault::config::VaultPaths;
use snipvault::crypto::VaultKey;
use snipvault::errors::SnipVaultError;
use snipvault::vault::{Outcome, SnippetStore, DEFAULT_BUSY_TIMEOUT};
use tempfile::TempDir;

/// Helper: open a store whose database and key file live in a fresh temp dir.
fn open_store() -> (TempDir, SnippetStore) {
    let dir = TempDir::new().expect("create temp dir");
    let paths = VaultPaths::in_dir(dir.path());
    let store = SnippetStore::open_with_paths(&paths, DEFAULT_BUSY_TIMEOUT).expect("open store");
    (dir, store)
}

/// Helper: the decrypted value of `name`, or `None` when it is missing.
fn value_of(store: &SnippetStore, name: &str) -> Option<String> {
    match store.get(name).unwrap() {
        Outcome::Found { value, .. } => Some(value.as_str().to_string()),
        Outcome::NotFound { .. } => None,
        other => panic!("unexpected outcome from get: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

#[test]
fn save_then_get_returns_value() {
    let (_dir, store) = open_store();

    let outcome = store.save("github", "ghp_abc123").unwrap();
    assert_eq!(
        outcome,
        Outcome::Saved {
            name: "github".into()
        }
    );

    assert_eq!(value_of(&store, "github").as_deref(), Some("ghp_abc123"));
}

#[test]
fn many_snippets_roundtrip_independently() {
    let (_dir, store) = open_store();
    let pairs = [
        ("db", "postgres://u:p@localhost/db"),
        ("api key", "sk-12345"),
        ("émoji", "🔐"),
        ("multi", "line1\nline2"),
    ];

    for (name, value) in pairs {
        store.save(name, value).unwrap();
    }
    for (name, value) in pairs {
        assert_eq!(value_of(&store, name).as_deref(), Some(value));
    }
}

// ---------------------------------------------------------------------------
// Misses and collisions
// ---------------------------------------------------------------------------

#[test]
fn get_on_unknown_name_is_not_found_and_mutates_nothing() {
    let (_dir, store) = open_store();
    store.save("other", "x").unwrap();

    assert_eq!(
        store.get("missing").unwrap(),
        Outcome::NotFound {
            name: "missing".into()
        }
    );
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn second_save_does_not_overwrite() {
    let (_dir, store) = open_store();

    store.save("token", "v1").unwrap();
    let outcome = store.save("token", "v2").unwrap();

    assert_eq!(
        outcome,
        Outcome::AlreadyExists {
            name: "token".into()
        }
    );
    assert_eq!(value_of(&store, "token").as_deref(), Some("v1"));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn update_replaces_existing_value() {
    let (_dir, store) = open_store();
    store.save("token", "old").unwrap();

    let before = store.stored_data("token").unwrap();
    let outcome = store.update("token", "new").unwrap();

    assert_eq!(
        outcome,
        Outcome::Updated {
            name: "token".into()
        }
    );
    assert_eq!(value_of(&store, "token").as_deref(), Some("new"));
    assert_ne!(store.stored_data("token").unwrap(), before);
}

#[test]
fn update_on_unknown_name_does_not_create() {
    let (_dir, store) = open_store();

    let outcome = store.update("ghost", "value").unwrap();
    assert_eq!(
        outcome,
        Outcome::NotFound {
            name: "ghost".into()
        }
    );
    assert_eq!(value_of(&store, "ghost"), None);
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn delete_then_get_is_not_found() {
    let (_dir, store) = open_store();
    store.save("n", "v").unwrap();

    assert_eq!(
        store.delete("n").unwrap(),
        Outcome::Deleted { name: "n".into() }
    );
    assert_eq!(value_of(&store, "n"), None);
}

#[test]
fn delete_on_unknown_name_is_not_found() {
    let (_dir, store) = open_store();
    assert_eq!(
        store.delete("nope").unwrap(),
        Outcome::NotFound {
            name: "nope".into()
        }
    );
}

#[test]
fn deleted_name_can_be_saved_again() {
    let (_dir, store) = open_store();
    store.save("n", "first").unwrap();
    store.delete("n").unwrap();

    assert_eq!(
        store.save("n", "second").unwrap(),
        Outcome::Saved { name: "n".into() }
    );
    assert_eq!(value_of(&store, "n").as_deref(), Some("second"));
}

// ---------------------------------------------------------------------------
// Clear and list
// ---------------------------------------------------------------------------

#[test]
fn clear_empties_list() {
    let (_dir, store) = open_store();
    store.save("a", "1").unwrap();
    store.save("b", "2").unwrap();

    assert_eq!(store.clear_all().unwrap(), Outcome::Cleared { removed: 2 });
    assert_eq!(store.list().unwrap(), Outcome::Empty);
}

#[test]
fn clear_on_empty_store_succeeds() {
    let (_dir, store) = open_store();
    let outcome = store.clear_all().unwrap();
    assert!(outcome.is_success());
}

#[test]
fn list_returns_names_not_values() {
    let (_dir, store) = open_store();
    store.save("first", "secret-one").unwrap();
    store.save("second", "secret-two").unwrap();

    match store.list().unwrap() {
        Outcome::Listed { names } => assert_eq!(names, vec!["first", "second"]),
        other => panic!("expected Listed, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Key stability and isolation
// ---------------------------------------------------------------------------

#[test]
fn two_instances_share_key_and_database() {
    let dir = TempDir::new().unwrap();
    let paths = VaultPaths::in_dir(dir.path());

    let writer = SnippetStore::open_with_paths(&paths, DEFAULT_BUSY_TIMEOUT).unwrap();
    writer.save("shared", "from-writer").unwrap();
    drop(writer);

    let reader = SnippetStore::open_with_paths(&paths, DEFAULT_BUSY_TIMEOUT).unwrap();
    assert_eq!(value_of(&reader, "shared").as_deref(), Some("from-writer"));

    reader.save("back", "from-reader").unwrap();
    let writer_again = SnippetStore::open_with_paths(&paths, DEFAULT_BUSY_TIMEOUT).unwrap();
    assert_eq!(
        value_of(&writer_again, "back").as_deref(),
        Some("from-reader")
    );
}

#[test]
fn fresh_key_cannot_decrypt_existing_records() {
    let dir = TempDir::new().unwrap();
    let paths = VaultPaths::in_dir(dir.path());

    let original = SnippetStore::open_with_paths(&paths, DEFAULT_BUSY_TIMEOUT).unwrap();
    original.save("secret", "value").unwrap();

    let other_paths = VaultPaths {
        db_path: paths.db_path.clone(),
        key_path: dir.path().join("other.key"),
    };
    let stranger = SnippetStore::open_with_paths(&other_paths, DEFAULT_BUSY_TIMEOUT).unwrap();

    assert!(matches!(
        stranger.get("secret"),
        Err(SnipVaultError::DecryptionFailed)
    ));
    // Names are still visible; only values are protected.
    assert!(stranger.stored_data("secret").unwrap().is_some());
}

#[test]
fn corrupted_key_file_fails_per_operation() {
    let dir = TempDir::new().unwrap();
    let paths = VaultPaths::in_dir(dir.path());
    fs::write(&paths.key_path, b"garbage").unwrap();

    let store = SnippetStore::open_with_paths(&paths, DEFAULT_BUSY_TIMEOUT)
        .expect("corrupt key is accepted at load");
    assert!(matches!(
        store.save("a", "1"),
        Err(SnipVaultError::KeyFormat(_))
    ));
    // The failed save wrote nothing.
    assert_eq!(store.count().unwrap(), 0);
    assert_eq!(store.list().unwrap(), Outcome::Empty);
}

#[test]
fn unreadable_key_path_aborts_before_store_is_opened() {
    let dir = TempDir::new().unwrap();
    let key_dir = dir.path().join("key-is-a-dir");
    fs::create_dir(&key_dir).unwrap();

    let paths = VaultPaths {
        db_path: dir.path().join("snips.db"),
        key_path: key_dir,
    };

    assert!(matches!(
        SnippetStore::open_with_paths(&paths, DEFAULT_BUSY_TIMEOUT),
        Err(SnipVaultError::KeyIo { .. })
    ));
    assert!(!paths.db_path.exists());
}

// ---------------------------------------------------------------------------
// Ciphertext opacity
// ---------------------------------------------------------------------------

#[test]
fn stored_data_is_never_plaintext() {
    let (_dir, store) = open_store();
    let values = ["a", "hunter2", "password123", "  spaced  "];

    for (i, value) in values.iter().enumerate() {
        let name = format!("s{i}");
        store.save(&name, value).unwrap();
        let raw = store.stored_data(&name).unwrap().unwrap();
        assert_ne!(raw, *value);
        if value.trim().len() >= 6 {
            assert!(!raw.contains(value.trim()));
        }
    }
}

#[test]
fn database_file_does_not_contain_plaintext() {
    let dir = TempDir::new().unwrap();
    let paths = VaultPaths::in_dir(dir.path());
    let marker = "PLAINTEXT-MARKER-7f3a9c";

    {
        let store = SnippetStore::open_with_paths(&paths, DEFAULT_BUSY_TIMEOUT).unwrap();
        store.save("marker", marker).unwrap();
    }

    let bytes = fs::read(&paths.db_path).unwrap();
    let haystack = String::from_utf8_lossy(&bytes);
    assert!(!haystack.contains(marker));
}

#[test]
fn explicit_key_open_matches_key_file_open() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("snips.db");
    let key = VaultKey::generate();

    let a = SnippetStore::open(&db, key.clone()).unwrap();
    a.save("k", "v").unwrap();

    let b = SnippetStore::open(&db, key).unwrap();
    assert_eq!(value_of(&b, "k").as_deref(), Some("v"));
}

#[test]
fn database_under_a_regular_file_is_a_store_io_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("file.txt"), b"occupied").unwrap();

    let paths = VaultPaths {
        db_path: dir.path().join("file.txt").join("sub").join("snips.db"),
        key_path: dir.path().join("key"),
    };
    let result = SnippetStore::open_with_paths(&paths, DEFAULT_BUSY_TIMEOUT);
    assert!(matches!(result, Err(SnipVaultError::StoreIo { .. })));
}
