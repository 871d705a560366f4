//! Key file lifecycle: generate once, persist, reuse forever.
//!
//! The key file holds the base64 encoding of a 32-byte AES-256 key and
//! nothing else.  It is created on first use and never rotated or removed
//! by SnipVault.  Losing it makes every stored snippet unrecoverable.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::key::VaultKey;
use crate::errors::{Result, SnipVaultError};

/// Load the key at `path`, generating and persisting a new one if the
/// file does not exist yet.
///
/// An existing file is returned byte-for-byte; its contents are only
/// checked when the key is first used for encryption or decryption.
///
/// When several callers create the key at the same time, exactly one
/// file is published and every caller returns that file's key.
pub fn load_or_create_key(path: &Path) -> Result<VaultKey> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Err(SnipVaultError::key_io(
            path,
            std::io::Error::new(ErrorKind::Other, "path is a directory"),
        )),
        Ok(_) => load_key(path),
        Err(e) if e.kind() == ErrorKind::NotFound => create_key(path),
        Err(e) => Err(SnipVaultError::key_io(path, e)),
    }
}

/// Read an existing key file.
pub fn load_key(path: &Path) -> Result<VaultKey> {
    let encoded = fs::read(path).map_err(|e| SnipVaultError::key_io(path, e))?;
    debug!(path = %path.display(), "loaded vault key");
    Ok(VaultKey::from_encoded(encoded))
}

/// Generate a key and publish it at `path` without ever replacing an
/// existing file.  Losing the race to another creator means adopting the
/// winner's key.
fn create_key(path: &Path) -> Result<VaultKey> {
    let key = VaultKey::generate();

    match publish_noclobber(path, key.encoded()) {
        Ok(()) => {
            info!(path = %path.display(), "generated new vault key");
            Ok(key)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "key file created concurrently, using it");
            load_key(path)
        }
        Err(e) => Err(SnipVaultError::key_io(path, e)),
    }
}

/// Write `contents` so that `path` either does not exist or holds the
/// complete key.
///
/// The bytes go to a uniquely named sibling temp file (owner-only on
/// Unix), are flushed to disk, and the file is then linked into place
/// only if `path` is still absent.  A failed attempt removes its temp file.
fn publish_noclobber(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    restrict_permissions(tmp.as_file())?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    tmp.persist_noclobber(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}
