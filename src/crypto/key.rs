//! The vault key held in memory.
//!
//! `VaultKey` keeps the key file's bytes exactly as they were read and
//! decodes them only when a cipher is needed.  A corrupted key file is
//! therefore accepted at startup and reported as `KeyFormat` on the first
//! seal/open, not when the file is loaded.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Result, SnipVaultError};

/// Length of the AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// An encoded vault key that zeroes its memory when dropped.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    encoded: Vec<u8>,
}

impl VaultKey {
    /// Generate fresh key material from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut raw = Zeroizing::new([0u8; KEY_LEN]);
        rand::rng().fill_bytes(&mut raw[..]);
        Self {
            encoded: BASE64.encode(&raw[..]).into_bytes(),
        }
    }

    /// Wrap key-file contents without validating them.
    pub fn from_encoded(encoded: Vec<u8>) -> Self {
        Self { encoded }
    }

    /// The bytes written to (or read from) the key file.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    /// Decode the raw 32-byte key.
    ///
    /// Trailing whitespace is tolerated so hand-edited key files with a
    /// final newline still work.
    pub fn material(&self) -> Result<Zeroizing<[u8; KEY_LEN]>> {
        let text = std::str::from_utf8(&self.encoded)
            .map_err(|_| SnipVaultError::KeyFormat("key file is not valid base64 text".into()))?;

        let decoded = Zeroizing::new(
            BASE64
                .decode(text.trim_end())
                .map_err(|e| SnipVaultError::KeyFormat(format!("invalid base64: {e}")))?,
        );

        if decoded.len() != KEY_LEN {
            return Err(SnipVaultError::KeyFormat(format!(
                "key must be exactly {KEY_LEN} bytes, got {}",
                decoded.len()
            )));
        }

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        key.copy_from_slice(&decoded[..]);
        Ok(key)
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultKey")
            .field("encoded", &"[REDACTED]")
            .finish()
    }
}
