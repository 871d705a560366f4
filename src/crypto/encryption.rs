//! AES-256-GCM authenticated encryption of snippet values.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce, prepends it
//! to the ciphertext, and base64-encodes the result so it can live in a
//! TEXT column.  `open` reverses those steps and verifies the auth tag.
//!
//! Layout before base64:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::Zeroizing;

use super::key::VaultKey;
use crate::errors::{Result, SnipVaultError};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` under `key` and return the text-safe encoding.
pub fn seal(key: &VaultKey, plaintext: &str) -> Result<String> {
    let material = key.material()?;
    let cipher = Aes256Gcm::new_from_slice(&material[..])
        .map_err(|e| SnipVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| SnipVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(output))
}

/// Decrypt a value produced by `seal`.
///
/// Bad base64, a truncated blob, a failed tag check, or a non-UTF-8
/// plaintext all surface as `DecryptionFailed`.  A malformed key surfaces
/// as `KeyFormat`.
pub fn open(key: &VaultKey, data: &str) -> Result<Zeroizing<String>> {
    let material = key.material()?;

    let blob = BASE64
        .decode(data.trim())
        .map_err(|_| SnipVaultError::DecryptionFailed)?;

    if blob.len() < NONCE_LEN {
        return Err(SnipVaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher =
        Aes256Gcm::new_from_slice(&material[..]).map_err(|_| SnipVaultError::DecryptionFailed)?;

    let plaintext = Zeroizing::new(
        cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| SnipVaultError::DecryptionFailed)?,
    );

    let text = std::str::from_utf8(&plaintext).map_err(|_| SnipVaultError::DecryptionFailed)?;
    Ok(Zeroizing::new(text.to_owned()))
}
