//! Credential encryption
//!
//! [`Crypto`] encrypts short secrets such as passwords with XChaCha20-Poly1305
//! under a 32 byte key kept in a key file.

pub mod cipher;
pub mod key;

use crate::error::Result;
use cipher::KEY_LEN;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use key::{default_key_path, KEY_FILE_ENV};

/// Encrypt/decrypt contract for credential strings
pub trait CryptoProvider {
    /// Encrypt a plaintext string into an opaque byte blob
    fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>>;

    /// Decrypt a blob produced by [`CryptoProvider::encrypt`]
    fn decrypt(&self, ciphertext: &[u8]) -> Result<String>;
}

/// Crypto handle bound to one key
pub struct Crypto {
    key: [u8; KEY_LEN],
    key_path: Option<PathBuf>,
}

impl Crypto {
    /// Obtain a crypto handle for the key file at `key_path`.
    ///
    /// An empty path selects [`default_key_path`]. The key file is created
    /// when it does not exist yet.
    pub fn open(key_path: &str) -> Result<Self> {
        let path = if key_path.is_empty() {
            default_key_path()
        } else {
            PathBuf::from(key_path)
        };

        let key = key::load_or_generate(&path)?;
        let crypto = Self {
            key,
            key_path: Some(path),
        };
        debug!(
            "Using key {} from {}",
            crypto.fingerprint(),
            crypto.key_path().map(|p| p.display().to_string()).unwrap_or_default()
        );
        Ok(crypto)
    }

    /// Create a handle from an in-memory key
    pub fn from_key(key: [u8; KEY_LEN]) -> Self {
        Self {
            key,
            key_path: None,
        }
    }

    /// Key file backing this handle, if any
    pub fn key_path(&self) -> Option<&Path> {
        self.key_path.as_deref()
    }

    /// Short hex fingerprint of the key
    pub fn fingerprint(&self) -> String {
        Sha256::digest(self.key)[..8]
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

impl std::fmt::Debug for Crypto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crypto")
            .field("fingerprint", &self.fingerprint())
            .field("key_path", &self.key_path)
            .finish()
    }
}

impl CryptoProvider for Crypto {
    fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>> {
        cipher::seal(&self.key, plaintext.as_bytes())
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<String> {
        let plaintext = cipher::open(&self.key, ciphertext)?;
        Ok(String::from_utf8(plaintext)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SvcError;
    use tempfile::TempDir;

    #[test]
    fn test_empty_password_round_trip() {
        let crypto = Crypto::from_key([3u8; KEY_LEN]);
        let encrypted = crypto.encrypt("").unwrap();
        assert!(!encrypted.is_empty());
        assert_eq!(crypto.decrypt(&encrypted).unwrap(), "");
    }

    #[test]
    fn test_unicode_round_trip() {
        let crypto = Crypto::from_key([3u8; KEY_LEN]);
        let encrypted = crypto.encrypt("pässwörd ✓").unwrap();
        assert_eq!(crypto.decrypt(&encrypted).unwrap(), "pässwörd ✓");
    }

    #[test]
    fn test_decrypt_rejects_non_utf8_plaintext() {
        let key = [3u8; KEY_LEN];
        let blob = cipher::seal(&key, &[0xff, 0xfe]).unwrap();
        let crypto = Crypto::from_key(key);
        assert!(matches!(crypto.decrypt(&blob), Err(SvcError::Utf8(_))));
    }

    #[test]
    fn test_open_with_key_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("crypto.key");
        let path_str = path.to_str().unwrap();

        let first = Crypto::open(path_str).unwrap();
        let encrypted = first.encrypt("nutanix/4u").unwrap();

        let second = Crypto::open(path_str).unwrap();
        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_eq!(second.key_path(), Some(path.as_path()));
        assert_eq!(second.decrypt(&encrypted).unwrap(), "nutanix/4u");
    }

    #[test]
    fn test_different_keys_do_not_interoperate() {
        let a = Crypto::from_key([1u8; KEY_LEN]);
        let b = Crypto::from_key([2u8; KEY_LEN]);
        assert_ne!(a.fingerprint(), b.fingerprint());

        let encrypted = a.encrypt("secret").unwrap();
        assert!(b.decrypt(&encrypted).is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let crypto = Crypto::from_key([9u8; KEY_LEN]);
        let debug = format!("{:?}", crypto);
        assert!(debug.contains("fingerprint"));
        assert_eq!(crypto.fingerprint().len(), 16);
    }
}
