//! Ciphertext blob format
//!
//! A blob is `MAGIC | VERSION | nonce | ciphertext+tag`. The magic and version
//! bytes are authenticated as associated data.

use crate::error::{Result, SvcError};
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use rand::rngs::OsRng;
use rand::RngCore;

pub const BLOB_MAGIC: [u8; 4] = *b"CSVC";
pub const BLOB_VERSION: u8 = 1;

pub const KEY_LEN: usize = 32;
pub const NONCE_LEN: usize = 24;

const HEADER_LEN: usize = BLOB_MAGIC.len() + 1;

fn header() -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    header[..BLOB_MAGIC.len()].copy_from_slice(&BLOB_MAGIC);
    header[BLOB_MAGIC.len()] = BLOB_VERSION;
    header
}

fn new_cipher(key: &[u8; KEY_LEN]) -> Result<XChaCha20Poly1305> {
    XChaCha20Poly1305::new_from_slice(key)
        .map_err(|_| SvcError::Key(format!("key must be {} bytes", KEY_LEN)))
}

/// Encrypt `plaintext` under `key` with a fresh random nonce
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = new_cipher(key)?;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = XNonce::from_slice(&nonce_bytes);

    let header = header();
    let ciphertext = cipher
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad: &header,
            },
        )
        .map_err(|e| SvcError::Encrypt(e.to_string()))?;

    let mut blob = Vec::with_capacity(HEADER_LEN + NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&header);
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypt a blob produced by [`seal`]
pub fn open(key: &[u8; KEY_LEN], blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < HEADER_LEN + NONCE_LEN {
        return Err(SvcError::InvalidBlob(format!(
            "expected at least {} bytes, got {}",
            HEADER_LEN + NONCE_LEN,
            blob.len()
        )));
    }

    let (magic, rest) = blob.split_at(BLOB_MAGIC.len());
    if magic != BLOB_MAGIC {
        return Err(SvcError::InvalidBlob("bad magic".to_string()));
    }
    let (version, rest) = rest.split_at(1);
    if version[0] != BLOB_VERSION {
        return Err(SvcError::UnsupportedVersion(version[0]));
    }
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

    let cipher = new_cipher(key)?;
    cipher
        .decrypt(
            XNonce::from_slice(nonce_bytes),
            Payload {
                msg: ciphertext,
                aad: &blob[..HEADER_LEN],
            },
        )
        .map_err(|_| SvcError::Decrypt("authentication failed".to_string()))
}
