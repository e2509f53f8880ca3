//! Error types for containersvc

use thiserror::Error;

/// Result type for containersvc operations
pub type Result<T> = std::result::Result<T, SvcError>;

/// containersvc error types
#[derive(Error, Debug)]
pub enum SvcError {
    #[error("`{command}` failed ({status}): {stderr}")]
    Runtime {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Image load error: {0}")]
    ImageLoad(String),

    #[error("Invalid volume specification: {0}")]
    InvalidVolume(String),

    #[error("Encryption failed: {0}")]
    Encrypt(String),

    #[error("Decryption failed: {0}")]
    Decrypt(String),

    #[error("Invalid ciphertext: {0}")]
    InvalidBlob(String),

    #[error("Unsupported ciphertext version: {0}")]
    UnsupportedVersion(u8),

    #[error("Key error: {0}")]
    Key(String),

    #[error("Decrypted value is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
