//! Key file handling

use super::cipher::KEY_LEN;
use crate::error::{Result, SvcError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding the default key location
pub const KEY_FILE_ENV: &str = "CONTAINERSVC_KEY_FILE";

/// Default key location: `$CONTAINERSVC_KEY_FILE`, else
/// `<config dir>/containersvc/crypto.key`
pub fn default_key_path() -> PathBuf {
    if let Some(path) = std::env::var_os(KEY_FILE_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/etc"))
        .join("containersvc")
        .join("crypto.key")
}

/// Read the key at `path`, generating and persisting a new one if absent
pub fn load_or_generate(path: &Path) -> Result<[u8; KEY_LEN]> {
    if path.exists() {
        return read_key(path);
    }

    let mut key = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut key);
    write_key(path, &key)?;
    info!("Generated new key file {}", path.display());
    Ok(key)
}

/// Read a base64 encoded key file
pub fn read_key(path: &Path) -> Result<[u8; KEY_LEN]> {
    let encoded = fs::read_to_string(path)?;
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| SvcError::Key(format!("{}: {}", path.display(), e)))?;

    bytes.as_slice().try_into().map_err(|_| {
        SvcError::Key(format!(
            "{}: expected {} key bytes, found {}",
            path.display(),
            KEY_LEN,
            bytes.len()
        ))
    })
}

/// Write a key file readable only by its owner
pub fn write_key(path: &Path, key: &[u8; KEY_LEN]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    writeln!(file, "{}", STANDARD.encode(key))?;
    Ok(())
}
