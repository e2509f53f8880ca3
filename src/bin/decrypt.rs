//! decrypt - round-trip an empty password through the crypto provider
//!
//! The key comes from `$CONTAINERSVC_KEY_FILE` or the default key location.

use anyhow::Context;
use clap::Parser;
use containersvc::crypto::{Crypto, CryptoProvider};
use containersvc::logging;

#[derive(Parser)]
#[command(name = "decrypt")]
#[command(version)]
#[command(about = "Encrypt an empty password and decrypt it back", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let crypto = Crypto::open("").context("failed to obtain crypto handle")?;

    let pw = "";
    println!("pw: {:?}", pw);

    let encrypted = crypto.encrypt(pw).context("encryption failed")?;
    println!("bytes: {:?}", encrypted);
    println!("string: {:?}", String::from_utf8_lossy(&encrypted));

    let decrypted = crypto.decrypt(&encrypted).context("decryption failed")?;
    println!("decrypted: {:?}", decrypted);

    Ok(())
}
