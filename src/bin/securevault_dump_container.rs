//! Prints the layout of a SecureVault backup
//!
//! Primarily for investigating backups, nothing is decrypted.

mod common;

use clap::Parser;
use std::path::PathBuf;

/// Show the envelope format, salt, IV and ciphertext size of a backup
#[derive(Parser)]
#[command(name = "securevault-dump-container")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backup file written by the SecureVault app
    #[arg(value_name = "BACKUP")]
    backup: PathBuf,

    /// Log details to stderr, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), securevault_backup::Error> {
    let cli = Cli::parse();
    common::init_logging(cli.verbose);

    let backup = securevault_backup::open(&cli.backup)?;
    let container = backup.container();
    let scheme = backup.scheme();
    println!("Format: {}", backup.format());
    println!("Cipher: AES-{}-CBC", scheme.key_length * 8);
    println!("KDF: PBKDF2-HMAC-SHA256");
    println!("\tIterations: {}", scheme.iterations);
    println!("\tSalt: {:02x?}", container.salt);
    println!("Encryption IV: {:02x?}", container.iv);
    println!(
        "Ciphertext: {} bytes ({} blocks{})",
        container.ciphertext.len(),
        container.ciphertext.len() / scheme.block_size(),
        if container.ciphertext.len() % scheme.block_size() == 0 {
            ""
        } else {
            ", misaligned"
        }
    );
    Ok(())
}
