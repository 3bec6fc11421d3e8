//! Generates a SecureVault backup from a plaintext vault
//!
//! Primarily for producing test backups. It takes the passphrase on the
//! CLI, which is insecure.

mod common;

use clap::{Parser, ValueEnum};
use securevault_backup::{encrypt, EnvelopeFormat, Scheme, Vault};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Could not encrypt vault: {0}")]
    Encrypt(#[from] securevault_backup::errors::EncryptError),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// JSON object with a `data` field
    Data,
    /// JSON object with an `f` field
    F,
    /// Bare Base64 text
    Raw,
}

impl From<Format> for EnvelopeFormat {
    fn from(format: Format) -> EnvelopeFormat {
        match format {
            Format::Data => EnvelopeFormat::Data,
            Format::F => EnvelopeFormat::Legacy,
            Format::Raw => EnvelopeFormat::Raw,
        }
    }
}

/// Encrypt a plaintext vault into a SecureVault backup
#[derive(Parser)]
#[command(name = "securevault-generate")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Plaintext vault, normally a JSON array of password entries
    #[arg(value_name = "PLAINTEXT")]
    plaintext: PathBuf,

    /// Passphrase to encrypt with
    #[arg(value_name = "PASSPHRASE")]
    passphrase: String,

    /// Backup file to write
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Layout of the backup file
    #[arg(long, value_enum, default_value_t = Format::Data)]
    format: Format,

    /// Log details to stderr, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    common::init_logging(cli.verbose);

    let plaintext = fs::read_to_string(&cli.plaintext)?;
    if Vault::parse(&plaintext).entry_count().is_none() {
        tracing::warn!("plaintext is not a JSON array, the app will not be able to import it");
    }

    let container = encrypt::encrypt(plaintext.as_bytes(), &cli.passphrase, &Scheme::SECUREVAULT)?;
    let format = EnvelopeFormat::from(cli.format);
    fs::write(&cli.output, format.wrap(&container.encode()))?;
    println!("Wrote {} backup to {}", format, cli.output.display());
    Ok(())
}
