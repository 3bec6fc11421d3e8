//! Decrypts a SecureVault backup and writes the vault to a text report
//!
//! The passphrase can be passed on the CLI, which is insecure, through
//! `SECUREVAULT_PASSPHRASE`, or typed at a prompt.

mod common;

use clap::Parser;
use dialoguer::Password;
use securevault_backup::report::{self, Report, PREVIEW_LIMIT};
use securevault_backup::{PaddingPolicy, Scheme};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use zeroize::Zeroizing;

const RULE_WIDTH: usize = 70;

#[derive(Debug, Error)]
enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Could not read passphrase: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error(transparent)]
    Backup(#[from] securevault_backup::Error),
}

/// Decrypt a SecureVault backup into a readable report
#[derive(Parser)]
#[command(name = "securevault-decrypt")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backup file written by the SecureVault app
    #[arg(value_name = "BACKUP")]
    backup: PathBuf,

    /// Backup passphrase, prompted for when missing
    #[arg(value_name = "PASSPHRASE", env = "SECUREVAULT_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,

    /// Where to write the decrypted report
    #[arg(value_name = "OUTPUT", default_value = "decrypted_passwords.txt")]
    output: PathBuf,

    /// Require valid PKCS#7 padding instead of trusting the last byte
    #[arg(long)]
    strict_padding: bool,

    /// Log decryption details to stderr, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read_passphrase(given: Option<String>) -> Result<Zeroizing<String>, Error> {
    if let Some(passphrase) = given {
        return Ok(Zeroizing::new(passphrase));
    }
    let passphrase = Password::new()
        .with_prompt("Backup passphrase")
        .interact()?;
    Ok(Zeroizing::new(passphrase))
}

fn run(cli: &mut Cli) -> Result<(), Error> {
    let scheme = if cli.strict_padding {
        Scheme::SECUREVAULT.with_padding(PaddingPolicy::StrictPkcs7)
    } else {
        Scheme::SECUREVAULT
    };

    println!("[1/4] Reading backup file...");
    let data = fs::read(&cli.backup)?;
    println!("✓ Backup file read successfully ({} bytes)", data.len());

    println!("\n[2/4] Parsing backup structure...");
    let backup = securevault_backup::backup::from_reader_with_scheme(&*data, scheme)
        .map_err(securevault_backup::Error::from)?;
    println!(
        "✓ Found {} - {} bytes of ciphertext",
        backup.format(),
        backup.container().ciphertext.len()
    );

    let passphrase = read_passphrase(cli.passphrase.take())?;

    println!("\n[3/4] Decrypting password data...");
    let unlocked = backup
        .unlock(&passphrase)
        .map_err(securevault_backup::Error::from)?;
    println!("✓ Decryption successful!");

    let report = Report::new(cli.backup.display().to_string(), &unlocked);
    println!("✓ Found {} password entries", report.entry_count_label());

    println!("\n[4/4] Writing decrypted data to {}...", cli.output.display());
    let output = File::create(&cli.output)?;
    report.write(BufWriter::new(output))?;
    println!("✓ Data written successfully!");

    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    println!("\n{}", heavy);
    println!("SUCCESS! Decrypted data saved to: {}", cli.output.display());
    println!("{}", heavy);
    println!("\nPreview of decrypted JSON:");
    println!("{}", light);
    println!("{}", report::preview(&report.body, PREVIEW_LIMIT));
    println!("{}", light);
    Ok(())
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();
    common::init_logging(cli.verbose);

    let heavy = "=".repeat(RULE_WIDTH);
    println!("{}", heavy);
    println!("SecureVault Backup Decryption");
    println!("{}", heavy);
    println!("Backup file: {}", cli.backup.display());
    println!("Output file: {}", cli.output.display());
    println!();

    match run(&mut cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "decryption failed");
            eprintln!("\n{}", heavy);
            eprintln!("ERROR: {}", e);
            eprintln!("{}", heavy);
            ExitCode::FAILURE
        }
    }
}
