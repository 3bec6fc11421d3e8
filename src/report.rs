//! Human readable output of a decrypted backup

use crate::vault::Vault;
use chrono::{DateTime, Local};
use std::io::{self, Write};

/// Number of characters shown by [`preview`] in the console
pub const PREVIEW_LIMIT: usize = 1000;

const RULE_WIDTH: usize = 70;

/// Text report written next to a decrypted backup
#[derive(Debug, Clone)]
pub struct Report {
    /// Where the backup was read from
    pub source: String,
    /// When the backup was decrypted
    pub decrypted_at: DateTime<Local>,
    /// Number of password entries, if the vault is a JSON array
    pub entry_count: Option<usize>,
    /// Pretty printed vault
    pub body: String,
}

impl Report {
    /// Build a report for a vault decrypted now
    pub fn new(source: impl Into<String>, vault: &Vault) -> Report {
        Report {
            source: source.into(),
            decrypted_at: Local::now(),
            entry_count: vault.entry_count(),
            body: vault.pretty(),
        }
    }

    /// Entry count as shown to the user
    pub fn entry_count_label(&self) -> String {
        match self.entry_count {
            Some(count) => count.to_string(),
            None => "unknown".to_string(),
        }
    }

    /// Write the report
    pub fn write<W: Write>(&self, mut output: W) -> io::Result<()> {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);
        writeln!(output, "{}", heavy)?;
        writeln!(output, "SecureVault Decrypted Backup Data")?;
        writeln!(output, "{}", heavy)?;
        writeln!(output, "Backup file: {}", self.source)?;
        writeln!(
            output,
            "Decrypted at: {}",
            self.decrypted_at.format("%Y-%m-%d %H:%M:%S%.6f")
        )?;
        writeln!(output, "Password count: {}", self.entry_count_label())?;
        writeln!(output, "{}", heavy)?;
        writeln!(output)?;
        writeln!(output, "RAW DECRYPTED JSON:")?;
        writeln!(output, "{}", light)?;
        writeln!(output, "{}", self.body)?;
        writeln!(output, "{}", light)?;
        output.flush()
    }
}

/// First `limit` characters of `text`, with `...` appended if anything was cut
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
