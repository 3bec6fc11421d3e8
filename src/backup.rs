//! SecureVault backup files and their lock state

pub(crate) mod errors;
mod read;
mod states;

pub use read::{from_reader, from_reader_with_scheme, open, open_with_scheme};
pub use states::{Backup, BackupState, FailedUnlock, Locked, Unlocked};
