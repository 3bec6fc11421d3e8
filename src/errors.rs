//! Error types for securevault-backup

pub use crate::backup::errors::OpenError;
pub use crate::backup::FailedUnlock;
pub use crate::container::ContainerError;
pub use crate::crypto::KeyGenerationError;
pub use crate::decryption::DecryptError;
pub use crate::encrypt::EncryptError;
pub use crate::envelope::EnvelopeError;
use thiserror::Error;

#[derive(Error, Debug)]
/// Wrapper error type for this library
pub enum Error {
    /// Failed to open a backup
    #[error("Could not open backup: {0}")]
    Open(#[from] OpenError),
    /// The backup JSON does not carry a payload
    #[error("Could not read backup envelope: {0}")]
    Envelope(#[from] EnvelopeError),
    /// The payload is not a valid container
    #[error("{0}")]
    MalformedContainer(#[from] ContainerError),
    /// Failed decrypting a backup
    #[error("Could not decrypt backup: {0}")]
    Decrypt(#[from] DecryptError),
    /// Failed encrypting a vault
    #[error("Could not encrypt vault: {0}")]
    Encrypt(#[from] EncryptError),
}

impl From<FailedUnlock> for Error {
    fn from(failed: FailedUnlock) -> Error {
        Error::Decrypt(failed.1)
    }
}
