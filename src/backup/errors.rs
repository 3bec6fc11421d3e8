use crate::container::ContainerError;
use crate::envelope::EnvelopeError;
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors encountered loading a backup prior to decryption
pub enum OpenError {
    /// Error encountered reading the backup
    #[error("IO error reading file - {0}")]
    Io(#[from] std::io::Error),
    /// Backups are text, either JSON or Base64
    #[error("Unsupported file type - backup is not UTF-8 text")]
    NotUtf8(#[from] std::string::FromUtf8Error),
    /// The backup JSON does not carry a payload
    #[error("Error reading backup envelope - {0}")]
    Envelope(#[from] EnvelopeError),
    /// The payload is not a valid container
    #[error("{0}")]
    Container(#[from] ContainerError),
}
