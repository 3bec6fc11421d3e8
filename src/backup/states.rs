use super::errors;
use crate::container::{self, DecodedContainer};
use crate::decryption::{self, DecryptError};
use crate::envelope::{Envelope, EnvelopeFormat};
use crate::scheme::Scheme;
use crate::vault::Vault;
use std::fmt;
use std::ops::Deref;

/// State shared by locked and unlocked backups
pub trait BackupState: fmt::Debug {
    /// Layout the payload was stored in
    fn format(&self) -> EnvelopeFormat;
    /// Encryption parameters used to read the backup
    fn scheme(&self) -> &Scheme;
}

#[derive(Debug)]
/// A SecureVault backup
///
/// Most methods are available on a specific state like `Backup<Locked>`
/// or `Backup<Unlocked>`.
///
/// A backup is read with [`securevault_backup::open`][crate::open] or
/// [`securevault_backup::from_reader`][crate::from_reader], and then
/// unlocked with the user's passphrase.
pub struct Backup<S>
where
    S: BackupState,
{
    pub(super) state: S,
}

impl<T: BackupState> Backup<T> {
    /// Layout the payload was stored in
    pub fn format(&self) -> EnvelopeFormat {
        self.state.format()
    }

    /// Encryption parameters used to read the backup
    pub fn scheme(&self) -> &Scheme {
        self.state.scheme()
    }
}

/// Represents a failed attempt at unlocking a backup
///
/// Includes the locked backup and the reason the unlock failed, so an
/// interactive caller can ask for another passphrase.
///
/// `FailedUnlock` converts into [`DecryptError`] and
/// [`securevault_backup::Error`][crate::Error] for use with `?`.
#[derive(Debug)]
pub struct FailedUnlock(pub Backup<Locked>, pub DecryptError);

impl From<FailedUnlock> for DecryptError {
    fn from(failed: FailedUnlock) -> DecryptError {
        failed.1
    }
}

#[derive(Debug, PartialEq, Eq)]
/// A locked backup, use unlock(passphrase) to unlock
pub struct Locked {
    /// Layout the payload was stored in
    pub(crate) format: EnvelopeFormat,
    /// Parameters the container was decoded with
    pub(crate) scheme: Scheme,
    /// Salt, IV and encrypted vault
    pub(crate) container: DecodedContainer,
}

impl BackupState for Locked {
    fn format(&self) -> EnvelopeFormat {
        self.format
    }

    fn scheme(&self) -> &Scheme {
        &self.scheme
    }
}

impl Backup<Locked> {
    /// Decode the payload of an already detected envelope
    pub fn from_envelope(
        envelope: &Envelope,
        scheme: Scheme,
    ) -> Result<Backup<Locked>, container::ContainerError> {
        let container = container::decode(envelope.payload(), &scheme)?;
        Ok(Backup {
            state: Locked {
                format: envelope.format(),
                scheme,
                container,
            },
        })
    }

    /// Read a backup from the full text of a backup file
    pub fn from_text(text: &str, scheme: Scheme) -> Result<Backup<Locked>, errors::OpenError> {
        let envelope = Envelope::detect(text)?;
        Ok(Backup::from_envelope(&envelope, scheme)?)
    }

    /// Salt, IV and ciphertext of the backup
    pub fn container(&self) -> &DecodedContainer {
        &self.state.container
    }

    /// Unlocks the backup
    ///
    /// If unlock fails, returns the locked backup along with the error
    pub fn unlock(self, passphrase: &str) -> Result<Backup<Unlocked>, FailedUnlock> {
        match decryption::decrypt_container(&self.state.container, passphrase, &self.state.scheme)
        {
            Ok(plaintext) => {
                let vault = Vault::parse(&plaintext);
                Ok(Backup {
                    state: Unlocked {
                        format: self.state.format,
                        scheme: self.state.scheme,
                        plaintext,
                        vault,
                    },
                })
            }
            Err(e) => Err(FailedUnlock(self, e)),
        }
    }
}

#[derive(Debug)]
/// An unlocked backup, allowing access to the stored passwords
pub struct Unlocked {
    /// Layout the payload was stored in
    pub(crate) format: EnvelopeFormat,
    /// Parameters the backup was decrypted with
    pub(crate) scheme: Scheme,
    /// Decrypted vault text
    pub(crate) plaintext: String,
    /// Parsed vault
    pub(crate) vault: Vault,
}

impl BackupState for Unlocked {
    fn format(&self) -> EnvelopeFormat {
        self.format
    }

    fn scheme(&self) -> &Scheme {
        &self.scheme
    }
}

impl Backup<Unlocked> {
    /// Decrypted vault text, exactly as stored
    pub fn plaintext(&self) -> &str {
        &self.state.plaintext
    }

    /// Take the decrypted vault text
    pub fn into_plaintext(self) -> String {
        self.state.plaintext
    }
}

impl Deref for Backup<Unlocked> {
    type Target = Vault;

    fn deref(&self) -> &Vault {
        &self.state.vault
    }
}
