#![deny(missing_docs)]

//! Module to read and decrypt SecureVault password manager backups.
//!
//! A backup holds the user's password vault encrypted with AES-256-CBC under
//! a key stretched from their passphrase with PBKDF2-HMAC-SHA256. The main
//! types in this crate are:
//!
//! * [`Backup`] which represents a backup file, locked or unlocked
//! * [`Scheme`] which holds the encryption parameters
//! * [`Vault`] which represents the decrypted password entries
//!
//! # Opening a backup
//!
//! Backups can be read with the [`securevault_backup::open`] function. This
//! detects the backup layout and splits out the salt, IV and ciphertext. It
//! can then be unlocked by providing the passphrase to the [`Backup.unlock`]
//! method to access the vault.
//!
//! ```
//! # fn main() -> Result<(), securevault_backup::Error> {
//! use securevault_backup::{encrypt, EnvelopeFormat, Scheme};
//!
//! # let container = encrypt::encrypt(b"[]", "correct horse", &Scheme::SECUREVAULT)?;
//! # let file_contents = EnvelopeFormat::Data.wrap(&container.encode());
//! let backup = securevault_backup::from_reader(file_contents.as_bytes())?;
//! let unlocked = backup.unlock("correct horse")?;
//! assert_eq!(unlocked.entry_count(), Some(0));
//! # Ok(())
//! # }
//! ```
//!
//! # Working with the pipeline directly
//!
//! The stages are also available as plain functions. [`decode`] splits a
//! Base64 payload into a [`DecodedContainer`], and [`decrypt`] derives the
//! key and decrypts the ciphertext.
//!
//! ```
//! # fn main() -> Result<(), securevault_backup::Error> {
//! use securevault_backup::{decode, decrypt, encrypt, Scheme};
//!
//! let scheme = Scheme::SECUREVAULT;
//! # let payload = encrypt::encrypt(b"[]", "correct horse", &scheme)?.encode();
//! let container = decode(&payload, &scheme)?;
//! let vault = decrypt(
//!     &container.ciphertext,
//!     &container.iv,
//!     "correct horse",
//!     &container.salt,
//!     &scheme,
//! )?;
//! assert_eq!(vault, "[]");
//! # Ok(())
//! # }
//! ```
//!
//! The scheme has no authentication tag. A wrong passphrase is not
//! reported as such, it surfaces as
//! [`DecryptError::TextDecodingFailure`][crate::errors::DecryptError::TextDecodingFailure]
//! or occasionally a padding error.
//!
//! [`Backup`]: crate::Backup
//! [`Backup.unlock`]: crate::Backup#method.unlock
//! [`decode`]: crate::decode
//! [`decrypt`]: crate::decrypt
//! [`DecodedContainer`]: crate::DecodedContainer
//! [`Scheme`]: crate::Scheme
//! [`securevault_backup::open`]: crate::open
//! [`Vault`]: crate::Vault

pub mod backup;
pub mod container;
pub mod crypto;
pub mod decryption;
pub mod encrypt;
pub mod envelope;
pub mod errors;
pub mod report;
mod scheme;
mod stream;
pub mod vault;

pub use backup::{from_reader, open, Backup, Locked, Unlocked};
pub use container::{decode, DecodedContainer};
pub use crypto::{derive_key, DerivedKey};
pub use decryption::{decrypt, decrypt_container, decrypt_payload};
pub use envelope::{Envelope, EnvelopeFormat};
pub use errors::Error;
pub use scheme::{PaddingPolicy, Scheme};
pub use vault::Vault;
