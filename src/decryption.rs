//! Decryption of backup containers

mod padding;

use crate::container::{self, DecodedContainer};
use crate::crypto;
use crate::scheme::{BackupCipher, Scheme};
use crate::stream;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors encountered decrypting a container
///
/// The scheme has no authentication tag, so there is no dedicated error for
/// a wrong passphrase. One usually shows up as [`TextDecodingFailure`], and
/// sometimes as [`PaddingTruncationOutOfRange`].
///
/// [`TextDecodingFailure`]: DecryptError::TextDecodingFailure
/// [`PaddingTruncationOutOfRange`]: DecryptError::PaddingTruncationOutOfRange
pub enum DecryptError {
    /// The ciphertext is empty or not a whole number of blocks
    #[error("Invalid ciphertext length {length}, must be a positive multiple of {block_size}")]
    InvalidCiphertextLength {
        /// Ciphertext length in bytes
        length: usize,
        /// Cipher block size
        block_size: usize,
    },
    /// The IV does not match the scheme's IV length
    #[error("Invalid IV length {actual}, expected {expected}")]
    InvalidIvLength {
        /// Length of the supplied IV
        actual: usize,
        /// IV length of the scheme
        expected: usize,
    },
    /// The salt does not match the scheme's salt length
    #[error("Invalid salt length {actual}, expected {expected}")]
    InvalidSaltLength {
        /// Length of the supplied salt
        actual: usize,
        /// Salt length of the scheme
        expected: usize,
    },
    /// There was some error generating the key, likely an unusable scheme
    #[error("Key generation failed - {0}")]
    KeyGen(#[from] crypto::KeyGenerationError),
    /// The derived key does not fit the cipher
    #[error("Invalid cipher params - {0}")]
    InvalidCipherParams(#[from] cipher::crypto_common::InvalidLength),
    /// The padding length byte asks to remove more than was decrypted
    #[error("Padding length {padding} exceeds decrypted length {length}")]
    PaddingTruncationOutOfRange {
        /// Value of the last decrypted byte
        padding: usize,
        /// Decrypted length before truncation
        length: usize,
    },
    /// Strict PKCS#7 validation failed
    #[error("Invalid PKCS#7 padding - wrong passphrase or corrupt backup")]
    InvalidPadding,
    /// The decrypted vault is not UTF-8. This indicates a wrong passphrase or corrupt backup
    #[error("Decrypted data is not valid UTF-8 - wrong passphrase or corrupt backup")]
    TextDecodingFailure(#[from] std::string::FromUtf8Error),
}

/// Decrypt a ciphertext, returning the plaintext bytes with padding removed
pub fn decrypt_bytes(
    ciphertext: &[u8],
    iv: &[u8],
    passphrase: &str,
    salt: &[u8],
    scheme: &Scheme,
) -> Result<Vec<u8>, DecryptError> {
    let block_size = scheme.block_size();
    if ciphertext.is_empty() || ciphertext.len() % block_size != 0 {
        return Err(DecryptError::InvalidCiphertextLength {
            length: ciphertext.len(),
            block_size,
        });
    }
    if iv.len() != scheme.iv_length {
        return Err(DecryptError::InvalidIvLength {
            actual: iv.len(),
            expected: scheme.iv_length,
        });
    }
    if salt.len() != scheme.salt_length {
        return Err(DecryptError::InvalidSaltLength {
            actual: salt.len(),
            expected: scheme.salt_length,
        });
    }

    let key = crypto::derive_key(passphrase, salt, scheme)?;
    let mut plaintext = stream::decrypt_blocks::<BackupCipher>(&key, iv, ciphertext)?;
    scheme.padding.strip::<BackupCipher>(&mut plaintext)?;
    tracing::debug!(
        ciphertext = ciphertext.len(),
        plaintext = plaintext.len(),
        "decrypted container"
    );
    Ok(plaintext)
}

/// Decrypt a ciphertext into the vault text
///
/// Uses the key derived from `passphrase` and `salt`, then removes padding
/// according to the scheme's [`PaddingPolicy`](crate::PaddingPolicy).
pub fn decrypt(
    ciphertext: &[u8],
    iv: &[u8],
    passphrase: &str,
    salt: &[u8],
    scheme: &Scheme,
) -> Result<String, DecryptError> {
    let plaintext = decrypt_bytes(ciphertext, iv, passphrase, salt, scheme)?;
    Ok(String::from_utf8(plaintext)?)
}

/// Decrypt a decoded container
pub fn decrypt_container(
    container: &DecodedContainer,
    passphrase: &str,
    scheme: &Scheme,
) -> Result<String, DecryptError> {
    decrypt(
        &container.ciphertext,
        &container.iv,
        passphrase,
        &container.salt,
        scheme,
    )
}

/// Decode and decrypt the Base64 payload of a backup
pub fn decrypt_payload(
    payload: &str,
    passphrase: &str,
    scheme: &Scheme,
) -> Result<String, crate::Error> {
    let container = container::decode(payload, scheme)?;
    Ok(decrypt_container(&container, passphrase, scheme)?)
}
