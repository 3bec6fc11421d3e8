//! Reference encryptor producing SecureVault compatible containers
//!
//! The SecureVault app is the real producer of backups. This module mirrors
//! what it writes so that backups can be generated for tests and tooling.

use crate::container::DecodedContainer;
use crate::crypto;
use crate::scheme::{BackupCipher, Scheme};
use crate::stream;
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors encountered encrypting a vault
pub enum EncryptError {
    /// The salt does not match the scheme's salt length
    #[error("Invalid salt length {actual}, expected {expected}")]
    InvalidSaltLength {
        /// Length of the supplied salt
        actual: usize,
        /// Salt length of the scheme
        expected: usize,
    },
    /// The IV does not match the scheme's IV length
    #[error("Invalid IV length {actual}, expected {expected}")]
    InvalidIvLength {
        /// Length of the supplied IV
        actual: usize,
        /// IV length of the scheme
        expected: usize,
    },
    /// There was some error generating the key
    #[error("Key generation failed - {0}")]
    KeyGen(#[from] crypto::KeyGenerationError),
    /// The derived key does not fit the cipher
    #[error("Invalid cipher params - {0}")]
    InvalidCipherParams(#[from] cipher::crypto_common::InvalidLength),
}

/// Encrypt `plaintext` with a caller supplied salt and IV
///
/// Deterministic, so suitable for fixed test vectors. Never reuse a salt and
/// IV pair for real data, use [`encrypt`] instead.
pub fn encrypt_with(
    plaintext: &[u8],
    passphrase: &str,
    salt: &[u8],
    iv: &[u8],
    scheme: &Scheme,
) -> Result<DecodedContainer, EncryptError> {
    if salt.len() != scheme.salt_length {
        return Err(EncryptError::InvalidSaltLength {
            actual: salt.len(),
            expected: scheme.salt_length,
        });
    }
    if iv.len() != scheme.iv_length {
        return Err(EncryptError::InvalidIvLength {
            actual: iv.len(),
            expected: scheme.iv_length,
        });
    }

    let key = crypto::derive_key(passphrase, salt, scheme)?;
    let ciphertext = stream::encrypt_blocks::<BackupCipher>(&key, iv, plaintext)?;
    Ok(DecodedContainer {
        salt: salt.to_vec(),
        iv: iv.to_vec(),
        ciphertext,
    })
}

/// Encrypt `plaintext` with a fresh salt and IV from the OS secure RNG
///
/// Under the hood this uses the [`rand`] crate to access the [`OsRng`].
///
/// [`rand`]: https://docs.rs/rand/
/// [`OsRng`]: https://docs.rs/rand/0.8/rand/rngs/struct.OsRng.html
pub fn encrypt(
    plaintext: &[u8],
    passphrase: &str,
    scheme: &Scheme,
) -> Result<DecodedContainer, EncryptError> {
    let mut salt = vec![0u8; scheme.salt_length];
    let mut iv = vec![0u8; scheme.iv_length];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut iv);
    encrypt_with(plaintext, passphrase, &salt, &iv, scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_scheme() -> Scheme {
        Scheme {
            iterations: 1,
            ..Scheme::SECUREVAULT
        }
    }

    #[test]
    fn container_has_scheme_layout() {
        let container = encrypt(b"[]", "pw", &fast_scheme()).unwrap();
        assert_eq!(container.salt.len(), 32);
        assert_eq!(container.iv.len(), 16);
        assert_eq!(container.ciphertext.len(), 16);
        assert_eq!(container.to_bytes().len(), 64);
    }

    #[test]
    fn fresh_salt_each_time() {
        let first = encrypt(b"[]", "pw", &fast_scheme()).unwrap();
        let second = encrypt(b"[]", "pw", &fast_scheme()).unwrap();
        assert_ne!(first.salt, second.salt);
        assert_ne!(first.ciphertext, second.ciphertext);
    }

    #[test]
    fn fixed_inputs_are_deterministic() {
        let scheme = fast_scheme();
        let first = encrypt_with(b"[]", "pw", &[1u8; 32], &[2u8; 16], &scheme).unwrap();
        let second = encrypt_with(b"[]", "pw", &[1u8; 32], &[2u8; 16], &scheme).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn wrong_salt_length_rejected() {
        let err = encrypt_with(b"[]", "pw", &[1u8; 16], &[2u8; 16], &fast_scheme()).unwrap_err();
        assert!(matches!(
            err,
            EncryptError::InvalidSaltLength {
                actual: 16,
                expected: 32
            }
        ));
    }
}
