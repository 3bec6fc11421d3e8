//! Passphrase key derivation

use crate::scheme::Scheme;

use hmac::Hmac;
use sha2::Sha256;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroize;

type HmacSha256 = Hmac<Sha256>;

/// Symmetric key stretched from the user's passphrase
///
/// The key bytes are wiped when the value is dropped and never appear
/// in `Debug` output.
#[derive(PartialEq, Eq, Clone)]
pub struct DerivedKey(pub(crate) Vec<u8>);

impl DerivedKey {
    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length key, which no valid scheme produces
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey([redacted; {}])", self.0.len())
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Derive the cipher key for a backup with PBKDF2-HMAC-SHA256
///
/// The passphrase is used as its UTF-8 bytes. Identical inputs always give
/// an identical key, so a backup can be decrypted on any machine that knows
/// the passphrase.
pub fn derive_key(
    passphrase: &str,
    salt: &[u8],
    scheme: &Scheme,
) -> Result<DerivedKey, KeyGenerationError> {
    if scheme.iterations == 0 {
        return Err(KeyGenerationError::NoIterations);
    }
    tracing::debug!(
        iterations = scheme.iterations,
        salt_length = salt.len(),
        "deriving backup key"
    );

    let mut key = vec![0u8; scheme.key_length];
    pbkdf2::pbkdf2::<HmacSha256>(passphrase.as_bytes(), salt, scheme.iterations, &mut key)
        .map_err(|e| KeyGenerationError::KeyGeneration(e.to_string()))?;
    Ok(DerivedKey(key))
}

#[derive(Debug, Error)]
/// Errors stretching a passphrase into a key
pub enum KeyGenerationError {
    /// The scheme asks for zero PBKDF2 rounds
    #[error("PBKDF2 iterations must be at least 1")]
    NoIterations,
    /// The PBKDF2 implementation rejected its parameters
    #[error("Could not generate key: {0}")]
    KeyGeneration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_round() -> Scheme {
        Scheme {
            iterations: 1,
            ..Scheme::SECUREVAULT
        }
    }

    #[test]
    fn matches_rfc7914_vector() {
        // RFC 7914 section 11, first 32 bytes of the 64 byte output
        let key = derive_key("passwd", b"salt", &single_round()).unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let salt = [0x01u8; 32];
        let first = derive_key("correct horse", &salt, &Scheme::SECUREVAULT).unwrap();
        let second = derive_key("correct horse", &salt, &Scheme::SECUREVAULT).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 32);
    }

    #[test]
    fn salt_changes_key() {
        let scheme = single_round();
        let first = derive_key("correct horse", &[0x01u8; 32], &scheme).unwrap();
        let second = derive_key("correct horse", &[0x02u8; 32], &scheme).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn zero_iterations_rejected() {
        let scheme = Scheme {
            iterations: 0,
            ..Scheme::SECUREVAULT
        };
        let err = derive_key("pw", &[0u8; 32], &scheme).unwrap_err();
        assert!(matches!(err, KeyGenerationError::NoIterations));
    }

    #[test]
    fn debug_hides_key() {
        let key = derive_key("pw", &[0u8; 32], &single_round()).unwrap();
        assert_eq!(format!("{:?}", key), "DerivedKey([redacted; 32])");
    }
}
