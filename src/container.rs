//! The Base64 `salt || iv || ciphertext` container inside a backup

use crate::scheme::Scheme;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors decoding a container, collectively a malformed container
pub enum ContainerError {
    /// The payload is not valid standard Base64
    #[error("Malformed container - invalid Base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    /// The decoded payload cannot hold a salt and an IV
    #[error("Malformed container - {actual} bytes, need at least {minimum}")]
    TooShort {
        /// Decoded length of the payload
        actual: usize,
        /// Salt length plus IV length
        minimum: usize,
    },
}

#[derive(Debug, PartialEq, Eq, Clone)]
/// A container split into its three regions
///
/// The ciphertext is not validated here. A corrupt container is only
/// noticed once decryption is attempted, as the format carries no checksum.
pub struct DecodedContainer {
    /// PBKDF2 salt
    pub salt: Vec<u8>,
    /// AES-CBC initialization vector
    pub iv: Vec<u8>,
    /// Encrypted vault, expected to be block aligned
    pub ciphertext: Vec<u8>,
}

impl DecodedContainer {
    /// Reassemble the binary `salt || iv || ciphertext` layout
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.salt.len() + self.iv.len() + self.ciphertext.len());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.iv);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// Base64 text as stored in a backup
    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }
}

/// Decode the Base64 payload of a backup
///
/// ASCII whitespace is skipped, so payloads wrapped over several lines
/// decode the same as single line ones.
pub fn decode(payload: &str, scheme: &Scheme) -> Result<DecodedContainer, ContainerError> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact)?;
    decode_bytes(&bytes, scheme)
}

/// Split already decoded container bytes into salt, IV and ciphertext
pub fn decode_bytes(bytes: &[u8], scheme: &Scheme) -> Result<DecodedContainer, ContainerError> {
    let minimum = scheme.header_length();
    if bytes.len() < minimum {
        return Err(ContainerError::TooShort {
            actual: bytes.len(),
            minimum,
        });
    }

    let (salt, rest) = bytes.split_at(scheme.salt_length);
    let (iv, ciphertext) = rest.split_at(scheme.iv_length);
    tracing::trace!(
        salt = salt.len(),
        iv = iv.len(),
        ciphertext = ciphertext.len(),
        "decoded container"
    );

    Ok(DecodedContainer {
        salt: salt.to_vec(),
        iv: iv.to_vec(),
        ciphertext: ciphertext.to_vec(),
    })
}
