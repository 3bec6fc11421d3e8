//! Parameters of the SecureVault backup encryption scheme

use cipher::BlockSizeUser;

/// Block cipher used by every SecureVault backup, in CBC mode
pub(crate) type BackupCipher = aes::Aes256;

/// How block cipher padding is removed after decryption
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum PaddingPolicy {
    /// Truncate the buffer by the value of its last byte, without checking
    /// the content of the padding.
    ///
    /// This is what the SecureVault decryption tooling has always done, and
    /// is required to read every backup it could read.
    #[default]
    TrustedLastByteTruncation,
    /// Full PKCS#7 validation: the padding length must be within one block
    /// and every padding byte must equal the padding length.
    StrictPkcs7,
}

/// Fixed parameters of a backup encryption scheme
///
/// The decoder and the cipher engine both take a `Scheme` rather than
/// reading global constants. [`Scheme::SECUREVAULT`] (also the
/// [`Default`]) matches the backups written by the SecureVault app.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Scheme {
    /// Length of the PBKDF2 output in bytes, and so the AES key size
    pub key_length: usize,
    /// Length of the CBC initialization vector stored in the container
    pub iv_length: usize,
    /// Length of the PBKDF2 salt stored in the container
    pub salt_length: usize,
    /// PBKDF2-HMAC-SHA256 rounds
    pub iterations: u32,
    /// Padding removal applied after decryption
    pub padding: PaddingPolicy,
}

impl Scheme {
    /// AES-256-CBC keyed with PBKDF2-HMAC-SHA256, 100 000 rounds
    pub const SECUREVAULT: Scheme = Scheme {
        key_length: 32,
        iv_length: 16,
        salt_length: 32,
        iterations: 100_000,
        padding: PaddingPolicy::TrustedLastByteTruncation,
    };

    /// Smallest decoded container: salt and IV with no ciphertext
    pub fn header_length(&self) -> usize {
        self.salt_length + self.iv_length
    }

    /// AES block size, ciphertext must be a multiple of it
    pub fn block_size(&self) -> usize {
        BackupCipher::block_size()
    }

    /// The same scheme with a different padding policy
    pub fn with_padding(self, padding: PaddingPolicy) -> Scheme {
        Scheme { padding, ..self }
    }
}

impl Default for Scheme {
    fn default() -> Scheme {
        Scheme::SECUREVAULT
    }
}
