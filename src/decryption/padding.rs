use super::DecryptError;
use crate::scheme::PaddingPolicy;
use cipher::block_padding::{Padding, Pkcs7};
use cipher::generic_array::GenericArray;
use cipher::BlockSizeUser;

impl PaddingPolicy {
    /// Remove padding from a decrypted buffer in place
    pub(crate) fn strip<C: BlockSizeUser>(
        self,
        plaintext: &mut Vec<u8>,
    ) -> Result<(), DecryptError> {
        let length = plaintext.len();
        let padding = match self {
            // A zero count drops the whole buffer
            PaddingPolicy::TrustedLastByteTruncation => match plaintext.last() {
                Some(0) | None => length,
                Some(&byte) => usize::from(byte),
            },
            PaddingPolicy::StrictPkcs7 => {
                let block_size = C::block_size();
                let start = length
                    .checked_sub(block_size)
                    .ok_or(DecryptError::InvalidPadding)?;
                let last_block =
                    GenericArray::<u8, C::BlockSize>::from_slice(&plaintext[start..]);
                let kept = <Pkcs7 as Padding<C::BlockSize>>::unpad(last_block)
                    .map_err(|_| DecryptError::InvalidPadding)?
                    .len();
                block_size - kept
            }
        };

        if padding > length {
            return Err(DecryptError::PaddingTruncationOutOfRange { padding, length });
        }
        plaintext.truncate(length - padding);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes::Aes256;

    fn block(content: &[u8], pad: u8) -> Vec<u8> {
        let mut data = content.to_vec();
        data.resize(16, pad);
        data
    }

    #[test]
    fn lax_truncates_by_last_byte() {
        let mut data = block(b"[]", 14);
        PaddingPolicy::TrustedLastByteTruncation
            .strip::<Aes256>(&mut data)
            .unwrap();
        assert_eq!(data, b"[]");
    }

    #[test]
    fn lax_ignores_padding_content() {
        let mut data = block(b"abc", 0xAA);
        *data.last_mut().unwrap() = 3;
        PaddingPolicy::TrustedLastByteTruncation
            .strip::<Aes256>(&mut data)
            .unwrap();
        assert_eq!(data.len(), 13);
    }

    #[test]
    fn lax_zero_empties_buffer() {
        let mut data = block(b"aaaaaaaaaaaaaaa", 0);
        PaddingPolicy::TrustedLastByteTruncation
            .strip::<Aes256>(&mut data)
            .unwrap();
        assert!(data.is_empty());

        let mut two_blocks = vec![b'a'; 32];
        two_blocks[31] = 0;
        PaddingPolicy::TrustedLastByteTruncation
            .strip::<Aes256>(&mut two_blocks)
            .unwrap();
        assert!(two_blocks.is_empty());
    }

    #[test]
    fn lax_accepts_padding_beyond_one_block() {
        let mut data = vec![0u8; 32];
        data[31] = 20;
        PaddingPolicy::TrustedLastByteTruncation
            .strip::<Aes256>(&mut data)
            .unwrap();
        assert_eq!(data.len(), 12);
    }

    #[test]
    fn lax_out_of_range() {
        let mut data = block(b"abc", 0xFF);
        let err = PaddingPolicy::TrustedLastByteTruncation
            .strip::<Aes256>(&mut data)
            .unwrap_err();
        assert!(matches!(
            err,
            DecryptError::PaddingTruncationOutOfRange {
                padding: 255,
                length: 16
            }
        ));
    }

    #[test]
    fn strict_accepts_valid_padding() {
        let mut data = block(b"[]", 14);
        PaddingPolicy::StrictPkcs7.strip::<Aes256>(&mut data).unwrap();
        assert_eq!(data, b"[]");
    }

    #[test]
    fn strict_rejects_inconsistent_padding() {
        let mut data = block(b"abc", 0xAA);
        *data.last_mut().unwrap() = 3;
        let err = PaddingPolicy::StrictPkcs7.strip::<Aes256>(&mut data).unwrap_err();
        assert!(matches!(err, DecryptError::InvalidPadding));
    }

    #[test]
    fn strict_rejects_zero() {
        let mut data = block(b"abc", 0);
        assert!(PaddingPolicy::StrictPkcs7.strip::<Aes256>(&mut data).is_err());
    }
}
