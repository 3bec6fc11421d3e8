use crate::crypto;
use cipher::block_padding::{Padding, Pkcs7};
use cipher::crypto_common::InvalidLength;
use cipher::generic_array::GenericArray;
use cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, BlockSizeUser, KeyInit, KeyIvInit};

type Block<C> = GenericArray<u8, <C as BlockSizeUser>::BlockSize>;

/// Decrypt whole CBC blocks, leaving any padding in place
///
/// Callers check that `ciphertext` is block aligned, a trailing partial
/// block is ignored.
pub(crate) fn decrypt_blocks<C>(
    key: &crypto::DerivedKey,
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, InvalidLength>
where
    C: BlockCipher + BlockDecryptMut + KeyInit,
{
    let mut cipher = cbc::Decryptor::<C>::new_from_slices(&key.0, iv)?;
    let mut blocks: Vec<Block<C>> = ciphertext
        .chunks_exact(C::block_size())
        .map(GenericArray::clone_from_slice)
        .collect();
    cipher.decrypt_blocks_mut(&mut blocks);

    Ok(blocks.iter().flat_map(|block| block.iter().copied()).collect())
}

/// PKCS#7 pad and encrypt `plaintext`, always adding at least one byte of padding
pub(crate) fn encrypt_blocks<C>(
    key: &crypto::DerivedKey,
    iv: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, InvalidLength>
where
    C: BlockCipher + BlockEncryptMut + KeyInit,
{
    let mut cipher = cbc::Encryptor::<C>::new_from_slices(&key.0, iv)?;
    let block_size = C::block_size();
    let mut blocks: Vec<Block<C>> = plaintext
        .chunks(block_size)
        .map(|chunk| {
            let mut block = Block::<C>::default();
            block[..chunk.len()].copy_from_slice(chunk);
            block
        })
        .collect();

    let tail = plaintext.len() % block_size;
    if tail == 0 {
        blocks.push(Block::<C>::default());
    }
    if let Some(last) = blocks.last_mut() {
        <Pkcs7 as Padding<C::BlockSize>>::pad(last, tail);
    }
    cipher.encrypt_blocks_mut(&mut blocks);

    Ok(blocks.iter().flat_map(|block| block.iter().copied()).collect())
}
