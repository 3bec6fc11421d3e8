mod block_cipher;

pub(crate) use block_cipher::{decrypt_blocks, encrypt_blocks};
