//! Stub collaborators for the mode unit tests

use gfmodes_api::{validate, BlockCipher, Error, PaddingScheme, Result};

/// Toy keyed permutation: XOR every byte with a key byte, then rotate the
/// block left by one position
pub(crate) struct ToyCipher {
    pub(crate) block_size: usize,
    pub(crate) key: u8,
}

impl ToyCipher {
    pub(crate) fn new(block_size: usize, key: u8) -> Self {
        Self { block_size, key }
    }
}

impl BlockCipher for ToyCipher {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::length("toy cipher block", block.len(), self.block_size)?;
        block.iter_mut().for_each(|b| *b ^= self.key);
        block.rotate_left(1);
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::length("toy cipher block", block.len(), self.block_size)?;
        block.rotate_right(1);
        block.iter_mut().for_each(|b| *b ^= self.key);
        Ok(())
    }
}

/// PKCS#7 padding
pub(crate) struct Pkcs7;

impl PaddingScheme for Pkcs7 {
    fn apply(&self, chunk: &[u8], block_size: usize) -> Result<Vec<u8>> {
        let pad = block_size - chunk.len() % block_size;
        let mut out = chunk.to_vec();
        out.resize(chunk.len() + pad, pad as u8);
        Ok(out)
    }

    fn remove(&self, block: &[u8], block_size: usize) -> Result<Vec<u8>> {
        let pad = block.last().copied().unwrap_or(0) as usize;
        if pad == 0 || pad > block_size || pad > block.len() {
            return Err(Error::Padding {
                context: "PKCS#7",
                message: format!("bad pad byte {}", pad),
            });
        }
        let (data, padding) = block.split_at(block.len() - pad);
        if padding.iter().any(|&b| b as usize != pad) {
            return Err(Error::Padding {
                context: "PKCS#7",
                message: "inconsistent pad bytes".into(),
            });
        }
        Ok(data.to_vec())
    }
}

/// Padding that always returns a fixed number of bytes
pub(crate) struct FixedLengthPadding(pub(crate) usize);

impl PaddingScheme for FixedLengthPadding {
    fn apply(&self, _chunk: &[u8], _block_size: usize) -> Result<Vec<u8>> {
        Ok(vec![0u8; self.0])
    }

    fn remove(&self, block: &[u8], _block_size: usize) -> Result<Vec<u8>> {
        Ok(block.to_vec())
    }
}
