//! The block-cipher primitive consumed by every mode

use crate::error::Result;

/// A fixed-block-size cipher primitive
///
/// Implementations transform exactly one block in place. Handing them a
/// buffer of any other length is a precondition violation and must be
/// reported as [`crate::Error::InvalidLength`]. Implementations hold only key
/// material; no per-stream state lives in the primitive.
pub trait BlockCipher {
    /// Block size in bytes
    fn block_size(&self) -> usize;

    /// Encrypt a single block in place
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Decrypt a single block in place
    fn decrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Name used in diagnostics
    fn name(&self) -> &'static str {
        "block cipher"
    }
}

impl<B: BlockCipher + ?Sized> BlockCipher for &B {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        (**self).encrypt_block(block)
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        (**self).decrypt_block(block)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
