//! Electronic Codebook (ECB) mode
//!
//! Every block is encrypted independently. The final chunk goes through the
//! padding collaborator and may become one or two blocks.
//!
//! ECB leaks equality of plaintext blocks and is provided for completeness.

use gfmodes_api::{validate, BlockCipher, PaddingScheme, Result};
use tracing::{debug, trace};

use super::{
    checked_block_size, decrypt_copy, encrypt_copy, outcome::Verification, pad_final, BlockMode,
    Blocks, Decrypted, Step,
};
use crate::sequence::{BlockSource, Chunk, SliceBlocks};

/// ECB mode over a borrowed cipher and padding scheme
pub struct Ecb<'a, C: ?Sized, P: ?Sized> {
    cipher: &'a C,
    padding: &'a P,
    block_size: usize,
}

impl<'a, C, P> Ecb<'a, C, P>
where
    C: BlockCipher + ?Sized,
    P: PaddingScheme + ?Sized,
{
    /// Configure ECB for `cipher`, padding the final block with `padding`
    pub fn new(cipher: &'a C, padding: &'a P) -> Result<Self> {
        let block_size = checked_block_size(cipher)?;
        debug!(
            mode = "ECB",
            block_size,
            cipher = cipher.name(),
            padding = padding.name(),
            "mode configured"
        );
        Ok(Self {
            cipher,
            padding,
            block_size,
        })
    }

    /// Encrypting direction as a state machine
    pub fn encryptor(&self) -> EcbEncryptor<'a, C, P> {
        EcbEncryptor {
            cipher: self.cipher,
            padding: self.padding,
            block_size: self.block_size,
        }
    }

    /// Decrypting direction as a state machine
    pub fn decryptor(&self) -> EcbDecryptor<'a, C, P> {
        EcbDecryptor {
            cipher: self.cipher,
            padding: self.padding,
            block_size: self.block_size,
        }
    }

    /// Lazily encrypt the chunks of `source`
    pub fn encrypt<S: BlockSource>(&self, source: S) -> Blocks<EcbEncryptor<'a, C, P>, S> {
        Blocks::new(self.encryptor(), source)
    }

    /// Lazily decrypt the blocks of `source`
    pub fn decrypt<S: BlockSource>(&self, source: S) -> Blocks<EcbDecryptor<'a, C, P>, S> {
        Blocks::new(self.decryptor(), source)
    }

    /// Encrypt a whole buffer
    pub fn encrypt_to_vec(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt(SliceBlocks::new(plaintext, self.block_size)?)
            .collect_bytes()
    }

    /// Decrypt a whole buffer
    pub fn decrypt_to_vec(&self, ciphertext: &[u8]) -> Result<Decrypted> {
        let plaintext = self
            .decrypt(SliceBlocks::new(ciphertext, self.block_size)?)
            .collect_bytes()?;
        Ok(Decrypted::new(plaintext, Verification::NotApplicable, None))
    }
}

/// ECB encryption state machine
pub struct EcbEncryptor<'a, C: ?Sized, P: ?Sized> {
    cipher: &'a C,
    padding: &'a P,
    block_size: usize,
}

impl<C, P> BlockMode for EcbEncryptor<'_, C, P>
where
    C: BlockCipher + ?Sized,
    P: PaddingScheme + ?Sized,
{
    type Session = ();

    fn begin(&self) -> Result<Step<()>> {
        Ok(Step::silent(()))
    }

    fn step(&self, session: (), chunk: Chunk) -> Result<Step<()>> {
        if !chunk.is_last {
            validate::length("ECB plaintext block", chunk.data.len(), self.block_size)?;
            trace!(mode = "ECB", "encrypting block");
            return Ok(Step::emit(session, encrypt_copy(self.cipher, &chunk.data)?));
        }

        let mut padded = pad_final(self.padding, &chunk.data, self.block_size, "ECB encrypt")?;
        for block in padded.chunks_mut(self.block_size) {
            self.cipher.encrypt_block(block)?;
        }
        trace!(mode = "ECB", blocks = padded.len() / self.block_size, "encrypted final chunk");
        Ok(Step::emit(session, padded))
    }
}

/// ECB decryption state machine
pub struct EcbDecryptor<'a, C: ?Sized, P: ?Sized> {
    cipher: &'a C,
    padding: &'a P,
    block_size: usize,
}

impl<C, P> BlockMode for EcbDecryptor<'_, C, P>
where
    C: BlockCipher + ?Sized,
    P: PaddingScheme + ?Sized,
{
    type Session = ();

    fn begin(&self) -> Result<Step<()>> {
        Ok(Step::silent(()))
    }

    fn step(&self, session: (), chunk: Chunk) -> Result<Step<()>> {
        validate::length("ECB ciphertext block", chunk.data.len(), self.block_size)?;
        let plaintext = decrypt_copy(self.cipher, &chunk.data)?;
        if !chunk.is_last {
            return Ok(Step::emit(session, plaintext));
        }
        let unpadded = self.padding.remove(&plaintext, self.block_size)?;
        Ok(Step::emit(session, unpadded))
    }
}

#[cfg(test)]
mod tests;
