//! Counter (CTR) mode
//!
//! Counter mode turns a block cipher into a stream cipher by encrypting
//! successive counter blocks and XORing the result with the data:
//!
//! ```text
//! keystream_i = E(nonce || be(i))    i = 0, 1, 2, ...
//! ```
//!
//! The counter occupies the bytes the nonce leaves free. No padding is ever
//! applied: a short final chunk uses a truncated keystream block. Encryption
//! and decryption are the same procedure.

use gfmodes_api::{validate, BlockCipher, Error, Result};
use gfmodes_internal::endian::counter_block;
use gfmodes_internal::xor::xor_in_place;
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{checked_block_size, BlockMode, Blocks, Decrypted, Step, Verification};
use crate::sequence::{BlockSource, Chunk, SliceBlocks};

/// Per-stream CTR state
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct CtrSession {
    counter: u64,
}

impl CtrSession {
    /// Counter value for the next block
    pub fn counter(&self) -> u64 {
        self.counter
    }
}

/// CTR mode over a borrowed cipher
pub struct Ctr<'a, C: ?Sized> {
    cipher: &'a C,
    nonce: Zeroizing<Vec<u8>>,
    block_size: usize,
}

impl<'a, C: BlockCipher + ?Sized> Ctr<'a, C> {
    /// Configure CTR with `nonce`; the counter fills the rest of the block
    pub fn new(cipher: &'a C, nonce: &[u8]) -> Result<Self> {
        let block_size = checked_block_size(cipher)?;
        validate::parameter(
            nonce.len() < block_size,
            "CTR nonce",
            "nonce must leave room for a counter",
        )?;
        Self::with_counter_width(cipher, nonce, block_size - nonce.len())
    }

    /// Configure CTR with an explicit counter width in bytes
    ///
    /// Fails with [`gfmodes_api::Error::Configuration`] unless
    /// `nonce.len() + counter_width` is exactly the cipher's block size.
    pub fn with_counter_width(cipher: &'a C, nonce: &[u8], counter_width: usize) -> Result<Self> {
        let block_size = checked_block_size(cipher)?;
        validate::parameter(
            counter_width > 0 && nonce.len() + counter_width == block_size,
            "CTR nonce",
            "nonce and counter widths must add up to the block size",
        )?;
        debug!(
            mode = "CTR",
            block_size,
            counter_width,
            cipher = cipher.name(),
            "mode configured"
        );
        Ok(Self {
            cipher,
            nonce: Zeroizing::new(nonce.to_vec()),
            block_size,
        })
    }

    /// The keystream transform (identical in both directions)
    pub fn keystream(&self) -> CtrKeystream<'a, C> {
        CtrKeystream {
            cipher: self.cipher,
            nonce: self.nonce.clone(),
            block_size: self.block_size,
        }
    }

    /// Lazily encrypt the chunks of `source`
    pub fn encrypt<S: BlockSource>(&self, source: S) -> Blocks<CtrKeystream<'a, C>, S> {
        Blocks::new(self.keystream(), source)
    }

    /// Lazily decrypt the chunks of `source`
    pub fn decrypt<S: BlockSource>(&self, source: S) -> Blocks<CtrKeystream<'a, C>, S> {
        Blocks::new(self.keystream(), source)
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

/// CTR state machine
pub struct CtrKeystream<'a, C: ?Sized> {
    cipher: &'a C,
    nonce: Zeroizing<Vec<u8>>,
    block_size: usize,
}

impl<C: BlockCipher + ?Sized> BlockMode for CtrKeystream<'_, C> {
    type Session = CtrSession;

    fn begin(&self) -> Result<Step<CtrSession>> {
        Ok(Step::silent(CtrSession { counter: 0 }))
    }

    fn step(&self, mut session: CtrSession, chunk: Chunk) -> Result<Step<CtrSession>> {
        if chunk.is_last {
            validate::max_length("CTR final chunk", chunk.data.len(), self.block_size)?;
        } else {
            validate::length("CTR block", chunk.data.len(), self.block_size)?;
        }
        if chunk.data.is_empty() {
            return Ok(Step::silent(session));
        }

        let mut keystream = Zeroizing::new(counter_block(
            &self.nonce,
            session.counter,
            self.block_size,
        )?);
        self.cipher.encrypt_block(&mut keystream)?;

        let mut block = chunk.data;
        xor_in_place(&mut block, &keystream);
        trace!(mode = "CTR", counter = session.counter, "keystream applied");
        session.counter = session
            .counter
            .checked_add(1)
            .ok_or_else(|| Error::config("CTR counter", "counter space exhausted"))?;
        Ok(Step::emit(session, block))
    }
}
