//! Cipher Block Chaining (CBC) mode
//!
//! Each plaintext block is XORed with the previous ciphertext block before
//! encryption. The initialization vector (IV) is emitted verbatim as the first
//! output element, so a decrypting peer recovers it from the stream itself:
//!
//! ```text
//! [IV][C1][C2]...[Cn]    Ci = E(Pi ^ C(i-1)),  C0 = IV
//! ```
//!
//! The final chunk is padded to one or two blocks and chaining continues
//! across the extra block.

use gfmodes_api::{validate, BlockCipher, Error, PaddingScheme, Result};
use gfmodes_internal::xor::xor_in_place;
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{
    checked_block_size, decrypt_copy, pad_final, BlockMode, Blocks, Decrypted, Step, Verification,
};
use crate::sequence::{BlockSource, Chunk, SliceBlocks};

/// Position of a CBC stream in its state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CbcPhase {
    /// No block handled yet (decrypt: waiting for the IV)
    Start,
    /// Chaining value holds the previous ciphertext block
    Chaining,
    /// Final block processed
    Done,
}

/// Per-stream CBC state
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CbcSession {
    #[zeroize(skip)]
    phase: CbcPhase,
    chain: Zeroizing<Vec<u8>>,
}

impl CbcSession {
    fn start() -> Self {
        Self {
            phase: CbcPhase::Start,
            chain: Zeroizing::new(Vec::new()),
        }
    }

    fn chaining(value: &[u8]) -> Self {
        Self {
            phase: CbcPhase::Chaining,
            chain: Zeroizing::new(value.to_vec()),
        }
    }

    /// Current state
    pub fn phase(&self) -> CbcPhase {
        self.phase
    }

    /// Previous ciphertext block (the IV before any data block)
    pub fn chaining_value(&self) -> &[u8] {
        &self.chain
    }

    fn expect_running(&self, context: &'static str) -> Result<()> {
        if self.phase == CbcPhase::Done {
            return Err(Error::stream(context, "input after the final block"));
        }
        Ok(())
    }
}

impl core::fmt::Debug for CbcSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CbcSession")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// CBC mode over a borrowed cipher and padding scheme
pub struct Cbc<'a, C: ?Sized, P: ?Sized> {
    cipher: &'a C,
    padding: &'a P,
    iv: Zeroizing<Vec<u8>>,
    block_size: usize,
}

impl<'a, C, P> Cbc<'a, C, P>
where
    C: BlockCipher + ?Sized,
    P: PaddingScheme + ?Sized,
{
    /// Configure CBC with an IV of exactly one block
    pub fn new(cipher: &'a C, iv: &[u8], padding: &'a P) -> Result<Self> {
        let block_size = checked_block_size(cipher)?;
        validate::parameter(
            iv.len() == block_size,
            "CBC initialization vector",
            "IV must be exactly one block",
        )?;
        debug!(
            mode = "CBC",
            block_size,
            cipher = cipher.name(),
            padding = padding.name(),
            "mode configured"
        );
        Ok(Self {
            cipher,
            padding,
            iv: Zeroizing::new(iv.to_vec()),
            block_size,
        })
    }

    /// Encrypting direction as a state machine
    pub fn encryptor(&self) -> CbcEncryptor<'a, C, P> {
        CbcEncryptor {
            cipher: self.cipher,
            padding: self.padding,
            iv: self.iv.clone(),
            block_size: self.block_size,
        }
    }

    /// Decrypting direction as a state machine
    ///
    /// The IV is taken from the stream, not from this configuration.
    pub fn decryptor(&self) -> CbcDecryptor<'a, C, P> {
        CbcDecryptor {
            cipher: self.cipher,
            padding: self.padding,
            block_size: self.block_size,
        }
    }

    /// Lazily encrypt the chunks of `source`; the first element is the IV
    pub fn encrypt<S: BlockSource>(&self, source: S) -> Blocks<CbcEncryptor<'a, C, P>, S> {
        Blocks::new(self.encryptor(), source)
    }

    /// Lazily decrypt `[IV][C1]...[Cn]`
    pub fn decrypt<S: BlockSource>(&self, source: S) -> Blocks<CbcDecryptor<'a, C, P>, S> {
        Blocks::new(self.decryptor(), source)
    }

    /// Encrypt a whole buffer, IV first
    pub fn encrypt_to_vec(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt(SliceBlocks::new(plaintext, self.block_size)?)
            .collect_bytes()
    }

    /// Decrypt a whole buffer that starts with its IV
    pub fn decrypt_to_vec(&self, ciphertext: &[u8]) -> Result<Decrypted> {
        let plaintext = self
            .decrypt(SliceBlocks::new(ciphertext, self.block_size)?)
            .collect_bytes()?;
        Ok(Decrypted::new(plaintext, Verification::NotApplicable, None))
    }
}

/// CBC encryption state machine
pub struct CbcEncryptor<'a, C: ?Sized, P: ?Sized> {
    cipher: &'a C,
    padding: &'a P,
    iv: Zeroizing<Vec<u8>>,
    block_size: usize,
}

impl<C, P> CbcEncryptor<'_, C, P>
where
    C: BlockCipher + ?Sized,
    P: ?Sized,
{
    /// `block` becomes `E(block ^ chain)` and the new chaining value
    fn chain_block(&self, session: &mut CbcSession, block: &mut [u8]) -> Result<()> {
        xor_in_place(block, &session.chain);
        self.cipher.encrypt_block(block)?;
        session.chain.copy_from_slice(block);
        Ok(())
    }
}

impl<C, P> BlockMode for CbcEncryptor<'_, C, P>
where
    C: BlockCipher + ?Sized,
    P: PaddingScheme + ?Sized,
{
    type Session = CbcSession;

    fn begin(&self) -> Result<Step<CbcSession>> {
        Ok(Step::emit(CbcSession::chaining(&self.iv), self.iv.to_vec()))
    }

    fn step(&self, mut session: CbcSession, chunk: Chunk) -> Result<Step<CbcSession>> {
        session.expect_running("CBC encrypt")?;

        if !chunk.is_last {
            validate::length("CBC plaintext block", chunk.data.len(), self.block_size)?;
            let mut block = chunk.data;
            self.chain_block(&mut session, &mut block)?;
            trace!(mode = "CBC", "encrypted block");
            return Ok(Step::emit(session, block));
        }

        let mut padded = pad_final(self.padding, &chunk.data, self.block_size, "CBC encrypt")?;
        for block in padded.chunks_mut(self.block_size) {
            self.chain_block(&mut session, block)?;
        }
        session.phase = CbcPhase::Done;
        trace!(mode = "CBC", blocks = padded.len() / self.block_size, "encrypted final chunk");
        Ok(Step::emit(session, padded))
    }
}

/// CBC decryption state machine
pub struct CbcDecryptor<'a, C: ?Sized, P: ?Sized> {
    cipher: &'a C,
    padding: &'a P,
    block_size: usize,
}

impl<C, P> BlockMode for CbcDecryptor<'_, C, P>
where
    C: BlockCipher + ?Sized,
    P: PaddingScheme + ?Sized,
{
    type Session = CbcSession;

    fn begin(&self) -> Result<Step<CbcSession>> {
        Ok(Step::silent(CbcSession::start()))
    }

    fn step(&self, session: CbcSession, chunk: Chunk) -> Result<Step<CbcSession>> {
        session.expect_running("CBC decrypt")?;

        if session.phase == CbcPhase::Start {
            if chunk.is_last {
                return Err(Error::stream(
                    "CBC decrypt",
                    "stream holds no ciphertext after the IV",
                ));
            }
            validate::length("CBC initialization vector", chunk.data.len(), self.block_size)?;
            return Ok(Step::silent(CbcSession::chaining(&chunk.data)));
        }

        validate::length("CBC ciphertext block", chunk.data.len(), self.block_size)?;
        let mut session = session;
        let mut plaintext = decrypt_copy(self.cipher, &chunk.data)?;
        xor_in_place(&mut plaintext, &session.chain);
        session.chain.copy_from_slice(&chunk.data);

        if !chunk.is_last {
            trace!(mode = "CBC", "decrypted block");
            return Ok(Step::emit(session, plaintext));
        }

        session.phase = CbcPhase::Done;
        let plaintext = Zeroizing::new(plaintext);
        let unpadded = self.padding.remove(&plaintext, self.block_size)?;
        Ok(Step::emit(session, unpadded))
    }
}
