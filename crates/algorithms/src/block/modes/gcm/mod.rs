//! Galois/Counter Mode (GCM-style authenticated encryption)
//!
//! Counter-mode encryption combined with a running authentication
//! accumulator in GF(2^n), where n is eight times the cipher's block size.
//! Blocks enter the field as little-endian integers.
//!
//! Setup:
//!
//! ```text
//! H        = E(0^b)                       hash subkey
//! EK_nonce = E(nonce || be(0))            tag mask
//! acc      = A * H                        A = header, zero-extended to a block
//! ```
//!
//! Per ciphertext block `C_i` (counter starting at 1):
//!
//! ```text
//! C_i = P_i ^ E(nonce || be(i))
//! acc = (acc ^ C_i) * H
//! ```
//!
//! Finalisation:
//!
//! ```text
//! L   = (len(header) << n/2) | blocks
//! acc = (acc ^ L) * H
//! T   = acc ^ EK_nonce
//! ```
//!
//! Wire framing is `[header block][C_1]...[C_m][tag block]`. Only full data
//! blocks are supported; a short, non-empty final chunk is a configuration
//! error.
//!
//! Decryption does not fail on a bad tag. It reports a [`Verification`]
//! outcome alongside the plaintext; a caller that ignores it gets neither
//! integrity nor authenticity. [`Decrypted::into_verified`] turns a failed
//! outcome into [`Error::AuthenticationFailed`].

use gfmodes_api::{validate, BlockCipher, Error, Result};
use gfmodes_internal::constant_time::ct_eq;
use gfmodes_internal::endian::counter_block;
use gfmodes_internal::xor::xor_in_place;
use gfmodes_params::modes::{counter_mode_nonce_len, gcm_field_width, GCM_MAX_HEADER_BLOCKS};
use tracing::{debug, trace, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{checked_block_size, BlockMode, Blocks, Decrypted, Step, Verification};
use crate::field::{GaloisField, GfElement};
use crate::sequence::{BlockSource, Chunk, SliceBlocks};

/// Position of a GCM stream in its state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcmPhase {
    /// Decrypt only: the header block has not been read yet
    AwaitingHeader,
    /// Data blocks are being processed
    Body,
    /// Tag emitted (encrypt) or checked (decrypt)
    Done,
}

/// Per-stream GCM state
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct GcmSession {
    #[zeroize(skip)]
    phase: GcmPhase,
    hash_key: GfElement,
    tag_mask: GfElement,
    accumulator: GfElement,
    counter: u64,
    blocks: u64,
    #[zeroize(skip)]
    verification: Option<Verification>,
    received_header: Option<Vec<u8>>,
}

impl GcmSession {
    /// Current state
    pub fn phase(&self) -> GcmPhase {
        self.phase
    }

    /// Number of data blocks processed so far
    pub fn block_count(&self) -> u64 {
        self.blocks
    }

    /// Counter value for the next data block
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Tag check outcome, once a decrypting stream has read its tag
    pub fn verification(&self) -> Option<Verification> {
        self.verification
    }

    /// Header block read by a decrypting stream
    pub fn received_header(&self) -> Option<&[u8]> {
        self.received_header.as_deref()
    }

    /// Running authentication accumulator
    pub fn accumulator(&self) -> &GfElement {
        &self.accumulator
    }

    /// Fold one block into the accumulator: `acc = (acc ^ block) * H`
    fn absorb(&mut self, block: &GfElement) -> Result<()> {
        self.accumulator = self.accumulator.xor(block)?.mult(&self.hash_key)?;
        Ok(())
    }
}

impl core::fmt::Debug for GcmSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GcmSession")
            .field("phase", &self.phase)
            .field("counter", &self.counter)
            .field("blocks", &self.blocks)
            .field("verification", &self.verification)
            .finish_non_exhaustive()
    }
}

/// GCM-style authenticated mode over a borrowed cipher
pub struct Gcm<'a, C: ?Sized> {
    cipher: &'a C,
    field: GaloisField,
    nonce: Zeroizing<Vec<u8>>,
    header: Vec<u8>,
    block_size: usize,
}

impl<'a, C: BlockCipher + ?Sized> Gcm<'a, C> {
    /// Configure the mode over the designated field for the cipher's block size
    ///
    /// The nonce must be exactly half a block (rounded down) and the header
    /// at most one block.
    pub fn new(cipher: &'a C, nonce: &[u8], header: &[u8]) -> Result<Self> {
        let block_size = checked_block_size(cipher)?;
        let field = GaloisField::standard(gcm_field_width(block_size))?;
        Self::with_field(cipher, field, nonce, header)
    }

    /// Configure the mode over a caller-built field
    ///
    /// The field width must be eight times the cipher's block size.
    pub fn with_field(
        cipher: &'a C,
        field: GaloisField,
        nonce: &[u8],
        header: &[u8],
    ) -> Result<Self> {
        let block_size = checked_block_size(cipher)?;
        validate::parameter(
            field.width() == gcm_field_width(block_size),
            "GCM field",
            "field width must be eight times the block size",
        )?;
        validate::parameter(
            nonce.len() == counter_mode_nonce_len(block_size),
            "GCM nonce",
            "nonce must be half a block",
        )?;
        validate::parameter(
            header.len() <= GCM_MAX_HEADER_BLOCKS * block_size,
            "GCM header",
            "header must fit in one block",
        )?;
        debug!(
            mode = "GCM",
            block_size,
            field_width = field.width(),
            header_len = header.len(),
            cipher = cipher.name(),
            "mode configured"
        );
        Ok(Self {
            cipher,
            field,
            nonce: Zeroizing::new(nonce.to_vec()),
            header: header.to_vec(),
            block_size,
        })
    }

    /// Field the accumulator lives in
    pub fn field(&self) -> &GaloisField {
        &self.field
    }

    /// Encrypting direction as a state machine
    pub fn encryptor(&self) -> GcmEncryptor<'a, C> {
        GcmEncryptor {
            core: self.core(),
        }
    }

    /// Decrypting direction as a state machine
    pub fn decryptor(&self) -> GcmDecryptor<'a, C> {
        GcmDecryptor {
            core: self.core(),
        }
    }

    /// Lazily encrypt the chunks of `source`
    pub fn encrypt<S: BlockSource>(&self, source: S) -> Blocks<GcmEncryptor<'a, C>, S> {
        Blocks::new(self.encryptor(), source)
    }

    /// Lazily decrypt `[header][C_1]...[C_m][tag]`
    pub fn decrypt<S: BlockSource>(&self, source: S) -> GcmDecryptStream<'a, C, S> {
        GcmDecryptStream {
            blocks: Blocks::new(self.decryptor(), source),
        }
    }

    /// Encrypt a whole buffer into `header || ciphertext || tag`
    pub fn encrypt_to_vec(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt(SliceBlocks::new(plaintext, self.block_size)?)
            .collect_bytes()
    }

    /// Decrypt a whole framed buffer and report the tag check
    pub fn decrypt_to_vec(&self, framed: &[u8]) -> Result<Decrypted> {
        self.decrypt_source(SliceBlocks::new(framed, self.block_size)?)
    }

    /// Drain a framed source and report the tag check
    pub fn decrypt_source<S: BlockSource>(&self, source: S) -> Result<Decrypted> {
        let mut stream = self.decrypt(source);
        let mut plaintext = Vec::new();
        for block in &mut stream {
            plaintext.extend_from_slice(&block?);
        }
        let verification = stream
            .verification()
            .ok_or_else(|| Error::stream("GCM decrypt", "stream ended before the tag"))?;
        let header = stream.received_header().map(<[u8]>::to_vec);
        Ok(Decrypted::new(plaintext, verification, header))
    }

    fn core(&self) -> GcmCore<'a, C> {
        GcmCore {
            cipher: self.cipher,
            field: self.field.clone(),
            nonce: self.nonce.clone(),
            header: self.header.clone(),
            block_size: self.block_size,
        }
    }
}

/// Configuration shared by both directions
struct GcmCore<'a, C: ?Sized> {
    cipher: &'a C,
    field: GaloisField,
    nonce: Zeroizing<Vec<u8>>,
    header: Vec<u8>,
    block_size: usize,
}

impl<C: BlockCipher + ?Sized> GcmCore<'_, C> {
    fn element(&self, block: &[u8]) -> Result<GfElement> {
        self.field.from_le_bytes(block)
    }

    fn encrypt_counter(&self, counter: u64) -> Result<Zeroizing<Vec<u8>>> {
        let mut block = Zeroizing::new(counter_block(&self.nonce, counter, self.block_size)?);
        self.cipher.encrypt_block(&mut block)?;
        Ok(block)
    }

    /// Derive H and EK_nonce; the accumulator starts at zero
    fn session(&self, phase: GcmPhase) -> Result<GcmSession> {
        let mut zero_block = Zeroizing::new(vec![0u8; self.block_size]);
        self.cipher.encrypt_block(&mut zero_block)?;
        let hash_key = self.element(&zero_block)?;
        let tag_mask = self.element(&self.encrypt_counter(0)?)?;
        Ok(GcmSession {
            phase,
            hash_key,
            tag_mask,
            accumulator: self.field.zero(),
            counter: 1,
            blocks: 0,
            verification: None,
            received_header: None,
        })
    }

    fn header_block(&self) -> Vec<u8> {
        let mut block = self.header.to_vec();
        block.resize(self.block_size, 0);
        block
    }

    fn seed(&self, session: &mut GcmSession, header_block: &[u8]) -> Result<()> {
        let header = self.element(header_block)?;
        session.accumulator = header.mult(&session.hash_key)?;
        Ok(())
    }

    /// XOR one block with the keystream for the session's counter
    fn apply_keystream(&self, session: &mut GcmSession, block: &mut [u8]) -> Result<()> {
        let keystream = self.encrypt_counter(session.counter)?;
        xor_in_place(block, &keystream);
        trace!(mode = "GCM", counter = session.counter, "keystream applied");
        session.counter = session
            .counter
            .checked_add(1)
            .ok_or_else(|| Error::config("GCM counter", "counter space exhausted"))?;
        session.blocks += 1;
        Ok(())
    }

    /// `(len(header) << n/2) | blocks`
    fn length_element(&self, blocks: u64) -> Result<GfElement> {
        let half = self.field.width() / 2;
        let required = 64 - blocks.leading_zeros() as usize;
        if required > half {
            return Err(Error::Range {
                context: "GCM block count",
                width: half,
                required,
            });
        }
        let header_len = self.field.from_u64_shifted(self.header.len() as u64, half)?;
        header_len.xor(&self.field.from_u64_shifted(blocks, 0)?)
    }

    fn tag(&self, session: &mut GcmSession) -> Result<Vec<u8>> {
        let length = self.length_element(session.blocks)?;
        session.absorb(&length)?;
        Ok(session.accumulator.xor(&session.tag_mask)?.to_le_bytes())
    }
}

/// GCM encryption state machine
pub struct GcmEncryptor<'a, C: ?Sized> {
    core: GcmCore<'a, C>,
}

impl<C: BlockCipher + ?Sized> BlockMode for GcmEncryptor<'_, C> {
    type Session = GcmSession;

    fn begin(&self) -> Result<Step<GcmSession>> {
        let mut session = self.core.session(GcmPhase::Body)?;
        let header_block = self.core.header_block();
        self.core.seed(&mut session, &header_block)?;
        Ok(Step::emit(session, header_block))
    }

    fn step(&self, mut session: GcmSession, chunk: Chunk) -> Result<Step<GcmSession>> {
        if session.phase == GcmPhase::Done {
            return Err(Error::stream("GCM encrypt", "input after the final block"));
        }
        let core = &self.core;
        let mut output = Vec::with_capacity(2);

        if !chunk.data.is_empty() {
            if chunk.is_last && chunk.data.len() < core.block_size {
                return Err(Error::config(
                    "GCM encrypt",
                    format!(
                        "final chunk of {} bytes is shorter than the {}-byte block",
                        chunk.data.len(),
                        core.block_size
                    ),
                ));
            }
            validate::length("GCM plaintext block", chunk.data.len(), core.block_size)?;
            let mut block = chunk.data;
            core.apply_keystream(&mut session, &mut block)?;
            session.absorb(&core.element(&block)?)?;
            output.push(block);
        }

        if chunk.is_last {
            output.push(core.tag(&mut session)?);
            session.phase = GcmPhase::Done;
            trace!(mode = "GCM", blocks = session.blocks, "tag emitted");
        }
        Ok(Step { session, output })
    }
}

/// GCM decryption state machine
pub struct GcmDecryptor<'a, C: ?Sized> {
    core: GcmCore<'a, C>,
}

impl<C: BlockCipher + ?Sized> BlockMode for GcmDecryptor<'_, C> {
    type Session = GcmSession;

    fn begin(&self) -> Result<Step<GcmSession>> {
        Ok(Step::silent(self.core.session(GcmPhase::AwaitingHeader)?))
    }

    fn step(&self, mut session: GcmSession, chunk: Chunk) -> Result<Step<GcmSession>> {
        let core = &self.core;
        match session.phase {
            GcmPhase::Done => Err(Error::stream("GCM decrypt", "input after the tag")),
            GcmPhase::AwaitingHeader => {
                if chunk.is_last {
                    return Err(Error::stream(
                        "GCM decrypt",
                        "stream must hold a header block and a tag block",
                    ));
                }
                validate::length("GCM header block", chunk.data.len(), core.block_size)?;
                core.seed(&mut session, &chunk.data)?;
                session.received_header = Some(chunk.data);
                session.phase = GcmPhase::Body;
                Ok(Step::silent(session))
            }
            GcmPhase::Body if chunk.is_last => {
                validate::length("GCM tag", chunk.data.len(), core.block_size)?;
                let expected = Zeroizing::new(core.tag(&mut session)?);
                let verification = if ct_eq(&*expected, &chunk.data) {
                    Verification::Verified
                } else {
                    warn!(mode = "GCM", blocks = session.blocks, "authentication tag mismatch");
                    Verification::Failed
                };
                session.verification = Some(verification);
                session.phase = GcmPhase::Done;
                Ok(Step::silent(session))
            }
            GcmPhase::Body => {
                validate::length("GCM ciphertext block", chunk.data.len(), core.block_size)?;
                session.absorb(&core.element(&chunk.data)?)?;
                let mut block = chunk.data;
                core.apply_keystream(&mut session, &mut block)?;
                Ok(Step::emit(session, block))
            }
        }
    }
}

/// Lazy GCM decryption that remembers the tag check
///
/// Yields plaintext blocks as they are recovered, before the tag has been
/// seen. [`GcmDecryptStream::verification`] is `None` until the stream has
/// been driven to its end.
pub struct GcmDecryptStream<'a, C: BlockCipher + ?Sized, S> {
    blocks: Blocks<GcmDecryptor<'a, C>, S>,
}

impl<C: BlockCipher + ?Sized, S: BlockSource> GcmDecryptStream<'_, C, S> {
    /// Tag check outcome, once the tag block has been consumed
    pub fn verification(&self) -> Option<Verification> {
        self.blocks.session().and_then(GcmSession::verification)
    }

    /// Header block read from the stream
    pub fn received_header(&self) -> Option<&[u8]> {
        self.blocks.session().and_then(GcmSession::received_header)
    }
}

impl<C: BlockCipher + ?Sized, S: BlockSource> Iterator for GcmDecryptStream<'_, C, S> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.blocks.next()
    }
}

impl<C: BlockCipher + ?Sized, S: BlockSource> core::iter::FusedIterator
    for GcmDecryptStream<'_, C, S>
{
}
