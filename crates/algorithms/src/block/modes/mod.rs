//! Block cipher modes of operation
//!
//! Each mode is a small state machine. Its per-stream state (the *session*)
//! is an explicit value: [`BlockMode::step`] consumes the current session and
//! one input chunk and hands back the next session together with whatever
//! output that chunk produced. [`Blocks`] drives a mode over a
//! [`BlockSequencer`] lazily, one pull at a time.
//!
//! Supported modes form a closed set, selectable at runtime through
//! [`ModeOfOperation`]:
//!
//! - [`Ecb`]: independent blocks, padded final block
//! - [`Cbc`]: chained blocks, IV emitted as the first output block
//! - [`Ctr`]: keystream from `nonce || counter`, no padding
//! - [`Gcm`]: counter-mode encryption plus a GF(2^n) authentication tag

use std::collections::VecDeque;
use std::iter::FusedIterator;

use gfmodes_api::{BlockCipher, Error, PaddingScheme, Result};
use gfmodes_params::modes::MAX_PADDED_BLOCKS;

use crate::sequence::{BlockSequencer, BlockSource, Chunk};

pub mod cbc;
pub mod ctr;
pub mod ecb;
pub mod gcm;
pub mod outcome;
pub mod selection;

// Re-exports
pub use cbc::{Cbc, CbcPhase, CbcSession};
pub use ctr::{Ctr, CtrSession};
pub use ecb::Ecb;
pub use gcm::{Gcm, GcmDecryptStream, GcmPhase, GcmSession};
pub use outcome::{Decrypted, Verification};
pub use selection::ModeOfOperation;

/// Session after one state-machine transition, plus the output it produced
#[derive(Debug)]
pub struct Step<S> {
    /// Session to carry into the next transition
    pub session: S,
    /// Output elements, in order (possibly none)
    pub output: Vec<Vec<u8>>,
}

impl<S> Step<S> {
    /// Transition that produced no output
    pub fn silent(session: S) -> Self {
        Self {
            session,
            output: Vec::new(),
        }
    }

    /// Transition that produced one output element
    pub fn emit(session: S, block: Vec<u8>) -> Self {
        Self {
            session,
            output: vec![block],
        }
    }
}

/// One direction (encrypt or decrypt) of a mode of operation
pub trait BlockMode {
    /// Per-stream chaining state
    type Session;

    /// Create the session for a new stream, with any output that precedes
    /// the first data block
    fn begin(&self) -> Result<Step<Self::Session>>;

    /// Process one input chunk
    fn step(&self, session: Self::Session, chunk: Chunk) -> Result<Step<Self::Session>>;

    /// Close the stream after the final chunk has been processed
    fn finish(&self, session: Self::Session) -> Result<Step<Self::Session>> {
        Ok(Step::silent(session))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriveState {
    Start,
    Running,
    Finished,
    Failed,
}

/// Lazy output of a mode driven over a block source
///
/// Yields output elements as they are produced. The first error ends the
/// sequence; dropping the iterator early simply abandons the stream.
pub struct Blocks<M: BlockMode, S> {
    mode: M,
    input: BlockSequencer<S>,
    session: Option<M::Session>,
    pending: VecDeque<Vec<u8>>,
    state: DriveState,
}

impl<M: BlockMode, S: BlockSource> Blocks<M, S> {
    /// Drive `mode` over `source`
    pub fn new(mode: M, source: S) -> Self {
        Self {
            mode,
            input: BlockSequencer::new(source),
            session: None,
            pending: VecDeque::new(),
            state: DriveState::Start,
        }
    }

    /// Current session, once the stream has started
    pub fn session(&self) -> Option<&M::Session> {
        self.session.as_ref()
    }

    /// Drain the stream into one buffer
    pub fn collect_bytes(mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for block in &mut self {
            out.extend_from_slice(&block?);
        }
        Ok(out)
    }

    fn fail(&mut self, err: Error) -> Option<Result<Vec<u8>>> {
        self.state = DriveState::Failed;
        self.session = None;
        self.pending.clear();
        Some(Err(err))
    }

    fn absorb(&mut self, step: Step<M::Session>) {
        self.session = Some(step.session);
        self.pending.extend(step.output);
    }
}

impl<M: BlockMode, S: BlockSource> Iterator for Blocks<M, S> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(block) = self.pending.pop_front() {
                return Some(Ok(block));
            }
            match self.state {
                DriveState::Finished | DriveState::Failed => return None,
                DriveState::Start => match self.mode.begin() {
                    Ok(step) => {
                        self.absorb(step);
                        self.state = DriveState::Running;
                    }
                    Err(e) => return self.fail(e),
                },
                DriveState::Running => {
                    let session = match self.session.take() {
                        Some(session) => session,
                        None => return self.fail(Error::stream("mode driver", "session lost")),
                    };
                    let result = match self.input.next() {
                        Some(Ok(chunk)) => self.mode.step(session, chunk),
                        Some(Err(e)) => return self.fail(e),
                        None => {
                            self.state = DriveState::Finished;
                            self.mode.finish(session)
                        }
                    };
                    match result {
                        Ok(step) => self.absorb(step),
                        Err(e) => return self.fail(e),
                    }
                }
            }
        }
    }
}

impl<M: BlockMode, S: BlockSource> FusedIterator for Blocks<M, S> {}

/// Validate the cipher's block size before a mode is built around it
pub(crate) fn checked_block_size<C: BlockCipher + ?Sized>(cipher: &C) -> Result<usize> {
    let block_size = cipher.block_size();
    gfmodes_api::validate::parameter(
        block_size > 0,
        "block cipher",
        "block size must be positive",
    )?;
    Ok(block_size)
}

/// Run the padding collaborator on the final chunk and check its contract
pub(crate) fn pad_final<P: PaddingScheme + ?Sized>(
    padding: &P,
    chunk: &[u8],
    block_size: usize,
    context: &'static str,
) -> Result<Vec<u8>> {
    let padded = padding.apply(chunk, block_size)?;
    let blocks = padded.len() / block_size;
    if padded.len() % block_size != 0 || blocks == 0 || blocks > MAX_PADDED_BLOCKS {
        return Err(Error::PaddingScheme {
            context,
            block_size,
            actual: padded.len(),
        });
    }
    Ok(padded)
}

/// Encrypt one block held in a fresh buffer
pub(crate) fn encrypt_copy<C: BlockCipher + ?Sized>(cipher: &C, block: &[u8]) -> Result<Vec<u8>> {
    let mut out = block.to_vec();
    cipher.encrypt_block(&mut out)?;
    Ok(out)
}

/// Decrypt one block held in a fresh buffer
pub(crate) fn decrypt_copy<C: BlockCipher + ?Sized>(cipher: &C, block: &[u8]) -> Result<Vec<u8>> {
    let mut out = block.to_vec();
    cipher.decrypt_block(&mut out)?;
    Ok(out)
}

#[cfg(test)]
pub(crate) mod testing;
