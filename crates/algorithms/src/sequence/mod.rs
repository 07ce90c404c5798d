//! Block sequencing with end-of-stream detection
//!
//! A [`BlockSource`] produces raw chunks (normally one block each) from a
//! buffer, a reader, or any other producer. [`BlockSequencer`] wraps a source
//! and tags each chunk with `is_last`, holding exactly one chunk of lookahead
//! so the final chunk is recognised before it is handed out. The modes decide
//! what the final chunk means (padding, truncation, tag).

use core::iter::FusedIterator;
use core::slice;
use std::io::{ErrorKind, Read};

use gfmodes_api::{validate, Error, Result, ResultExt};
use zeroize::Zeroize;

/// One chunk of input, tagged with whether it is the final one
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct Chunk {
    /// Chunk bytes; a full block except possibly for the final chunk
    pub data: Vec<u8>,
    /// True exactly once per sequence, on the final chunk
    pub is_last: bool,
}

/// A single-pass producer of byte chunks
pub trait BlockSource {
    /// Next chunk, or `None` once the source is exhausted
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>>;
}

impl<S: BlockSource + ?Sized> BlockSource for &mut S {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        (**self).next_chunk()
    }
}

/// Block-sized chunks of an in-memory buffer
pub struct SliceBlocks<'a> {
    chunks: slice::Chunks<'a, u8>,
}

impl<'a> SliceBlocks<'a> {
    /// Split `data` into `block_size` chunks (the last may be shorter)
    pub fn new(data: &'a [u8], block_size: usize) -> Result<Self> {
        validate::parameter(block_size > 0, "slice blocks", "block size must be positive")?;
        Ok(Self {
            chunks: data.chunks(block_size),
        })
    }
}

impl BlockSource for SliceBlocks<'_> {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.chunks.next().map(<[u8]>::to_vec))
    }
}

/// Block-sized chunks read from any [`Read`] implementation
///
/// Short reads are retried until a block is full or the reader reports end
/// of input. Reader failures surface as [`Error::Stream`].
pub struct ReaderBlocks<R> {
    reader: R,
    block_size: usize,
    exhausted: bool,
}

impl<R: Read> ReaderBlocks<R> {
    /// Read `block_size` chunks from `reader`
    pub fn new(reader: R, block_size: usize) -> Result<Self> {
        validate::parameter(block_size > 0, "reader blocks", "block size must be positive")?;
        Ok(Self {
            reader,
            block_size,
            exhausted: false,
        })
    }
}

impl<R: Read> BlockSource for ReaderBlocks<R> {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        if self.exhausted {
            return Ok(None);
        }
        let mut buf = vec![0u8; self.block_size];
        let mut filled = 0;
        while filled < self.block_size {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.exhausted = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.exhausted = true;
                    return Err(Error::stream("block reader", e.to_string()));
                }
            }
        }
        if filled == 0 {
            return Ok(None);
        }
        buf.truncate(filled);
        Ok(Some(buf))
    }
}

/// Chunks taken from an iterator of owned buffers
pub struct IterBlocks<I> {
    inner: I,
}

impl<I: Iterator<Item = Vec<u8>>> IterBlocks<I> {
    /// Wrap an iterator of chunks
    pub fn new<T: IntoIterator<IntoIter = I>>(chunks: T) -> Self {
        Self {
            inner: chunks.into_iter(),
        }
    }
}

impl<I: Iterator<Item = Vec<u8>>> BlockSource for IterBlocks<I> {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.inner.next())
    }
}

/// Chunks taken from an iterator of fallible reads
pub struct TryIterBlocks<I> {
    inner: I,
}

impl<I: Iterator<Item = Result<Vec<u8>>>> TryIterBlocks<I> {
    /// Wrap an iterator of chunk results
    pub fn new<T: IntoIterator<IntoIter = I>>(chunks: T) -> Self {
        Self {
            inner: chunks.into_iter(),
        }
    }
}

impl<I: Iterator<Item = Result<Vec<u8>>>> BlockSource for TryIterBlocks<I> {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        self.inner.next().transpose().with_context("block source")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequencerState {
    Fresh,
    Running,
    Done,
}

/// Lazy `(chunk, is_last)` sequence over a [`BlockSource`]
///
/// An empty source produces a single empty final chunk, so padding modes
/// still have a final chunk to pad. After the final chunk, or after the
/// first source error, the sequence is exhausted.
pub struct BlockSequencer<S> {
    source: S,
    lookahead: Option<Vec<u8>>,
    state: SequencerState,
}

impl<S: BlockSource> BlockSequencer<S> {
    /// Wrap a block source
    pub fn new(source: S) -> Self {
        Self {
            source,
            lookahead: None,
            state: SequencerState::Fresh,
        }
    }

    fn fail(&mut self, err: Error) -> Option<Result<Chunk>> {
        self.state = SequencerState::Done;
        if let Some(mut pending) = self.lookahead.take() {
            pending.zeroize();
        }
        Some(Err(err))
    }

    fn advance(&mut self) -> Option<Result<Chunk>> {
        let current = match self.lookahead.take() {
            Some(current) => current,
            None => {
                self.state = SequencerState::Done;
                return None;
            }
        };
        match self.source.next_chunk() {
            Ok(Some(next)) => {
                self.lookahead = Some(next);
                Some(Ok(Chunk {
                    data: current,
                    is_last: false,
                }))
            }
            Ok(None) => {
                self.state = SequencerState::Done;
                Some(Ok(Chunk {
                    data: current,
                    is_last: true,
                }))
            }
            Err(e) => self.fail(e),
        }
    }
}

impl<S: BlockSource> Iterator for BlockSequencer<S> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            SequencerState::Done => None,
            SequencerState::Running => self.advance(),
            SequencerState::Fresh => {
                self.state = SequencerState::Running;
                match self.source.next_chunk() {
                    Ok(Some(first)) => {
                        self.lookahead = Some(first);
                        self.advance()
                    }
                    Ok(None) => {
                        self.state = SequencerState::Done;
                        Some(Ok(Chunk {
                            data: Vec::new(),
                            is_last: true,
                        }))
                    }
                    Err(e) => self.fail(e),
                }
            }
        }
    }
}

impl<S: BlockSource> FusedIterator for BlockSequencer<S> {}
