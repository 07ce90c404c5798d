//! Binary-field arithmetic and block-cipher modes of operation
//!
//! This crate holds the engine of the gfmodes library:
//!
//! - [`field`]: elements of GF(2^n) with carry-less multiplication reduced
//!   modulo an irreducible polynomial
//! - [`sequence`]: block sources and the one-chunk-lookahead sequencer that
//!   marks the final chunk of a stream
//! - [`block::modes`]: ECB, CBC, CTR and a GCM-style authenticated mode,
//!   each an explicit session state machine driven lazily
//! - [`types`]: nonces and IVs sized to the cipher in use
//!
//! The block cipher and the padding scheme are collaborators supplied by the
//! caller through [`BlockCipher`] and [`PaddingScheme`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod block;
pub mod field;
pub mod sequence;
pub mod types;

pub use gfmodes_api::{validate, BlockCipher, Error, PaddingScheme, Result};

pub use block::modes::{Decrypted, ModeOfOperation, Verification};
pub use block::{Cbc, Ctr, Ecb, Gcm};
pub use field::{GaloisField, GfElement, IrreduciblePolynomial};
pub use sequence::{
    BlockSequencer, BlockSource, Chunk, IterBlocks, ReaderBlocks, SliceBlocks,
    TryIterBlocks,
};
pub use types::Nonce;
