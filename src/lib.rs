//! # gfmodes
//!
//! Block-cipher modes of operation (ECB, CBC, CTR and a GCM-style
//! authenticated mode) over a caller-supplied block cipher, together with the
//! GF(2^n) arithmetic engine behind the authentication tag.
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`api`]: errors, validation helpers, and the `BlockCipher` /
//!   `PaddingScheme` collaborator traits
//! - [`params`]: irreducible polynomials and size relationships
//! - [`internal`]: byte-level helpers shared by the modes
//! - [`algorithms`]: the field engine, block sequencing, and the modes
//!
//! ## Example
//!
//! ```
//! use gfmodes::prelude::*;
//!
//! struct Xor8;
//!
//! impl BlockCipher for Xor8 {
//!     fn block_size(&self) -> usize {
//!         8
//!     }
//!     fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
//!         block.iter_mut().for_each(|b| *b ^= 0x5a);
//!         Ok(())
//!     }
//!     fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
//!         self.encrypt_block(block)
//!     }
//! }
//!
//! let mode = ModeOfOperation::Gcm { nonce: &[1, 2, 3, 4], header: b"v1" };
//! let framed = mode.encrypt_to_vec(&Xor8, &[0u8; 16]).unwrap();
//! let opened = mode.decrypt_to_vec(&Xor8, &framed).unwrap();
//! assert_eq!(opened.verification(), Verification::Verified);
//! assert_eq!(opened.into_verified().unwrap(), vec![0u8; 16]);
//! ```

#![forbid(unsafe_code)]

pub use gfmodes_algorithms as algorithms;
pub use gfmodes_api as api;
pub use gfmodes_internal as internal;
pub use gfmodes_params as params;

#[cfg(feature = "rand")]
pub use rand;

/// Common imports for gfmodes users
pub mod prelude {
    // Errors and collaborator traits
    pub use crate::api::{BlockCipher, Error, PaddingScheme, Result, ResultExt};

    // Modes and their outcomes
    pub use crate::algorithms::block::modes::{BlockMode, Blocks, Step};
    pub use crate::algorithms::{
        Cbc, Ctr, Decrypted, Ecb, Gcm, ModeOfOperation, Nonce, Verification,
    };

    // Field engine
    pub use crate::algorithms::{GaloisField, GfElement, IrreduciblePolynomial};

    // Block sources
    pub use crate::algorithms::{BlockSource, IterBlocks, ReaderBlocks, SliceBlocks};

    pub use zeroize::Zeroizing;
}
