//! Nonces and initialization vectors
//!
//! A [`Nonce`] is sized at runtime because its length follows the block size
//! of whichever cipher the mode is built around: a full block for a CBC IV,
//! half a block for the counter modes.

use core::fmt;
use core::ops::Deref;

use gfmodes_api::{validate, Result};
use gfmodes_params::modes::counter_mode_nonce_len;
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Per-stream nonce or IV bytes
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Nonce {
    data: Vec<u8>,
}

impl Nonce {
    /// Wrap existing bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Copy from a slice that must be exactly `len` bytes
    pub fn from_slice(slice: &[u8], len: usize) -> Result<Self> {
        validate::length("Nonce", slice.len(), len)?;
        Ok(Self {
            data: slice.to_vec(),
        })
    }

    /// Fresh random nonce of `len` bytes
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R, len: usize) -> Self {
        let mut data = vec![0u8; len];
        rng.fill_bytes(&mut data);
        Self { data }
    }

    /// Random nonce of the length the counter modes use for `block_size`
    pub fn for_counter_mode<R: RngCore + CryptoRng>(rng: &mut R, block_size: usize) -> Self {
        Self::random(rng, counter_mode_nonce_len(block_size))
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero-length nonce
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl AsRef<[u8]> for Nonce {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Deref for Nonce {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl PartialEq for Nonce {
    fn eq(&self, other: &Self) -> bool {
        self.data.ct_eq(&other.data).into()
    }
}

impl Eq for Nonce {}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({} bytes)", self.data.len())
    }
}
