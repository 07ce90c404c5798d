//! Stub collaborators and fixtures for the gfmodes test suites
//!
//! The modes never look inside the block cipher or the padding scheme, so the
//! suites run against cheap, obviously-invertible stand-ins.

use gfmodes_api::{validate, BlockCipher, Error, PaddingScheme, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Cipher that leaves every block unchanged
#[derive(Debug, Clone, Copy)]
pub struct IdentityCipher {
    /// Block size in bytes
    pub block_size: usize,
}

impl BlockCipher for IdentityCipher {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::length("identity cipher block", block.len(), self.block_size)
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::length("identity cipher block", block.len(), self.block_size)
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Keyed byte rotation: add a per-position key byte, then rotate the block
#[derive(Debug, Clone)]
pub struct RotateCipher {
    key: Vec<u8>,
    shift: usize,
}

impl RotateCipher {
    /// One key byte per block position
    pub fn new(key: &[u8], shift: usize) -> Self {
        Self {
            key: key.to_vec(),
            shift: shift % key.len().max(1),
        }
    }

    /// Cipher with a key derived from `seed`
    pub fn seeded(block_size: usize, seed: u64) -> Self {
        use rand::RngCore;
        let mut key = vec![0u8; block_size];
        seeded_rng(seed).fill_bytes(&mut key);
        Self::new(&key, (seed as usize) % block_size.max(1))
    }
}

impl BlockCipher for RotateCipher {
    fn block_size(&self) -> usize {
        self.key.len()
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::length("rotate cipher block", block.len(), self.key.len())?;
        for (b, k) in block.iter_mut().zip(&self.key) {
            *b = b.wrapping_add(*k);
        }
        block.rotate_left(self.shift);
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::length("rotate cipher block", block.len(), self.key.len())?;
        block.rotate_right(self.shift);
        for (b, k) in block.iter_mut().zip(&self.key) {
            *b = b.wrapping_sub(*k);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "rotate"
    }
}

/// PKCS#7 padding
#[derive(Debug, Clone, Copy, Default)]
pub struct Pkcs7;

impl PaddingScheme for Pkcs7 {
    fn apply(&self, chunk: &[u8], block_size: usize) -> Result<Vec<u8>> {
        validate::parameter(
            (1..=255).contains(&block_size),
            "PKCS#7",
            "block size must fit in one byte",
        )?;
        let pad = block_size - chunk.len() % block_size;
        let mut out = chunk.to_vec();
        out.resize(chunk.len() + pad, pad as u8);
        Ok(out)
    }

    fn remove(&self, block: &[u8], block_size: usize) -> Result<Vec<u8>> {
        let pad = block.last().copied().unwrap_or(0) as usize;
        if pad == 0 || pad > block_size || pad > block.len() {
            return Err(Error::Padding {
                context: "PKCS#7",
                message: format!("invalid pad length {}", pad),
            });
        }
        let (data, padding) = block.split_at(block.len() - pad);
        if padding.iter().any(|&b| b as usize != pad) {
            return Err(Error::Padding {
                context: "PKCS#7",
                message: "inconsistent pad bytes".into(),
            });
        }
        Ok(data.to_vec())
    }

    fn name(&self) -> &'static str {
        "PKCS#7"
    }
}

/// Deterministic RNG for reproducible nonces
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Decode a hex fixture, panicking on malformed input
pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap_or_else(|e| panic!("bad hex fixture {:?}: {}", s, e))
}
