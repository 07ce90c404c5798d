//! Runtime selection among the supported modes
//!
//! [`ModeOfOperation`] is a closed set: each variant carries the inputs its
//! mode needs, and every operation validates them against the cipher before
//! any block is processed.

use gfmodes_api::{BlockCipher, PaddingScheme, Result};

use super::{Cbc, Ctr, Decrypted, Ecb, Gcm, Verification};
use crate::sequence::{BlockSource, SliceBlocks};

/// Boxed lazy output of a runtime-selected mode
pub type BoxedBlocks<'a> = Box<dyn Iterator<Item = Result<Vec<u8>>> + 'a>;

/// A mode of operation together with its per-stream inputs
#[derive(Clone, Copy)]
pub enum ModeOfOperation<'p> {
    /// Electronic codebook with a padded final block
    Ecb {
        /// Padding collaborator for the final block
        padding: &'p dyn PaddingScheme,
    },
    /// Cipher block chaining; the IV leads the ciphertext
    Cbc {
        /// Initialization vector, exactly one block
        iv: &'p [u8],
        /// Padding collaborator for the final block
        padding: &'p dyn PaddingScheme,
    },
    /// Counter mode, no padding
    Ctr {
        /// Nonce; the counter fills the rest of the block
        nonce: &'p [u8],
    },
    /// Authenticated counter mode with a GF(2^n) tag
    Gcm {
        /// Nonce of half a block
        nonce: &'p [u8],
        /// Authenticated header of at most one block
        header: &'p [u8],
    },
}

impl<'p> ModeOfOperation<'p> {
    /// Short name of the mode
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ecb { .. } => "ECB",
            Self::Cbc { .. } => "CBC",
            Self::Ctr { .. } => "CTR",
            Self::Gcm { .. } => "GCM",
        }
    }

    /// True for modes whose decryption reports a tag check
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Gcm { .. })
    }

    /// Lazily encrypt `source` under `cipher`
    pub fn encrypt_blocks<'a, C, S>(&self, cipher: &'a C, source: S) -> Result<BoxedBlocks<'a>>
    where
        'p: 'a,
        C: BlockCipher + ?Sized + 'a,
        S: BlockSource + 'a,
    {
        Ok(match *self {
            Self::Ecb { padding } => Box::new(Ecb::new(cipher, padding)?.encrypt(source)),
            Self::Cbc { iv, padding } => Box::new(Cbc::new(cipher, iv, padding)?.encrypt(source)),
            Self::Ctr { nonce } => Box::new(Ctr::new(cipher, nonce)?.encrypt(source)),
            Self::Gcm { nonce, header } => {
                Box::new(Gcm::new(cipher, nonce, header)?.encrypt(source))
            }
        })
    }

    /// Encrypt a whole buffer
    pub fn encrypt_to_vec<C>(&self, cipher: &C, plaintext: &[u8]) -> Result<Vec<u8>>
    where
        C: BlockCipher + ?Sized,
    {
        let source = SliceBlocks::new(plaintext, cipher.block_size())?;
        let mut out = Vec::new();
        for block in self.encrypt_blocks(cipher, source)? {
            out.extend_from_slice(&block?);
        }
        Ok(out)
    }

    /// Drain `source` through the decrypting direction
    ///
    /// Only [`ModeOfOperation::Gcm`] can report [`Verification::Failed`];
    /// the other modes report [`Verification::NotApplicable`].
    pub fn decrypt_source<C, S>(&self, cipher: &C, source: S) -> Result<Decrypted>
    where
        C: BlockCipher + ?Sized,
        S: BlockSource,
    {
        let plaintext = match *self {
            Self::Ecb { padding } => Ecb::new(cipher, padding)?.decrypt(source).collect_bytes()?,
            Self::Cbc { iv, padding } => {
                Cbc::new(cipher, iv, padding)?.decrypt(source).collect_bytes()?
            }
            Self::Ctr { nonce } => Ctr::new(cipher, nonce)?.decrypt(source).collect_bytes()?,
            Self::Gcm { nonce, header } => {
                return Gcm::new(cipher, nonce, header)?.decrypt_source(source)
            }
        };
        Ok(Decrypted::new(plaintext, Verification::NotApplicable, None))
    }

    /// Decrypt a whole buffer
    pub fn decrypt_to_vec<C>(&self, cipher: &C, ciphertext: &[u8]) -> Result<Decrypted>
    where
        C: BlockCipher + ?Sized,
    {
        self.decrypt_source(cipher, SliceBlocks::new(ciphertext, cipher.block_size())?)
    }
}

impl core::fmt::Debug for ModeOfOperation<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ecb { padding } => f.debug_struct("Ecb").field("padding", &padding.name()).finish(),
            Self::Cbc { padding, .. } => f
                .debug_struct("Cbc")
                .field("padding", &padding.name())
                .finish_non_exhaustive(),
            Self::Ctr { nonce } => f.debug_struct("Ctr").field("nonce_len", &nonce.len()).finish(),
            Self::Gcm { nonce, header } => f
                .debug_struct("Gcm")
                .field("nonce_len", &nonce.len())
                .field("header_len", &header.len())
                .finish(),
        }
    }
}
