//! Decryption results and authentication outcomes

use gfmodes_api::{Error, Result};

/// Outcome of checking an authentication tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The tag matched the recomputed tag
    Verified,
    /// The tag did not match; the plaintext is not authentic
    Failed,
    /// The mode carries no tag (ECB, CBC, CTR)
    NotApplicable,
}

impl Verification {
    /// True only for [`Verification::Verified`]
    pub fn is_verified(self) -> bool {
        self == Self::Verified
    }
}

/// Plaintext recovered by a decryption, with its authentication outcome
///
/// For the authenticated mode the plaintext is returned even when the tag
/// does not verify. Callers that read it through
/// [`Decrypted::into_unverified_parts`] without looking at the
/// [`Verification`] get neither integrity nor authenticity.
#[must_use = "the verification outcome must be checked before the plaintext is trusted"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decrypted {
    plaintext: Vec<u8>,
    verification: Verification,
    header: Option<Vec<u8>>,
}

impl Decrypted {
    pub(crate) fn new(plaintext: Vec<u8>, verification: Verification, header: Option<Vec<u8>>) -> Self {
        Self {
            plaintext,
            verification,
            header,
        }
    }

    /// Authentication outcome
    pub fn verification(&self) -> Verification {
        self.verification
    }

    /// Header block read from an authenticated stream
    pub fn header(&self) -> Option<&[u8]> {
        self.header.as_deref()
    }

    /// The plaintext, unless the tag failed to verify
    ///
    /// Modes without a tag report [`Verification::NotApplicable`] and always
    /// succeed here.
    pub fn into_verified(self) -> Result<Vec<u8>> {
        match self.verification {
            Verification::Failed => Err(Error::AuthenticationFailed { context: "GCM" }),
            Verification::Verified | Verification::NotApplicable => Ok(self.plaintext),
        }
    }

    /// Raw plaintext and the outcome, without enforcing it
    pub fn into_unverified_parts(self) -> (Vec<u8>, Verification) {
        (self.plaintext, self.verification)
    }
}
