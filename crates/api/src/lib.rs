//! Public API traits and types for the gfmodes library
//!
//! This crate provides the public API surface shared by every gfmodes crate:
//! the error taxonomy, validation helpers, and the two collaborator traits
//! (block-cipher primitive and padding scheme) that the modes consume.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{validate, Error, Result, ResultExt};

// Re-export all traits from the traits module
pub use traits::{BlockCipher, PaddingScheme};
