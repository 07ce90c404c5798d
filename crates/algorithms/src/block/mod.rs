//! Block cipher modes of operation
//!
//! The cipher primitive itself is a collaborator supplied by the caller
//! through [`BlockCipher`]; this module only chains its block calls.

pub mod modes;

pub use gfmodes_api::{BlockCipher, PaddingScheme};
pub use modes::{Cbc, Ctr, Ecb, Gcm, ModeOfOperation};
