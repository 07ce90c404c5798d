//! Value types shared by the modes of operation

pub mod nonce;

pub use nonce::Nonce;
