//! Collaborator traits consumed by the modes of operation

pub mod block;
pub mod padding;

pub use block::BlockCipher;
pub use padding::PaddingScheme;
