//! Size relationships used by the modes of operation

/// Bits per byte, used to derive the authenticated-mode field width
pub const BITS_PER_BYTE: usize = 8;

/// Maximum authenticated-mode header length, in blocks
pub const GCM_MAX_HEADER_BLOCKS: usize = 1;

/// Largest padded output a padding scheme may return, in blocks
pub const MAX_PADDED_BLOCKS: usize = 2;

/// Nonce length used by the counter modes for a given block size
///
/// The nonce fills the first half of the counter block, the big-endian
/// counter the second half.
pub const fn counter_mode_nonce_len(block_size: usize) -> usize {
    block_size / 2
}

/// Field width of the authenticated mode for a given block size
pub const fn gcm_field_width(block_size: usize) -> usize {
    block_size * BITS_PER_BYTE
}
