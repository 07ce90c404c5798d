//! Internal utilities for the gfmodes library
//!
//! Byte-level helpers shared by the modes: XOR, big-endian counter blocks,
//! and constant-time comparison. Not part of the stable API.

#![forbid(unsafe_code)]

pub mod constant_time;
pub mod endian;
pub mod xor;
