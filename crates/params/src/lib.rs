//! Constant values for gfmodes
//!
//! This crate holds configuration data shared by the field engine and the
//! modes: the irreducible-polynomial table and the block/nonce size rules.

#![no_std]

pub mod field;
pub mod modes;
