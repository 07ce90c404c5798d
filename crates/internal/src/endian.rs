//! Big-endian counter encoding for the counter modes

use byteorder::{BigEndian, ByteOrder};
use gfmodes_api::{Error, Result};

/// Number of bytes needed to hold `value` in big-endian form
pub fn significant_bytes(value: u64) -> usize {
    ((64 - value.leading_zeros() as usize) + 7) / 8
}

/// Write `counter` big-endian into the whole of `out`
///
/// Widths above eight bytes are zero-extended on the left. Fails when the
/// counter no longer fits the width, which means the counter space of the
/// configured nonce/counter split is exhausted.
pub fn write_be_counter(out: &mut [u8], counter: u64) -> Result<()> {
    let width = out.len();
    if significant_bytes(counter) > width {
        return Err(Error::config(
            "counter block",
            format!("counter {} does not fit in {} bytes", counter, width),
        ));
    }
    if width == 0 {
        return Ok(());
    }
    if width >= 8 {
        let (pad, tail) = out.split_at_mut(width - 8);
        pad.iter_mut().for_each(|b| *b = 0);
        BigEndian::write_u64(tail, counter);
    } else {
        BigEndian::write_uint(out, counter, width);
    }
    Ok(())
}

/// Build a full counter block `nonce || be(counter)`
pub fn counter_block(nonce: &[u8], counter: u64, block_size: usize) -> Result<Vec<u8>> {
    if nonce.len() >= block_size {
        return Err(Error::config(
            "counter block",
            format!(
                "nonce of {} bytes leaves no room for a counter in a {}-byte block",
                nonce.len(),
                block_size
            ),
        ));
    }
    let mut block = vec![0u8; block_size];
    block[..nonce.len()].copy_from_slice(nonce);
    write_be_counter(&mut block[nonce.len()..], counter)?;
    Ok(block)
}
