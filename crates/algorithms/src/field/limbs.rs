//! Little-endian u64 limb helpers for binary polynomials
//!
//! Bit `i` of a limb vector is the coefficient of x^i: limb `i / 64`,
//! bit `i % 64`.

/// Number of limbs needed to hold `bits` coefficients
#[inline]
pub(crate) fn limbs_for(bits: usize) -> usize {
    (bits + 63) / 64
}

/// Coefficient of x^i (zero beyond the vector)
#[inline]
pub(crate) fn get_bit(limbs: &[u64], i: usize) -> bool {
    limbs
        .get(i / 64)
        .map_or(false, |w| (w >> (i % 64)) & 1 == 1)
}

/// Set the coefficient of x^i to one
#[inline]
pub(crate) fn set_bit(limbs: &mut [u64], i: usize) {
    if let Some(w) = limbs.get_mut(i / 64) {
        *w |= 1u64 << (i % 64);
    }
}

/// Degree + 1 of the polynomial, or 0 for the zero polynomial
pub(crate) fn bit_len(limbs: &[u64]) -> usize {
    for (idx, &w) in limbs.iter().enumerate().rev() {
        if w != 0 {
            return idx * 64 + (64 - w.leading_zeros() as usize);
        }
    }
    0
}

/// `dst ^= src * x^shift`, dropping anything past the end of `dst`
pub(crate) fn xor_shifted(dst: &mut [u64], src: &[u64], shift: usize) {
    let (limb_shift, bit_shift) = (shift / 64, shift % 64);
    for (j, &w) in src.iter().enumerate() {
        if w == 0 {
            continue;
        }
        if let Some(d) = dst.get_mut(j + limb_shift) {
            *d ^= w << bit_shift;
        }
        if bit_shift != 0 {
            if let Some(d) = dst.get_mut(j + limb_shift + 1) {
                *d ^= w >> (64 - bit_shift);
            }
        }
    }
}

/// Clear every coefficient of degree `width` and above
pub(crate) fn mask_to(limbs: &mut [u64], width: usize) {
    for (idx, w) in limbs.iter_mut().enumerate() {
        let lo = idx * 64;
        if lo >= width {
            *w = 0;
        } else if width - lo < 64 {
            *w &= (1u64 << (width - lo)) - 1;
        }
    }
}

/// Carry-less product of two `width`-bit polynomials, `2 * width` bits wide
///
/// For every set coefficient x^i of `b`, `a * x^i` is accumulated with XOR,
/// so no carries ever propagate between coefficients.
pub(crate) fn clmul(a: &[u64], b: &[u64], width: usize) -> Vec<u64> {
    let mut wide = vec![0u64; limbs_for(2 * width)];
    for i in 0..width {
        if get_bit(b, i) {
            xor_shifted(&mut wide, a, i);
        }
    }
    wide
}

/// Reduce a `2 * width`-bit product modulo the dense `width + 1`-bit modulus
///
/// Walks the excess coefficients from x^(2*width - 1) down to x^width and
/// cancels each set one with the modulus aligned under it. Each step only
/// touches coefficients at or below the one it clears, so exactly `width`
/// steps leave the upper half empty.
pub(crate) fn reduce(wide: &mut [u64], modulus: &[u64], width: usize) {
    for pos in (width..2 * width).rev() {
        if get_bit(wide, pos) {
            xor_shifted(wide, modulus, pos - width);
        }
    }
}

/// True when coefficients x^width .. x^(2*width - 1) are all zero
pub(crate) fn upper_half_clear(wide: &[u64], width: usize) -> bool {
    (width..2 * width).all(|i| !get_bit(wide, i))
}
