//! Irreducible polynomials for the binary extension fields GF(2^n)
//!
//! Each polynomial is stored as its sparse set of exponents, highest first,
//! with `0` standing for the constant term. The choices follow the table of
//! low-weight irreducible trinomials and pentanomials published by Seroussi
//! (HP Labs, HPL-98-135).

/// x^8 + x^4 + x^3 + x + 1 (the AES field polynomial)
pub const GF_2_8: &[usize] = &[8, 4, 3, 1, 0];

/// x^64 + x^4 + x^3 + x + 1
pub const GF_2_64: &[usize] = &[64, 4, 3, 1, 0];

/// x^128 + x^7 + x^2 + x + 1 (the GHASH field polynomial)
pub const GF_2_128: &[usize] = &[128, 7, 2, 1, 0];

/// x^256 + x^10 + x^5 + x^2 + 1
pub const GF_2_256: &[usize] = &[256, 10, 5, 2, 0];

/// x^512 + x^8 + x^5 + x^2 + 1
pub const GF_2_512: &[usize] = &[512, 8, 5, 2, 0];

/// Field widths with a designated irreducible polynomial
pub const SUPPORTED_FIELD_WIDTHS: [usize; 5] = [8, 64, 128, 256, 512];

/// Largest degree accepted for a caller-supplied polynomial
pub const MAX_POLYNOMIAL_DEGREE: usize = 1 << 16;

/// Width to exponent-set table
pub const IRREDUCIBLE_POLYNOMIALS: [(usize, &[usize]); 5] = [
    (8, GF_2_8),
    (64, GF_2_64),
    (128, GF_2_128),
    (256, GF_2_256),
    (512, GF_2_512),
];

/// Look up the designated polynomial for a field width
pub fn irreducible_exponents(width: usize) -> Option<&'static [usize]> {
    IRREDUCIBLE_POLYNOMIALS
        .iter()
        .find(|(w, _)| *w == width)
        .map(|(_, exps)| *exps)
}
