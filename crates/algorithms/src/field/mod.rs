//! Arithmetic in binary extension fields GF(2^n)
//!
//! Elements are polynomials of degree < n over GF(2), stored as bit vectors.
//! Addition is XOR; multiplication is carry-less polynomial multiplication
//! followed by reduction modulo an irreducible polynomial of degree n.
//!
//! Designated polynomials exist for n in {8, 64, 128, 256, 512}; any other
//! width works with a caller-supplied [`IrreduciblePolynomial`].
//!
//! ```
//! use gfmodes_algorithms::field::GaloisField;
//!
//! let gf = GaloisField::standard(8).unwrap();
//! let a = gf.from_u128(0x02).unwrap();
//! let b = gf.from_u128(0x03).unwrap();
//! assert_eq!(a.mult(&b).unwrap().to_u128().unwrap(), 0x06);
//! ```
//!
//! This engine favours clarity over speed and makes no constant-time claims.

mod element;
mod limbs;
mod polynomial;

pub use element::{GaloisField, GfElement};
pub use polynomial::IrreduciblePolynomial;
