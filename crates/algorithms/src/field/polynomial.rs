//! Sparse irreducible polynomials over GF(2)

use gfmodes_api::{Error, Result};
use gfmodes_params::field::{irreducible_exponents, MAX_POLYNOMIAL_DEGREE};

use super::limbs::{limbs_for, set_bit};

/// An irreducible polynomial stored as its set of exponents
///
/// Exponents are kept sorted highest first with duplicates removed, so
/// `[8, 4, 3, 1, 0]` is x^8 + x^4 + x^3 + x + 1. Irreducibility is never
/// checked; the polynomial is configuration supplied by the caller or by the
/// [`gfmodes_params::field`] table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IrreduciblePolynomial {
    exponents: Vec<usize>,
}

impl IrreduciblePolynomial {
    /// The designated polynomial for one of the supported widths
    pub fn standard(width: usize) -> Result<Self> {
        let exps = irreducible_exponents(width).ok_or_else(|| {
            Error::config(
                "irreducible polynomial",
                format!("no designated polynomial for GF(2^{})", width),
            )
        })?;
        Self::from_exponents(exps)
    }

    /// A caller-supplied polynomial
    ///
    /// The polynomial must have positive degree no larger than
    /// [`MAX_POLYNOMIAL_DEGREE`].
    pub fn from_exponents(exponents: &[usize]) -> Result<Self> {
        let mut exponents = exponents.to_vec();
        exponents.sort_unstable_by(|a, b| b.cmp(a));
        exponents.dedup();

        match exponents.first() {
            Some(&degree) if degree > MAX_POLYNOMIAL_DEGREE => Err(Error::config(
                "irreducible polynomial",
                format!(
                    "degree {} exceeds the supported maximum of {}",
                    degree, MAX_POLYNOMIAL_DEGREE
                ),
            )),
            Some(&degree) if degree > 0 => Ok(Self { exponents }),
            _ => Err(Error::config(
                "irreducible polynomial",
                "polynomial must have positive degree",
            )),
        }
    }

    /// Highest exponent
    pub fn degree(&self) -> usize {
        self.exponents[0]
    }

    /// Exponents, highest first
    pub fn exponents(&self) -> &[usize] {
        &self.exponents
    }

    /// Dense `degree + 1`-bit form used by the reduction step
    pub(crate) fn dense(&self) -> Vec<u64> {
        let mut limbs = vec![0u64; limbs_for(self.degree() + 1)];
        for &e in &self.exponents {
            set_bit(&mut limbs, e);
        }
        limbs
    }
}
