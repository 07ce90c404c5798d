//! Field handles and elements of GF(2^n)

use core::fmt;
use std::sync::Arc;

use gfmodes_api::{Error, Result};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::limbs::{self, bit_len, get_bit, limbs_for, mask_to, xor_shifted};
use super::polynomial::IrreduciblePolynomial;

#[derive(Debug, PartialEq, Eq)]
struct FieldInner {
    width: usize,
    polynomial: IrreduciblePolynomial,
    dense_modulus: Vec<u64>,
}

/// A binary extension field GF(2^n) with a fixed reduction polynomial
///
/// Cloning is cheap; all elements minted from one field share its modulus.
#[derive(Clone, PartialEq, Eq)]
pub struct GaloisField {
    inner: Arc<FieldInner>,
}

impl GaloisField {
    /// GF(2^width) with the designated polynomial for that width
    pub fn standard(width: usize) -> Result<Self> {
        Self::with_polynomial(width, IrreduciblePolynomial::standard(width)?)
    }

    /// GF(2^width) with a caller-supplied polynomial of degree `width`
    pub fn with_polynomial(width: usize, polynomial: IrreduciblePolynomial) -> Result<Self> {
        if polynomial.degree() != width {
            return Err(Error::config(
                "Galois field",
                format!(
                    "polynomial of degree {} cannot reduce a {}-bit field",
                    polynomial.degree(),
                    width
                ),
            ));
        }
        let dense_modulus = polynomial.dense();
        Ok(Self {
            inner: Arc::new(FieldInner {
                width,
                polynomial,
                dense_modulus,
            }),
        })
    }

    /// Bit-width n of the field
    pub fn width(&self) -> usize {
        self.inner.width
    }

    /// Reduction polynomial
    pub fn polynomial(&self) -> &IrreduciblePolynomial {
        &self.inner.polynomial
    }

    /// Bytes needed to hold one element
    pub fn byte_len(&self) -> usize {
        (self.width() + 7) / 8
    }

    fn element(&self, limbs: Vec<u64>) -> GfElement {
        GfElement {
            limbs,
            field: self.clone(),
        }
    }

    fn range_error(&self, required: usize) -> Error {
        Error::Range {
            context: "field element",
            width: self.width(),
            required,
        }
    }

    /// The additive identity
    pub fn zero(&self) -> GfElement {
        self.element(vec![0u64; limbs_for(self.width())])
    }

    /// The multiplicative identity
    pub fn one(&self) -> GfElement {
        let mut e = self.zero();
        limbs::set_bit(&mut e.limbs, 0);
        e
    }

    /// Element whose integer value is `value`
    pub fn from_u128(&self, value: u128) -> Result<GfElement> {
        self.from_be_bytes(&value.to_be_bytes())
    }

    /// Element whose integer value is `value * 2^shift`
    pub fn from_u64_shifted(&self, value: u64, shift: usize) -> Result<GfElement> {
        let mut e = self.zero();
        if value == 0 {
            return Ok(e);
        }
        let significant = 64 - value.leading_zeros() as usize;
        let required = shift
            .checked_add(significant)
            .ok_or_else(|| self.range_error(usize::MAX))?;
        if required > self.width() {
            return Err(self.range_error(required));
        }
        xor_shifted(&mut e.limbs, &[value], shift);
        Ok(e)
    }

    /// Element from a big-endian integer of any byte length
    ///
    /// Leading zero bytes are ignored; fails with [`Error::Range`] when the
    /// integer needs more than `width` bits.
    pub fn from_be_bytes(&self, bytes: &[u8]) -> Result<GfElement> {
        let mut e = self.zero();
        let n = bytes.len();
        let required = match bytes.iter().position(|&b| b != 0) {
            Some(first) => (n - first - 1) * 8 + (8 - bytes[first].leading_zeros() as usize),
            None => return Ok(e),
        };
        if required > self.width() {
            return Err(self.range_error(required));
        }
        for (k, &byte) in bytes.iter().rev().enumerate() {
            if byte != 0 {
                e.limbs[k / 8] |= (byte as u64) << ((k % 8) * 8);
            }
        }
        Ok(e)
    }

    /// Element from a little-endian integer of any byte length
    pub fn from_le_bytes(&self, bytes: &[u8]) -> Result<GfElement> {
        let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
        self.from_be_bytes(&reversed)
    }
}

impl fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GaloisField(GF(2^{}) mod {:?})",
            self.width(),
            self.polynomial().exponents()
        )
    }
}

/// An immutable element of GF(2^n)
///
/// Coefficient i (the coefficient of x^i) is bit i of the element's integer
/// value. Elements of different fields never interact: [`GfElement::xor`]
/// and [`GfElement::mult`] fail with [`Error::WidthMismatch`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct GfElement {
    limbs: Vec<u64>,
    #[zeroize(skip)]
    field: GaloisField,
}

impl GfElement {
    /// Bit-width of the element
    pub fn width(&self) -> usize {
        self.field.width()
    }

    /// Field the element belongs to
    pub fn field(&self) -> &GaloisField {
        &self.field
    }

    /// Coefficient of x^i, counting from the least-significant end
    pub fn bit(&self, i: usize) -> bool {
        i < self.width() && get_bit(&self.limbs, i)
    }

    /// All n coefficients, most-significant first
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.width()).rev().map(move |i| get_bit(&self.limbs, i))
    }

    /// True for the additive identity
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&w| w == 0)
    }

    /// Integer value, big-endian, `ceil(n / 8)` bytes
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let len = self.field.byte_len();
        let mut out = vec![0u8; len];
        for k in 0..len {
            out[len - 1 - k] = (self.limbs[k / 8] >> ((k % 8) * 8)) as u8;
        }
        out
    }

    /// Integer value, little-endian, `ceil(n / 8)` bytes
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = self.to_be_bytes();
        out.reverse();
        out
    }

    /// Integer value, when it fits in 128 bits
    pub fn to_u128(&self) -> Result<u128> {
        let required = bit_len(&self.limbs);
        if required > 128 {
            return Err(Error::Range {
                context: "field element to u128",
                width: 128,
                required,
            });
        }
        let lo = self.limbs.first().copied().unwrap_or(0) as u128;
        let hi = self.limbs.get(1).copied().unwrap_or(0) as u128;
        Ok((hi << 64) | lo)
    }

    fn check_same_field(&self, other: &Self) -> Result<()> {
        if self.field != other.field {
            return Err(Error::WidthMismatch {
                left: self.width(),
                right: other.width(),
            });
        }
        Ok(())
    }

    /// Field addition (bitwise XOR)
    pub fn xor(&self, other: &Self) -> Result<Self> {
        self.check_same_field(other)?;
        let limbs = self
            .limbs
            .iter()
            .zip(&other.limbs)
            .map(|(a, b)| a ^ b)
            .collect();
        Ok(self.field.element(limbs))
    }

    /// Field multiplication: carry-less product reduced by the field polynomial
    ///
    /// # Panics
    ///
    /// Panics if reduction leaves any of the upper n bits set. That can only
    /// happen through a defect in the engine itself.
    pub fn mult(&self, other: &Self) -> Result<Self> {
        self.check_same_field(other)?;
        let width = self.width();
        let wide = self.reduced_product(other);
        assert!(
            limbs::upper_half_clear(&wide, width),
            "GF(2^{}) reduction left bits above the field width",
            width
        );

        let mut out = wide[..limbs_for(width)].to_vec();
        mask_to(&mut out, width);
        Ok(self.field.element(out))
    }

    /// The full `2n`-bit intermediate after reduction, before truncation
    pub(crate) fn reduced_product(&self, other: &Self) -> Vec<u64> {
        let width = self.width();
        let mut wide = limbs::clmul(&self.limbs, &other.limbs, width);
        limbs::reduce(&mut wide, &self.field.inner.dense_modulus, width);
        wide
    }
}

impl ConstantTimeEq for GfElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        if self.field != other.field {
            return Choice::from(0);
        }
        self.limbs.as_slice().ct_eq(other.limbs.as_slice())
    }
}

impl PartialEq for GfElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for GfElement {}

impl fmt::Debug for GfElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GfElement(GF(2^{}): 0x", self.width())?;
        for b in self.to_be_bytes() {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}
