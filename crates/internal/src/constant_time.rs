//! Constant-time comparison for authentication tags

use subtle::ConstantTimeEq;

/// Compare two byte slices without branching on their contents
///
/// Slices of different lengths compare unequal immediately; only the length
/// is leaked.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}
