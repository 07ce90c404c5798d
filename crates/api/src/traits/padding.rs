//! The padding collaborator used by ECB and CBC

use crate::error::Result;

/// A block padding scheme
///
/// `apply` receives the final (possibly empty, possibly full) plaintext
/// chunk and must return one or two whole blocks. `remove` receives the
/// decrypted final block and returns the original bytes. For every input
/// accepted by `apply`, `remove(apply(x)) == x`.
pub trait PaddingScheme {
    /// Pad the final chunk out to one or two blocks
    fn apply(&self, chunk: &[u8], block_size: usize) -> Result<Vec<u8>>;

    /// Strip padding from the decrypted final block
    fn remove(&self, block: &[u8], block_size: usize) -> Result<Vec<u8>>;

    /// Name used in diagnostics
    fn name(&self) -> &'static str {
        "padding scheme"
    }
}

impl<P: PaddingScheme + ?Sized> PaddingScheme for &P {
    fn apply(&self, chunk: &[u8], block_size: usize) -> Result<Vec<u8>> {
        (**self).apply(chunk, block_size)
    }

    fn remove(&self, block: &[u8], block_size: usize) -> Result<Vec<u8>> {
        (**self).remove(block, block_size)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
