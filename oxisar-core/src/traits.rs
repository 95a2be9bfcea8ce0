//! Core traits shared by the codec crates.

/// A block cipher applied in place over whole buffers.
///
/// Implementations process only the longest prefix that is a multiple of
/// [`BlockCipher::BLOCK_SIZE`]; any trailing partial block is left as is.
pub trait BlockCipher {
    /// Block size in bytes.
    const BLOCK_SIZE: usize;

    /// Encrypt `buffer` in place.
    fn encrypt(&self, buffer: &mut [u8]);

    /// Decrypt `buffer` in place.
    fn decrypt(&self, buffer: &mut [u8]);

    /// Length of the prefix of `len` bytes that the cipher touches.
    fn aligned_len(len: usize) -> usize {
        len - len % Self::BLOCK_SIZE
    }
}
