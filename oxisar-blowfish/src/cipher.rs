//! Blowfish block cipher with little-endian block layout.
//!
//! Symbol Art payloads are wrapped with Blowfish, but each 8-byte block is
//! read as two little-endian words and written back with the halves
//! swapped (R first, then L). The key schedule packs the key into
//! big-endian words and ignores a trailing partial word.
//!
//! ## Example
//!
//! ```rust
//! use oxisar_blowfish::Blowfish;
//!
//! let cipher = Blowfish::new(&[0x09, 0x07, 0xC1, 0x2B]);
//! let mut data = *b"symbol art block";
//! cipher.encrypt(&mut data);
//! cipher.decrypt(&mut data);
//! assert_eq!(&data, b"symbol art block");
//! ```

use crate::tables::{P_INIT, P_LEN, S_INIT, S_LEN};
use log::trace;
use oxisar_core::BlockCipher;
use std::fmt;

/// Block size in bytes.
pub const BLOCK_SIZE: usize = 8;

/// Number of Feistel rounds.
const ROUNDS: usize = 16;

/// Blowfish cipher state.
///
/// The subkeys are derived once in [`Blowfish::new`] and never change
/// afterwards, so a single instance can encrypt and decrypt any number of
/// buffers.
#[derive(Clone)]
pub struct Blowfish {
    /// P-array (round subkeys).
    p: [u32; P_LEN],
    /// Substitution boxes.
    s: [[u32; S_LEN]; 4],
}

impl fmt::Debug for Blowfish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blowfish").finish_non_exhaustive()
    }
}

impl Blowfish {
    /// Create a cipher from key bytes.
    ///
    /// The key is consumed as `key.len() / 4` big-endian words; leftover
    /// bytes are ignored. An empty key leaves the P-array unmixed.
    #[must_use]
    pub fn new(key: &[u8]) -> Self {
        let words: Vec<u32> = key
            .chunks_exact(4)
            .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        trace!("Blowfish key schedule with {} key words", words.len());

        let mut cipher = Self {
            p: P_INIT,
            s: S_INIT,
        };

        if !words.is_empty() {
            for (i, subkey) in cipher.p.iter_mut().enumerate() {
                *subkey ^= words[i % words.len()];
            }
        }

        // Chain a zero block through the cipher, replacing subkeys as we go.
        let (mut l, mut r) = (0u32, 0u32);
        for i in (0..P_LEN).step_by(2) {
            (l, r) = cipher.encrypt_block(l, r);
            cipher.p[i] = l;
            cipher.p[i + 1] = r;
        }
        for sbox in 0..4 {
            for j in (0..S_LEN).step_by(2) {
                (l, r) = cipher.encrypt_block(l, r);
                cipher.s[sbox][j] = l;
                cipher.s[sbox][j + 1] = r;
            }
        }

        cipher
    }

    /// The Blowfish round function.
    #[inline(always)]
    fn f(&self, x: u32) -> u32 {
        let a = self.s[0][(x >> 24) as usize];
        let b = self.s[1][((x >> 16) & 0xFF) as usize];
        let c = self.s[2][((x >> 8) & 0xFF) as usize];
        let d = self.s[3][(x & 0xFF) as usize];
        (a.wrapping_add(b) ^ c).wrapping_add(d)
    }

    /// Encrypt one block given as its two little-endian words.
    ///
    /// Returns the output words in storage order (R, then L).
    #[inline]
    pub fn encrypt_block(&self, mut l: u32, mut r: u32) -> (u32, u32) {
        for i in (0..ROUNDS).step_by(2) {
            l ^= self.p[i];
            r ^= self.f(l);
            r ^= self.p[i + 1];
            l ^= self.f(r);
        }
        l ^= self.p[16];
        r ^= self.p[17];
        (r, l)
    }

    /// Decrypt one block given as its two little-endian words.
    ///
    /// Returns the output words in storage order (R, then L).
    #[inline]
    pub fn decrypt_block(&self, mut l: u32, mut r: u32) -> (u32, u32) {
        for i in (2..=ROUNDS).rev().step_by(2) {
            l ^= self.p[i + 1];
            r ^= self.f(l);
            r ^= self.p[i];
            l ^= self.f(r);
        }
        l ^= self.p[1];
        r ^= self.p[0];
        (r, l)
    }

    /// Encrypt every full 8-byte block of `buffer` in place.
    ///
    /// Trailing bytes that do not fill a block are left untouched.
    pub fn encrypt(&self, buffer: &mut [u8]) {
        self.apply(buffer, Self::encrypt_block);
    }

    /// Decrypt every full 8-byte block of `buffer` in place.
    ///
    /// Trailing bytes that do not fill a block are left untouched.
    pub fn decrypt(&self, buffer: &mut [u8]) {
        self.apply(buffer, Self::decrypt_block);
    }

    fn apply(&self, buffer: &mut [u8], block_fn: fn(&Self, u32, u32) -> (u32, u32)) {
        for block in buffer.chunks_exact_mut(BLOCK_SIZE) {
            let l = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
            let r = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);
            let (first, second) = block_fn(self, l, r);
            block[..4].copy_from_slice(&first.to_le_bytes());
            block[4..].copy_from_slice(&second.to_le_bytes());
        }
    }
}

impl BlockCipher for Blowfish {
    const BLOCK_SIZE: usize = BLOCK_SIZE;

    fn encrypt(&self, buffer: &mut [u8]) {
        Blowfish::encrypt(self, buffer);
    }

    fn decrypt(&self, buffer: &mut [u8]) {
        Blowfish::decrypt(self, buffer);
    }
}
