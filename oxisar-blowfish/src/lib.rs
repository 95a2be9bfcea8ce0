//! # OxiSar Blowfish
//!
//! Pure Rust Blowfish as used to wrap Symbol Art payloads.
//!
//! The algorithm is standard Blowfish (16 Feistel rounds, pi-seeded
//! P-array and S-boxes) with two format-specific details:
//!
//! - blocks are split into **little-endian** 32-bit halves and stored back
//!   with the halves swapped;
//! - the key is packed into big-endian 32-bit words, and a trailing partial
//!   word is ignored.
//!
//! Only whole 8-byte blocks are processed. Any trailing bytes of a buffer
//! pass through unchanged in both directions.
//!
//! ## Example
//!
//! ```rust
//! use oxisar_blowfish::Blowfish;
//!
//! let cipher = Blowfish::new(&[0x09, 0x07, 0xC1, 0x2B]);
//! let mut payload = vec![0u8; 11];
//! cipher.encrypt(&mut payload);
//! assert_eq!(&payload[8..], &[0, 0, 0]);
//! cipher.decrypt(&mut payload);
//! assert_eq!(payload, vec![0u8; 11]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cipher;
pub mod tables;

// Re-exports
pub use cipher::{BLOCK_SIZE, Blowfish};
