//! # OxiSar PRS
//!
//! Pure Rust decompressor for the PRS backward-reference scheme used by
//! compressed Symbol Art payloads.
//!
//! PRS is an LZ77 variant driven by a bitstream of control flags. Literal
//! bytes are copied through, and copy commands replay previously produced
//! output from a negative offset. The output buffer is its own dictionary.
//!
//! Only decompression is provided; the container encoder always writes
//! the uncompressed form.
//!
//! ## Example
//!
//! ```rust
//! use oxisar_prs::decompress;
//!
//! // literal 0x69, then the end marker
//! let output = decompress(&[0x05, 0x69, 0x00, 0x00]).unwrap();
//! assert_eq!(output, vec![0x69]);
//! ```
//!
//! ## Limits
//!
//! [`PrsConfig::max_output`] caps the decompressed size so a small hostile
//! stream cannot expand without bound:
//!
//! ```rust
//! use oxisar_prs::{PrsConfig, decompress_with};
//!
//! let config = PrsConfig::new().with_max_output(0);
//! assert!(decompress_with(&[0x05, 0x69, 0x00, 0x00], &config).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod decode;

// Re-exports
pub use config::PrsConfig;
pub use decode::{PrsDecoder, decompress, decompress_with};
