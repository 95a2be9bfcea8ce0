//! # OxiSar Format
//!
//! Symbol Art (`.sar`) container support: header validation, the payload
//! cipher, optional PRS decompression and the bit-packed layer layout.
//!
//! ## Modules
//!
//! - [`container`]: the `.sar` file (magic, flag, encryption, compression)
//! - [`layout`]: the plaintext header, layer records and name
//! - [`schema`]: declarative schema interpreter used by the layout decoder
//! - [`document`]: the decoded document model (serde-enabled)
//! - [`sound`]: sound effect ids
//!
//! ## Example
//!
//! ```rust
//! use oxisar_format::{Document, Layer, SoundEffect};
//!
//! let mut doc = Document::new(10285603, "example");
//! doc.sound = SoundEffect::Joy;
//! doc.layers.push(Layer {
//!     symbol: 240,
//!     r: 63,
//!     ..Layer::default()
//! });
//!
//! let bytes = oxisar_format::encode(&doc).unwrap();
//! assert_eq!(&bytes[..4], b"sar\x04");
//!
//! let decoded = oxisar_format::decode(&bytes).unwrap();
//! assert_eq!(decoded, doc);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod container;
pub mod document;
pub mod layout;
pub mod schema;
pub mod sound;

// Re-exports
pub use container::{
    DecodeOptions, SarFlag, SarHeader, decode, decode_payload, decode_with, encode, is_sar,
};
pub use document::{Document, Layer, Point, Position, Size};
pub use oxisar_core::error::{Result, SarError};
pub use sound::{SoundEffect, UnknownSound};
