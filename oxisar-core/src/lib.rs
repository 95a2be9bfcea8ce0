//! # OxiSar Core
//!
//! Core components for the OxiSar Symbol Art codec.
//!
//! - [`cursor`]: Growable byte cursor with bit reads and endian-aware integers
//! - [`traits`]: The [`BlockCipher`] trait implemented by the payload cipher
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiSar is layered the same way as a compression stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     info / decode / encode / dump                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Format                                              │
//! │     container header, schema interpreter, layer layout  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Blowfish (LE block layout), PRS decompression       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Cursor (this crate)                                 │
//! │     ByteCursor, BlockCipher, SarError                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxisar_core::{ByteCursor, Endian};
//!
//! let mut cursor = ByteCursor::from_vec(vec![0x05, 0x34, 0x12]);
//! assert!(cursor.read_bit().unwrap());
//! assert_eq!(cursor.read_u16(Endian::Little).unwrap(), 0x1234);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cursor;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use cursor::{ByteCursor, Endian};
pub use error::{Result, SarError};
pub use traits::BlockCipher;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cursor::{ByteCursor, Endian};
    pub use crate::error::{Result, SarError};
    pub use crate::traits::BlockCipher;
}
