//! Symbol Art container (`.sar`).
//!
//! ```text
//! +-----+-----+-----+------+---------------------------+
//! | 's' | 'a' | 'r' | flag | Blowfish cipher text ...  |
//! +-----+-----+-----+------+---------------------------+
//! ```
//!
//! The flag is `0x04` for a stored payload and `0x84` for a compressed
//! one. Decryption covers every full 8-byte block after the header; a
//! trailing partial block is stored in the clear. A compressed payload is
//! additionally XORed with `0x95` after decryption and then PRS expanded.
//!
//! Encoding always writes the stored form.
//!
//! ## Example
//!
//! ```rust
//! use oxisar_format::{Document, container};
//!
//! let doc = Document::new(1234, "hello");
//! let bytes = container::encode(&doc).unwrap();
//! assert!(container::is_sar(&bytes));
//! assert_eq!(container::decode(&bytes).unwrap(), doc);
//! ```

use crate::document::Document;
use crate::layout;
use log::debug;
use oxisar_blowfish::Blowfish;
use oxisar_core::BlockCipher;
use oxisar_core::error::{Result, SarError};
use oxisar_prs::{PrsConfig, decompress_with};
use std::sync::OnceLock;

/// File magic.
pub const SAR_MAGIC: [u8; 3] = *b"sar";

/// Flag byte for a stored payload.
pub const FLAG_STORED: u8 = 0x04;

/// Flag byte for a PRS compressed payload.
pub const FLAG_COMPRESSED: u8 = 0x84;

/// Magic plus flag.
pub const HEADER_LEN: usize = 4;

/// Fixed Blowfish key of the format.
pub const SAR_KEY: [u8; 4] = [0x09, 0x07, 0xC1, 0x2B];

/// Byte mask applied to compressed payloads.
pub const XOR_MASK: u8 = 0x95;

/// Payload storage mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SarFlag {
    /// Plain layout bytes.
    Stored,
    /// XOR-masked PRS stream.
    Compressed,
}

impl SarFlag {
    /// Parse a flag byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            FLAG_STORED => Some(Self::Stored),
            FLAG_COMPRESSED => Some(Self::Compressed),
            _ => None,
        }
    }

    /// The flag byte.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Stored => FLAG_STORED,
            Self::Compressed => FLAG_COMPRESSED,
        }
    }

    /// Whether the payload is compressed.
    pub fn is_compressed(self) -> bool {
        self == Self::Compressed
    }
}

/// The 4-byte container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SarHeader {
    /// Storage mode.
    pub flag: SarFlag,
}

impl SarHeader {
    /// Create a header.
    pub const fn new(flag: SarFlag) -> Self {
        Self { flag }
    }

    /// Validate and parse the header at the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(SarError::format(format!(
                "truncated header: {} bytes",
                bytes.len()
            )));
        }
        if bytes[..3] != SAR_MAGIC {
            return Err(SarError::format(format!(
                "not a SAR file (magic {:02X?})",
                &bytes[..3]
            )));
        }
        let flag = SarFlag::from_byte(bytes[3])
            .ok_or_else(|| SarError::format(format!("invalid flag 0x{:02X}", bytes[3])))?;
        Ok(Self { flag })
    }

    /// Header bytes.
    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        [SAR_MAGIC[0], SAR_MAGIC[1], SAR_MAGIC[2], self.flag.to_byte()]
    }
}

/// Options for [`decode_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Decompressor settings for compressed payloads.
    pub prs: PrsConfig,
}

impl DecodeOptions {
    /// Default options.
    pub const DEFAULT: Self = Self {
        prs: PrsConfig::DEFAULT,
    };

    /// Create the default options.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the decompressor configuration.
    pub fn with_prs(mut self, prs: PrsConfig) -> Self {
        self.prs = prs;
        self
    }
}

fn sar_cipher() -> &'static Blowfish {
    static CIPHER: OnceLock<Blowfish> = OnceLock::new();
    CIPHER.get_or_init(|| Blowfish::new(&SAR_KEY))
}

/// Check the magic and flag without decrypting.
pub fn is_sar(bytes: &[u8]) -> bool {
    SarHeader::parse(bytes).is_ok()
}

fn open<C: BlockCipher>(
    cipher: &C,
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<(SarHeader, Vec<u8>)> {
    let header = SarHeader::parse(bytes)?;
    let mut body = bytes[HEADER_LEN..].to_vec();
    cipher.decrypt(&mut body);

    let payload = match header.flag {
        SarFlag::Stored => body,
        SarFlag::Compressed => {
            for byte in &mut body {
                *byte ^= XOR_MASK;
            }
            decompress_with(&body, &options.prs)?
        }
    };

    debug!(
        "SAR: {:?} container, {} bytes -> {} byte payload",
        header.flag,
        bytes.len(),
        payload.len()
    );
    Ok((header, payload))
}

fn seal<C: BlockCipher>(cipher: &C, mut payload: Vec<u8>) -> Vec<u8> {
    cipher.encrypt(&mut payload);
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&SarHeader::new(SarFlag::Stored).to_bytes());
    out.extend_from_slice(&payload);
    out
}

/// Validate, decrypt and (if flagged) decompress a container, returning
/// the plaintext layout bytes.
pub fn decode_payload(bytes: &[u8]) -> Result<(SarHeader, Vec<u8>)> {
    decode_payload_with(bytes, &DecodeOptions::DEFAULT)
}

/// [`decode_payload`] with explicit options.
pub fn decode_payload_with(
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<(SarHeader, Vec<u8>)> {
    open(sar_cipher(), bytes, options)
}

/// Decode a container into a document.
pub fn decode(bytes: &[u8]) -> Result<Document> {
    decode_with(bytes, &DecodeOptions::DEFAULT)
}

/// Decode a container into a document with explicit options.
pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<Document> {
    let (_, payload) = decode_payload_with(bytes, options)?;
    layout::decode(&payload)
}

/// Encode a document as a stored container.
pub fn encode(document: &Document) -> Result<Vec<u8>> {
    let payload = layout::encode(document)?;
    Ok(seal(sar_cipher(), payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_parse() {
        assert_eq!(
            SarHeader::parse(b"sar\x04").unwrap().flag,
            SarFlag::Stored
        );
        assert!(SarHeader::parse(b"sar\x84rest").unwrap().flag.is_compressed());
        assert!(matches!(
            SarHeader::parse(b"sa"),
            Err(SarError::Format { .. })
        ));
        assert!(matches!(
            SarHeader::parse(b"SAR\x04"),
            Err(SarError::Format { .. })
        ));
        assert!(matches!(
            SarHeader::parse(b"sar\x05"),
            Err(SarError::Format { .. })
        ));
    }

    #[test]
    fn test_header_bytes() {
        assert_eq!(SarHeader::new(SarFlag::Stored).to_bytes(), *b"sar\x04");
        assert_eq!(SarHeader::new(SarFlag::Compressed).to_bytes(), *b"sar\x84");
        assert_eq!(SarFlag::from_byte(0x00), None);
    }

    #[test]
    fn test_is_sar() {
        assert!(is_sar(b"sar\x04"));
        assert!(!is_sar(b"sar"));
        assert!(!is_sar(b"zip\x04"));
    }

    #[test]
    fn test_header_only_stored() {
        let (header, payload) = decode_payload(b"sar\x04").unwrap();
        assert_eq!(header.flag, SarFlag::Stored);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_seal_open() {
        let payload: Vec<u8> = (0..21).collect();
        let sealed = seal(sar_cipher(), payload.clone());
        assert_eq!(&sealed[..4], b"sar\x04");
        assert_eq!(&sealed[4 + 16..], &payload[16..]);
        assert_ne!(&sealed[4..20], &payload[..16]);

        let (_, opened) = open(sar_cipher(), &sealed, &DecodeOptions::DEFAULT).unwrap();
        assert_eq!(opened, payload);
    }
}
