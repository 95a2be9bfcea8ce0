//! PRS decompression.
//!
//! The stream interleaves control bits (LSB-first, one cached byte at a
//! time) with plain data bytes. Each command is one of:
//!
//! ```text
//! 1                      literal: copy the next input byte
//! 0 1 <u16 le f>         long copy: f == 0 ends the stream,
//!                        size = f & 7 (0 -> next byte + 10, else + 2),
//!                        offset = 13-bit negative value in f >> 3
//! 0 0 <bit a> <bit b> <i8 o>
//!                        short copy: size = (a << 1 | b) + 2,
//!                        offset = o | -0x100
//! ```
//!
//! Copies read from the output produced so far, one byte at a time, so a
//! reference closer than its own length repeats the pattern.

use crate::config::PrsConfig;
use log::debug;
use oxisar_core::ByteCursor;
use oxisar_core::error::{Result, SarError};

/// Decompress a complete PRS stream with the default configuration.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    decompress_with(input, &PrsConfig::DEFAULT)
}

/// Decompress a complete PRS stream.
pub fn decompress_with(input: &[u8], config: &PrsConfig) -> Result<Vec<u8>> {
    PrsDecoder::new(input.to_vec(), *config).decode()
}

/// A decoded copy command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Literal,
    Copy { offset: isize, size: usize },
    End,
}

/// PRS stream decoder.
#[derive(Debug)]
pub struct PrsDecoder {
    /// Compressed input; supplies both control bits and data bytes.
    input: ByteCursor,
    /// Decompressed output, also the back-reference window.
    output: Vec<u8>,
    config: PrsConfig,
}

impl PrsDecoder {
    /// Create a decoder over a compressed buffer.
    pub fn new(input: Vec<u8>, config: PrsConfig) -> Self {
        Self {
            input: ByteCursor::from_vec(input),
            output: Vec::with_capacity(config.initial_capacity),
            config,
        }
    }

    /// Number of input bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.input.position()
    }

    /// Run the decoder until the end marker and return the output.
    pub fn decode(mut self) -> Result<Vec<u8>> {
        loop {
            match self.next_command()? {
                Command::Literal => {
                    let byte = self.byte()?;
                    self.reserve(1)?;
                    self.output.push(byte);
                }
                Command::Copy { offset, size } => self.copy(offset, size)?,
                Command::End => break,
            }
        }

        debug!(
            "PRS: {} input bytes -> {} output bytes",
            self.consumed(),
            self.output.len()
        );
        Ok(self.output)
    }

    fn next_command(&mut self) -> Result<Command> {
        if self.bit()? {
            return Ok(Command::Literal);
        }

        if self.bit()? {
            let field = self.u16_le()?;
            if field == 0 {
                return Ok(Command::End);
            }
            let offset = ((field >> 3) as i32 | -0x2000) as isize;
            let size = match (field & 7) as usize {
                0 => self.byte()? as usize + 10,
                size => size + 2,
            };
            Ok(Command::Copy { offset, size })
        } else {
            let high = self.bit()? as usize;
            let low = self.bit()? as usize;
            let size = ((high << 1) | low) + 2;
            let offset = (self.byte()? as i8 as i32 | -0x100) as isize;
            Ok(Command::Copy { offset, size })
        }
    }

    /// Replay `size` bytes starting `offset` bytes behind the write position.
    fn copy(&mut self, offset: isize, size: usize) -> Result<()> {
        if offset >= 0 {
            return Err(SarError::decode(
                self.consumed(),
                format!("non-negative copy offset {offset}"),
            ));
        }
        let distance = offset.unsigned_abs();
        if distance > self.output.len() {
            return Err(SarError::decode(
                self.consumed(),
                format!(
                    "copy offset {offset} reaches before output start ({} bytes written)",
                    self.output.len()
                ),
            ));
        }
        self.reserve(size)?;

        // Byte by byte: source and destination may overlap.
        for _ in 0..size {
            let byte = self.output[self.output.len() - distance];
            self.output.push(byte);
        }
        Ok(())
    }

    fn reserve(&self, additional: usize) -> Result<()> {
        if self.output.len() + additional > self.config.max_output {
            return Err(SarError::decode(
                self.consumed(),
                format!("output exceeds limit of {} bytes", self.config.max_output),
            ));
        }
        Ok(())
    }

    fn bit(&mut self) -> Result<bool> {
        self.input.read_bit().map_err(|_| self.truncated())
    }

    fn byte(&mut self) -> Result<u8> {
        self.input.read_u8().map_err(|_| self.truncated())
    }

    fn u16_le(&mut self) -> Result<u16> {
        self.input
            .read_u16(oxisar_core::Endian::Little)
            .map_err(|_| self.truncated())
    }

    fn truncated(&self) -> SarError {
        SarError::decode(self.consumed(), "input exhausted before end marker")
    }
}
