//! Growable byte cursor with bit-level reads.
//!
//! `ByteCursor` owns its storage and keeps a single position used for both
//! reading and writing. Multi-byte values can be read or written in either
//! byte order, and single bits can be pulled LSB-first from a cached byte.
//!
//! # Length and capacity
//!
//! The cursor distinguishes two sizes:
//!
//! - **capacity**: the size of the owned storage. Seeks may move anywhere in
//!   `[0, capacity]`. Writes past the capacity grow the storage to at least
//!   twice its previous size, keeping all existing bytes.
//! - **length**: the logical size, i.e. the bytes supplied at construction
//!   or the furthest byte written so far. Reads never go past the length.
//!
//! # Example
//!
//! ```
//! use oxisar_core::cursor::{ByteCursor, Endian};
//!
//! let mut cursor = ByteCursor::with_capacity(1);
//! cursor.write_u16(0x1234, Endian::Little).unwrap();
//! cursor.write_u8(0xFF).unwrap();
//! assert!(cursor.capacity() >= 3);
//!
//! cursor.set_position(0).unwrap();
//! assert_eq!(cursor.read_u16(Endian::Little).unwrap(), 0x1234);
//! assert!(cursor.read_bit().unwrap());
//! ```

use crate::error::{Result, SarError};

/// Default storage size of a fresh cursor.
pub const DEFAULT_CAPACITY: usize = 64;

/// Byte order of a multi-byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    /// Most significant byte first.
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

/// A growable, owned byte buffer with a read/write position.
#[derive(Debug, Clone)]
pub struct ByteCursor {
    /// Owned storage; its length is the cursor capacity.
    data: Vec<u8>,
    /// Logical length (readable bytes).
    len: usize,
    /// Current position.
    pos: usize,
    /// Cached byte for bit reads, already shifted by the consumed bits.
    bit_value: u8,
    /// Bits left in `bit_value`.
    bit_counter: u8,
}

impl Default for ByteCursor {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! read_write_impl {
    ($($read:ident, $write:ident, $ty:ty;)*) => {
        $(
            #[doc = concat!("Read a `", stringify!($ty), "` in the given byte order.")]
            pub fn $read(&mut self, endian: Endian) -> Result<$ty> {
                let bytes = self.take_array::<{ std::mem::size_of::<$ty>() }>()?;
                Ok(match endian {
                    Endian::Big => <$ty>::from_be_bytes(bytes),
                    Endian::Little => <$ty>::from_le_bytes(bytes),
                })
            }

            #[doc = concat!("Write a `", stringify!($ty), "` in the given byte order.")]
            pub fn $write(&mut self, value: $ty, endian: Endian) -> Result<()> {
                let bytes = match endian {
                    Endian::Big => value.to_be_bytes(),
                    Endian::Little => value.to_le_bytes(),
                };
                self.write_bytes(&bytes)
            }
        )*
    };
}

impl ByteCursor {
    /// Create an empty cursor with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty cursor with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            len: 0,
            pos: 0,
            bit_value: 0,
            bit_counter: 0,
        }
    }

    /// Create a cursor over existing bytes, positioned at the start.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let len = data.len();
        Self {
            data,
            len,
            pos: 0,
            bit_value: 0,
            bit_counter: 0,
        }
    }

    /// Current position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Logical length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the owned storage.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Readable bytes left before the logical length.
    pub fn remaining(&self) -> usize {
        self.len.saturating_sub(self.pos)
    }

    /// The logical bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Consume the cursor and return the logical bytes.
    pub fn into_inner(mut self) -> Vec<u8> {
        self.data.truncate(self.len);
        self.data
    }

    /// Move the position by `offset` bytes.
    ///
    /// Fails if the target lies outside `[0, capacity]`.
    pub fn seek(&mut self, offset: isize) -> Result<()> {
        let target = isize::try_from(self.pos)
            .ok()
            .and_then(|pos| pos.checked_add(offset))
            .and_then(|target| usize::try_from(target).ok())
            .filter(|&target| target <= self.data.len());
        match target {
            Some(target) => {
                self.pos = target;
                Ok(())
            }
            None => Err(SarError::out_of_range(self.pos, offset, self.data.len())),
        }
    }

    /// Move to an absolute position.
    pub fn set_position(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            let offset = isize::try_from(pos - self.pos).unwrap_or(isize::MAX);
            return Err(SarError::out_of_range(self.pos, offset, self.data.len()));
        }
        self.pos = pos;
        Ok(())
    }

    /// Ensure `width` bytes are readable at the current position.
    #[inline]
    fn check_read(&self, width: usize) -> Result<()> {
        if width > self.remaining() {
            return Err(SarError::out_of_range(self.pos, width as isize, self.len));
        }
        Ok(())
    }

    /// Grow the storage so that `width` bytes fit at the current position.
    fn reserve_write(&mut self, width: usize) {
        let needed = self.pos + width;
        if needed > self.data.len() {
            let new_capacity = (self.data.len() * 2).max(needed);
            self.data.resize(new_capacity, 0);
        }
    }

    #[inline]
    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.check_read(N)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(bytes)
    }

    /// Read a single bit, least significant bit of each byte first.
    ///
    /// A byte is pulled from the stream whenever the cached bits run out,
    /// so byte reads may be interleaved with bit reads.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_counter == 0 {
            self.bit_value = self.read_u8()?;
            self.bit_counter = 8;
        }

        let bit = self.bit_value & 1;
        self.bit_counter -= 1;
        self.bit_value >>= 1;
        Ok(bit != 0)
    }

    /// Read an unsigned byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Write an unsigned byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    /// Write a signed byte.
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_bytes(&[value as u8])
    }

    read_write_impl! {
        read_u16, write_u16, u16;
        read_u32, write_u32, u32;
        read_u64, write_u64, u64;
        read_i16, write_i16, i16;
        read_i32, write_i32, i32;
        read_i64, write_i64, i64;
        read_f32, write_f32, f32;
        read_f64, write_f64, f64;
    }

    /// Read `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.check_read(count)?;
        let bytes = self.data[self.pos..self.pos + count].to_vec();
        self.pos += count;
        Ok(bytes)
    }

    /// Write raw bytes, growing the storage if needed.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve_write(bytes.len());
        self.data[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        self.len = self.len.max(self.pos);
        Ok(())
    }
}

impl From<Vec<u8>> for ByteCursor {
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor() {
        let cursor = ByteCursor::new();
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.capacity(), DEFAULT_CAPACITY);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_read_bits_lsb_first() {
        // 0b10101010
        let mut cursor = ByteCursor::from_vec(vec![0xAA]);
        let bits: Vec<bool> = (0..8).map(|_| cursor.read_bit().unwrap()).collect();
        assert_eq!(
            bits,
            vec![false, true, false, true, false, true, false, true]
        );
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_ninth_bit_refills() {
        let mut cursor = ByteCursor::from_vec(vec![0x00, 0x01]);
        for _ in 0..8 {
            assert!(!cursor.read_bit().unwrap());
        }
        assert_eq!(cursor.position(), 1);
        assert!(cursor.read_bit().unwrap());
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_bits_interleave_with_bytes() {
        // Bit byte is cached; the following byte read is independent.
        let mut cursor = ByteCursor::from_vec(vec![0b0000_0011, 0x69, 0x42]);
        assert!(cursor.read_bit().unwrap());
        assert_eq!(cursor.read_u8().unwrap(), 0x69);
        assert!(cursor.read_bit().unwrap());
        assert!(!cursor.read_bit().unwrap());
        assert_eq!(cursor.read_u8().unwrap(), 0x42);
    }

    #[test]
    fn test_read_integers() {
        let mut cursor = ByteCursor::from_vec(vec![0x12, 0x34, 0x12, 0x34]);
        assert_eq!(cursor.read_u16(Endian::Big).unwrap(), 0x1234);
        assert_eq!(cursor.read_u16(Endian::Little).unwrap(), 0x3412);

        let mut cursor = ByteCursor::from_vec(vec![0x80]);
        assert_eq!(cursor.read_i8().unwrap(), -128);

        let mut cursor = ByteCursor::from_vec(vec![0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(cursor.read_i32(Endian::Little).unwrap(), -2);
    }

    #[test]
    fn test_read_floats() {
        let mut cursor = ByteCursor::from_vec(vec![64, 131, 51, 51]);
        let value = cursor.read_f32(Endian::Big).unwrap();
        assert!((value - 4.1).abs() < 1e-6);

        let mut cursor = ByteCursor::from_vec(vec![102, 102, 102, 102, 102, 102, 16, 64]);
        let value = cursor.read_f64(Endian::Little).unwrap();
        assert!((value - 4.1).abs() < 1e-12);
    }

    #[test]
    fn test_read_past_length_fails() {
        let mut cursor = ByteCursor::from_vec(vec![1]);
        let err = cursor.read_u32(Endian::Big).unwrap_err();
        assert!(err.is_out_of_range());
        // Failed read does not move the cursor.
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.read_u8().unwrap(), 1);
        assert!(cursor.read_bit().is_err());
    }

    #[test]
    fn test_read_stops_at_length_not_capacity() {
        let mut cursor = ByteCursor::with_capacity(16);
        cursor.write_u8(7).unwrap();
        cursor.set_position(0).unwrap();
        assert_eq!(cursor.read_u8().unwrap(), 7);
        assert!(cursor.read_u8().is_err());
    }

    #[test]
    fn test_seek_bounds() {
        let mut cursor = ByteCursor::with_capacity(10);
        cursor.seek(10).unwrap();
        assert_eq!(cursor.position(), 10);
        cursor.seek(-10).unwrap();
        assert!(cursor.seek(20).is_err());
        assert!(cursor.seek(-5).is_err());
        assert!(cursor.seek(11).unwrap_err().is_out_of_range());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_seek_extreme_offsets() {
        let mut cursor = ByteCursor::with_capacity(10);
        cursor.seek(4).unwrap();
        assert!(cursor.seek(isize::MAX).unwrap_err().is_out_of_range());
        assert!(cursor.seek(isize::MIN).unwrap_err().is_out_of_range());
        assert_eq!(cursor.position(), 4);

        assert!(cursor.set_position(usize::MAX).unwrap_err().is_out_of_range());
        assert_eq!(cursor.position(), 4);
        cursor.set_position(10).unwrap();
        assert_eq!(cursor.position(), 10);
    }

    #[test]
    fn test_growth_from_one_byte() {
        let mut cursor = ByteCursor::with_capacity(1);
        for i in 0..100u8 {
            cursor.write_u8(i).unwrap();
        }
        assert!(cursor.capacity() >= 100);
        assert_eq!(cursor.position(), 100);
        assert_eq!(cursor.len(), 100);

        cursor.set_position(0).unwrap();
        let bytes = cursor.read_bytes(100).unwrap();
        assert_eq!(bytes, (0..100u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_growth_doubles_capacity() {
        let mut cursor = ByteCursor::with_capacity(4);
        cursor.write_u32(0xDEADBEEF, Endian::Big).unwrap();
        assert_eq!(cursor.capacity(), 4);
        cursor.write_u8(1).unwrap();
        assert_eq!(cursor.capacity(), 8);
        assert_eq!(&cursor.as_slice()[..4], &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_growth_from_zero_capacity() {
        let mut cursor = ByteCursor::with_capacity(0);
        cursor.write_f64(1.5, Endian::Little).unwrap();
        assert!(cursor.capacity() >= 8);
        cursor.set_position(0).unwrap();
        assert_eq!(cursor.read_f64(Endian::Little).unwrap(), 1.5);
    }

    #[test]
    fn test_overwrite_keeps_length() {
        let mut cursor = ByteCursor::from_vec(vec![1, 2, 3, 4]);
        cursor.seek(1).unwrap();
        cursor.write_u16(0xAABB, Endian::Big).unwrap();
        assert_eq!(cursor.len(), 4);
        assert_eq!(cursor.into_inner(), vec![1, 0xAA, 0xBB, 4]);
    }

    #[test]
    fn test_write_roundtrip_all_widths() {
        let mut cursor = ByteCursor::new();
        cursor.write_i16(-2, Endian::Big).unwrap();
        cursor.write_u32(0x01020304, Endian::Little).unwrap();
        cursor.write_i64(-3, Endian::Big).unwrap();
        cursor.write_u64(u64::MAX - 1, Endian::Little).unwrap();
        cursor.write_f32(0.5, Endian::Big).unwrap();
        cursor.write_i8(-1).unwrap();

        cursor.set_position(0).unwrap();
        assert_eq!(cursor.read_i16(Endian::Big).unwrap(), -2);
        assert_eq!(cursor.read_u32(Endian::Little).unwrap(), 0x01020304);
        assert_eq!(cursor.read_i64(Endian::Big).unwrap(), -3);
        assert_eq!(cursor.read_u64(Endian::Little).unwrap(), u64::MAX - 1);
        assert_eq!(cursor.read_f32(Endian::Big).unwrap(), 0.5);
        assert_eq!(cursor.read_i8().unwrap(), -1);
        assert_eq!(cursor.remaining(), 0);
    }
}
