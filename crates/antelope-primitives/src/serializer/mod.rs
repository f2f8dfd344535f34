//! Antelope ABI binary serialization.
//!
//! Provides `AbiReader` and `AbiWriter` for reading/writing the
//! little-endian binary encoding used by Antelope, and the
//! [`AbiSerialize`] / [`AbiDeserialize`] traits through which each type
//! declares its own field order. Structs encode their fields back to back
//! in declaration order with no framing.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A type with a canonical Antelope binary encoding.
pub trait AbiSerialize {
    /// Append the binary encoding of `self` to the writer.
    fn write_abi(&self, w: &mut AbiWriter);
}

/// A type that can be read back from its Antelope binary encoding.
pub trait AbiDeserialize: Sized {
    /// Read one value from the reader, advancing its position.
    fn read_abi(r: &mut AbiReader<'_>) -> Result<Self, PrimitivesError>;
}

/// Encode a value to a fresh byte vector.
pub fn encode<T: AbiSerialize + ?Sized>(value: &T) -> Vec<u8> {
    let mut w = AbiWriter::new();
    value.write_abi(&mut w);
    w.into_bytes()
}

/// Decode a value that must span the whole of `data`.
///
/// # Returns
/// The decoded value, `UnexpectedEof` if `data` is short, or
/// `TrailingData` if bytes remain after the value.
pub fn decode<T: AbiDeserialize>(data: &[u8]) -> Result<T, PrimitivesError> {
    let mut r = AbiReader::new(data);
    let value = T::read_abi(&mut r)?;
    if r.remaining() > 0 {
        return Err(PrimitivesError::TrailingData(r.remaining()));
    }
    Ok(value)
}

impl AbiSerialize for u8 {
    fn write_abi(&self, w: &mut AbiWriter) {
        w.write_u8(*self);
    }
}

impl AbiDeserialize for u8 {
    fn read_abi(r: &mut AbiReader<'_>) -> Result<Self, PrimitivesError> {
        r.read_u8()
    }
}

impl AbiSerialize for u64 {
    fn write_abi(&self, w: &mut AbiWriter) {
        w.write_u64_le(*self);
    }
}

impl AbiDeserialize for u64 {
    fn read_abi(r: &mut AbiReader<'_>) -> Result<Self, PrimitivesError> {
        r.read_u64_le()
    }
}

// ---------------------------------------------------------------------------
// AbiReader
// ---------------------------------------------------------------------------

/// A cursor-based reader for Antelope binary data.
///
/// Wraps a byte slice and maintains a read position, providing methods
/// to read fixed-size little-endian integers and raw byte runs.
pub struct AbiReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> AbiReader<'a> {
    /// Create a new reader over the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        AbiReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Returns
    /// A byte slice of length `n`, or an error if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        if n > self.remaining() {
            return Err(PrimitivesError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PrimitivesError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Read a little-endian u32 and advance the position by 4 bytes.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64 and advance the position by 8 bytes.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

// ---------------------------------------------------------------------------
// AbiWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for Antelope binary data.
#[derive(Debug, Default)]
pub struct AbiWriter {
    buf: Vec<u8>,
}

impl AbiWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        AbiWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        AbiWriter { buf: Vec::with_capacity(capacity) }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte.
    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    /// Append a little-endian u32.
    pub fn write_u32_le(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Append a little-endian u64.
    pub fn write_u64_le(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
