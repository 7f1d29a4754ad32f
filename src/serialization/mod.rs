//! Binary serialization for raw numeric arrays.
//!
//! Length-prefixed little-endian encoding used wherever a raw vector or a
//! model blob component crosses the storage boundary: persisted quantizer
//! state, buffered vector spills, and the float arrays inside model blobs.
//! Float round-trips are bit-exact.

use crate::types::VectorElement;
use std::io::{self, Read, Write};
use thiserror::Error;

/// Errors that can occur during serialization.
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid magic number: expected {expected:#x}, got {got:#x}")]
    InvalidMagicNumber { expected: u32, got: u32 },

    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for serialization operations.
pub type SerializationResult<T> = Result<T, SerializationError>;

// Helper functions for binary I/O

#[inline]
pub fn write_u8<W: Write>(writer: &mut W, value: u8) -> io::Result<()> {
    writer.write_all(&[value])
}

#[inline]
pub fn read_u8<R: Read>(reader: &mut R) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

#[inline]
pub fn write_u32<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

#[inline]
pub fn read_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

#[inline]
pub fn write_u64<W: Write>(writer: &mut W, value: u64) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

#[inline]
pub fn read_u64<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

#[inline]
pub fn write_usize<W: Write>(writer: &mut W, value: usize) -> io::Result<()> {
    write_u64(writer, value as u64)
}

#[inline]
pub fn read_usize<R: Read>(reader: &mut R) -> io::Result<usize> {
    Ok(read_u64(reader)? as usize)
}

#[inline]
pub fn write_f32<W: Write>(writer: &mut W, value: f32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

#[inline]
pub fn read_f32<R: Read>(reader: &mut R) -> io::Result<f32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}

/// Write a float array in length-prefixed form.
pub fn write_f32_slice<W: Write>(writer: &mut W, data: &[f32]) -> io::Result<()> {
    write_usize(writer, data.len())?;
    for &value in data {
        write_f32(writer, value)?;
    }
    Ok(())
}

/// Read a length-prefixed float array.
pub fn read_f32_vec<R: Read>(reader: &mut R) -> io::Result<Vec<f32>> {
    let len = read_usize(reader)?;
    let mut data = Vec::with_capacity(len);
    for _ in 0..len {
        data.push(read_f32(reader)?);
    }
    Ok(data)
}

/// Write a raw byte array in length-prefixed form.
pub fn write_byte_slice<W: Write>(writer: &mut W, data: &[u8]) -> io::Result<()> {
    write_usize(writer, data.len())?;
    writer.write_all(data)
}

/// Read a length-prefixed raw byte array.
pub fn read_byte_vec<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let len = read_usize(reader)?;
    let mut data = vec![0u8; len];
    reader.read_exact(&mut data)?;
    Ok(data)
}

/// Write a vector of elements in length-prefixed form.
pub fn write_vector<T: VectorElement, W: Write>(writer: &mut W, data: &[T]) -> io::Result<()> {
    write_usize(writer, data.len())?;
    for value in data {
        value.write_to(writer)?;
    }
    Ok(())
}

/// Read a length-prefixed vector of elements.
pub fn read_vector<T: VectorElement, R: Read>(reader: &mut R) -> io::Result<Vec<T>> {
    let len = read_usize(reader)?;
    let mut data = Vec::with_capacity(len);
    for _ in 0..len {
        data.push(T::read_from(reader)?);
    }
    Ok(data)
}
