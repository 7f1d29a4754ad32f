//! Core type definitions for the vector indexing core.
//!
//! This module defines the fundamental types used throughout the library:
//! - `DocId`: document identifier emitted by a document sequencer
//! - `NO_MORE_DOCS`: exhaustion sentinel for document iteration
//! - `ElementType`: runtime discriminant for the supported element encodings
//! - `VectorElement`: sealed trait for vector element types (f32, u8)

use std::fmt;
use std::io::{self, Read, Write};

/// Document identifier emitted by a document sequencer.
pub type DocId = u32;

/// Sentinel returned by document iteration when no documents remain.
pub const NO_MORE_DOCS: DocId = DocId::MAX;

/// Runtime discriminant for the two supported vector element encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Dense single-precision floating-point vectors.
    Float,
    /// Dense byte vectors.
    Byte,
}

impl ElementType {
    /// Get a human-readable name for the element type.
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Float => "float",
            ElementType::Byte => "byte",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for u8 {}
}

/// Trait for types that can be used as vector elements.
///
/// Implemented for exactly `f32` (float vectors) and `u8` (byte vectors).
/// The trait is sealed: no other element encoding can appear behind a
/// `VectorValues` facade or cross the binary codec boundary.
pub trait VectorElement:
    sealed::Sealed + Copy + Clone + fmt::Debug + Default + Send + Sync + 'static
{
    /// Encoded width of one element in bytes.
    const BYTES: usize;

    /// The element encoding this type represents.
    fn element_type() -> ElementType;

    /// Write this element to `writer` in little-endian form.
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    /// Read one element from `reader` in little-endian form.
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self>;
}

impl VectorElement for f32 {
    const BYTES: usize = 4;

    #[inline(always)]
    fn element_type() -> ElementType {
        ElementType::Float
    }

    #[inline]
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_le_bytes())
    }

    #[inline]
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(f32::from_le_bytes(buf))
    }
}

impl VectorElement for u8 {
    const BYTES: usize = 1;

    #[inline(always)]
    fn element_type() -> ElementType {
        ElementType::Byte
    }

    #[inline]
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&[*self])
    }

    #[inline]
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        Ok(buf[0])
    }
}
