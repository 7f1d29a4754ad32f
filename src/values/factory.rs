//! Construction of `VectorValues` facades.
//!
//! The factory picks the right source variant for the requested element kind
//! and data origin. The element kind is fixed by the function signature, so
//! a buffer of the wrong element type cannot compile. Stateless: nothing is
//! retained between calls.

use super::{VectorReader, VectorValues};
use crate::docids::DocIdIterator;

/// Float-typed vector values.
pub type FloatVectorValues<'a> = VectorValues<'a, f32>;

/// Byte-typed vector values.
pub type ByteVectorValues<'a> = VectorValues<'a, u8>;

/// Float vector values over an index-resident store.
pub fn float_vector_values<'a>(
    docs: impl DocIdIterator + 'a,
    reader: &'a dyn VectorReader<f32>,
) -> FloatVectorValues<'a> {
    VectorValues::index_resident(Box::new(docs), reader)
}

/// Byte vector values over an index-resident store.
pub fn byte_vector_values<'a>(
    docs: impl DocIdIterator + 'a,
    reader: &'a dyn VectorReader<u8>,
) -> ByteVectorValues<'a> {
    VectorValues::index_resident(Box::new(docs), reader)
}

/// Float vector values over vectors buffered during a write or merge.
///
/// `vectors` holds one entry per document the sequencer will emit, in
/// emission order, and must be at least as long as the emitted sequence.
pub fn buffered_float_vector_values<'a>(
    docs: impl DocIdIterator + 'a,
    vectors: &'a [Vec<f32>],
) -> FloatVectorValues<'a> {
    VectorValues::buffered(Box::new(docs), vectors)
}

/// Byte vector values over vectors buffered during a write or merge.
///
/// `vectors` holds one entry per document the sequencer will emit, in
/// emission order, and must be at least as long as the emitted sequence.
pub fn buffered_byte_vector_values<'a>(
    docs: impl DocIdIterator + 'a,
    vectors: &'a [Vec<u8>],
) -> ByteVectorValues<'a> {
    VectorValues::buffered(Box::new(docs), vectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docids::SortedDocIds;
    use crate::types::{DocId, ElementType};
    use std::collections::HashMap;

    fn docs(ids: &[DocId]) -> SortedDocIds {
        SortedDocIds::new(ids.to_vec()).unwrap()
    }

    #[test]
    fn test_float_facade_yields_float_slices() {
        let buffer = vec![vec![1.5f32, -2.5]];
        let mut values = buffered_float_vector_values(docs(&[0]), &buffer);
        values.advance();

        let vector: &[f32] = values.vector();
        assert_eq!(vector, &[1.5, -2.5]);
        assert_eq!(values.element_type(), ElementType::Float);
    }

    #[test]
    fn test_byte_facade_yields_byte_slices() {
        let buffer = vec![vec![9u8, 8, 7]];
        let mut values = buffered_byte_vector_values(docs(&[0]), &buffer);
        values.advance();

        let vector: &[u8] = values.vector();
        assert_eq!(vector, &[9, 8, 7]);
        assert_eq!(values.element_type(), ElementType::Byte);
    }

    #[test]
    fn test_all_four_combinations_construct() {
        let float_store: HashMap<DocId, Vec<f32>> = HashMap::new();
        let byte_store: HashMap<DocId, Vec<u8>> = HashMap::new();
        let float_buffer: Vec<Vec<f32>> = Vec::new();
        let byte_buffer: Vec<Vec<u8>> = Vec::new();

        let v = float_vector_values(docs(&[]), &float_store);
        assert_eq!(v.element_type(), ElementType::Float);
        let v = byte_vector_values(docs(&[]), &byte_store);
        assert_eq!(v.element_type(), ElementType::Byte);
        let v = buffered_float_vector_values(docs(&[]), &float_buffer);
        assert_eq!(v.element_type(), ElementType::Float);
        let v = buffered_byte_vector_values(docs(&[]), &byte_buffer);
        assert_eq!(v.element_type(), ElementType::Byte);
    }
}
