//! Uniform access to per-document vector data.
//!
//! A `VectorValues` facade walks vectors the same way whether they come from
//! an already-built index segment or from vectors buffered in memory during
//! a write or merge. The facade is generic over the element encoding only;
//! the source variant stays behind a private tagged union, so consumer code
//! never branches on where the vectors live.
//!
//! Facades are single-threaded, forward-only cursors. Distinct facades share
//! no mutable state and may run fully in parallel.

pub mod factory;

use crate::docids::DocIdIterator;
use crate::types::{DocId, ElementType, VectorElement, NO_MORE_DOCS};
use std::collections::HashMap;

/// Read access to vectors resident in an index segment.
///
/// Returns `None` when no vector is stored for the document. The returned
/// slice stays valid until the next call on the same reader. Fetches may
/// block on storage; callers treat them as potentially blocking.
pub trait VectorReader<T: VectorElement> {
    fn vector(&self, doc_id: DocId) -> Option<&[T]>;
}

/// A plain map of doc id to vector acts as an index-resident store.
impl<T: VectorElement> VectorReader<T> for HashMap<DocId, Vec<T>> {
    fn vector(&self, doc_id: DocId) -> Option<&[T]> {
        self.get(&doc_id).map(Vec::as_slice)
    }
}

/// Supplier of per-document vector data, abstracting over the data origin.
enum ValueSource<'a, T: VectorElement> {
    /// Vectors fetched lazily from an index-resident store, keyed by the
    /// sequencer's current doc id. No buffering.
    IndexResident {
        docs: Box<dyn DocIdIterator + 'a>,
        reader: &'a dyn VectorReader<T>,
    },
    /// Vectors taken from an in-memory buffer, one entry per emitted doc id
    /// in emission order. Lookup is by emission position, never by doc id
    /// value: emitted ids may be remapped and non-contiguous.
    Buffered {
        docs: Box<dyn DocIdIterator + 'a>,
        vectors: &'a [Vec<T>],
        /// Zero-based emission position; `None` before the first advance.
        position: Option<usize>,
    },
}

/// Typed, forward-only cursor over per-document vectors.
///
/// Obtained from the constructors in [`factory`]; generic over the element
/// encoding only. `advance()` walks the underlying document sequence and
/// `vector()` yields the current document's vector from whichever source
/// backs the facade.
///
/// ```rust
/// use vecidx::docids::SortedDocIds;
/// use vecidx::types::NO_MORE_DOCS;
/// use vecidx::values::factory::buffered_float_vector_values;
///
/// let docs = SortedDocIds::new(vec![4, 9]).unwrap();
/// let buffer = vec![vec![1.0f32, 2.0], vec![3.0, 4.0]];
/// let mut values = buffered_float_vector_values(docs, &buffer);
///
/// assert_eq!(values.advance(), 4);
/// assert_eq!(values.vector(), &[1.0, 2.0]);
/// assert_eq!(values.advance(), 9);
/// assert_eq!(values.vector(), &[3.0, 4.0]);
/// assert_eq!(values.advance(), NO_MORE_DOCS);
/// ```
pub struct VectorValues<'a, T: VectorElement> {
    source: ValueSource<'a, T>,
    /// Dimension of the last vector read, once any vector has been read.
    dimension: Option<usize>,
}

impl<'a, T: VectorElement> VectorValues<'a, T> {
    fn index_resident(docs: Box<dyn DocIdIterator + 'a>, reader: &'a dyn VectorReader<T>) -> Self {
        Self {
            source: ValueSource::IndexResident { docs, reader },
            dimension: None,
        }
    }

    fn buffered(docs: Box<dyn DocIdIterator + 'a>, vectors: &'a [Vec<T>]) -> Self {
        Self {
            source: ValueSource::Buffered {
                docs,
                vectors,
                position: None,
            },
            dimension: None,
        }
    }

    /// Advance to the next document and return its id, or `NO_MORE_DOCS`
    /// when the sequence is exhausted.
    pub fn advance(&mut self) -> DocId {
        match &mut self.source {
            ValueSource::IndexResident { docs, .. } => docs.advance(),
            ValueSource::Buffered { docs, position, .. } => {
                let doc = docs.advance();
                if doc != NO_MORE_DOCS {
                    *position = Some(position.map_or(0, |p| p + 1));
                }
                doc
            }
        }
    }

    /// The current document id, without advancing.
    pub fn doc_id(&self) -> DocId {
        match &self.source {
            ValueSource::IndexResident { docs, .. } => docs.doc_id(),
            ValueSource::Buffered { docs, .. } => docs.doc_id(),
        }
    }

    /// The vector for the current document.
    ///
    /// # Panics
    /// Calling this before the first `advance()`, after exhaustion, when the
    /// store holds no vector for the current document, or when the buffered
    /// sequence is shorter than the emitted document sequence is a caller
    /// defect, not a recoverable condition, and panics with a diagnostic.
    pub fn vector(&mut self) -> &[T] {
        let vector: &[T] = match &self.source {
            ValueSource::IndexResident { docs, reader } => {
                let doc = docs.doc_id();
                assert!(
                    doc != NO_MORE_DOCS,
                    "vector() called after document iteration was exhausted"
                );
                reader
                    .vector(doc)
                    .unwrap_or_else(|| panic!("no vector stored for doc {doc}"))
            }
            ValueSource::Buffered {
                vectors, position, ..
            } => {
                let Some(pos) = *position else {
                    panic!("vector() called before the first advance()");
                };
                assert!(
                    pos < vectors.len(),
                    "emission position {pos} outside buffered vector range (len {})",
                    vectors.len()
                );
                &vectors[pos]
            }
        };
        self.dimension = Some(vector.len());
        vector
    }

    /// Dimension of the vectors, known once any vector has been read.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// The element encoding this facade yields.
    pub fn element_type(&self) -> ElementType {
        T::element_type()
    }
}
