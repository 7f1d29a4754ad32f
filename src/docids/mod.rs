//! Document id iteration boundary.
//!
//! A `DocIdIterator` produces a monotonically increasing, exhaustible
//! sequence of document ids terminated by `NO_MORE_DOCS`. The ordering
//! policy behind the ids is opaque to this crate; consumers rely only on
//! the two-operation contract.

use crate::types::{DocId, NO_MORE_DOCS};
use thiserror::Error;

/// Errors that can occur constructing a document id sequence.
#[derive(Error, Debug)]
pub enum DocIdError {
    #[error("Doc ids must be strictly ascending: {prev} then {next} at position {position}")]
    NotAscending {
        prev: DocId,
        next: DocId,
        position: usize,
    },

    #[error("Doc id {0} collides with the exhaustion sentinel")]
    ReservedId(DocId),
}

/// Forward-only cursor over document ids.
///
/// `advance()` mutates internal state; a single instance must not be used
/// from multiple threads without external synchronization.
pub trait DocIdIterator {
    /// Advance to the next document and return its id, or `NO_MORE_DOCS`
    /// when the sequence is exhausted.
    fn advance(&mut self) -> DocId;

    /// The current document id, without advancing.
    ///
    /// Unspecified before the first `advance()`; implementations may panic.
    fn doc_id(&self) -> DocId;
}

/// Iterator over a strictly ascending list of document ids.
#[derive(Debug)]
pub struct SortedDocIds {
    ids: Vec<DocId>,
    /// Index of the current id; `None` before the first advance.
    cursor: Option<usize>,
}

impl SortedDocIds {
    /// Wrap an ascending id list.
    ///
    /// # Errors
    /// - `NotAscending` if any id is not strictly greater than its predecessor
    /// - `ReservedId` if any id equals `NO_MORE_DOCS`
    pub fn new(ids: Vec<DocId>) -> Result<Self, DocIdError> {
        for (position, pair) in ids.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                return Err(DocIdError::NotAscending {
                    prev: pair[0],
                    next: pair[1],
                    position: position + 1,
                });
            }
        }
        if let Some(&id) = ids.iter().find(|&&id| id == NO_MORE_DOCS) {
            return Err(DocIdError::ReservedId(id));
        }
        Ok(Self { ids, cursor: None })
    }

    /// Total number of ids in the sequence.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the sequence holds no ids at all.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl DocIdIterator for SortedDocIds {
    fn advance(&mut self) -> DocId {
        let next = match self.cursor {
            None => 0,
            // Capped at len so repeated advances past the end stay exhausted.
            Some(current) => (current + 1).min(self.ids.len()),
        };
        self.cursor = Some(next);
        self.ids.get(next).copied().unwrap_or(NO_MORE_DOCS)
    }

    fn doc_id(&self) -> DocId {
        match self.cursor {
            None => panic!("doc_id() called before the first advance()"),
            Some(current) => self.ids.get(current).copied().unwrap_or(NO_MORE_DOCS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yields_ids_in_order_then_sentinel() {
        let mut docs = SortedDocIds::new(vec![2, 7, 11]).unwrap();

        assert_eq!(docs.advance(), 2);
        assert_eq!(docs.doc_id(), 2);
        assert_eq!(docs.advance(), 7);
        assert_eq!(docs.advance(), 11);
        assert_eq!(docs.doc_id(), 11);

        assert_eq!(docs.advance(), NO_MORE_DOCS);
        assert_eq!(docs.doc_id(), NO_MORE_DOCS);
        // Exhaustion is stable across repeated advances.
        assert_eq!(docs.advance(), NO_MORE_DOCS);
        assert_eq!(docs.advance(), NO_MORE_DOCS);
    }

    #[test]
    fn test_empty_sequence_is_immediately_exhausted() {
        let mut docs = SortedDocIds::new(Vec::new()).unwrap();
        assert!(docs.is_empty());
        assert_eq!(docs.advance(), NO_MORE_DOCS);
    }

    #[test]
    #[should_panic(expected = "before the first advance")]
    fn test_doc_id_before_advance_panics() {
        let docs = SortedDocIds::new(vec![1, 2]).unwrap();
        let _ = docs.doc_id();
    }

    #[test]
    fn test_rejects_unsorted_ids() {
        let err = SortedDocIds::new(vec![3, 3, 5]).unwrap_err();
        assert!(matches!(err, DocIdError::NotAscending { position: 1, .. }));

        let err = SortedDocIds::new(vec![9, 4]).unwrap_err();
        assert!(matches!(
            err,
            DocIdError::NotAscending { prev: 9, next: 4, .. }
        ));
    }

    #[test]
    fn test_rejects_sentinel_id() {
        let err = SortedDocIds::new(vec![1, NO_MORE_DOCS]).unwrap_err();
        assert!(matches!(err, DocIdError::ReservedId(id) if id == NO_MORE_DOCS));
    }

    #[test]
    fn test_len() {
        let docs = SortedDocIds::new(vec![0, 1, 2, 3]).unwrap();
        assert_eq!(docs.len(), 4);
    }
}
