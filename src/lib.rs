//! VecIdx - vector iteration and quantization-model primitives for ANN indexing.
//!
//! This library provides the two building blocks an indexing subsystem needs
//! before any nearest-neighbor structure sees a vector:
//!
//! - **Vector values**: a uniform, typed cursor over per-document vectors,
//!   whether they live in an already-built index segment or in a buffer of
//!   freshly written vectors. The same consumer code walks both origins.
//!
//! - **Quantization models**: a validated, versioned, equality-comparable
//!   container for trained quantizer artifacts, with a flat map form for the
//!   model store and a bit-exact binary codec for the float arrays behind it.
//!
//! # Walking buffered vectors
//!
//! Doc ids emitted during a merge may be remapped and non-contiguous, so the
//! buffered source looks vectors up by emission position, never by id value:
//!
//! ```rust
//! use vecidx::docids::SortedDocIds;
//! use vecidx::types::NO_MORE_DOCS;
//! use vecidx::values::factory::buffered_float_vector_values;
//!
//! let docs = SortedDocIds::new(vec![5, 9, 12]).unwrap();
//! let vectors = vec![vec![0.0f32, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]];
//! let mut values = buffered_float_vector_values(docs, &vectors);
//!
//! let mut seen = Vec::new();
//! while values.advance() != NO_MORE_DOCS {
//!     seen.push(values.vector().to_vec());
//! }
//! assert_eq!(seen.len(), 3);
//! assert_eq!(seen[0], vec![0.0, 1.0]);
//! ```
//!
//! # Model lifecycle
//!
//! Metadata starts in `Training`, moves once to `Created` or `Failed`, and a
//! model round-trips through the persisted map form without loss:
//!
//! ```rust
//! use vecidx::distance::Metric;
//! use vecidx::model::{Engine, Model, ModelMetadata, ModelState};
//!
//! let metadata = ModelMetadata::training(Engine::DEFAULT, Metric::L2, 128, "pq-8x8")
//!     .unwrap()
//!     .into_created()
//!     .unwrap();
//! let model = Model::new(metadata, Some(b"trained-params".to_vec())).unwrap();
//! assert_eq!(model.metadata().state(), ModelState::Created);
//!
//! let map = model.to_source_map();
//! let restored = Model::from_source_map(&map, "model-1").unwrap();
//! assert_eq!(restored, model);
//! ```

pub mod distance;
pub mod docids;
pub mod model;
pub mod quantization;
pub mod serialization;
pub mod types;
pub mod values;

/// Prelude module for convenient imports.
///
/// Use `use vecidx::prelude::*;` to import commonly used types.
pub mod prelude {
    // Types
    pub use crate::types::{DocId, ElementType, VectorElement, NO_MORE_DOCS};

    // Document iteration
    pub use crate::docids::{DocIdError, DocIdIterator, SortedDocIds};

    // Vector values
    pub use crate::values::factory::{
        buffered_byte_vector_values, buffered_float_vector_values, byte_vector_values,
        float_vector_values, ByteVectorValues, FloatVectorValues,
    };
    pub use crate::values::{VectorReader, VectorValues};

    // Distance
    pub use crate::distance::Metric;

    // Models
    pub use crate::model::{
        Engine, Model, ModelError, ModelMetadata, ModelSourceError, ModelState, MAX_DIMENSION,
    };

    // Quantization
    pub use crate::quantization::ScalarQuantizerState;

    // Serialization
    pub use crate::serialization::{SerializationError, SerializationResult};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let docs = SortedDocIds::new(vec![1, 3]).unwrap();
        let buffer = vec![vec![1.0f32], vec![2.0]];
        let mut values = buffered_float_vector_values(docs, &buffer);

        assert_eq!(values.advance(), 1);
        assert_eq!(values.vector(), &[1.0]);
        assert_eq!(values.element_type(), ElementType::Float);

        let metadata = ModelMetadata::training(Engine::DEFAULT, Metric::DEFAULT, 4, "").unwrap();
        let model = Model::new(metadata, None).unwrap();
        assert_eq!(model.length(), 0);
        assert_eq!(model.metadata().state(), ModelState::Training);
    }
}
