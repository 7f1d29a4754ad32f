//! Model metadata and its training lifecycle.
//!
//! Metadata is validated at construction and treated as an immutable value
//! afterwards: lifecycle transitions consume the old value and return a new
//! one, so a terminal state can never be left.

use crate::distance::Metric;
use chrono::Utc;
use std::fmt;
use thiserror::Error;

/// Upper bound on vector dimensionality accepted for a model.
pub const MAX_DIMENSION: usize = 16_000;

/// Errors raised when building a model or transitioning its metadata.
///
/// These are invalid-argument conditions: construction either fully
/// succeeds or produces no object.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Dimension {0} is out of bounds: must be in (0, {max}]", max = MAX_DIMENSION)]
    InvalidDimension(usize),

    #[error("A model in state '{0}' requires a blob")]
    BlobRequired(ModelState),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: ModelState, to: ModelState },
}

/// Training lifecycle state of a model.
///
/// `Training` is the initial state; `Created` and `Failed` are terminal.
/// A retry after failure is a new metadata instance, not a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelState {
    /// Training finished; the model blob is attached and usable.
    Created,
    /// Training is in progress; no blob exists yet.
    Training,
    /// Training failed; the error field explains why, no blob exists.
    Failed,
}

impl ModelState {
    /// Get the wire name for the state.
    pub fn name(&self) -> &'static str {
        match self {
            ModelState::Created => "created",
            ModelState::Training => "training",
            ModelState::Failed => "failed",
        }
    }

    /// Decode a state from its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "created" => Some(ModelState::Created),
            "training" => Some(ModelState::Training),
            "failed" => Some(ModelState::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Downstream index engine a model targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    /// HNSW graph indices.
    Hnsw,
    /// SVS (Vamana-style) graph indices with quantized storage.
    Svs,
    /// Disk-resident indices.
    Disk,
}

impl Engine {
    /// Engine assumed when a request does not name one.
    pub const DEFAULT: Engine = Engine::Hnsw;

    /// Get the wire name for the engine.
    pub fn name(&self) -> &'static str {
        match self {
            Engine::Hnsw => "hnsw",
            Engine::Svs => "svs",
            Engine::Disk => "disk",
        }
    }

    /// Decode an engine from its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hnsw" => Some(Engine::Hnsw),
            "svs" => Some(Engine::Svs),
            "disk" => Some(Engine::Disk),
            _ => None,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated configuration and lifecycle state of a quantization model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelMetadata {
    engine: Engine,
    metric: Metric,
    dimension: usize,
    state: ModelState,
    /// ISO-8601 creation/last-update time in UTC.
    timestamp: String,
    description: String,
    /// Populated only when `state` is `Failed`.
    error: String,
}

impl ModelMetadata {
    /// Build metadata from explicit fields.
    ///
    /// The dimension type rules out negative values; zero and anything
    /// above `MAX_DIMENSION` are rejected here.
    ///
    /// # Errors
    /// `InvalidDimension` unless `0 < dimension <= MAX_DIMENSION`.
    pub fn new(
        engine: Engine,
        metric: Metric,
        dimension: usize,
        state: ModelState,
        timestamp: impl Into<String>,
        description: impl Into<String>,
        error: impl Into<String>,
    ) -> Result<Self, ModelError> {
        if dimension == 0 || dimension > MAX_DIMENSION {
            return Err(ModelError::InvalidDimension(dimension));
        }
        Ok(Self {
            engine,
            metric,
            dimension,
            state,
            timestamp: timestamp.into(),
            description: description.into(),
            error: error.into(),
        })
    }

    /// Start metadata for a new training request.
    ///
    /// Stamps the current UTC time and begins in `Training` with no error.
    ///
    /// # Errors
    /// `InvalidDimension` unless `0 < dimension <= MAX_DIMENSION`.
    pub fn training(
        engine: Engine,
        metric: Metric,
        dimension: usize,
        description: impl Into<String>,
    ) -> Result<Self, ModelError> {
        Self::new(
            engine,
            metric,
            dimension,
            ModelState::Training,
            Utc::now().to_rfc3339(),
            description,
            "",
        )
    }

    /// Record successful training completion.
    ///
    /// Only valid from `Training`; refreshes the timestamp. The blob itself
    /// is attached on the owning `Model`.
    ///
    /// # Errors
    /// `InvalidTransition` when the current state is terminal.
    pub fn into_created(self) -> Result<Self, ModelError> {
        if self.state != ModelState::Training {
            return Err(ModelError::InvalidTransition {
                from: self.state,
                to: ModelState::Created,
            });
        }
        tracing::debug!(
            engine = self.engine.name(),
            dimension = self.dimension,
            "model training completed"
        );
        Ok(Self {
            state: ModelState::Created,
            timestamp: Utc::now().to_rfc3339(),
            ..self
        })
    }

    /// Record a training failure with its error message.
    ///
    /// Only valid from `Training`; refreshes the timestamp.
    ///
    /// # Errors
    /// `InvalidTransition` when the current state is terminal.
    pub fn into_failed(self, error: impl Into<String>) -> Result<Self, ModelError> {
        if self.state != ModelState::Training {
            return Err(ModelError::InvalidTransition {
                from: self.state,
                to: ModelState::Failed,
            });
        }
        let error = error.into();
        tracing::debug!(
            engine = self.engine.name(),
            error = %error,
            "model training failed"
        );
        Ok(Self {
            state: ModelState::Failed,
            timestamp: Utc::now().to_rfc3339(),
            error,
            ..self
        })
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn error(&self) -> &str {
        &self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2023-05-17T10:30:00+00:00";

    fn metadata(dimension: usize, state: ModelState) -> Result<ModelMetadata, ModelError> {
        ModelMetadata::new(Engine::DEFAULT, Metric::L2, dimension, state, TS, "", "")
    }

    #[test]
    fn test_dimension_bounds() {
        assert!(matches!(
            metadata(0, ModelState::Created),
            Err(ModelError::InvalidDimension(0))
        ));
        assert!(matches!(
            metadata(MAX_DIMENSION + 1, ModelState::Created),
            Err(ModelError::InvalidDimension(_))
        ));
        assert!(metadata(1, ModelState::Created).is_ok());
        assert!(metadata(MAX_DIMENSION, ModelState::Created).is_ok());
    }

    #[test]
    fn test_dimension_rejected_regardless_of_state() {
        for state in [ModelState::Created, ModelState::Training, ModelState::Failed] {
            assert!(metadata(0, state).is_err());
            assert!(metadata(MAX_DIMENSION + 1, state).is_err());
        }
    }

    #[test]
    fn test_training_constructor() {
        let md = ModelMetadata::training(Engine::Svs, Metric::Cosine, 64, "pq-8x8").unwrap();
        assert_eq!(md.state(), ModelState::Training);
        assert_eq!(md.engine(), Engine::Svs);
        assert_eq!(md.metric(), Metric::Cosine);
        assert_eq!(md.dimension(), 64);
        assert_eq!(md.description(), "pq-8x8");
        assert_eq!(md.error(), "");
        assert!(!md.timestamp().is_empty());
    }

    #[test]
    fn test_training_to_created() {
        let md = metadata(8, ModelState::Training).unwrap();
        let md = md.into_created().unwrap();
        assert_eq!(md.state(), ModelState::Created);
        assert_eq!(md.error(), "");
    }

    #[test]
    fn test_training_to_failed() {
        let md = metadata(8, ModelState::Training).unwrap();
        let md = md.into_failed("out of training samples").unwrap();
        assert_eq!(md.state(), ModelState::Failed);
        assert_eq!(md.error(), "out of training samples");
    }

    #[test]
    fn test_no_transition_out_of_terminal_states() {
        for state in [ModelState::Created, ModelState::Failed] {
            let err = metadata(8, state).unwrap().into_created().unwrap_err();
            assert!(matches!(err, ModelError::InvalidTransition { .. }));

            let err = metadata(8, state).unwrap().into_failed("x").unwrap_err();
            assert!(matches!(err, ModelError::InvalidTransition { .. }));
        }
    }

    #[test]
    fn test_state_names() {
        for state in [ModelState::Created, ModelState::Training, ModelState::Failed] {
            assert_eq!(ModelState::from_name(state.name()), Some(state));
        }
        assert_eq!(ModelState::from_name("CREATED"), None);
    }

    #[test]
    fn test_engine_names() {
        for engine in [Engine::Hnsw, Engine::Svs, Engine::Disk] {
            assert_eq!(Engine::from_name(engine.name()), Some(engine));
        }
        assert_eq!(Engine::from_name("faiss"), None);
        assert_eq!(Engine::DEFAULT, Engine::Hnsw);
    }

    #[test]
    fn test_metadata_equality() {
        let a = metadata(8, ModelState::Created).unwrap();
        let b = metadata(8, ModelState::Created).unwrap();
        let c = metadata(16, ModelState::Created).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
