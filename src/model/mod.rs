//! Quantization model entity and its persistence boundary.
//!
//! A trained model is an opaque parameter blob plus validated metadata.
//! Models are immutable value objects once published, with one deliberate
//! escape hatch: the blob can be replaced wholesale. The persisted form is
//! a flat key-value map with the blob carried as base64 text.

mod metadata;

pub use metadata::{Engine, ModelError, ModelMetadata, ModelState, MAX_DIMENSION};

use crate::distance::Metric;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{Map, Value};
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Source-map field name for the target engine.
pub const MODEL_ENGINE: &str = "engine";
/// Source-map field name for the calibrated metric.
pub const MODEL_METRIC: &str = "metric";
/// Source-map field name for the vector dimension.
pub const MODEL_DIMENSION: &str = "dimension";
/// Source-map field name for the lifecycle state.
pub const MODEL_STATE: &str = "state";
/// Source-map field name for the ISO-8601 UTC timestamp.
pub const MODEL_TIMESTAMP: &str = "timestamp";
/// Source-map field name for the free-text description.
pub const MODEL_DESCRIPTION: &str = "description";
/// Source-map field name for the failure message.
pub const MODEL_ERROR: &str = "error";
/// Source-map field name for the base64-encoded blob.
pub const MODEL_BLOB: &str = "model_blob";

/// Errors raised when decoding a model from its persisted map form.
///
/// Kept distinct from [`ModelError`] so callers can tell bad stored data
/// from bad caller input.
#[derive(Error, Debug)]
pub enum ModelSourceError {
    #[error("Missing required field '{0}' in model source")]
    MissingField(&'static str),

    #[error("Field '{field}' has the wrong shape: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Unknown {field} value '{value}'")]
    UnknownName { field: &'static str, value: String },

    #[error("Model blob is not valid base64: {0}")]
    Blob(#[from] base64::DecodeError),

    #[error(transparent)]
    Invalid(#[from] ModelError),
}

/// A trained quantization model: opaque parameter blob plus metadata.
///
/// Equality and hashing cover the metadata and the blob bytes; the optional
/// backing-store id is addressing only and does not participate.
#[derive(Debug, Clone)]
pub struct Model {
    metadata: ModelMetadata,
    /// Absent only while the metadata state is non-terminal (`Training`)
    /// or after a failure.
    blob: Option<Vec<u8>>,
    model_id: Option<String>,
}

impl Model {
    /// Build a model from metadata and an optional blob.
    ///
    /// # Errors
    /// `BlobRequired` when the metadata state is `Created` and no blob is
    /// given. A model never exists partially constructed.
    pub fn new(metadata: ModelMetadata, blob: Option<Vec<u8>>) -> Result<Self, ModelError> {
        Self::build(metadata, blob, None)
    }

    /// Build a model carrying its backing-store id.
    ///
    /// # Errors
    /// Same conditions as [`Model::new`].
    pub fn with_id(
        metadata: ModelMetadata,
        blob: Option<Vec<u8>>,
        model_id: impl Into<String>,
    ) -> Result<Self, ModelError> {
        Self::build(metadata, blob, Some(model_id.into()))
    }

    fn build(
        metadata: ModelMetadata,
        blob: Option<Vec<u8>>,
        model_id: Option<String>,
    ) -> Result<Self, ModelError> {
        if metadata.state() == ModelState::Created && blob.is_none() {
            return Err(ModelError::BlobRequired(ModelState::Created));
        }
        Ok(Self {
            metadata,
            blob,
            model_id,
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// The trained parameter blob, when one is attached.
    pub fn model_blob(&self) -> Option<&[u8]> {
        self.blob.as_deref()
    }

    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }

    /// Blob byte length, or 0 when the blob is absent. Never fails.
    pub fn length(&self) -> usize {
        self.blob.as_ref().map_or(0, Vec::len)
    }

    /// Replace the blob wholesale.
    ///
    /// Metadata is left untouched and the state/blob invariant is not
    /// re-checked here; a caller replacing the blob of a model whose state
    /// did not produce it must re-validate that consistency itself.
    pub fn set_model_blob(&mut self, blob: Vec<u8>) {
        self.blob = Some(blob);
    }

    /// Encode to the flat key-value map persisted by the model store.
    ///
    /// The blob key is omitted when no blob is attached.
    pub fn to_source_map(&self) -> Map<String, Value> {
        let md = &self.metadata;
        let mut map = Map::new();
        map.insert(MODEL_ENGINE.to_string(), Value::from(md.engine().name()));
        map.insert(MODEL_METRIC.to_string(), Value::from(md.metric().name()));
        map.insert(MODEL_DIMENSION.to_string(), Value::from(md.dimension() as u64));
        map.insert(MODEL_STATE.to_string(), Value::from(md.state().name()));
        map.insert(MODEL_TIMESTAMP.to_string(), Value::from(md.timestamp()));
        map.insert(MODEL_DESCRIPTION.to_string(), Value::from(md.description()));
        map.insert(MODEL_ERROR.to_string(), Value::from(md.error()));
        if let Some(blob) = &self.blob {
            map.insert(MODEL_BLOB.to_string(), Value::from(BASE64.encode(blob)));
        }
        map
    }

    /// Decode a model from its persisted map form.
    ///
    /// The dimension bound and the state/blob invariant are enforced
    /// exactly as at construction, so bad stored data never yields a
    /// partially valid model.
    ///
    /// # Errors
    /// `ModelSourceError` when a required field is missing, mis-shaped, or
    /// names an unknown engine/metric/state, or when the blob is not valid
    /// base64.
    pub fn from_source_map(
        map: &Map<String, Value>,
        model_id: impl Into<String>,
    ) -> Result<Self, ModelSourceError> {
        let engine_name = str_field(map, MODEL_ENGINE)?;
        let engine = Engine::from_name(engine_name).ok_or_else(|| ModelSourceError::UnknownName {
            field: MODEL_ENGINE,
            value: engine_name.to_string(),
        })?;

        let metric_name = str_field(map, MODEL_METRIC)?;
        let metric = Metric::from_name(metric_name).ok_or_else(|| ModelSourceError::UnknownName {
            field: MODEL_METRIC,
            value: metric_name.to_string(),
        })?;

        let dimension = map
            .get(MODEL_DIMENSION)
            .ok_or(ModelSourceError::MissingField(MODEL_DIMENSION))?
            .as_u64()
            .ok_or(ModelSourceError::InvalidField {
                field: MODEL_DIMENSION,
                expected: "unsigned integer",
            })? as usize;

        let state_name = str_field(map, MODEL_STATE)?;
        let state =
            ModelState::from_name(state_name).ok_or_else(|| ModelSourceError::UnknownName {
                field: MODEL_STATE,
                value: state_name.to_string(),
            })?;

        let timestamp = str_field(map, MODEL_TIMESTAMP)?;
        let description = str_field(map, MODEL_DESCRIPTION)?;
        let error = str_field(map, MODEL_ERROR)?;

        let blob = match map.get(MODEL_BLOB) {
            Some(value) => {
                let text = value.as_str().ok_or(ModelSourceError::InvalidField {
                    field: MODEL_BLOB,
                    expected: "base64 string",
                })?;
                Some(BASE64.decode(text)?)
            }
            None => None,
        };

        let metadata =
            ModelMetadata::new(engine, metric, dimension, state, timestamp, description, error)?;
        let model = Model::with_id(metadata, blob, model_id)?;
        tracing::debug!(
            model_id = model.model_id.as_deref().unwrap_or(""),
            state = %model.metadata.state(),
            "decoded model from source map"
        );
        Ok(model)
    }
}

fn str_field<'m>(map: &'m Map<String, Value>, field: &'static str) -> Result<&'m str, ModelSourceError> {
    map.get(field)
        .ok_or(ModelSourceError::MissingField(field))?
        .as_str()
        .ok_or(ModelSourceError::InvalidField {
            field,
            expected: "string",
        })
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata && self.blob == other.blob
    }
}

impl Eq for Model {}

impl Hash for Model {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.metadata.hash(state);
        self.blob.hash(state);
    }
}
