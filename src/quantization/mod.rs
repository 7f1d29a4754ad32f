//! Trained quantizer state persisted alongside an index.
//!
//! One-bit scalar quantization keeps a threshold per dimension; a vector
//! component maps to 1 when it sits above the threshold for its dimension.
//! The training that produces the thresholds happens elsewhere; this module
//! is the container and its versioned on-disk form.

use crate::distance::Metric;
use crate::serialization::{
    read_f32_vec, read_u32, read_u8, write_f32_slice, write_u32, write_u8, SerializationError,
    SerializationResult,
};
use std::io::Cursor;

/// Magic number for persisted quantizer state.
pub const STATE_MAGIC: u32 = 0x5651_5331; // "VQS1" in hex

/// Current state encoding version.
pub const STATE_VERSION: u32 = 1;

/// Per-dimension thresholds for one-bit scalar quantization.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarQuantizerState {
    metric: Metric,
    thresholds: Vec<f32>,
}

impl ScalarQuantizerState {
    /// Wrap trained thresholds.
    ///
    /// # Errors
    /// `InvalidData` when `thresholds` is empty.
    pub fn new(metric: Metric, thresholds: Vec<f32>) -> SerializationResult<Self> {
        if thresholds.is_empty() {
            return Err(SerializationError::InvalidData(
                "quantizer state requires at least one threshold".to_string(),
            ));
        }
        Ok(Self { metric, thresholds })
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Number of dimensions covered, one threshold per dimension.
    pub fn dimension(&self) -> usize {
        self.thresholds.len()
    }

    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }

    /// Encode to the versioned binary form.
    pub fn to_bytes(&self) -> SerializationResult<Vec<u8>> {
        let mut buffer = Vec::with_capacity(4 + 4 + 1 + 8 + self.thresholds.len() * 4);
        write_u32(&mut buffer, STATE_MAGIC)?;
        write_u32(&mut buffer, STATE_VERSION)?;
        write_u8(&mut buffer, metric_to_u8(self.metric))?;
        write_f32_slice(&mut buffer, &self.thresholds)?;
        Ok(buffer)
    }

    /// Decode from the versioned binary form.
    ///
    /// # Errors
    /// `InvalidMagicNumber` / `UnsupportedVersion` on a foreign or newer
    /// stream, `InvalidData` on an unknown metric tag or empty thresholds,
    /// `Io` on truncation. A corrupt stream never yields a state object.
    pub fn from_bytes(bytes: &[u8]) -> SerializationResult<Self> {
        let mut cursor = Cursor::new(bytes);

        let magic = read_u32(&mut cursor)?;
        if magic != STATE_MAGIC {
            return Err(SerializationError::InvalidMagicNumber {
                expected: STATE_MAGIC,
                got: magic,
            });
        }

        let version = read_u32(&mut cursor)?;
        if version > STATE_VERSION {
            return Err(SerializationError::UnsupportedVersion(version));
        }

        let metric = metric_from_u8(read_u8(&mut cursor)?)?;
        let thresholds = read_f32_vec(&mut cursor)?;

        let state = Self::new(metric, thresholds)?;
        tracing::debug!(
            metric = state.metric.name(),
            dimension = state.dimension(),
            "loaded quantizer state"
        );
        Ok(state)
    }
}

fn metric_to_u8(metric: Metric) -> u8 {
    match metric {
        Metric::L2 => 1,
        Metric::L1 => 2,
        Metric::InnerProduct => 3,
        Metric::Cosine => 4,
    }
}

fn metric_from_u8(value: u8) -> SerializationResult<Metric> {
    match value {
        1 => Ok(Metric::L2),
        2 => Ok(Metric::L1),
        3 => Ok(Metric::InnerProduct),
        4 => Ok(Metric::Cosine),
        _ => Err(SerializationError::InvalidData(format!(
            "Invalid metric tag: {value}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn test_state_roundtrip() {
        let mut rng = StdRng::seed_from_u64(42);
        let thresholds: Vec<f32> = (0..128).map(|_| rng.gen_range(-2.0..2.0)).collect();
        let state = ScalarQuantizerState::new(Metric::Cosine, thresholds.clone()).unwrap();

        let bytes = state.to_bytes().unwrap();
        let loaded = ScalarQuantizerState::from_bytes(&bytes).unwrap();

        assert_eq!(loaded, state);
        assert_eq!(loaded.metric(), Metric::Cosine);
        assert_eq!(loaded.dimension(), 128);
        for (original, loaded) in thresholds.iter().zip(loaded.thresholds()) {
            assert_eq!(original.to_bits(), loaded.to_bits());
        }
    }

    #[test]
    fn test_empty_thresholds_rejected() {
        let err = ScalarQuantizerState::new(Metric::L2, Vec::new()).unwrap_err();
        assert!(matches!(err, SerializationError::InvalidData(_)));
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let state = ScalarQuantizerState::new(Metric::L2, vec![0.5]).unwrap();
        let mut bytes = state.to_bytes().unwrap();
        bytes[0] ^= 0xFF;

        let err = ScalarQuantizerState::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, SerializationError::InvalidMagicNumber { .. }));
    }

    #[test]
    fn test_newer_version_rejected() {
        let state = ScalarQuantizerState::new(Metric::L2, vec![0.5]).unwrap();
        let mut bytes = state.to_bytes().unwrap();
        // Bump the version field past the current one.
        bytes[4..8].copy_from_slice(&(STATE_VERSION + 1).to_le_bytes());

        let err = ScalarQuantizerState::from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            SerializationError::UnsupportedVersion(v) if v == STATE_VERSION + 1
        ));
    }

    #[test]
    fn test_unknown_metric_tag_rejected() {
        let state = ScalarQuantizerState::new(Metric::L2, vec![0.5]).unwrap();
        let mut bytes = state.to_bytes().unwrap();
        bytes[8] = 99;

        let err = ScalarQuantizerState::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, SerializationError::InvalidData(_)));
    }

    #[test]
    fn test_truncated_stream_rejected() {
        let state = ScalarQuantizerState::new(Metric::L2, vec![0.5, 1.5, 2.5]).unwrap();
        let bytes = state.to_bytes().unwrap();

        let err = ScalarQuantizerState::from_bytes(&bytes[..bytes.len() - 3]).unwrap_err();
        assert!(matches!(err, SerializationError::Io(_)));
    }
}
