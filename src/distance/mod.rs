//! Distance metric identifiers.
//!
//! Only the metric vocabulary lives here: quantization models record which
//! space they were calibrated for, and persisted quantizer state tags it on
//! disk. The distance kernels themselves belong to the consuming index
//! engines.

use std::fmt;

/// Distance/similarity function a model or index is calibrated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// L2 (Euclidean) squared distance.
    L2,
    /// L1 (Manhattan) distance.
    L1,
    /// Inner product (negated for use as a distance).
    InnerProduct,
    /// 1 - cosine similarity.
    Cosine,
}

impl Metric {
    /// Metric assumed when a request does not name one.
    pub const DEFAULT: Metric = Metric::L2;

    /// Get the wire name for the metric.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::L2 => "l2",
            Metric::L1 => "l1",
            Metric::InnerProduct => "innerproduct",
            Metric::Cosine => "cosine",
        }
    }

    /// Decode a metric from its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "l2" => Some(Metric::L2),
            "l1" => Some(Metric::L1),
            "innerproduct" => Some(Metric::InnerProduct),
            "cosine" => Some(Metric::Cosine),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
