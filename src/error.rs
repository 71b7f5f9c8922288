//! Error types shared by every module of the crate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural failures. Numerical divergence (NaN/Inf loss) is deliberately
/// not represented here; it shows up in the reported epoch statistics instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Two tensors (or a tensor and the configured architecture) disagree on shape.
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: String,
        actual: String,
    },

    /// A label is not a valid class index.
    #[error("label {label} at sample {index} is out of range for {num_classes} classes")]
    LabelOutOfRange {
        index: usize,
        label: usize,
        num_classes: usize,
    },

    /// A size or hyperparameter is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Convenience constructor for shape errors, formatting `(rows × cols)` pairs.
    pub fn shape(context: &'static str, expected: (usize, usize), actual: (usize, usize)) -> Error {
        Error::ShapeMismatch {
            context,
            expected: format!("({} × {})", expected.0, expected.1),
            actual: format!("({} × {})", actual.0, actual.1),
        }
    }
}
