//! Error type shared by every stage of the pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::ClassId;

#[derive(Error, Debug)]
pub enum Error {
    /// The image could not be read or decoded, or it has no pixels.
    #[error("cannot decode image {origin}: {reason}")]
    Decode { origin: String, reason: String },

    #[error("cannot compute a centroid over zero feature vectors")]
    EmptyInput,

    #[error("train all classes first (untrained: {})", list_classes(.missing))]
    IncompleteTraining { missing: Vec<ClassId> },

    #[error("{class} needs at least {required} images, got {actual}")]
    TooFewImages {
        class: ClassId,
        required: usize,
        actual: usize,
    },

    #[error("feature vector length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("feature value {value} at position {index} is outside [0, 1]")]
    ValueOutOfRange { index: usize, value: f64 },

    #[error("invalid class index {0}, expected 0, 1 or 2")]
    InvalidClass(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

fn list_classes(classes: &[ClassId]) -> String {
    classes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
