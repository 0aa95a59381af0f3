//! Nearest-centroid classification of images into three classes.
//!
//! Each image is reduced to a 64x64 grayscale vector scaled into [0, 1].
//! A class is represented by the mean of its training vectors, and an unknown
//! image is assigned to the class whose centroid is nearest in L1 distance.

mod centroid;
mod class;
mod classifier;
mod config;
mod error;
mod features;
mod report;
mod scan;
mod session;

pub use centroid::{Centroid, compute_centroid};
pub use class::{CLASS_COUNT, ClassId};
pub use classifier::{ClassificationResult, classify, manhattan_distance};
pub use config::{Config, MIN_TRAINING_IMAGES, ResizeFilter};
pub use error::{Error, Result};
pub use features::{
    FEATURE_LEN, FEATURE_SIDE, FeatureVector, decode_image, extract_batch, extract_features,
    extract_features_with, extract_from_path, extract_images, open_image,
};
pub use report::{QueryRow, export_csv, format_distances, loaded_message};
pub use scan::{ScanOptions, collect_images, collect_many};
pub use session::{ClassSlot, SessionPhase, TrainingState};
