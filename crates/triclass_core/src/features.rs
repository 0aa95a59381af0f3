//! Feature extraction: color image to a normalized 64x64 grayscale vector.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, imageops};
use rayon::prelude::*;

use crate::config::ResizeFilter;
use crate::error::{Error, Result};

/// Side of the square grid every image is resampled to.
pub const FEATURE_SIDE: u32 = 64;
/// Number of values in a feature vector.
pub const FEATURE_LEN: usize = (FEATURE_SIDE * FEATURE_SIDE) as usize;

/// Flattened, row-major grayscale image with intensities in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Wraps raw values, checking length and range.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.len() != FEATURE_LEN {
            return Err(Error::LengthMismatch {
                expected: FEATURE_LEN,
                actual: values.len(),
            });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(Error::ValueOutOfRange { index, value });
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Extract features with the default (bilinear) resampling filter.
pub fn extract_features(image: &DynamicImage) -> Result<FeatureVector> {
    extract_features_with(image, ResizeFilter::default())
}

/// Grayscale, resize to 64x64, flatten row-major, scale by 1/255.
pub fn extract_features_with(image: &DynamicImage, filter: ResizeFilter) -> Result<FeatureVector> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Err(Error::Decode {
            origin: "<memory>".to_string(),
            reason: format!("image has no pixels ({w}x{h})"),
        });
    }
    let gray = image.to_luma8();
    let resized = imageops::resize(&gray, FEATURE_SIDE, FEATURE_SIDE, filter.into());
    let values: Vec<f64> = resized
        .into_raw()
        .into_iter()
        .map(|v| f64::from(v) / 255.0)
        .collect();
    debug_assert_eq!(values.len(), FEATURE_LEN);
    Ok(FeatureVector(values))
}

/// Decode an in-memory encoded image (PNG, JPEG, ...).
pub fn decode_image(bytes: &[u8], origin: &str) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(Error::Decode {
            origin: origin.to_string(),
            reason: "no data".to_string(),
        });
    }
    image::load_from_memory(bytes).map_err(|e| Error::Decode {
        origin: origin.to_string(),
        reason: e.to_string(),
    })
}

pub fn open_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    image::open(path).map_err(|e| Error::Decode {
        origin: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn extract_from_path(path: impl AsRef<Path>, filter: ResizeFilter) -> Result<FeatureVector> {
    let path = path.as_ref();
    let image = open_image(path)?;
    extract_features_with(&image, filter).map_err(|e| match e {
        Error::Decode { reason, .. } => Error::Decode {
            origin: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

/// Extract every file of a batch, keeping input order.
///
/// The first failure aborts the whole batch; no vector is returned for a
/// partially decoded set.
pub fn extract_batch(
    paths: &[PathBuf],
    filter: ResizeFilter,
    parallel: bool,
) -> Result<Vec<FeatureVector>> {
    tracing::debug!(count = paths.len(), parallel, "extracting features");
    if parallel {
        paths
            .par_iter()
            .map(|p| extract_from_path(p, filter))
            .collect()
    } else {
        paths.iter().map(|p| extract_from_path(p, filter)).collect()
    }
}

/// Same as [`extract_batch`] for images already held in memory.
pub fn extract_images(
    images: &[DynamicImage],
    filter: ResizeFilter,
    parallel: bool,
) -> Result<Vec<FeatureVector>> {
    if parallel {
        images
            .par_iter()
            .map(|img| extract_features_with(img, filter))
            .collect()
    } else {
        images
            .iter()
            .map(|img| extract_features_with(img, filter))
            .collect()
    }
}
