//! TOML-backed settings for training and reporting.

use std::fs;
use std::path::Path;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest training set accepted for a class.
pub const MIN_TRAINING_IMAGES: usize = 5;

/// Resampling filter used when shrinking images to the feature grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub min_training_images: usize,
    pub resize_filter: ResizeFilter,
    /// Extract features of a training batch on the rayon pool.
    pub parallel: bool,
    /// Walk class folders recursively.
    pub recursive: bool,
    /// Decimals printed in the distance report.
    pub precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_training_images: MIN_TRAINING_IMAGES,
            resize_filter: ResizeFilter::default(),
            parallel: true,
            recursive: false,
            precision: 4,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::PathNotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_training_images < MIN_TRAINING_IMAGES {
            return Err(Error::InvalidConfig(format!(
                "min_training_images must be at least {MIN_TRAINING_IMAGES}, got {}",
                self.min_training_images
            )));
        }
        if self.precision > 12 {
            return Err(Error::InvalidConfig(format!(
                "precision must be at most 12, got {}",
                self.precision
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_document_yields_defaults() -> anyhow::Result<()> {
        assert_eq!(Config::from_toml("")?, Config::default());
        Ok(())
    }

    #[test]
    fn reads_overrides_from_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("triclass.toml");
        fs::write(
            &path,
            "min_training_images = 8\nresize_filter = \"catmull-rom\"\nparallel = false\n",
        )?;

        let cfg = Config::load(&path)?;
        assert_eq!(cfg.min_training_images, 8);
        assert_eq!(cfg.resize_filter, ResizeFilter::CatmullRom);
        assert!(!cfg.parallel);
        assert_eq!(cfg.precision, 4);
        Ok(())
    }

    #[test]
    fn rejects_minimum_below_five() {
        let err = Config::from_toml("min_training_images = 2").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = Config::from_toml("classes = 4").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Config::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));
    }
}
