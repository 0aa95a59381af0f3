//! Per-class training state held for the lifetime of a session.

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::centroid::{Centroid, compute_centroid};
use crate::class::{CLASS_COUNT, ClassId};
use crate::classifier::{ClassificationResult, classify};
use crate::config::{Config, MIN_TRAINING_IMAGES};
use crate::error::{Error, Result};
use crate::features::{
    FeatureVector, extract_batch, extract_features_with, extract_from_path, extract_images,
};

/// How far training has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    PartiallyTrained,
    Trained,
}

/// Training data of one class. Replaced as a whole on retraining.
#[derive(Debug, Clone, Default)]
pub struct ClassSlot {
    sources: Vec<PathBuf>,
    features: Vec<FeatureVector>,
    centroid: Option<Centroid>,
}

impl ClassSlot {
    /// Files the class was trained from; empty for in-memory training.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    pub fn centroid(&self) -> Option<&Centroid> {
        self.centroid.as_ref()
    }

    pub fn image_count(&self) -> usize {
        self.features.len()
    }

    pub fn is_trained(&self) -> bool {
        self.centroid.is_some()
    }
}

/// The three class slots plus the settings used to fill them.
#[derive(Debug, Clone, Default)]
pub struct TrainingState {
    config: Config,
    slots: [ClassSlot; CLASS_COUNT],
}

impl TrainingState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            slots: Default::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn slot(&self, class: ClassId) -> &ClassSlot {
        &self.slots[class.index()]
    }

    pub fn phase(&self) -> SessionPhase {
        match self.slots.iter().filter(|s| s.is_trained()).count() {
            0 => SessionPhase::Uninitialized,
            CLASS_COUNT => SessionPhase::Trained,
            _ => SessionPhase::PartiallyTrained,
        }
    }

    pub fn centroids(&self) -> [Option<&Centroid>; CLASS_COUNT] {
        self.slots.each_ref().map(ClassSlot::centroid)
    }

    /// Train `class` from image files. The slot is only replaced on success.
    pub fn train_from_paths(&mut self, class: ClassId, paths: &[PathBuf]) -> Result<&ClassSlot> {
        self.check_count(class, paths.len())?;
        let features = extract_batch(paths, self.config.resize_filter, self.config.parallel)?;
        self.install(class, paths.to_vec(), features)
    }

    /// Train `class` from decoded images.
    pub fn train_from_images(
        &mut self,
        class: ClassId,
        images: &[DynamicImage],
    ) -> Result<&ClassSlot> {
        self.check_count(class, images.len())?;
        let features = extract_images(images, self.config.resize_filter, self.config.parallel)?;
        self.install(class, Vec::new(), features)
    }

    pub fn clear(&mut self, class: ClassId) {
        self.slots[class.index()] = ClassSlot::default();
    }

    pub fn classify_image(&self, image: &DynamicImage) -> Result<ClassificationResult> {
        let unknown = extract_features_with(image, self.config.resize_filter)?;
        self.classify_features(&unknown)
    }

    pub fn classify_path(&self, path: impl AsRef<Path>) -> Result<ClassificationResult> {
        let unknown = extract_from_path(path, self.config.resize_filter)?;
        self.classify_features(&unknown)
    }

    pub fn classify_features(&self, unknown: &FeatureVector) -> Result<ClassificationResult> {
        classify(unknown, self.centroids())
    }

    fn check_count(&self, class: ClassId, actual: usize) -> Result<()> {
        // Configs built in code bypass `Config::validate`.
        let required = self.config.min_training_images.max(MIN_TRAINING_IMAGES);
        if actual < required {
            return Err(Error::TooFewImages {
                class,
                required,
                actual,
            });
        }
        Ok(())
    }

    fn install(
        &mut self,
        class: ClassId,
        sources: Vec<PathBuf>,
        features: Vec<FeatureVector>,
    ) -> Result<&ClassSlot> {
        let centroid = compute_centroid(&features)?;
        tracing::info!("{class}: centroid rebuilt from {} images", features.len());
        let slot = &mut self.slots[class.index()];
        *slot = ClassSlot {
            sources,
            features,
            centroid: Some(centroid),
        };
        Ok(slot)
    }
}
