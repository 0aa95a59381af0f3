//! Nearest-centroid decision by Manhattan distance.

use serde::{Deserialize, Serialize};

use crate::centroid::Centroid;
use crate::class::{CLASS_COUNT, ClassId};
use crate::error::{Error, Result};
use crate::features::FeatureVector;

/// Distances from one unknown image to every class centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Indexed by class.
    pub distances: [f64; CLASS_COUNT],
    pub predicted: ClassId,
    pub min_distance: f64,
}

/// Sum of absolute differences between two equally long vectors.
pub fn manhattan_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Assign `unknown` to the class with the nearest centroid.
///
/// Every class must be trained. On equal distances the lower class index wins.
pub fn classify(
    unknown: &FeatureVector,
    centroids: [Option<&Centroid>; CLASS_COUNT],
) -> Result<ClassificationResult> {
    let missing: Vec<ClassId> = ClassId::ALL
        .into_iter()
        .filter(|c| centroids[c.index()].is_none())
        .collect();
    if !missing.is_empty() {
        return Err(Error::IncompleteTraining { missing });
    }

    let mut distances = [0.0_f64; CLASS_COUNT];
    for (slot, centroid) in distances.iter_mut().zip(centroids.iter().flatten()) {
        if centroid.len() != unknown.len() {
            return Err(Error::LengthMismatch {
                expected: unknown.len(),
                actual: centroid.len(),
            });
        }
        *slot = manhattan_distance(unknown.as_slice(), centroid.as_slice());
    }

    let mut best = 0;
    for (i, d) in distances.iter().enumerate().skip(1) {
        if *d < distances[best] {
            best = i;
        }
    }

    Ok(ClassificationResult {
        distances,
        predicted: ClassId::ALL[best],
        min_distance: distances[best],
    })
}
