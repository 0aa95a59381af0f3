use crate::error::{Error, Result};
use crate::features::{FEATURE_LEN, FeatureVector};

/// Element-wise mean of a class's feature vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid(Vec<f64>);

impl Centroid {
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

impl AsRef<[f64]> for Centroid {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Mean of `vectors`, position by position.
pub fn compute_centroid(vectors: &[FeatureVector]) -> Result<Centroid> {
    if vectors.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut sums = vec![0.0_f64; FEATURE_LEN];
    for v in vectors {
        for (acc, x) in sums.iter_mut().zip(v.as_slice()) {
            *acc += x;
        }
    }
    let n = vectors.len() as f64;
    Ok(Centroid(sums.into_iter().map(|s| s / n).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn constant(value: f64) -> FeatureVector {
        FeatureVector::new(vec![value; FEATURE_LEN]).unwrap()
    }

    #[test]
    fn identical_vectors_give_themselves() {
        let v = FeatureVector::new((0..FEATURE_LEN).map(|i| (i % 256) as f64 / 255.0).collect())
            .unwrap();
        let c = compute_centroid(&[v.clone(), v.clone(), v.clone()]).unwrap();
        for (a, b) in c.as_slice().iter().zip(v.as_slice()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn two_vectors_average_per_position() {
        let alternating = (0..FEATURE_LEN).map(|i| if i % 2 == 0 { 1.0 } else { 0.0 });
        let v1 = FeatureVector::new(alternating.collect()).unwrap();
        let v2 = constant(0.5);
        let c = compute_centroid(&[v1, v2]).unwrap();
        assert_eq!(c.len(), FEATURE_LEN);
        assert_relative_eq!(c.as_slice()[0], 0.75);
        assert_relative_eq!(c.as_slice()[1], 0.25);
    }

    #[test]
    fn order_does_not_matter() {
        let a = constant(0.2);
        let b = constant(0.4);
        let c = constant(0.9);
        let forward = compute_centroid(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let backward = compute_centroid(&[c, b, a]).unwrap();
        for (x, y) in forward.as_slice().iter().zip(backward.as_slice()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(compute_centroid(&[]), Err(Error::EmptyInput)));
    }
}
