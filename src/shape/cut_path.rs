use crate::math::{Isometry, Real};
use crate::shape::CutPlane;

/// A time-ordered sequence of cutting planes.
///
/// A single-sample path describes a planar cut. Longer paths describe a swept cut where
/// every sample is applied in order.
#[derive(PartialEq, Debug, Clone, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CutPath {
    samples: Vec<CutPlane>,
}

impl CutPath {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// A path made of a single plane.
    pub fn single(plane: CutPlane) -> Self {
        Self {
            samples: vec![plane],
        }
    }

    /// A path made of the given samples, in order.
    pub fn from_samples(samples: impl IntoIterator<Item = CutPlane>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    /// Appends a sample at the end of this path.
    pub fn push(&mut self, sample: CutPlane) {
        self.samples.push(sample);
    }

    /// Appends a sample unless it is within `min_angle` radians and `min_distance` of the
    /// last sample.
    ///
    /// Returns `true` if the sample was added.
    pub fn push_if_distinct(
        &mut self,
        sample: CutPlane,
        min_angle: Real,
        min_distance: Real,
    ) -> bool {
        if let Some(last) = self.samples.last() {
            if last.is_close_to(&sample, min_angle, min_distance) {
                return false;
            }
        }

        self.samples.push(sample);
        true
    }

    /// Replaces the last sample of this path, or pushes `sample` if the path is empty.
    pub fn replace_last(&mut self, sample: CutPlane) {
        match self.samples.last_mut() {
            Some(last) => *last = sample,
            None => self.samples.push(sample),
        }
    }

    /// The samples of this path.
    #[inline]
    pub fn samples(&self) -> &[CutPlane] {
        &self.samples
    }

    /// The number of samples of this path.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Does this path contain no sample?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The first sample of this path.
    pub fn first(&self) -> Option<&CutPlane> {
        self.samples.first()
    }

    /// The last sample of this path.
    pub fn last(&self) -> Option<&CutPlane> {
        self.samples.last()
    }

    /// This path with every sample transformed by the inverse of `m`.
    ///
    /// Used to move a world-space path into the local space of a mesh.
    pub fn inverse_transformed(&self, m: &Isometry<Real>) -> Self {
        Self {
            samples: self
                .samples
                .iter()
                .map(|s| s.inverse_transform_by(m))
                .collect(),
        }
    }
}

impl FromIterator<CutPlane> for CutPath {
    fn from_iter<I: IntoIterator<Item = CutPlane>>(iter: I) -> Self {
        Self::from_samples(iter)
    }
}
