use crate::math::Real;
use arrayvec::ArrayVec;
use ordered_float::OrderedFloat;

/// The bone influences of a skinned vertex.
///
/// Unused slots have a zero weight. Weights are expected to sum to one.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SkinWeights {
    /// The bone index of each influence.
    pub bones: [u16; 4],
    /// The weight of each influence.
    pub weights: [Real; 4],
}

impl SkinWeights {
    /// The maximum number of influences per vertex.
    pub const MAX_INFLUENCES: usize = 4;

    /// Creates skin weights from raw bone indices and weights.
    pub fn new(bones: [u16; 4], weights: [Real; 4]) -> Self {
        Self { bones, weights }
    }

    /// A vertex fully bound to a single bone.
    pub fn single(bone: u16) -> Self {
        Self {
            bones: [bone, 0, 0, 0],
            weights: [1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Blends `self` and `other`, the result being `self` at `t = 0` and `other` at `t = 1`.
    ///
    /// Influences of both operands are merged per bone, then only the
    /// [`Self::MAX_INFLUENCES`] heaviest ones are kept and renormalized.
    pub fn lerp(&self, other: &SkinWeights, t: Real) -> SkinWeights {
        let mut influences: ArrayVec<(u16, Real), 8> = ArrayVec::new();

        let weighted = self
            .influences()
            .map(|(bone, w)| (bone, w * (1.0 - t)))
            .chain(other.influences().map(|(bone, w)| (bone, w * t)));

        for (bone, weight) in weighted {
            if let Some(existing) = influences.iter_mut().find(|(b, _)| *b == bone) {
                existing.1 += weight;
            } else {
                influences.push((bone, weight));
            }
        }

        influences.sort_by_key(|(_, w)| core::cmp::Reverse(OrderedFloat(*w)));

        let mut result = SkinWeights::default();
        for (slot, (bone, weight)) in influences
            .iter()
            .take(Self::MAX_INFLUENCES)
            .enumerate()
        {
            result.bones[slot] = *bone;
            result.weights[slot] = *weight;
        }

        result.normalized()
    }

    /// Rescales the weights so they sum to one.
    ///
    /// Weights summing to zero are left untouched.
    pub fn normalized(mut self) -> SkinWeights {
        let total: Real = self.weights.iter().sum();
        if total > 0.0 {
            self.weights.iter_mut().for_each(|w| *w /= total);
        }
        self
    }

    /// The non-zero influences of this vertex.
    pub fn influences(&self) -> impl Iterator<Item = (u16, Real)> + '_ {
        self.bones
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
            .filter(|(_, w)| *w > 0.0)
    }
}
