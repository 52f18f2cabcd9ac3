use crate::math::{Real, UnitVector, Vector};
use crate::query::split::CutOptions;

/// How the samples of a cut session are turned into cutting planes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum CutMode {
    /// Only the blade plane at release time cuts the mesh.
    #[default]
    Planar,
    /// Every sample recorded while the trigger was held cuts the mesh, in order.
    Swept,
}

/// Configuration of a [`CutSessionController`](crate::session::CutSessionController).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CutterConfig {
    /// Options forwarded to every cut.
    pub options: CutOptions,
    /// Planar or swept cuts.
    pub mode: CutMode,
    /// The position of the blade in the local frame of the controller.
    pub blade_offset: Vector<Real>,
    /// The normal of the blade plane in the local frame of the controller, before roll.
    pub blade_normal: UnitVector<Real>,
    /// The axis, in the local frame of the controller, the blade rolls around.
    pub blade_roll_axis: UnitVector<Real>,
    /// Samples whose normal is within this angle (in radians) of the previous sample, and
    /// whose origin is within [`Self::sample_min_distance`] of it, are dropped.
    pub sample_min_angle: Real,
    /// See [`Self::sample_min_angle`].
    pub sample_min_distance: Real,
    /// The maximum number of samples of a swept cut. Past this count, the last sample is
    /// replaced instead.
    pub max_samples: usize,
    /// The number of source triangles processed per [`tick`](crate::session::CutSessionController::tick)
    /// while committing. `None` commits every cut immediately.
    ///
    /// Starting the split of a piece classifies all of its vertices and triangles within a
    /// single tick, regardless of this value. Each tick also compares the target with the
    /// mesh the cut started from, and cancels the cut if the host changed it.
    pub triangles_per_tick: Option<usize>,
}

impl Default for CutterConfig {
    fn default() -> Self {
        Self {
            options: CutOptions::default(),
            mode: CutMode::Planar,
            blade_offset: Vector::zeros(),
            blade_normal: Vector::z_axis(),
            blade_roll_axis: Vector::x_axis(),
            sample_min_angle: (1.0 as Real).to_radians(),
            sample_min_distance: 0.005,
            max_samples: 64,
            triangles_per_tick: None,
        }
    }
}
