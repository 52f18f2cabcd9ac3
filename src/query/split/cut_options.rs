use crate::math::{Real, DEFAULT_EPSILON};

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// Controls how a mesh is cut.
pub struct CutFlags(u8);

bitflags::bitflags! {
    impl CutFlags: u8 {
        /// If set, the openings left by the cut are closed with cap triangles.
        ///
        /// Without this flag the resulting pieces are open along the cut.
        const CAP = 1;
        /// If set, the mesh is rejected with [`MeshError::NonManifoldEdge`](crate::shape::MeshError::NonManifoldEdge)
        /// if one of its edges is shared by more than two triangles.
        const STRICT_TOPOLOGY = 1 << 1;
    }
}

impl Default for CutFlags {
    fn default() -> Self {
        CutFlags::CAP
    }
}

/// Parameters of a cut.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CutOptions {
    /// Vertices closer than this distance to a cutting plane are considered to lie on it.
    pub epsilon: Real,
    /// Flags controlling the cut.
    pub flags: CutFlags,
    /// Scale applied to the planar-projected texture coordinates of cap vertices.
    pub cap_uv_scale: Real,
}

impl Default for CutOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            flags: CutFlags::default(),
            cap_uv_scale: 1.0,
        }
    }
}

impl CutOptions {
    /// Options producing open pieces, without any cap.
    pub fn uncapped() -> Self {
        Self {
            flags: CutFlags::default() - CutFlags::CAP,
            ..Self::default()
        }
    }
}
