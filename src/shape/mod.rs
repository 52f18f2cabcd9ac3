//! Geometry buffers and the cutting planes applied to them.

pub use self::cut_path::CutPath;
pub use self::cut_plane::CutPlane;
pub use self::mesh::{Mesh, MeshError};
pub use self::skin_weights::SkinWeights;

mod cut_path;
mod cut_plane;
mod mesh;
mod skin_weights;
