//! Polygon triangulation and mesh generation.

pub use self::ear_clipping::triangulate_ear_clipping;
pub use self::hole_bridging::{bridge_holes, triangulate_fan, triangulate_polygon_with_holes};

mod ear_clipping;
mod hole_bridging;
pub mod to_mesh;

#[cfg(feature = "wavefront")]
mod wavefront;
