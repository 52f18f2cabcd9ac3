//! Plane intersection, mesh splitting and cap generation.

pub use self::cut_error::CutError;
pub use self::cut_job::{cut_mesh, CutJob};
pub use self::cut_options::{CutFlags, CutOptions};
pub use self::cut_result::{CutResult, CutStats, MeshPiece};
pub use self::mesh_splitter::{split_mesh, MeshSplitter, SplitOutput, SplitStats};
pub use self::plane_intersection::{
    intersect_plane, BoundaryKey, EdgePoint, EdgeSides, IntersectionEdge, PlaneIntersection,
    PointSource, Side, TriangleClass,
};
pub use self::section::section_loops;

mod boundary;
mod cap;
mod cut_error;
mod cut_job;
mod cut_options;
mod cut_result;
mod mesh_splitter;
mod plane_intersection;
mod section;
