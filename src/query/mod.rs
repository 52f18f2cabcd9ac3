//! Non-persistent geometric queries.
//!
//! The [`split`] module holds everything needed to cut a [`Mesh`](crate::shape::Mesh):
//!
//! * [`intersect_plane()`] to classify a mesh against a cutting plane.
//! * [`split_mesh()`] to split a mesh into two capped pieces.
//! * [`cut_mesh()`] to apply a whole [`CutPath`](crate::shape::CutPath) to a mesh.
//! * [`section_loops()`] to compute the outline of a cut, for previews.

pub use self::split::{
    cut_mesh, intersect_plane, section_loops, split_mesh, BoundaryKey, CutError, CutFlags,
    CutJob, CutOptions, CutResult, CutStats, EdgePoint, EdgeSides, IntersectionEdge, MeshPiece,
    MeshSplitter, PlaneIntersection, PointSource, Side, SplitOutput, SplitStats, TriangleClass,
};

pub mod split;
