use crate::shape::MeshError;

/// Errors that can occur when cutting a mesh.
///
/// None of them leaves the input mesh modified: every cut operation works on its own buffers
/// and only hands them out once complete.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum CutError {
    /// The cutting plane (or every plane of a cut path) does not cross the mesh.
    ///
    /// This is not a failure per se: callers are expected to treat it as a no-op cut.
    #[error("the cutting plane does not cross the mesh")]
    NoIntersection,
    /// The cut would produce a piece without any triangle.
    #[error("the cut is degenerate: {front_triangles} triangle(s) in front of the plane, {back_triangles} behind it")]
    DegenerateCut {
        /// The number of fragment triangles found in front of the plane.
        front_triangles: usize,
        /// The number of fragment triangles found behind the plane.
        back_triangles: usize,
    },
    /// The mesh to cut is malformed.
    #[error("malformed mesh: {0}")]
    MalformedMesh(#[from] MeshError),
}
