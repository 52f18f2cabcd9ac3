use crate::math::{Point, Real};
use crate::query::split::boundary::{chain_loops, side_edges};
use crate::query::split::{intersect_plane, CutError, Side};
use crate::shape::{CutPlane, Mesh};

/// The closed polylines along which `plane` crosses `mesh`.
///
/// Loops run counter-clockwise around the plane normal for outer boundaries of the section,
/// clockwise for holes. Nothing is triangulated, so this is cheap enough to preview a cut
/// every frame.
///
/// # Errors
///
/// Fails with [`CutError::NoIntersection`] if the plane does not cross the mesh.
pub fn section_loops(
    mesh: &Mesh,
    plane: &CutPlane,
    epsilon: Real,
) -> Result<Vec<Vec<Point<Real>>>, CutError> {
    let intersection = intersect_plane(mesh, plane, epsilon)?;
    let edges = side_edges(&intersection.edges, Side::Front);
    let chained = chain_loops(&edges);

    Ok(chained
        .loops
        .into_iter()
        .map(|points| points.into_iter().map(|p| p.position).collect())
        .collect())
}
