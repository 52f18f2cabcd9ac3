//! Ear-clipping algorithm for creating a triangle mesh from a simple polygon.
//! Based on <https://github.com/ivanfratric/polypartition>.

use crate::math::Real;
use crate::utils::{corner_direction, is_point_in_triangle, Orientation};
use na::Point2;

/// The information stored for each vertex in the ear clipping algorithm.
#[derive(Clone, Default)]
struct VertexInfo {
    /// Whether the vertex is still active i.e. it has not been clipped yet.
    is_active: bool,
    /// Whether the vertex is the tip of an ear and should be clipped.
    is_ear: bool,
    /// How small the angle of the ear is. Ears with a smaller angle are clipped first.
    pointiness: Real,
    /// The index of the previous vertex.
    p_prev: usize,
    /// The index of the next vertex.
    p_next: usize,
}

/// Updates the fields `pointiness` and `is_ear` for a given vertex index.
fn update_vertex(idx: usize, vertex_info: &mut [VertexInfo], points: &[Point2<Real>]) {
    let VertexInfo { p_prev, p_next, .. } = vertex_info[idx];
    let p = points[idx];
    let p1 = points[p_prev];
    let p3 = points[p_next];

    let vec1 = (p1 - p).normalize();
    let vec3 = (p3 - p).normalize();
    let pointiness = vec1.dot(&vec3);

    // A point is considered an ear when it is convex and no other active point is
    // inside the triangle spanned by it and its two neighbors. Points duplicated by
    // hole bridges may coincide with the ear corners and are ignored.
    let is_ear = !pointiness.is_nan()
        && corner_direction(&p1, &p, &p3) == Orientation::Ccw
        && vertex_info
            .iter()
            .enumerate()
            .filter(|(i, info)| info.is_active && *i != p_prev && *i != idx && *i != p_next)
            .map(|(i, _)| points[i])
            .filter(|pt| *pt != p1 && *pt != p && *pt != p3)
            .all(|pt| is_point_in_triangle(&pt, &p1, &p, &p3) == Some(false));

    let info = &mut vertex_info[idx];
    info.pointiness = pointiness;
    info.is_ear = is_ear;
}

/// Ear clipping triangulation algorithm.
///
/// The polygon must be simple (holes may be bridged into it, see
/// [`bridge_holes`](crate::transformation::bridge_holes)) and counter-clockwise.
/// Returns `None` if no ear can be found at some point, which happens with clockwise or
/// self-intersecting polygons.
pub fn triangulate_ear_clipping(vertices: &[Point2<Real>]) -> Option<Vec<[u32; 3]>> {
    let n_vertices = vertices.len();

    if n_vertices < 3 {
        return None;
    }

    let mut vertex_info = vec![VertexInfo::default(); n_vertices];

    for (i, info) in vertex_info.iter_mut().enumerate() {
        info.is_active = true;
        info.p_prev = if i == 0 { n_vertices - 1 } else { i - 1 };
        info.p_next = if i == n_vertices - 1 { 0 } else { i + 1 };
    }

    for i in 0..n_vertices {
        update_vertex(i, &mut vertex_info, vertices);
    }

    let mut output_indices = Vec::with_capacity(n_vertices - 2);

    for i in 0..n_vertices - 3 {
        // Search through all active ears and pick out the pointiest.
        let (ear_i, _) = vertex_info
            .iter()
            .enumerate()
            .filter(|(_, info)| info.is_active && info.is_ear)
            .max_by(|(_, info1), (_, info2)| info1.pointiness.total_cmp(&info2.pointiness))?;

        // Deactivate the tip of the ear.
        vertex_info[ear_i].is_active = false;

        let VertexInfo { p_prev, p_next, .. } = vertex_info[ear_i];
        output_indices.push([p_prev as u32, ear_i as u32, p_next as u32]);

        // Connect the remaining two vertices.
        vertex_info[p_prev].p_next = p_next;
        vertex_info[p_next].p_prev = p_prev;

        // Only three vertices remain: they form the last triangle.
        if i == n_vertices - 4 {
            break;
        }

        update_vertex(p_prev, &mut vertex_info, vertices);
        update_vertex(p_next, &mut vertex_info, vertices);
    }

    // Add the remaining triangle.
    if let Some((i, info)) = vertex_info
        .iter()
        .enumerate()
        .find(|(_, info)| info.is_active)
    {
        output_indices.push([info.p_prev as u32, i as u32, info.p_next as u32]);
    }

    Some(output_indices)
}
