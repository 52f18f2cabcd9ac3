//! Triangulation of polygons with holes.
//!
//! Holes are first connected to their outer boundary with zero-width bridges, turning the
//! polygon into a single (weakly) simple one that ear clipping can handle.

use crate::math::Real;
use crate::transformation::triangulate_ear_clipping;
use crate::utils::{corner_direction, Orientation};
use na::Point2;
use ordered_float::OrderedFloat;

/// Connects each hole of a polygon to its outer boundary.
///
/// The `outer` boundary must be counter-clockwise and every hole clockwise. Points are
/// identified by their index in the concatenation of `outer` and all the `holes`, in order.
/// The returned polygon visits the hole vertex and the outer vertex of each bridge twice.
pub fn bridge_holes(outer: &[Point2<Real>], holes: &[Vec<Point2<Real>>]) -> Vec<u32> {
    let points: Vec<_> = outer
        .iter()
        .chain(holes.iter().flatten())
        .copied()
        .collect();
    let mut polygon: Vec<u32> = (0..outer.len() as u32).collect();

    let mut hole_ranges = vec![];
    let mut start = outer.len() as u32;
    for hole in holes {
        hole_ranges.push(start..start + hole.len() as u32);
        start += hole.len() as u32;
    }

    // Process the holes from right to left, each from its rightmost vertex.
    let mut order: Vec<_> = hole_ranges
        .iter()
        .cloned()
        .filter(|range| !range.is_empty())
        .map(|range| {
            let rightmost = range
                .clone()
                .max_by_key(|i| OrderedFloat(points[*i as usize].x))
                .unwrap_or(range.start);
            (range, rightmost)
        })
        .collect();
    order.sort_by_key(|(_, rightmost)| core::cmp::Reverse(OrderedFloat(points[*rightmost as usize].x)));

    for (k, (range, hole_pt)) in order.iter().enumerate() {
        let m = points[*hole_pt as usize];
        let pending_holes = &order[k + 1..];

        let mut candidates: Vec<usize> = (0..polygon.len()).collect();
        candidates.sort_by_key(|i| OrderedFloat(na::distance_squared(&points[polygon[*i] as usize], &m)));

        let bridge = candidates.into_iter().find(|i| {
            let p = points[polygon[*i] as usize];
            let prev = points[polygon[(*i + polygon.len() - 1) % polygon.len()] as usize];
            let next = points[polygon[(*i + 1) % polygon.len()] as usize];

            in_cone(&prev, &p, &next, &m)
                && !crosses_ring(&points, &polygon, &p, &m)
                && !crosses_ring(&points, &range.clone().collect::<Vec<_>>(), &p, &m)
                && pending_holes.iter().all(|(other, _)| {
                    !crosses_ring(&points, &other.clone().collect::<Vec<_>>(), &p, &m)
                })
        });

        let Some(bridge) = bridge else {
            log::debug!("no visible vertex found to bridge a hole; the hole is ignored");
            continue;
        };

        // outer[..=bridge], hole starting and ending at its rightmost point, outer[bridge..]
        let hole_len = range.len() as u32;
        let offset = hole_pt - range.start;
        let mut spliced = Vec::with_capacity(polygon.len() + range.len() + 2);
        spliced.extend_from_slice(&polygon[..=bridge]);
        spliced.extend((0..=hole_len).map(|j| range.start + (offset + j) % hole_len));
        spliced.extend_from_slice(&polygon[bridge..]);
        polygon = spliced;
    }

    polygon
}

/// Triangulates a polygon with holes.
///
/// Indices refer to the concatenation of `outer` and all the `holes`, as for
/// [`bridge_holes`]. Returns `None` if ear clipping fails.
pub fn triangulate_polygon_with_holes(
    outer: &[Point2<Real>],
    holes: &[Vec<Point2<Real>>],
) -> Option<Vec<[u32; 3]>> {
    let points: Vec<_> = outer
        .iter()
        .chain(holes.iter().flatten())
        .copied()
        .collect();
    let polygon = bridge_holes(outer, holes);
    let polygon_points: Vec<_> = polygon.iter().map(|i| points[*i as usize]).collect();
    let triangles = triangulate_ear_clipping(&polygon_points)?;

    Some(
        triangles
            .into_iter()
            .map(|t| t.map(|i| polygon[i as usize]))
            .collect(),
    )
}

/// Triangulates a polygon as a fan around its first vertex.
///
/// Only correct for convex polygons, but never fails.
pub fn triangulate_fan(n_vertices: u32) -> Vec<[u32; 3]> {
    (1..n_vertices.saturating_sub(1))
        .map(|i| [0, i, i + 1])
        .collect()
}

/// Is `q` inside the angle formed at `p` by a counter-clockwise polygon going through
/// `prev`, `p` and `next`?
fn in_cone(prev: &Point2<Real>, p: &Point2<Real>, next: &Point2<Real>, q: &Point2<Real>) -> bool {
    let left_of = |a: &Point2<Real>, b: &Point2<Real>| corner_direction(a, b, q) == Orientation::Ccw;

    if corner_direction(prev, p, next) == Orientation::Ccw {
        left_of(prev, p) && left_of(p, next)
    } else {
        left_of(prev, p) || left_of(p, next)
    }
}

/// Does the segment `[a, b]` properly cross an edge of the closed ring `ring`?
///
/// Edges touching `a` or `b` are ignored.
fn crosses_ring(points: &[Point2<Real>], ring: &[u32], a: &Point2<Real>, b: &Point2<Real>) -> bool {
    (0..ring.len()).any(|i| {
        let c = points[ring[i] as usize];
        let d = points[ring[(i + 1) % ring.len()] as usize];

        if c == *a || c == *b || d == *a || d == *b {
            return false;
        }

        let o1 = corner_direction(a, b, &c);
        let o2 = corner_direction(a, b, &d);
        let o3 = corner_direction(&c, &d, a);
        let o4 = corner_direction(&c, &d, b);

        o1 != Orientation::None
            && o2 != Orientation::None
            && o3 != Orientation::None
            && o4 != Orientation::None
            && o1 != o2
            && o3 != o4
    })
}
