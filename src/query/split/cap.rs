//! Triangulation of the openings left by a cut.

use crate::math::{Point, Real};
use crate::query::split::EdgePoint;
use crate::shape::CutPlane;
use crate::transformation::{triangulate_fan, triangulate_polygon_with_holes};
use crate::utils::point_in_poly2d;
use na::Point2;

/// The triangles closing one side of a cut.
#[derive(Clone, Debug, Default)]
pub(crate) struct Cap {
    /// The boundary points used by the cap triangles.
    pub points: Vec<EdgePoint>,
    /// The coordinates of each point in the tangent basis of the cap plane.
    pub planar: Vec<Point2<Real>>,
    /// Triangles, counter-clockwise around the cap normal.
    pub triangles: Vec<[u32; 3]>,
    /// The number of loops that were triangulated, holes included.
    pub loops: usize,
    /// The number of degenerate loops that were ignored.
    pub discarded_loops: usize,
}

struct Ring {
    points: Vec<EdgePoint>,
    planar: Vec<Point2<Real>>,
    area: Real,
}

/// Triangulates closed boundary loops lying on `cap_plane`.
///
/// Loops must be counter-clockwise around the normal of `cap_plane` for outer boundaries and
/// clockwise for holes. Loops with fewer than three points distinct within `epsilon` are
/// discarded.
pub(crate) fn triangulate_cap(loops: Vec<Vec<EdgePoint>>, cap_plane: &CutPlane, epsilon: Real) -> Cap {
    let (u, v) = cap_plane.tangent_basis();
    let origin = cap_plane.origin();
    let project = |pt: &Point<Real>| {
        let d = pt - origin;
        Point2::new(d.dot(&*u), d.dot(&*v))
    };

    let mut cap = Cap::default();
    let mut outers = vec![];
    let mut holes = vec![];

    for points in loops {
        let planar: Vec<_> = points.iter().map(|p| project(&p.position)).collect();

        if distinct_point_count(&planar, epsilon) < 3 {
            log::debug!("discarding a degenerate cap loop of {} point(s)", points.len());
            cap.discarded_loops += 1;
            continue;
        }

        let area = signed_area(&planar);
        let ring = Ring {
            points,
            planar,
            area,
        };

        if area > 0.0 {
            outers.push(ring);
        } else if area < 0.0 {
            holes.push(ring);
        } else {
            log::debug!("discarding a flat cap loop of {} point(s)", ring.points.len());
            cap.discarded_loops += 1;
        }
    }

    // Attach every hole to the smallest outer loop containing it.
    let mut holes_of: Vec<Vec<Ring>> = outers.iter().map(|_| vec![]).collect();
    for hole in holes {
        let container = outers
            .iter()
            .enumerate()
            .filter(|(_, outer)| point_in_poly2d(&hole.planar[0], &outer.planar))
            .min_by(|(_, a), (_, b)| a.area.total_cmp(&b.area))
            .map(|(i, _)| i);

        match container {
            Some(i) => holes_of[i].push(hole),
            None => {
                log::debug!("discarding a cap hole outside of any outer loop");
                cap.discarded_loops += 1;
            }
        }
    }

    for (outer, holes) in outers.into_iter().zip(holes_of) {
        let hole_planar: Vec<_> = holes.iter().map(|h| h.planar.clone()).collect();
        let triangles = match triangulate_polygon_with_holes(&outer.planar, &hole_planar) {
            Some(triangles) => triangles,
            None => {
                log::warn!(
                    "ear clipping failed on a cap loop of {} point(s) with {} hole(s), falling back to a fan",
                    outer.points.len(),
                    holes.len()
                );
                triangulate_fan(outer.points.len() as u32)
            }
        };

        let base = cap.points.len() as u32;
        cap.loops += 1 + holes.len();
        cap.triangles
            .extend(triangles.into_iter().map(|t| t.map(|i| i + base)));

        for ring in core::iter::once(outer).chain(holes) {
            cap.points.extend(ring.points);
            cap.planar.extend(ring.planar);
        }
    }

    cap
}

/// Counts the points of a closed polyline, merging consecutive points closer than `epsilon`.
fn distinct_point_count(points: &[Point2<Real>], epsilon: Real) -> usize {
    let mut count = 0;
    let mut last: Option<Point2<Real>> = None;

    for pt in points {
        if last.map_or(true, |l| na::distance(&l, pt) > epsilon) {
            count += 1;
            last = Some(*pt);
        }
    }

    if let (Some(first), Some(last)) = (points.first(), last) {
        if count > 1 && na::distance(first, &last) <= epsilon {
            count -= 1;
        }
    }

    count
}

/// The signed area of a closed polygon, positive if it is counter-clockwise.
fn signed_area(points: &[Point2<Real>]) -> Real {
    let n = points.len();
    (0..n)
        .map(|i| points[i].coords.perp(&points[(i + 1) % n].coords))
        .sum::<Real>()
        * 0.5
}
