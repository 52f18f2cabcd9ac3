use crate::math::{Point, Real};
use crate::query::split::CutError;
use crate::shape::{CutPlane, Mesh};
use crate::utils::SortedPair;
use arrayvec::ArrayVec;

/// The position of a vertex relative to a cutting plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Strictly behind the plane.
    Back,
    /// Within epsilon of the plane.
    On,
    /// Strictly in front of the plane, on the side its normal points to.
    Front,
}

impl Side {
    /// Classifies a signed distance to a plane.
    #[inline]
    pub fn classify(distance: Real, epsilon: Real) -> Self {
        if distance > epsilon {
            Side::Front
        } else if distance < -epsilon {
            Side::Back
        } else {
            Side::On
        }
    }

    /// The opposite side. [`Side::On`] is its own opposite.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Back => Side::Front,
            Side::On => Side::On,
            Side::Front => Side::Back,
        }
    }
}

/// Where a triangle ends up after a cut.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriangleClass {
    /// The triangle belongs, whole, to the back piece.
    Back,
    /// The triangle belongs, whole, to the front piece.
    Front,
    /// The triangle has vertices strictly on both sides and must be split.
    Straddling,
}

/// The piece(s) an [`IntersectionEdge`] bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeSides {
    /// The edge splits a straddling triangle and bounds both pieces.
    Both,
    /// The edge bounds the front piece only.
    Front,
    /// The edge bounds the back piece only.
    Back,
}

/// Identifies a point of the cut boundary independently of vertex duplication.
///
/// Vertex indices are welded indices (see [`Mesh::weld_map`]), so vertices duplicated along
/// UV seams map to the same key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoundaryKey {
    /// A mesh vertex lying on the plane.
    Vertex(u32),
    /// The crossing of the plane with the mesh edge joining two vertices.
    Crossing(SortedPair<u32>),
}

/// How a boundary point is derived from the vertices of the mesh.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointSource {
    /// The point is a vertex of the mesh.
    Vertex(u32),
    /// The point interpolates vertices `a` and `b`: `a + (b - a) * t`.
    Crossing {
        /// The first interpolated vertex.
        a: u32,
        /// The second interpolated vertex.
        b: u32,
        /// The interpolation parameter, in `]0, 1[`.
        t: Real,
    },
}

/// An endpoint of an [`IntersectionEdge`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgePoint {
    /// The vertices this point is derived from.
    pub source: PointSource,
    /// The seam-independent identifier of this point.
    pub key: BoundaryKey,
    /// The position of this point.
    pub position: Point<Real>,
}

/// A segment of the cut boundary, lying on the cutting plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntersectionEdge {
    /// The index of the triangle this edge comes from.
    pub triangle: u32,
    /// The two endpoints of this edge.
    ///
    /// For [`EdgeSides::Both`] they follow the winding of the fragment in front of the plane.
    /// Otherwise they follow the winding of the originating triangle.
    pub points: [EdgePoint; 2],
    /// The piece(s) this edge bounds.
    pub sides: EdgeSides,
}

/// The classification of a mesh against a cutting plane.
#[derive(Clone, Debug)]
pub struct PlaneIntersection {
    /// The cutting plane.
    pub plane: CutPlane,
    /// The tolerance used to classify vertices.
    pub epsilon: Real,
    /// The signed distance of every vertex to the plane.
    pub distances: Vec<Real>,
    /// The side of every vertex.
    pub sides: Vec<Side>,
    /// The welded index of every vertex.
    pub welds: Vec<u32>,
    /// The class of every triangle.
    pub classes: Vec<TriangleClass>,
    /// The triangles kept whole in the front piece.
    pub front: Vec<u32>,
    /// The triangles kept whole in the back piece.
    pub back: Vec<u32>,
    /// The triangles with vertices strictly on both sides of the plane.
    pub straddling: Vec<u32>,
    /// Every segment of the cut boundary.
    pub edges: Vec<IntersectionEdge>,
}

/// Computes where `plane` crosses `mesh`.
///
/// Vertices within `epsilon` of the plane are considered to lie on it. Triangles entirely on
/// the plane go to the back piece if they face the direction of the plane normal, and to the
/// front piece otherwise.
///
/// # Errors
///
/// Returns [`CutError::NoIntersection`] if the plane misses the bounding box of the mesh, or if
/// no vertex is strictly in front of it or no vertex is strictly behind it.
/// Returns [`CutError::MalformedMesh`] if the buffers of `mesh` are inconsistent.
pub fn intersect_plane(
    mesh: &Mesh,
    plane: &CutPlane,
    epsilon: Real,
) -> Result<PlaneIntersection, CutError> {
    mesh.validate()?;

    if !plane.intersects_aabb(&mesh.aabb(), epsilon) {
        return Err(CutError::NoIntersection);
    }

    let distances: Vec<_> = mesh
        .positions()
        .iter()
        .map(|pt| plane.signed_distance(pt))
        .collect();
    let sides: Vec<_> = distances
        .iter()
        .map(|d| Side::classify(*d, epsilon))
        .collect();

    if !sides.contains(&Side::Front) || !sides.contains(&Side::Back) {
        return Err(CutError::NoIntersection);
    }

    let mut result = PlaneIntersection {
        plane: *plane,
        epsilon,
        distances,
        sides,
        welds: mesh.weld_map(),
        classes: Vec::with_capacity(mesh.triangle_count()),
        front: vec![],
        back: vec![],
        straddling: vec![],
        edges: vec![],
    };

    for (tri_id, idx) in mesh.indices().iter().enumerate() {
        let class = result.classify_triangle(mesh, tri_id);
        result.classes.push(class);

        match class {
            TriangleClass::Front => result.front.push(tri_id as u32),
            TriangleClass::Back => result.back.push(tri_id as u32),
            TriangleClass::Straddling => result.straddling.push(tri_id as u32),
        }

        result.push_edges(mesh, tri_id, idx, class);
    }

    log::debug!(
        "plane intersection: {} front, {} back, {} straddling triangle(s), {} edge(s)",
        result.front.len(),
        result.back.len(),
        result.straddling.len(),
        result.edges.len()
    );

    Ok(result)
}

impl PlaneIntersection {
    fn classify_triangle(&self, mesh: &Mesh, tri_id: usize) -> TriangleClass {
        let idx = mesh.indices()[tri_id];
        let has_front = idx.iter().any(|i| self.sides[*i as usize] == Side::Front);
        let has_back = idx.iter().any(|i| self.sides[*i as usize] == Side::Back);

        match (has_front, has_back) {
            (true, true) => TriangleClass::Straddling,
            (true, false) => TriangleClass::Front,
            (false, true) => TriangleClass::Back,
            (false, false) => {
                // The triangle lies on the plane: it caps the piece it faces away from.
                if mesh.scaled_face_normal(tri_id).dot(&*self.plane.normal()) >= 0.0 {
                    TriangleClass::Back
                } else {
                    TriangleClass::Front
                }
            }
        }
    }

    fn push_edges(&mut self, mesh: &Mesh, tri_id: usize, idx: &[u32; 3], class: TriangleClass) {
        let (corners, sides) = match class {
            TriangleClass::Straddling => {
                (self.clip_triangle(mesh, idx, Side::Front), EdgeSides::Both)
            }
            TriangleClass::Front => (self.whole_triangle(mesh, idx), EdgeSides::Front),
            TriangleClass::Back => (self.whole_triangle(mesh, idx), EdgeSides::Back),
        };

        for k in 0..corners.len() {
            let a = corners[k];
            let b = corners[(k + 1) % corners.len()];

            if a.is_on_plane() && b.is_on_plane() && a.point.key != b.point.key {
                self.edges.push(IntersectionEdge {
                    triangle: tri_id as u32,
                    points: [a.point, b.point],
                    sides,
                });
            }
        }
    }

    /// The corners of the triangle `idx`, unclipped.
    pub(crate) fn whole_triangle(&self, mesh: &Mesh, idx: &[u32; 3]) -> ArrayVec<Corner, 4> {
        idx.iter().map(|i| self.vertex_corner(mesh, *i)).collect()
    }

    /// The part of the triangle `idx` lying on `side` of the plane, as a convex polygon of
    /// at most four corners with the same winding as the triangle.
    pub(crate) fn clip_triangle(
        &self,
        mesh: &Mesh,
        idx: &[u32; 3],
        side: Side,
    ) -> ArrayVec<Corner, 4> {
        let mut corners = ArrayVec::new();

        for k in 0..3 {
            let i = idx[k];
            let j = idx[(k + 1) % 3];
            let si = self.sides[i as usize];
            let sj = self.sides[j as usize];

            if si == side || si == Side::On {
                corners.push(self.vertex_corner(mesh, i));
            }

            if si != Side::On && sj != Side::On && si != sj {
                corners.push(self.crossing_corner(mesh, i, j));
            }
        }

        corners
    }

    fn vertex_corner(&self, mesh: &Mesh, i: u32) -> Corner {
        Corner {
            point: EdgePoint {
                source: PointSource::Vertex(i),
                key: BoundaryKey::Vertex(self.welds[i as usize]),
                position: mesh.positions()[i as usize],
            },
            on_plane_vertex: self.sides[i as usize] == Side::On,
        }
    }

    fn crossing_corner(&self, mesh: &Mesh, i: u32, j: u32) -> Corner {
        // Interpolate from the vertex with the smallest welded index so that the same edge
        // seen from both sides of a seam yields bit-identical points.
        let (a, b) = if self.welds[i as usize] <= self.welds[j as usize] {
            (i, j)
        } else {
            (j, i)
        };
        let da = self.distances[a as usize];
        let db = self.distances[b as usize];
        let t = da / (da - db);
        let pa = mesh.positions()[a as usize];
        let pb = mesh.positions()[b as usize];

        Corner {
            point: EdgePoint {
                source: PointSource::Crossing { a, b, t },
                key: BoundaryKey::Crossing(SortedPair::new(
                    self.welds[a as usize],
                    self.welds[b as usize],
                )),
                position: pa + (pb - pa) * t,
            },
            on_plane_vertex: false,
        }
    }
}

/// A corner of a clipped triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Corner {
    pub point: EdgePoint,
    pub on_plane_vertex: bool,
}

impl Corner {
    #[inline]
    pub fn is_on_plane(&self) -> bool {
        self.on_plane_vertex || matches!(self.point.source, PointSource::Crossing { .. })
    }
}
