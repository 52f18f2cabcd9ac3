use crate::math::{Point, Real, Uv, Vector};
use crate::query::split::boundary::{chain_loops, side_edges};
use crate::query::split::cap::{triangulate_cap, Cap};
use crate::query::split::plane_intersection::Corner;
use crate::query::split::{
    intersect_plane, CutError, CutFlags, CutOptions, EdgePoint, MeshPiece, PlaneIntersection,
    PointSource, Side, TriangleClass,
};
use crate::shape::{CutPlane, Mesh, SkinWeights};
use crate::utils::hashmap::HashMap;
use crate::utils::SortedPair;
use arrayvec::ArrayVec;
use core::borrow::Borrow;

/// Counters describing the split of a mesh by a single plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SplitStats {
    /// The number of triangles of the split mesh.
    pub source_triangles: usize,
    /// The number of triangles crossed by the plane.
    pub straddling_triangles: usize,
    /// The number of triangles of the front piece coming from the split mesh.
    pub front_fragments: usize,
    /// The number of triangles of the back piece coming from the split mesh.
    pub back_fragments: usize,
    /// The number of cap triangles generated, on both pieces.
    pub cap_triangles: usize,
    /// The number of boundary loops closed by caps, holes included.
    pub loops: usize,
    /// The number of degenerate loops that did not produce any cap.
    pub discarded_loops: usize,
}

impl SplitStats {
    /// The total number of triangles of both pieces.
    pub fn output_triangles(&self) -> usize {
        self.front_fragments + self.back_fragments + self.cap_triangles
    }
}

/// The two pieces of a mesh split by a plane.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitOutput {
    /// The piece in front of the plane, on the side its normal points to.
    pub front: MeshPiece,
    /// The piece behind the plane.
    pub back: MeshPiece,
    /// Counters describing the split.
    pub stats: SplitStats,
}

/// Identifies an output vertex. Unlike boundary keys, these are not welded: vertices
/// duplicated along seams keep their own attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum VertexKey {
    Vertex(u32),
    Crossing(SortedPair<u32>),
}

/// Accumulates the buffers of one piece.
#[derive(Default)]
struct PieceBuilder {
    positions: Vec<Point<Real>>,
    normals: Vec<Vector<Real>>,
    uvs: Vec<Uv>,
    skin_weights: Option<Vec<SkinWeights>>,
    body: Vec<[u32; 3]>,
    caps: Vec<[u32; 3]>,
    remap: HashMap<VertexKey, u32>,
}

impl PieceBuilder {
    fn new(mesh: &Mesh) -> Self {
        Self {
            skin_weights: mesh.skin_weights().map(|_| vec![]),
            ..Self::default()
        }
    }

    fn fragment_count(&self) -> usize {
        self.body.len() + self.caps.len()
    }

    fn push_attributes(
        &mut self,
        position: Point<Real>,
        normal: Vector<Real>,
        uv: Uv,
        skin: Option<SkinWeights>,
    ) -> u32 {
        let id = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);

        if let (Some(weights), Some(skin)) = (&mut self.skin_weights, skin) {
            weights.push(skin);
        }

        id
    }

    /// The output vertex for a mesh vertex or an edge crossing, created on first use.
    fn vertex(&mut self, mesh: &Mesh, point: &EdgePoint) -> u32 {
        let key = match point.source {
            PointSource::Vertex(i) => VertexKey::Vertex(i),
            PointSource::Crossing { a, b, .. } => VertexKey::Crossing(SortedPair::new(a, b)),
        };

        if let Some(id) = self.remap.get(&key) {
            return *id;
        }

        let (normal, uv) = interpolated_normal_and_uv(mesh, &point.source);
        let skin = interpolated_skin_weights(mesh, &point.source);
        let id = self.push_attributes(point.position, normal, uv, skin);
        let _ = self.remap.insert(key, id);
        id
    }

    fn push_polygon(&mut self, mesh: &Mesh, corners: &[Corner], is_cap: bool) {
        let ids: ArrayVec<u32, 4> = corners
            .iter()
            .map(|c| self.vertex(mesh, &c.point))
            .collect();
        let target = if is_cap { &mut self.caps } else { &mut self.body };

        match ids.len() {
            3 => target.push([ids[0], ids[1], ids[2]]),
            4 => {
                // Split the quad along its shortest diagonal.
                let d02 = na::distance_squared(&corners[0].point.position, &corners[2].point.position);
                let d13 = na::distance_squared(&corners[1].point.position, &corners[3].point.position);

                if d02 <= d13 {
                    target.push([ids[0], ids[1], ids[2]]);
                    target.push([ids[0], ids[2], ids[3]]);
                } else {
                    target.push([ids[1], ids[2], ids[3]]);
                    target.push([ids[1], ids[3], ids[0]]);
                }
            }
            n => log::debug!("ignoring a degenerate fragment with {} corner(s)", n),
        }
    }

    fn push_cap(&mut self, mesh: &Mesh, cap: &Cap, normal: Vector<Real>, uv_scale: Real) {
        let base = self.positions.len() as u32;

        for (point, planar) in cap.points.iter().zip(&cap.planar) {
            let skin = interpolated_skin_weights(mesh, &point.source);
            let _ = self.push_attributes(point.position, normal, planar.coords * uv_scale, skin);
        }

        self.caps
            .extend(cap.triangles.iter().map(|t| t.map(|i| i + base)));
    }

    fn build(self, separation: Vector<Real>) -> MeshPiece {
        let cap_start = self.body.len();
        let mut indices = self.body;
        indices.extend(self.caps);

        MeshPiece {
            mesh: Mesh::from_raw_parts(
                self.positions,
                self.normals,
                self.uvs,
                self.skin_weights,
                indices,
            ),
            cap_start,
            separation,
        }
    }
}

fn interpolated_normal_and_uv(mesh: &Mesh, source: &PointSource) -> (Vector<Real>, Uv) {
    match *source {
        PointSource::Vertex(i) => (mesh.normals()[i as usize], mesh.uvs()[i as usize]),
        PointSource::Crossing { a, b, t } => {
            let (n_a, n_b) = (mesh.normals()[a as usize], mesh.normals()[b as usize]);
            let (uva, uvb) = (mesh.uvs()[a as usize], mesh.uvs()[b as usize]);
            let normal = n_a
                .lerp(&n_b, t)
                .try_normalize(Real::EPSILON)
                .unwrap_or(n_a);
            (normal, uva.lerp(&uvb, t))
        }
    }
}

fn interpolated_skin_weights(mesh: &Mesh, source: &PointSource) -> Option<SkinWeights> {
    let weights = mesh.skin_weights()?;
    Some(match *source {
        PointSource::Vertex(i) => weights[i as usize],
        PointSource::Crossing { a, b, t } => weights[a as usize].lerp(&weights[b as usize], t),
    })
}

/// Splits a mesh by a plane, possibly over several calls to [`MeshSplitter::step`].
///
/// The splitter works on its own buffers: the source mesh is never modified, and nothing is
/// produced until [`MeshSplitter::finish`] is called.
pub struct MeshSplitter<M: Borrow<Mesh> = Mesh> {
    mesh: M,
    intersection: PlaneIntersection,
    options: CutOptions,
    cap_start: usize,
    cursor: usize,
    front: PieceBuilder,
    back: PieceBuilder,
}

impl<M: Borrow<Mesh>> MeshSplitter<M> {
    /// Prepares the split of `mesh` by `plane`.
    ///
    /// # Errors
    ///
    /// Fails with [`CutError::NoIntersection`] if the plane does not cross the mesh, and with
    /// [`CutError::MalformedMesh`] if the mesh is invalid.
    pub fn new(mesh: M, plane: &CutPlane, options: &CutOptions) -> Result<Self, CutError> {
        let source = mesh.borrow();

        if options.flags.contains(CutFlags::STRICT_TOPOLOGY) {
            source.check_topology()?;
        }

        let intersection = intersect_plane(source, plane, options.epsilon)?;
        let front = PieceBuilder::new(source);
        let back = PieceBuilder::new(source);
        let cap_start = source.triangle_count();

        Ok(Self {
            mesh,
            intersection,
            options: *options,
            cap_start,
            cursor: 0,
            front,
            back,
        })
    }

    /// Marks the triangles of the source mesh starting at `cap_start` as cap triangles.
    ///
    /// Their fragments end up in the cap section of the resulting pieces.
    pub fn with_cap_start(mut self, cap_start: usize) -> Self {
        self.cap_start = cap_start;
        self
    }

    /// The classification of the source mesh against the cutting plane.
    pub fn intersection(&self) -> &PlaneIntersection {
        &self.intersection
    }

    /// Has every source triangle been processed?
    pub fn is_done(&self) -> bool {
        self.cursor >= self.mesh.borrow().triangle_count()
    }

    /// The number of source triangles not processed yet.
    pub fn remaining(&self) -> usize {
        self.mesh.borrow().triangle_count() - self.cursor
    }

    /// Processes at most `budget` source triangles.
    ///
    /// Returns `true` once every triangle has been processed.
    pub fn step(&mut self, budget: usize) -> bool {
        let mesh = self.mesh.borrow();
        let end = self.cursor.saturating_add(budget).min(mesh.triangle_count());

        for tri_id in self.cursor..end {
            let idx = mesh.indices()[tri_id];
            let is_cap = tri_id >= self.cap_start;

            match self.intersection.classes[tri_id] {
                TriangleClass::Front => {
                    let corners = self.intersection.whole_triangle(mesh, &idx);
                    self.front.push_polygon(mesh, &corners, is_cap);
                }
                TriangleClass::Back => {
                    let corners = self.intersection.whole_triangle(mesh, &idx);
                    self.back.push_polygon(mesh, &corners, is_cap);
                }
                TriangleClass::Straddling => {
                    let front = self.intersection.clip_triangle(mesh, &idx, Side::Front);
                    let back = self.intersection.clip_triangle(mesh, &idx, Side::Back);
                    self.front.push_polygon(mesh, &front, is_cap);
                    self.back.push_polygon(mesh, &back, is_cap);
                }
            }
        }

        self.cursor = end;
        self.is_done()
    }

    /// Completes the split and returns both pieces.
    ///
    /// # Errors
    ///
    /// Fails with [`CutError::DegenerateCut`] if one of the pieces has no triangle.
    pub fn finish(mut self) -> Result<SplitOutput, CutError> {
        let _ = self.step(usize::MAX);

        let mesh = self.mesh.borrow();
        let mut stats = SplitStats {
            source_triangles: mesh.triangle_count(),
            straddling_triangles: self.intersection.straddling.len(),
            front_fragments: self.front.fragment_count(),
            back_fragments: self.back.fragment_count(),
            ..SplitStats::default()
        };

        if stats.front_fragments == 0 || stats.back_fragments == 0 {
            log::debug!(
                "degenerate cut: {} front and {} back fragment(s)",
                stats.front_fragments,
                stats.back_fragments
            );
            return Err(CutError::DegenerateCut {
                front_triangles: stats.front_fragments,
                back_triangles: stats.back_fragments,
            });
        }

        let plane = self.intersection.plane;

        if self.options.flags.contains(CutFlags::CAP) {
            // The front piece is closed by a cap facing backward, and conversely.
            for (side, builder, cap_plane) in [
                (Side::Front, &mut self.front, plane.flipped()),
                (Side::Back, &mut self.back, plane),
            ] {
                let cap_edges: Vec<_> = side_edges(&self.intersection.edges, side)
                    .into_iter()
                    .map(|[a, b]| [b, a])
                    .collect();
                let chained = chain_loops(&cap_edges);
                let cap = triangulate_cap(chained.loops, &cap_plane, self.options.epsilon);

                builder.push_cap(
                    mesh,
                    &cap,
                    cap_plane.normal().into_inner(),
                    self.options.cap_uv_scale,
                );

                stats.cap_triangles += cap.triangles.len();
                stats.loops += cap.loops;
                stats.discarded_loops += cap.discarded_loops + chained.open_chains;
            }
        }

        log::debug!(
            "split {} triangle(s) into {} front and {} back triangle(s) with {} cap triangle(s)",
            stats.source_triangles,
            stats.front_fragments,
            stats.back_fragments,
            stats.cap_triangles
        );

        let normal = plane.normal().into_inner();
        Ok(SplitOutput {
            front: self.front.build(normal),
            back: self.back.build(-normal),
            stats,
        })
    }
}

/// Splits `mesh` by `plane` into two pieces, closing both openings with caps unless
/// [`CutFlags::CAP`] is disabled.
///
/// The front piece is on the side the plane normal points to.
pub fn split_mesh(
    mesh: &Mesh,
    plane: &CutPlane,
    options: &CutOptions,
) -> Result<SplitOutput, CutError> {
    MeshSplitter::new(mesh, plane, options)?.finish()
}
