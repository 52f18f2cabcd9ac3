use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Uv, Vector};
use crate::shape::SkinWeights;
use crate::utils::hashmap::HashMap;
use crate::utils::{weld_positions, SortedPair};

/// Error indicating that a mesh buffer is malformed.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// A mesh must contain at least one triangle.
    #[error("a mesh must contain at least one triangle")]
    EmptyIndices,
    /// A per-vertex attribute buffer does not have one entry per vertex.
    #[error("the {attribute} buffer has {found} entries but the mesh has {expected} vertices")]
    AttributeLengthMismatch {
        /// The name of the faulty attribute.
        attribute: &'static str,
        /// The number of vertices of the mesh.
        expected: usize,
        /// The number of entries of the attribute buffer.
        found: usize,
    },
    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index} but the mesh only has {vertex_count} vertices")]
    IndexOutOfBounds {
        /// The faulty triangle.
        triangle: usize,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices of the mesh.
        vertex_count: usize,
    },
    /// A vertex position contains a NaN or infinite coordinate.
    #[error("vertex {vertex} has a non-finite position")]
    NonFinitePosition {
        /// The faulty vertex.
        vertex: usize,
    },
    /// An edge is shared by more than two triangles.
    #[error("the edge between vertices {a} and {b} is shared by {count} triangles")]
    NonManifoldEdge {
        /// First (welded) vertex of the edge.
        a: u32,
        /// Second (welded) vertex of the edge.
        b: u32,
        /// The number of triangles sharing this edge.
        count: usize,
    },
}

/// An indexed triangle mesh with per-vertex normals, texture coordinates and optional skin weights.
///
/// This is the engine-agnostic geometry buffer every cut reads from and writes to.
/// Triangles are wound counter-clockwise when seen from their front side.
///
/// Vertices may be duplicated along UV or normal seams: every topological query
/// ([`Mesh::boundary_edges`], [`Mesh::is_closed`], ...) welds vertices with identical
/// positions first.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Mesh {
    positions: Vec<Point<Real>>,
    normals: Vec<Vector<Real>>,
    uvs: Vec<Uv>,
    skin_weights: Option<Vec<SkinWeights>>,
    indices: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a new mesh, checking that its buffers are consistent.
    ///
    /// # Errors
    ///
    /// Fails if `indices` is empty, if `normals` or `uvs` do not have one entry per position,
    /// if an index is out of bounds, or if a position is not finite.
    pub fn new(
        positions: Vec<Point<Real>>,
        normals: Vec<Vector<Real>>,
        uvs: Vec<Uv>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, MeshError> {
        let mesh = Self::from_raw_parts(positions, normals, uvs, None, indices);
        mesh.validate()?;
        Ok(mesh)
    }

    /// Creates a new mesh from positions only.
    ///
    /// Normals are computed as area-weighted averages of the adjacent face normals, and texture
    /// coordinates are set to zero.
    pub fn from_positions(
        positions: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, MeshError> {
        let n = positions.len();
        let mut mesh =
            Self::from_raw_parts(positions, vec![Vector::zeros(); n], vec![Uv::zeros(); n], None, indices);
        mesh.validate()?;
        mesh.recompute_normals();
        Ok(mesh)
    }

    /// Attaches skin weights to this mesh, one entry per vertex.
    pub fn with_skin_weights(mut self, skin_weights: Vec<SkinWeights>) -> Result<Self, MeshError> {
        if skin_weights.len() != self.positions.len() {
            return Err(MeshError::AttributeLengthMismatch {
                attribute: "skin weights",
                expected: self.positions.len(),
                found: skin_weights.len(),
            });
        }

        self.skin_weights = Some(skin_weights);
        Ok(self)
    }

    /// Assembles a mesh without any validation.
    pub(crate) fn from_raw_parts(
        positions: Vec<Point<Real>>,
        normals: Vec<Vector<Real>>,
        uvs: Vec<Uv>,
        skin_weights: Option<Vec<SkinWeights>>,
        indices: Vec<[u32; 3]>,
    ) -> Self {
        Self {
            positions,
            normals,
            uvs,
            skin_weights,
            indices,
        }
    }

    /// Merges several meshes (for example the sections of an engine mesh) into a single one.
    ///
    /// Skin weights are kept only if every merged mesh has them.
    pub fn merge(meshes: impl IntoIterator<Item = Mesh>) -> Result<Mesh, MeshError> {
        let mut result = Mesh::default();
        let mut all_skinned = true;
        let mut skin_weights = vec![];

        for mesh in meshes {
            let base = result.positions.len() as u32;
            result.positions.extend_from_slice(&mesh.positions);
            result.normals.extend_from_slice(&mesh.normals);
            result.uvs.extend_from_slice(&mesh.uvs);
            result
                .indices
                .extend(mesh.indices.iter().map(|t| [t[0] + base, t[1] + base, t[2] + base]));

            match mesh.skin_weights {
                Some(weights) if all_skinned => skin_weights.extend(weights),
                _ => all_skinned = false,
            }
        }

        if all_skinned && !result.positions.is_empty() {
            result.skin_weights = Some(skin_weights);
        }

        result.validate()?;
        Ok(result)
    }

    /// Checks that the buffers of this mesh are consistent.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.is_empty() {
            return Err(MeshError::EmptyIndices);
        }

        let vertex_count = self.positions.len();
        let attribute_lengths = [
            ("normals", self.normals.len()),
            ("uvs", self.uvs.len()),
            (
                "skin weights",
                self.skin_weights.as_ref().map_or(vertex_count, Vec::len),
            ),
        ];

        for (attribute, found) in attribute_lengths {
            if found != vertex_count {
                return Err(MeshError::AttributeLengthMismatch {
                    attribute,
                    expected: vertex_count,
                    found,
                });
            }
        }

        if let Some(vertex) = self
            .positions
            .iter()
            .position(|pt| !pt.iter().all(|x| x.is_finite()))
        {
            return Err(MeshError::NonFinitePosition { vertex });
        }

        for (triangle, idx) in self.indices.iter().enumerate() {
            if let Some(index) = idx.iter().copied().find(|i| *i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfBounds {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(())
    }

    /// Checks that no edge of this mesh is shared by more than two triangles.
    ///
    /// Vertices with identical positions are welded before counting.
    pub fn check_topology(&self) -> Result<(), MeshError> {
        let counts = self.welded_edge_counts();
        let mut worst = counts
            .iter()
            .filter(|(_, count)| **count > 2)
            .collect::<Vec<_>>();
        worst.sort();

        match worst.first() {
            Some((edge, count)) => Err(MeshError::NonManifoldEdge {
                a: *edge.first(),
                b: *edge.second(),
                count: **count,
            }),
            None => Ok(()),
        }
    }

    /// The vertex positions of this mesh.
    #[inline]
    pub fn positions(&self) -> &[Point<Real>] {
        &self.positions
    }

    /// The vertex normals of this mesh.
    #[inline]
    pub fn normals(&self) -> &[Vector<Real>] {
        &self.normals
    }

    /// The vertex texture coordinates of this mesh.
    #[inline]
    pub fn uvs(&self) -> &[Uv] {
        &self.uvs
    }

    /// The vertex skin weights of this mesh, if it is skinned.
    #[inline]
    pub fn skin_weights(&self) -> Option<&[SkinWeights]> {
        self.skin_weights.as_deref()
    }

    /// The triangles of this mesh.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The number of vertices of this mesh.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// The three corners of the `i`-th triangle.
    pub fn triangle(&self, i: usize) -> [Point<Real>; 3] {
        let idx = self.indices[i];
        [
            self.positions[idx[0] as usize],
            self.positions[idx[1] as usize],
            self.positions[idx[2] as usize],
        ]
    }

    /// The non-normalized normal of the `i`-th triangle. Its norm is twice the triangle area.
    pub fn scaled_face_normal(&self, i: usize) -> Vector<Real> {
        let [a, b, c] = self.triangle(i);
        (b - a).cross(&(c - a))
    }

    /// The axis-aligned bounding box of this mesh.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// The total area of the triangles of this mesh.
    pub fn area(&self) -> Real {
        (0..self.indices.len())
            .map(|i| self.scaled_face_normal(i).norm() * 0.5)
            .sum()
    }

    /// The signed volume enclosed by this mesh.
    ///
    /// Positive for closed meshes with outward-facing triangles.
    pub fn signed_volume(&self) -> Real {
        self.indices
            .iter()
            .map(|idx| {
                let a = self.positions[idx[0] as usize].coords;
                let b = self.positions[idx[1] as usize].coords;
                let c = self.positions[idx[2] as usize].coords;
                a.dot(&b.cross(&c))
            })
            .sum::<Real>()
            / 6.0
    }

    /// Maps every vertex to the smallest index of a vertex with the same position.
    pub fn weld_map(&self) -> Vec<u32> {
        weld_positions(&self.positions)
    }

    fn welded_edge_counts(&self) -> HashMap<SortedPair<u32>, usize> {
        let welds = self.weld_map();
        let mut counts = HashMap::with_capacity(self.indices.len() * 3 / 2);

        for idx in &self.indices {
            for k in 0..3 {
                let a = welds[idx[k] as usize];
                let b = welds[idx[(k + 1) % 3] as usize];
                if a != b {
                    *counts.entry(SortedPair::new(a, b)).or_insert(0) += 1;
                }
            }
        }

        counts
    }

    /// The edges used by a single triangle, as pairs of welded vertex indices.
    ///
    /// The result is sorted.
    pub fn boundary_edges(&self) -> Vec<[u32; 2]> {
        let mut edges: Vec<_> = self
            .welded_edge_counts()
            .into_iter()
            .filter(|(_, count)| *count == 1)
            .map(|(edge, _)| edge.into_inner())
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Is every edge of this mesh shared by exactly two triangles?
    ///
    /// This is the manifold, watertight, property every capped cut piece has.
    pub fn is_closed(&self) -> bool {
        self.welded_edge_counts().values().all(|count| *count == 2)
    }

    /// Recomputes the vertex normals as area-weighted averages of the adjacent face normals.
    pub fn recompute_normals(&mut self) {
        self.normals.iter_mut().for_each(|n| *n = Vector::zeros());

        for i in 0..self.indices.len() {
            let face_normal = self.scaled_face_normal(i);
            for k in self.indices[i] {
                self.normals[k as usize] += face_normal;
            }
        }

        for n in &mut self.normals {
            *n = n.try_normalize(Real::EPSILON).unwrap_or_else(Vector::zeros);
        }
    }

    /// Applies a rigid transformation to the positions and normals of this mesh.
    pub fn transform_by(&mut self, m: &Isometry<Real>) {
        self.positions.iter_mut().for_each(|p| *p = m * *p);
        self.normals.iter_mut().for_each(|n| *n = m * *n);
    }

    /// A copy of this mesh transformed by `m`.
    pub fn transformed(mut self, m: &Isometry<Real>) -> Self {
        self.transform_by(m);
        self
    }

    /// Splits this mesh into its raw buffers: positions, normals, uvs, skin weights and indices.
    pub fn into_parts(
        self,
    ) -> (
        Vec<Point<Real>>,
        Vec<Vector<Real>>,
        Vec<Uv>,
        Option<Vec<SkinWeights>>,
        Vec<[u32; 3]>,
    ) {
        (
            self.positions,
            self.normals,
            self.uvs,
            self.skin_weights,
            self.indices,
        )
    }
}
