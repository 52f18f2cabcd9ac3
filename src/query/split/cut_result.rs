use crate::math::{Real, UnitVector, Vector};
use crate::shape::Mesh;
use core::ops::Range;
use na::Unit;

/// A piece of a cut mesh.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshPiece {
    /// The geometry of this piece.
    ///
    /// Cap triangles are stored after every other triangle, see [`MeshPiece::cap_triangles`].
    pub mesh: Mesh,
    /// The index of the first cap triangle of `mesh`.
    pub cap_start: usize,
    /// The sum of the normals of the cutting planes, oriented toward this piece.
    ///
    /// Pushing the piece along this direction moves it away from the other pieces.
    pub separation: Vector<Real>,
}

impl MeshPiece {
    /// A piece made of a whole mesh, without any cap.
    pub fn whole(mesh: Mesh) -> Self {
        let cap_start = mesh.triangle_count();
        Self {
            mesh,
            cap_start,
            separation: Vector::zeros(),
        }
    }

    /// The range of the cap triangles in the index buffer of [`MeshPiece::mesh`].
    ///
    /// Hosts typically render this range with its own material section.
    #[inline]
    pub fn cap_triangles(&self) -> Range<usize> {
        self.cap_start..self.mesh.triangle_count()
    }

    /// The range of the triangles that come from the surface of the original mesh.
    #[inline]
    pub fn body_triangles(&self) -> Range<usize> {
        0..self.cap_start
    }

    /// The normalized separation direction of this piece, if any.
    pub fn separation_direction(&self) -> Option<UnitVector<Real>> {
        Unit::try_new(self.separation, Real::EPSILON)
    }
}

/// Counters describing a whole cut.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CutStats {
    /// The number of cutting planes applied.
    pub planes: usize,
    /// The number of times a piece was split in two.
    pub splits: usize,
    /// The number of triangles of the mesh before the cut.
    pub source_triangles: usize,
    /// The number of triangles of all the pieces.
    pub output_triangles: usize,
    /// The number of cap triangles generated.
    pub cap_triangles: usize,
    /// The number of degenerate boundary loops that did not produce any cap.
    pub discarded_loops: usize,
}

/// The pieces resulting from a cut.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CutResult {
    /// The pieces. There are always at least two of them.
    pub pieces: Vec<MeshPiece>,
    /// Counters describing the cut.
    pub stats: CutStats,
}

impl CutResult {
    /// The total number of triangles of all the pieces.
    pub fn triangle_count(&self) -> usize {
        self.pieces.iter().map(|p| p.mesh.triangle_count()).sum()
    }

    /// Are all the pieces closed meshes?
    pub fn is_closed(&self) -> bool {
        self.pieces.iter().all(|p| p.mesh.is_closed())
    }
}
