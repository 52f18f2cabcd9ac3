use crate::math::{Isometry, Real};
use crate::query::split::CutResult;
use crate::shape::Mesh;

/// The host-side identifier of a cuttable mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshId(pub u64);

/// Whether a mesh may be replaced by the pieces of a cut.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Mobility {
    /// The mesh is part of the static world and cannot be cut.
    Static,
    /// The mesh can be cut.
    Movable,
}

/// A mesh owned by the host, as seen by the cutter.
#[derive(Copy, Clone, Debug)]
pub struct CutTarget<'a> {
    /// The geometry, in the local frame of the mesh.
    pub mesh: &'a Mesh,
    /// The transform from the local frame of the mesh to world space.
    pub world_from_mesh: Isometry<Real>,
    /// Can this mesh be cut?
    pub mobility: Mobility,
}

/// The host engine owning the cuttable meshes.
pub trait MeshHost {
    /// The mesh identified by `id`, or `None` if it no longer exists.
    fn target(&self, id: MeshId) -> Option<CutTarget<'_>>;

    /// Replaces the mesh identified by `id` with the pieces of a cut.
    ///
    /// Pieces are expressed in the local frame of the replaced mesh.
    fn apply_cut(&mut self, id: MeshId, result: CutResult);
}

/// Finds the mesh touched by the blade.
pub trait SpatialQuery {
    /// The mesh overlapping the blade at the world-space pose `blade`, if any.
    fn target_at(&self, blade: &Isometry<Real>) -> Option<MeshId>;
}

impl<T: MeshHost + ?Sized> MeshHost for &mut T {
    fn target(&self, id: MeshId) -> Option<CutTarget<'_>> {
        (**self).target(id)
    }

    fn apply_cut(&mut self, id: MeshId, result: CutResult) {
        (**self).apply_cut(id, result)
    }
}

impl<T: SpatialQuery + ?Sized> SpatialQuery for &T {
    fn target_at(&self, blade: &Isometry<Real>) -> Option<MeshId> {
        (**self).target_at(blade)
    }
}

impl<T: SpatialQuery + ?Sized> SpatialQuery for &mut T {
    fn target_at(&self, blade: &Isometry<Real>) -> Option<MeshId> {
        (**self).target_at(blade)
    }
}
