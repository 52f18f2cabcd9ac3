use cutter3d::math::{Isometry, Point, Real, Vector};
use cutter3d::na;
use cutter3d::query::split::CutResult;
use cutter3d::session::{
    CutSessionController, CutTarget, CutterConfig, InputAdapter, MeshHost, MeshId, Mobility,
    SpatialQuery,
};
use cutter3d::shape::Mesh;
use cutter3d::transformation::to_mesh;
use cutter3d::utils::hashmap::HashMap;

pub struct SceneMesh {
    pub mesh: Mesh,
    pub pose: Isometry<Real>,
    pub mobility: Mobility,
}

/// A host keeping its meshes in a map, and replacing cut meshes by their pieces.
#[derive(Default)]
pub struct Scene {
    pub meshes: HashMap<MeshId, SceneMesh>,
    pub cuts: Vec<(MeshId, CutResult)>,
    next_id: u64,
}

impl Scene {
    pub fn add(&mut self, mesh: Mesh, pose: Isometry<Real>, mobility: Mobility) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        let _ = self.meshes.insert(
            id,
            SceneMesh {
                mesh,
                pose,
                mobility,
            },
        );
        id
    }
}

impl MeshHost for Scene {
    fn target(&self, id: MeshId) -> Option<CutTarget<'_>> {
        self.meshes.get(&id).map(|m| CutTarget {
            mesh: &m.mesh,
            world_from_mesh: m.pose,
            mobility: m.mobility,
        })
    }

    fn apply_cut(&mut self, id: MeshId, result: CutResult) {
        if let Some(cut) = self.meshes.remove(&id) {
            for piece in &result.pieces {
                let _ = self.add(piece.mesh.clone(), cut.pose, cut.mobility);
            }
        }
        self.cuts.push((id, result));
    }
}

/// Picks the first mesh registered within one unit of the blade.
#[derive(Default)]
pub struct Pick(pub Vec<(MeshId, Point<Real>)>);

impl SpatialQuery for Pick {
    fn target_at(&self, blade: &Isometry<Real>) -> Option<MeshId> {
        let blade = Point::from(blade.translation.vector);
        self.0
            .iter()
            .find(|(_, center)| na::distance(center, &blade) <= 1.0)
            .map(|(id, _)| *id)
    }
}

/// An input adapter for controllers driven with commands only.
pub struct NoInput;

impl InputAdapter for NoInput {
    type Event = ();

    fn translate(&mut self, _: ()) -> Option<cutter3d::session::CutCommand> {
        None
    }
}

pub const CUBE_HEIGHT: Real = 5.0;

/// A scene with a single unit cube centered at `(0, 0, CUBE_HEIGHT)`.
pub fn cube_scene(mobility: Mobility) -> (Scene, MeshId) {
    let mut scene = Scene::default();
    let id = scene.add(
        to_mesh::cuboid(&Vector::repeat(0.5)),
        Isometry::translation(0.0, 0.0, CUBE_HEIGHT),
        mobility,
    );
    (scene, id)
}

pub fn controller(
    scene: Scene,
    config: CutterConfig,
) -> CutSessionController<Scene, Pick, NoInput> {
    let pick = scene
        .meshes
        .iter()
        .map(|(id, m)| (*id, Point::from(m.pose.translation.vector)))
        .collect();
    CutSessionController::new(scene, Pick(pick), NoInput, config)
}

/// A controller pose whose blade cuts the cube horizontally at `z`.
pub fn pose_at(z: Real) -> Isometry<Real> {
    Isometry::translation(0.0, 0.0, z)
}
