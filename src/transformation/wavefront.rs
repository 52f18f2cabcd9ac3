use crate::query::split::MeshPiece;
use crate::shape::Mesh;
use core::ops::Range;
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::path::Path;

impl Mesh {
    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// Positions, texture coordinates and normals are all exported.
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), ObjError> {
        write_obj(self, &[("mesh", 0..self.triangle_count())], path.as_ref())
    }
}

impl MeshPiece {
    /// Outputs a Wavefront (`.obj`) file at the given path, with the cap triangles in their
    /// own `cap` group.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), ObjError> {
        let caps = self.cap_triangles();
        write_obj(
            &self.mesh,
            &[("body", 0..caps.start), ("cap", caps)],
            path.as_ref(),
        )
    }
}

fn write_obj(mesh: &Mesh, groups: &[(&str, Range<usize>)], path: &Path) -> Result<(), ObjError> {
    let mut file = std::fs::File::create(path)?;

    ObjData {
        position: mesh.positions().iter().map(|v| [v.x, v.y, v.z]).collect(),
        texture: mesh.uvs().iter().map(|uv| [uv.x, uv.y]).collect(),
        normal: mesh.normals().iter().map(|n| [n.x, n.y, n.z]).collect(),
        objects: vec![Object {
            groups: groups
                .iter()
                .enumerate()
                .map(|(index, (name, range))| Group {
                    polys: mesh.indices()[range.clone()]
                        .iter()
                        .map(|tri| {
                            SimplePolygon(
                                tri.iter()
                                    .map(|i| IndexTuple(*i as usize, Some(*i as usize), Some(*i as usize)))
                                    .collect(),
                            )
                        })
                        .collect(),
                    name: name.to_string(),
                    index,
                    material: None,
                })
                .collect(),
            name: "cutter3d".to_string(),
        }],
        ..Default::default()
    }
    .write_to_buf(&mut file)
}
