//! Generation of simple closed meshes, with normals and texture coordinates.

pub use self::cuboid_to_mesh::cuboid;
pub use self::sphere_to_mesh::uv_sphere;
pub use self::torus_to_mesh::torus;

mod cuboid_to_mesh;
mod sphere_to_mesh;
mod torus_to_mesh;
