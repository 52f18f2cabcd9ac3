/*!
cutter3d
========

**cutter3d** slices triangle meshes along planes and swept paths, closing
every opening with cap triangles so each resulting piece stays watertight.

It is meant to sit under VR cutting gameplay: the [`session`] module turns
controller input into cut sessions, while [`query::split`] holds the geometric
core (plane intersection, triangle splitting, capping).

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![allow(clippy::type_complexity)]

extern crate alloc;

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod query;
pub mod session;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    pub use f32 as Real;
}

/// Aliases for the mathematical types used throughout this crate.
pub mod math {
    pub use super::real::*;
    pub use na::{Isometry3, Point2, Point3, Translation3, UnitVector3, Vector2, Vector3};

    /// The default tolerance used to decide whether a point lies on a cutting plane.
    pub const DEFAULT_EPSILON: Real = 1.0e-5;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The transformation matrix type.
    pub use Isometry3 as Isometry;

    /// The translation type.
    pub use Translation3 as Translation;

    /// The texture coordinate type.
    pub type Uv = Vector2<Real>;
}
