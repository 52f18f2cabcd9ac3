use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use na::Unit;

/// An oriented plane used to cut a mesh.
///
/// The side the normal points to is the *front* side of the plane.
#[derive(PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CutPlane {
    origin: Point<Real>,
    normal: UnitVector<Real>,
}

impl CutPlane {
    /// Creates a plane passing through `origin` with the given normal.
    ///
    /// The normal does not need to be normalized. Returns `None` if it is zero or if any
    /// coordinate is not finite.
    pub fn new(origin: Point<Real>, normal: Vector<Real>) -> Option<Self> {
        if !origin.iter().chain(normal.iter()).all(|x| x.is_finite()) {
            return None;
        }

        let normal = Unit::try_new(normal, Real::EPSILON)?;
        Some(Self { origin, normal })
    }

    /// Creates a plane passing through `origin` with an already normalized normal.
    #[inline]
    pub fn from_unit_normal(origin: Point<Real>, normal: UnitVector<Real>) -> Self {
        Self { origin, normal }
    }

    /// The plane attached to a tracked pose.
    ///
    /// `local_origin` and `local_normal` are expressed in the local frame of `pose`.
    pub fn from_pose(
        pose: &Isometry<Real>,
        local_origin: &Point<Real>,
        local_normal: &UnitVector<Real>,
    ) -> Self {
        Self {
            origin: pose * local_origin,
            normal: pose * local_normal,
        }
    }

    /// A point on this plane.
    #[inline]
    pub fn origin(&self) -> Point<Real> {
        self.origin
    }

    /// The unit normal of this plane.
    #[inline]
    pub fn normal(&self) -> UnitVector<Real> {
        self.normal
    }

    /// The signed distance from the world origin to this plane, along its normal.
    #[inline]
    pub fn bias(&self) -> Real {
        self.normal.dot(&self.origin.coords)
    }

    /// The signed distance from `pt` to this plane.
    ///
    /// Positive on the front side.
    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&(pt - self.origin))
    }

    /// The orthogonal projection of `pt` on this plane.
    #[inline]
    pub fn project_point(&self, pt: &Point<Real>) -> Point<Real> {
        pt - *self.normal * self.signed_distance(pt)
    }

    /// This plane transformed by `m`.
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        Self {
            origin: m * self.origin,
            normal: m * self.normal,
        }
    }

    /// This plane transformed by the inverse of `m`.
    pub fn inverse_transform_by(&self, m: &Isometry<Real>) -> Self {
        Self {
            origin: m.inverse_transform_point(&self.origin),
            normal: m.inverse_transform_unit_vector(&self.normal),
        }
    }

    /// The same plane with its front and back sides swapped.
    pub fn flipped(&self) -> Self {
        Self {
            origin: self.origin,
            normal: -self.normal,
        }
    }

    /// Two unit vectors `(u, v)` spanning this plane, such that `u × v` is the plane normal.
    ///
    /// The basis only depends on the normal, so parallel planes share the same basis.
    pub fn tangent_basis(&self) -> (UnitVector<Real>, UnitVector<Real>) {
        let n = self.normal.into_inner();
        // Start from the coordinate axis least aligned with the normal.
        let axis = if n.x.abs() <= n.y.abs() && n.x.abs() <= n.z.abs() {
            Vector::x()
        } else if n.y.abs() <= n.z.abs() {
            Vector::y()
        } else {
            Vector::z()
        };

        let u = Unit::new_normalize(axis.cross(&n));
        let v = Unit::new_normalize(n.cross(&*u));
        (u, v)
    }

    /// Does this plane pass through `aabb`, or within `epsilon` of it?
    pub fn intersects_aabb(&self, aabb: &Aabb, epsilon: Real) -> bool {
        if !aabb.is_valid() {
            return false;
        }

        let (min, max) = aabb.project_on_axis(&self.normal);
        let bias = self.bias();
        min - bias <= epsilon && max - bias >= -epsilon
    }

    /// Is `other` within `max_angle` radians and `max_distance` of `self`?
    ///
    /// The distance is measured between the two plane origins.
    pub fn is_close_to(&self, other: &CutPlane, max_angle: Real, max_distance: Real) -> bool {
        self.normal.angle(&*other.normal) <= max_angle
            && na::distance(&self.origin, &other.origin) <= max_distance
    }
}
