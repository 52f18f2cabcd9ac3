//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, UnitVector, Vector};

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is defined by its minimum and maximum corners. Its edges are always
/// parallel to the coordinate axes, which makes it very cheap to compute and to test
/// against a cutting plane before looking at individual triangles.
///
/// # Example
///
/// ```rust
/// use cutter3d::bounding_volume::Aabb;
/// use cutter3d::math::Point;
///
/// let aabb = Aabb::from_points([
///     Point::new(1.0, 2.0, 3.0),
///     Point::new(-1.0, 4.0, 2.0),
///     Point::new(0.0, 0.0, 5.0),
/// ]);
///
/// assert_eq!(aabb.mins, Point::new(-1.0, 0.0, 2.0));
/// assert_eq!(aabb.maxs, Point::new(1.0, 4.0, 5.0));
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `Real::MAX` and `maxs` components
    /// set to `-Real::MAX`.
    ///
    /// This is often used as the initial value of some AABB merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new AABB that tightly encloses a set of points.
    ///
    /// Returns an invalid AABB (see [`Aabb::new_invalid`]) if `pts` is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut aabb = Self::new_invalid();
        for pt in pts {
            aabb.take_point(pt);
        }
        aabb
    }

    /// Returns `false` if `mins > maxs` along any axis.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.mins.x <= self.maxs.x && self.mins.y <= self.maxs.y && self.mins.z <= self.maxs.z
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Projects every point of this AABB on an arbitrary axis.
    ///
    /// Returns the smallest and largest values of `axis.dot(pt)` over the points of `self`.
    pub fn project_on_axis(&self, axis: &UnitVector<Real>) -> (Real, Real) {
        let cuboid_center = self.center();
        let shift = cuboid_center.coords.dot(&**axis);
        let half_extents = self.half_extents();
        let radius = half_extents.dot(&axis.abs());
        (-radius + shift, radius + shift)
    }
}
