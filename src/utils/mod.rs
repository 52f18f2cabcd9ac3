//! Various unsorted geometrical and logical operators.

pub use self::point_in_poly2d::point_in_poly2d;
pub use self::point_in_triangle::{corner_direction, is_point_in_triangle, Orientation};
pub use self::sorted_pair::SortedPair;
pub use self::weld::weld_positions;

pub mod hashmap;
mod point_in_poly2d;
mod point_in_triangle;
mod sorted_pair;
mod weld;
