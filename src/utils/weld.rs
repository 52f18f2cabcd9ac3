use crate::math::{Point, Real};
use crate::utils::hashmap::{Entry, HashMap};

/// Maps every vertex to the smallest index of a vertex sharing its exact position.
///
/// Vertices duplicated along UV or normal seams end up with the same welded index,
/// which lets topological queries see through the seams. `-0.0` and `0.0` are
/// considered equal.
pub fn weld_positions(points: &[Point<Real>]) -> Vec<u32> {
    let mut first_seen: HashMap<[u32; 3], u32> = HashMap::with_capacity(points.len());
    let mut welds = Vec::with_capacity(points.len());

    for (i, pt) in points.iter().enumerate() {
        let key = position_key(pt);
        let weld = match first_seen.entry(key) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => *e.insert(i as u32),
        };
        welds.push(weld);
    }

    welds
}

fn position_key(pt: &Point<Real>) -> [u32; 3] {
    // Adding 0.0 turns -0.0 into +0.0.
    [
        (pt.x + 0.0).to_bits(),
        (pt.y + 0.0).to_bits(),
        (pt.z + 0.0).to_bits(),
    ]
}
