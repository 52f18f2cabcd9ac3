//! Chaining of intersection edges into closed loops.

use crate::query::split::{BoundaryKey, EdgePoint, EdgeSides, IntersectionEdge, Side};
use crate::utils::hashmap::HashMap;
use smallvec::SmallVec;

/// Closed loops of boundary points.
#[derive(Clone, Debug, Default)]
pub(crate) struct BoundaryLoops {
    pub loops: Vec<Vec<EdgePoint>>,
    /// The number of chains that could not be closed.
    pub open_chains: usize,
}

/// The boundary edges of the piece on `side`, oriented like the fragments of that piece.
///
/// Edges shared by two fragments of the same piece in opposite directions are interior to the
/// piece and cancel each other.
pub(crate) fn side_edges(edges: &[IntersectionEdge], side: Side) -> Vec<[EdgePoint; 2]> {
    let oriented = edges.iter().filter_map(|edge| {
        let [a, b] = edge.points;
        match (edge.sides, side) {
            (EdgeSides::Both, Side::Front) | (EdgeSides::Front, Side::Front) => Some([a, b]),
            (EdgeSides::Both, Side::Back) => Some([b, a]),
            (EdgeSides::Back, Side::Back) => Some([a, b]),
            _ => None,
        }
    });

    cancel_opposite_edges(oriented)
}

fn cancel_opposite_edges(edges: impl Iterator<Item = [EdgePoint; 2]>) -> Vec<[EdgePoint; 2]> {
    let mut kept: Vec<Option<[EdgePoint; 2]>> = vec![];
    let mut pending: HashMap<(BoundaryKey, BoundaryKey), SmallVec<[usize; 1]>> = HashMap::default();

    for edge in edges {
        let key = (edge[0].key, edge[1].key);

        if let Some(twin) = pending
            .get_mut(&(key.1, key.0))
            .and_then(|candidates| candidates.pop())
        {
            kept[twin] = None;
            continue;
        }

        pending.entry(key).or_default().push(kept.len());
        kept.push(Some(edge));
    }

    kept.into_iter().flatten().collect()
}

/// Chains directed edges into closed loops.
///
/// Each loop lists its points in edge order, without repeating the first one.
pub(crate) fn chain_loops(edges: &[[EdgePoint; 2]]) -> BoundaryLoops {
    let mut outgoing: HashMap<BoundaryKey, SmallVec<[usize; 2]>> = HashMap::default();
    for (i, edge) in edges.iter().enumerate() {
        outgoing.entry(edge[0].key).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut result = BoundaryLoops::default();

    for start in 0..edges.len() {
        if used[start] {
            continue;
        }

        used[start] = true;
        let start_key = edges[start][0].key;
        let mut points = vec![edges[start][0]];
        let mut curr = start;

        loop {
            let end = edges[curr][1];

            if end.key == start_key {
                result.loops.push(points);
                break;
            }

            points.push(end);

            let next = outgoing
                .get(&end.key)
                .and_then(|candidates| candidates.iter().copied().find(|i| !used[*i]));

            match next {
                Some(next) => {
                    used[next] = true;
                    curr = next;
                }
                None => {
                    log::debug!(
                        "dropping an open boundary chain of {} point(s)",
                        points.len()
                    );
                    result.open_chains += 1;
                    break;
                }
            }
        }
    }

    result
}
