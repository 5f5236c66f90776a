//! KD-tree radius queries for coordinate points.
//!
//! The tree is a drop-in [`RegionQuery`]: for any [`AxisBounded`] metric it returns
//! exactly what [`BruteForce`](super::BruteForce) returns, but skips every subtree
//! whose splitting plane is farther than `eps` from the query point. On
//! low-dimensional data this turns the O(n²) neighbor pass of a clustering call into
//! roughly O(n log n + total neighborhood size).
//!
//! Built once over a borrowed point set; nodes live in a flat `Vec` and refer to
//! each other by position.

use super::neighbors::{Neighbor, RegionQuery};
use crate::error::{Error, Result};
use crate::metric::AxisBounded;

#[derive(Debug, Clone)]
struct Node {
    point: usize,
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Balanced KD-tree over borrowed coordinate points.
#[derive(Debug)]
pub struct KdTree<'a, P, M> {
    points: &'a [P],
    metric: &'a M,
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl<'a, P, M> KdTree<'a, P, M>
where
    P: AsRef<[f64]>,
    M: AxisBounded<P>,
{
    /// Build a tree over `points`, split by median along cycling axes.
    ///
    /// All points must share one non-zero dimension.
    pub fn new(points: &'a [P], metric: &'a M) -> Result<Self> {
        if let Some(first) = points.first() {
            let d = first.as_ref().len();
            if d == 0 {
                return Err(Error::InvalidParameter {
                    name: "dimension",
                    message: "must be at least 1",
                });
            }
            for point in points.iter().skip(1) {
                let found = point.as_ref().len();
                if found != d {
                    return Err(Error::DimensionMismatch { expected: d, found });
                }
            }
        }

        let mut indices: Vec<usize> = (0..points.len()).collect();
        let mut nodes = Vec::with_capacity(points.len());
        let root = build(points, &mut indices, 0, &mut nodes);
        Ok(Self {
            points,
            metric,
            nodes,
            root,
        })
    }

    /// Depth of the deepest leaf (0 for an empty tree).
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], at: Option<usize>) -> usize {
            match at {
                None => 0,
                Some(i) => 1 + walk(nodes, nodes[i].left).max(walk(nodes, nodes[i].right)),
            }
        }
        walk(&self.nodes, self.root)
    }
}

fn build<P: AsRef<[f64]>>(
    points: &[P],
    indices: &mut [usize],
    depth: usize,
    nodes: &mut Vec<Node>,
) -> Option<usize> {
    if indices.is_empty() {
        return None;
    }
    let dim = points[indices[0]].as_ref().len();
    let axis = depth % dim;
    let mid = indices.len() / 2;
    indices.select_nth_unstable_by(mid, |&a, &b| {
        points[a].as_ref()[axis].total_cmp(&points[b].as_ref()[axis])
    });

    let slot = nodes.len();
    nodes.push(Node {
        point: indices[mid],
        axis,
        left: None,
        right: None,
    });

    let (left, rest) = indices.split_at_mut(mid);
    let right = &mut rest[1..];
    let l = build(points, left, depth + 1, nodes);
    let r = build(points, right, depth + 1, nodes);
    nodes[slot].left = l;
    nodes[slot].right = r;
    Some(slot)
}

impl<P, M> RegionQuery for KdTree<'_, P, M>
where
    P: AsRef<[f64]>,
    M: AxisBounded<P>,
{
    fn len(&self) -> usize {
        self.points.len()
    }

    fn neighbors_within(&self, index: usize, eps: f64) -> Vec<Neighbor> {
        let query = &self.points[index];
        let coords = query.as_ref();
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.root.into_iter().collect();

        while let Some(at) = stack.pop() {
            let node = &self.nodes[at];
            if node.point == index {
                out.push(Neighbor {
                    index,
                    distance: 0.0,
                });
            } else {
                let distance = self.metric.distance(query, &self.points[node.point]);
                if distance <= eps {
                    out.push(Neighbor {
                        index: node.point,
                        distance,
                    });
                }
            }

            // Left subtree holds coordinates <= split, right holds >= split.
            let split = self.points[node.point].as_ref()[node.axis];
            let offset = coords[node.axis] - split;
            if let Some(left) = node.left {
                if offset <= eps {
                    stack.push(left);
                }
            }
            if let Some(right) = node.right {
                if -offset <= eps {
                    stack.push(right);
                }
            }
        }

        out.sort_unstable_by_key(|n| n.index);
        out
    }
}
