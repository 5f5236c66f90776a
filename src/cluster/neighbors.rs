//! Neighbor queries.
//!
//! Every engine in this crate sees the point set only through [`RegionQuery`]:
//! "which points lie within `eps` of point `i`?". Four backends are provided:
//!
//! | Backend | Build | Query | Metric calls per full pass |
//! |---------|-------|-------|----------------------------|
//! | [`BruteForce`] | free | O(n) | n² |
//! | [`DistanceMatrix`] | O(n²) time and memory | O(n) | n²/2, once |
//! | [`KdTree`](super::KdTree) | O(n log n) | ~O(log n + k) | far fewer on low-dimensional data |
//! | [`SortedLine`](super::SortedLine) | sorted scalars | O(log n + k) | none |
//!
//! All backends return the same neighborhoods: ascending index order, the query
//! point itself always included (at distance 0, without consulting the metric).

use rayon::prelude::*;

use crate::metric::Metric;

/// A point within range of a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbor {
    /// Index into the point set.
    pub index: usize,
    /// Distance from the query point.
    pub distance: f64,
}

/// Radius queries over an indexed point set.
///
/// Implementations must be pure: the answer depends only on the point set, the
/// metric, `index` and `eps`.
pub trait RegionQuery {
    /// Number of points in the set.
    fn len(&self) -> usize;

    /// Whether the set is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All points within `eps` (inclusive) of point `index`, with their distances.
    ///
    /// Sorted by ascending index; `index` itself is always present at distance 0.
    fn neighbors_within(&self, index: usize, eps: f64) -> Vec<Neighbor>;

    /// Indices of all points within `eps` of point `index`, ascending.
    fn neighbors(&self, index: usize, eps: f64) -> Vec<usize> {
        self.neighbors_within(index, eps)
            .into_iter()
            .map(|n| n.index)
            .collect()
    }
}

/// Exhaustive pairwise scan. No setup cost, O(n) metric calls per query.
#[derive(Debug)]
pub struct BruteForce<'a, P, M> {
    points: &'a [P],
    metric: &'a M,
}

impl<'a, P, M: Metric<P>> BruteForce<'a, P, M> {
    /// Scan `points` using `metric`.
    pub fn new(points: &'a [P], metric: &'a M) -> Self {
        Self { points, metric }
    }
}

impl<P, M: Metric<P>> RegionQuery for BruteForce<'_, P, M> {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn neighbors_within(&self, index: usize, eps: f64) -> Vec<Neighbor> {
        let point = &self.points[index];
        self.points
            .iter()
            .enumerate()
            .filter_map(|(j, other)| {
                if j == index {
                    return Some(Neighbor {
                        index: j,
                        distance: 0.0,
                    });
                }
                let distance = self.metric.distance(point, other);
                (distance <= eps).then_some(Neighbor { index: j, distance })
            })
            .collect()
    }
}

/// Dense, precomputed pairwise distances.
///
/// Each unordered pair is evaluated exactly once, in parallel. Worth it when the
/// metric is expensive and the set is small enough for an `n * n` table of `f64`.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    dists: Vec<f64>,
}

impl DistanceMatrix {
    /// Evaluate `metric` over every pair of `points`.
    pub fn new<P, M>(points: &[P], metric: &M) -> Self
    where
        P: Sync,
        M: Metric<P> + Sync,
    {
        let n = points.len();
        let upper: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                points[i + 1..]
                    .iter()
                    .map(|other| metric.distance(&points[i], other))
                    .collect()
            })
            .collect();

        let mut dists = vec![0.0f64; n * n];
        for (i, row) in upper.iter().enumerate() {
            for (offset, &d) in row.iter().enumerate() {
                let j = i + 1 + offset;
                dists[i * n + j] = d;
                dists[j * n + i] = d;
            }
        }
        Self { n, dists }
    }

    /// Distance between points `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.dists[i * self.n + j]
    }

    /// Row `i` of the table: distances from point `i` to every point.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.dists[i * self.n..(i + 1) * self.n]
    }
}

impl RegionQuery for DistanceMatrix {
    fn len(&self) -> usize {
        self.n
    }

    fn neighbors_within(&self, index: usize, eps: f64) -> Vec<Neighbor> {
        self.row(index)
            .iter()
            .enumerate()
            .filter(|&(j, &d)| j == index || d <= eps)
            .map(|(j, &d)| Neighbor {
                index: j,
                distance: if j == index { 0.0 } else { d },
            })
            .collect()
    }
}

/// Every point's neighborhood at one radius.
///
/// This is the eps-graph the density classifier and the cluster expansion run on.
/// It only lives for one clustering call.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhoods {
    epsilon: f64,
    lists: Vec<Vec<usize>>,
}

impl Neighborhoods {
    /// Query every point's neighborhood at `epsilon`, in parallel.
    pub fn compute<Q: RegionQuery + Sync + ?Sized>(query: &Q, epsilon: f64) -> Self {
        let lists = (0..query.len())
            .into_par_iter()
            .map(|i| query.neighbors(i, epsilon))
            .collect();
        Self { epsilon, lists }
    }

    /// Radius these neighborhoods were computed at.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Neighbors of point `i` (ascending, `i` included).
    pub fn of(&self, i: usize) -> &[usize] {
        &self.lists[i]
    }

    /// Neighborhood size of point `i`, counting `i` itself.
    pub fn count(&self, i: usize) -> usize {
        self.lists[i].len()
    }
}

/// Neighborhoods with distances, computed once at the widest radius of a sweep.
///
/// Any smaller radius is derived by filtering, so a sweep over `k` radii costs one
/// round of metric calls instead of `k`.
#[derive(Debug, Clone)]
pub struct WeightedNeighborhoods {
    epsilon: f64,
    lists: Vec<Vec<Neighbor>>,
}

impl WeightedNeighborhoods {
    /// Query every point's neighborhood at `epsilon`, in parallel.
    pub fn compute<Q: RegionQuery + Sync + ?Sized>(query: &Q, epsilon: f64) -> Self {
        let lists = (0..query.len())
            .into_par_iter()
            .map(|i| query.neighbors_within(i, epsilon))
            .collect();
        Self { epsilon, lists }
    }

    /// Like [`compute`](Self::compute), but gives up with `None` as soon as `stop`
    /// returns true. `stop` is polled once per point.
    pub(crate) fn compute_until<Q, F>(query: &Q, epsilon: f64, stop: F) -> Option<Self>
    where
        Q: RegionQuery + Sync + ?Sized,
        F: Fn() -> bool + Sync,
    {
        let lists = (0..query.len())
            .into_par_iter()
            .map(|i| (!stop()).then(|| query.neighbors_within(i, epsilon)))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { epsilon, lists })
    }

    /// Radius these neighborhoods were computed at.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Neighbors of point `i` with distances.
    pub fn of(&self, i: usize) -> &[Neighbor] {
        &self.lists[i]
    }

    /// Neighborhoods at a smaller radius.
    ///
    /// `epsilon` must not exceed the radius these were computed at; points beyond
    /// that radius are simply not known.
    pub fn restrict(&self, epsilon: f64) -> Neighborhoods {
        debug_assert!(epsilon <= self.epsilon);
        let lists: Vec<Vec<usize>> = self
            .lists
            .par_iter()
            .map(|hood| {
                hood.iter()
                    .filter(|n| n.distance <= epsilon)
                    .map(|n| n.index)
                    .collect()
            })
            .collect();
        Neighborhoods { epsilon, lists }
    }
}
