//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN is a density-based clustering algorithm that groups points based on
//! neighborhood density. Unlike k-means, it:
//!
//! - Discovers clusters of arbitrary shape
//! - Automatically determines the number of clusters
//! - Identifies noise points (outliers)
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Maximum distance between two points to be neighbors (inclusive).
//! - **MinPts**: Minimum neighborhood size for a point to be "core", the point itself included.
//! - **Core point**: Has at least MinPts points within ε.
//! - **Border point**: Within ε of a core point but not core itself.
//! - **Noise point**: Neither core nor border.
//!
//! ## Algorithm Steps
//!
//! 1. Compute every neighborhood once (in parallel) and flag core points.
//! 2. Walk points in index order. An unassigned core point opens the next cluster id.
//! 3. Expansion is breadth-first over ascending neighbor indices: every unassigned
//!    neighbor joins the cluster, and only core neighbors are enqueued.
//!
//! A border point within reach of two clusters joins the one that reaches it first.
//! Together with the fixed traversal order this makes the partition, cluster ids
//! included, a pure function of the input order and the parameters.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) metric calls with [`BruteForce`](super::BruteForce), far fewer
//!   with [`KdTree`](super::KdTree) on low-dimensional data.
//! - **Space**: O(n + Σ|N(i)|) for the cached neighborhoods.
//!
//! ## Limitations
//!
//! - Struggles with varying densities
//! - ε parameter is sensitive and dataset-dependent; the fuzzy variants in this
//!   crate soften exactly that choice
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use std::collections::VecDeque;

use tracing::debug;

use super::classify::core_flags;
use super::membership::FuzzyPartition;
use super::neighbors::{BruteForce, Neighborhoods, RegionQuery};
use super::partition::Partition;
use super::traits::{Clustering, FuzzyClustering};
use super::util;
use crate::error::Result;
use crate::metric::Metric;

/// DBSCAN clustering algorithm.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dbscan {
    /// Epsilon: maximum distance for neighborhood.
    epsilon: f64,
    /// Minimum points for core point classification.
    min_pts: usize,
}

impl Dbscan {
    /// Create a new DBSCAN clusterer.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Maximum distance between two points to be neighbors.
    /// * `min_pts` - Minimum number of points (self included) to form a dense region.
    ///
    /// # Typical Values
    ///
    /// - `epsilon`: Often determined by k-distance plot (k = min_pts - 1).
    /// - `min_pts`: 2 * dimension is a common heuristic.
    pub fn new(epsilon: f64, min_pts: usize) -> Self {
        Self { epsilon, min_pts }
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Neighborhood radius.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Minimum neighborhood size for a core point.
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    fn validate(&self) -> Result<()> {
        util::check_epsilon("epsilon", self.epsilon)?;
        util::check_min_pts("min_pts", self.min_pts)
    }

    /// Fit and predict, returning `None` for noise points.
    pub fn fit_predict_with_noise<P, M>(
        &self,
        points: &[P],
        metric: &M,
    ) -> Result<Vec<Option<usize>>>
    where
        P: Sync,
        M: Metric<P> + Sync,
    {
        Ok(self.fit(&BruteForce::new(points, metric))?.into_labels())
    }
}

impl Default for Dbscan {
    fn default() -> Self {
        Self::new(0.5, 5)
    }
}

impl Clustering for Dbscan {
    fn fit<Q: RegionQuery + Sync + ?Sized>(&self, query: &Q) -> Result<Partition> {
        self.validate()?;
        let hoods = Neighborhoods::compute(query, self.epsilon);
        let partition = expand(&hoods, self.min_pts);
        debug!(
            points = partition.len(),
            epsilon = self.epsilon,
            min_pts = self.min_pts,
            clusters = partition.n_clusters(),
            "dbscan finished"
        );
        Ok(partition)
    }
}

/// Crisp memberships: degree 1 in the assigned cluster, nothing for noise.
impl FuzzyClustering for Dbscan {
    fn fit_fuzzy<Q: RegionQuery + Sync + ?Sized>(&self, query: &Q) -> Result<FuzzyPartition> {
        let partition = self.fit(query)?;
        Ok(FuzzyPartition::new(
            partition.memberships(),
            partition.n_clusters(),
        ))
    }
}

/// Density-reachability expansion over precomputed neighborhoods.
pub(crate) fn expand(hoods: &Neighborhoods, min_pts: usize) -> Partition {
    let n = hoods.len();
    let core = core_flags(hoods, min_pts);
    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut next_cluster = 0;
    let mut queue = VecDeque::new();

    for seed in 0..n {
        if labels[seed].is_some() || !core[seed] {
            continue;
        }

        let cluster_id = next_cluster;
        next_cluster += 1;
        labels[seed] = Some(cluster_id);
        queue.push_back(seed);

        // Only core points are ever enqueued; border points stop the walk.
        while let Some(point) = queue.pop_front() {
            for &neighbor in hoods.of(point) {
                if labels[neighbor].is_some() {
                    continue;
                }
                labels[neighbor] = Some(cluster_id);
                if core[neighbor] {
                    queue.push_back(neighbor);
                }
            }
        }
    }

    Partition::new(labels, core, next_cluster)
}

#[cfg(test)]
#[allow(clippy::needless_range_loop)]
mod tests {
    use super::*;
    use crate::cluster::{classify, PointKind, NOISE};
    use crate::metric::Euclidean;

    #[test]
    fn test_dbscan_two_clusters() {
        // Two well-separated clusters
        let data = vec![
            // Cluster 1: around (0, 0)
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![0.1, 0.1],
            vec![0.05, 0.05],
            // Cluster 2: around (5, 5)
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            vec![5.0, 5.1],
            vec![5.1, 5.1],
            vec![5.05, 5.05],
        ];

        let dbscan = Dbscan::new(0.3, 3);
        let labels = dbscan.fit_predict(&data, &Euclidean).unwrap();

        assert_eq!(labels.len(), 10);
        assert_eq!(labels[..5], [0; 5]);
        assert_eq!(labels[5..], [1; 5]);
    }

    #[test]
    fn test_dbscan_with_noise() {
        // Two clusters plus an outlier
        let data = vec![
            // Cluster 1
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![0.1, 0.1],
            // Outlier
            vec![100.0, 100.0],
            // Cluster 2
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            vec![5.0, 5.1],
            vec![5.1, 5.1],
        ];

        let dbscan = Dbscan::new(0.3, 3);
        let labels = dbscan.fit_predict_with_noise(&data, &Euclidean).unwrap();

        assert_eq!(labels.len(), 9);

        // Point 4 (outlier) should be noise
        assert!(labels[4].is_none());

        // Others should have cluster assignments
        for (i, label) in labels.iter().enumerate() {
            if i != 4 {
                assert!(label.is_some());
            }
        }
    }

    #[test]
    fn test_dbscan_all_noise() {
        // Points too far apart
        let data = vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![0.0, 10.0],
            vec![10.0, 10.0],
        ];

        let dbscan = Dbscan::new(0.5, 3);
        let labels = dbscan.fit_predict(&data, &Euclidean).unwrap();
        assert!(labels.iter().all(|&l| l == NOISE));
    }

    #[test]
    fn test_dbscan_empty_is_not_an_error() {
        let data: Vec<Vec<f64>> = vec![];
        let dbscan = Dbscan::new(0.5, 3);
        let labels = dbscan.fit_predict(&data, &Euclidean).unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn test_dbscan_invalid_params() {
        let data = vec![vec![0.0, 0.0]];

        let dbscan = Dbscan::new(-1.0, 3);
        assert!(dbscan.fit_predict(&data, &Euclidean).is_err());

        let dbscan = Dbscan::new(f64::NAN, 3);
        assert!(dbscan.fit_predict(&data, &Euclidean).is_err());

        let dbscan = Dbscan::new(0.5, 0);
        assert!(dbscan.fit_predict(&data, &Euclidean).is_err());

        // A zero radius is legal: every point only sees itself.
        let dbscan = Dbscan::new(0.0, 1);
        assert_eq!(dbscan.fit_predict(&data, &Euclidean).unwrap(), vec![0]);
    }

    #[test]
    fn test_dbscan_chain() {
        // Chain of points - DBSCAN should connect them
        let data: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64 * 0.3, 0.0]).collect();

        let dbscan = Dbscan::new(0.5, 2);
        let labels = dbscan.fit_predict(&data, &Euclidean).unwrap();
        assert!(labels.iter().all(|&l| l == 0));
    }

    #[test]
    fn test_border_goes_to_first_cluster_that_reaches_it() {
        // Two dense runs on a line with a single bridge point (index 4) in the middle.
        // The bridge is not core but touches a core point of each run.
        let data: Vec<Vec<f64>> = [0.0, 0.25, 0.5, 0.75, 1.75, 2.75, 3.0, 3.25, 3.5]
            .iter()
            .map(|&x| vec![x])
            .collect();
        let p = Dbscan::new(1.0, 4).fit(&BruteForce::new(&data, &Euclidean)).unwrap();

        assert_eq!(p.n_clusters(), 2);
        assert!(!p.is_core(4));
        assert_eq!(p.label(4), Some(0));
        assert_eq!(p.members(0), vec![0, 1, 2, 3, 4]);
        assert_eq!(p.members(1), vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_partition_agrees_with_classifier() {
        let data: Vec<Vec<f64>> = (0..40)
            .map(|i| {
                let t = i as f64;
                vec![(t * 0.37).sin() * 3.0 + (i % 3) as f64, (t * 0.11).cos() * 2.0]
            })
            .collect();
        let q = BruteForce::new(&data, &Euclidean);
        for (eps, min_pts) in [(0.3, 2), (0.6, 3), (1.0, 4), (2.0, 6)] {
            let p = Dbscan::new(eps, min_pts).fit(&q).unwrap();
            let kinds = classify(&q, eps, min_pts).unwrap();
            for i in 0..data.len() {
                assert_eq!(p.is_core(i), kinds[i] == PointKind::Core);
                assert_eq!(p.is_noise(i), kinds[i] == PointKind::Noise);
            }
        }
    }

    #[test]
    fn test_crisp_memberships() {
        let data = vec![vec![0.0], vec![0.5], vec![9.0]];
        let m = Dbscan::new(1.0, 2).fit_memberships(&data, &Euclidean).unwrap();
        assert_eq!(m[0].degree(0), 1.0);
        assert_eq!(m[1].degree(0), 1.0);
        assert!(m[2].is_empty());
    }
}
