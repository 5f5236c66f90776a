//! Density-based clustering, crisp and fuzzy.
//!
//! ## Hard vs Fuzzy Clustering
//!
//! **Hard clustering** assigns each point to exactly one cluster or to noise.
//! Simple, but the choice of radius decides every borderline case outright.
//!
//! **Fuzzy clustering** gives each point a degree in `[0, 1]` per cluster. A point
//! halfway between two dense regions gets partial membership in both; a point at
//! the fringe of one region gets a low degree instead of a coin-flip label.
//! Degrees need not sum to 1: the remainder is the point's share of noise.
//!
//! ## Modes
//!
//! | Type | Fixed | Swept | Output |
//! |------|-------|-------|--------|
//! | [`Dbscan`] | eps, min_pts | - | [`Partition`] |
//! | [`CoreBorderDbscan`] | eps | min_pts over `[min_points, max_points]` (graded) | [`FuzzyPartition`] |
//! | [`FuzzyBorderDbscan`] | min_pts | eps over `[min_eps, max_eps]` | [`FuzzyPartition`] |
//! | [`FuzzyDbscan`] | - | both | [`FuzzyPartition`] |
//!
//! [`Mode`] picks one at runtime.
//!
//! ## Layers
//!
//! 1. [`RegionQuery`]: radius queries ([`BruteForce`], [`DistanceMatrix`], [`KdTree`],
//!    [`SortedLine`]).
//! 2. [`classify`]: core / border / noise at one `(eps, min_pts)`.
//! 3. Expansion: breadth-first density reachability (inside [`Dbscan`]).
//! 4. Sweeps and lineage: repeated expansion folded into memberships.
//!
//! Every layer is a pure function of the point set, the metric and the parameters;
//! nothing is cached across calls.
//!
//! ## Usage
//!
//! ```rust
//! use fuzzy_density::cluster::{Clustering, Dbscan, FuzzyBorderDbscan, FuzzyClustering};
//! use fuzzy_density::metric::Euclidean;
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![1.0, 0.0],
//!     vec![10.0, 10.0],
//! ];
//!
//! // Hard clustering
//! let labels = Dbscan::new(1.5, 2)
//!     .fit_predict_with_noise(&data, &Euclidean)
//!     .unwrap();
//! assert_eq!(labels, vec![Some(0), Some(0), Some(0), None]);
//!
//! // Graded membership over a radius range
//! let memberships = FuzzyBorderDbscan::new(0.5, 2.0, 2)
//!     .fit_memberships(&data, &Euclidean)
//!     .unwrap();
//! assert!(memberships[0].degree(0) > 0.0);
//! assert!(memberships[3].is_empty());
//! ```

mod classify;
mod core_border;
mod dbscan;
mod fuzzy;
mod fuzzy_border;
mod kdtree;
mod lineage;
mod membership;
mod mode;
mod neighbors;
mod partition;
mod sorted_line;
mod sweep;
mod traits;
pub(crate) mod util;

pub use classify::{classify, PointKind};
pub use core_border::CoreBorderDbscan;
pub use dbscan::Dbscan;
pub use fuzzy::FuzzyDbscan;
pub use fuzzy_border::FuzzyBorderDbscan;
pub use kdtree::KdTree;
pub use membership::{FuzzyPartition, Membership};
pub use mode::{Clusters, Mode};
pub use neighbors::{
    BruteForce, DistanceMatrix, Neighbor, Neighborhoods, RegionQuery, WeightedNeighborhoods,
};
pub use partition::{Partition, NOISE};
pub use sorted_line::SortedLine;
pub use sweep::{AbortHandle, RadiusSweep, DEFAULT_SWEEP_SAMPLES};
pub use traits::{Clustering, FuzzyClustering};
