//! Density clustering with graded membership.
//!
//! `fuzzy-density` clusters points of any type under any distance you supply.
//!
//! The primary public API is under [`cluster`], which provides:
//! - DBSCAN (crisp density clustering with noise)
//! - core-border fuzzy DBSCAN (graded core-ness at a fixed radius)
//! - fuzzy-border DBSCAN (membership from a radius sweep)
//! - fully fuzzy DBSCAN (both)
//!
//! Distances come from [`metric::Metric`], implemented by every
//! `Fn(&P, &P) -> f64` and by a few stock coordinate metrics.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod metric;

pub use cluster::{
    Clustering, Clusters, CoreBorderDbscan, Dbscan, FuzzyBorderDbscan, FuzzyClustering,
    FuzzyDbscan, FuzzyPartition, Membership, Mode, Partition, PointKind, RadiusSweep, NOISE,
};
pub use error::{Error, Result};
pub use metric::{Euclidean, Metric};
