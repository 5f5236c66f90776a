//! Core-border fuzzy DBSCAN: graded core-ness at a fixed radius.
//!
//! Instead of a single `min_pts`, a point's core-ness ramps linearly over a
//! neighborhood-size range `[min_points, max_points]`:
//!
//! ```text
//! core_degree(i) = clamp((|N(i, eps)| - min_points) / (max_points - min_points), 0, 1)
//! ```
//!
//! Cluster identity is fixed by a crisp expansion at `min_pts = min_points`. A core
//! member reports its own core degree for its cluster. A border member has no
//! density of its own and reports the weakest positive core degree among the
//! cluster's core points that reach it; cores at degree 0 do not drag it down.
//! With `min_points == max_points` every member gets degree 1, which is plain DBSCAN.
//!
//! Clusters in which no point ends up with a positive degree are not reported.

use rayon::prelude::*;
use tracing::debug;

use super::dbscan::expand;
use super::membership::{FuzzyPartition, Membership};
use super::neighbors::{Neighborhoods, RegionQuery};
use super::partition::Partition;
use super::traits::FuzzyClustering;
use super::util;
use crate::error::Result;

/// Core-border fuzzy DBSCAN.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreBorderDbscan {
    epsilon: f64,
    min_points: usize,
    max_points: usize,
}

impl CoreBorderDbscan {
    /// Fixed radius `epsilon`, core degree ramping from `min_points` to `max_points`.
    pub fn new(epsilon: f64, min_points: usize, max_points: usize) -> Self {
        Self {
            epsilon,
            min_points,
            max_points,
        }
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the neighborhood-size range over which core degree ramps from 0 to 1.
    pub fn with_points(mut self, min_points: usize, max_points: usize) -> Self {
        self.min_points = min_points;
        self.max_points = max_points;
        self
    }

    fn validate(&self) -> Result<()> {
        util::check_epsilon("epsilon", self.epsilon)?;
        util::check_min_pts("min_points", self.min_points)?;
        util::check_range("points", self.min_points as f64, self.max_points as f64)
    }
}

impl Default for CoreBorderDbscan {
    fn default() -> Self {
        Self::new(0.5, 3, 10)
    }
}

impl FuzzyClustering for CoreBorderDbscan {
    fn fit_fuzzy<Q: RegionQuery + Sync + ?Sized>(&self, query: &Q) -> Result<FuzzyPartition> {
        self.validate()?;
        let hoods = Neighborhoods::compute(query, self.epsilon);
        let partition = expand(&hoods, self.min_points);
        let grades = grade_core_degrees(&hoods, &partition, self.min_points, self.max_points);

        let memberships = partition
            .labels()
            .iter()
            .zip(&grades)
            .map(|(label, &g)| {
                let mut m = Membership::new();
                if let Some(c) = label {
                    m.set(*c, g);
                }
                m
            })
            .collect();

        debug!(
            points = partition.len(),
            epsilon = self.epsilon,
            min_points = self.min_points,
            max_points = self.max_points,
            clusters = partition.n_clusters(),
            "core-border dbscan finished"
        );
        Ok(FuzzyPartition::compacted(memberships))
    }
}

/// Per-point grade for its own cluster: core degree for core points, the weakest
/// positive reaching core degree for border points, 0 for noise.
pub(crate) fn grade_core_degrees(
    hoods: &Neighborhoods,
    partition: &Partition,
    min_points: usize,
    max_points: usize,
) -> Vec<f64> {
    let core_degree =
        |i: usize| util::ramp(hoods.count(i) as f64, min_points as f64, max_points as f64);

    (0..hoods.len())
        .into_par_iter()
        .map(|i| {
            let Some(c) = partition.label(i) else {
                return 0.0;
            };
            if partition.is_core(i) {
                return core_degree(i);
            }
            hoods
                .of(i)
                .iter()
                .filter(|&&j| partition.is_core(j) && partition.label(j) == Some(c))
                .map(|&j| core_degree(j))
                .filter(|&d| d > 0.0)
                .reduce(f64::min)
                .unwrap_or(0.0)
        })
        .collect()
}
