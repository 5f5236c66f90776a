//! Fully fuzzy DBSCAN: radius sweep and graded core-ness combined.
//!
//! Each sample of the [`RadiusSweep`] is clustered with `min_pts = min_points` and
//! graded like [`CoreBorderDbscan`](super::CoreBorderDbscan) at that radius. The
//! degree of point `i` in lineage `c` is the product of
//!
//! - the radius fraction: share of samples where `i` is in `c`, and
//! - the core component: mean core-border grade of `i` over those samples,
//!
//! which simplifies to the sum of grades divided by the sample count. Collapsing
//! both ranges gives plain DBSCAN; collapsing only one gives the other fuzzy mode.

use tracing::debug;

use super::core_border::grade_core_degrees;
use super::membership::FuzzyPartition;
use super::neighbors::RegionQuery;
use super::sweep::{self, AbortHandle, RadiusSweep};
use super::traits::FuzzyClustering;
use super::util;
use crate::error::Result;

/// Fully fuzzy DBSCAN.
#[derive(Debug, Clone)]
pub struct FuzzyDbscan {
    sweep: RadiusSweep,
    min_points: usize,
    max_points: usize,
    abort: AbortHandle,
}

impl FuzzyDbscan {
    /// Sweep `[min_eps, max_eps]`, core degree ramping from `min_points` to `max_points`.
    pub fn new(min_eps: f64, max_eps: f64, min_points: usize, max_points: usize) -> Self {
        Self {
            sweep: RadiusSweep::new(min_eps, max_eps),
            min_points,
            max_points,
            abort: AbortHandle::new(),
        }
    }

    /// Set the number of sampled radii.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.sweep = self.sweep.with_samples(samples);
        self
    }

    /// Set the neighborhood-size range over which core degree ramps from 0 to 1.
    pub fn with_points(mut self, min_points: usize, max_points: usize) -> Self {
        self.min_points = min_points;
        self.max_points = max_points;
        self
    }

    /// Watch `abort` during the neighbor pass and between sweep samples.
    pub fn with_abort(mut self, abort: AbortHandle) -> Self {
        self.abort = abort;
        self
    }

    /// The radius sweep.
    pub fn sweep(&self) -> &RadiusSweep {
        &self.sweep
    }

    fn validate(&self) -> Result<()> {
        self.sweep.validate()?;
        util::check_min_pts("min_points", self.min_points)?;
        util::check_range("points", self.min_points as f64, self.max_points as f64)
    }
}

impl FuzzyClustering for FuzzyDbscan {
    fn fit_fuzzy<Q: RegionQuery + Sync + ?Sized>(&self, query: &Q) -> Result<FuzzyPartition> {
        self.validate()?;
        let (min_points, max_points) = (self.min_points, self.max_points);
        let samples = sweep::run(query, &self.sweep, min_points, &self.abort, |hoods, p| {
            grade_core_degrees(hoods, p, min_points, max_points)
        })?;
        let result = sweep::aggregate(&samples);
        debug!(
            points = result.len(),
            min_eps = self.sweep.min_eps(),
            max_eps = self.sweep.max_eps(),
            samples = samples.len(),
            min_points,
            max_points,
            clusters = result.n_clusters(),
            "fuzzy dbscan finished"
        );
        Ok(result)
    }
}
