//! Fuzzy-border DBSCAN: graded membership from a radius sweep.
//!
//! With `min_pts` fixed, the crisp expansion is repeated at every radius of a
//! [`RadiusSweep`]. A point's degree in a cluster is the fraction of sampled radii
//! at which it belongs to that cluster. Dense interiors are members at almost every
//! radius and score close to 1; points on the fringe only join at the larger radii
//! and score lower.

use tracing::debug;

use super::membership::FuzzyPartition;
use super::neighbors::RegionQuery;
use super::sweep::{self, AbortHandle, RadiusSweep};
use super::traits::FuzzyClustering;
use super::util;
use crate::error::Result;

/// Fuzzy-border DBSCAN.
#[derive(Debug, Clone)]
pub struct FuzzyBorderDbscan {
    sweep: RadiusSweep,
    min_pts: usize,
    abort: AbortHandle,
}

impl FuzzyBorderDbscan {
    /// Sweep `[min_eps, max_eps]` with a fixed `min_pts`.
    pub fn new(min_eps: f64, max_eps: f64, min_pts: usize) -> Self {
        Self {
            sweep: RadiusSweep::new(min_eps, max_eps),
            min_pts,
            abort: AbortHandle::new(),
        }
    }

    /// Set the number of sampled radii.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.sweep = self.sweep.with_samples(samples);
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
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
        util::check_min_pts("min_pts", self.min_pts)
    }
}

impl FuzzyClustering for FuzzyBorderDbscan {
    fn fit_fuzzy<Q: RegionQuery + Sync + ?Sized>(&self, query: &Q) -> Result<FuzzyPartition> {
        self.validate()?;
        let samples = sweep::run(
            query,
            &self.sweep,
            self.min_pts,
            &self.abort,
            sweep::grade_membership,
        )?;
        let result = sweep::aggregate(&samples);
        debug!(
            points = result.len(),
            min_eps = self.sweep.min_eps(),
            max_eps = self.sweep.max_eps(),
            samples = samples.len(),
            min_pts = self.min_pts,
            clusters = result.n_clusters(),
            "fuzzy-border dbscan finished"
        );
        Ok(result)
    }
}
