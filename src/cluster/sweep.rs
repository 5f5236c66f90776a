//! Radius sweeps: run the crisp expansion at many radii and fold the results into
//! graded memberships.
//!
//! # Discretization
//!
//! A [`RadiusSweep`] over `[min_eps, max_eps]` with `samples = s` visits
//!
//! ```text
//! r_k = min_eps + (max_eps - min_eps) * k / (s - 1),   k = 0 .. s-1
//! ```
//!
//! i.e. `s` equally spaced radii with both ends included. A collapsed range
//! (`min_eps == max_eps`) visits that single radius. The default is
//! [`DEFAULT_SWEEP_SAMPLES`]. Results are only comparable between runs that use
//! the same sample count.
//!
//! # Execution
//!
//! Neighborhoods are computed once at `max_eps` (with distances) and filtered
//! down for every smaller radius, so the metric is evaluated once per pair no
//! matter how many samples are taken. Samples are independent and run in
//! parallel. An [`AbortHandle`] is polled per point while the neighborhoods are
//! computed and again before each sample starts.
//!
//! Cluster ids of different samples are reconciled afterwards by
//! [`Lineage`](super::lineage::Lineage).

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, trace};

use super::dbscan::expand;
use super::lineage::Lineage;
use super::membership::{FuzzyPartition, Membership};
use super::neighbors::{Neighborhoods, RegionQuery, WeightedNeighborhoods};
use super::partition::Partition;
use super::util;
use crate::error::{Error, Result};

/// Default number of radii sampled by a [`RadiusSweep`].
pub const DEFAULT_SWEEP_SAMPLES: usize = 20;

/// A discretized radius range `[min_eps, max_eps]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadiusSweep {
    min_eps: f64,
    max_eps: f64,
    samples: usize,
}

impl RadiusSweep {
    /// Sweep `[min_eps, max_eps]` with [`DEFAULT_SWEEP_SAMPLES`] radii.
    pub fn new(min_eps: f64, max_eps: f64) -> Self {
        Self {
            min_eps,
            max_eps,
            samples: DEFAULT_SWEEP_SAMPLES,
        }
    }

    /// Set the number of sampled radii (at least 2).
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Lower end of the range.
    pub fn min_eps(&self) -> f64 {
        self.min_eps
    }

    /// Upper end of the range.
    pub fn max_eps(&self) -> f64 {
        self.max_eps
    }

    /// Configured sample count.
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub(crate) fn validate(&self) -> Result<()> {
        util::check_epsilon("min_eps", self.min_eps)?;
        util::check_epsilon("max_eps", self.max_eps)?;
        if self.max_eps.is_infinite() {
            return Err(Error::InvalidParameter {
                name: "max_eps",
                message: "must be finite",
            });
        }
        util::check_range("eps", self.min_eps, self.max_eps)?;
        if self.samples < 2 {
            return Err(Error::InvalidParameter {
                name: "samples",
                message: "must be at least 2",
            });
        }
        Ok(())
    }

    /// The sampled radii, ascending.
    pub fn radii(&self) -> Vec<f64> {
        if self.max_eps <= self.min_eps || self.samples < 2 {
            return vec![self.min_eps];
        }
        let span = self.max_eps - self.min_eps;
        let last = self.samples - 1;
        (0..self.samples)
            .map(|k| {
                if k == 0 {
                    self.min_eps
                } else if k == last {
                    self.max_eps
                } else {
                    (self.min_eps + span * k as f64 / last as f64).min(self.max_eps)
                }
            })
            .collect()
    }
}

/// Cooperative cancellation for long sweeps.
///
/// Clone the handle, give one copy to the clusterer and call [`abort`](Self::abort)
/// on the other from any thread. Samples already running finish; no new sample
/// starts, and the fit returns [`Error::Aborted`]. An abort during the initial
/// neighborhood pass stops it early too.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    /// A fresh, un-aborted handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the abort.
    pub fn abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether an abort was requested.
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One crisp clustering inside a sweep, with a grade per point for its own cluster.
pub(crate) struct Sample {
    pub(crate) partition: Partition,
    pub(crate) grades: Vec<f64>,
}

/// Run the crisp expansion at every radius of `sweep`.
///
/// `grade` turns one sample's neighborhoods and partition into a per-point grade
/// in `[0, 1]` for the point's assigned cluster (ignored for noise points).
pub(crate) fn run<Q, G>(
    query: &Q,
    sweep: &RadiusSweep,
    min_pts: usize,
    abort: &AbortHandle,
    grade: G,
) -> Result<Vec<Sample>>
where
    Q: RegionQuery + Sync + ?Sized,
    G: Fn(&Neighborhoods, &Partition) -> Vec<f64> + Sync,
{
    let radii = sweep.radii();
    let total = radii.len();
    if abort.is_aborted() {
        return Err(Error::Aborted {
            completed: 0,
            total,
        });
    }

    let Some(wide) =
        WeightedNeighborhoods::compute_until(query, sweep.max_eps, || abort.is_aborted())
    else {
        debug!(completed = 0, total, "radius sweep aborted during neighbor search");
        return Err(Error::Aborted {
            completed: 0,
            total,
        });
    };
    let completed = AtomicUsize::new(0);

    let samples = radii
        .par_iter()
        .enumerate()
        .map(|(k, &radius)| {
            if abort.is_aborted() {
                let done = completed.load(Ordering::Relaxed);
                debug!(completed = done, total, "radius sweep aborted");
                return Err(Error::Aborted {
                    completed: done,
                    total,
                });
            }
            let hoods = wide.restrict(radius);
            let partition = expand(&hoods, min_pts);
            let grades = grade(&hoods, &partition);
            completed.fetch_add(1, Ordering::Relaxed);
            trace!(
                sample = k,
                radius,
                clusters = partition.n_clusters(),
                "sweep sample"
            );
            Ok(Sample { partition, grades })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(samples)
}

/// Fold samples into memberships.
///
/// The degree of point `i` in lineage `c` is the sum of its grades over the samples
/// where it sits in a cluster carrying lineage `c`, divided by the number of
/// samples. Lineages in which no point ends up with a positive degree are dropped
/// and the rest renumbered densely, keeping their order.
pub(crate) fn aggregate(samples: &[Sample]) -> FuzzyPartition {
    let lineage = Lineage::reconcile(samples.iter().map(|s| &s.partition));
    let n = samples.first().map_or(0, |s| s.partition.len());
    let total = samples.len() as f64;

    let memberships: Vec<Membership> = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut sums: BTreeMap<usize, f64> = BTreeMap::new();
            for (k, sample) in samples.iter().enumerate() {
                let Some(local) = sample.partition.label(i) else {
                    continue;
                };
                let g = sample.grades[i];
                if g > 0.0 {
                    for &id in lineage.global(k, local) {
                        *sums.entry(id).or_insert(0.0) += g;
                    }
                }
            }
            let mut m = Membership::new();
            for (id, sum) in sums {
                m.set(id, sum / total);
            }
            m
        })
        .collect();

    let result = FuzzyPartition::compacted(memberships);
    if result.n_clusters() < lineage.len() {
        trace!(
            lineages = lineage.len(),
            kept = result.n_clusters(),
            "dropped lineages without positive degree"
        );
    }
    result
}

/// Grade every clustered point 1: plain "is it in the cluster at this radius".
pub(crate) fn grade_membership(_: &Neighborhoods, partition: &Partition) -> Vec<f64> {
    partition
        .labels()
        .iter()
        .map(|l| if l.is_some() { 1.0 } else { 0.0 })
        .collect()
}
