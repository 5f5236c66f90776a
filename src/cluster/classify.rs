//! Core / border / noise classification for a single `(eps, min_pts)` pair.

use rayon::prelude::*;

use super::neighbors::{Neighborhoods, RegionQuery};
use super::util;
use crate::error::Result;

/// Role of a point at one `(eps, min_pts)` setting.
///
/// This is not a property of the point alone: the same point can be noise at a
/// small radius and core at a larger one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointKind {
    /// At least `min_pts` points (itself included) within `eps`.
    Core,
    /// Not core, but within `eps` of a core point.
    Border,
    /// Neither core nor border.
    Noise,
}

impl PointKind {
    /// Whether this is [`PointKind::Core`].
    pub fn is_core(self) -> bool {
        self == PointKind::Core
    }
}

/// Classify every point of `query` at `(epsilon, min_pts)`.
///
/// Independent of processing order: the result depends only on the point set, the
/// metric and the two parameters.
pub fn classify<Q>(query: &Q, epsilon: f64, min_pts: usize) -> Result<Vec<PointKind>>
where
    Q: RegionQuery + Sync + ?Sized,
{
    util::check_epsilon("epsilon", epsilon)?;
    util::check_min_pts("min_pts", min_pts)?;
    let hoods = Neighborhoods::compute(query, epsilon);
    Ok(classify_neighborhoods(&hoods, min_pts))
}

/// Core flags: `|N(i)| >= min_pts`.
pub(crate) fn core_flags(hoods: &Neighborhoods, min_pts: usize) -> Vec<bool> {
    (0..hoods.len())
        .into_par_iter()
        .map(|i| hoods.count(i) >= min_pts)
        .collect()
}

fn classify_neighborhoods(hoods: &Neighborhoods, min_pts: usize) -> Vec<PointKind> {
    let core = core_flags(hoods, min_pts);
    (0..hoods.len())
        .into_par_iter()
        .map(|i| {
            if core[i] {
                PointKind::Core
            } else if hoods.of(i).iter().any(|&j| core[j]) {
                PointKind::Border
            } else {
                PointKind::Noise
            }
        })
        .collect()
}
