//! Radius queries over sorted one-dimensional values.
//!
//! Timestamps, positions along a track and similar scalar data usually arrive
//! sorted. Then every neighborhood is a contiguous window around the query index,
//! found with two binary searches, and the distance is `|x_j - x_i|`. The answers
//! are identical to [`BruteForce`](super::BruteForce) under that distance.

use super::neighbors::{Neighbor, RegionQuery};
use crate::error::{Error, Result};

/// Sorted scalar values, queried by window.
#[derive(Debug, Clone, Copy)]
pub struct SortedLine<'a> {
    values: &'a [f64],
}

impl<'a> SortedLine<'a> {
    /// Wrap `values`, which must be finite and sorted ascending.
    pub fn new(values: &'a [f64]) -> Result<Self> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "values",
                message: "must be finite",
            });
        }
        if values.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::InvalidParameter {
                name: "values",
                message: "must be sorted ascending",
            });
        }
        Ok(Self { values })
    }

    /// Index range `lo..hi` of all values within `eps` of value `index`.
    pub fn window(&self, index: usize, eps: f64) -> std::ops::Range<usize> {
        let x = self.values[index];
        // Both predicates hold on a prefix of a sorted slice.
        let lo = self.values[..index].partition_point(|&v| x - v > eps);
        let hi = index + 1 + self.values[index + 1..].partition_point(|&v| v - x <= eps);
        lo..hi
    }
}

impl RegionQuery for SortedLine<'_> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn neighbors_within(&self, index: usize, eps: f64) -> Vec<Neighbor> {
        let x = self.values[index];
        self.window(index, eps)
            .map(|j| Neighbor {
                index: j,
                distance: (self.values[j] - x).abs(),
            })
            .collect()
    }

    fn neighbors(&self, index: usize, eps: f64) -> Vec<usize> {
        self.window(index, eps).collect()
    }
}
