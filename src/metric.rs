//! Distance capabilities.
//!
//! The clustering engines never assume a geometry: every comparison goes through a
//! [`Metric`]. Any closure `Fn(&P, &P) -> f64` is a metric, so arbitrary records
//! (strings, trajectories, feature structs) can be clustered directly.
//!
//! The engines assume, but do not check, that a metric is:
//! - non-negative,
//! - symmetric: `distance(a, b) == distance(b, a)`,
//! - deterministic across repeated calls.
//!
//! Results are unspecified when these preconditions are violated.
//!
//! The unit structs in this module are stock metrics for coordinate vectors
//! (anything that is `AsRef<[f64]>`, e.g. `Vec<f64>` or `[f64; 3]`). Vectors of
//! different length are compared over their common prefix.

use crate::cluster::util::squared_euclidean;

/// A symmetric, non-negative distance between two points.
pub trait Metric<P: ?Sized> {
    /// Distance between `a` and `b`.
    fn distance(&self, a: &P, b: &P) -> f64;
}

impl<P: ?Sized, F> Metric<P> for F
where
    F: Fn(&P, &P) -> f64,
{
    #[inline]
    fn distance(&self, a: &P, b: &P) -> f64 {
        self(a, b)
    }
}

/// Marker for metrics that never undercut a single coordinate difference.
///
/// For every axis `k`: `distance(a, b) >= |a[k] - b[k]|`. This is what lets a
/// [`KdTree`](crate::cluster::KdTree) prune a subtree by looking at one coordinate.
/// All Minkowski (Lp) distances satisfy it.
pub trait AxisBounded<P: ?Sized>: Metric<P> {}

/// Euclidean (L2) distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

/// Manhattan (L1) distance: sum of absolute differences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

/// Chebyshev (L-infinity) distance: largest absolute difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chebyshev;

/// Canberra distance: `sum |a - b| / (|a| + |b|)`, skipping coordinates where both are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Canberra;

/// Cosine distance: `1 - cos(a, b)`, clamped at zero.
///
/// A zero vector is at distance 1 from everything except another zero vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cosine;

impl<P: AsRef<[f64]> + ?Sized> Metric<P> for Euclidean {
    #[inline]
    fn distance(&self, a: &P, b: &P) -> f64 {
        squared_euclidean(a.as_ref(), b.as_ref()).sqrt()
    }
}

impl<P: AsRef<[f64]> + ?Sized> Metric<P> for Manhattan {
    #[inline]
    fn distance(&self, a: &P, b: &P) -> f64 {
        a.as_ref()
            .iter()
            .zip(b.as_ref())
            .map(|(x, y)| (x - y).abs())
            .sum()
    }
}

impl<P: AsRef<[f64]> + ?Sized> Metric<P> for Chebyshev {
    #[inline]
    fn distance(&self, a: &P, b: &P) -> f64 {
        a.as_ref()
            .iter()
            .zip(b.as_ref())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }
}

impl<P: AsRef<[f64]> + ?Sized> Metric<P> for Canberra {
    fn distance(&self, a: &P, b: &P) -> f64 {
        a.as_ref()
            .iter()
            .zip(b.as_ref())
            .filter_map(|(x, y)| {
                let denom = x.abs() + y.abs();
                (denom > 0.0).then(|| (x - y).abs() / denom)
            })
            .sum()
    }
}

impl<P: AsRef<[f64]> + ?Sized> Metric<P> for Cosine {
    fn distance(&self, a: &P, b: &P) -> f64 {
        let (a, b) = (a.as_ref(), b.as_ref());
        let (mut dot, mut aa, mut bb) = (0.0, 0.0, 0.0);
        for (x, y) in a.iter().zip(b) {
            dot += x * y;
            aa += x * x;
            bb += y * y;
        }
        if aa == 0.0 && bb == 0.0 {
            return 0.0;
        }
        if aa == 0.0 || bb == 0.0 {
            return 1.0;
        }
        (1.0 - dot / (aa.sqrt() * bb.sqrt())).max(0.0)
    }
}

impl<P: AsRef<[f64]> + ?Sized> AxisBounded<P> for Euclidean {}
impl<P: AsRef<[f64]> + ?Sized> AxisBounded<P> for Manhattan {}
impl<P: AsRef<[f64]> + ?Sized> AxisBounded<P> for Chebyshev {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_metrics() {
        let a = [0.0, 0.0];
        let b = [3.0, 4.0];
        assert!((Euclidean.distance(&a, &b) - 5.0).abs() < 1e-12);
        assert!((Manhattan.distance(&a, &b) - 7.0).abs() < 1e-12);
        assert!((Chebyshev.distance(&a, &b) - 4.0).abs() < 1e-12);
        assert!((Canberra.distance(&a, &b) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine() {
        let x = vec![1.0, 0.0];
        let y = vec![0.0, 2.0];
        let z = vec![2.0, 0.0];
        assert!((Cosine.distance(&x, &y) - 1.0).abs() < 1e-12);
        assert!(Cosine.distance(&x, &z).abs() < 1e-12);
        assert_eq!(Cosine.distance(&vec![0.0, 0.0], &x), 1.0);
        assert_eq!(Cosine.distance(&vec![0.0, 0.0], &vec![0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_closure_is_metric() {
        let hamming = |a: &&str, b: &&str| {
            a.chars().zip(b.chars()).filter(|(x, y)| x != y).count() as f64
        };
        assert_eq!(hamming.distance(&"karolin", &"kathrin"), 3.0);
    }

    #[test]
    fn test_symmetry() {
        let a = vec![1.0, -2.0, 0.5];
        let b = vec![-3.0, 4.0, 0.0];
        for d in [
            Euclidean.distance(&a, &b) - Euclidean.distance(&b, &a),
            Manhattan.distance(&a, &b) - Manhattan.distance(&b, &a),
            Chebyshev.distance(&a, &b) - Chebyshev.distance(&b, &a),
            Canberra.distance(&a, &b) - Canberra.distance(&b, &a),
            Cosine.distance(&a, &b) - Cosine.distance(&b, &a),
        ] {
            assert!(d.abs() < 1e-12);
        }
    }
}
