use crate::error::{Error, Result};

#[inline]
pub(crate) fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

pub(crate) fn check_epsilon(name: &'static str, epsilon: f64) -> Result<()> {
    if epsilon.is_nan() {
        return Err(Error::InvalidParameter {
            name,
            message: "must not be NaN",
        });
    }
    if epsilon < 0.0 {
        return Err(Error::InvalidParameter {
            name,
            message: "must be non-negative",
        });
    }
    Ok(())
}

pub(crate) fn check_min_pts(name: &'static str, min_pts: usize) -> Result<()> {
    if min_pts == 0 {
        return Err(Error::InvalidParameter {
            name,
            message: "must be at least 1",
        });
    }
    Ok(())
}

pub(crate) fn check_range(name: &'static str, min: f64, max: f64) -> Result<()> {
    if max < min {
        return Err(Error::InvalidRange { name, min, max });
    }
    Ok(())
}

/// Linear ramp from 0 at `lo` to 1 at `hi`, clamped to `[0, 1]`.
///
/// A collapsed ramp (`lo == hi`) is a step: 1 at or above `lo`, 0 below.
#[inline]
pub(crate) fn ramp(value: f64, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return if value >= lo { 1.0 } else { 0.0 };
    }
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}
