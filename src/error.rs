use thiserror::Error;

/// Errors returned by the clustering engines in this crate.
///
/// Every variant except [`Error::Aborted`] is a configuration error, raised before
/// any distance is evaluated.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A `[min, max]` range whose upper bound is below its lower bound.
    #[error("invalid range {name}: max {max} is below min {min}")]
    InvalidRange {
        /// Range name.
        name: &'static str,
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A radius sweep was aborted through its [`AbortHandle`](crate::cluster::AbortHandle).
    #[error("sweep aborted after {completed} of {total} samples")]
    Aborted {
        /// Samples finished before the abort was observed.
        completed: usize,
        /// Samples the sweep was configured with.
        total: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
