use super::membership::{FuzzyPartition, Membership};
use super::neighbors::{BruteForce, RegionQuery};
use super::partition::Partition;
use crate::error::Result;
use crate::metric::Metric;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Cluster the points behind `query`.
    fn fit<Q: RegionQuery + Sync + ?Sized>(&self, query: &Q) -> Result<Partition>;

    /// Cluster `points` by exhaustive scan under `metric`, returning one label per
    /// point with noise as [`NOISE`](super::NOISE).
    fn fit_predict<P, M>(&self, points: &[P], metric: &M) -> Result<Vec<usize>>
    where
        P: Sync,
        M: Metric<P> + Sync,
    {
        Ok(self.fit(&BruteForce::new(points, metric))?.to_dense_labels())
    }
}

/// Common interface for graded clustering algorithms (a membership map per point).
pub trait FuzzyClustering {
    /// Cluster the points behind `query`.
    fn fit_fuzzy<Q: RegionQuery + Sync + ?Sized>(&self, query: &Q) -> Result<FuzzyPartition>;

    /// Cluster `points` by exhaustive scan under `metric`.
    fn fit_memberships<P, M>(&self, points: &[P], metric: &M) -> Result<Vec<Membership>>
    where
        P: Sync,
        M: Metric<P> + Sync,
    {
        Ok(self
            .fit_fuzzy(&BruteForce::new(points, metric))?
            .into_memberships())
    }
}
