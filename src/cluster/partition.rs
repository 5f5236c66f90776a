use super::membership::Membership;

/// Dense-label value used for noise by [`Partition::to_dense_labels`].
pub const NOISE: usize = usize::MAX;

/// A hard clustering: every point is in exactly one cluster, or is noise.
///
/// Cluster ids run from `0` to `n_clusters() - 1` in order of discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partition {
    labels: Vec<Option<usize>>,
    core: Vec<bool>,
    n_clusters: usize,
}

impl Partition {
    pub(crate) fn new(labels: Vec<Option<usize>>, core: Vec<bool>, n_clusters: usize) -> Self {
        debug_assert_eq!(labels.len(), core.len());
        Self {
            labels,
            core,
            n_clusters,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the partition covers no points.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of clusters (noise excluded).
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Per-point cluster ids, `None` for noise.
    pub fn labels(&self) -> &[Option<usize>] {
        &self.labels
    }

    /// Cluster of point `i`, `None` for noise.
    pub fn label(&self, i: usize) -> Option<usize> {
        self.labels[i]
    }

    /// Whether point `i` is noise.
    pub fn is_noise(&self, i: usize) -> bool {
        self.labels[i].is_none()
    }

    /// Whether point `i` was a core point.
    pub fn is_core(&self, i: usize) -> bool {
        self.core[i]
    }

    /// Members of `cluster`, ascending.
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == Some(cluster))
            .map(|(i, _)| i)
            .collect()
    }

    /// Core members of `cluster`, ascending.
    pub fn core_members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .zip(&self.core)
            .enumerate()
            .filter(|(_, (l, c))| **l == Some(cluster) && **c)
            .map(|(i, _)| i)
            .collect()
    }

    /// Noise points, ascending.
    pub fn noise(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Labels as plain integers, with noise mapped to [`NOISE`].
    pub fn to_dense_labels(&self) -> Vec<usize> {
        self.labels.iter().map(|l| l.unwrap_or(NOISE)).collect()
    }

    /// Consume into per-point labels.
    pub fn into_labels(self) -> Vec<Option<usize>> {
        self.labels
    }

    /// The partition as crisp memberships: degree 1 in the own cluster, empty for noise.
    pub fn memberships(&self) -> Vec<Membership> {
        self.labels
            .iter()
            .map(|l| match l {
                Some(c) => Membership::single(*c),
                None => Membership::new(),
            })
            .collect()
    }
}
