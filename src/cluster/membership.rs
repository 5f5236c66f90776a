use std::collections::{BTreeMap, BTreeSet};

/// Graded membership of one point: cluster id -> degree in `(0, 1]`.
///
/// Absence means degree 0, so zero degrees are never stored. Degrees of one point
/// need not sum to 1; whatever is missing is the point's share of "noise".
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Membership {
    degrees: BTreeMap<usize, f64>,
}

impl Membership {
    /// No membership anywhere (a noise point).
    pub fn new() -> Self {
        Self::default()
    }

    /// Full membership in a single cluster.
    pub fn single(cluster: usize) -> Self {
        let mut m = Self::new();
        m.set(cluster, 1.0);
        m
    }

    /// Set the degree for `cluster`, clamped to `[0, 1]`. Zero removes the entry.
    pub fn set(&mut self, cluster: usize, degree: f64) {
        let degree = degree.clamp(0.0, 1.0);
        if degree > 0.0 {
            self.degrees.insert(cluster, degree);
        } else {
            self.degrees.remove(&cluster);
        }
    }

    /// Degree in `cluster` (0 when absent).
    pub fn degree(&self, cluster: usize) -> f64 {
        self.degrees.get(&cluster).copied().unwrap_or(0.0)
    }

    /// Whether the point belongs to `cluster` at all.
    pub fn contains(&self, cluster: usize) -> bool {
        self.degrees.contains_key(&cluster)
    }

    /// `(cluster, degree)` pairs in ascending cluster order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.degrees.iter().map(|(&c, &d)| (c, d))
    }

    /// Number of clusters with non-zero degree.
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    /// Whether the point belongs to no cluster.
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Highest-degree cluster; the lowest id wins ties.
    pub fn strongest(&self) -> Option<(usize, f64)> {
        self.iter()
            .fold(None, |best: Option<(usize, f64)>, (c, d)| match best {
                Some((_, bd)) if bd >= d => best,
                _ => Some((c, d)),
            })
    }

    /// Sum of all degrees.
    pub fn total(&self) -> f64 {
        self.degrees.values().sum()
    }
}

/// Result of a fuzzy clustering: one [`Membership`] per point.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuzzyPartition {
    memberships: Vec<Membership>,
    n_clusters: usize,
}

impl FuzzyPartition {
    pub(crate) fn new(memberships: Vec<Membership>, n_clusters: usize) -> Self {
        Self {
            memberships,
            n_clusters,
        }
    }

    /// Renumber cluster ids densely, keeping their order, so that every id below
    /// `n_clusters` has at least one point with a positive degree.
    pub(crate) fn compacted(memberships: Vec<Membership>) -> Self {
        let used: BTreeSet<usize> = memberships
            .iter()
            .flat_map(|m| m.degrees.keys().copied())
            .collect();
        let dense: BTreeMap<usize, usize> = used
            .iter()
            .enumerate()
            .map(|(new, &old)| (old, new))
            .collect();
        let memberships = memberships
            .into_iter()
            .map(|m| Membership {
                degrees: m.degrees.into_iter().map(|(c, d)| (dense[&c], d)).collect(),
            })
            .collect();
        Self::new(memberships, used.len())
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.memberships.len()
    }

    /// Whether the result covers no points.
    pub fn is_empty(&self) -> bool {
        self.memberships.is_empty()
    }

    /// Number of clusters. Ids run from 0 to `n_clusters - 1`.
    ///
    /// Fuzzy results only count clusters in which some point has a positive degree.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Membership of point `i`.
    pub fn membership(&self, i: usize) -> &Membership {
        &self.memberships[i]
    }

    /// All memberships, indexed by point.
    pub fn memberships(&self) -> &[Membership] {
        &self.memberships
    }

    /// Consume into per-point memberships.
    pub fn into_memberships(self) -> Vec<Membership> {
        self.memberships
    }

    /// Defuzzify: each point's strongest cluster, `None` when it has no membership.
    pub fn hard_labels(&self) -> Vec<Option<usize>> {
        self.memberships
            .iter()
            .map(|m| m.strongest().map(|(c, _)| c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_degree_is_absence() {
        let mut m = Membership::new();
        m.set(3, 0.4);
        m.set(1, 0.0);
        assert_eq!(m.len(), 1);
        m.set(3, 0.0);
        assert!(m.is_empty());
        assert_eq!(m.degree(3), 0.0);
    }

    #[test]
    fn test_degrees_are_clamped() {
        let mut m = Membership::new();
        m.set(0, 1.7);
        m.set(1, -0.2);
        assert_eq!(m.degree(0), 1.0);
        assert!(!m.contains(1));
    }

    #[test]
    fn test_strongest_prefers_lowest_id_on_ties() {
        let mut m = Membership::new();
        m.set(4, 0.5);
        m.set(2, 0.5);
        m.set(7, 0.25);
        assert_eq!(m.strongest(), Some((2, 0.5)));
        assert!((m.total() - 1.25).abs() < 1e-12);
        assert_eq!(Membership::new().strongest(), None);
    }

    #[test]
    fn test_hard_labels() {
        let mut a = Membership::new();
        a.set(0, 0.3);
        a.set(1, 0.6);
        let fp = FuzzyPartition::new(vec![a, Membership::new(), Membership::single(0)], 2);
        assert_eq!(fp.hard_labels(), vec![Some(1), None, Some(0)]);
    }

    #[test]
    fn test_compacted_drops_unused_ids() {
        let mut a = Membership::new();
        a.set(4, 0.5);
        a.set(1, 1.0);
        let fp = FuzzyPartition::compacted(vec![a, Membership::new(), Membership::single(4)]);
        assert_eq!(fp.n_clusters(), 2);
        assert_eq!(fp.membership(0).degree(0), 1.0);
        assert_eq!(fp.membership(0).degree(1), 0.5);
        assert_eq!(fp.membership(2).degree(1), 1.0);
        assert!(fp.membership(1).is_empty());
    }
}
