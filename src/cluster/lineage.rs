//! Cluster identity across the samples of a radius sweep.
//!
//! Every sample is clustered independently, so its cluster ids are local. A
//! cluster at radius `r` continues a lineage from a smaller radius when its core
//! points are a superset of that lineage's core points at the lineage's latest
//! sample.
//!
//! With `min_pts` fixed, growing the radius only ever adds core points and merges
//! clusters, so every lineage is continued by exactly one cluster of the next
//! sample. When one cluster continues several lineages (a merge), it carries all
//! of them: each keeps its id and from then on tracks the merged core set. A
//! cluster that continues nothing opens a new lineage. New ids are handed out in
//! sample order, then in local cluster order, so the mapping is deterministic.

use super::partition::Partition;

pub(crate) struct Lineage {
    /// `ids[sample][local cluster]` -> lineage ids, ascending.
    ids: Vec<Vec<Vec<usize>>>,
    count: usize,
}

impl Lineage {
    /// Reconcile partitions given in ascending radius order.
    pub(crate) fn reconcile<'a, I>(partitions: I) -> Self
    where
        I: IntoIterator<Item = &'a Partition>,
    {
        let mut ids = Vec::new();
        let mut count = 0;
        // (lineage id, its core points at its latest sample)
        let mut active: Vec<(usize, Vec<usize>)> = Vec::new();

        for partition in partitions {
            let k = partition.n_clusters();

            let mut claims: Vec<Vec<usize>> = vec![Vec::new(); k];
            for (id, cores) in &active {
                if let Some(c) = containing_cluster(partition, cores) {
                    claims[c].push(*id);
                }
            }
            for claim in &mut claims {
                if claim.is_empty() {
                    claim.push(count);
                    count += 1;
                } else {
                    claim.sort_unstable();
                }
            }

            let mut cores_by_cluster: Vec<Vec<usize>> = vec![Vec::new(); k];
            for i in 0..partition.len() {
                if let (true, Some(c)) = (partition.is_core(i), partition.label(i)) {
                    cores_by_cluster[c].push(i);
                }
            }

            active = claims
                .iter()
                .zip(&cores_by_cluster)
                .flat_map(|(claim, cores)| claim.iter().map(move |&id| (id, cores.clone())))
                .collect();
            ids.push(claims);
        }

        Self { ids, count }
    }

    /// Lineage ids carried by cluster `local` in sample `sample`, ascending.
    pub(crate) fn global(&self, sample: usize, local: usize) -> &[usize] {
        &self.ids[sample][local]
    }

    /// Number of lineages.
    pub(crate) fn len(&self) -> usize {
        self.count
    }
}

/// The cluster of `partition` whose core points include all of `cores`, if any.
fn containing_cluster(partition: &Partition, cores: &[usize]) -> Option<usize> {
    let first = *cores.first()?;
    let c = partition.label(first)?;
    cores
        .iter()
        .all(|&p| partition.is_core(p) && partition.label(p) == Some(c))
        .then_some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition(labels: &[Option<usize>], core: &[bool]) -> Partition {
        let n_clusters = labels.iter().flatten().max().map_or(0, |m| m + 1);
        Partition::new(labels.to_vec(), core.to_vec(), n_clusters)
    }

    #[test]
    fn test_growth_keeps_id() {
        let small = partition(&[Some(0), Some(0), None, None], &[true, false, false, false]);
        let large = partition(
            &[Some(0), Some(0), Some(0), None],
            &[true, true, false, false],
        );
        let lineage = Lineage::reconcile([&small, &large]);
        assert_eq!(lineage.len(), 1);
        assert_eq!(lineage.global(0, 0), [0]);
        assert_eq!(lineage.global(1, 0), [0]);
    }

    #[test]
    fn test_merge_carries_every_lineage() {
        // Two clusters at the small radius, merged at the large one. Local ids at the
        // large radius are renumbered from scratch.
        let small = partition(
            &[Some(0), Some(0), None, Some(1), Some(1)],
            &[true, true, false, true, true],
        );
        let large = partition(
            &[Some(0), Some(0), Some(0), Some(0), Some(0)],
            &[true, true, true, true, true],
        );
        let lineage = Lineage::reconcile([&small, &large]);
        assert_eq!(lineage.len(), 2);
        assert_eq!(lineage.global(0, 1), [1]);
        assert_eq!(lineage.global(1, 0), [0, 1]);
    }

    #[test]
    fn test_merged_lineages_keep_going() {
        let small = partition(&[Some(0), Some(1), None], &[true, true, false]);
        let merged = partition(&[Some(0), Some(0), None], &[true, true, false]);
        let grown = partition(&[Some(0), Some(0), Some(0)], &[true, true, true]);
        let lineage = Lineage::reconcile([&small, &merged, &grown]);
        assert_eq!(lineage.len(), 2);
        assert_eq!(lineage.global(2, 0), [0, 1]);
    }

    #[test]
    fn test_unmatched_cluster_opens_new_lineage() {
        let small = partition(&[Some(0), Some(0), None, None], &[true, true, false, false]);
        let large = partition(
            &[Some(1), Some(1), Some(0), Some(0)],
            &[true, true, true, true],
        );
        let lineage = Lineage::reconcile([&small, &large]);
        assert_eq!(lineage.len(), 2);
        // Local cluster 1 at the large radius continues lineage 0.
        assert_eq!(lineage.global(1, 1), [0]);
        assert_eq!(lineage.global(1, 0), [1]);
    }

    #[test]
    fn test_lost_core_breaks_lineage() {
        // Not reachable with a fixed min_pts, but the rule is containment, not position.
        let a = partition(&[Some(0), Some(0)], &[true, true]);
        let b = partition(&[Some(0), Some(0)], &[true, false]);
        let lineage = Lineage::reconcile([&a, &b]);
        assert_eq!(lineage.len(), 2);
        assert_eq!(lineage.global(1, 0), [1]);
    }

    #[test]
    fn test_empty_sweep() {
        let lineage = Lineage::reconcile(std::iter::empty());
        assert_eq!(lineage.len(), 0);
    }
}
