use super::core_border::CoreBorderDbscan;
use super::dbscan::Dbscan;
use super::fuzzy::FuzzyDbscan;
use super::fuzzy_border::FuzzyBorderDbscan;
use super::membership::FuzzyPartition;
use super::neighbors::RegionQuery;
use super::partition::Partition;
use super::traits::{Clustering, FuzzyClustering};
use crate::error::Result;

/// One of the four clustering modes, chosen at runtime.
#[derive(Debug, Clone)]
pub enum Mode {
    /// Classic DBSCAN: one `(eps, min_pts)`, hard partition.
    Normal(Dbscan),
    /// Fixed eps, graded core-ness over a neighbor-count range.
    CoreBorder(CoreBorderDbscan),
    /// Fixed `min_pts`, graded membership over a radius range.
    FuzzyBorder(FuzzyBorderDbscan),
    /// Both ranges.
    Fuzzy(FuzzyDbscan),
}

/// Output of a [`Mode`]: a hard partition for [`Mode::Normal`], memberships otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Clusters {
    /// One label per point.
    Hard(Partition),
    /// One membership map per point.
    Fuzzy(FuzzyPartition),
}

impl Mode {
    /// Run the selected mode.
    pub fn fit<Q: RegionQuery + Sync + ?Sized>(&self, query: &Q) -> Result<Clusters> {
        Ok(match self {
            Mode::Normal(m) => Clusters::Hard(m.fit(query)?),
            Mode::CoreBorder(m) => Clusters::Fuzzy(m.fit_fuzzy(query)?),
            Mode::FuzzyBorder(m) => Clusters::Fuzzy(m.fit_fuzzy(query)?),
            Mode::Fuzzy(m) => Clusters::Fuzzy(m.fit_fuzzy(query)?),
        })
    }
}

impl Clusters {
    /// Number of clusters (or lineages, for sweeps).
    pub fn n_clusters(&self) -> usize {
        match self {
            Clusters::Hard(p) => p.n_clusters(),
            Clusters::Fuzzy(f) => f.n_clusters(),
        }
    }

    /// Memberships for either kind of result; hard labels become degree-1 entries.
    pub fn into_fuzzy(self) -> FuzzyPartition {
        match self {
            Clusters::Hard(p) => FuzzyPartition::new(p.memberships(), p.n_clusters()),
            Clusters::Fuzzy(f) => f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::BruteForce;
    use crate::metric::Euclidean;

    #[test]
    fn test_every_mode_runs() {
        let data = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![10.0, 10.0]];
        let q = BruteForce::new(&data, &Euclidean);
        let modes = [
            Mode::Normal(Dbscan::new(1.5, 2)),
            Mode::CoreBorder(CoreBorderDbscan::new(1.5, 2, 2)),
            Mode::FuzzyBorder(FuzzyBorderDbscan::new(1.5, 1.5, 2)),
            Mode::Fuzzy(FuzzyDbscan::new(1.5, 1.5, 2, 2)),
        ];
        let results: Vec<FuzzyPartition> = modes
            .iter()
            .map(|m| m.fit(&q).unwrap().into_fuzzy())
            .collect();
        // With collapsed ranges every mode is plain DBSCAN.
        for r in &results {
            assert_eq!(r, &results[0]);
            assert_eq!(r.hard_labels(), vec![Some(0), Some(0), Some(0), None]);
        }
    }

    #[test]
    fn test_hard_result() {
        let data = vec![vec![0.0], vec![0.5]];
        let q = BruteForce::new(&data, &Euclidean);
        let out = Mode::Normal(Dbscan::new(1.0, 2)).fit(&q).unwrap();
        assert!(matches!(out, Clusters::Hard(_)));
        assert_eq!(out.n_clusters(), 1);
    }
}
