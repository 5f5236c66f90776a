use fuzzy_density::cluster::{
    classify, BruteForce, Clustering, CoreBorderDbscan, Dbscan, FuzzyBorderDbscan,
    FuzzyClustering, FuzzyDbscan, KdTree, PointKind, RadiusSweep, RegionQuery,
};
use fuzzy_density::metric::{Euclidean, Manhattan, Metric};
use proptest::prelude::*;

fn points() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(-5.0f64..5.0, 2), 0..40)
}

proptest! {
    #[test]
    fn prop_dbscan_is_deterministic(data in points(), eps in 0.0f64..3.0, min_pts in 1usize..6) {
        let q = BruteForce::new(&data, &Euclidean);
        let a = Dbscan::new(eps, min_pts).fit(&q).unwrap();
        let b = Dbscan::new(eps, min_pts).fit(&q).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_labels_respect_reachability(data in points(), eps in 0.0f64..3.0, min_pts in 1usize..6) {
        let q = BruteForce::new(&data, &Euclidean);
        let p = Dbscan::new(eps, min_pts).fit(&q).unwrap();
        prop_assert_eq!(p.len(), data.len());

        for i in 0..data.len() {
            let hood = q.neighbors(i, eps);
            prop_assert_eq!(p.is_core(i), hood.len() >= min_pts);
            match p.label(i) {
                None => {
                    // Noise: no core point within eps.
                    prop_assert!(hood.iter().all(|&j| !p.is_core(j)));
                }
                Some(c) => {
                    prop_assert!(c < p.n_clusters());
                    // Clustered: some core point of the same cluster within eps.
                    prop_assert!(hood.iter().any(|&j| p.is_core(j) && p.label(j) == Some(c)));
                    // Core points pull their whole neighborhood into their cluster.
                    if p.is_core(i) {
                        for &j in &hood {
                            if p.is_core(j) {
                                prop_assert_eq!(p.label(j), Some(c));
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn prop_cluster_ids_follow_first_core_point(data in points(), eps in 0.1f64..3.0, min_pts in 1usize..5) {
        let q = BruteForce::new(&data, &Euclidean);
        let p = Dbscan::new(eps, min_pts).fit(&q).unwrap();
        let mut next = 0;
        for i in 0..data.len() {
            if p.is_core(i) {
                let c = p.label(i).unwrap();
                prop_assert!(c <= next);
                if c == next {
                    next += 1;
                }
            }
        }
        prop_assert_eq!(next, p.n_clusters());
    }

    #[test]
    fn prop_core_is_monotone_in_radius(data in points(), eps in 0.0f64..2.0, grow in 0.0f64..2.0, min_pts in 1usize..6) {
        let q = BruteForce::new(&data, &Euclidean);
        let small = classify(&q, eps, min_pts).unwrap();
        let large = classify(&q, eps + grow, min_pts).unwrap();
        for (a, b) in small.iter().zip(&large) {
            if *a == PointKind::Core {
                prop_assert_eq!(*b, PointKind::Core);
            }
            if *a != PointKind::Noise {
                prop_assert!(*b != PointKind::Noise);
            }
        }
    }

    #[test]
    fn prop_kdtree_matches_brute_force(data in points(), eps in 0.0f64..4.0) {
        let brute = BruteForce::new(&data, &Manhattan);
        let tree = KdTree::new(&data, &Manhattan).unwrap();
        for i in 0..data.len() {
            prop_assert_eq!(tree.neighbors(i, eps), brute.neighbors(i, eps));
        }
    }

    #[test]
    fn prop_fuzzy_degrees_in_unit_interval(
        data in points(),
        min_eps in 0.0f64..1.0,
        span in 0.0f64..2.0,
        min_points in 1usize..4,
        extra in 0usize..4,
    ) {
        let q = BruteForce::new(&data, &Euclidean);
        let max_eps = min_eps + span;
        let max_points = min_points + extra;
        let results = [
            CoreBorderDbscan::new(max_eps, min_points, max_points).fit_fuzzy(&q).unwrap(),
            FuzzyBorderDbscan::new(min_eps, max_eps, min_points).with_samples(6).fit_fuzzy(&q).unwrap(),
            FuzzyDbscan::new(min_eps, max_eps, min_points, max_points).with_samples(6).fit_fuzzy(&q).unwrap(),
        ];
        for fp in &results {
            prop_assert_eq!(fp.len(), data.len());
            for m in fp.memberships() {
                for (c, d) in m.iter() {
                    prop_assert!(c < fp.n_clusters());
                    prop_assert!(d > 0.0 && d <= 1.0);
                }
            }
        }
    }

    #[test]
    fn prop_fuzzy_border_degrees_bounded_by_sample_fractions(
        data in points(),
        min_eps in 0.0f64..1.0,
        span in 0.0f64..2.0,
        min_pts in 1usize..4,
    ) {
        // No degree exceeds the share of radii at which the point is clustered at all.
        let sweep = RadiusSweep::new(min_eps, min_eps + span).with_samples(5);
        let q = BruteForce::new(&data, &Euclidean);
        let fp = FuzzyBorderDbscan::new(sweep.min_eps(), sweep.max_eps(), min_pts)
            .with_samples(sweep.samples())
            .fit_fuzzy(&q)
            .unwrap();
        let radii = sweep.radii();
        let partitions: Vec<_> = radii
            .iter()
            .map(|&r| Dbscan::new(r, min_pts).fit(&q).unwrap())
            .collect();
        for i in 0..data.len() {
            let clustered = partitions.iter().filter(|p| !p.is_noise(i)).count();
            let fraction = clustered as f64 / radii.len() as f64;
            let m = fp.membership(i);
            prop_assert_eq!(m.is_empty(), clustered == 0);
            for (_, d) in m.iter() {
                prop_assert!(d <= fraction + 1e-9);
            }
        }
    }

    #[test]
    fn prop_widening_keeps_full_membership_of_early_cores(
        data in points(),
        min_eps in 0.0f64..1.0,
        span in 0.0f64..2.0,
        grow in 0.0f64..2.0,
        min_pts in 1usize..4,
    ) {
        // A point that is core at the smallest radius stays in its cluster at every
        // larger one, however far the range is widened.
        let q = BruteForce::new(&data, &Euclidean);
        let first = Dbscan::new(min_eps, min_pts).fit(&q).unwrap();
        let narrow = FuzzyBorderDbscan::new(min_eps, min_eps + span, min_pts)
            .with_samples(6)
            .fit_fuzzy(&q)
            .unwrap();
        let wide = FuzzyBorderDbscan::new(min_eps, min_eps + span + grow, min_pts)
            .with_samples(6)
            .fit_fuzzy(&q)
            .unwrap();
        for i in 0..data.len() {
            if !first.is_core(i) {
                continue;
            }
            let c = first.label(i).unwrap();
            prop_assert_eq!(narrow.membership(i).degree(c), 1.0);
            prop_assert!(wide.membership(i).degree(c) >= narrow.membership(i).degree(c));
        }
    }

    #[test]
    fn prop_metric_symmetry(a in prop::collection::vec(-5.0f64..5.0, 3), b in prop::collection::vec(-5.0f64..5.0, 3)) {
        prop_assert!((Euclidean.distance(&a, &b) - Euclidean.distance(&b, &a)).abs() < 1e-12);
        prop_assert!(Euclidean.distance(&a, &b) >= 0.0);
    }
}
