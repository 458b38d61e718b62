//! Unit tests for vc-locate.
//!
//! Instances are small enough to verify optimal selections by hand; the
//! randomized cases check solution invariants rather than exact objectives.

#[cfg(test)]
mod helpers {
    use vc_core::{ClusterId, SiteId};
    use vc_network::CostMatrix;

    /// Cost matrix from `(cluster, site, minutes)` triples.
    pub fn matrix(entries: &[(u32, u32, f64)]) -> CostMatrix {
        let mut m = CostMatrix::default();
        for &(c, s, minutes) in entries {
            m.insert(ClusterId(c), SiteId(s), minutes);
        }
        m
    }
}

// ── Problem validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod model {
    use vc_core::{ClusterId, SiteId};

    use crate::{FlpProblem, SolveError};

    #[test]
    fn consistent_instance_validates() {
        let costs = super::helpers::matrix(&[(0, 1, 2.0), (0, 2, 3.0)]);
        let problem = FlpProblem {
            demand: &[(ClusterId(0), 100.0)],
            facilities: &[SiteId(1), SiteId(2)],
            capacities: &[500.0, 500.0],
            opening_costs: &[10.0, 10.0],
            costs: &costs,
            open_count: 1,
            forced_open: &[],
        };
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn mismatched_capacities_rejected() {
        let costs = super::helpers::matrix(&[]);
        let problem = FlpProblem {
            demand: &[],
            facilities: &[SiteId(1), SiteId(2)],
            capacities: &[500.0],
            opening_costs: &[10.0, 10.0],
            costs: &costs,
            open_count: 1,
            forced_open: &[],
        };
        assert!(matches!(problem.validate(), Err(SolveError::Model(_))));
    }

    #[test]
    fn open_count_beyond_candidates_rejected() {
        let costs = super::helpers::matrix(&[]);
        let problem = FlpProblem {
            demand: &[],
            facilities: &[SiteId(1)],
            capacities: &[500.0],
            opening_costs: &[10.0],
            costs: &costs,
            open_count: 2,
            forced_open: &[],
        };
        assert!(matches!(problem.validate(), Err(SolveError::Model(_))));
    }

    #[test]
    fn forced_site_must_be_a_candidate() {
        let costs = super::helpers::matrix(&[]);
        let problem = FlpProblem {
            demand: &[],
            facilities: &[SiteId(1)],
            capacities: &[500.0],
            opening_costs: &[10.0],
            costs: &costs,
            open_count: 1,
            forced_open: &[SiteId(9)],
        };
        assert!(matches!(problem.validate(), Err(SolveError::Model(_))));
    }

    #[test]
    fn more_forced_than_open_count_rejected() {
        let costs = super::helpers::matrix(&[]);
        let problem = FlpProblem {
            demand: &[],
            facilities: &[SiteId(1), SiteId(2)],
            capacities: &[500.0, 500.0],
            opening_costs: &[0.0, 0.0],
            costs: &costs,
            open_count: 1,
            forced_open: &[SiteId(1), SiteId(2)],
        };
        assert!(matches!(problem.validate(), Err(SolveError::Model(_))));
    }

    #[test]
    fn non_finite_weight_rejected() {
        let costs = super::helpers::matrix(&[(0, 1, 2.0)]);
        let problem = FlpProblem {
            demand: &[(ClusterId(0), f64::NAN)],
            facilities: &[SiteId(1)],
            capacities: &[500.0],
            opening_costs: &[0.0],
            costs: &costs,
            open_count: 1,
            forced_open: &[],
        };
        assert!(matches!(problem.validate(), Err(SolveError::Model(_))));
    }
}

// ── Solving ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod solving {
    use rand::{Rng, SeedableRng, rngs::SmallRng};
    use vc_core::{ClusterId, SiteId};

    use crate::{FlpProblem, SolveError, solve};

    #[test]
    fn picks_the_cheaper_travel_site() {
        let costs = super::helpers::matrix(&[(0, 1, 5.0), (0, 2, 1.0)]);
        let problem = FlpProblem {
            demand: &[(ClusterId(0), 10_000.0)],
            facilities: &[SiteId(1), SiteId(2)],
            capacities: &[15_000.0, 15_000.0],
            opening_costs: &[0.0, 0.0],
            costs: &costs,
            open_count: 1,
            forced_open: &[],
        };
        let sel = solve(&problem).unwrap();
        assert_eq!(sel.facilities, vec![SiteId(2)]);
        assert_eq!(sel.assignments.len(), 1);
        let a = sel.assignments[0];
        assert_eq!((a.cluster, a.site), (ClusterId(0), SiteId(2)));
        assert!((a.flow - 10_000.0).abs() < 1e-4);
        assert!((sel.objective - 10_000.0).abs() < 1e-3);
    }

    #[test]
    fn opening_cost_steers_selection() {
        // Identical travel; only the opening costs differ.
        let costs = super::helpers::matrix(&[(0, 1, 2.0), (0, 2, 2.0)]);
        let problem = FlpProblem {
            demand: &[(ClusterId(0), 1_000.0)],
            facilities: &[SiteId(1), SiteId(2)],
            capacities: &[5_000.0, 5_000.0],
            opening_costs: &[50_000.0, 1_000.0],
            costs: &costs,
            open_count: 1,
            forced_open: &[],
        };
        let sel = solve(&problem).unwrap();
        assert_eq!(sel.facilities, vec![SiteId(2)]);
        assert!((sel.objective - (1_000.0 + 2_000.0)).abs() < 1e-3);
    }

    #[test]
    fn capacity_forces_a_split() {
        // 23k of demand against two 15k sites: no single site can take it.
        let costs = super::helpers::matrix(&[
            (0, 1, 1.0),
            (0, 2, 10.0),
            (1, 1, 1.0),
            (1, 2, 10.0),
            (2, 1, 1.0),
            (2, 2, 2.0),
        ]);
        let demand = [
            (ClusterId(0), 10_000.0),
            (ClusterId(1), 5_000.0),
            (ClusterId(2), 8_000.0),
        ];
        let problem = FlpProblem {
            demand: &demand,
            facilities: &[SiteId(1), SiteId(2)],
            capacities: &[15_000.0, 15_000.0],
            opening_costs: &[0.0, 0.0],
            costs: &costs,
            open_count: 2,
            forced_open: &[],
        };
        let sel = solve(&problem).unwrap();
        assert_eq!(sel.facilities, vec![SiteId(1), SiteId(2)]);

        // Each cluster fully served.
        for &(cluster, weight) in &demand {
            let served: f64 = sel
                .assignments
                .iter()
                .filter(|a| a.cluster == cluster)
                .map(|a| a.flow)
                .sum();
            assert!((served - weight).abs() < 1e-4, "{cluster} served {served}");
        }

        // No site above capacity, and every flow is positive.
        for &site in &sel.facilities {
            let inflow: f64 = sel
                .assignments
                .iter()
                .filter(|a| a.site == site)
                .map(|a| a.flow)
                .sum();
            assert!(inflow <= 15_000.0 + 1e-4, "{site} takes {inflow}");
        }
        assert!(sel.assignments.iter().all(|a| a.flow > 0.0));
    }

    #[test]
    fn forced_open_beats_cheaper_travel() {
        let costs = super::helpers::matrix(&[(0, 1, 1.0), (0, 2, 50.0)]);
        let problem = FlpProblem {
            demand: &[(ClusterId(0), 100.0)],
            facilities: &[SiteId(1), SiteId(2)],
            capacities: &[1_000.0, 1_000.0],
            opening_costs: &[0.0, 0.0],
            costs: &costs,
            open_count: 1,
            forced_open: &[SiteId(2)],
        };
        let sel = solve(&problem).unwrap();
        assert_eq!(sel.facilities, vec![SiteId(2)]);
    }

    #[test]
    fn infeasible_when_capacity_is_short() {
        let costs = super::helpers::matrix(&[(0, 1, 1.0), (0, 2, 1.0)]);
        let problem = FlpProblem {
            demand: &[(ClusterId(0), 30_000.0)],
            facilities: &[SiteId(1), SiteId(2)],
            capacities: &[10_000.0, 10_000.0],
            opening_costs: &[0.0, 0.0],
            costs: &costs,
            open_count: 2,
            forced_open: &[],
        };
        assert!(matches!(
            solve(&problem),
            Err(SolveError::Infeasible { .. })
        ));
    }

    #[test]
    fn missing_cost_entry_is_an_error() {
        // No (0, 2) entry.
        let costs = super::helpers::matrix(&[(0, 1, 1.0)]);
        let problem = FlpProblem {
            demand: &[(ClusterId(0), 100.0)],
            facilities: &[SiteId(1), SiteId(2)],
            capacities: &[1_000.0, 1_000.0],
            opening_costs: &[0.0, 0.0],
            costs: &costs,
            open_count: 1,
            forced_open: &[],
        };
        match solve(&problem) {
            Err(SolveError::MissingCost { cluster, site }) => {
                assert_eq!(cluster, ClusterId(0));
                assert_eq!(site, SiteId(2));
            }
            other => panic!("expected MissingCost, got {other:?}"),
        }
    }

    #[test]
    fn opens_exactly_the_requested_count() {
        let costs = super::helpers::matrix(&[
            (0, 1, 1.0),
            (0, 2, 2.0),
            (0, 3, 3.0),
        ]);
        let problem = FlpProblem {
            demand: &[(ClusterId(0), 100.0)],
            facilities: &[SiteId(1), SiteId(2), SiteId(3)],
            capacities: &[1_000.0, 1_000.0, 1_000.0],
            opening_costs: &[0.0, 0.0, 0.0],
            costs: &costs,
            open_count: 2,
            forced_open: &[],
        };
        let sel = solve(&problem).unwrap();
        // Two sites open even though one could carry all the demand.
        assert_eq!(sel.facilities.len(), 2);
        assert!(sel.facilities.contains(&SiteId(1)));
    }

    #[test]
    fn empty_model_yields_empty_selection() {
        let costs = super::helpers::matrix(&[]);
        let problem = FlpProblem {
            demand: &[],
            facilities: &[],
            capacities: &[],
            opening_costs: &[],
            costs: &costs,
            open_count: 0,
            forced_open: &[],
        };
        let sel = solve(&problem).unwrap();
        assert!(sel.facilities.is_empty());
        assert!(sel.assignments.is_empty());
    }

    #[test]
    fn randomized_instances_respect_invariants() {
        for seed in 0..5 {
            let mut rng = SmallRng::seed_from_u64(seed);

            let demand: Vec<(ClusterId, f64)> = (0..6)
                .map(|i| (ClusterId(i), rng.gen_range(100.0f64..1_000.0).round()))
                .collect();
            let total: f64 = demand.iter().map(|&(_, w)| w).sum();

            let facilities: Vec<SiteId> = (0..4).map(SiteId).collect();
            let capacities = vec![total; 4]; // ample
            let opening_costs: Vec<f64> =
                (0..4).map(|_| rng.gen_range(0.0f64..5_000.0)).collect();

            let mut costs = vc_network::CostMatrix::default();
            for &(cluster, _) in &demand {
                for &site in &facilities {
                    costs.insert(cluster, site, rng.gen_range(1.0f64..30.0));
                }
            }

            let problem = FlpProblem {
                demand: &demand,
                facilities: &facilities,
                capacities: &capacities,
                opening_costs: &opening_costs,
                costs: &costs,
                open_count: 2,
                forced_open: &[],
            };
            let sel = solve(&problem).unwrap();

            assert_eq!(sel.facilities.len(), 2, "seed {seed}");
            for &(cluster, weight) in &demand {
                let served: f64 = sel
                    .assignments
                    .iter()
                    .filter(|a| a.cluster == cluster)
                    .map(|a| a.flow)
                    .sum();
                assert!((served - weight).abs() < 1e-4, "seed {seed}, {cluster}");
            }
            for a in &sel.assignments {
                assert!(sel.facilities.contains(&a.site), "seed {seed}");
                assert!(a.flow > 0.0, "seed {seed}");
            }
        }
    }
}
