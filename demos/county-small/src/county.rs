//! Synthetic county used by the demo: road network, demand units, and the
//! candidate-site catalog.
//!
//! Geography: a western town grid and an eastern town square joined by a
//! highway, a rural crossroads between them, and a hamlet 20 km north on a
//! slow two-lane road.  Coordinates in meters, edge times in milliseconds.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use vc_cluster::DemandUnit;
use vc_core::{GeoPoint, UnitId};
use vc_network::{RoadGraph, RoadGraphBuilder};

/// Candidate sites, one per row.  Site 10 sits on the same block as site 1
/// and gets pruned by near-node dedup.  Site 9 is the hamlet store, scored
/// too low for the solver to open; the remediation pass proposes it instead.
pub const CATALOG_CSV: &str = "\
id,x,y,center_score,dropbox_score,has_transit,fixed_short,fixed_long
1,50.0,30.0,8.5,6.0,1,1,0
2,820.0,30.0,7.0,7.5,1,0,0
3,1650.0,40.0,6.0,5.0,0,0,0
4,30.0,780.0,5.5,4.0,0,0,0
5,850.0,820.0,9.0,8.0,1,0,1
6,6050.0,20.0,7.5,6.5,1,0,0
7,6780.0,760.0,6.5,7.0,0,0,0
8,3780.0,1980.0,4.0,3.5,0,0,0
9,6820.0,20790.0,2.5,2.0,0,0,0
10,70.0,45.0,5.0,5.0,0,0,0
";

/// Build the 12-node county road network.
pub fn build_graph() -> RoadGraph {
    let mut b = RoadGraphBuilder::new();

    // West town: 2 x 3 grid, 800 m blocks.
    let a0 = b.add_node(GeoPoint::new(0.0, 0.0));
    let a1 = b.add_node(GeoPoint::new(800.0, 0.0));
    let a2 = b.add_node(GeoPoint::new(1_600.0, 0.0));
    let a3 = b.add_node(GeoPoint::new(0.0, 800.0));
    let a4 = b.add_node(GeoPoint::new(800.0, 800.0));
    let a5 = b.add_node(GeoPoint::new(1_600.0, 800.0));

    // East town: one square.
    let b0 = b.add_node(GeoPoint::new(6_000.0, 0.0));
    let b1 = b.add_node(GeoPoint::new(6_800.0, 0.0));
    let b2 = b.add_node(GeoPoint::new(6_000.0, 800.0));
    let b3 = b.add_node(GeoPoint::new(6_800.0, 800.0));

    // Rural crossroads and the far hamlet.
    let r0 = b.add_node(GeoPoint::new(3_800.0, 2_000.0));
    let h0 = b.add_node(GeoPoint::new(6_800.0, 20_800.0));

    // Town streets, ~40 km/h.
    for (u, v) in [(a0, a1), (a1, a2), (a3, a4), (a4, a5), (a0, a3), (a1, a4), (a2, a5)] {
        b.add_road(u, v, 800.0, 72_000);
    }
    for (u, v) in [(b0, b1), (b2, b3), (b0, b2), (b1, b3)] {
        b.add_road(u, v, 800.0, 72_000);
    }

    // Highway between the towns, 80 km/h.
    b.add_road(a2, b0, 4_400.0, 198_000);

    // Rural connectors, 60 km/h.
    b.add_road(a5, r0, 2_500.0, 150_000);
    b.add_road(r0, b2, 2_500.0, 150_000);

    // The hamlet road: 20 km of slow two-lane, 30 km/h -> 40 minutes.
    b.add_road(b3, h0, 20_000.0, 2_400_000);

    b.build()
}

fn blob(
    rng: &mut SmallRng,
    units: &mut Vec<DemandUnit>,
    count: usize,
    center: (f64, f64),
    spread: f64,
    weight_range: (f64, f64),
) {
    for _ in 0..count {
        let id = units.len() as u64 + 1;
        units.push(DemandUnit {
            id: UnitId(id),
            pos: GeoPoint::new(
                center.0 + rng.gen_range(-spread..spread),
                center.1 + rng.gen_range(-spread..spread),
            ),
            weight: rng.gen_range(weight_range.0..weight_range.1).round(),
        });
    }
}

/// Synthetic census units: both towns, the rural fringe, and the hamlet.
pub fn demand_units(seed: u64) -> Vec<DemandUnit> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut units = Vec::new();
    blob(&mut rng, &mut units, 150, (800.0, 400.0), 900.0, (100.0, 400.0));
    blob(&mut rng, &mut units, 60, (6_400.0, 400.0), 700.0, (100.0, 400.0));
    blob(&mut rng, &mut units, 30, (3_800.0, 2_000.0), 1_500.0, (100.0, 400.0));
    blob(&mut rng, &mut units, 3, (6_800.0, 20_800.0), 200.0, (20.0, 40.0));
    units
}
