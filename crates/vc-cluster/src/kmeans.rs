//! Deterministic k-means over planar points.
//!
//! Plain Lloyd iteration with farthest-point seeding from the first input
//! point.  No RNG anywhere: the same input always yields the same labels,
//! which keeps cluster ids stable across a re-run of the same county.
//! Farthest-point seeds also spread the initial centers across the county's
//! extent, so sparse rural corners get their own clusters instead of being
//! absorbed into town centers.

use vc_core::GeoPoint;

/// Assign each point a cluster label in `0..k`.
///
/// Returns one label per input point.  `k == 0` or an empty input yields an
/// empty vector; `k >= points.len()` makes every point its own cluster.
/// Terminates on label fixpoint or after `max_iters` sweeps.
pub fn kmeans(points: &[GeoPoint], k: usize, max_iters: usize) -> Vec<usize> {
    if points.is_empty() || k == 0 {
        return Vec::new();
    }
    if k >= points.len() {
        return (0..points.len()).collect();
    }

    // ── Farthest-point seeding ────────────────────────────────────────────
    let mut centers: Vec<GeoPoint> = Vec::with_capacity(k);
    centers.push(points[0]);

    while centers.len() < k {
        let mut best_idx = 0;
        let mut best_dist = 0.0;
        for (i, p) in points.iter().enumerate() {
            let min_dist = centers
                .iter()
                .map(|c| p.dist2(*c))
                .fold(f64::INFINITY, f64::min);
            if min_dist > best_dist {
                best_dist = min_dist;
                best_idx = i;
            }
        }
        centers.push(points[best_idx]);
    }

    // ── Lloyd iteration ───────────────────────────────────────────────────
    let mut labels = vec![0usize; points.len()];

    for _ in 0..max_iters {
        // Assignment sweep; ties go to the lowest center index.
        let mut changed = false;
        for (i, p) in points.iter().enumerate() {
            let mut best_center = 0;
            let mut best_dist = f64::INFINITY;
            for (j, c) in centers.iter().enumerate() {
                let dist = p.dist2(*c);
                if dist < best_dist {
                    best_dist = dist;
                    best_center = j;
                }
            }
            if labels[i] != best_center {
                labels[i] = best_center;
                changed = true;
            }
        }

        if !changed {
            break;
        }

        // Update sweep: each center moves to the mean of its members.
        // Centers that lost every member stay where they are.
        let mut sums = vec![(0.0f64, 0.0f64); k];
        let mut counts = vec![0usize; k];
        for (i, p) in points.iter().enumerate() {
            let label = labels[i];
            sums[label].0 += p.x;
            sums[label].1 += p.y;
            counts[label] += 1;
        }
        for j in 0..k {
            if counts[j] > 0 {
                let n = counts[j] as f64;
                centers[j] = GeoPoint::new(sums[j].0 / n, sums[j].1 / n);
            }
        }
    }

    labels
}
