//! Planar coordinate type and the few spatial helpers the pipeline needs.
//!
//! `GeoPoint` stores double-precision x/y.  County inputs arrive either as
//! lon/lat degrees or as projected metres; every in-pipeline use is a
//! *comparison* of distances between points in the same county, so the units
//! cancel and no projection handling is needed here.  Double precision
//! matters: near-node collision resolution compares distances between
//! near-coincident points, where `f32` rounding could flip the winner.

/// A planar coordinate (lon/lat degrees or projected metres).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.
    ///
    /// All callers rank candidates by distance; none needs the metric value
    /// itself, so the square root is never taken.
    #[inline]
    pub fn dist2(self, other: GeoPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Arithmetic-mean centroid of a point set; `None` when empty.
    pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(GeoPoint::new(sx / n, sy / n))
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}
