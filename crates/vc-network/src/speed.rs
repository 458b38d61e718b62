//! Road-class speed model.
//!
//! Edge traversal time comes from segment length and an assumed speed per
//! road classification.  The table covers the classes that carry meaningful
//! through-traffic; everything else (residential, service, unclassified)
//! gets a conservative half-of-25-mph default, which biases the matrix
//! toward arterial routes the way real trips do.

/// Miles-per-hour to kilometres-per-hour.
const MPH_TO_KMH: f64 = 1.60934;

/// Assumed speed for road classes absent from the table: half of 25 mph.
const DEFAULT_MPH: f64 = 25.0 * 0.5;

/// Assumed travel speed in km/h for a road classification.
///
/// Multi-valued classifications (`;`-separated, as produced by map exports
/// when a way carries several tags) use the first value.
pub fn speed_kmh(road_class: &str) -> f64 {
    let first = road_class.split(';').next().unwrap_or(road_class).trim();
    let mph = match first {
        "motorway" | "motorway_link" => 55.0,
        "primary" | "secondary" | "tertiary" => 30.0,
        _ => DEFAULT_MPH,
    };
    mph * MPH_TO_KMH
}

/// Traversal time in minutes for a segment: `(length_km / speed_kmh) × 60`.
pub fn travel_minutes(length_m: f64, road_class: &str) -> f64 {
    (length_m / 1_000.0) / speed_kmh(road_class) * 60.0
}

/// Traversal time in integer milliseconds, the graph's edge-cost unit.
///
/// Integer costs keep Dijkstra's arithmetic exact; at millisecond
/// resolution the rounding error per edge is under a metre of travel.
pub fn travel_ms(length_m: f64, road_class: &str) -> u32 {
    (travel_minutes(length_m, road_class) * 60_000.0).round() as u32
}
