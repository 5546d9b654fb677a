//! Distance and road-condition cost primitives.
//!
//! Every downstream consumer prices a segment through [`edge_weight`], so
//! search results and displayed travel times stay consistent with each other.

use geo::Point;

use crate::DEGRADED_HEALTH_THRESHOLD;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of longitude at the equator.
const METERS_PER_DEGREE_LON: f64 = 111_320.0;
/// Meters per degree of latitude.
const METERS_PER_DEGREE_LAT: f64 = 110_540.0;

/// Shrink factor applied to the planar distance when it guides the search.
/// The equirectangular approximation can slightly overestimate true distance
/// in some projections; scaling it down keeps the A* heuristic admissible.
pub(crate) const HEURISTIC_SAFETY_FACTOR: f64 = 0.99;

/// Dimensionless multiplier (>= 1) applied to a segment's physical length to
/// obtain its effective traversal cost.
///
/// Full health yields exactly 1.0. Segments below
/// [`DEGRADED_HEALTH_THRESHOLD`] are already flagged degraded by the
/// simulation and share a single 2x ceiling; above the threshold, health loss
/// scales cost proportionally up to a 3x ceiling.
pub fn health_slowdown_multiplier(health: f64) -> f64 {
    // Health at or below zero divides as 1 (impassable-slow, never div-by-zero)
    let raw = 100.0 / health.max(1.0);
    if health < DEGRADED_HEALTH_THRESHOLD {
        raw.min(2.0)
    } else {
        raw.min(3.0)
    }
}

/// Health-weighted traversal cost of a segment in meters. This is the edge
/// cost minimized by the search.
pub fn edge_weight(length_m: f64, health: f64) -> f64 {
    length_m * health_slowdown_multiplier(health)
}

/// Great-circle distance in meters on a spherical Earth.
///
/// Used for reporting real-world distances; the search heuristic uses the
/// cheaper planar approximation instead.
pub fn haversine_distance_meters(a: Point<f64>, b: Point<f64>) -> f64 {
    let lat_a = a.y().to_radians();
    let lat_b = b.y().to_radians();
    let d_lat = (b.y() - a.y()).to_radians();
    let d_lon = (b.x() - a.x()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Equirectangular planar approximation of the distance between two points,
/// in meters. Accurate to well under a percent at city scale and much cheaper
/// than [`haversine_distance_meters`] per call, which matters when evaluated
/// on every edge relaxation.
pub(crate) fn equirectangular_distance_meters(a: Point<f64>, b: Point<f64>) -> f64 {
    let mean_lat = ((a.y() + b.y()) / 2.0).to_radians();
    let dx = (b.x() - a.x()) * METERS_PER_DEGREE_LON * mean_lat.cos();
    let dy = (b.y() - a.y()) * METERS_PER_DEGREE_LAT;
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_health_is_free() {
        assert_eq!(health_slowdown_multiplier(100.0), 1.0);
    }

    #[test]
    fn multiplier_non_decreasing_as_health_drops() {
        let healths = [100.0, 90.0, 75.0, 60.0, 50.0, 40.0, 25.0, 10.0, 1.0, 0.0];
        let mut previous = 0.0;
        for health in healths {
            let multiplier = health_slowdown_multiplier(health);
            assert!(
                multiplier >= previous,
                "multiplier regressed at health {health}: {multiplier} < {previous}"
            );
            previous = multiplier;
        }
    }

    #[test]
    fn degraded_segments_cap_at_two() {
        assert_eq!(health_slowdown_multiplier(10.0), 2.0);
        assert_eq!(health_slowdown_multiplier(0.0), 2.0);
        assert_eq!(health_slowdown_multiplier(-5.0), 2.0);
    }

    #[test]
    fn healthy_segments_scale_proportionally() {
        assert_eq!(health_slowdown_multiplier(50.0), 2.0);
        assert!((health_slowdown_multiplier(80.0) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn half_health_doubles_cost() {
        assert_eq!(edge_weight(100.0, 50.0), 200.0);
    }

    #[test]
    fn haversine_zero_for_identical_points() {
        let p = Point::new(37.61, 55.75);
        assert_eq!(haversine_distance_meters(p, p), 0.0);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = Point::new(37.61, 55.75);
        let b = Point::new(37.66, 55.77);
        let forward = haversine_distance_meters(a, b);
        let backward = haversine_distance_meters(b, a);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn haversine_one_degree_of_latitude() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 1.0);
        let distance = haversine_distance_meters(a, b);
        assert!(
            (distance - 111_194.9).abs() < 1.0,
            "unexpected meridian arc length: {distance}"
        );
    }

    #[test]
    fn planar_approximation_tracks_haversine_at_city_scale() {
        let a = Point::new(37.61, 55.75);
        let b = Point::new(37.63, 55.76);
        let exact = haversine_distance_meters(a, b);
        let approx = equirectangular_distance_meters(a, b);
        assert!(
            (exact - approx).abs() / exact < 0.01,
            "planar approximation drifted: {approx} vs {exact}"
        );
    }
}
