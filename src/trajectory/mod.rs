//! Timed waypoint trajectories for animating agents along a planned route.
//!
//! The renderer moves crews and convoys by linear interpolation between
//! waypoints, so segment dwell times here must come from the same slowdown
//! model the search optimized; otherwise displayed travel diverges from the
//! route the planner chose.

mod to_geojson;

use chrono::{DateTime, TimeDelta, Utc};
use geo::Point;
use itertools::izip;
use log::trace;

use crate::cost::{edge_weight, equirectangular_distance_meters};
use crate::error::Error;
use crate::model::RoadNetwork;
use crate::routing::PathResult;

pub use to_geojson::{trajectory_to_geojson, trajectory_to_geojson_string};

/// A sampled position on a trajectory: be at `location` at `arrival`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub location: Point<f64>,
    pub arrival: DateTime<Utc>,
}

/// Optional off-graph extensions of a trajectory.
///
/// A crew rarely starts exactly on a connector; the true origin and
/// destination (a building interior, a depot yard) get one straight-line leg
/// each, traveled at the same speed with no road-health penalty since no
/// modeled segment backs them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrajectoryOptions {
    /// True origin, prepended ahead of the first connector
    pub actual_start: Option<Point<f64>>,
    /// True destination, appended after the last connector
    pub actual_end: Option<Point<f64>>,
}

/// Convert a path into a constant-speed waypoint trajectory departing at
/// `depart_at`.
///
/// Returns one waypoint per path connector plus one per supplied off-graph
/// endpoint, with non-decreasing arrival times. The network must be the one
/// the path was planned against; a connector the network no longer knows is
/// a caller error.
pub fn build_waypoints(
    path: &PathResult,
    network: &RoadNetwork,
    depart_at: DateTime<Utc>,
    speed_mps: f64,
    options: &TrajectoryOptions,
) -> Result<Vec<Waypoint>, Error> {
    if !(speed_mps.is_finite() && speed_mps > 0.0) {
        return Err(Error::InvalidData(format!(
            "speed must be positive, got {speed_mps}"
        )));
    }

    let connector_count = path.connector_ids.len();
    if connector_count == 0 {
        return Err(Error::InvalidData("path has no connectors".to_owned()));
    }
    let segment_count = connector_count - 1;
    if path.segment_ids.len() != segment_count
        || path.segment_lengths.len() != segment_count
        || path.segment_healths.len() != segment_count
    {
        return Err(Error::InvalidData(
            "segment arrays do not match connector count".to_owned(),
        ));
    }

    let mut points = Vec::with_capacity(connector_count);
    for id in &path.connector_ids {
        let point = network
            .connector_point(id)
            .ok_or_else(|| Error::UnknownConnector(id.clone()))?;
        points.push(point);
    }

    let mut waypoints = Vec::with_capacity(connector_count + 2);
    let mut elapsed_ms = 0.0_f64;

    if let Some(origin) = options.actual_start {
        waypoints.push(Waypoint {
            location: origin,
            arrival: depart_at,
        });
        // Off-graph leg: straight line at full speed, no health penalty
        elapsed_ms += leg_ms(equirectangular_distance_meters(origin, points[0]), speed_mps);
    }

    waypoints.push(Waypoint {
        location: points[0],
        arrival: arrival_at(depart_at, elapsed_ms)?,
    });

    for (next_point, length_m, health) in
        izip!(&points[1..], &path.segment_lengths, &path.segment_healths)
    {
        elapsed_ms += leg_ms(edge_weight(*length_m, *health), speed_mps);
        waypoints.push(Waypoint {
            location: *next_point,
            arrival: arrival_at(depart_at, elapsed_ms)?,
        });
    }

    if let Some(destination) = options.actual_end {
        let last = points[connector_count - 1];
        elapsed_ms += leg_ms(equirectangular_distance_meters(last, destination), speed_mps);
        waypoints.push(Waypoint {
            location: destination,
            arrival: arrival_at(depart_at, elapsed_ms)?,
        });
    }

    trace!(
        "trajectory: {} waypoints over {:.1} s",
        waypoints.len(),
        elapsed_ms / 1000.0
    );
    Ok(waypoints)
}

fn leg_ms(effective_meters: f64, speed_mps: f64) -> f64 {
    effective_meters / speed_mps * 1000.0
}

fn arrival_at(depart_at: DateTime<Utc>, elapsed_ms: f64) -> Result<DateTime<Utc>, Error> {
    depart_at
        .checked_add_signed(TimeDelta::milliseconds(elapsed_ms.round() as i64))
        .ok_or_else(|| {
            Error::InvalidData("waypoint arrival overflows the representable time range".to_owned())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::find_path;

    fn depart() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    /// 200 m two-segment path with configurable health on both segments.
    fn network_and_path(health: f64) -> (RoadNetwork, PathResult) {
        let mut network = RoadNetwork::new();
        network.add_connector("c1", Point::new(0.0, 0.0)).unwrap();
        network.add_connector("c2", Point::new(0.0009, 0.0)).unwrap();
        network.add_connector("c3", Point::new(0.0018, 0.0)).unwrap();
        network.add_segment("s1", "c1", "c2", 100.0, health).unwrap();
        network.add_segment("s2", "c2", "c3", 100.0, health).unwrap();
        let path = find_path(&network, "c1", "c3").unwrap();
        (network, path)
    }

    #[test]
    fn full_health_trajectory_duration_matches_distance_over_speed() {
        let (network, path) = network_and_path(100.0);
        let waypoints =
            build_waypoints(&path, &network, depart(), 10.0, &TrajectoryOptions::default())
                .unwrap();

        assert_eq!(waypoints.len(), 3);
        assert_eq!(waypoints[0].arrival, depart());
        let total = waypoints[2].arrival - waypoints[0].arrival;
        assert_eq!(total.num_seconds(), 20);
    }

    #[test]
    fn half_health_doubles_trajectory_duration() {
        let (network, path) = network_and_path(50.0);
        let waypoints =
            build_waypoints(&path, &network, depart(), 10.0, &TrajectoryOptions::default())
                .unwrap();

        let total = waypoints[2].arrival - waypoints[0].arrival;
        assert_eq!(total.num_seconds(), 40);
    }

    #[test]
    fn timestamps_never_decrease() {
        let (network, path) = network_and_path(73.0);
        let waypoints =
            build_waypoints(&path, &network, depart(), 7.5, &TrajectoryOptions::default())
                .unwrap();
        for pair in waypoints.windows(2) {
            assert!(pair[1].arrival >= pair[0].arrival);
        }
    }

    #[test]
    fn off_graph_legs_extend_the_trajectory() {
        let (network, path) = network_and_path(100.0);
        let road_only =
            build_waypoints(&path, &network, depart(), 10.0, &TrajectoryOptions::default())
                .unwrap();

        let options = TrajectoryOptions {
            actual_start: Some(Point::new(-0.0005, 0.0)),
            actual_end: Some(Point::new(0.0023, 0.0)),
        };
        let extended = build_waypoints(&path, &network, depart(), 10.0, &options).unwrap();

        assert_eq!(extended.len(), road_only.len() + 2);
        assert_eq!(extended[0].location, Point::new(-0.0005, 0.0));
        assert_eq!(extended[0].arrival, depart());
        assert_eq!(
            extended.last().unwrap().location,
            Point::new(0.0023, 0.0)
        );
        assert!(extended.last().unwrap().arrival > road_only.last().unwrap().arrival);
    }

    #[test]
    fn degenerate_path_still_gets_off_graph_legs() {
        let (network, _) = network_and_path(100.0);
        let path = find_path(&network, "c2", "c2").unwrap();

        let options = TrajectoryOptions {
            actual_start: Some(Point::new(0.0008, 0.0)),
            actual_end: None,
        };
        let waypoints = build_waypoints(&path, &network, depart(), 10.0, &options).unwrap();

        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints[0].arrival, depart());
        assert!(waypoints[1].arrival > waypoints[0].arrival);
    }

    #[test]
    fn rejects_non_positive_speed() {
        let (network, path) = network_and_path(100.0);
        let result =
            build_waypoints(&path, &network, depart(), 0.0, &TrajectoryOptions::default());
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn rejects_path_from_a_different_network() {
        let (_, path) = network_and_path(100.0);
        let other = RoadNetwork::new();
        let result =
            build_waypoints(&path, &other, depart(), 10.0, &TrajectoryOptions::default());
        assert!(matches!(result, Err(Error::UnknownConnector(_))));
    }
}
