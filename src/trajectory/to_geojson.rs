use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::json;

use super::Waypoint;

/// Convert a trajectory to a `GeoJSON` `FeatureCollection` for map display:
/// one `LineString` for the whole route, then one `Point` per waypoint
/// carrying its arrival time as RFC 3339.
pub fn trajectory_to_geojson(waypoints: &[Waypoint]) -> FeatureCollection {
    let mut features = Vec::with_capacity(waypoints.len() + 1);

    if let (Some(first), Some(last)) = (waypoints.first(), waypoints.last()) {
        let line: LineString = waypoints
            .iter()
            .map(|waypoint| (waypoint.location.x(), waypoint.location.y()))
            .collect::<Vec<_>>()
            .into();

        let value = json!({
            "type": "Feature",
            "geometry": Geometry::new((&line).into()),
            "properties": {
                "leg_type": "route",
                "departure_time": first.arrival.to_rfc3339(),
                "arrival_time": last.arrival.to_rfc3339(),
            }
        });
        features.push(serde_json::from_value::<Feature>(value).unwrap());
    }

    for (index, waypoint) in waypoints.iter().enumerate() {
        let value = json!({
            "type": "Feature",
            "geometry": Geometry::new((&waypoint.location).into()),
            "properties": {
                "leg_type": "waypoint",
                "sequence": index,
                "arrival_time": waypoint.arrival.to_rfc3339(),
            }
        });
        features.push(serde_json::from_value::<Feature>(value).unwrap());
    }

    FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    }
}

pub fn trajectory_to_geojson_string(waypoints: &[Waypoint]) -> String {
    let collection = trajectory_to_geojson(waypoints);
    serde_json::to_string(&collection).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use geo::Point;

    fn sample_trajectory() -> Vec<Waypoint> {
        let depart = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        vec![
            Waypoint {
                location: Point::new(0.0, 0.0),
                arrival: depart,
            },
            Waypoint {
                location: Point::new(0.001, 0.0),
                arrival: depart + chrono::TimeDelta::seconds(11),
            },
            Waypoint {
                location: Point::new(0.002, 0.0),
                arrival: depart + chrono::TimeDelta::seconds(22),
            },
        ]
    }

    #[test]
    fn one_line_feature_plus_one_point_per_waypoint() {
        let collection = trajectory_to_geojson(&sample_trajectory());
        assert_eq!(collection.features.len(), 4);

        let route = &collection.features[0];
        assert!(matches!(
            route.geometry.as_ref().unwrap().value,
            geojson::Value::LineString { .. }
        ));
        let properties = route.properties.as_ref().unwrap();
        assert_eq!(properties["leg_type"], "route");
    }

    #[test]
    fn waypoint_features_carry_arrival_times() {
        let trajectory = sample_trajectory();
        let collection = trajectory_to_geojson(&trajectory);

        let last = collection.features.last().unwrap();
        let properties = last.properties.as_ref().unwrap();
        assert_eq!(
            properties["arrival_time"],
            trajectory[2].arrival.to_rfc3339()
        );
        assert_eq!(properties["sequence"], 2);
    }

    #[test]
    fn empty_trajectory_produces_no_features() {
        let collection = trajectory_to_geojson(&[]);
        assert!(collection.features.is_empty());
    }

    #[test]
    fn serializes_to_a_feature_collection_string() {
        let text = trajectory_to_geojson_string(&sample_trajectory());
        assert!(text.contains("\"FeatureCollection\""));
    }
}
