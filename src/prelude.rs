// Re-export key components
pub use crate::cost::{edge_weight, haversine_distance_meters, health_slowdown_multiplier};
pub use crate::error::Error;
pub use crate::model::{Connector, RoadEdge, RoadNetwork};
pub use crate::routing::{
    PathResult, find_path, find_path_bounded, weighted_distance_matrix, weighted_reach,
};
pub use crate::trajectory::{
    TrajectoryOptions, Waypoint, build_waypoints, trajectory_to_geojson,
    trajectory_to_geojson_string,
};
pub use crate::trend::{TrendBuffer, TrendSample};

// Core identifier types and tuning constants
pub use crate::{ConnectorId, SegmentId};
pub use crate::{DEFAULT_SNAP_RADIUS_M, DEFAULT_SPEED_MPS, DEGRADED_HEALTH_THRESHOLD};
