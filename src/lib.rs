//! Health-weighted route planning for a simulated road network.
//!
//! The crate covers three cooperating pieces, leaves first:
//!
//! 1. [`cost`] - great-circle and planar distances, and the road-health
//!    slowdown model that turns physical segment length into traversal cost.
//! 2. [`routing`] - A* shortest-path search over a directed graph of
//!    connectors and road segments, weighted by [`cost::edge_weight`], plus
//!    one-to-many reachability used for dispatch decisions.
//! 3. [`trajectory`] - conversion of a found path into a time-stamped
//!    waypoint sequence for constant-speed interpolation by a renderer.
//!
//! Data flows one way: the caller builds a [`model::RoadNetwork`] from the
//! current simulation snapshot, [`routing::find_path`] returns a
//! [`routing::PathResult`] with per-segment metadata, and
//! [`trajectory::build_waypoints`] turns it into a timed trajectory. The
//! module holds no state across calls.

pub mod cost;
pub mod error;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod trajectory;
pub mod trend;

pub use error::Error;
pub use model::RoadNetwork;
pub use routing::{PathResult, find_path};
pub use trajectory::{Waypoint, build_waypoints};

/// Stable opaque identifier of a road-network junction.
pub type ConnectorId = String;

/// Stable opaque identifier of a physical road segment.
pub type SegmentId = String;

/// Health below this value flags a segment as degraded in the simulation.
/// Degraded segments share a single 2x cost ceiling; healthier segments are
/// penalized proportionally up to 3x.
pub const DEGRADED_HEALTH_THRESHOLD: f64 = 50.0;

/// Default snap radius for [`RoadNetwork::nearest_connector`]. Covers a
/// radius-1 neighborhood of the roughly 3.5 km hexagonal cells the calling
/// system partitions road data into.
pub const DEFAULT_SNAP_RADIUS_M: f64 = 2000.0;

/// Default agent travel speed in meters per second.
pub const DEFAULT_SPEED_MPS: f64 = 10.0;
