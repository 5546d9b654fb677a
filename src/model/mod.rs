//! Road network model consumed by the planner.

pub mod components;
pub mod network;

pub use components::{Connector, RoadEdge};
pub use network::RoadNetwork;
