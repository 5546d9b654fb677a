//! Road network components - connectors and segment edges

use geo::Point;

use crate::{ConnectorId, SegmentId, cost};

/// Road graph node (a junction on the road network)
#[derive(Debug, Clone)]
pub struct Connector {
    /// Stable identifier supplied by the caller
    pub id: ConnectorId,
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Road graph edge (one directed traversal of a physical segment)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Identifier of the physical segment this edge traverses
    pub segment_id: SegmentId,
    /// Physical length in meters
    pub length_m: f64,
    /// Road condition in [0, 100], 100 = pristine
    pub health: f64,
}

impl RoadEdge {
    /// Health-weighted traversal cost in meters
    pub fn weighted_length(&self) -> f64 {
        cost::edge_weight(self.length_m, self.health)
    }
}
