//! Directed road graph with connector-keyed lookup and spatial snapping.

use geo::Point;
use hashbrown::HashMap;
use petgraph::graph::{Graph, NodeIndex};

use crate::cost::equirectangular_distance_meters;
use crate::error::Error;
use crate::model::components::{Connector, RoadEdge};
use crate::{ConnectorId, SegmentId};

/// A directed road network: petgraph storage plus a connector-id index.
///
/// Built by the caller from the current simulation snapshot for each planning
/// pass; the planner never mutates it and keeps no state between calls.
/// Connector geometry lives on the node weight, so a single `&RoadNetwork`
/// stands in for the graph and the coordinate lookup together.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    pub(crate) graph: Graph<Connector, RoadEdge>,
    node_indices: HashMap<ConnectorId, NodeIndex>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a junction. Rejects non-finite coordinates and duplicate ids.
    pub fn add_connector(
        &mut self,
        id: impl Into<ConnectorId>,
        point: Point<f64>,
    ) -> Result<(), Error> {
        let id = id.into();
        if !point.x().is_finite() || !point.y().is_finite() {
            return Err(Error::InvalidData(format!(
                "non-finite coordinates for connector {id}"
            )));
        }
        if self.node_indices.contains_key(&id) {
            return Err(Error::InvalidData(format!("duplicate connector {id}")));
        }

        let index = self.graph.add_node(Connector {
            id: id.clone(),
            geometry: point,
        });
        self.node_indices.insert(id, index);
        Ok(())
    }

    /// Add one directed edge traversing a physical segment. Both endpoints
    /// must already be registered; length must be positive and health must
    /// lie in [0, 100].
    pub fn add_segment(
        &mut self,
        segment_id: impl Into<SegmentId>,
        from: &str,
        to: &str,
        length_m: f64,
        health: f64,
    ) -> Result<(), Error> {
        let segment_id = segment_id.into();
        if !(length_m.is_finite() && length_m > 0.0) {
            return Err(Error::InvalidData(format!(
                "segment {segment_id} has non-positive length {length_m}"
            )));
        }
        if !(health.is_finite() && (0.0..=100.0).contains(&health)) {
            return Err(Error::InvalidData(format!(
                "segment {segment_id} has health {health} outside [0, 100]"
            )));
        }

        let from_index = self.node_index(from).ok_or_else(|| Error::UnknownConnector(from.to_owned()))?;
        let to_index = self.node_index(to).ok_or_else(|| Error::UnknownConnector(to.to_owned()))?;

        self.graph.add_edge(
            from_index,
            to_index,
            RoadEdge {
                segment_id,
                length_m,
                health,
            },
        );
        Ok(())
    }

    /// Add both directed traversals of a bidirectional segment.
    pub fn add_segment_two_way(
        &mut self,
        segment_id: impl Into<SegmentId>,
        from: &str,
        to: &str,
        length_m: f64,
        health: f64,
    ) -> Result<(), Error> {
        let segment_id = segment_id.into();
        self.add_segment(segment_id.clone(), from, to, length_m, health)?;
        self.add_segment(segment_id, to, from, length_m, health)
    }

    pub fn connector_point(&self, id: &str) -> Option<Point<f64>> {
        self.node_index(id).map(|index| self.graph[index].geometry)
    }

    pub(crate) fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    pub fn connector_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn segment_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nearest connector to `point` within `max_distance_m`, with its planar
    /// distance in meters. Linear scan in insertion order; on exact distance
    /// ties the first candidate encountered wins.
    pub fn nearest_connector(
        &self,
        point: Point<f64>,
        max_distance_m: f64,
    ) -> Option<(&ConnectorId, f64)> {
        let mut best: Option<(&ConnectorId, f64)> = None;
        for connector in self.graph.node_weights() {
            let distance = equirectangular_distance_meters(connector.geometry, point);
            if distance > max_distance_m {
                continue;
            }
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((&connector.id, distance));
            }
        }
        best
    }
}
