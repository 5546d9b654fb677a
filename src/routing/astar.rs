//! A* search over the health-weighted road graph.

use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use geo::Point;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use log::debug;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;

use super::state::State;
use crate::cost::{HEURISTIC_SAFETY_FACTOR, equirectangular_distance_meters};
use crate::error::Error;
use crate::model::RoadNetwork;
use crate::{ConnectorId, SegmentId};

/// Shortest health-weighted path between two connectors.
///
/// The segment arrays run parallel to consecutive connector pairs, so
/// `segment_ids.len() == connector_ids.len() - 1`. The degenerate
/// start == end path has a single connector, empty segment arrays, and zero
/// totals.
#[derive(Debug, Clone, Serialize)]
pub struct PathResult {
    /// Connectors visited, start to end inclusive
    pub connector_ids: Vec<ConnectorId>,
    /// Physical segments traversed, one per connector pair
    pub segment_ids: Vec<SegmentId>,
    /// Health of each traversed segment at planning time
    pub segment_healths: Vec<f64>,
    /// Physical length of each traversed segment in meters
    pub segment_lengths: Vec<f64>,
    /// Sum of raw segment lengths in meters
    pub total_distance_m: f64,
    /// Sum of health-weighted segment costs; the quantity the search minimizes
    pub total_weighted_distance_m: f64,
}

impl PathResult {
    fn single(connector: ConnectorId) -> Self {
        Self {
            connector_ids: vec![connector],
            segment_ids: Vec::new(),
            segment_healths: Vec::new(),
            segment_lengths: Vec::new(),
            total_distance_m: 0.0,
            total_weighted_distance_m: 0.0,
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segment_ids.len()
    }
}

/// Find the cheapest path from `start` to `end` under the health-weighted
/// cost model.
///
/// `None` is a normal outcome, not an error: the endpoints lie in
/// disconnected components, or one of them is not a known connector.
pub fn find_path(network: &RoadNetwork, start: &str, end: &str) -> Option<PathResult> {
    match run_search(network, start, end, None) {
        Ok(path) => path,
        // Only the bounded variant can fail
        Err(_) => None,
    }
}

/// [`find_path`] with a budget on node expansions, for callers that need
/// bounded planning time on large networks. Exceeding the budget is an error
/// distinct from "no path exists".
pub fn find_path_bounded(
    network: &RoadNetwork,
    start: &str,
    end: &str,
    max_expansions: usize,
) -> Result<Option<PathResult>, Error> {
    run_search(network, start, end, Some(max_expansions))
}

fn run_search(
    network: &RoadNetwork,
    start: &str,
    end: &str,
    max_expansions: Option<usize>,
) -> Result<Option<PathResult>, Error> {
    if start == end {
        return Ok(Some(PathResult::single(start.to_owned())));
    }

    let (Some(start_index), Some(end_index)) = (network.node_index(start), network.node_index(end))
    else {
        debug!("route endpoints unknown: {start} or {end} not in network");
        return Ok(None);
    };

    let goal_point = network.graph[end_index].geometry;
    let heuristic = |point: Point<f64>| {
        equirectangular_distance_meters(point, goal_point) * HEURISTIC_SAFETY_FACTOR
    };

    // Estimate capacity based on graph size (adjust as needed)
    let estimated_nodes = network.graph.node_count().min(1000);
    let mut g_scores: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> =
        HashMap::with_capacity(estimated_nodes);
    let mut closed = FixedBitSet::with_capacity(network.graph.node_count());
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    heap.push(State {
        f: heuristic(network.graph[start_index].geometry),
        g: 0.0,
        node: start_index,
    });
    g_scores.insert(start_index, 0.0);

    let mut expanded = 0usize;
    while let Some(State { g, node, .. }) = heap.pop() {
        if node == end_index {
            let path = reconstruct(network, &predecessors, start_index, end_index);
            debug!(
                "route {start} -> {end}: {} connectors, {:.0} m weighted",
                path.connector_ids.len(),
                path.total_weighted_distance_m
            );
            return Ok(Some(path));
        }

        // Stale frontier entry for an already-expanded node
        if closed.contains(node.index()) {
            continue;
        }
        closed.insert(node.index());

        expanded += 1;
        if let Some(limit) = max_expansions {
            if expanded > limit {
                return Err(Error::SearchLimitExceeded { limit });
            }
        }

        for edge in network.graph.edges(node) {
            let next = edge.target();
            if closed.contains(next.index()) {
                continue;
            }
            let next_g = g + edge.weight().weighted_length();

            // Add or update distance if better using Entry API
            match g_scores.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_g);
                    predecessors.insert(next, (node, edge.id()));
                    heap.push(State {
                        f: next_g + heuristic(network.graph[next].geometry),
                        g: next_g,
                        node: next,
                    });
                }
                Entry::Occupied(mut entry) => {
                    if next_g < *entry.get() {
                        *entry.get_mut() = next_g;
                        predecessors.insert(next, (node, edge.id()));
                        heap.push(State {
                            f: next_g + heuristic(network.graph[next].geometry),
                            g: next_g,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    debug!("frontier exhausted after {expanded} expansions: no route {start} -> {end}");
    Ok(None)
}

/// Walk the predecessor chain from goal back to start and assemble the
/// start -> end connector and segment arrays.
fn reconstruct(
    network: &RoadNetwork,
    predecessors: &HashMap<NodeIndex, (NodeIndex, EdgeIndex)>,
    start: NodeIndex,
    end: NodeIndex,
) -> PathResult {
    let mut nodes = vec![end];
    let mut edges = Vec::new();

    let mut current = end;
    while current != start {
        if let Some(&(previous, via)) = predecessors.get(&current) {
            nodes.push(previous);
            edges.push(via);
            current = previous;
        } else {
            break;
        }
    }
    nodes.reverse();
    edges.reverse();

    let mut connector_ids = Vec::with_capacity(nodes.len());
    for index in &nodes {
        connector_ids.push(network.graph[*index].id.clone());
    }

    let mut segment_ids = Vec::with_capacity(edges.len());
    let mut segment_healths = Vec::with_capacity(edges.len());
    let mut segment_lengths = Vec::with_capacity(edges.len());
    let mut total_distance_m = 0.0;
    let mut total_weighted_distance_m = 0.0;

    for index in &edges {
        let edge = &network.graph[*index];
        total_distance_m += edge.length_m;
        total_weighted_distance_m += edge.weighted_length();
        segment_ids.push(edge.segment_id.clone());
        segment_healths.push(edge.health);
        segment_lengths.push(edge.length_m);
    }

    PathResult {
        connector_ids,
        segment_ids,
        segment_healths,
        segment_lengths,
        total_distance_m,
        total_weighted_distance_m,
    }
}
