//! One-to-many reachability over health-weighted costs.
//!
//! The dispatch layer above the planner routinely asks "which of these
//! candidate sites is cheapest to reach" for crews and resource convoys;
//! answering with one Dijkstra sweep per origin beats running a full
//! point-to-point search per pair.

use std::collections::BinaryHeap;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use petgraph::visit::EdgeRef;
use rayon::prelude::*;

use super::state::State;
use crate::ConnectorId;
use crate::model::RoadNetwork;

/// Weighted distances from `start` to every reachable connector, optionally
/// cut off at `max_weighted_distance`. An unknown start yields an empty map;
/// the start itself is always present at distance zero otherwise.
pub fn weighted_reach(
    network: &RoadNetwork,
    start: &str,
    max_weighted_distance: Option<f64>,
) -> HashMap<ConnectorId, f64> {
    let Some(start_index) = network.node_index(start) else {
        return HashMap::new();
    };

    let mut distances = HashMap::new();
    let mut heap = BinaryHeap::new();

    heap.push(State {
        f: 0.0,
        g: 0.0,
        node: start_index,
    });
    distances.insert(start_index, 0.0);

    while let Some(State { g, node, .. }) = heap.pop() {
        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node) {
            if g > best {
                continue;
            }
        }

        // Do not expand past the cutoff
        if let Some(max) = max_weighted_distance {
            if g > max {
                continue;
            }
        }

        for edge in network.graph.edges(node) {
            let next = edge.target();
            let next_cost = g + edge.weight().weighted_length();

            match distances.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        f: next_cost,
                        g: next_cost,
                        node: next,
                    });
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            f: next_cost,
                            g: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    distances
        .into_iter()
        .filter(|(_, distance)| max_weighted_distance.is_none_or(|max| *distance <= max))
        .map(|(index, distance)| (network.graph[index].id.clone(), distance))
        .collect()
}

/// Weighted distance from every origin to every destination; `None` marks an
/// unreachable pair. Origins are swept in parallel.
pub fn weighted_distance_matrix(
    network: &RoadNetwork,
    origins: &[ConnectorId],
    destinations: &[ConnectorId],
) -> Vec<Vec<Option<f64>>> {
    origins
        .par_iter()
        .map(|origin| {
            let reach = weighted_reach(network, origin, None);
            destinations
                .iter()
                .map(|destination| reach.get(destination).copied())
                .collect()
        })
        .collect()
}
