//! Health-weighted shortest-path search over the road network.

pub mod astar;
pub mod matrix;
mod state;

pub use astar::{PathResult, find_path, find_path_bounded};
pub use matrix::{weighted_distance_matrix, weighted_reach};
