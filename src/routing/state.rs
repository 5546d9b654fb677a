use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

/// Frontier entry shared by the A* and Dijkstra searches. For Dijkstra the
/// estimate `f` equals the accumulated cost `g`.
#[derive(Copy, Clone)]
pub(super) struct State {
    pub(super) f: f64,
    pub(super) g: f64,
    pub(super) node: NodeIndex,
}

// Min-heap by f (reversed from standard Rust BinaryHeap). Ties break on
// lowest g, then lowest node index (insertion order), so pop order is
// reproducible across platforms.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.g.total_cmp(&self.g))
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}
