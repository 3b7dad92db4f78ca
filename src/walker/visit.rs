//! Node-visit task and shared traversal state
//!
//! The visit handler is what pool workers run: visit one node, add its
//! value to the running sum, and enqueue its unvisited neighbors. All
//! visit bookkeeping sits behind a single lock so that checking the
//! visited flag, marking it, updating the sum and fanning out form one
//! critical section; two tasks racing on the same node can never both
//! count it.

use crate::graph::Graph;
use crate::pool::TaskSender;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// A task to visit one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitTask {
    /// Node to visit
    pub node: u32,
}

impl VisitTask {
    /// Create a new visit task
    pub fn new(node: u32) -> Self {
        Self { node }
    }
}

/// Visitation state guarded by the traversal lock
#[derive(Debug)]
struct VisitState {
    /// One flag per node, indexed by node id
    visited: Vec<bool>,

    /// Running sum of visited node values
    sum: i64,
}

/// Statistics for a traversal
#[derive(Debug, Default)]
pub struct TraversalStats {
    /// Nodes marked visited (each node counts at most once)
    pub nodes_visited: AtomicU64,

    /// Tasks that found their node already visited
    pub duplicate_visits: AtomicU64,
}

impl TraversalStats {
    /// Nodes marked visited so far
    pub fn visited_count(&self) -> u64 {
        self.nodes_visited.load(Ordering::Relaxed)
    }

    /// Tasks that were no-ops because the node was already visited
    pub fn duplicate_count(&self) -> u64 {
        self.duplicate_visits.load(Ordering::Relaxed)
    }
}

/// Shared state for one traversal: the graph, the visit bookkeeping,
/// and counters for progress reporting
///
/// The state lock here is distinct from the queue's internal lock.
/// Nesting is one-directional: a visit holds the state lock while it
/// sends, never the other way around.
#[derive(Debug)]
pub struct TraversalContext {
    graph: Graph,
    state: Mutex<VisitState>,
    stats: TraversalStats,
}

impl TraversalContext {
    /// Create a context covering every node of `graph`, all unvisited
    pub fn new(graph: Graph) -> Self {
        let node_count = graph.node_count();
        Self {
            graph,
            state: Mutex::new(VisitState {
                visited: vec![false; node_count],
                sum: 0,
            }),
            stats: TraversalStats::default(),
        }
    }

    /// The graph being traversed
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Traversal statistics
    pub fn stats(&self) -> &TraversalStats {
        &self.stats
    }

    /// Current sum of visited node values
    pub fn sum(&self) -> i64 {
        self.state.lock().sum
    }
}

/// Visit one node: account its value and fan out to its neighbors
///
/// Neighbors already visited are not re-enqueued; neighbors enqueued
/// here may still be found visited by the time their task runs, which
/// the flag check turns into a counted no-op. Self-loops fall out the
/// same way: the node is already marked when its own edge is examined.
pub fn process_node(ctx: &TraversalContext, tasks: &TaskSender<VisitTask>, task: VisitTask) {
    let mut state = ctx.state.lock();

    if state.visited[task.node as usize] {
        ctx.stats.duplicate_visits.fetch_add(1, Ordering::Relaxed);
        trace!(node = task.node, "Node already visited");
        return;
    }

    state.visited[task.node as usize] = true;
    state.sum += ctx.graph.value(task.node);
    ctx.stats.nodes_visited.fetch_add(1, Ordering::Relaxed);
    trace!(
        node = task.node,
        value = ctx.graph.value(task.node),
        "Node visited"
    );

    for &neighbor in ctx.graph.neighbors(task.node) {
        if !state.visited[neighbor as usize] {
            tasks.send(VisitTask::new(neighbor));
        }
    }
}
