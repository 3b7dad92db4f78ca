//! Traversal coordinator - orchestrates the parallel reachable-sum
//!
//! The coordinator is responsible for:
//! - Wiring the shared traversal context to a worker pool
//! - Seeding the pool with the root task
//! - Waiting out the completion barrier and shutting the pool down
//! - Progress reporting and final statistics

use crate::config::TraversalConfig;
use crate::error::{ConfigError, Result};
use crate::graph::Graph;
use crate::pool::{TaskSender, ThreadPool};
use crate::walker::visit::{process_node, TraversalContext, VisitTask};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Result of a completed traversal
#[derive(Debug)]
pub struct TraversalResult {
    /// Sum of values over nodes reachable from the root
    pub sum: i64,

    /// Nodes visited (each node at most once)
    pub nodes_visited: u64,

    /// Visit tasks that found their node already visited
    pub duplicate_visits: u64,

    /// Nodes in the graph, reachable or not
    pub node_count: usize,

    /// Worker threads used
    pub workers: usize,

    /// Time taken for the traversal
    pub duration: Duration,
}

/// Progress snapshot passed to the reporting callback
#[derive(Debug, Clone)]
pub struct TraversalProgress {
    /// Nodes visited so far
    pub visited: u64,

    /// Nodes in the graph
    pub total_nodes: usize,

    /// Duplicate visits so far
    pub duplicates: u64,

    /// Tasks currently waiting in the queue
    pub queue_len: usize,

    /// Time since the traversal started
    pub elapsed: Duration,
}

impl TraversalProgress {
    /// Visit rate in nodes per second
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.visited as f64 / secs
        } else {
            0.0
        }
    }
}

/// Coordinates the parallel traversal
#[derive(Debug)]
pub struct TraversalCoordinator {
    /// Configuration
    config: TraversalConfig,

    /// Shared graph and visitation state
    ctx: Arc<TraversalContext>,
}

impl TraversalCoordinator {
    /// Create a coordinator for `graph` under `config`
    ///
    /// Fails if the configured root is not a node of the graph.
    pub fn new(config: TraversalConfig, graph: Graph) -> Result<Self> {
        if !graph.contains(config.root) {
            return Err(ConfigError::RootOutOfRange {
                root: config.root,
                node_count: graph.node_count(),
            }
            .into());
        }

        Ok(Self {
            config,
            ctx: Arc::new(TraversalContext::new(graph)),
        })
    }

    /// Run the traversal to completion
    pub fn run(&self) -> Result<TraversalResult> {
        let start = Instant::now();
        let mut pool = self.build_pool()?;
        self.drive(&mut pool, start)
    }

    /// Run the traversal with a progress callback
    ///
    /// A reporter thread invokes the callback with a fresh snapshot
    /// every 100 ms until the traversal finishes. The callback fires
    /// at least once, even for traversals that finish instantly.
    pub fn run_with_progress<F>(&self, progress_callback: F) -> Result<TraversalResult>
    where
        F: Fn(TraversalProgress) + Send + 'static,
    {
        let start = Instant::now();
        let mut pool = self.build_pool()?;

        let queue = pool.queue();
        let done = Arc::new(AtomicBool::new(false));

        let reporter = {
            let ctx = Arc::clone(&self.ctx);
            let done = Arc::clone(&done);
            thread::spawn(move || loop {
                progress_callback(TraversalProgress {
                    visited: ctx.stats().visited_count(),
                    total_nodes: ctx.graph().node_count(),
                    duplicates: ctx.stats().duplicate_count(),
                    queue_len: queue.len(),
                    elapsed: start.elapsed(),
                });
                if done.load(Ordering::Relaxed) {
                    break;
                }
                thread::sleep(Duration::from_millis(100));
            })
        };

        let result = self.drive(&mut pool, start);

        done.store(true, Ordering::SeqCst);
        let _ = reporter.join();

        result
    }

    /// Spawn the worker pool with the visit handler bound to this
    /// coordinator's context
    fn build_pool(&self) -> Result<ThreadPool<VisitTask>> {
        info!(
            nodes = self.ctx.graph().node_count(),
            edges = self.ctx.graph().edge_count(),
            root = self.config.root,
            workers = self.config.worker_count,
            "Starting traversal"
        );

        let ctx = Arc::clone(&self.ctx);
        let pool = ThreadPool::new(
            self.config.worker_count,
            move |tasks: &TaskSender<VisitTask>, task: VisitTask| process_node(&ctx, tasks, task),
        )?;

        Ok(pool)
    }

    /// Seed the root task, wait for the barrier, collect the result
    fn drive(&self, pool: &mut ThreadPool<VisitTask>, start: Instant) -> Result<TraversalResult> {
        pool.sender().send(VisitTask::new(self.config.root));
        pool.wait_for_completion()?;

        let duration = start.elapsed();
        let result = TraversalResult {
            sum: self.ctx.sum(),
            nodes_visited: self.ctx.stats().visited_count(),
            duplicate_visits: self.ctx.stats().duplicate_count(),
            node_count: self.ctx.graph().node_count(),
            workers: self.config.worker_count,
            duration,
        };

        info!(
            sum = result.sum,
            visited = result.nodes_visited,
            duplicates = result.duplicate_visits,
            tasks = pool.tasks_executed(),
            duration_ms = duration.as_millis() as u64,
            "Traversal completed"
        );

        Ok(result)
    }
}
