//! Worker thread logic for the task pool
//!
//! Each worker:
//! - Pulls tasks from the shared queue
//! - Holds a completion guard while the handler runs
//! - Repeats until the queue reports end of work
//!
//! Handlers receive a [`TaskSender`], so an executing task can push
//! follow-up tasks back into the same queue it was pulled from.

use crate::error::{PoolError, PoolResult};
use crate::pool::queue::{TaskGuard, TaskQueue, TaskSender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Statistics collected by a worker
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Tasks executed by this worker
    pub tasks_executed: AtomicU64,
}

impl WorkerStats {
    fn record_task(&self) {
        self.tasks_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the number of tasks this worker has executed
    pub fn executed(&self) -> u64 {
        self.tasks_executed.load(Ordering::Relaxed)
    }
}

/// A worker thread that executes tasks from the shared queue
pub struct Worker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<()>>,

    /// Worker statistics
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Spawn a new worker thread
    pub fn spawn<T, H>(id: usize, queue: Arc<TaskQueue<T>>, handler: Arc<H>) -> PoolResult<Self>
    where
        T: Send + 'static,
        H: Fn(&TaskSender<T>, T) + Send + Sync + 'static,
    {
        let stats = Arc::new(WorkerStats::default());
        let stats_clone = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name(format!("walker-{}", id))
            .spawn(move || worker_loop(id, queue, handler, stats_clone))
            .map_err(|source| PoolError::SpawnFailed { id, source })?;

        Ok(Self {
            id,
            handle: Some(handle),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Shared handle to this worker's statistics
    ///
    /// The handle stays readable after the worker has been joined.
    pub fn stats_handle(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Wait for the worker to finish
    ///
    /// Returns once the worker has observed end of work. A panic in a
    /// task handler surfaces here as `WorkerPanicked`.
    pub fn join(mut self) -> PoolResult<()> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| PoolError::WorkerPanicked { id: self.id }),
            None => Ok(()),
        }
    }
}

/// Main worker loop
///
/// The guard is created before the handler runs and dropped after it
/// returns, so tasks the handler enqueued are already counted when
/// this one retires. That ordering is what lets the idle barrier read
/// in-flight == 0 as "no task exists anywhere".
fn worker_loop<T, H>(id: usize, queue: Arc<TaskQueue<T>>, handler: Arc<H>, stats: Arc<WorkerStats>)
where
    T: Send + 'static,
    H: Fn(&TaskSender<T>, T) + Send + Sync + 'static,
{
    debug!(worker = id, "Worker starting");

    let sender = TaskSender::new(Arc::clone(&queue));

    while let Some(task) = queue.recv() {
        let _guard = TaskGuard::new(&queue);
        handler(&sender, task);
        stats.record_task();
    }

    debug!(
        worker = id,
        tasks = stats.tasks_executed.load(Ordering::Relaxed),
        "Worker shutting down"
    );
}
