//! Fixed-size worker pool over a shared task queue
//!
//! The pool owns one [`TaskQueue`] and a fixed set of worker threads
//! that all run the same typed handler. Workers are producers as well
//! as consumers, so completion cannot be read off an empty queue;
//! [`ThreadPool::wait_for_completion`] instead blocks on the queue's
//! in-flight barrier before shutting the workers down.
//!
//! # Architecture
//!
//! ```text
//!                  ┌───────────────────┐
//!   driver send ──▶│     TaskQueue     │◀── handler send
//!                  │  FIFO + in-flight │    (tasks spawn tasks)
//!                  └─────────┬─────────┘
//!                            │ recv
//!          ┌─────────────────┼─────────────────┐
//!          │                 │                 │
//!    ┌─────▼─────┐     ┌─────▼─────┐     ┌─────▼─────┐
//!    │  Worker 0 │     │  Worker 1 │ ... │  Worker N │
//!    │  handler  │     │  handler  │     │  handler  │
//!    └───────────┘     └───────────┘     └───────────┘
//! ```

pub mod queue;
pub mod worker;

pub use queue::{QueueStats, TaskGuard, TaskQueue, TaskSender};
pub use worker::{Worker, WorkerStats};

use crate::error::{PoolError, PoolResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fixed-size worker pool executing tasks of type `T`
///
/// The handler is fixed at construction for the pool's whole lifetime;
/// every worker runs the same one.
pub struct ThreadPool<T: Send + 'static> {
    /// Queue shared by all workers
    queue: Arc<TaskQueue<T>>,

    /// Worker threads, in spawn order
    workers: Vec<Worker>,

    /// Per-worker statistics, retained past the workers' join
    worker_stats: Vec<Arc<WorkerStats>>,
}

impl<T: Send + 'static> ThreadPool<T> {
    /// Create a pool with `worker_count` threads running `handler`
    ///
    /// Threads start immediately and block on the empty queue; tasks
    /// can be submitted the moment this returns. If a thread fails to
    /// spawn, the workers already running are shut down and joined
    /// before the error is returned.
    pub fn new<H>(worker_count: usize, handler: H) -> PoolResult<Self>
    where
        H: Fn(&TaskSender<T>, T) + Send + Sync + 'static,
    {
        let queue = Arc::new(TaskQueue::new());
        let handler = Arc::new(handler);

        let mut workers = Vec::with_capacity(worker_count);
        let mut worker_stats = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            let worker = match Worker::spawn(id, Arc::clone(&queue), Arc::clone(&handler)) {
                Ok(worker) => worker,
                Err(e) => {
                    shutdown_and_join(&queue, workers);
                    return Err(e);
                }
            };
            worker_stats.push(worker.stats_handle());
            workers.push(worker);
        }

        debug!(workers = worker_count, "Thread pool started");

        Ok(Self {
            queue,
            workers,
            worker_stats,
        })
    }

    /// Get a sender for submitting tasks to the pool
    pub fn sender(&self) -> TaskSender<T> {
        TaskSender::new(Arc::clone(&self.queue))
    }

    /// Number of worker threads the pool was started with
    pub fn worker_count(&self) -> usize {
        self.worker_stats.len()
    }

    /// Number of tasks waiting in the queue
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Shared queue handle, for progress reporting
    pub fn queue(&self) -> Arc<TaskQueue<T>> {
        Arc::clone(&self.queue)
    }

    /// Total tasks executed across all workers
    ///
    /// Stays readable after `wait_for_completion`, which is when the
    /// count is final.
    pub fn tasks_executed(&self) -> u64 {
        self.worker_stats.iter().map(|stats| stats.executed()).sum()
    }

    /// Wait until all work has finished, then shut the pool down
    ///
    /// Blocks on the idle barrier first: it only opens when no task is
    /// queued or executing, so no worker can be mid-enqueue when
    /// shutdown is signaled. Every worker is joined even if an earlier
    /// one failed; the first failure is returned.
    pub fn wait_for_completion(&mut self) -> PoolResult<()> {
        self.queue.wait_idle();
        match shutdown_and_join(&self.queue, std::mem::take(&mut self.workers)) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<T: Send + 'static> Drop for ThreadPool<T> {
    /// Shutdown path for pools dropped without `wait_for_completion`
    ///
    /// Join failures cannot be returned from here, so they are only
    /// logged.
    fn drop(&mut self) {
        shutdown_and_join(&self.queue, std::mem::take(&mut self.workers));
    }
}

/// Signal shutdown and join `workers`, returning the first failure
///
/// Exiting workers drain whatever is still queued before they see the
/// end of work. Shared by `wait_for_completion`, `Drop`, and the abort
/// path of `ThreadPool::new`.
fn shutdown_and_join<T>(queue: &TaskQueue<T>, workers: Vec<Worker>) -> Option<PoolError> {
    queue.signal_shutdown();

    let mut first_error = None;
    for worker in workers {
        if let Err(e) = worker.join() {
            warn!(error = %e, "Worker failed to join cleanly");
            first_error.get_or_insert(e);
        }
    }
    first_error
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_pool_executes_submitted_tasks() {
        let executed = Arc::new(AtomicU64::new(0));
        let handler = {
            let executed = Arc::clone(&executed);
            move |_tx: &TaskSender<u64>, task: u64| {
                executed.fetch_add(task, Ordering::Relaxed);
            }
        };

        let mut pool = ThreadPool::new(4, handler).unwrap();
        assert_eq!(pool.worker_count(), 4);

        let sender = pool.sender();
        for task in 1..=100 {
            sender.send(task);
        }

        pool.wait_for_completion().unwrap();
        assert_eq!(executed.load(Ordering::Relaxed), (1..=100).sum::<u64>());
        assert_eq!(pool.tasks_executed(), 100);
    }

    #[test]
    fn test_pool_tasks_spawn_tasks() {
        // Each task at depth < 3 spawns two children, a 15-task tree
        let executed = Arc::new(AtomicU64::new(0));
        let handler = {
            let executed = Arc::clone(&executed);
            move |tx: &TaskSender<u32>, depth: u32| {
                executed.fetch_add(1, Ordering::Relaxed);
                if depth < 3 {
                    tx.send(depth + 1);
                    tx.send(depth + 1);
                }
            }
        };

        let mut pool = ThreadPool::new(4, handler).unwrap();
        pool.sender().send(0);
        pool.wait_for_completion().unwrap();

        assert_eq!(executed.load(Ordering::Relaxed), 15);
    }

    #[test]
    fn test_pool_completes_with_no_tasks() {
        let handler = |_tx: &TaskSender<u32>, _task: u32| {};
        let mut pool = ThreadPool::new(2, handler).unwrap();
        pool.wait_for_completion().unwrap();
        assert_eq!(pool.tasks_executed(), 0);
    }

    #[test]
    fn test_pool_single_worker_runs_fifo() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let handler = {
            let order = Arc::clone(&order);
            move |_tx: &TaskSender<u32>, task: u32| {
                order.lock().push(task);
            }
        };

        let mut pool = ThreadPool::new(1, handler).unwrap();
        let sender = pool.sender();
        for task in 0..50 {
            sender.send(task);
        }
        pool.wait_for_completion().unwrap();

        assert_eq!(*order.lock(), (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_pool_drop_drains_queued_tasks() {
        let executed = Arc::new(AtomicU64::new(0));
        let handler = {
            let executed = Arc::clone(&executed);
            move |_tx: &TaskSender<u32>, _task: u32| {
                executed.fetch_add(1, Ordering::Relaxed);
            }
        };

        let pool = ThreadPool::new(2, handler).unwrap();
        let sender = pool.sender();
        for task in 0..100 {
            sender.send(task);
        }
        drop(pool);

        // Exiting workers receive everything queued before the end
        assert_eq!(executed.load(Ordering::Relaxed), 100);
    }

    #[test]
    fn test_pool_reports_worker_panic() {
        let handler = |_tx: &TaskSender<u32>, task: u32| {
            if task == 13 {
                panic!("boom");
            }
        };

        let mut pool = ThreadPool::new(2, handler).unwrap();
        let sender = pool.sender();
        for task in 0..20 {
            sender.send(task);
        }

        let err = pool.wait_for_completion().unwrap_err();
        assert!(matches!(err, PoolError::WorkerPanicked { .. }));
    }

    #[test]
    fn test_pool_stats_survive_completion() {
        let handler = |_tx: &TaskSender<u32>, _task: u32| {};
        let mut pool = ThreadPool::new(3, handler).unwrap();
        let sender = pool.sender();
        for task in 0..10 {
            sender.send(task);
        }
        pool.wait_for_completion().unwrap();

        // Joining the workers must not discard their counters
        assert_eq!(pool.tasks_executed(), 10);
        assert_eq!(pool.worker_count(), 3);
    }

    #[test]
    fn test_shutdown_and_join_releases_parked_workers() {
        // Workers parked on an empty queue, as after an aborted start
        let queue = Arc::new(TaskQueue::new());
        let handler = Arc::new(|_tx: &TaskSender<u32>, _task: u32| {});
        let workers: Vec<Worker> = (0..3)
            .map(|id| Worker::spawn(id, Arc::clone(&queue), Arc::clone(&handler)).unwrap())
            .collect();

        assert!(shutdown_and_join(&queue, workers).is_none());
        assert!(queue.is_shutdown());
    }
}
