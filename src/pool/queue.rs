//! Synchronized task queue with in-flight tracking
//!
//! This module provides the unbounded FIFO queue that connects pool
//! workers. Workers are both producers and consumers: a task being
//! executed may enqueue further tasks. An empty queue therefore does
//! not mean the work is over, so the queue counts in-flight work
//! (queued plus currently executing) and exposes a barrier that waits
//! for that count to reach zero.
//!
//! Lifecycle:
//! - `send` enqueues in any state and never fails
//! - `recv` blocks until a task arrives or shutdown is signaled;
//!   remaining tasks are drained before `None` is returned
//! - `task_done` (via [`TaskGuard`]) retires a dequeued task
//! - `wait_idle` blocks until nothing is queued or executing
//! - `signal_shutdown` is idempotent and wakes all blocked receivers

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for the task queue
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total tasks enqueued
    pub enqueued: AtomicU64,

    /// Total tasks dequeued
    pub dequeued: AtomicU64,

    /// Total tasks retired after execution
    pub completed: AtomicU64,
}

impl QueueStats {
    /// Get total enqueued task count
    pub fn enqueued_count(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    /// Get total retired task count
    pub fn completed_count(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }
}

/// State protected by the queue lock
struct QueueInner<T> {
    /// Pending tasks in FIFO order
    tasks: VecDeque<T>,

    /// Tasks that are queued or currently executing
    in_flight: usize,

    /// Set once by `signal_shutdown`, never cleared
    shutdown: bool,
}

/// Unbounded FIFO task queue shared by all pool workers
pub struct TaskQueue<T> {
    inner: Mutex<QueueInner<T>>,

    /// Signaled when a task is enqueued or shutdown begins
    not_empty: Condvar,

    /// Signaled when the in-flight count drops to zero
    idle: Condvar,

    stats: QueueStats,
}

impl<T> TaskQueue<T> {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(QueueInner {
                tasks: VecDeque::new(),
                in_flight: 0,
                shutdown: false,
            }),
            not_empty: Condvar::new(),
            idle: Condvar::new(),
            stats: QueueStats::default(),
        }
    }

    /// Enqueue a task
    ///
    /// Valid in any state, including after shutdown: receivers drain
    /// the queue before observing the end of work. The task counts as
    /// in-flight from this point until its [`TaskGuard`] is dropped.
    pub fn send(&self, task: T) {
        let mut inner = self.inner.lock();
        inner.tasks.push_back(task);
        inner.in_flight += 1;
        self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
        self.not_empty.notify_one();
    }

    /// Dequeue the next task, blocking while the queue is empty
    ///
    /// Returns `None` only after shutdown has been signaled and every
    /// pending task has been handed out. Dequeueing does not retire
    /// the task; the caller holds a [`TaskGuard`] while executing it.
    pub fn recv(&self) -> Option<T> {
        let mut inner = self.inner.lock();
        loop {
            if let Some(task) = inner.tasks.pop_front() {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                return Some(task);
            }
            if inner.shutdown {
                return None;
            }
            self.not_empty.wait(&mut inner);
        }
    }

    /// Retire one dequeued task
    ///
    /// Called from [`TaskGuard::drop`], including during unwinding, so
    /// a panicking task cannot strand the in-flight count.
    fn task_done(&self) {
        let mut inner = self.inner.lock();
        debug_assert!(inner.in_flight > 0, "task_done without matching send");
        inner.in_flight -= 1;
        self.stats.completed.fetch_add(1, Ordering::Relaxed);
        if inner.in_flight == 0 {
            self.idle.notify_all();
        }
    }

    /// Block until no task is queued or executing
    ///
    /// Returns immediately if nothing was ever enqueued. This is the
    /// termination barrier: once it returns, no running task is left
    /// to produce more work, so the quiet state is permanent unless an
    /// outside party enqueues again.
    pub fn wait_idle(&self) {
        let mut inner = self.inner.lock();
        while inner.in_flight > 0 {
            self.idle.wait(&mut inner);
        }
    }

    /// Signal end of work and wake all blocked receivers
    ///
    /// Idempotent; repeated calls are no-ops. Tasks still queued at
    /// this point remain receivable.
    pub fn signal_shutdown(&self) {
        let mut inner = self.inner.lock();
        inner.shutdown = true;
        self.not_empty.notify_all();
    }

    /// Whether shutdown has been signaled
    pub fn is_shutdown(&self) -> bool {
        self.inner.lock().shutdown
    }

    /// Number of tasks waiting in the queue
    pub fn len(&self) -> usize {
        self.inner.lock().tasks.len()
    }

    /// Check if no tasks are waiting in the queue
    pub fn is_empty(&self) -> bool {
        self.inner.lock().tasks.is_empty()
    }

    /// Number of tasks queued or currently executing
    pub fn in_flight(&self) -> usize {
        self.inner.lock().in_flight
    }

    /// Get queue statistics
    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for enqueueing tasks, cloned into every worker and handler
pub struct TaskSender<T> {
    queue: Arc<TaskQueue<T>>,
}

impl<T> TaskSender<T> {
    /// Create a sender for the given queue
    pub fn new(queue: Arc<TaskQueue<T>>) -> Self {
        Self { queue }
    }

    /// Enqueue a task
    pub fn send(&self, task: T) {
        self.queue.send(task);
    }

    /// Number of tasks waiting in the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if no tasks are waiting in the queue
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// Manual impl: the handle is clonable regardless of whether T is
impl<T> Clone for TaskSender<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}

/// RAII guard that retires a dequeued task when dropped
///
/// The matching in-flight increment happened when the task was
/// enqueued. Dropping the guard after the task body runs keeps any
/// tasks the body enqueued visible to the barrier before this one
/// retires.
pub struct TaskGuard<'a, T> {
    queue: &'a TaskQueue<T>,
}

impl<'a, T> TaskGuard<'a, T> {
    /// Create a guard for one dequeued task
    pub fn new(queue: &'a TaskQueue<T>) -> Self {
        Self { queue }
    }
}

impl<T> Drop for TaskGuard<'_, T> {
    fn drop(&mut self) {
        self.queue.task_done();
    }
}
