//! Parallel graph traversal
//!
//! This module implements the reachable-sum traversal on top of the
//! worker pool: visit tasks carry node ids, the visit handler sums
//! values and fans out to neighbors, and the coordinator seeds the
//! root and waits for the pool's completion barrier.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │   TraversalCoordinator   │
//!                 │  - seeds the root task   │
//!                 │  - waits for the barrier │
//!                 └────────────┬─────────────┘
//!                              │
//!                              ▼
//!                 ┌──────────────────────────┐
//!   VisitTask ───▶│        ThreadPool        │───▶ VisitTask
//!   (root)        │   workers run the visit  │     (neighbors)
//!                 │   handler per node       │
//!                 └────────────┬─────────────┘
//!                              │ state lock
//!                              ▼
//!                 ┌──────────────────────────┐
//!                 │    TraversalContext      │
//!                 │  visited flags + sum     │
//!                 └──────────────────────────┘
//! ```

pub mod coordinator;
pub mod visit;

pub use coordinator::{TraversalCoordinator, TraversalProgress, TraversalResult};
pub use visit::{process_node, TraversalContext, TraversalStats, VisitTask};
