//! graph-walker - Parallel Reachable-Sum over Directed Graphs
//!
//! A tool that loads a directed graph with integer-valued nodes from a
//! text file and computes the sum of the values of every node reachable
//! from a root node, using a fixed pool of worker threads.
//!
//! # Features
//!
//! - **Workers discover work**: visiting a node enqueues its unvisited
//!   neighbors, so the worker threads are producers as well as
//!   consumers of the shared task queue.
//!
//! - **Exact termination**: the queue tracks in-flight work (queued
//!   plus executing) and the pool blocks on that barrier, so an empty
//!   queue moment is never mistaken for a finished traversal.
//!
//! - **Exactly-once accounting**: visited flags and the running sum
//!   live under one lock, so each node contributes its value exactly
//!   once no matter how many edges lead to it.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     TraversalCoordinator                   │
//! │        seed root task  →  wait for idle barrier            │
//! └──────────────────────────────┬─────────────────────────────┘
//!                                │
//!                                ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │                        ThreadPool                          │
//! │   ┌─────────┐  ┌─────────┐  ┌─────────┐     ┌─────────┐    │
//! │   │Worker 0 │  │Worker 1 │  │Worker 2 │ ... │Worker N │    │
//! │   └────┬────┘  └────┬────┘  └────┬────┘     └────┬────┘    │
//! │        │            │            │               │         │
//! │        └────────────┴─────┬──────┴───────────────┘         │
//! │                           │ recv / send                    │
//! │                           ▼                                │
//! │              ┌──────────────────────────┐                  │
//! │              │        TaskQueue         │                  │
//! │              │  FIFO + in-flight count  │                  │
//! │              │  (mutex + condvars)      │                  │
//! │              └──────────────────────────┘                  │
//! └──────────────────────────────┬─────────────────────────────┘
//!                                │ one state lock
//!                                ▼
//!                 ┌──────────────────────────┐
//!                 │     TraversalContext     │
//!                 │  visited flags + sum     │
//!                 └──────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Sum everything reachable from node 0 of graph.txt
//! graph-walker graph.txt
//!
//! # Eight workers, traversal rooted at node 3, machine-readable output
//! graph-walker graph.txt -w 8 --root 3 -q
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod pool;
pub mod progress;
pub mod walker;

pub use config::{CliArgs, TraversalConfig};
pub use error::{Result, WalkerError};
pub use graph::Graph;
pub use pool::{TaskQueue, TaskSender, ThreadPool};
pub use walker::{TraversalCoordinator, TraversalProgress, TraversalResult, VisitTask};
