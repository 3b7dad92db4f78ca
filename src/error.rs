//! Error types for graph-walker
//!
//! This module defines the error hierarchy:
//! - Graph file parsing errors
//! - Configuration and CLI errors
//! - Worker pool errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors should be actionable - include context about what went wrong
//! - Preserve error chains for debugging
//!
//! There are exactly two error classes in this program: fatal errors that
//! abort the whole run (everything below), and the expected already-visited
//! no-op inside the traversal, which is not an error at all and never
//! surfaces here.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the graph-walker application
#[derive(Error, Debug)]
pub enum WalkerError {
    /// Graph file errors
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker pool errors
    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reading or parsing a graph description file
#[derive(Error, Debug)]
pub enum GraphError {
    /// Failed to open or read the input file
    #[error("Failed to read graph file '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The node-count/edge-count header is missing or incomplete
    #[error("Missing graph header: expected 'node_count edge_count'")]
    MissingHeader,

    /// Node count too large for 32-bit node indices
    #[error("Node count {node_count} exceeds the supported maximum {max}")]
    NodeCountTooLarge { node_count: u64, max: u32 },

    /// A token could not be parsed as the expected integer type
    #[error("Invalid {what}: '{token}' is not a valid integer")]
    InvalidToken { what: &'static str, token: String },

    /// The file ended before all node values were read
    #[error("Truncated value list: expected {expected} node values, found {found}")]
    TruncatedValues { expected: usize, found: usize },

    /// The file ended before all edges were read
    #[error("Truncated edge list: expected {expected} edges, found {found}")]
    TruncatedEdges { expected: usize, found: usize },

    /// An edge endpoint references a node outside the graph
    #[error("Edge {edge} endpoint {index} out of range (graph has {node_count} nodes)")]
    EdgeOutOfRange {
        edge: usize,
        index: u64,
        node_count: usize,
    },

    /// Extra tokens after the declared edge list
    #[error("Trailing data after edge list, starting at '{token}'")]
    TrailingData { token: String },

    /// Values and adjacency lists disagree on the node count
    #[error("Shape mismatch: {values} node values but {adjacency} adjacency lists")]
    ShapeMismatch { values: usize, adjacency: usize },
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Root node does not exist in the loaded graph
    #[error("Root node {root} out of range (graph has {node_count} nodes)")]
    RootOutOfRange { root: u32, node_count: usize },
}

/// Worker pool errors
#[derive(Error, Debug)]
pub enum PoolError {
    /// Worker thread could not be spawned
    #[error("Failed to spawn worker {id}: {source}")]
    SpawnFailed {
        id: usize,
        #[source]
        source: std::io::Error,
    },

    /// Worker thread panicked while executing a task
    #[error("Worker {id} panicked")]
    WorkerPanicked { id: usize },
}

/// Result type alias for WalkerError
pub type Result<T> = std::result::Result<T, WalkerError>;

/// Result type alias for GraphError
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Result type alias for PoolError
pub type PoolResult<T> = std::result::Result<T, PoolError>;
