//! Directed graph model and text-format parser
//!
//! This module defines:
//! - The in-memory graph: per-node values plus adjacency lists
//! - A parser for the plain-text graph format
//!
//! The on-disk format is a whitespace-separated token stream:
//!
//! ```text
//! node_count edge_count
//! value_0 value_1 ... value_{n-1}
//! from_0 to_0
//! from_1 to_1
//! ...
//! ```
//!
//! Any whitespace (spaces, tabs, newlines) separates tokens, so the
//! line layout above is a convention rather than a requirement.

use crate::error::{GraphError, GraphResult};
use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

/// A directed graph with a signed integer value attached to each node
///
/// Nodes are identified by dense `u32` indices in `0..node_count`.
/// Edges are stored as per-node adjacency lists in input order;
/// self-loops and duplicate edges are kept as given.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Value carried by each node, indexed by node id
    values: Vec<i64>,

    /// Outgoing neighbors of each node, indexed by node id
    adjacency: Vec<Vec<u32>>,

    /// Total number of directed edges
    edge_count: usize,
}

impl Graph {
    /// Build a graph from explicit values and adjacency lists
    ///
    /// `values[i]` is the value of node `i` and `adjacency[i]` its
    /// outgoing neighbors. The two must cover the same nodes and every
    /// neighbor index must be in range; either violation is an error.
    pub fn new(values: Vec<i64>, adjacency: Vec<Vec<u32>>) -> GraphResult<Self> {
        if values.len() != adjacency.len() {
            return Err(GraphError::ShapeMismatch {
                values: values.len(),
                adjacency: adjacency.len(),
            });
        }

        let node_count = values.len();
        let mut edge_count = 0;
        for neighbors in &adjacency {
            for &to in neighbors {
                if to as usize >= node_count {
                    return Err(GraphError::EdgeOutOfRange {
                        edge: edge_count,
                        index: u64::from(to),
                        node_count,
                    });
                }
                edge_count += 1;
            }
        }

        Ok(Self {
            values,
            adjacency,
            edge_count,
        })
    }

    /// Load a graph from a file on disk
    pub fn from_file(path: &Path) -> GraphResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| GraphError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse a graph from its text representation
    ///
    /// The header declares how many node values and edge pairs follow.
    /// Edge endpoints are validated against the node count as they are
    /// read, and tokens past the declared edge list are rejected.
    pub fn parse(text: &str) -> GraphResult<Self> {
        let mut tokens = text.split_whitespace();

        let node_count = parse_header(&mut tokens, "node count")?;
        let edge_count = parse_header(&mut tokens, "edge count")?;

        if node_count > u64::from(u32::MAX) {
            return Err(GraphError::NodeCountTooLarge {
                node_count,
                max: u32::MAX,
            });
        }
        let node_count = node_count as usize;
        let edge_count = edge_count as usize;

        let mut values = Vec::with_capacity(node_count);
        for found in 0..node_count {
            let token = tokens.next().ok_or(GraphError::TruncatedValues {
                expected: node_count,
                found,
            })?;
            let value = token.parse::<i64>().map_err(|_| GraphError::InvalidToken {
                what: "node value",
                token: token.to_string(),
            })?;
            values.push(value);
        }

        let mut adjacency = vec![Vec::new(); node_count];
        for edge in 0..edge_count {
            let from = parse_endpoint(&mut tokens, edge, edge_count, node_count)?;
            let to = parse_endpoint(&mut tokens, edge, edge_count, node_count)?;
            adjacency[from as usize].push(to);
        }

        if let Some(token) = tokens.next() {
            return Err(GraphError::TrailingData {
                token: token.to_string(),
            });
        }

        Ok(Self {
            values,
            adjacency,
            edge_count,
        })
    }

    /// Number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.values.len()
    }

    /// Number of directed edges in the graph
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether `node` is a valid index into this graph
    pub fn contains(&self, node: u32) -> bool {
        (node as usize) < self.values.len()
    }

    /// Value attached to `node`
    ///
    /// Panics if `node` is out of range; node ids handed out by the
    /// parser and by `neighbors()` are always valid.
    pub fn value(&self, node: u32) -> i64 {
        self.values[node as usize]
    }

    /// Outgoing neighbors of `node`, in input order
    ///
    /// Panics if `node` is out of range.
    pub fn neighbors(&self, node: u32) -> &[u32] {
        &self.adjacency[node as usize]
    }
}

/// Parse one header integer, distinguishing a missing header from a bad token
fn parse_header(tokens: &mut SplitWhitespace<'_>, what: &'static str) -> GraphResult<u64> {
    let token = tokens.next().ok_or(GraphError::MissingHeader)?;
    token.parse::<u64>().map_err(|_| GraphError::InvalidToken {
        what,
        token: token.to_string(),
    })
}

/// Parse one edge endpoint and range-check it against the node count
fn parse_endpoint(
    tokens: &mut SplitWhitespace<'_>,
    edge: usize,
    edge_count: usize,
    node_count: usize,
) -> GraphResult<u32> {
    let token = tokens.next().ok_or(GraphError::TruncatedEdges {
        expected: edge_count,
        found: edge,
    })?;
    let index = token.parse::<u64>().map_err(|_| GraphError::InvalidToken {
        what: "edge endpoint",
        token: token.to_string(),
    })?;
    if index >= node_count as u64 {
        return Err(GraphError::EdgeOutOfRange {
            edge,
            index,
            node_count,
        });
    }
    Ok(index as u32)
}
