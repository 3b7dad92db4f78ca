//! Configuration types for graph-walker
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Parallel reachable-sum over a directed graph
#[derive(Parser, Debug, Clone)]
#[command(
    name = "graph-walker",
    version,
    about = "Sum the values of all nodes reachable from a root node",
    long_about = "Loads a directed graph from a text file and sums the values of every \
                  node reachable from the root, using a fixed pool of worker threads \
                  that discover and enqueue nodes concurrently.\n\n\
                  The sum is written to stdout; logs, progress and the summary go to \
                  stderr.",
    after_help = "EXAMPLES:\n    \
        graph-walker graph.txt\n    \
        graph-walker graph.txt -w 8\n    \
        graph-walker graph.txt --root 3\n    \
        graph-walker graph.txt -q > sum.txt"
)]
pub struct CliArgs {
    /// Graph description file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Number of worker threads
    #[arg(
        short = 'w',
        long,
        default_value_t = default_workers(),
        value_name = "NUM"
    )]
    pub workers: usize,

    /// Node to start the traversal from
    #[arg(short = 'r', long, default_value = "0", value_name = "NODE")]
    pub root: u32,

    /// Quiet mode - suppress progress and summary on stderr
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (per-worker logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

fn default_workers() -> usize {
    // The traversal is CPU bound, so one worker per core
    num_cpus::get()
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct TraversalConfig {
    /// Graph input path
    pub input: PathBuf,

    /// Number of worker threads
    pub worker_count: usize,

    /// Node the traversal starts from
    pub root: u32,

    /// Show progress and summary on stderr
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl TraversalConfig {
    /// Create and validate configuration from CLI arguments
    ///
    /// The root index can only be checked against the graph once the
    /// file is loaded, so that validation happens in the coordinator.
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.workers == 0 || args.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.workers,
                max: MAX_WORKERS,
            });
        }

        Ok(Self {
            input: args.input,
            worker_count: args.workers,
            root: args.root,
            show_progress: !args.quiet,
            verbose: args.verbose,
        })
    }
}
