//! graph-walker - parallel reachable-sum over directed graphs
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use graph_walker::config::{CliArgs, TraversalConfig};
use graph_walker::graph::Graph;
use graph_walker::progress::{print_header, print_summary, ProgressReporter};
use graph_walker::walker::TraversalCoordinator;
use std::io::Write;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = TraversalConfig::from_args(args).context("Invalid configuration")?;

    // Print header
    if config.show_progress {
        print_header(
            &config.input.display().to_string(),
            config.worker_count,
            config.root,
        );
    }

    // Create progress reporter
    let progress = if config.show_progress {
        Some(ProgressReporter::new())
    } else {
        None
    };

    if let Some(ref p) = progress {
        p.set_status("Loading graph...");
    }

    // Load the graph
    let graph = Graph::from_file(&config.input).context("Failed to load graph")?;

    // Create coordinator (validates the root against the graph)
    let coordinator =
        TraversalCoordinator::new(config.clone(), graph).context("Failed to initialize traversal")?;

    // Run the traversal, feeding the reporter if one is attached
    let result = match progress {
        Some(reporter) => {
            let updater = reporter.clone();
            let result = coordinator
                .run_with_progress(move |snapshot| updater.update(&snapshot))
                .context("Traversal failed")?;
            reporter.finish_and_clear();
            result
        }
        None => coordinator.run().context("Traversal failed")?,
    };

    // Print summary
    if config.show_progress {
        print_summary(&result);
    }

    // The sum is the program's result: exactly the decimal value on
    // stdout, no trailing newline
    print!("{}", result.sum);
    std::io::stdout()
        .flush()
        .context("Failed to write result to stdout")?;

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("graph_walker=debug,warn")
    } else {
        EnvFilter::new("graph_walker=info,warn")
    };

    // stdout carries the result, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
