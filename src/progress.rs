//! Progress reporting for the graph traversal
//!
//! Provides real-time progress display using indicatif progress bars.
//!
//! stdout is reserved for the machine-readable sum, so the spinner,
//! header and summary all write to stderr.

use crate::walker::{TraversalProgress, TraversalResult};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter that displays traversal status
///
/// Clones share the underlying bar, so one clone can feed updates
/// from the reporter thread while another finishes the display.
#[derive(Clone)]
pub struct ProgressReporter {
    /// Progress bar (draws to stderr)
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update the progress display
    pub fn update(&self, progress: &TraversalProgress) {
        let msg = format!(
            "Visited: {}/{} | Rate: {:.0}/s | Queue: {} | Duplicates: {}",
            format_number(progress.visited),
            format_number(progress.total_nodes as u64),
            progress.nodes_per_second(),
            progress.queue_len,
            format_number(progress.duplicates),
        );

        self.bar.set_message(msg);
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Print a summary of the traversal results
pub fn print_summary(result: &TraversalResult) {
    let duration_secs = result.duration.as_secs_f64();
    let rate = if duration_secs > 0.0 {
        result.nodes_visited as f64 / duration_secs
    } else {
        0.0
    };

    eprintln!();
    eprintln!("{}", style("Traversal Complete").green().bold());
    eprintln!("{}", style("─".repeat(50)).dim());
    eprintln!("  {} {}", style("Sum:").bold(), result.sum);
    eprintln!(
        "  {} {} of {} nodes",
        style("Visited:").bold(),
        format_number(result.nodes_visited),
        format_number(result.node_count as u64)
    );
    eprintln!(
        "  {} {}",
        style("Duplicates:").bold(),
        format_number(result.duplicate_visits)
    );
    eprintln!(
        "  {} {:.2}s ({:.0} nodes/sec)",
        style("Duration:").bold(),
        duration_secs,
        rate
    );
    eprintln!("  {} {}", style("Workers:").bold(), result.workers);
    eprintln!();
}

/// Print a header at the start of the traversal
pub fn print_header(input: &str, workers: usize, root: u32) {
    eprintln!();
    eprintln!(
        "{} {}",
        style("graph-walker").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("{}", style("─".repeat(50)).dim());
    eprintln!("  {} {}", style("Input:").bold(), input);
    eprintln!("  {} {}", style("Workers:").bold(), workers);
    eprintln!("  {} {}", style("Root:").bold(), root);
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }
}
