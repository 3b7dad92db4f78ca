//! Benchmarks for graph-walker
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_queue_operations(c: &mut Criterion) {
    use graph_walker::pool::{TaskGuard, TaskQueue};

    c.bench_function("queue_send_recv", |b| {
        let queue = TaskQueue::new();

        b.iter(|| {
            queue.send(black_box(42u32));
            let task = queue.recv().unwrap();
            let _guard = TaskGuard::new(&queue);
            black_box(task);
        })
    });
}

fn benchmark_graph_parse(c: &mut Criterion) {
    use graph_walker::graph::Graph;

    let text = synthetic_graph_text(1000, 3000);

    c.bench_function("graph_parse_1k_nodes", |b| {
        b.iter(|| {
            let graph = Graph::parse(black_box(&text)).unwrap();
            black_box(graph);
        })
    });
}

fn benchmark_traversal(c: &mut Criterion) {
    use graph_walker::config::TraversalConfig;
    use graph_walker::graph::Graph;
    use graph_walker::walker::TraversalCoordinator;
    use std::path::PathBuf;

    let graph = Graph::parse(&synthetic_graph_text(1000, 3000)).unwrap();

    c.bench_function("traversal_1k_nodes_4_workers", |b| {
        b.iter(|| {
            let config = TraversalConfig {
                input: PathBuf::from("bench"),
                worker_count: 4,
                root: 0,
                show_progress: false,
                verbose: false,
            };
            let coordinator = TraversalCoordinator::new(config, graph.clone()).unwrap();
            black_box(coordinator.run().unwrap());
        })
    });
}

/// Build a reproducible random graph in the text format
fn synthetic_graph_text(nodes: usize, edges: usize) -> String {
    let mut state = 0x2545F4914F6CDD1Du64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut text = format!("{} {}\n", nodes, edges);
    for _ in 0..nodes {
        text.push_str(&format!("{} ", next() % 1000));
    }
    text.push('\n');
    for _ in 0..edges {
        text.push_str(&format!(
            "{} {}\n",
            next() % nodes as u64,
            next() % nodes as u64
        ));
    }
    text
}

criterion_group!(
    benches,
    benchmark_queue_operations,
    benchmark_graph_parse,
    benchmark_traversal
);
criterion_main!(benches);
