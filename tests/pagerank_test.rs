use frontier_rank::algo::page_rank;
use frontier_rank::{run_pagerank, GraphView, KernelConfig, KernelError, Kernels, PageRankConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_graph(n: usize, avg_degree: usize, seed: u64) -> GraphView {
    let mut rng = StdRng::seed_from_u64(seed);
    let edges: Vec<(usize, usize)> = (0..n * avg_degree)
        .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
        .collect();
    GraphView::from_edges(n, &edges)
}

fn mass(scores: &[f64]) -> f64 {
    scores.iter().sum()
}

#[test]
fn test_two_node_sink_graph() {
    // A -> B with B a sink: the sink's mass is spread back over both vertices
    let view = GraphView::from_edges(2, &[(0, 1)]);
    let mut scores = vec![0.0; 2];
    let stats = run_pagerank(&view, &mut scores, 0.85, 1e-6).unwrap();

    assert!(stats.iterations > 1);
    let a = 0.5 / 1.425;
    assert!((scores[0] - a).abs() < 1e-5, "A = {}", scores[0]);
    assert!((scores[1] - (1.0 - a)).abs() < 1e-5, "B = {}", scores[1]);
    assert!((mass(&scores) - 1.0).abs() < 1e-12);
}

#[test]
fn test_directed_cycle_converges_to_uniform() {
    let n = 100;
    let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
    let view = GraphView::from_edges(n, &edges);
    let mut scores = vec![0.0; n];
    run_pagerank(&view, &mut scores, 0.85, 1e-10).unwrap();

    for s in &scores {
        assert!((s - 1.0 / n as f64).abs() < 1e-12);
    }
}

#[test]
fn test_mass_conserved_every_iteration() {
    // Vertex 3 is a sink; check the distribution after each of the first iterations
    let view = GraphView::from_edges(4, &[(0, 1), (0, 3), (1, 2), (2, 0), (2, 3)]);
    for cap in 1..=15 {
        let config = PageRankConfig {
            damping_factor: 0.85,
            tolerance: 1e-300,
            max_iterations: Some(cap),
        };
        let result = page_rank(&view, &config);
        assert_eq!(result.stats.iterations, cap);
        assert!((mass(&result.scores) - 1.0).abs() < 1e-12, "iteration {}", cap);
        assert!(result.scores.iter().all(|&s| s >= 0.0));
        assert!(result.stats.final_delta >= 0.0);
    }
}

#[test]
fn test_random_graphs_converge_for_any_damping() {
    for (seed, damping) in [0.0, 0.3, 0.5, 0.85, 0.99].into_iter().enumerate() {
        let view = random_graph(3_000, 3, seed as u64);
        let mut scores = vec![0.0; view.node_count];
        let stats = run_pagerank(&view, &mut scores, damping, 1e-9).unwrap();

        assert!(stats.final_delta < 1e-9);
        assert!((mass(&scores) - 1.0).abs() < 1e-9, "damping {}", damping);
    }
}

#[test]
fn test_result_independent_of_thread_count() {
    let view = random_graph(5_000, 5, 7);
    let mut single = vec![0.0; view.node_count];
    let mut many = vec![0.0; view.node_count];

    for (threads, out) in [(1, &mut single), (8, &mut many)] {
        let mut config = KernelConfig {
            threads: Some(threads),
            ..KernelConfig::default()
        };
        config.pagerank.tolerance = 1e-12;
        Kernels::new(config).unwrap().run_pagerank(&view, out).unwrap();
    }

    // Reduction order differs, so allow last-bit drift
    for (a, b) in single.iter().zip(&many) {
        assert!((a - b).abs() < 1e-10);
    }
}

#[test]
fn test_iteration_cap_reports_not_converged() {
    let view = random_graph(1_000, 2, 3);
    let mut config = KernelConfig::default();
    config.pagerank.tolerance = 1e-300;
    config.pagerank.max_iterations = Some(5);
    let kernels = Kernels::new(config).unwrap();

    let mut scores = vec![0.0; view.node_count];
    match kernels.run_pagerank(&view, &mut scores) {
        Err(KernelError::NotConverged { iterations, delta }) => {
            assert_eq!(iterations, 5);
            assert!(delta > 0.0);
        }
        other => panic!("expected NotConverged, got {:?}", other),
    }
    assert!(scores.iter().all(|&s| s == 0.0));
}

#[test]
fn test_invalid_parameters() {
    let view = GraphView::from_edges(3, &[(0, 1), (1, 2)]);
    let mut scores = vec![0.0; 3];

    assert!(matches!(
        run_pagerank(&view, &mut scores, 1.0, 1e-6),
        Err(KernelError::InvalidDamping(_))
    ));
    assert!(matches!(
        run_pagerank(&view, &mut scores, 0.85, -1.0),
        Err(KernelError::InvalidTolerance(_))
    ));
    assert!(matches!(
        run_pagerank(&view, &mut scores[..2], 0.85, 1e-6),
        Err(KernelError::LengthMismatch { expected: 3, actual: 2 })
    ));
}
