//! PageRank algorithm implementation
//!
//! Iterates the damped random-surfer update until the L1 distance between
//! successive score vectors falls below the tolerance. Mass sitting on
//! dangling vertices is spread uniformly, so the scores stay a probability
//! distribution after every iteration.

use super::common::GraphView;
use rayon::prelude::*;
use tracing::{debug, trace};

/// PageRank configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Convergence threshold on the L1 difference between iterations
    pub tolerance: f64,
    /// Optional safety cap. `None` iterates until convergence.
    pub max_iterations: Option<usize>,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            tolerance: 1e-7,
            max_iterations: None,
        }
    }
}

/// Outcome of the iteration loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankStats {
    pub iterations: usize,
    pub converged: bool,
    /// L1 difference of the last iteration
    pub final_delta: f64,
}

/// Scores plus iteration summary
#[derive(Debug, Clone)]
pub struct PageRankResult {
    pub scores: Vec<f64>,
    pub stats: PageRankStats,
}

/// Calculate PageRank for the graph view
pub fn page_rank(view: &GraphView, config: &PageRankConfig) -> PageRankResult {
    let mut scores = vec![0.0; view.node_count];
    let stats = page_rank_into(view, config, &mut scores);
    PageRankResult { scores, stats }
}

/// Calculate PageRank into a caller-provided slice.
///
/// Iterates on internal buffers; `solution` is only written once the loop
/// ends, converged or capped.
///
/// # Panics
///
/// If `solution.len() != view.node_count`.
pub fn page_rank_into(
    view: &GraphView,
    config: &PageRankConfig,
    solution: &mut [f64],
) -> PageRankStats {
    let n = view.node_count;
    assert_eq!(solution.len(), n, "solution length must equal node count");

    if n == 0 {
        return PageRankStats {
            iterations: 0,
            converged: true,
            final_delta: 0.0,
        };
    }

    let d = config.damping_factor;
    let nf = n as f64;
    let teleport = (1.0 - d) / nf;

    let mut scores = vec![1.0 / nf; n];
    let mut next_scores = vec![0.0; n];

    let mut iterations = 0;
    let mut delta = f64::INFINITY;
    let mut converged = false;

    loop {
        if config.max_iterations.is_some_and(|cap| iterations >= cap) {
            break;
        }
        iterations += 1;

        // Mass held by sinks, spread over every vertex
        let dangling: f64 = scores
            .par_iter()
            .enumerate()
            .filter(|&(j, _)| view.is_sink(j))
            .map(|(_, &s)| d * s / nf)
            .sum();

        // Reads only the previous iteration's scores
        next_scores.par_iter_mut().enumerate().for_each(|(i, next)| {
            let incoming: f64 = view
                .predecessors(i)
                .iter()
                .map(|&v| scores[v] / view.out_degree(v) as f64)
                .sum();
            *next = d * incoming + teleport + dangling;
        });

        delta = scores
            .par_iter()
            .zip(next_scores.par_iter())
            .map(|(old, new)| (new - old).abs())
            .sum();

        std::mem::swap(&mut scores, &mut next_scores);
        trace!(iteration = iterations, delta, dangling, "pagerank iteration");

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    solution.par_iter_mut().zip(scores.par_iter()).for_each(|(out, &s)| *out = s);

    debug!(iterations, converged, delta, nodes = n, "pagerank finished");
    PageRankStats {
        iterations,
        converged,
        final_delta: delta,
    }
}
