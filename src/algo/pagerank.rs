//! PageRank entry points

use crate::config::check_pagerank_params;
use crate::error::{KernelError, KernelResult};
use frontier_rank_algorithms::{page_rank, GraphView, PageRankConfig, PageRankStats};
use rayon::prelude::*;

pub(crate) fn check_pagerank_args(
    view: &GraphView,
    config: &PageRankConfig,
    out_len: usize,
) -> KernelResult<()> {
    if out_len != view.node_count {
        return Err(KernelError::LengthMismatch {
            expected: view.node_count,
            actual: out_len,
        });
    }
    check_pagerank_params(config.damping_factor, config.tolerance)
}

/// Iterate, then publish the scores only if the run converged.
pub(crate) fn run_checked(
    view: &GraphView,
    config: &PageRankConfig,
    scores: &mut [f64],
) -> KernelResult<PageRankStats> {
    let result = page_rank(view, config);
    if !result.stats.converged {
        return Err(KernelError::NotConverged {
            iterations: result.stats.iterations,
            delta: result.stats.final_delta,
        });
    }
    scores
        .par_iter_mut()
        .zip(result.scores.par_iter())
        .for_each(|(out, &s)| *out = s);
    Ok(result.stats)
}
