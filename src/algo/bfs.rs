//! BFS entry points
//!
//! Checks preconditions, then delegates to the direction-optimizing kernel in
//! `frontier-rank-algorithms`.

use crate::error::{KernelError, KernelResult};
use frontier_rank_algorithms::{bfs_with_policy, BfsStats, DirectionPolicy, GraphView, VertexId};
use tracing::warn;

/// Output slice and root must fit the graph
pub(crate) fn check_bfs_args(view: &GraphView, root: VertexId, out_len: usize) -> KernelResult<()> {
    if out_len != view.node_count {
        return Err(KernelError::LengthMismatch {
            expected: view.node_count,
            actual: out_len,
        });
    }
    if view.node_count > 0 && root >= view.node_count {
        return Err(KernelError::RootOutOfRange {
            root,
            node_count: view.node_count,
        });
    }
    Ok(())
}

/// Run BFS once the arguments have been checked
pub(crate) fn run_checked(
    view: &GraphView,
    root: VertexId,
    policy: &dyn DirectionPolicy,
    distances: &mut [i32],
) -> BfsStats {
    let stats = bfs_with_policy(view, root, policy, distances);
    if view.node_count > 0 && stats.reached < view.node_count {
        warn!(
            reached = stats.reached,
            nodes = view.node_count,
            "BFS left {} vertices unreachable from root {}",
            view.node_count - stats.reached,
            root
        );
    }
    stats
}
