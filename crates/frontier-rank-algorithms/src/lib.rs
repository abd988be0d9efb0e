//! Parallel graph kernels over a read-only CSR graph
//!
//! - [`bfs`]: direction-optimizing breadth-first search (top-down, bottom-up
//!   or a per-level hybrid chosen by a [`DirectionPolicy`])
//! - [`pagerank`]: PageRank iterated to convergence with dangling-mass
//!   redistribution
//!
//! All parallel work runs on the current rayon pool. Install a dedicated
//! pool with `ThreadPool::install` to bound the worker count.

pub mod common;
pub mod frontier;
pub mod bfs;
pub mod pagerank;

pub use common::{GraphView, VertexId};
pub use frontier::Frontier;
pub use bfs::{
    bfs, bfs_bottom_up, bfs_hybrid, bfs_top_down, bfs_with_policy, BfsResult, BfsStats,
    Direction, DirectionPolicy, EdgeRatio, FixedDirection, FrontierFraction, LevelContext,
    LevelTrace, DEFAULT_ROOT, NOT_VISITED,
};
pub use pagerank::{page_rank, page_rank_into, PageRankConfig, PageRankResult, PageRankStats};
