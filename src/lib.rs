//! Frontier Rank
//!
//! Parallel BFS and PageRank over a static, read-only CSR graph.
//!
//! # Architecture
//!
//! - `frontier-rank-algorithms`: the kernels. Direction-optimizing BFS with
//!   a lock-free frontier, and PageRank with dangling-mass redistribution,
//!   both as rayon fork-join loops.
//! - this crate: checked entry points. Output lengths, parameters and CSR
//!   bounds are validated before any caller-owned array is written.
//!
//! ## Example Usage
//!
//! ```rust
//! use frontier_rank::{run_bfs, run_pagerank, GraphView};
//!
//! // Hub 0 points at three leaves
//! let graph = GraphView::from_edges(4, &[(0, 1), (0, 2), (0, 3)]);
//!
//! let mut distances = vec![0; graph.node_count];
//! run_bfs(&graph, &mut distances).unwrap();
//! assert_eq!(distances, vec![0, 1, 1, 1]);
//!
//! let mut scores = vec![0.0; graph.node_count];
//! run_pagerank(&graph, &mut scores, 0.85, 1e-7).unwrap();
//! assert!((scores.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod error;
pub mod logging;

// Re-export main types for convenience
pub use algo::{run_bfs, run_pagerank, validate_structure, Kernels};

pub use config::{BfsSettings, BfsStrategy, HybridPolicy, KernelConfig, PageRankSettings};

pub use error::{GraphStructureError, KernelError, KernelResult};

pub use frontier_rank_algorithms::{
    BfsStats, Direction, DirectionPolicy, GraphView, LevelContext, PageRankConfig,
    PageRankStats, VertexId, NOT_VISITED,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
