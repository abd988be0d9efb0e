//! Graph kernel runner
//!
//! Kernels are implemented in the `frontier-rank-algorithms` crate.
//! This module provides the checked entry points: argument and CSR
//! validation, thread-pool selection and configuration.

pub mod bfs;
pub mod pagerank;
pub mod validate;

use crate::config::KernelConfig;
use crate::error::KernelResult;
use frontier_rank_algorithms::{
    BfsStats, DirectionPolicy, GraphView, PageRankConfig, PageRankStats, VertexId,
};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{info, instrument};

pub use validate::validate_structure;

// Re-export kernels
pub use frontier_rank_algorithms::{
    bfs_bottom_up, bfs_hybrid, bfs_top_down, page_rank, page_rank_into, Direction, EdgeRatio,
    FixedDirection, FrontierFraction, LevelContext, LevelTrace, PageRankResult, NOT_VISITED,
};

/// Configured runner for BFS and PageRank
///
/// Holds a dedicated rayon pool when `threads` is set; otherwise work runs
/// on the global pool.
pub struct Kernels {
    config: KernelConfig,
    pool: Option<ThreadPool>,
}

impl Default for Kernels {
    fn default() -> Self {
        Self {
            config: KernelConfig::default(),
            pool: None,
        }
    }
}

impl Kernels {
    pub fn new(config: KernelConfig) -> KernelResult<Self> {
        config.validate()?;
        let pool = config
            .threads
            .map(|threads| {
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("frontier-rank-{}", i))
                    .build()
            })
            .transpose()?;

        info!(
            threads = ?config.threads,
            strategy = ?config.bfs.strategy,
            "Kernel runner initialized"
        );
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Worker threads available to a run
    pub fn current_num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    fn check_graph(&self, graph: &GraphView) -> KernelResult<()> {
        if self.config.validate_graph {
            self.install(|| validate_structure(graph))?;
        }
        Ok(())
    }

    /// BFS from the configured root with the configured strategy
    pub fn run_bfs(&self, graph: &GraphView, distances: &mut [i32]) -> KernelResult<BfsStats> {
        self.run_bfs_from(graph, self.config.bfs.root, distances)
    }

    /// BFS from `root` with the configured strategy
    pub fn run_bfs_from(
        &self,
        graph: &GraphView,
        root: VertexId,
        distances: &mut [i32],
    ) -> KernelResult<BfsStats> {
        let policy = self.config.bfs.direction_policy();
        self.run_bfs_with_policy(graph, root, policy.as_ref(), distances)
    }

    /// BFS from `root` with a caller-supplied direction policy
    #[instrument(skip_all, fields(nodes = graph.node_count, edges = graph.edge_count, root = root))]
    pub fn run_bfs_with_policy(
        &self,
        graph: &GraphView,
        root: VertexId,
        policy: &dyn DirectionPolicy,
        distances: &mut [i32],
    ) -> KernelResult<BfsStats> {
        bfs::check_bfs_args(graph, root, distances.len())?;
        self.check_graph(graph)?;
        Ok(self.install(|| bfs::run_checked(graph, root, policy, distances)))
    }

    /// PageRank with the configured damping, threshold and iteration cap
    pub fn run_pagerank(
        &self,
        graph: &GraphView,
        scores: &mut [f64],
    ) -> KernelResult<PageRankStats> {
        let config = self.config.pagerank.to_kernel_config();
        self.run_pagerank_with(graph, &config, scores)
    }

    /// PageRank with explicit kernel settings
    #[instrument(
        skip_all,
        fields(nodes = graph.node_count, edges = graph.edge_count, damping = config.damping_factor)
    )]
    pub fn run_pagerank_with(
        &self,
        graph: &GraphView,
        config: &PageRankConfig,
        scores: &mut [f64],
    ) -> KernelResult<PageRankStats> {
        pagerank::check_pagerank_args(graph, config, scores.len())?;
        self.check_graph(graph)?;
        let stats = self.install(|| pagerank::run_checked(graph, config, scores))?;
        info!(iterations = stats.iterations, delta = stats.final_delta, "PageRank converged");
        Ok(stats)
    }
}

/// Hybrid BFS from vertex 0 with default settings.
///
/// Fills `distances` with hop counts; unreachable vertices hold [`NOT_VISITED`].
pub fn run_bfs(graph: &GraphView, distances: &mut [i32]) -> KernelResult<BfsStats> {
    Kernels::default().run_bfs(graph, distances)
}

/// PageRank with the given damping and convergence threshold.
///
/// Uses the default iteration cap; see [`crate::config::PageRankSettings`].
pub fn run_pagerank(
    graph: &GraphView,
    scores: &mut [f64],
    damping: f64,
    convergence_threshold: f64,
) -> KernelResult<PageRankStats> {
    let defaults = PageRankConfig {
        damping_factor: damping,
        tolerance: convergence_threshold,
        max_iterations: KernelConfig::default().pagerank.max_iterations,
    };
    Kernels::default().run_pagerank_with(graph, &defaults, scores)
}
