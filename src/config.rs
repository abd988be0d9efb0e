//! Kernel configuration
//!
//! Every field has a default, so a YAML document only needs to name what it
//! overrides:
//!
//! ```yaml
//! threads: 8
//! bfs:
//!   policy: edge_ratio
//!   edge_ratio:
//!     alpha: 10
//! pagerank:
//!   damping: 0.9
//! ```

use crate::error::{KernelError, KernelResult};
use frontier_rank_algorithms::{
    Direction, DirectionPolicy, EdgeRatio, FixedDirection, FrontierFraction, PageRankConfig,
    DEFAULT_ROOT,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Which BFS expansion strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BfsStrategy {
    TopDown,
    BottomUp,
    Hybrid,
}

/// Switching rule used by the hybrid strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HybridPolicy {
    /// Bottom-up when the frontier exceeds `node_count / divisor`
    FrontierFraction,
    /// Two-state m_f / m_u comparison
    EdgeRatio,
}

/// BFS settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BfsSettings {
    pub root: usize,
    pub strategy: BfsStrategy,
    pub policy: HybridPolicy,
    /// Parameters used when `policy` is `frontier_fraction`
    pub frontier_fraction: FrontierFraction,
    /// Parameters used when `policy` is `edge_ratio`
    pub edge_ratio: EdgeRatio,
}

impl Default for BfsSettings {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT,
            strategy: BfsStrategy::Hybrid,
            policy: HybridPolicy::FrontierFraction,
            frontier_fraction: FrontierFraction::default(),
            edge_ratio: EdgeRatio::default(),
        }
    }
}

impl BfsSettings {
    /// Build the direction policy these settings describe
    pub fn direction_policy(&self) -> Box<dyn DirectionPolicy> {
        match (self.strategy, self.policy) {
            (BfsStrategy::TopDown, _) => Box::new(FixedDirection(Direction::TopDown)),
            (BfsStrategy::BottomUp, _) => Box::new(FixedDirection(Direction::BottomUp)),
            (BfsStrategy::Hybrid, HybridPolicy::FrontierFraction) => {
                Box::new(self.frontier_fraction)
            }
            (BfsStrategy::Hybrid, HybridPolicy::EdgeRatio) => Box::new(self.edge_ratio),
        }
    }
}

/// PageRank settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankSettings {
    pub damping: f64,
    pub tolerance: f64,
    /// `None` iterates until convergence
    pub max_iterations: Option<usize>,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-7,
            max_iterations: Some(10_000),
        }
    }
}

impl PageRankSettings {
    pub fn to_kernel_config(&self) -> PageRankConfig {
        PageRankConfig {
            damping_factor: self.damping,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }
}

/// Top-level configuration for [`crate::Kernels`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Worker threads for a dedicated pool; `None` uses the global rayon pool
    pub threads: Option<usize>,
    /// Check CSR bounds before running a kernel
    pub validate_graph: bool,
    pub bfs: BfsSettings,
    pub pagerank: PageRankSettings,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            threads: None,
            validate_graph: true,
            bfs: BfsSettings::default(),
            pagerank: PageRankSettings::default(),
        }
    }
}

impl KernelConfig {
    pub fn from_yaml_str(yaml: &str) -> KernelResult<Self> {
        let config: KernelConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> KernelResult<Self> {
        let path = path.as_ref();
        debug!("Loading kernel config from {:?}", path);
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Reject settings no run could satisfy
    pub fn validate(&self) -> KernelResult<()> {
        if self.threads == Some(0) {
            return Err(KernelError::InvalidConfig("threads must be at least 1".to_string()));
        }
        if self.bfs.frontier_fraction.divisor == 0 {
            return Err(KernelError::InvalidConfig(
                "bfs.frontier_fraction.divisor must be at least 1".to_string(),
            ));
        }
        let EdgeRatio { alpha, beta } = self.bfs.edge_ratio;
        if alpha == 0 || beta == 0 {
            return Err(KernelError::InvalidConfig(
                "bfs.edge_ratio.alpha and bfs.edge_ratio.beta must be at least 1".to_string(),
            ));
        }
        if self.pagerank.max_iterations == Some(0) {
            return Err(KernelError::InvalidConfig(
                "pagerank.max_iterations must be at least 1".to_string(),
            ));
        }
        check_pagerank_params(self.pagerank.damping, self.pagerank.tolerance)
    }
}

/// Damping in [0, 1) and a positive, finite threshold
pub(crate) fn check_pagerank_params(damping: f64, tolerance: f64) -> KernelResult<()> {
    if !(0.0..1.0).contains(&damping) {
        return Err(KernelError::InvalidDamping(damping));
    }
    if !(tolerance > 0.0 && tolerance.is_finite()) {
        return Err(KernelError::InvalidTolerance(tolerance));
    }
    Ok(())
}
