//! Error types for kernel entry points
//!
//! Every check runs before a caller-owned output array is written, so an
//! `Err` always leaves the caller's buffer untouched.

use thiserror::Error;

/// Structural defects in the CSR arrays of a graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphStructureError {
    #[error("{array} has length {actual}, expected {expected}")]
    LengthMismatch {
        array: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{array}[{index}] = {value} exceeds edge count {edge_count}")]
    StartOutOfRange {
        array: &'static str,
        index: usize,
        value: usize,
        edge_count: usize,
    },

    #[error("{array}[0] = {value}, expected 0")]
    FirstStartNotZero { array: &'static str, value: usize },

    #[error("{array} decreases at index {index}")]
    NonMonotoneStarts { array: &'static str, index: usize },

    #[error("{array}[{index}] = {vertex} is not a vertex of a {node_count}-node graph")]
    NeighborOutOfRange {
        array: &'static str,
        index: usize,
        vertex: usize,
        node_count: usize,
    },

    /// Forward and reverse adjacency disagree about a vertex's edges
    #[error(
        "vertex {vertex} has {degree} edges in {degree_array} \
         but appears {occurrences} times in {neighbor_array}"
    )]
    AdjacencyMismatch {
        vertex: usize,
        degree_array: &'static str,
        degree: usize,
        neighbor_array: &'static str,
        occurrences: usize,
    },
}

/// Errors returned by the kernel runner
#[derive(Error, Debug)]
pub enum KernelError {
    /// Output array does not have one slot per vertex
    #[error("Output length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("BFS root {root} out of range for {node_count} vertices")]
    RootOutOfRange { root: usize, node_count: usize },

    #[error("Damping factor must be in [0, 1), got {0}")]
    InvalidDamping(f64),

    #[error("Convergence threshold must be positive, got {0}")]
    InvalidTolerance(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed graph: {0}")]
    Structure(#[from] GraphStructureError),

    /// Iteration cap reached before the threshold was met
    #[error("PageRank did not converge after {iterations} iterations (delta {delta})")]
    NotConverged { iterations: usize, delta: f64 },

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

pub type KernelResult<T> = Result<T, KernelError>;
