//! CSR structural validation
//!
//! The kernels index neighbour arrays without bounds reasoning of their
//! own, so untrusted graphs are checked once here before any run.

use crate::error::GraphStructureError;
use frontier_rank_algorithms::GraphView;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Check both adjacencies of `view`.
///
/// Verifies array lengths, that starts begin at 0, are non-decreasing and
/// stay within the edge array, that every neighbour id names a vertex, and
/// that the reverse adjacency agrees with the forward one degree by degree.
pub fn validate_structure(view: &GraphView) -> Result<(), GraphStructureError> {
    let n = view.node_count;

    check_len("outgoing_edges", view.edge_count, view.outgoing_edges.len())?;
    check_adjacency(
        "outgoing_starts",
        "outgoing_edges",
        &view.outgoing_starts,
        &view.outgoing_edges,
        n,
    )?;

    check_len("incoming_edges", view.edge_count, view.incoming_edges.len())?;
    check_adjacency(
        "incoming_starts",
        "incoming_edges",
        &view.incoming_starts,
        &view.incoming_edges,
        n,
    )?;

    // The reverse adjacency holds the same edges: a vertex appears as a source
    // in incoming_edges once per out-edge, and as a target in outgoing_edges
    // once per in-edge.
    check_degrees(
        "outgoing_starts",
        |v| view.out_degree(v),
        "incoming_edges",
        &view.incoming_edges,
        n,
    )?;
    check_degrees(
        "incoming_starts",
        |v| view.in_degree(v),
        "outgoing_edges",
        &view.outgoing_edges,
        n,
    )?;

    Ok(())
}

fn check_len(
    array: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), GraphStructureError> {
    if expected != actual {
        return Err(GraphStructureError::LengthMismatch { array, expected, actual });
    }
    Ok(())
}

fn check_adjacency(
    starts_name: &'static str,
    edges_name: &'static str,
    starts: &[usize],
    edges: &[usize],
    node_count: usize,
) -> Result<(), GraphStructureError> {
    check_len(starts_name, node_count, starts.len())?;

    if let Some(&value) = starts.first() {
        if value != 0 {
            return Err(GraphStructureError::FirstStartNotZero {
                array: starts_name,
                value,
            });
        }
    }

    let edge_count = edges.len();
    if let Some((index, &value)) = starts.iter().enumerate().find(|(_, &s)| s > edge_count) {
        return Err(GraphStructureError::StartOutOfRange {
            array: starts_name,
            index,
            value,
            edge_count,
        });
    }
    if let Some(index) = starts.windows(2).position(|w| w[1] < w[0]) {
        return Err(GraphStructureError::NonMonotoneStarts {
            array: starts_name,
            index: index + 1,
        });
    }

    // Lowest offending index, so the report does not depend on scheduling
    let out_of_range = edges
        .par_iter()
        .enumerate()
        .find_first(|(_, &v)| v >= node_count);
    if let Some((index, &vertex)) = out_of_range {
        return Err(GraphStructureError::NeighborOutOfRange {
            array: edges_name,
            index,
            vertex,
            node_count,
        });
    }
    Ok(())
}

/// Compare each vertex's degree against how often it occurs in `neighbors`.
///
/// Requires starts and neighbour ids already checked.
fn check_degrees<D>(
    degree_array: &'static str,
    degree: D,
    neighbor_array: &'static str,
    neighbors: &[usize],
    node_count: usize,
) -> Result<(), GraphStructureError>
where
    D: Fn(usize) -> usize + Sync,
{
    let counts: Vec<AtomicUsize> = (0..node_count)
        .into_par_iter()
        .map(|_| AtomicUsize::new(0))
        .collect();
    neighbors.par_iter().for_each(|&v| {
        counts[v].fetch_add(1, Ordering::Relaxed);
    });

    let mismatch = counts
        .par_iter()
        .enumerate()
        .map(|(v, count)| (v, degree(v), count.load(Ordering::Relaxed)))
        .find_first(|&(_, d, c)| d != c);
    if let Some((vertex, degree, occurrences)) = mismatch {
        return Err(GraphStructureError::AdjacencyMismatch {
            vertex,
            degree_array,
            degree,
            neighbor_array,
            occurrences,
        });
    }
    Ok(())
}
