//! Shared utilities for graph algorithms
//!
//! Provides a read-only view of the graph topology in Compressed Sparse Row
//! (CSR) form. The view is built by the caller and never mutated while a
//! kernel runs.

/// Dense vertex index in `0..node_count`.
pub type VertexId = usize;

/// A dense, integer-indexed view of the graph topology using CSR format.
///
/// Each adjacency is stored as a starts array with one entry per vertex
/// plus a flattened neighbour array. The edges of vertex `i` span
/// `starts[i]..starts[i + 1]`, or `starts[i]..edge_count` for the last vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphView {
    /// Number of vertices
    pub node_count: usize,
    /// Number of directed edges
    pub edge_count: usize,

    /// Offsets into `outgoing_edges`. Size = node_count
    pub outgoing_starts: Vec<usize>,
    /// Contiguous array of target vertices
    pub outgoing_edges: Vec<VertexId>,

    /// Offsets into `incoming_edges`. Size = node_count
    pub incoming_starts: Vec<usize>,
    /// Contiguous array of source vertices
    pub incoming_edges: Vec<VertexId>,
}

impl GraphView {
    /// Wrap already-built CSR arrays without copying.
    ///
    /// No checking is done here; callers that do not trust the arrays should
    /// validate them before running a kernel.
    pub fn from_csr(
        node_count: usize,
        outgoing_starts: Vec<usize>,
        outgoing_edges: Vec<VertexId>,
        incoming_starts: Vec<usize>,
        incoming_edges: Vec<VertexId>,
    ) -> Self {
        GraphView {
            node_count,
            edge_count: outgoing_edges.len(),
            outgoing_starts,
            outgoing_edges,
            incoming_starts,
            incoming_edges,
        }
    }

    /// Helper to create a GraphView from outgoing adjacency lists (test support).
    ///
    /// The reverse adjacency is derived from the forward lists.
    pub fn from_adjacency_list(outgoing: Vec<Vec<VertexId>>) -> Self {
        let node_count = outgoing.len();
        let mut incoming: Vec<Vec<VertexId>> = vec![Vec::new(); node_count];
        for (src, targets) in outgoing.iter().enumerate() {
            for &dst in targets {
                incoming[dst].push(src);
            }
        }

        let (outgoing_starts, outgoing_edges) = flatten(outgoing);
        let (incoming_starts, incoming_edges) = flatten(incoming);

        GraphView {
            node_count,
            edge_count: outgoing_edges.len(),
            outgoing_starts,
            outgoing_edges,
            incoming_starts,
            incoming_edges,
        }
    }

    /// Helper to create a GraphView from a list of `(source, target)` pairs.
    pub fn from_edges(node_count: usize, edges: &[(VertexId, VertexId)]) -> Self {
        let mut outgoing: Vec<Vec<VertexId>> = vec![Vec::new(); node_count];
        for &(src, dst) in edges {
            outgoing[src].push(dst);
        }
        Self::from_adjacency_list(outgoing)
    }

    /// Range of `outgoing_edges` belonging to `idx`
    #[inline]
    fn out_range(&self, idx: VertexId) -> (usize, usize) {
        let start = self.outgoing_starts[idx];
        let end = if idx + 1 == self.node_count {
            self.edge_count
        } else {
            self.outgoing_starts[idx + 1]
        };
        (start, end)
    }

    /// Range of `incoming_edges` belonging to `idx`
    #[inline]
    fn in_range(&self, idx: VertexId) -> (usize, usize) {
        let start = self.incoming_starts[idx];
        let end = if idx + 1 == self.node_count {
            self.incoming_edges.len()
        } else {
            self.incoming_starts[idx + 1]
        };
        (start, end)
    }

    /// Get the out-degree of a vertex
    #[inline]
    pub fn out_degree(&self, idx: VertexId) -> usize {
        let (start, end) = self.out_range(idx);
        end - start
    }

    /// Get the in-degree of a vertex
    #[inline]
    pub fn in_degree(&self, idx: VertexId) -> usize {
        let (start, end) = self.in_range(idx);
        end - start
    }

    /// Get outgoing neighbors (successors) of a vertex
    #[inline]
    pub fn successors(&self, idx: VertexId) -> &[VertexId] {
        let (start, end) = self.out_range(idx);
        &self.outgoing_edges[start..end]
    }

    /// Get incoming neighbors (predecessors) of a vertex
    #[inline]
    pub fn predecessors(&self, idx: VertexId) -> &[VertexId] {
        let (start, end) = self.in_range(idx);
        &self.incoming_edges[start..end]
    }

    /// True when the vertex has no outgoing edges (a dangling vertex)
    #[inline]
    pub fn is_sink(&self, idx: VertexId) -> bool {
        self.out_degree(idx) == 0
    }
}

/// Flatten adjacency lists into (starts, edges).
fn flatten(lists: Vec<Vec<VertexId>>) -> (Vec<usize>, Vec<VertexId>) {
    let mut starts = Vec::with_capacity(lists.len());
    let mut edges = Vec::with_capacity(lists.iter().map(Vec::len).sum());
    for neighbors in lists {
        starts.push(edges.len());
        edges.extend(neighbors);
    }
    (starts, edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csr_ranges() {
        // 0 -> 1, 0 -> 2, 2 -> 0, 3 isolated
        let view = GraphView::from_edges(4, &[(0, 1), (0, 2), (2, 0)]);

        assert_eq!(view.node_count, 4);
        assert_eq!(view.edge_count, 3);
        assert_eq!(view.successors(0), &[1, 2]);
        assert!(view.successors(1).is_empty());
        assert_eq!(view.successors(2), &[0]);
        assert!(view.successors(3).is_empty());

        assert_eq!(view.predecessors(0), &[2]);
        assert_eq!(view.predecessors(1), &[0]);
        assert_eq!(view.predecessors(2), &[0]);
        assert_eq!(view.in_degree(3), 0);

        assert!(view.is_sink(1));
        assert!(!view.is_sink(2));
    }

    #[test]
    fn test_last_vertex_uses_edge_count() {
        // Only the last vertex has edges, so its range must end at edge_count
        let view = GraphView::from_edges(3, &[(2, 0), (2, 1)]);
        assert_eq!(view.outgoing_starts, vec![0, 0, 0]);
        assert_eq!(view.out_degree(2), 2);
        assert_eq!(view.successors(2), &[0, 1]);
    }

    #[test]
    fn test_from_csr_matches_builder() {
        let built = GraphView::from_adjacency_list(vec![vec![1], vec![2], vec![0]]);
        let raw = GraphView::from_csr(
            3,
            vec![0, 1, 2],
            vec![1, 2, 0],
            vec![0, 1, 2],
            vec![2, 0, 1],
        );
        assert_eq!(built, raw);
    }
}
