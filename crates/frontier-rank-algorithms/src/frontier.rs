//! Frontier container for level-synchronous BFS
//!
//! A fixed-capacity set of vertex ids that many rayon workers append to at
//! once. Workers collect matches in a private `Vec` and flush it with a
//! single [`Frontier::append`], which reserves a region with one atomic
//! `fetch_add` and copies the buffer into it. Synchronisation cost is
//! therefore per worker buffer, not per vertex.

use crate::common::VertexId;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Set of vertices reached at one BFS level.
///
/// Capacity is the vertex count of the graph: a vertex enters a frontier at
/// most once per run, so no level can hold more than that.
#[derive(Debug)]
pub struct Frontier {
    slots: Box<[AtomicUsize]>,
    len: AtomicUsize,
}

impl Frontier {
    /// Allocate backing storage for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity).map(|_| AtomicUsize::new(0)).collect();
        Frontier {
            slots,
            len: AtomicUsize::new(0),
        }
    }

    /// Reset the logical length without releasing storage.
    pub fn clear(&mut self) {
        *self.len.get_mut() = 0;
    }

    /// Add a single vertex. Requires exclusive access.
    pub fn push(&mut self, vertex: VertexId) {
        let idx = *self.len.get_mut();
        assert!(idx < self.slots.len(), "frontier capacity exceeded");
        *self.slots[idx].get_mut() = vertex;
        *self.len.get_mut() = idx + 1;
    }

    /// Bulk-append a worker's private buffer.
    ///
    /// Safe to call from many threads at once: each call reserves a disjoint
    /// region of slots, so no two callers write the same slot.
    pub fn append(&self, buffer: &[VertexId]) {
        if buffer.is_empty() {
            return;
        }
        let offset = self.len.fetch_add(buffer.len(), Ordering::Relaxed);
        let end = offset + buffer.len();
        assert!(end <= self.slots.len(), "frontier capacity exceeded");
        for (slot, &vertex) in self.slots[offset..end].iter().zip(buffer) {
            slot.store(vertex, Ordering::Relaxed);
        }
    }

    /// Number of vertices currently held.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterate the held vertices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.slots[..self.len()]
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
    }

    /// Parallel iterator over the held vertices.
    ///
    /// Only meaningful between parallel regions: rayon's join makes every
    /// `append` of the previous region visible here.
    pub fn par_iter(&self) -> impl IndexedParallelIterator<Item = VertexId> + '_ {
        self.slots[..self.len()]
            .par_iter()
            .map(|slot| slot.load(Ordering::Relaxed))
    }

    pub fn to_vec(&self) -> Vec<VertexId> {
        self.iter().collect()
    }
}
