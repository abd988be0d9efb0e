//! Direction-optimizing breadth-first search
//!
//! Level-synchronous BFS producing hop distances from a root. Each level is
//! expanded either top-down (scan out-edges of the frontier) or bottom-up
//! (scan in-edges of every unvisited vertex), as chosen by a
//! [`DirectionPolicy`]. The direction only changes how much work a level
//! does; every policy yields the same distances.

use crate::common::{GraphView, VertexId};
use crate::frontier::Frontier;
use rayon::prelude::*;
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Instant;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance marker for vertices the search has not reached.
pub const NOT_VISITED: i32 = -1;

/// Root used when the caller does not pick one.
pub const DEFAULT_ROOT: VertexId = 0;

/// How a single BFS level is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Frontier-driven: follow outgoing edges of frontier vertices
    TopDown,
    /// Unvisited-driven: look for a parent among incoming edges
    BottomUp,
}

/// Snapshot of the search handed to a [`DirectionPolicy`] before each level.
pub struct LevelContext<'a> {
    view: &'a GraphView,
    frontier: &'a Frontier,
    distances: &'a [AtomicI32],
    depth: i32,
    previous: Option<Direction>,
}

impl<'a> LevelContext<'a> {
    /// Depth of the vertices in the current frontier.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn node_count(&self) -> usize {
        self.view.node_count
    }

    /// Direction used for the previous level, `None` at the root level.
    pub fn previous(&self) -> Option<Direction> {
        self.previous
    }

    /// Total out-degree of the frontier (m_f). Parallel reduction, computed on call.
    pub fn frontier_out_edges(&self) -> usize {
        self.frontier
            .par_iter()
            .map(|v| self.view.out_degree(v))
            .sum()
    }

    /// Number of vertices not yet reached (m_u). Parallel reduction, computed on call.
    pub fn unvisited_count(&self) -> usize {
        self.distances
            .par_iter()
            .filter(|d| d.load(Ordering::Relaxed) == NOT_VISITED)
            .count()
    }
}

/// Chooses the expansion direction for each level.
///
/// Any closure `Fn(&LevelContext) -> Direction` is a policy too.
pub trait DirectionPolicy: Send + Sync {
    fn choose(&self, ctx: &LevelContext<'_>) -> Direction;
}

impl<F> DirectionPolicy for F
where
    F: Fn(&LevelContext<'_>) -> Direction + Send + Sync,
{
    fn choose(&self, ctx: &LevelContext<'_>) -> Direction {
        self(ctx)
    }
}

/// Always expand in the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDirection(pub Direction);

impl DirectionPolicy for FixedDirection {
    fn choose(&self, _ctx: &LevelContext<'_>) -> Direction {
        self.0
    }
}

/// Bottom-up whenever the frontier holds more than `node_count / divisor`
/// vertices, top-down otherwise.
///
/// The default divisor of 24 is empirically tuned, not derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct FrontierFraction {
    pub divisor: usize,
}

impl Default for FrontierFraction {
    fn default() -> Self {
        Self { divisor: 24 }
    }
}

impl DirectionPolicy for FrontierFraction {
    fn choose(&self, ctx: &LevelContext<'_>) -> Direction {
        if ctx.frontier_len() > ctx.node_count() / self.divisor.max(1) {
            Direction::BottomUp
        } else {
            Direction::TopDown
        }
    }
}

/// Two-state rule comparing frontier edges against unvisited vertices.
///
/// While top-down, switch to bottom-up once `m_f > m_u / alpha`. While
/// bottom-up, go back to top-down once the frontier shrinks below
/// `node_count / beta`. Costs two extra reductions per top-down level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EdgeRatio {
    pub alpha: usize,
    pub beta: usize,
}

impl Default for EdgeRatio {
    fn default() -> Self {
        Self { alpha: 14, beta: 24 }
    }
}

impl DirectionPolicy for EdgeRatio {
    fn choose(&self, ctx: &LevelContext<'_>) -> Direction {
        match ctx.previous() {
            Some(Direction::BottomUp) => {
                if ctx.frontier_len() < ctx.node_count() / self.beta.max(1) {
                    Direction::TopDown
                } else {
                    Direction::BottomUp
                }
            }
            _ => {
                let m_f = ctx.frontier_out_edges();
                let m_u = ctx.unvisited_count();
                if m_f > m_u / self.alpha.max(1) {
                    Direction::BottomUp
                } else {
                    Direction::TopDown
                }
            }
        }
    }
}

/// One expanded level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTrace {
    pub depth: i32,
    pub direction: Direction,
    pub frontier_len: usize,
    pub discovered: usize,
}

/// Summary of a BFS run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BfsStats {
    pub levels: Vec<LevelTrace>,
    /// Vertices with a distance, root included
    pub reached: usize,
}

impl BfsStats {
    /// Largest distance assigned, `None` for an empty graph.
    pub fn max_depth(&self) -> Option<i32> {
        self.levels
            .iter()
            .rev()
            .find(|l| l.discovered > 0)
            .map(|l| l.depth + 1)
            .or(if self.reached > 0 { Some(0) } else { None })
    }

    pub fn levels_in(&self, direction: Direction) -> usize {
        self.levels.iter().filter(|l| l.direction == direction).count()
    }
}

/// Distances plus run summary.
#[derive(Debug, Clone)]
pub struct BfsResult {
    pub distances: Vec<i32>,
    pub stats: BfsStats,
}

/// Expand one level top-down.
///
/// A neighbour is claimed with a compare-and-swap from `NOT_VISITED`, which
/// succeeds for exactly one thread over the whole run.
fn top_down_step(
    view: &GraphView,
    frontier: &Frontier,
    next: &Frontier,
    distances: &[AtomicI32],
) {
    frontier
        .par_iter()
        .fold(Vec::new, |mut local, node| {
            let next_depth = distances[node].load(Ordering::Relaxed) + 1;
            for &neighbor in view.successors(node) {
                let slot = &distances[neighbor];
                let claimed = slot.load(Ordering::Relaxed) == NOT_VISITED
                    && slot
                        .compare_exchange(
                            NOT_VISITED,
                            next_depth,
                            Ordering::Relaxed,
                            Ordering::Relaxed,
                        )
                        .is_ok();
                if claimed {
                    local.push(neighbor);
                }
            }
            local
        })
        .for_each(|local| next.append(&local));
}

/// Expand one level bottom-up.
///
/// Every unvisited vertex looks for a predecessor at `depth` and stops at the
/// first hit. Only the owning task writes a vertex's slot, and it writes
/// `depth + 1`, so concurrent reads comparing against `depth` are unaffected.
fn bottom_up_step(view: &GraphView, next: &Frontier, distances: &[AtomicI32], depth: i32) {
    distances
        .par_iter()
        .enumerate()
        .fold(Vec::new, |mut local, (vertex, slot)| {
            if slot.load(Ordering::Relaxed) == NOT_VISITED
                && view
                    .predecessors(vertex)
                    .iter()
                    .any(|&p| distances[p].load(Ordering::Relaxed) == depth)
            {
                slot.store(depth + 1, Ordering::Relaxed);
                local.push(vertex);
            }
            local
        })
        .for_each(|local| next.append(&local));
}

/// Run BFS from `root`, choosing each level's direction with `policy`, and
/// write the distances into `distances`.
///
/// # Panics
///
/// If `distances.len() != view.node_count` or `root` is out of range on a
/// non-empty graph. Neighbour ids outside `0..node_count` also panic.
pub fn bfs_with_policy(
    view: &GraphView,
    root: VertexId,
    policy: &dyn DirectionPolicy,
    distances: &mut [i32],
) -> BfsStats {
    let n = view.node_count;
    assert_eq!(distances.len(), n, "distances length must equal node count");
    if n == 0 {
        return BfsStats::default();
    }
    assert!(root < n, "root {} out of range for {} vertices", root, n);

    let mut table: Vec<AtomicI32> = (0..n)
        .into_par_iter()
        .map(|_| AtomicI32::new(NOT_VISITED))
        .collect();

    let mut frontier = Frontier::with_capacity(n);
    let mut next = Frontier::with_capacity(n);
    frontier.push(root);
    *table[root].get_mut() = 0;

    let mut stats = BfsStats {
        levels: Vec::new(),
        reached: 1,
    };
    let mut depth = 0;
    let mut previous = None;

    while !frontier.is_empty() {
        next.clear();

        let direction = policy.choose(&LevelContext {
            view,
            frontier: &frontier,
            distances: &table,
            depth,
            previous,
        });

        let started = Instant::now();
        match direction {
            Direction::TopDown => top_down_step(view, &frontier, &next, &table),
            Direction::BottomUp => bottom_up_step(view, &next, &table, depth),
        }

        let trace = LevelTrace {
            depth,
            direction,
            frontier_len: frontier.len(),
            discovered: next.len(),
        };
        debug!(
            depth,
            ?direction,
            frontier = trace.frontier_len,
            discovered = trace.discovered,
            elapsed_us = started.elapsed().as_micros() as u64,
            "bfs level"
        );
        stats.reached += trace.discovered;
        stats.levels.push(trace);

        std::mem::swap(&mut frontier, &mut next);
        previous = Some(direction);
        depth += 1;
    }

    distances
        .par_iter_mut()
        .zip(table.into_par_iter())
        .for_each(|(out, slot)| *out = slot.into_inner());

    info!(
        root,
        levels = stats.levels.len(),
        reached = stats.reached,
        nodes = n,
        "bfs complete"
    );
    stats
}

/// BFS using only top-down steps.
pub fn bfs_top_down(view: &GraphView, root: VertexId, distances: &mut [i32]) -> BfsStats {
    bfs_with_policy(view, root, &FixedDirection(Direction::TopDown), distances)
}

/// BFS using only bottom-up steps.
pub fn bfs_bottom_up(view: &GraphView, root: VertexId, distances: &mut [i32]) -> BfsStats {
    bfs_with_policy(view, root, &FixedDirection(Direction::BottomUp), distances)
}

/// Hybrid BFS with the default [`FrontierFraction`] policy.
pub fn bfs_hybrid(view: &GraphView, root: VertexId, distances: &mut [i32]) -> BfsStats {
    bfs_with_policy(view, root, &FrontierFraction::default(), distances)
}

/// Allocating variant of [`bfs_with_policy`].
pub fn bfs(view: &GraphView, root: VertexId, policy: &dyn DirectionPolicy) -> BfsResult {
    let mut distances = vec![NOT_VISITED; view.node_count];
    let stats = bfs_with_policy(view, root, policy, &mut distances);
    BfsResult { distances, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::VecDeque;

    fn star() -> GraphView {
        // Hub 0 points to leaves 1, 2, 3
        GraphView::from_edges(4, &[(0, 1), (0, 2), (0, 3)])
    }

    #[test]
    fn test_star_graph_all_directions() {
        let view = star();
        let policies: [&dyn DirectionPolicy; 4] = [
            &FixedDirection(Direction::TopDown),
            &FixedDirection(Direction::BottomUp),
            &FrontierFraction::default(),
            &EdgeRatio::default(),
        ];
        for policy in policies {
            let result = bfs(&view, 0, policy);
            assert_eq!(result.distances, vec![0, 1, 1, 1]);
            assert_eq!(result.stats.reached, 4);
        }
    }

    #[test]
    fn test_chain_and_unreachable() {
        // 0 -> 1 -> 2 -> 3, 4 -> 0 (4 unreachable from 0)
        let view = GraphView::from_edges(5, &[(0, 1), (1, 2), (2, 3), (4, 0)]);
        let mut top = vec![0; 5];
        let mut bottom = vec![0; 5];
        bfs_top_down(&view, 0, &mut top);
        bfs_bottom_up(&view, 0, &mut bottom);

        assert_eq!(top, vec![0, 1, 2, 3, NOT_VISITED]);
        assert_eq!(top, bottom);
    }

    #[test]
    fn test_non_zero_root() {
        let view = GraphView::from_edges(4, &[(0, 1), (2, 0), (2, 3)]);
        let result = bfs(&view, 2, &FrontierFraction::default());
        assert_eq!(result.distances, vec![1, 2, 0, 1]);
        assert_eq!(result.stats.max_depth(), Some(2));
    }

    #[test]
    fn test_level_trace_records_each_level() {
        let view = GraphView::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let mut distances = vec![0; 4];
        let stats = bfs_top_down(&view, 0, &mut distances);

        // Three productive levels plus the final empty one
        assert_eq!(stats.levels.len(), 4);
        assert_eq!(stats.levels_in(Direction::TopDown), 4);
        assert_eq!(stats.levels[0].frontier_len, 1);
        assert_eq!(stats.levels[3].discovered, 0);
    }

    #[test]
    fn test_frontier_fraction_switches_on_large_frontier() {
        // Hub with 48 leaves: level 0 frontier is 1 (<= 49/24 = 2), level 1 is 48
        let edges: Vec<_> = (1..49).map(|leaf| (0, leaf)).collect();
        let view = GraphView::from_edges(49, &edges);
        let result = bfs(&view, 0, &FrontierFraction::default());

        assert_eq!(result.stats.levels[0].direction, Direction::TopDown);
        assert_eq!(result.stats.levels[1].direction, Direction::BottomUp);
        assert!(result.distances[1..].iter().all(|&d| d == 1));
    }

    fn alternate(ctx: &LevelContext<'_>) -> Direction {
        if ctx.depth() % 2 == 0 {
            Direction::BottomUp
        } else {
            Direction::TopDown
        }
    }

    #[test]
    fn test_function_policy() {
        let view = star();
        let result = bfs(&view, 0, &alternate);
        assert_eq!(result.distances, vec![0, 1, 1, 1]);
    }

    #[test]
    fn test_empty_graph() {
        let view = GraphView::from_edges(0, &[]);
        let mut distances: Vec<i32> = Vec::new();
        let stats = bfs_hybrid(&view, 0, &mut distances);
        assert_eq!(stats, BfsStats::default());
        assert_eq!(stats.max_depth(), None);
    }

    /// Sequential queue BFS to compare the kernels against
    fn queue_bfs(view: &GraphView, root: VertexId) -> Vec<i32> {
        let mut dist = vec![NOT_VISITED; view.node_count];
        let mut queue = VecDeque::from([root]);
        dist[root] = 0;
        while let Some(v) = queue.pop_front() {
            for &u in view.successors(v) {
                if dist[u] == NOT_VISITED {
                    dist[u] = dist[v] + 1;
                    queue.push_back(u);
                }
            }
        }
        dist
    }

    #[test]
    fn test_policies_match_queue_bfs_on_random_graphs() {
        let policies: [&dyn DirectionPolicy; 4] = [
            &FixedDirection(Direction::TopDown),
            &FixedDirection(Direction::BottomUp),
            &FrontierFraction::default(),
            &EdgeRatio::default(),
        ];
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for (n, avg_degree) in [(1, 0), (64, 1), (300, 3), (1_500, 6)] {
            let edges: Vec<_> = (0..n * avg_degree)
                .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
                .collect();
            let view = GraphView::from_edges(n, &edges);
            let root = rng.gen_range(0..n);
            let expected = queue_bfs(&view, root);

            for policy in policies {
                let result = bfs(&view, root, policy);
                assert_eq!(result.distances, expected, "n={} root={}", n, root);

                let reached = expected.iter().filter(|&&d| d != NOT_VISITED).count();
                assert_eq!(result.stats.reached, reached);
            }
        }
    }

    #[test]
    fn test_self_loop_and_cycle() {
        let view = GraphView::from_edges(3, &[(0, 0), (0, 1), (1, 2), (2, 0)]);
        let result = bfs(&view, 0, &EdgeRatio::default());
        assert_eq!(result.distances, vec![0, 1, 2]);
    }
}
