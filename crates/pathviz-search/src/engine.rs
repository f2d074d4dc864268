use pathviz_core::{Grid, Point};

use crate::distance::manhattan;
use crate::frontier::Frontier;

/// Sentinel cost for a cell no path has reached yet.
pub const UNREACHABLE: i32 = i32::MAX;

pub(crate) const NO_PARENT: usize = usize::MAX;

/// Which priority rule drives the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Policy {
    /// A*: priority = cost so far + Manhattan estimate to the goal.
    #[default]
    Astar,
    /// Uniform-cost (Dijkstra): priority = cost so far.
    UniformCost,
}

impl Policy {
    /// Short human-readable name, for status lines.
    pub const fn label(self) -> &'static str {
        match self {
            Policy::Astar => "A*",
            Policy::UniformCost => "Dijkstra",
        }
    }

    fn priority(self, g: i32, from: Point, goal: Point) -> i32 {
        match self {
            Policy::Astar => g + manhattan(from, goal),
            Policy::UniformCost => g,
        }
    }
}

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The goal was reached and the shortest path marked.
    Found,
    /// The frontier emptied without reaching the goal. Not an error:
    /// this is the legitimate result for an unreachable goal.
    Exhausted,
    /// The cancellation callback returned `true` at a step boundary.
    /// The board keeps its last-rendered intermediate markings.
    Cancelled,
}

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) in_frontier: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            parent: NO_PARENT,
            generation: 0,
            in_frontier: false,
        }
    }
}

/// Search driver owning reusable per-cell node caches.
///
/// One `Engine` can run any number of searches. Caches are lazily
/// invalidated by generation stamping, so repeated runs on same-sized
/// boards allocate nothing after the first.
pub struct Engine {
    pub(crate) nodes: Vec<Node>,
    generation: u32,
    pub(crate) side: usize,
    // shared scratch buffer for neighbor queries
    nbuf: Vec<Point>,
}

impl Engine {
    /// Create a new engine with empty caches.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generation: 0,
            side: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Size the node cache for a board and invalidate previous runs.
    fn prepare(&mut self, side: usize) {
        let len = side * side;
        if len > self.nodes.len() {
            self.nodes.clear();
            self.nodes.resize(len, Node::default());
            self.generation = 0;
        }
        self.side = side;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Convert an in-bounds point to a flat index.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> usize {
        p.y as usize * self.side + p.x as usize
    }

    /// Convert a flat index back to a point.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.side) as i32, (idx / self.side) as i32)
    }

    /// Run a best-first search from `start` to `goal` over `grid`.
    ///
    /// The engine marks discovered cells `Frontier` and finalized cells
    /// `Visited` as it goes (never overwriting the endpoints), and on
    /// success marks the cells strictly between the endpoints `Path`.
    ///
    /// `on_step` is invoked after each cell's neighbor-relaxation pass and
    /// once per marked path cell, so the caller can render intermediate
    /// state through its own [`Grid`] handle. `cancel_requested` is polled
    /// once at the end of each relaxation step; returning `true` aborts
    /// the run with [`Outcome::Cancelled`].
    ///
    /// `start == goal` succeeds immediately without marking anything.
    /// An out-of-bounds endpoint yields [`Outcome::Exhausted`].
    pub fn search(
        &mut self,
        grid: &Grid,
        start: Point,
        goal: Point,
        policy: Policy,
        mut on_step: impl FnMut(),
        mut cancel_requested: impl FnMut() -> bool,
    ) -> Outcome {
        if !grid.contains(start) || !grid.contains(goal) {
            return Outcome::Exhausted;
        }
        if start == goal {
            return Outcome::Found;
        }

        self.prepare(grid.side() as usize);
        let cur_gen = self.generation;

        let start_idx = self.idx(start);
        let goal_idx = self.idx(goal);

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.in_frontier = true;
        }

        let mut frontier = Frontier::new();
        frontier.push(start_idx, policy.priority(0, start, goal));

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = 'search: loop {
            let Some(ci) = frontier.pop() else {
                break 'search Outcome::Exhausted;
            };
            self.nodes[ci].in_frontier = false;

            if ci == goal_idx {
                self.reconstruct(grid, goal_idx, &mut on_step);
                break 'search Outcome::Found;
            }

            let current_g = self.nodes[ci].g;
            let current = self.point(ci);

            nbuf.clear();
            grid.passable_neighbors(current, &mut nbuf);

            for &np in nbuf.iter() {
                let ni = self.idx(np);
                // Unit edge cost; `current_g` is finite, so no overflow.
                let tentative = current_g + 1;

                let node = &mut self.nodes[ni];
                if node.generation != cur_gen {
                    node.generation = cur_gen;
                    node.g = UNREACHABLE;
                    node.in_frontier = false;
                }
                if tentative >= node.g {
                    continue;
                }
                node.g = tentative;
                node.parent = ci;
                // Membership guard: a cell already in the frontier keeps
                // its queue entry; the improved cost is picked up from the
                // node when it pops. No decrease-key.
                if !node.in_frontier {
                    node.in_frontier = true;
                    frontier.push(ni, policy.priority(tentative, np, goal));
                    grid.mark_frontier(np);
                }
            }

            on_step();

            if ci != start_idx {
                grid.mark_visited(current);
            }

            if cancel_requested() {
                break 'search Outcome::Cancelled;
            }
        };

        self.nbuf = nbuf;
        outcome
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn policy_round_trip() {
        for policy in [Policy::Astar, Policy::UniformCost] {
            let json = serde_json::to_string(&policy).unwrap();
            let back: Policy = serde_json::from_str(&json).unwrap();
            assert_eq!(policy, back);
        }
    }

    #[test]
    fn outcome_round_trip() {
        for outcome in [Outcome::Found, Outcome::Exhausted, Outcome::Cancelled] {
            let json = serde_json::to_string(&outcome).unwrap();
            let back: Outcome = serde_json::from_str(&json).unwrap();
            assert_eq!(outcome, back);
        }
    }
}
