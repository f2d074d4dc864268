//! The visualizer board: an n×n grid of [`CellState`] values.
//!
//! [`Grid`] uses shared backing storage (`Rc<RefCell<...>>`). Cloning a
//! grid yields another handle onto the same cells, so the rendering side
//! and a running search can each hold one while all mutation goes through
//! `&self` methods.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::CellState;
use crate::geom::Point;

/// Neighbor offsets in fixed exploration order: down, up, right, left.
const NEIGHBOR_OFFSETS: [Point; 4] = [
    Point::new(0, 1),
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(-1, 0),
];

/// Shared backing buffer for board data.
#[derive(Debug)]
struct Board {
    cells: Vec<CellState>,
    side: i32,
    start: Option<Point>,
    goal: Option<Point>,
}

impl Board {
    fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.side && p.y >= 0 && p.y < self.side
    }

    fn index(&self, p: Point) -> usize {
        (p.y * self.side + p.x) as usize
    }
}

/// An n×n board of [`CellState`] values with shared-handle semantics.
///
/// At most one cell holds `Start` and at most one holds `Goal`. Placement
/// goes through the guarded `make_*` operations, which refuse invalid
/// transitions (returning `false`) instead of panicking. The `mark_*`
/// operations used by a search never overwrite the endpoints.
#[derive(Debug, Clone)]
pub struct Grid {
    board: Rc<RefCell<Board>>,
}

impl Grid {
    /// Create a new `side` × `side` board, all cells `Empty`.
    pub fn new(side: i32) -> Self {
        let side = side.max(0);
        let cells = vec![CellState::Empty; (side * side) as usize];
        Self {
            board: Rc::new(RefCell::new(Board {
                cells,
                side,
                start: None,
                goal: None,
            })),
        }
    }

    /// Side length of the board.
    pub fn side(&self) -> i32 {
        self.board.borrow().side
    }

    /// Whether the board contains the given point.
    pub fn contains(&self, p: Point) -> bool {
        self.board.borrow().contains(p)
    }

    /// Get the cell state at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<CellState> {
        let b = self.board.borrow();
        if !b.contains(p) {
            return None;
        }
        let idx = b.index(p);
        Some(b.cells[idx])
    }

    /// Whether the cell at `p` is a barrier.
    pub fn is_barrier(&self, p: Point) -> bool {
        self.at(p) == Some(CellState::Barrier)
    }

    /// The tracked start position, if placed.
    pub fn start(&self) -> Option<Point> {
        self.board.borrow().start
    }

    /// The tracked goal position, if placed.
    pub fn goal(&self) -> Option<Point> {
        self.board.borrow().goal
    }

    // -----------------------------------------------------------------------
    // Guarded placement
    // -----------------------------------------------------------------------

    /// Place the start at `p`.
    ///
    /// Refused (`false`) if `p` is out of bounds, a start already exists,
    /// or `p` holds the goal. Any other prior state is overwritten.
    pub fn make_start(&self, p: Point) -> bool {
        let mut b = self.board.borrow_mut();
        if !b.contains(p) || b.start.is_some() || b.goal == Some(p) {
            return false;
        }
        let idx = b.index(p);
        b.cells[idx] = CellState::Start;
        b.start = Some(p);
        true
    }

    /// Place the goal at `p`.
    ///
    /// Refused (`false`) if `p` is out of bounds, a goal already exists,
    /// or `p` holds the start. Any other prior state is overwritten.
    pub fn make_goal(&self, p: Point) -> bool {
        let mut b = self.board.borrow_mut();
        if !b.contains(p) || b.goal.is_some() || b.start == Some(p) {
            return false;
        }
        let idx = b.index(p);
        b.cells[idx] = CellState::Goal;
        b.goal = Some(p);
        true
    }

    /// Place a barrier at `p`.
    ///
    /// Refused (`false`) if `p` is out of bounds or holds an endpoint.
    pub fn make_barrier(&self, p: Point) -> bool {
        let mut b = self.board.borrow_mut();
        if !b.contains(p) || b.start == Some(p) || b.goal == Some(p) {
            return false;
        }
        let idx = b.index(p);
        b.cells[idx] = CellState::Barrier;
        true
    }

    /// Reset `p` to `Empty`, untracking it if it held the start or goal.
    ///
    /// Refused (`false`) only when out of bounds.
    pub fn clear_cell(&self, p: Point) -> bool {
        let mut b = self.board.borrow_mut();
        if !b.contains(p) {
            return false;
        }
        let idx = b.index(p);
        b.cells[idx] = CellState::Empty;
        if b.start == Some(p) {
            b.start = None;
        }
        if b.goal == Some(p) {
            b.goal = None;
        }
        true
    }

    // -----------------------------------------------------------------------
    // Search markings
    // -----------------------------------------------------------------------

    /// Mark `p` as discovered by the search. No-op out of bounds or on an
    /// endpoint.
    pub fn mark_frontier(&self, p: Point) {
        self.mark(p, CellState::Frontier);
    }

    /// Mark `p` as finalized by the search. No-op out of bounds or on an
    /// endpoint.
    pub fn mark_visited(&self, p: Point) {
        self.mark(p, CellState::Visited);
    }

    /// Mark `p` as lying on the reconstructed path. No-op out of bounds or
    /// on an endpoint.
    pub fn mark_path(&self, p: Point) {
        self.mark(p, CellState::Path);
    }

    fn mark(&self, p: Point, state: CellState) {
        let mut b = self.board.borrow_mut();
        if !b.contains(p) {
            return;
        }
        let idx = b.index(p);
        if b.cells[idx].is_endpoint() {
            return;
        }
        b.cells[idx] = state;
    }

    // -----------------------------------------------------------------------
    // Queries and bulk operations
    // -----------------------------------------------------------------------

    /// Append the in-bounds, non-barrier neighbors of `p` into `buf`, in
    /// fixed exploration order: down, up, right, left.
    ///
    /// Derived fresh from current board state on every call; the caller
    /// clears `buf` before calling.
    pub fn passable_neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        let b = self.board.borrow();
        for d in NEIGHBOR_OFFSETS {
            let np = p.shift(d.x, d.y);
            if b.contains(np) && b.cells[b.index(np)].is_passable() {
                buf.push(np);
            }
        }
    }

    /// Count how many cells hold the given state.
    pub fn count(&self, state: CellState) -> usize {
        let b = self.board.borrow();
        b.cells.iter().filter(|&&c| c == state).count()
    }

    /// Reset every cell to `Empty` and untrack the endpoints.
    pub fn reset(&self) {
        let mut b = self.board.borrow_mut();
        b.cells.fill(CellState::Empty);
        b.start = None;
        b.goal = None;
    }

    /// Reset every `Frontier`, `Visited` and `Path` cell to `Empty`,
    /// leaving barriers and endpoints in place.
    pub fn clear_search_marks(&self) {
        let mut b = self.board.borrow_mut();
        for cell in b.cells.iter_mut() {
            if cell.is_search_mark() {
                *cell = CellState::Empty;
            }
        }
    }

    /// Iterate over `(Point, CellState)` pairs in row-major order.
    pub fn iter(&self) -> GridIter {
        let b = self.board.borrow();
        // Collect a snapshot so we don't hold the borrow across the iterator.
        let items: Vec<(Point, CellState)> = b
            .cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| {
                let p = Point::new(i as i32 % b.side, i as i32 / b.side);
                (p, cell)
            })
            .collect();
        GridIter { items, pos: 0 }
    }
}

/// Iterator over (Point, CellState) pairs of a Grid snapshot.
pub struct GridIter {
    items: Vec<(Point, CellState)>,
    pos: usize,
}

impl Iterator for GridIter {
    type Item = (Point, CellState);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos < self.items.len() {
            let item = self.items[self.pos];
            self.pos += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_all_empty() {
        let g = Grid::new(4);
        assert_eq!(g.side(), 4);
        assert_eq!(g.count(CellState::Empty), 16);
        assert_eq!(g.start(), None);
        assert_eq!(g.goal(), None);
    }

    #[test]
    fn test_at_out_of_bounds() {
        let g = Grid::new(3);
        assert_eq!(g.at(Point::new(3, 0)), None);
        assert_eq!(g.at(Point::new(0, -1)), None);
        assert_eq!(g.at(Point::new(2, 2)), Some(CellState::Empty));
    }

    #[test]
    fn test_clone_shares_cells() {
        let g = Grid::new(4);
        let view = g.clone();
        assert!(g.make_barrier(Point::new(1, 1)));
        assert_eq!(view.at(Point::new(1, 1)), Some(CellState::Barrier));
    }

    #[test]
    fn test_start_goal_guards() {
        let g = Grid::new(5);
        assert!(g.make_start(Point::new(0, 0)));
        // Second start is refused.
        assert!(!g.make_start(Point::new(1, 1)));
        // Goal on the start cell is refused.
        assert!(!g.make_goal(Point::new(0, 0)));
        assert!(g.make_goal(Point::new(4, 4)));
        // Out of bounds is refused.
        assert!(!g.make_goal(Point::new(5, 5)));
        assert_eq!(g.start(), Some(Point::new(0, 0)));
        assert_eq!(g.goal(), Some(Point::new(4, 4)));
    }

    #[test]
    fn test_start_replaces_barrier() {
        // Painting rule: after erasing the start, the next placement may
        // land on any non-goal cell, including an existing barrier.
        let g = Grid::new(3);
        assert!(g.make_barrier(Point::new(1, 1)));
        assert!(g.make_start(Point::new(1, 1)));
        assert_eq!(g.at(Point::new(1, 1)), Some(CellState::Start));
        assert!(!g.is_barrier(Point::new(1, 1)));
    }

    #[test]
    fn test_barrier_refuses_endpoints() {
        let g = Grid::new(3);
        assert!(g.make_start(Point::new(0, 0)));
        assert!(g.make_goal(Point::new(2, 2)));
        assert!(!g.make_barrier(Point::new(0, 0)));
        assert!(!g.make_barrier(Point::new(2, 2)));
        assert!(g.make_barrier(Point::new(1, 1)));
        assert_eq!(g.at(Point::new(0, 0)), Some(CellState::Start));
    }

    #[test]
    fn test_clear_cell_untracks() {
        let g = Grid::new(3);
        assert!(g.make_start(Point::new(0, 0)));
        assert!(g.clear_cell(Point::new(0, 0)));
        assert_eq!(g.start(), None);
        assert_eq!(g.at(Point::new(0, 0)), Some(CellState::Empty));
        // A fresh start can now be placed elsewhere.
        assert!(g.make_start(Point::new(1, 0)));
        assert!(!g.clear_cell(Point::new(9, 9)));
    }

    #[test]
    fn test_marks_never_overwrite_endpoints() {
        let g = Grid::new(3);
        assert!(g.make_start(Point::new(0, 0)));
        assert!(g.make_goal(Point::new(2, 2)));
        g.mark_frontier(Point::new(0, 0));
        g.mark_visited(Point::new(2, 2));
        g.mark_path(Point::new(2, 2));
        assert_eq!(g.at(Point::new(0, 0)), Some(CellState::Start));
        assert_eq!(g.at(Point::new(2, 2)), Some(CellState::Goal));
        g.mark_visited(Point::new(1, 1));
        assert_eq!(g.at(Point::new(1, 1)), Some(CellState::Visited));
    }

    #[test]
    fn test_neighbor_order() {
        let g = Grid::new(5);
        let mut buf = Vec::new();
        g.passable_neighbors(Point::new(2, 2), &mut buf);
        assert_eq!(
            buf,
            vec![
                Point::new(2, 3), // down
                Point::new(2, 1), // up
                Point::new(3, 2), // right
                Point::new(1, 2), // left
            ]
        );
    }

    #[test]
    fn test_neighbors_bounds_and_barriers() {
        let g = Grid::new(3);
        assert!(g.make_barrier(Point::new(1, 0)));
        let mut buf = Vec::new();
        g.passable_neighbors(Point::new(0, 0), &mut buf);
        // Up and left are out of bounds, right is a barrier.
        assert_eq!(buf, vec![Point::new(0, 1)]);
    }

    #[test]
    fn test_neighbors_idempotent() {
        let g = Grid::new(4);
        assert!(g.make_barrier(Point::new(2, 1)));
        let mut a = Vec::new();
        let mut b = Vec::new();
        g.passable_neighbors(Point::new(1, 1), &mut a);
        g.passable_neighbors(Point::new(1, 1), &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_reset() {
        let g = Grid::new(3);
        assert!(g.make_start(Point::new(0, 0)));
        assert!(g.make_goal(Point::new(2, 0)));
        assert!(g.make_barrier(Point::new(1, 1)));
        g.mark_visited(Point::new(0, 1));
        g.reset();
        assert_eq!(g.count(CellState::Empty), 9);
        assert_eq!(g.start(), None);
        assert_eq!(g.goal(), None);
    }

    #[test]
    fn test_clear_search_marks_is_selective() {
        let g = Grid::new(3);
        assert!(g.make_start(Point::new(0, 0)));
        assert!(g.make_goal(Point::new(2, 0)));
        assert!(g.make_barrier(Point::new(1, 1)));
        g.mark_frontier(Point::new(0, 1));
        g.mark_visited(Point::new(1, 0));
        g.mark_path(Point::new(2, 1));
        g.clear_search_marks();
        assert_eq!(g.count(CellState::Frontier), 0);
        assert_eq!(g.count(CellState::Visited), 0);
        assert_eq!(g.count(CellState::Path), 0);
        assert_eq!(g.at(Point::new(0, 0)), Some(CellState::Start));
        assert_eq!(g.at(Point::new(2, 0)), Some(CellState::Goal));
        assert_eq!(g.at(Point::new(1, 1)), Some(CellState::Barrier));
    }

    #[test]
    fn test_iter_row_major() {
        let g = Grid::new(2);
        assert!(g.make_barrier(Point::new(1, 0)));
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0], (Point::new(0, 0), CellState::Empty));
        assert_eq!(items[1], (Point::new(1, 0), CellState::Barrier));
        assert_eq!(items[2], (Point::new(0, 1), CellState::Empty));
    }
}
