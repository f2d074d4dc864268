//! Per-cell board state.

/// The exclusive state of one board cell.
///
/// A cell is in exactly one state at a time. `Frontier`, `Visited` and
/// `Path` are written by a search run and replace `Empty`, never `Start`,
/// `Goal` or `Barrier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Unused cell, open to exploration.
    #[default]
    Empty,
    /// An obstacle; never enters a search frontier.
    Barrier,
    /// The single search origin.
    Start,
    /// The single search target.
    Goal,
    /// Discovered but not yet finalized by the search.
    Frontier,
    /// Finalized by the search, off the reconstructed path.
    Visited,
    /// On the reconstructed shortest path.
    Path,
}

impl CellState {
    /// Whether a search may step onto a cell in this state.
    pub const fn is_passable(self) -> bool {
        !matches!(self, CellState::Barrier)
    }

    /// Whether this is one of the two endpoint states.
    pub const fn is_endpoint(self) -> bool {
        matches!(self, CellState::Start | CellState::Goal)
    }

    /// Whether this state was written by a search run.
    pub const fn is_search_mark(self) -> bool {
        matches!(
            self,
            CellState::Frontier | CellState::Visited | CellState::Path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert_eq!(CellState::default(), CellState::Empty);
    }

    #[test]
    fn only_barriers_block() {
        assert!(!CellState::Barrier.is_passable());
        assert!(CellState::Empty.is_passable());
        assert!(CellState::Start.is_passable());
        assert!(CellState::Goal.is_passable());
        assert!(CellState::Frontier.is_passable());
        assert!(CellState::Visited.is_passable());
        assert!(CellState::Path.is_passable());
    }

    #[test]
    fn endpoint_and_mark_partition() {
        assert!(CellState::Start.is_endpoint());
        assert!(CellState::Goal.is_endpoint());
        assert!(!CellState::Frontier.is_endpoint());

        assert!(CellState::Frontier.is_search_mark());
        assert!(CellState::Visited.is_search_mark());
        assert!(CellState::Path.is_search_mark());
        assert!(!CellState::Barrier.is_search_mark());
        assert!(!CellState::Start.is_search_mark());
    }
}
