use pathviz_core::Grid;

use crate::engine::{Engine, NO_PARENT};

impl Engine {
    /// Mark the reconstructed path on the board.
    ///
    /// Walks the predecessor chain from the goal's parent toward the
    /// start, marking every cell strictly between the endpoints `Path`
    /// and invoking `on_step` once per marked cell. The endpoints keep
    /// their own states; adjacent endpoints mark nothing.
    pub(crate) fn reconstruct(&self, grid: &Grid, goal_idx: usize, on_step: &mut impl FnMut()) {
        let mut ci = self.nodes[goal_idx].parent;
        while ci != NO_PARENT && self.nodes[ci].parent != NO_PARENT {
            grid.mark_path(self.point(ci));
            on_step();
            ci = self.nodes[ci].parent;
        }
    }
}
