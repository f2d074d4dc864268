//! pathviz — interactive grid pathfinding visualizer for the terminal.
//!
//! Paint a board with the mouse (the first click places the start, the
//! second the goal, later ones draw barriers; right-click erases), pick an
//! algorithm with `a` (A*) or `d` (Dijkstra), and press space to watch the
//! search explore the board step by step.

mod app;

use app::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new();
    app.run()?;
    Ok(())
}
