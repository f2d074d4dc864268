//! **pathviz-core** — board model for the pathviz pathfinding visualizer.
//!
//! This crate provides the data types shared by the search engine and the
//! rendering front-end: a geometry primitive ([`Point`]), the exclusive
//! per-cell state ([`CellState`]), and the board itself ([`Grid`]).
//!
//! [`Grid`] uses shared backing storage: cloning a grid yields another
//! handle onto the same cells, so a renderer and a running search can each
//! hold one while all mutation goes through `&self` methods.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::CellState;
pub use geom::Point;
pub use grid::Grid;
