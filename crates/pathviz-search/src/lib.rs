//! Step-visible best-first search over pathviz boards.
//!
//! [`Engine`] runs a search (A* or uniform-cost, selected by [`Policy`])
//! over a [`pathviz_core::Grid`], writing `Frontier`/`Visited`/`Path`
//! markings into the board as it goes. After each relaxation pass it
//! invokes a caller-supplied step callback, so intermediate state can be
//! rendered, and polls a cancellation callback so a run can be aborted
//! between steps.
//!
//! A run ends in one of three [`Outcome`]s:
//!
//! - **`Found`** — the goal was reached and the shortest path marked.
//! - **`Exhausted`** — the frontier emptied; the goal is unreachable.
//! - **`Cancelled`** — the cancellation callback returned `true`.
//!
//! The engine owns reusable node caches invalidated by generation
//! stamping, so repeated runs incur no allocations after warm-up.

mod distance;
mod engine;
mod frontier;
mod reconstruct;

pub use distance::manhattan;
pub use engine::{Engine, Outcome, Policy, UNREACHABLE};
pub use frontier::Frontier;
