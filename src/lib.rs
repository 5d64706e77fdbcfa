//! **warren** carves perfect mazes into a rectangular wall grid and finds
//! routes through them.
//!
//! The crate is the algorithmic core only: callers construct a [`grid::Grid`],
//! run one of the [`generators`] to carve it, then run one of the [`pathing`]
//! solvers against it. Rendering, input handling and animation pacing belong
//! to the caller, which observes progress through the [`stepping`] hook and
//! reads cell state back through the grid's accessors.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod pathing;
pub mod stepping;
