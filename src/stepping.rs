//! Cooperative progress observation for the long running carve and solve
//! loops.
//!
//! Both generators and solvers notify a caller supplied `Stepper` at well
//! defined points - after each carve, or every few frontier pops - and do not
//! proceed until it returns. The core owns no wall clock pacing: a UI sleeps
//! inside its stepper to animate, a test harness returns immediately and the
//! run completes synchronously.

use crate::grid::Grid;

/// The observer's verdict after each progress notification.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Step {
    Continue,
    /// Abandon the traversal. The grid is left in whatever partially carved
    /// or partially marked state it had reached - no rollback. Callers that
    /// need a clean slate call `reset_marks` or rebuild the grid.
    Stop,
}

/// Observer hook invoked with the current grid after each meaningful
/// mutation. The grid reference is read only; `Grid::is_busy` is true for the
/// duration of the callback.
pub trait Stepper {
    fn notify(&mut self, grid: &Grid) -> Step;
}

/// Run-to-completion observer: no intermediate observation, never stops.
#[derive(Debug, Default, Copy, Clone)]
pub struct Silent;

impl Stepper for Silent {
    fn notify(&mut self, _: &Grid) -> Step {
        Step::Continue
    }
}

impl<F> Stepper for F
where
    F: FnMut(&Grid) -> Step,
{
    fn notify(&mut self, grid: &Grid) -> Step {
        self(grid)
    }
}
