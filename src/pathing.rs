//! Route finding over a carved grid.
//!
//! Both solvers walk the open cells from the grid's start towards its end,
//! painting `visited` marks as they go and `solution` marks over the
//! reconstructed path once the end is reached. They share one frontier
//! contract and differ in frontier discipline: breadth first uses a FIFO
//! queue with a fixed expansion order (so the first path found is a shortest
//! one), depth first uses a LIFO stack with the directions reshuffled before
//! every expansion (so each run explores a different shape).
//!
//! Solvers always clear prior marks before starting, making repeated calls
//! against the same grid idempotent from the caller's perspective.

use std::collections::VecDeque;

use fnv::FnvHashSet;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::{Direction, Position};
use crate::grid::Grid;
use crate::stepping::{Step, Stepper};

/// Observers are notified once every this many frontier pops, bounding the
/// callback frequency while a solve crawls over a large grid.
pub const NOTIFY_INTERVAL: usize = 5;

/// Summary of one solve run, for observability - the counters feed a status
/// line, not the algorithm.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SolveReport {
    /// Total frontier entries dequeued or popped.
    pub steps_taken: usize,
    /// Cells marked `visited` (every popped cell other than the start).
    pub cells_visited: usize,
    pub path_found: bool,
    /// Edge count of the found path. `Some(0)` means start == end, which is
    /// a found path - distinct from `None`, no path at all.
    pub path_length: Option<usize>,
}

impl SolveReport {
    fn unreached(steps_taken: usize, cells_visited: usize) -> SolveReport {
        SolveReport {
            steps_taken,
            cells_visited,
            path_found: false,
            path_length: None,
        }
    }
}

/// A frontier entry: a cell plus the ordered positions traversed to reach it
/// from the start (its reconstruction path, exclusive of the cell itself).
type FrontierEntry = (Position, Vec<Position>);

/// Find a shortest path from the grid's start to its end by breadth first
/// search.
///
/// Directions are expanded in the fixed order right, left, down, up - no
/// shuffling, so the solver is deterministic and the first time the end is
/// popped its accompanying path has the fewest edges possible. Exhausting the
/// frontier without reaching the end is a normal result, not an error: a
/// caller may hand over an arbitrary grid, not just a freshly carved maze.
pub fn breadth_first(grid: &mut Grid, stepper: &mut dyn Stepper) -> SolveReport {
    grid.reset_marks();
    grid.set_busy(true);

    let start = grid.start();
    let end = grid.end();

    let mut enqueued: FnvHashSet<Position> = FnvHashSet::default();
    enqueued.insert(start);
    let mut queue: VecDeque<FrontierEntry> = VecDeque::new();
    queue.push_back((start, Vec::new()));

    let mut steps = 0usize;
    let mut cells_visited = 0usize;

    while let Some((current, path)) = queue.pop_front() {
        steps += 1;
        if current != start {
            grid.set_visited(current, true);
            cells_visited += 1;
        }

        if steps % NOTIFY_INTERVAL == 0 && stepper.notify(grid) == Step::Stop {
            grid.set_busy(false);
            debug!("breadth first stopped by observer after {} steps", steps);
            return SolveReport::unreached(steps, cells_visited);
        }

        if current == end {
            return mark_solution(grid, stepper, path, steps, cells_visited);
        }

        for dir in Direction::BFS_ORDER {
            enqueue_open_neighbour(grid, current, dir, &path, &mut enqueued, |entry| {
                queue.push_back(entry)
            });
        }
    }

    grid.set_busy(false);
    debug!("breadth first exhausted the frontier after {} steps: no path", steps);
    SolveReport::unreached(steps, cells_visited)
}

/// Find some path from the grid's start to its end by depth first search.
///
/// The frontier is a stack and the four directions are shuffled through the
/// RNG port before every expansion, so each run wanders differently and the
/// path found carries no shortest-length guarantee. If any path exists one is
/// found; termination is bounded by the open cell count since no cell enters
/// the frontier twice.
pub fn depth_first<R: Rng>(grid: &mut Grid, rng: &mut R, stepper: &mut dyn Stepper) -> SolveReport {
    grid.reset_marks();
    grid.set_busy(true);

    let start = grid.start();
    let end = grid.end();

    let mut enqueued: FnvHashSet<Position> = FnvHashSet::default();
    enqueued.insert(start);
    let mut stack: Vec<FrontierEntry> = vec![(start, Vec::new())];

    let mut steps = 0usize;
    let mut cells_visited = 0usize;

    while let Some((current, path)) = stack.pop() {
        steps += 1;
        if current != start {
            grid.set_visited(current, true);
            cells_visited += 1;
        }

        if steps % NOTIFY_INTERVAL == 0 && stepper.notify(grid) == Step::Stop {
            grid.set_busy(false);
            debug!("depth first stopped by observer after {} steps", steps);
            return SolveReport::unreached(steps, cells_visited);
        }

        if current == end {
            return mark_solution(grid, stepper, path, steps, cells_visited);
        }

        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        for dir in directions {
            enqueue_open_neighbour(grid, current, dir, &path, &mut enqueued, |entry| {
                stack.push(entry)
            });
        }
    }

    grid.set_busy(false);
    debug!("depth first exhausted the frontier after {} steps: no path", steps);
    SolveReport::unreached(steps, cells_visited)
}

/// Push the neighbour one step away onto the frontier if it is inside the
/// grid, open, and not already enqueued. The entry carries its reconstruction
/// path: the current cell's path extended by the current cell.
fn enqueue_open_neighbour<PushFn>(grid: &Grid,
                                  current: Position,
                                  dir: Direction,
                                  path: &[Position],
                                  enqueued: &mut FnvHashSet<Position>,
                                  mut push: PushFn)
    where PushFn: FnMut(FrontierEntry)
{
    if let Some(next) = current.offset(dir) {
        if grid.contains(next) && !grid.is_wall(next) && enqueued.insert(next) {
            let mut next_path = Vec::with_capacity(path.len() + 1);
            next_path.extend_from_slice(path);
            next_path.push(current);
            push((next, next_path));
        }
    }
}

/// The end was popped: paint the `solution` marks over the interior of its
/// reconstruction path. The path holds the start through the end's
/// predecessor; the start and end themselves are skipped since they render
/// through their own distinguished status.
fn mark_solution(grid: &mut Grid,
                 stepper: &mut dyn Stepper,
                 path: Vec<Position>,
                 steps_taken: usize,
                 cells_visited: usize)
                 -> SolveReport {
    for &pos in path.iter().skip(1) {
        grid.set_solution(pos, true);
    }
    let _ = stepper.notify(grid);
    grid.set_busy(false);

    SolveReport {
        steps_taken,
        cells_visited,
        path_found: true,
        // One edge per path cell: the path excludes the end but includes the
        // start, so its length is exactly the edge count start -> end.
        path_length: Some(path.len()),
    }
}
