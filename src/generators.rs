//! Maze generation algorithms.
//!
//! Both strategies carve a perfect maze - a spanning tree over the open
//! cells, no cycles - into an all-walls grid, on a lattice of odd coordinates
//! with wall cells between the lattice points. They differ only in structural
//! bias: the backtracker produces long winding corridors, Prim's frontier
//! expansion produces shorter, branchier ones.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::{Direction, Position, PositionSmallVec};
use crate::grid::Grid;
use crate::stepping::{Step, Stepper};

/// Carve a perfect maze by randomized depth first backtracking.
///
/// Starting at `(1, 1)` the current cell is opened and the four two-step
/// directions are tried in an order shuffled through the RNG port. A target
/// lying strictly inside the border ring and still walled has the wall
/// between it and the current cell knocked through, the stepper is notified,
/// and the walk descends into the target; a cell with every direction
/// exhausted is popped. The walk uses an explicit stack so large grids cannot
/// exhaust call stack depth. The end cell is forced open afterwards, since
/// the lattice parity on even dimensions can leave it isolated.
///
/// Deterministic for a fixed RNG sequence.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, rng: &mut R, stepper: &mut dyn Stepper) {
    grid.set_busy(true);

    let start = Position::new(1, 1);
    let end = Position::new(grid.width() - 2, grid.height() - 2);
    grid.set_start(start);
    grid.set_end(end);

    grid.set_wall(start, false);
    let mut carves = 0usize;
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);

        let mut descended = false;
        for &dir in &directions {
            let target = match current.offset_by(dir, 2) {
                Some(target) => target,
                None => continue,
            };
            if !grid.is_interior(target) || !grid.is_wall(target) {
                continue;
            }

            let between = current
                .offset(dir)
                .expect("an interior cell's one-step neighbour is representable");
            grid.set_wall(between, false);
            grid.set_wall(target, false);
            carves += 1;

            if stepper.notify(grid) == Step::Stop {
                debug!("recursive backtracker stopped by observer after {} carves", carves);
                grid.set_busy(false);
                return;
            }

            stack.push(target);
            descended = true;
            break;
        }

        if !descended {
            stack.pop();
        }
    }

    grid.set_wall(end, false);
    let _ = stepper.notify(grid);
    grid.set_busy(false);
    debug!("recursive backtracker finished: {} passages carved on {}x{}",
           carves,
           grid.width(),
           grid.height());
}

/// Carve a perfect maze by randomized frontier expansion (Prim's algorithm on
/// the wall/passage lattice).
///
/// The start cell is opened and its bordering wall cells seed the frontier.
/// Each round removes a uniformly random frontier member and counts its open
/// orthogonal neighbours: exactly one means the wall borders exactly one
/// carved region, so it is knocked through together with the lattice cell it
/// reveals on its far side, the stepper is notified, and the revealed cell's
/// still-walled neighbours join the frontier. Zero or more than one open
/// neighbour would leave the wall unreachable or join two already connected
/// regions (closing a cycle), so the candidate is discarded. The end cell is
/// forced open once the frontier drains, as in [`recursive_backtracker`] - a
/// no-op on odd dimensions, where the lattice expansion is guaranteed to have
/// reached it.
pub fn randomized_prim<R: Rng>(grid: &mut Grid, rng: &mut R, stepper: &mut dyn Stepper) {
    grid.set_busy(true);

    let start = Position::new(1, 1);
    let end = Position::new(grid.width() - 2, grid.height() - 2);
    grid.set_start(start);
    grid.set_end(end);

    grid.set_wall(start, false);
    let mut carves = 0usize;
    let mut frontier: Vec<Position> = Vec::new();
    extend_frontier(grid, start, &mut frontier);

    while !frontier.is_empty() {
        let drawn = rng.gen_range(0..frontier.len());
        let candidate = frontier.swap_remove(drawn);

        let open_adjacent: PositionSmallVec = grid.neighbours(candidate)
            .iter()
            .filter(|&&adjacent| !grid.is_wall(adjacent))
            .cloned()
            .collect();
        if open_adjacent.len() != 1 {
            // Unreachable (0) or would join two already connected regions.
            continue;
        }

        grid.set_wall(candidate, false);
        carves += 1;

        // The lattice cell on the far side of the wall: the reflection of
        // the open neighbour through the candidate.
        let from = open_adjacent[0];
        let revealed = Position::new(2 * candidate.x - from.x, 2 * candidate.y - from.y);
        if grid.is_interior(revealed) && grid.is_wall(revealed) {
            grid.set_wall(revealed, false);
            extend_frontier(grid, revealed, &mut frontier);
        }

        if stepper.notify(grid) == Step::Stop {
            debug!("randomized prim stopped by observer after {} carves", carves);
            grid.set_busy(false);
            return;
        }
    }

    grid.set_wall(end, false);
    let _ = stepper.notify(grid);
    grid.set_busy(false);
    debug!("randomized prim finished: {} passages carved on {}x{}",
           carves,
           grid.width(),
           grid.height());
}

/// Add the still-walled interior neighbours of a freshly opened cell to the
/// frontier, keeping it duplicate free.
fn extend_frontier(grid: &Grid, from: Position, frontier: &mut Vec<Position>) {
    for dir in Direction::ALL {
        if let Some(adjacent) = from.offset(dir) {
            if grid.is_interior(adjacent) && grid.is_wall(adjacent)
               && !frontier.contains(&adjacent) {
                frontier.push(adjacent);
            }
        }
    }
}
