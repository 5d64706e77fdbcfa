use std::fmt;

use thiserror::Error;

use crate::cells::{CellState, Direction, Position, PositionSmallVec};

/// Smallest usable maze extent. Anything below this cannot hold the one cell
/// border ring plus a carving lattice between start and end.
pub const MIN_DIMENSION: u32 = 5;

#[derive(Error, Debug, Eq, PartialEq, Copy, Clone)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} are below the minimum {min}x{min}",
            min = MIN_DIMENSION)]
    InvalidDimensions { width: u32, height: u32 },
    #[error("coordinate ({x}, {y}) is outside the grid extent")]
    OutOfBounds { x: u32, y: u32 },
}

/// A rectangular maze grid: a dense row-major array of cell states plus the
/// two distinguished start/end positions.
///
/// The grid value is fully owned by the caller for one maze session. A
/// generator mutates it from all-walls to a perfect maze, solvers mutate the
/// `visited`/`solution` marks in place, and the whole value is discarded when
/// a new maze is wanted.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
    start: Position,
    end: Position,
    busy: bool,
}

impl Grid {
    /// Create an all-walls grid. Only a lower bound is enforced on the
    /// dimensions; capping them is caller policy (the CLI caps at 50).
    pub fn new(width: u32, height: u32) -> Result<Grid, GridError> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(GridError::InvalidDimensions { width, height });
        }

        let cells_count = (width as usize) * (height as usize);
        Ok(Grid {
            width,
            height,
            cells: vec![CellState::solid(); cells_count],
            start: Position::new(1, 1),
            end: Position::new(width - 2, height - 2),
            busy: false,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total cell count.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.end
    }

    pub fn set_start(&mut self, pos: Position) {
        debug_assert!(self.contains(pos));
        self.start = pos;
    }

    pub fn set_end(&mut self, pos: Position) {
        debug_assert!(self.contains(pos));
        self.end = pos;
    }

    /// Is the coordinate within this grid's extent?
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Is the coordinate strictly inside the border ring? The carving lattice
    /// both generators walk never touches the outermost cells.
    #[inline]
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.y >= 1 && pos.x < self.width - 1 && pos.y < self.height - 1
    }

    /// Convert a coordinate to its row-major index, rejecting coordinates
    /// outside the grid extent.
    #[inline]
    pub fn cell_index(&self, pos: Position) -> Result<usize, GridError> {
        if self.contains(pos) {
            Ok((pos.y as usize) * (self.width as usize) + (pos.x as usize))
        } else {
            Err(GridError::OutOfBounds { x: pos.x, y: pos.y })
        }
    }

    /// Panics if the coordinate is out of the grid extent - using one is a
    /// contract violation by the caller, never silently clamped.
    #[inline]
    fn index_or_die(&self, pos: Position) -> usize {
        match self.cell_index(pos) {
            Ok(index) => index,
            Err(e) => panic!("{}", e),
        }
    }

    /// Panics on out of range coordinates.
    #[inline]
    pub fn cell(&self, pos: Position) -> &CellState {
        let index = self.index_or_die(pos);
        &self.cells[index]
    }

    #[inline]
    fn cell_mut(&mut self, pos: Position) -> &mut CellState {
        let index = self.index_or_die(pos);
        &mut self.cells[index]
    }

    #[inline]
    pub fn is_wall(&self, pos: Position) -> bool {
        self.cell(pos).wall
    }

    #[inline]
    pub fn set_wall(&mut self, pos: Position, wall: bool) {
        self.cell_mut(pos).wall = wall;
    }

    #[inline]
    pub fn is_visited(&self, pos: Position) -> bool {
        self.cell(pos).visited
    }

    #[inline]
    pub fn set_visited(&mut self, pos: Position, visited: bool) {
        self.cell_mut(pos).visited = visited;
    }

    #[inline]
    pub fn is_solution(&self, pos: Position) -> bool {
        self.cell(pos).solution
    }

    #[inline]
    pub fn set_solution(&mut self, pos: Position, solution: bool) {
        self.cell_mut(pos).solution = solution;
    }

    /// Cells to the North, South, East or West of a coordinate, filtered to
    /// those inside the grid extent. No particular order; callers wanting a
    /// randomised order shuffle the result themselves.
    pub fn neighbours(&self, pos: Position) -> PositionSmallVec {
        Direction::ALL
            .iter()
            .filter_map(|&dir| pos.offset(dir))
            .filter(|&adjacent| self.contains(adjacent))
            .collect()
    }

    /// Clear every `visited` and `solution` mark, leaving the walls as they
    /// are. Idempotent and safe on a never-solved grid.
    pub fn reset_marks(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
            cell.solution = false;
        }
    }

    /// Row-major iterator over every coordinate in the grid.
    pub fn positions(&self) -> Positions {
        Positions {
            next_index: 0,
            width: self.width as usize,
            cells_count: self.size(),
        }
    }

    /// True while a generation or solve run is in flight against this grid.
    /// Observers called back mid-run see it set; a caller holding the grid
    /// between runs sees it clear.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    #[inline]
    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }
}

const WALL_GLYPH: char = '#';
const OPEN_GLYPH: char = ' ';
const VISITED_GLYPH: char = '.';
const SOLUTION_GLYPH: char = '*';
const START_GLYPH: char = 'S';
const END_GLYPH: char = 'E';

/// One text row per grid row. Start/end render with their own glyphs whatever
/// their marks are, mirroring how a cell class is picked in any renderer of
/// this grid: wall, then start/end, then solution, then visited, then open.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                let cell = self.cell(pos);
                let glyph = if cell.wall {
                    WALL_GLYPH
                } else if pos == self.start {
                    START_GLYPH
                } else if pos == self.end {
                    END_GLYPH
                } else if cell.solution {
                    SOLUTION_GLYPH
                } else if cell.visited {
                    VISITED_GLYPH
                } else {
                    OPEN_GLYPH
                };
                f.write_fmt(format_args!("{}", glyph))?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Positions {
    next_index: usize,
    width: usize,
    cells_count: usize,
}

impl Iterator for Positions {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index < self.cells_count {
            let y = self.next_index / self.width;
            let x = self.next_index - (y * self.width);
            self.next_index += 1;
            Some(Position::new(x as u32, y as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.next_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Positions {} // default impl using size_hint()

#[cfg(test)]
mod tests {

    use itertools::Itertools; // a trait

    use super::*;

    fn grid(w: u32, h: u32) -> Grid {
        Grid::new(w, h).expect("test grid dimensions should be valid")
    }

    #[test]
    fn new_grid_is_all_walls_with_no_marks() {
        let g = grid(5, 7);
        assert_eq!(g.size(), 35);
        for pos in g.positions() {
            assert!(g.is_wall(pos));
            assert!(!g.is_visited(pos));
            assert!(!g.is_solution(pos));
        }
    }

    #[test]
    fn dimensions_below_minimum_are_rejected() {
        assert_eq!(Grid::new(4, 10).unwrap_err(),
                   GridError::InvalidDimensions { width: 4, height: 10 });
        assert_eq!(Grid::new(10, 4).unwrap_err(),
                   GridError::InvalidDimensions { width: 10, height: 4 });
        assert_eq!(Grid::new(0, 0).unwrap_err(),
                   GridError::InvalidDimensions { width: 0, height: 0 });
        assert!(Grid::new(5, 5).is_ok());
    }

    #[test]
    fn default_start_and_end_positions() {
        let g = grid(9, 7);
        assert_eq!(g.start(), Position::new(1, 1));
        assert_eq!(g.end(), Position::new(7, 5));
    }

    #[test]
    fn wall_and_mark_accessors_roundtrip() {
        let mut g = grid(5, 5);
        let p = Position::new(2, 3);

        g.set_wall(p, false);
        assert!(!g.is_wall(p));
        g.set_visited(p, true);
        assert!(g.is_visited(p));
        g.set_solution(p, true);
        assert!(g.is_solution(p));

        // Other cells are untouched.
        assert!(g.is_wall(Position::new(2, 2)));
        assert!(!g.is_visited(Position::new(2, 2)));
    }

    #[test]
    #[should_panic(expected = "outside the grid extent")]
    fn out_of_range_read_fails_fast() {
        let g = grid(5, 5);
        g.is_wall(Position::new(5, 0));
    }

    #[test]
    #[should_panic(expected = "outside the grid extent")]
    fn out_of_range_write_fails_fast() {
        let mut g = grid(5, 5);
        g.set_visited(Position::new(0, 5), true);
    }

    #[test]
    fn cell_index_maps_row_major_and_rejects_out_of_range() {
        let g = grid(5, 5);
        assert_eq!(g.cell_index(Position::new(0, 0)), Ok(0));
        assert_eq!(g.cell_index(Position::new(4, 0)), Ok(4));
        assert_eq!(g.cell_index(Position::new(0, 1)), Ok(5));
        assert_eq!(g.cell_index(Position::new(4, 4)), Ok(24));
        assert_eq!(g.cell_index(Position::new(5, 4)),
                   Err(GridError::OutOfBounds { x: 5, y: 4 }));
        assert_eq!(g.cell_index(Position::new(4, 5)),
                   Err(GridError::OutOfBounds { x: 4, y: 5 }));
        assert_eq!(g.cell_index(Position::new(u32::MAX, u32::MAX)),
                   Err(GridError::OutOfBounds { x: u32::MAX, y: u32::MAX }));
    }

    #[test]
    fn neighbour_cells() {
        let g = grid(10, 10);

        let check_expected_neighbours = |pos, expected_neighbours: &[Position]| {
            let neighbours: Vec<Position> = g.neighbours(pos).iter().cloned().sorted().collect();
            let expected: Vec<Position> =
                expected_neighbours.iter().cloned().sorted().collect();
            assert_eq!(neighbours, expected);
        };
        let gc = |x, y| Position::new(x, y);

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(1, 1), gc(2, 0)]);
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(0, 2), gc(1, 1)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn interior_excludes_the_border_ring() {
        let g = grid(5, 5);
        assert!(g.is_interior(Position::new(1, 1)));
        assert!(g.is_interior(Position::new(3, 3)));
        assert!(!g.is_interior(Position::new(0, 2)));
        assert!(!g.is_interior(Position::new(2, 0)));
        assert!(!g.is_interior(Position::new(4, 2)));
        assert!(!g.is_interior(Position::new(2, 4)));
    }

    #[test]
    fn reset_marks_clears_marks_but_not_walls() {
        let mut g = grid(5, 5);
        let open = Position::new(1, 1);
        g.set_wall(open, false);
        g.set_visited(open, true);
        g.set_solution(Position::new(2, 1), true);

        g.reset_marks();
        for pos in g.positions() {
            assert!(!g.is_visited(pos));
            assert!(!g.is_solution(pos));
        }
        assert!(!g.is_wall(open));

        // Idempotent, and safe on a grid that was never solved.
        g.reset_marks();
        assert!(!g.is_visited(open));
    }

    #[test]
    fn positions_iterates_row_major() {
        let g = grid(5, 5);
        let all: Vec<Position> = g.positions().collect();
        assert_eq!(all.len(), g.size());
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[1], Position::new(1, 0));
        assert_eq!(all[5], Position::new(0, 1));
        assert_eq!(all[24], Position::new(4, 4));
        assert_eq!(g.positions().len(), 25);
    }

    #[test]
    fn display_renders_one_line_per_row() {
        let mut g = grid(5, 5);
        g.set_wall(g.start(), false);
        g.set_wall(g.end(), false);
        let open = Position::new(2, 1);
        g.set_wall(open, false);
        g.set_visited(open, true);

        let text = format!("{}", g);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "#####");
        assert_eq!(lines[1], "#S.##");
        assert_eq!(lines[3], "###E#");
    }

    #[test]
    fn fresh_grid_is_idle() {
        let g = grid(5, 5);
        assert!(!g.is_busy());
    }
}
