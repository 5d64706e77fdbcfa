use smallvec::SmallVec;

/// A cell coordinate on the grid. `x` spans `[0, width)`, `y` spans `[0, height)`,
/// both 0-indexed with `(0, 0)` in the top left corner.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

pub type PositionSmallVec = SmallVec<[Position; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    /// The fixed expansion order used by the breadth first solver:
    /// right, left, down, up.
    pub const BFS_ORDER: [Direction; 4] =
        [Direction::East, Direction::West, Direction::South, Direction::North];
}

impl Position {
    pub fn new(x: u32, y: u32) -> Position {
        Position { x, y }
    }

    /// The position one cell away in the given direction.
    /// Returns None if the coordinate is not representable (underflow at the
    /// grid edge). Staying within a particular grid's extent is the grid's
    /// concern, not the coordinate's.
    pub fn offset(&self, dir: Direction) -> Option<Position> {
        self.offset_by(dir, 1)
    }

    /// The position `distance` cells away in the given direction, if representable.
    pub fn offset_by(&self, dir: Direction, distance: u32) -> Option<Position> {
        let (x, y) = (self.x, self.y);
        match dir {
            Direction::North => y.checked_sub(distance).map(|y| Position { x, y }),
            Direction::South => Some(Position { x, y: y + distance }),
            Direction::East => Some(Position { x: x + distance, y }),
            Direction::West => x.checked_sub(distance).map(|x| Position { x, y }),
        }
    }
}

/// Per-cell state. Everything starts as solid wall; generators knock walls
/// down and solvers paint `visited`/`solution` marks over the open cells.
/// The marks are meaningless while `wall` is true.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct CellState {
    pub wall: bool,
    pub visited: bool,
    pub solution: bool,
}

impl CellState {
    pub fn solid() -> CellState {
        CellState {
            wall: true,
            visited: false,
            solution: false,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn offsets_in_each_direction() {
        let p = Position::new(2, 2);
        assert_eq!(p.offset(Direction::North), Some(Position::new(2, 1)));
        assert_eq!(p.offset(Direction::South), Some(Position::new(2, 3)));
        assert_eq!(p.offset(Direction::East), Some(Position::new(3, 2)));
        assert_eq!(p.offset(Direction::West), Some(Position::new(1, 2)));
    }

    #[test]
    fn offsets_underflowing_the_coordinate_space_are_none() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.offset(Direction::North), None);
        assert_eq!(origin.offset(Direction::West), None);
        assert_eq!(origin.offset(Direction::South), Some(Position::new(0, 1)));
        assert_eq!(origin.offset(Direction::East), Some(Position::new(1, 0)));
    }

    #[test]
    fn two_step_offsets_walk_the_carving_lattice() {
        let p = Position::new(1, 1);
        assert_eq!(p.offset_by(Direction::East, 2), Some(Position::new(3, 1)));
        assert_eq!(p.offset_by(Direction::North, 2), None);
    }

    #[test]
    fn cells_start_solid_and_unmarked() {
        let cell = CellState::solid();
        assert!(cell.wall);
        assert!(!cell.visited);
        assert!(!cell.solution);
    }
}
