use super::grid::Cell;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell `distance` units away from `cell` in this direction.
    /// Does not check bounds.
    pub(crate) fn advance(self, cell: Cell, distance: i32) -> Cell {
        let Cell { mut x, mut y } = cell;
        match self {
            Direction::Up => y -= distance,
            Direction::Down => y += distance,
            Direction::Left => x -= distance,
            Direction::Right => x += distance,
        }
        Cell { x, y }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
