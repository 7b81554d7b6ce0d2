use crate::consts;
use rand::Rng;
use std::fmt;

/// A position on the playfield, in playfield units.  Every cell the game
/// produces has coordinates that are multiples of the grid's cell size.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The playfield: a `width` × `height` area divided into square cells of
/// `cell_size` units.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: i32,
    height: i32,
    cell_size: i32,
}

impl Grid {
    pub(crate) const fn new(width: i32, height: i32, cell_size: i32) -> Grid {
        Grid {
            width,
            height,
            cell_size,
        }
    }

    pub(crate) fn cell_size(self) -> i32 {
        self.cell_size
    }

    /// Number of cells in each row
    pub(crate) fn columns(self) -> i32 {
        self.width / self.cell_size
    }

    /// Number of cells in each column
    pub(crate) fn rows(self) -> i32 {
        self.height / self.cell_size
    }

    pub(crate) fn is_in_bounds(self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Pick a cell uniformly at random, never from the first row or column.
    pub(crate) fn random_cell<R: Rng>(self, rng: &mut R) -> Cell {
        let col = rng.random_range(1..self.columns());
        let row = rng.random_range(1..self.rows());
        Cell::new(col * self.cell_size, row * self.cell_size)
    }

    /// Map `cell` to canvas coordinates, where the origin is the bottom-left
    /// cell and one canvas unit is one playfield unit.
    pub(crate) fn plot_point(self, cell: Cell) -> (f64, f64) {
        (f64::from(cell.x), f64::from(self.max_y() - cell.y))
    }

    /// The x coordinate of the rightmost column
    pub(crate) fn max_x(self) -> i32 {
        (self.columns() - 1) * self.cell_size
    }

    /// The y coordinate of the bottom row
    pub(crate) fn max_y(self) -> i32 {
        (self.rows() - 1) * self.cell_size
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(consts::WIDTH, consts::HEIGHT, consts::CELL_SIZE)
    }
}
