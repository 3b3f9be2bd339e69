use crate::{Cell, PixelInt};
use rand::Rng;

/// Toroidal playfield measured in pixels and split into square cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: PixelInt,
    height: PixelInt,
    cell_size: PixelInt,
}

impl Grid {
    /// Dimensions are validated by `GameConfig::new`.
    pub(crate) fn new(width: PixelInt, height: PixelInt, cell_size: PixelInt) -> Self {
        Grid { width, height, cell_size }
    }

    pub fn width(&self) -> PixelInt {
        self.width
    }

    pub fn height(&self) -> PixelInt {
        self.height
    }

    pub fn cell_size(&self) -> PixelInt {
        self.cell_size
    }

    pub fn columns(&self) -> PixelInt {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> PixelInt {
        self.height / self.cell_size
    }

    /// Number of cells on the board. Both factors are positive, so widening first cannot overflow.
    pub fn cell_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    pub fn center(&self) -> Cell {
        (self.columns() / 2 * self.cell_size, self.rows() / 2 * self.cell_size)
    }

    /// Steps `cell` by `(dx, dy)` cells, re-entering from the opposite edge when it leaves the grid.
    pub fn wrap(&self, cell: Cell, dx: PixelInt, dy: PixelInt) -> Cell {
        (
            (cell.0 + dx * self.cell_size).rem_euclid(self.width),
            (cell.1 + dy * self.cell_size).rem_euclid(self.height),
        )
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        (
            rng.gen_range(0..self.columns()) * self.cell_size,
            rng.gen_range(0..self.rows()) * self.cell_size,
        )
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.0)
            && (0..self.height).contains(&cell.1)
            && cell.0 % self.cell_size == 0
            && cell.1 % self.cell_size == 0
    }

    /// Column and row index of a pixel-aligned cell.
    pub fn index_of(&self, cell: Cell) -> (PixelInt, PixelInt) {
        (cell.0 / self.cell_size, cell.1 / self.cell_size)
    }
}
