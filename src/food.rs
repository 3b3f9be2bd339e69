use crate::grid::Grid;
use crate::palette::{Color, APPLE_COLOR};
use crate::Cell;

use rand::Rng;

pub struct Apple {
    cell: Cell,
    color: Color,
}

impl Apple {
    pub fn new<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        Apple { cell: grid.random_cell(rng), color: APPLE_COLOR }
    }

    /// Moves the apple to a random cell. Keeping it off the snake is up to the caller.
    pub fn relocate<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) {
        self.cell = grid.random_cell(rng);
    }

    pub fn occupied_cell(&self) -> Cell {
        self.cell
    }

    pub fn color(&self) -> Color {
        self.color
    }

    #[cfg(test)]
    pub(crate) fn at(cell: Cell) -> Self {
        Apple { cell, color: APPLE_COLOR }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_relocate_stays_on_grid() {
        let grid = Grid::new(640, 480, 20);
        let mut rng = StdRng::seed_from_u64(42);
        let mut apple = Apple::new(&grid, &mut rng);

        for _ in 0..100 {
            apple.relocate(&grid, &mut rng);
            assert!(grid.contains(apple.occupied_cell()));
        }
        assert_eq!(apple.color(), APPLE_COLOR);
    }

    #[test]
    fn test_relocate_eventually_moves() {
        let grid = Grid::new(640, 480, 20);
        let mut rng = StdRng::seed_from_u64(1);
        let mut apple = Apple::at((0, 0));

        let moved = (0..50).any(|_| {
            apple.relocate(&grid, &mut rng);
            apple.occupied_cell() != (0, 0)
        });
        assert!(moved);
    }
}
