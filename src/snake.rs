use crate::food::Apple;
use crate::grid::Grid;
use crate::palette::{Color, SNAKE_COLOR};
use crate::{Cell, PixelInt};
use Direction::*;
use MoveResult::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (PixelInt, PixelInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Cell, old_tail: Cell },
    Collided
}

/// Body is stored tail first, so the head is the last element.
pub struct Snake {
    body: Vec<Cell>,
    direction: Direction,
    next_direction: Option<Direction>,
    color: Color,
}

impl Snake {
    pub fn new(grid: &Grid) -> Self {
        Snake { body: vec![grid.center()], direction: Right, next_direction: None, color: SNAKE_COLOR }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Cell {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.next_direction
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Only takes effect on the next `commit_direction`.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.next_direction = Some(direction);
    }

    pub fn commit_direction(&mut self) {
        if let Some(dir) = self.next_direction.take() {
            self.direction = dir;
        }
    }

    /// Steps the head one cell in the committed direction and drops the tail.
    /// On `Collided` the body is left untouched.
    pub fn advance(&mut self, grid: &Grid) -> MoveResult {
        let (dx, dy) = self.direction.delta();
        let new_head = grid.wrap(self.head(), dx, dy);

        // After the shift the body is body[1..]; its last cell is the old head and never counts.
        let len = self.body.len();
        if len > 2 && self.body[1..len - 1].contains(&new_head) {
            return Collided;
        }

        let old_tail = self.body.remove(0);
        self.body.push(new_head);
        Moved { new_head, old_tail }
    }

    pub fn grow(&mut self, grid: &Grid) -> MoveResult {
        let tail = self.tail();
        let res = self.advance(grid);

        if let Moved { .. } = res {
            self.body.insert(0, tail);
        }

        res
    }

    /// Starts over as a single segment at `cell`, facing right.
    pub fn reset_to(&mut self, grid: &Grid, cell: Cell) {
        *self = Snake::new(grid);
        self.body[0] = cell;
    }

    pub fn ate(&self, apple: &Apple) -> bool {
        self.head() == apple.occupied_cell()
    }

    pub fn overlaps(&self, apple: &Apple) -> bool {
        self.body.contains(&apple.occupied_cell())
    }

    #[cfg(test)]
    pub(crate) fn from_body(body: Vec<Cell>, direction: Direction) -> Self {
        assert!(!body.is_empty());
        Snake { body, direction, next_direction: None, color: SNAKE_COLOR }
    }
}
