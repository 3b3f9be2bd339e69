use std::time::Duration;

use thiserror::Error;

use crate::grid::Grid;
use crate::{PixelInt, TermInt};

pub const SCREEN_WIDTH: PixelInt = 640;
pub const SCREEN_HEIGHT: PixelInt = 480;
pub const GRID_SIZE: PixelInt = 20;

pub const INITIAL_SPEED: u32 = 15;
pub const SPEED_STEP: u32 = 3;
pub const MIN_SPEED: u32 = 3;
pub const MAX_SPEED: u32 = 102;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(PixelInt),
    #[error("{axis} must be positive, got {value}")]
    NonPositiveExtent { axis: &'static str, value: PixelInt },
    #[error("{axis} {value} is not a multiple of the cell size {cell_size}")]
    UnalignedExtent { axis: &'static str, value: PixelInt, cell_size: PixelInt },
    #[error("a {columns}x{rows} board does not fit in a terminal")]
    BoardTooLarge { columns: PixelInt, rows: PixelInt },
}

// Leaves room for the border and the status line around the board.
const MAX_BOARD_SIDE: PixelInt = TermInt::MAX as PixelInt - 3;

/// Ticks per second, kept within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRate {
    value: u32,
    min: u32,
    max: u32,
    step: u32,
}

impl TickRate {
    pub fn new(initial: u32) -> Self {
        Self::with_bounds(initial, MIN_SPEED, MAX_SPEED, SPEED_STEP)
    }

    fn with_bounds(initial: u32, min: u32, max: u32, step: u32) -> Self {
        debug_assert!(min <= max);
        let mut rate = TickRate { value: min, min, max, step };
        rate.set(initial);
        rate
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    pub fn set(&mut self, value: u32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn speed_up(&mut self) {
        self.set(self.value.saturating_add(self.step));
    }

    pub fn slow_down(&mut self) {
        self.set(self.value.saturating_sub(self.step));
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.value.max(1)))
    }
}

impl Default for TickRate {
    fn default() -> Self {
        Self::new(INITIAL_SPEED)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub grid: Grid,
    pub tick_rate: TickRate,
}

impl GameConfig {
    pub fn new(width: PixelInt, height: PixelInt, cell_size: PixelInt, speed: u32) -> Result<Self, ConfigError> {
        if cell_size <= 0 {
            return Err(ConfigError::InvalidCellSize(cell_size));
        }

        for &(axis, value) in &[("width", width), ("height", height)] {
            if value <= 0 {
                return Err(ConfigError::NonPositiveExtent { axis, value });
            }
            if value % cell_size != 0 {
                return Err(ConfigError::UnalignedExtent { axis, value, cell_size });
            }
        }

        let (columns, rows) = (width / cell_size, height / cell_size);
        if columns > MAX_BOARD_SIDE || rows > MAX_BOARD_SIDE || columns.checked_mul(rows).is_none() {
            return Err(ConfigError::BoardTooLarge { columns, rows });
        }

        Ok(GameConfig { grid: Grid::new(width, height, cell_size), tick_rate: TickRate::new(speed) })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid: Grid::new(SCREEN_WIDTH, SCREEN_HEIGHT, GRID_SIZE),
            tick_rate: TickRate::default(),
        }
    }
}
