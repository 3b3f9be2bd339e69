use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::palette::Color;
use crate::Cell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Key(KeyEvent),
}

/// Drawing surface and event source the game loop talks to.
pub trait Screen {
    /// Returns every event queued since the last call without blocking.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;

    fn clear(&mut self, color: Color) -> Result<()>;

    fn draw_cell(&mut self, cell: Cell, color: Color) -> Result<()>;

    fn set_status_text(&mut self, text: &str) -> Result<()>;

    fn present(&mut self) -> Result<()>;
}
