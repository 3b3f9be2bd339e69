use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

use crate::config::TickRate;
use crate::snake::{Direction::{self, *}, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    SpeedUp,
    SlowDown,
    Quit,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub fn map_key(key: &KeyEvent) -> Command {
    if is_ctrl_c(key) {
        return Command::Quit;
    }

    match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Command::Turn(Up),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Command::Turn(Down),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Command::Turn(Left),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Command::Turn(Right),
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::SpeedUp,
        KeyCode::Char('e') | KeyCode::Char('E') => Command::SlowDown,
        KeyCode::Esc => Command::Quit,
        _ => Command::Ignore,
    }
}

/// A turn is rejected only when it reverses the direction the snake is moving in right now.
pub fn accepts_turn(active: Direction, requested: Direction) -> bool {
    requested != active.opposite()
}

pub fn apply(command: Command, snake: &mut Snake, tick_rate: &mut TickRate) -> Control {
    match command {
        Command::Turn(dir) => {
            if accepts_turn(snake.direction(), dir) {
                snake.set_pending_direction(dir);
            }
        }
        Command::SpeedUp => {
            tick_rate.speed_up();
            debug!("speed up to {}", tick_rate.get());
        }
        Command::SlowDown => {
            tick_rate.slow_down();
            debug!("slow down to {}", tick_rate.get());
        }
        Command::Quit => return Control::Quit,
        Command::Ignore => {}
    }

    Control::Continue
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers } if modifiers.contains(KeyModifiers::CONTROL))
}
