use anyhow::Result;
use log::{debug, info, warn};
use rand::Rng;

use crate::clock::FrameClock;
use crate::config::{GameConfig, TickRate};
use crate::food::Apple;
use crate::grid::Grid;
use crate::input::{self, Control};
use crate::palette::BACKGROUND_COLOR;
use crate::screen::{InputEvent, Screen};
use crate::snake::{MoveResult::Collided, Snake};

/// What happened to the snake during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Reset,
}

pub struct SnakeGame<S: Screen, R: Rng> {
    grid: Grid,
    tick_rate: TickRate,
    screen: S,
    rng: R,
    clock: FrameClock,
    snake: Snake,
    apple: Apple,
}

impl<S: Screen, R: Rng> SnakeGame<S, R> {
    pub fn new(config: GameConfig, screen: S, mut rng: R) -> Self {
        let grid = config.grid;
        let snake = Snake::new(&grid);
        let apple = Apple::new(&grid, &mut rng);

        let mut game = SnakeGame {
            grid,
            tick_rate: config.tick_rate,
            screen,
            rng,
            clock: FrameClock::new(),
            snake,
            apple,
        };
        game.respawn_apple();
        game
    }

    /// Runs until the player quits.
    pub fn play(&mut self) -> Result<()> {
        info!(
            "starting game on a {}x{} grid of {}px cells at speed {}",
            self.grid.columns(),
            self.grid.rows(),
            self.grid.cell_size(),
            self.tick_rate.get()
        );
        self.draw()?;

        loop {
            self.clock.wait_for_next_tick(&self.tick_rate);

            if self.tick()? == Control::Quit {
                info!("quit with snake length {}", self.snake.len());
                return Ok(());
            }
        }
    }

    /// One frame without pacing: input, update, draw.
    pub fn tick(&mut self) -> Result<Control> {
        if self.handle_input()? == Control::Quit {
            return Ok(Control::Quit);
        }

        self.update();
        self.draw()?;
        Ok(Control::Continue)
    }

    pub fn update(&mut self) -> TickOutcome {
        self.snake.commit_direction();

        if self.snake.advance(&self.grid) == Collided {
            self.reset_snake();
            return TickOutcome::Reset;
        }

        if self.snake.ate(&self.apple) {
            if let Collided = self.snake.grow(&self.grid) {
                self.reset_snake();
                return TickOutcome::Reset;
            }

            debug!("apple eaten at {:?}, length {}", self.apple.occupied_cell(), self.snake.len());
            self.respawn_apple();
            return TickOutcome::Ate;
        }

        TickOutcome::Moved
    }

    #[cfg(test)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    #[cfg(test)]
    pub fn tick_rate(&self) -> &TickRate {
        &self.tick_rate
    }

    pub fn status_text(&self) -> String {
        format!("Snake. Length: {}. Speed: {}", self.snake.len(), self.tick_rate.get())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn handle_input(&mut self) -> Result<Control> {
        for ev in self.screen.poll_events()? {
            let command = match &ev {
                InputEvent::Quit => return Ok(Control::Quit),
                InputEvent::Key(key) => input::map_key(key),
            };

            if input::apply(command, &mut self.snake, &mut self.tick_rate) == Control::Quit {
                return Ok(Control::Quit);
            }
        }

        Ok(Control::Continue)
    }

    fn reset_snake(&mut self) {
        let head = self.snake.head();
        info!("self-collision at {:?} with length {}, restarting", head, self.snake.len());

        self.snake.reset_to(&self.grid, head);
        self.respawn_apple();
    }

    fn respawn_apple(&mut self) {
        if self.snake.len() >= self.grid.cell_count() {
            warn!("no free cell left for the apple");
            return;
        }

        while self.snake.overlaps(&self.apple) {
            self.apple.relocate(&self.grid, &mut self.rng);
        }
    }

    fn draw(&mut self) -> Result<()> {
        self.screen.clear(BACKGROUND_COLOR)?;

        for &cell in self.snake.body() {
            self.screen.draw_cell(cell, self.snake.color())?;
        }
        self.screen.draw_cell(self.apple.occupied_cell(), self.apple.color())?;

        let status = self.status_text();
        self.screen.set_status_text(&status)?;
        self.screen.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Color, APPLE_COLOR, SNAKE_COLOR};
    use crate::snake::Direction::*;
    use crate::Cell;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::VecDeque;

    /// Hands out one batch of events per poll and records what gets drawn.
    #[derive(Default)]
    struct ScriptedScreen {
        batches: VecDeque<Vec<InputEvent>>,
        cells: Vec<(Cell, Color)>,
        last_frame: Vec<(Cell, Color)>,
        status: String,
        frames: usize,
    }

    impl ScriptedScreen {
        fn with_batches(batches: Vec<Vec<InputEvent>>) -> Self {
            ScriptedScreen { batches: batches.into(), ..Default::default() }
        }
    }

    impl Screen for ScriptedScreen {
        fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
            Ok(self.batches.pop_front().unwrap_or_default())
        }

        fn clear(&mut self, _color: Color) -> Result<()> {
            self.cells.clear();
            Ok(())
        }

        fn draw_cell(&mut self, cell: Cell, color: Color) -> Result<()> {
            self.cells.push((cell, color));
            Ok(())
        }

        fn set_status_text(&mut self, text: &str) -> Result<()> {
            self.status = text.to_string();
            Ok(())
        }

        fn present(&mut self) -> Result<()> {
            self.last_frame = self.cells.clone();
            self.frames += 1;
            Ok(())
        }
    }

    fn key(c: char) -> InputEvent {
        InputEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn game(batches: Vec<Vec<InputEvent>>) -> SnakeGame<ScriptedScreen, StdRng> {
        SnakeGame::new(GameConfig::default(), ScriptedScreen::with_batches(batches), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_new_game() {
        let game = game(vec![]);
        assert_eq!(game.snake().body(), &[(320, 240)]);
        assert!(!game.snake().overlaps(game.apple()));
        assert_eq!(game.status_text(), "Snake. Length: 1. Speed: 15");
    }

    #[test]
    fn test_tick_moves_and_draws() {
        let mut game = game(vec![]);
        game.apple = Apple::at((0, 0));

        assert_eq!(game.tick().unwrap(), Control::Continue);
        assert_eq!(game.snake().body(), &[(340, 240)]);
        assert_eq!(game.screen.frames, 1);
        assert_eq!(game.screen.last_frame, vec![((340, 240), SNAKE_COLOR), ((0, 0), APPLE_COLOR)]);
        assert_eq!(game.screen.status, "Snake. Length: 1. Speed: 15");
    }

    #[test]
    fn test_turn_applies_next_tick() {
        let mut game = game(vec![vec![key('w')]]);
        game.apple = Apple::at((0, 0));

        game.tick().unwrap();
        assert_eq!(game.snake().direction(), Up);
        assert_eq!(game.snake().head(), (320, 220));
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut game = game(vec![vec![key('a')]]);
        game.apple = Apple::at((0, 0));

        game.tick().unwrap();
        assert_eq!(game.snake().direction(), Right);
        assert_eq!(game.snake().head(), (340, 240));
    }

    #[test]
    fn test_eating_grows_and_respawns() {
        let mut game = game(vec![]);
        game.snake = Snake::from_body(vec![(0, 0), (20, 0), (40, 0)], Right);
        game.apple = Apple::at((60, 0));

        assert_eq!(game.update(), TickOutcome::Ate);
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.snake().body(), &[(20, 0), (40, 0), (60, 0), (80, 0)]);
        assert!(!game.snake().overlaps(game.apple()));
    }

    #[test]
    fn test_collision_resets_at_head() {
        let mut game = game(vec![]);
        game.snake = Snake::from_body(vec![(0, 0), (0, 20), (20, 20), (20, 0), (40, 0)], Left);
        game.apple = Apple::at((40, 0));

        assert_eq!(game.update(), TickOutcome::Reset);
        assert_eq!(game.snake().body(), &[(40, 0)]);
        assert_eq!(game.snake().direction(), Right);
        assert!(!game.snake().overlaps(game.apple()));
    }

    #[test]
    fn test_apple_never_on_snake() {
        let mut game = game(vec![]);
        let dirs = [Up, Left, Down, Right];
        let mut turns = dirs.iter().cycle();

        for i in 0..2000 {
            if i % 7 == 0 {
                let dir = *turns.next().unwrap();
                if input::accepts_turn(game.snake().direction(), dir) {
                    game.snake.set_pending_direction(dir);
                }
            }
            game.update();
            assert!(!game.snake().overlaps(game.apple()));
            assert!(game.snake().body().iter().all(|&cell| game.grid.contains(cell)));
        }
    }

    #[test]
    fn test_speed_keys() {
        let mut game = game(vec![vec![key('q'), key('q')], vec![key('e')]]);
        game.apple = Apple::at((0, 0));

        game.tick().unwrap();
        assert_eq!(game.tick_rate().get(), 21);
        game.tick().unwrap();
        assert_eq!(game.tick_rate().get(), 18);
        assert_eq!(game.screen.status, "Snake. Length: 1. Speed: 18");
    }

    #[test]
    fn test_quit_events() {
        let mut game = game(vec![vec![InputEvent::Quit]]);
        assert_eq!(game.tick().unwrap(), Control::Quit);
        assert_eq!(game.screen.frames, 0);

        let esc = InputEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        let mut game = self::game(vec![vec![key('w'), esc]]);
        assert_eq!(game.tick().unwrap(), Control::Quit);
    }

    #[test]
    fn test_play_until_quit() {
        let mut game = game(vec![vec![], vec![], vec![InputEvent::Quit]]);
        game.tick_rate.set(102);
        game.apple = Apple::at((0, 0));

        game.play().unwrap();
        // Initial frame plus two ticks.
        assert_eq!(game.screen.frames, 3);
        assert_eq!(game.snake().head(), (360, 240));
    }
}
