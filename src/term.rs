use crate::grid::Grid;
use crate::palette::{Color, BACKGROUND_COLOR, BORDER_COLOR};
use crate::input::is_ctrl_c;
use crate::screen::{InputEvent, Screen};
use crate::{Cell, TermInt};
use std::{convert::TryFrom, io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

// Two grid rows share one terminal row: the top cell is the foreground, the bottom one the background.
const HALF_BLOCK: char = '▀';

/// Crossterm front-end. One grid cell is one column by half a terminal row, inside a border,
/// with the status line underneath.
pub struct TermScreen {
    grid: Grid,
    stdout: Stdout,
    size: (TermInt, TermInt),
    back: Vec<Color>,
    front: Option<Vec<Color>>,
    status: String,
    active: bool,
}

impl TermScreen {
    pub fn new(grid: Grid) -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        let (need_w, need_h) = Self::required_size(&grid)?;

        if width < need_w || height < need_h {
            bail!("terminal is {}x{}, the board needs at least {}x{}", width, height, need_w, need_h);
        }

        Ok(TermScreen {
            grid,
            stdout: stdout(),
            size: (need_w, need_h),
            back: vec![BACKGROUND_COLOR; grid.cell_count()],
            front: None,
            status: String::new(),
            active: false,
        })
    }

    /// Terminal columns and rows needed for the border, the board and the status line.
    pub fn required_size(grid: &Grid) -> Result<(TermInt, TermInt)> {
        let width = TermInt::try_from(grid.columns()).ok().and_then(|cols| cols.checked_add(2));
        let height = TermInt::try_from(grid.rows() / 2 + grid.rows() % 2).ok().and_then(|rows| rows.checked_add(3));

        match (width, height) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => bail!("a {}x{} board does not fit in a terminal", grid.columns(), grid.rows()),
        }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))
            .context("Error preparing the screen")?;
        self.active = true;

        self.draw_borders()
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    /// Shows a centered message box and waits for a key. Returns false if the player asked to quit.
    pub fn show_intro(&mut self, lines: &[&str]) -> Result<bool> {
        let (width, height) = terminal::size()?;
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 4) as TermInt;
        let top_left = (width.saturating_sub(msg_width) / 2, height.saturating_sub(msg_height) / 2);

        queue!(self.stdout, style::SetForegroundColor(to_term_color(BORDER_COLOR)))?;
        for y_diff in 0..msg_height {
            let line = match y_diff {
                0 => "",
                y if y == msg_height - 1 => "",
                y => lines[y as usize - 1],
            };
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            queue!(self.stdout, cursor::MoveTo(top_left.0, top_left.1 + y_diff), style::Print(padded_line))?;
        }
        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;

        let key = self.read_key_blocking()?;
        let quit = matches!(crate::input::map_key(&key), crate::input::Command::Quit);

        // Wipe the box and force the next frame to be drawn in full.
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.front = None;
        self.status.clear();
        self.draw_borders()?;

        Ok(!quit)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    fn draw_borders(&mut self) -> Result<()> {
        let (width, height) = self.size;
        // The last row belongs to the status line.
        let end_x = width - 1;
        let end_y = height - 2;

        queue!(self.stdout, style::SetForegroundColor(to_term_color(BORDER_COLOR)))?;
        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, 0), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(x, end_y), style::Print(ch))?;
        }

        for y in 1..end_y {
            queue!(self.stdout, cursor::MoveTo(0, y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(end_x, y), style::Print('|'))?;
        }
        queue!(self.stdout, style::ResetColor)?;

        self.stdout.flush()?;
        Ok(())
    }

    fn color_at(buf: &[Color], columns: usize, rows: usize, x: usize, y: usize) -> Color {
        if y < rows {
            buf[y * columns + x]
        } else {
            BACKGROUND_COLOR
        }
    }
}

impl Screen for TermScreen {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Some(ev) = to_input_event(read()?) {
                events.push(ev);
            }
        }

        Ok(events)
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        for c in self.back.iter_mut() {
            *c = color;
        }
        Ok(())
    }

    fn draw_cell(&mut self, cell: Cell, color: Color) -> Result<()> {
        if !self.grid.contains(cell) {
            bail!("cell {:?} is outside the {}x{} board", cell, self.grid.width(), self.grid.height());
        }

        let (col, row) = self.grid.index_of(cell);
        let idx = row as usize * self.grid.columns() as usize + col as usize;
        self.back[idx] = color;
        Ok(())
    }

    fn set_status_text(&mut self, text: &str) -> Result<()> {
        if self.status == text {
            return Ok(());
        }

        let (_, height) = self.size;
        queue!(
            self.stdout,
            terminal::SetTitle(text),
            cursor::MoveTo(0, height - 1),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(text)
        )?;
        self.status = text.to_string();
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let columns = self.grid.columns() as usize;
        let rows = self.grid.rows() as usize;

        for term_row in 0..(rows + 1) / 2 {
            for x in 0..columns {
                let (top_y, bottom_y) = (term_row * 2, term_row * 2 + 1);
                let top = Self::color_at(&self.back, columns, rows, x, top_y);
                let bottom = Self::color_at(&self.back, columns, rows, x, bottom_y);

                if let Some(front) = &self.front {
                    if Self::color_at(front, columns, rows, x, top_y) == top
                        && Self::color_at(front, columns, rows, x, bottom_y) == bottom
                    {
                        continue;
                    }
                }

                queue!(
                    self.stdout,
                    cursor::MoveTo(x as TermInt + 1, term_row as TermInt + 1),
                    style::SetForegroundColor(to_term_color(top)),
                    style::SetBackgroundColor(to_term_color(bottom)),
                    style::Print(HALF_BLOCK)
                )?;
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush().context("Error flushing")?;
        self.front = Some(self.back.clone());
        Ok(())
    }
}

impl Drop for TermScreen {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Ctrl+C is the terminal's window-close: it becomes a quit event rather than a key.
fn to_input_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(ev) if is_ctrl_c(&ev) => Some(InputEvent::Quit),
        Event::Key(ev) => Some(InputEvent::Key(ev)),
        _ => None,
    }
}

fn to_term_color(color: Color) -> style::Color {
    style::Color::Rgb { r: color.r, g: color.g, b: color.b }
}
