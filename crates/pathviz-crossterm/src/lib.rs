//! Crossterm terminal front-end for pathviz.
//!
//! [`Screen`] renders a board as colored terminal cells (two columns per
//! cell, background color only) and decodes terminal input into
//! [`InputEvent`]s with mouse positions already translated to board
//! coordinates. Drawing is diffed against the previous frame, so a search
//! animation only rewrites the cells that changed.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEventKind},
    execute, queue,
    style::{self, Color as CtColor, SetBackgroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::{CellState, Grid, Point};

/// Terminal columns per board cell (cells render roughly square).
const CELL_WIDTH: i32 = 2;

/// A decoded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
}

/// Which mouse button acted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Left button pressed or dragged.
    Main,
    /// Right button pressed or dragged.
    Secondary,
}

/// A decoded input event. Mouse positions are board cells, not terminal
/// coordinates; events outside the board area are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Mouse { action: MouseAction, pos: Point },
    Resize,
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

fn rgb(r: u8, g: u8, b: u8) -> CtColor {
    CtColor::Rgb { r, g, b }
}

/// Board palette, one background color per cell state.
fn state_color(state: CellState) -> CtColor {
    match state {
        CellState::Empty => rgb(255, 255, 255),
        CellState::Barrier => rgb(0, 0, 0),
        CellState::Start => rgb(0, 0, 255),
        CellState::Goal => rgb(255, 255, 0),
        CellState::Frontier => rgb(255, 128, 0),
        CellState::Visited => rgb(255, 204, 255),
        CellState::Path => rgb(102, 0, 102),
    }
}

/// A terminal session rendering one square board plus a status line.
///
/// The board side must match the grids passed to [`draw`](Self::draw).
pub struct Screen {
    side: i32,
    /// Previous frame, for diffing. `None` forces a full repaint.
    prev: Option<Vec<CellState>>,
}

impl Screen {
    /// Create a screen for boards of the given side length.
    pub fn new(side: i32) -> Self {
        Self {
            side: side.max(0),
            prev: None,
        }
    }

    /// Enter raw mode and the alternate screen, hide the cursor and start
    /// capturing mouse events.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        let (cols, rows) = terminal::size()?;
        let need_cols = (self.side * CELL_WIDTH) as u16;
        let need_rows = self.side as u16 + 1;
        if cols < need_cols || rows < need_rows {
            log::warn!(
                "terminal {}x{} smaller than the {}x{} board area",
                cols,
                rows,
                need_cols,
                need_rows
            );
        }
        Ok(())
    }

    /// Restore the terminal. Errors during restore are ignored.
    pub fn close(&mut self) {
        let mut out = io::stdout();
        let _ = execute!(
            out,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }

    /// Draw the board, rewriting only the cells that changed since the
    /// previous frame.
    pub fn draw(&mut self, grid: &Grid) -> io::Result<()> {
        let next: Vec<CellState> = grid.iter().map(|(_, state)| state).collect();
        let mut out = io::stdout();
        for (i, &state) in next.iter().enumerate() {
            if let Some(prev) = &self.prev {
                if prev.get(i) == Some(&state) {
                    continue;
                }
            }
            let x = (i as i32 % self.side) * CELL_WIDTH;
            let y = i as i32 / self.side;
            queue!(
                out,
                cursor::MoveTo(x as u16, y as u16),
                SetBackgroundColor(state_color(state)),
                style::Print("  ")
            )?;
        }
        queue!(out, SetBackgroundColor(CtColor::Reset))?;
        out.flush()?;
        self.prev = Some(next);
        Ok(())
    }

    /// Forget the previous frame so the next [`draw`](Self::draw) repaints
    /// every cell. Call after a terminal resize.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Write the status line under the board.
    pub fn set_status(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout();
        queue!(
            out,
            cursor::MoveTo(0, self.side as u16),
            SetBackgroundColor(CtColor::Reset),
            terminal::Clear(ClearType::UntilNewLine),
            style::Print(text)
        )?;
        out.flush()
    }

    /// Wait up to `timeout` for one input event and decode it.
    ///
    /// Returns `Ok(None)` when the timeout elapses or the event carries no
    /// meaning for the board (unmapped key, mouse outside the board, ...).
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(self.decode(event::read()?))
    }

    fn decode(&self, ev: Event) -> Option<InputEvent> {
        match ev {
            Event::Key(KeyEvent { code, .. }) => to_key(code).map(InputEvent::Key),
            Event::Mouse(me) => {
                let action = match me.kind {
                    MouseEventKind::Down(MouseButton::Left)
                    | MouseEventKind::Drag(MouseButton::Left) => MouseAction::Main,
                    MouseEventKind::Down(MouseButton::Right)
                    | MouseEventKind::Drag(MouseButton::Right) => MouseAction::Secondary,
                    _ => return None,
                };
                let pos = self.cell_at(me.column, me.row)?;
                Some(InputEvent::Mouse { action, pos })
            }
            Event::Resize(..) => Some(InputEvent::Resize),
            _ => None,
        }
    }

    /// Translate terminal coordinates to a board cell, if inside the board.
    fn cell_at(&self, column: u16, row: u16) -> Option<Point> {
        let p = Point::new(column as i32 / CELL_WIDTH, row as i32);
        if p.x < self.side && p.y < self.side {
            Some(p)
        } else {
            None
        }
    }
}

/// Drain pending input without blocking, reporting whether a cancel key
/// (`q` or Escape) was seen. Everything else is discarded.
///
/// This is the step-boundary cancellation hook for a running search: it
/// must never block, and it consumes events so that clicks made during a
/// run do not replay afterwards.
pub fn cancel_pressed() -> bool {
    let mut cancel = false;
    while event::poll(Duration::ZERO).unwrap_or(false) {
        let Ok(ev) = event::read() else {
            break;
        };
        if let Event::Key(KeyEvent { code, .. }) = ev {
            if matches!(code, KeyCode::Esc | KeyCode::Char('q')) {
                cancel = true;
            }
        }
    }
    cancel
}
