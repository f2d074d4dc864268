//! Paint loop, key dispatch and the search run.

use std::error::Error;
use std::io;
use std::thread;
use std::time::Duration;

use pathviz_core::{CellState, Grid, Point};
use pathviz_crossterm::{InputEvent, Key, MouseAction, Screen, cancel_pressed};
use pathviz_search::{Engine, Outcome, Policy};

/// Board side length in cells.
const SIDE: i32 = 22;
/// Delay between rendered search steps.
const STEP_DELAY: Duration = Duration::from_millis(15);
/// Input poll interval when idle.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

pub struct App {
    grid: Grid,
    screen: Screen,
    engine: Engine,
    policy: Policy,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            grid: Grid::new(SIDE),
            screen: Screen::new(SIDE),
            engine: Engine::new(),
            policy: Policy::Astar,
        }
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.screen.init()?;
        let result = self.event_loop();
        self.screen.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        self.screen.draw(&self.grid)?;
        self.show_help()?;
        loop {
            let Some(ev) = self.screen.poll_input(POLL_INTERVAL)? else {
                continue;
            };
            match ev {
                InputEvent::Key(key) => {
                    if self.handle_key(key)? {
                        return Ok(());
                    }
                }
                InputEvent::Mouse { action, pos } => {
                    match action {
                        MouseAction::Main => self.paint(pos),
                        MouseAction::Secondary => {
                            self.grid.clear_cell(pos);
                        }
                    }
                    self.screen.draw(&self.grid)?;
                }
                InputEvent::Resize => {
                    self.screen.invalidate();
                    self.screen.draw(&self.grid)?;
                    self.show_help()?;
                }
            }
        }
    }

    /// Handle a key, returning `true` to quit.
    fn handle_key(&mut self, key: Key) -> io::Result<bool> {
        match key {
            Key::Char('q') | Key::Escape => return Ok(true),
            Key::Char('a') => {
                self.policy = Policy::Astar;
                self.show_help()?;
            }
            Key::Char('d') => {
                self.policy = Policy::UniformCost;
                self.show_help()?;
            }
            Key::Char('c') => {
                self.grid.reset();
                self.screen.draw(&self.grid)?;
                self.show_help()?;
            }
            Key::Char(' ') => self.run_search()?,
            _ => {}
        }
        Ok(false)
    }

    /// Left-button painting: place the start first, then the goal, then
    /// barriers. The grid guards refuse invalid targets (drawing over the
    /// other endpoint), so a refused click simply does nothing.
    fn paint(&mut self, pos: Point) {
        if self.grid.start().is_none() {
            self.grid.make_start(pos);
        } else if self.grid.goal().is_none() {
            self.grid.make_goal(pos);
        } else {
            self.grid.make_barrier(pos);
        }
    }

    fn run_search(&mut self) -> io::Result<()> {
        let (Some(start), Some(goal)) = (self.grid.start(), self.grid.goal()) else {
            return self.screen.set_status("place start and goal first");
        };
        self.grid.clear_search_marks();
        self.screen.draw(&self.grid)?;
        self.screen.set_status("searching... (q or ESC cancels)")?;

        let grid = self.grid.clone();
        let screen = &mut self.screen;
        // The closure cannot return an error through the engine, so keep
        // the first draw failure and surface it once the run is over.
        let mut draw_err: Option<io::Error> = None;
        let outcome = self.engine.search(
            &self.grid,
            start,
            goal,
            self.policy,
            || {
                if draw_err.is_none() {
                    if let Err(err) = screen.draw(&grid) {
                        draw_err = Some(err);
                    }
                }
                thread::sleep(STEP_DELAY);
            },
            cancel_pressed,
        );
        if let Some(err) = draw_err {
            return Err(err);
        }

        self.screen.draw(&self.grid)?;
        let label = self.policy.label();
        let status = match outcome {
            Outcome::Found => {
                // Interior path cells plus the hops onto and off the path.
                let steps = self.grid.count(CellState::Path) + 1;
                format!("{}: path found, {} steps", label, steps)
            }
            Outcome::Exhausted => format!("{}: no path", label),
            Outcome::Cancelled => format!("{}: cancelled", label),
        };
        self.screen.set_status(&status)
    }

    fn show_help(&mut self) -> io::Result<()> {
        let text = format!(
            "{} | a/d: algorithm  space: run  c: clear  q: quit",
            self.policy.label()
        );
        self.screen.set_status(&text)
    }
}
