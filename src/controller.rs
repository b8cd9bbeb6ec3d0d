//! Application controller.
//!
//! This module orchestrates the main application loop:
//! - Terminal initialization and cleanup
//! - Input polling between ticks
//! - Fixed-interval scene updates followed by rendering

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use thiserror::Error;

use crate::event::{handle_event, poll_event, Action, InputController};
use crate::model::Scene;
use crate::ui::render;

/// Smallest terminal the animation starts in.
pub const MIN_COLUMNS: u16 = 40;
pub const MIN_ROWS: u16 = 12;

/// Most ticks replayed in one frame after a stall.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// Errors that stop the application.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("Terminal too small: {width}x{height} (need at least {min_width}x{min_height})")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}

/// Advances the scene by `ticks` fixed frame intervals.
///
/// This is the only entry point a scheduler needs: a timer, a game loop or
/// a test can drive the animation through it.
pub fn run_frame(scene: &mut Scene, ticks: u32) {
    for _ in 0..ticks {
        scene.tick();
    }
}

/// Number of whole ticks contained in `elapsed`, capped at [`MAX_CATCH_UP_TICKS`].
pub fn ticks_due(elapsed: Duration, tick_rate: Duration) -> u32 {
    if tick_rate.is_zero() {
        return 1;
    }
    let due = elapsed.as_nanos() / tick_rate.as_nanos();
    due.min(MAX_CATCH_UP_TICKS as u128) as u32
}

/// Start of the next tick interval after running `ticks` ticks.
///
/// The schedule advances by whole intervals so leftover time carries over to
/// the next frame. After a stall long enough to hit the catch-up cap, the
/// backlog is dropped and the schedule restarts from `now`.
pub fn next_tick(last_tick: Instant, tick_rate: Duration, ticks: u32, now: Instant) -> Instant {
    if ticks >= MAX_CATCH_UP_TICKS {
        return now;
    }
    last_tick + tick_rate * ticks
}

/// Checks the terminal is large enough to draw in.
pub fn check_terminal_size(width: u16, height: u16) -> Result<(), AppError> {
    if width < MIN_COLUMNS || height < MIN_ROWS {
        return Err(AppError::TerminalTooSmall {
            width,
            height,
            min_width: MIN_COLUMNS,
            min_height: MIN_ROWS,
        });
    }
    Ok(())
}

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Animation state
    scene: Scene,
    /// Input routing
    input: InputController,
    /// Fixed frame interval
    tick_rate: Duration,
    /// Frames drawn so far
    frames: u64,
}

impl App {
    /// Creates a new application with the given scene.
    pub fn new(scene: Scene, tick_rate: Duration) -> Result<Self, AppError> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            scene,
            input: InputController::new(),
            tick_rate,
            frames: 0,
        })
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<(), AppError> {
        let size = self.terminal.size()?;
        log::info!("Terminal size {}x{}", size.width, size.height);
        check_terminal_size(size.width, size.height)?;

        self.draw()?;
        let mut last_tick = Instant::now();

        loop {
            // Handle input until the next tick is due
            let timeout = self.tick_rate.saturating_sub(last_tick.elapsed());
            if let Some(event) = poll_event(timeout) {
                let action = handle_event(event);
                if let Action::Resize(width, height) = action {
                    log::info!("Terminal resized to {}x{}", width, height);
                    self.terminal.autoresize()?;
                }
                if !self.input.dispatch(&mut self.scene, action) {
                    break;
                }
            }

            let ticks = ticks_due(last_tick.elapsed(), self.tick_rate);
            if ticks > 0 {
                if ticks > 1 {
                    log::debug!("Catching up {} ticks", ticks);
                }
                run_frame(&mut self.scene, ticks);
                last_tick = next_tick(last_tick, self.tick_rate, ticks, Instant::now());
                self.draw()?;
            }
        }

        log::info!("Rendered {} frames", self.frames);
        Ok(())
    }

    fn draw(&mut self) -> Result<(), AppError> {
        let scene = &self.scene;
        self.terminal.draw(|frame| {
            render(frame, scene);
        })?;
        self.frames += 1;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Convenience function to run the animation until the user quits.
pub fn run_app(scene: Scene, tick_rate: Duration) -> Result<(), AppError> {
    let mut app = App::new(scene, tick_rate)?;
    app.run()
}
