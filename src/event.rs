//! Keyboard and mouse event handling.
//!
//! This module maps input to scene changes:
//! - `Space`: toggle rotation
//! - `p`: toggle pulse mode
//! - `r`: toggle rainbow mode
//! - `g`: toggle glow
//! - `Up` / `Down`: zoom in / out by 10%
//! - `+` (or `=`) / `-`: rotation speed up / down by 0.1
//! - `s`: split the helix open (or snap it shut)
//! - `q`, `Esc`, `Ctrl+C`: quit
//!
//! Mouse movement is recorded but nothing reads it yet.

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::time::Duration;

use crate::model::Scene;

/// Actions that can be triggered by input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    ToggleRotation,
    TogglePulse,
    ToggleRainbow,
    ToggleGlow,
    ZoomIn,
    ZoomOut,
    SpeedUp,
    SpeedDown,
    ToggleSplit,
    /// Pointer moved (column, row)
    MouseMove(u16, u16),
    /// Terminal resized (width, height)
    Resize(u16, u16),
}

/// Polls for input events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action.
pub fn handle_event(event: Event) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event),
        Event::Mouse(mouse_event) => handle_mouse_event(mouse_event),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Maps a key-down event. Releases are ignored.
fn handle_key_event(key: KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char(' ') => Action::ToggleRotation,
        KeyCode::Up => Action::ZoomIn,
        KeyCode::Down => Action::ZoomOut,
        // '=' is the unshifted '+' on most layouts
        KeyCode::Char('+') | KeyCode::Char('=') => Action::SpeedUp,
        KeyCode::Char('-') => Action::SpeedDown,
        KeyCode::Esc => Action::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'p' => Action::TogglePulse,
            'r' => Action::ToggleRainbow,
            'g' => Action::ToggleGlow,
            's' => Action::ToggleSplit,
            'q' => Action::Quit,
            _ => Action::None,
        },
        _ => Action::None,
    }
}

/// Only movement is tracked; clicks and scrolling are ignored.
fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Action::MouseMove(mouse.column, mouse.row),
        _ => Action::None,
    }
}

/// Applies an action to the scene.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(scene: &mut Scene, action: Action) -> bool {
    match action {
        Action::None => {}
        Action::Quit => {
            log::info!("Quit requested");
            return false;
        }
        Action::ToggleRotation => {
            scene.toggle_rotating();
            log::debug!("Rotation {}", on_off(scene.modes.rotating));
        }
        Action::TogglePulse => {
            scene.toggle_pulse();
            log::debug!("Pulse mode {}", on_off(scene.modes.pulse));
        }
        Action::ToggleRainbow => {
            scene.toggle_rainbow();
            log::debug!("Rainbow mode {}", on_off(scene.modes.rainbow));
        }
        Action::ToggleGlow => {
            scene.toggle_glow();
            log::debug!("Glow {}", on_off(scene.modes.glow));
        }
        Action::ZoomIn => {
            scene.zoom_in();
            log::debug!("Zoom {}%", scene.zoom());
        }
        Action::ZoomOut => {
            scene.zoom_out();
            log::debug!("Zoom {}%", scene.zoom());
        }
        Action::SpeedUp => {
            scene.speed_up();
            log::debug!("Speed {:.1}", scene.rotation_speed());
        }
        Action::SpeedDown => {
            scene.speed_down();
            log::debug!("Speed {:.1}", scene.rotation_speed());
        }
        Action::ToggleSplit => {
            scene.toggle_split();
            log::debug!("Split level {:.2}", scene.split_level());
        }
        Action::MouseMove(_, _) | Action::Resize(_, _) => {
            // Mouse is tracked by the InputController, resize by the controller
        }
    }

    true
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Routes input events to the scene and keeps the last pointer position.
#[derive(Debug, Default)]
pub struct InputController {
    mouse_position: Option<(u16, u16)>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position (column, row), if the mouse has moved.
    pub fn mouse_position(&self) -> Option<(u16, u16)> {
        self.mouse_position
    }

    /// Handles a key press. Returns `false` when the key asks to quit.
    pub fn on_key_down(&mut self, scene: &mut Scene, key: KeyEvent) -> bool {
        apply_action(scene, handle_key_event(key))
    }

    /// Records the pointer position. No visual reads it.
    pub fn on_mouse_move(&mut self, column: u16, row: u16) {
        self.mouse_position = Some((column, row));
    }

    /// Handles an already mapped action.
    pub fn dispatch(&mut self, scene: &mut Scene, action: Action) -> bool {
        match action {
            Action::MouseMove(column, row) => {
                self.on_mouse_move(column, row);
                true
            }
            action => apply_action(scene, action),
        }
    }
}
