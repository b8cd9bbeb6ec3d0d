//! # helixtui - Animated DNA Helix
//!
//! A terminal animation of a stylized DNA double helix using ratatui.
//!
//! ## Architecture
//!
//! The application follows an event-driven architecture with clear separation:
//! - `model`: Scene, strands and base pairs; the per-tick simulation step
//! - `surface`: The drawing surface abstraction and a recording implementation
//! - `ui`: The draw pass, plus the framebuffer that puts it on a terminal
//! - `event`: Keyboard/mouse mapping to scene changes
//! - `controller`: Terminal lifecycle and the fixed-tick main loop
//! - `color`: RGB/HSB color helpers
//! - `logging`: File logging setup

pub mod color;
pub mod controller;
pub mod event;
pub mod logging;
pub mod model;
pub mod surface;
pub mod ui;
