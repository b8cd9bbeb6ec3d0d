//! helixtui - Animated DNA Helix
//!
//! A rotating DNA double helix drawn in the terminal.
//!
//! ## Usage
//!
//! ```bash
//! helixtui
//! helixtui --rainbow --speed 2.0
//! helixtui --log-file helix.log
//! ```
//!
//! ## Controls
//!
//! - `SPACE`: Toggle rotation
//! - `P` / `R` / `G`: Pulse, rainbow, glow
//! - `UP` / `DOWN`: Zoom
//! - `+` / `-`: Rotation speed
//! - `S`: Split the helix
//! - `Q` / `ESC`: Quit

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use helixtui::controller::run_app;
use helixtui::logging;
use helixtui::model::{
    ModeFlags, Scene, SceneConfig, SPEED_MAX, SPEED_MIN, ZOOM_MAX, ZOOM_MIN,
};

/// helixtui - An animated DNA double helix for the terminal
///
/// Keys: SPACE rotation, P pulse, R rainbow, G glow, UP/DOWN zoom,
/// +/- speed, S split, Q quit.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Frame interval in milliseconds (1-1000)
    #[arg(short = 't', long = "tick-ms", default_value = "16")]
    tick_ms: u64,

    /// Initial rotation speed (0.1-3.0)
    #[arg(short = 's', long = "speed", default_value = "1.0")]
    speed: f64,

    /// Initial zoom in percent (50-200)
    #[arg(short = 'z', long = "zoom", default_value = "100")]
    zoom: u16,

    /// Start with rotation stopped
    #[arg(long = "paused")]
    paused: bool,

    /// Start in pulse mode
    #[arg(short = 'p', long = "pulse")]
    pulse: bool,

    /// Start in rainbow mode
    #[arg(short = 'r', long = "rainbow")]
    rainbow: bool,

    /// Start with the glow effect disabled
    #[arg(long = "no-glow")]
    no_glow: bool,

    /// Write logs to this file (otherwise only when RUST_LOG is set)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn validate(&self) -> Result<()> {
        // Validate frame interval (1-1000 ms)
        if self.tick_ms < 1 || self.tick_ms > 1000 {
            anyhow::bail!("Frame interval must be 1-1000 ms (got {})", self.tick_ms);
        }

        // Validate speed (0.1-3.0, in steps of 0.1)
        if !(SPEED_MIN..=SPEED_MAX).contains(&self.speed) {
            anyhow::bail!("Speed must be {}-{} (got {})", SPEED_MIN, SPEED_MAX, self.speed);
        }
        let tenths = self.speed * 10.0;
        if (tenths - tenths.round()).abs() > 1e-9 {
            anyhow::bail!("Speed must be a multiple of 0.1 (got {})", self.speed);
        }

        // Validate zoom (50-200)
        if !(ZOOM_MIN..=ZOOM_MAX).contains(&self.zoom) {
            anyhow::bail!("Zoom must be {}-{}% (got {})", ZOOM_MIN, ZOOM_MAX, self.zoom);
        }

        Ok(())
    }

    fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            modes: ModeFlags {
                rotating: !self.paused,
                pulse: self.pulse,
                rainbow: self.rainbow,
                glow: !self.no_glow,
            },
            rotation_speed: self.speed,
            zoom: self.zoom,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;

    let log_path = logging::init(args.log_file.as_deref())?;

    let config = args.scene_config();
    log::info!(
        "Starting: tick {} ms, speed {:.1}, zoom {}%, modes {:?}",
        args.tick_ms,
        config.rotation_speed,
        config.zoom,
        config.modes
    );

    run_app(Scene::new(config), Duration::from_millis(args.tick_ms))?;

    if let Some(path) = log_path {
        eprintln!("Log written to {}", path.display());
    }

    Ok(())
}
