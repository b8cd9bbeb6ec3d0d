//! Rendering.
//!
//! This module holds the draw pass of the animation:
//! - Gradient background and zoom transform
//! - Strand backbones, base pair connectors and markers
//! - Control legend (HUD) and base color legend
//!
//! The draw pass targets any [`Surface`]. [`render`] wires it to ratatui by
//! drawing into a [`raster::Framebuffer`] sized to the frame.

pub mod raster;

use ratatui::Frame;

use crate::color::Rgb;
use crate::model::{BasePair, ModeFlags, Nucleotide, Scene, Strand};
use crate::surface::{Point, Surface, Transform};

use raster::Framebuffer;

/// Background at the top-left corner.
const BACKGROUND_START: Rgb = Rgb::new(0, 0, 20);
/// Background at the bottom-right corner.
const BACKGROUND_END: Rgb = Rgb::new(20, 0, 20);
const BACKBONE_COLOR: Rgb = Rgb::new(220, 220, 220);
const BACKBONE_WIDTH: f64 = 4.0;
const CONNECTOR_COLOR: Rgb = Rgb::new(200, 200, 200);
const CONNECTOR_ALPHA: f64 = 150.0 / 255.0;
const CONNECTOR_WIDTH: f64 = 2.0;
const MARKER_DIAMETER: f64 = 8.0;
const GLOW_ALPHA: f64 = 0.3;
const TEXT_COLOR: Rgb = Rgb::WHITE;

/// Top-left of the control legend.
const HUD_ORIGIN: Point = Point::new(10.0, 20.0);
const HUD_LINE_HEIGHT: f64 = 20.0;
/// Distance of the color legend from the right edge.
const LEGEND_INSET: f64 = 150.0;
const LEGEND_SWATCH: f64 = 10.0;

/// Renders the scene into a ratatui frame.
pub fn render(frame: &mut Frame, scene: &Scene) {
    let area = frame.area();
    let mut framebuffer = Framebuffer::new(area.width, area.height);
    scene.render(&mut framebuffer);
    frame.render_widget(&framebuffer, area);
}

impl Scene {
    /// Draws the whole scene: background, strands, then the legends.
    ///
    /// The legends are drawn under the zoom transform too, so they move and
    /// scale with the helix.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (width, height) = surface.size();

        surface.set_transform(Transform::IDENTITY);
        surface.fill_gradient(
            Point::new(0.0, 0.0),
            BACKGROUND_START,
            Point::new(width, height),
            BACKGROUND_END,
        );

        let center = Point::new(width / 2.0, height / 2.0);
        surface.set_transform(Transform::zoom_about(center, self.zoom() as f64 / 100.0));

        for strand in &self.strands {
            strand.draw(surface, &self.modes, self.split_level());
        }

        draw_controls(surface, self);
        draw_legend(surface, width);
    }
}

impl Strand {
    /// Draws both backbones, then every base pair on top of them.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, modes: &ModeFlags, split_level: f64) {
        let pairs = self.pairs();
        let count = pairs.len();

        for (i, segment) in pairs.windows(2).enumerate() {
            let (current, next) = (&segment[0], &segment[1]);
            let color = if modes.rainbow {
                Rgb::from_hsb(i as f64 / count as f64, 0.7, 1.0)
            } else {
                BACKBONE_COLOR
            };

            surface.stroke_line(
                Point::new(current.left_x, current.y),
                Point::new(next.left_x, next.y),
                BACKBONE_WIDTH,
                color,
                1.0,
            );
            surface.stroke_line(
                Point::new(current.right_x, current.y),
                Point::new(next.right_x, next.y),
                BACKBONE_WIDTH,
                color,
                1.0,
            );
        }

        for pair in pairs {
            pair.draw(surface, modes, split_level);
        }
    }
}

impl BasePair {
    /// Draws the connector (unless fully split) and both markers.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, modes: &ModeFlags, split_level: f64) {
        let left = Point::new(self.left_x, self.y);
        let right = Point::new(self.right_x, self.y);

        if split_level < 1.0 {
            surface.stroke_line(left, right, CONNECTOR_WIDTH, CONNECTOR_COLOR, CONNECTOR_ALPHA);
        }

        let (left_color, right_color) = self.display_colors(modes.rainbow);
        draw_marker(surface, left, left_color, modes.glow);
        draw_marker(surface, right, right_color, modes.glow);
    }
}

/// A solid marker, with a halo underneath in glow mode.
fn draw_marker<S: Surface + ?Sized>(surface: &mut S, center: Point, color: Rgb, glow: bool) {
    if glow {
        surface.fill_circle(center, MARKER_DIAMETER * 2.0, color, GLOW_ALPHA);
    }
    surface.fill_circle(center, MARKER_DIAMETER, color, 1.0);
}

/// Text of the control legend, one entry per line.
pub fn control_lines(scene: &Scene) -> Vec<String> {
    let on_off = |flag: bool| if flag { "ON" } else { "OFF" };
    vec![
        "Controls:".to_string(),
        format!("SPACE - Toggle Rotation: {}", on_off(scene.modes.rotating)),
        format!("P - Pulse Mode: {}", on_off(scene.modes.pulse)),
        format!("R - Rainbow Mode: {}", on_off(scene.modes.rainbow)),
        format!("G - Glow Effect: {}", on_off(scene.modes.glow)),
        format!("UP/DOWN - Zoom: {}%", scene.zoom()),
        format!("+/- - Speed: {:.1}", scene.rotation_speed()),
        format!("S - Split DNA: {:.0}%", scene.split_level() * 100.0),
        "Q/ESC - Quit".to_string(),
    ]
}

fn draw_controls<S: Surface + ?Sized>(surface: &mut S, scene: &Scene) {
    for (i, line) in control_lines(scene).iter().enumerate() {
        let origin = Point::new(HUD_ORIGIN.x, HUD_ORIGIN.y + i as f64 * HUD_LINE_HEIGHT);
        surface.draw_text(origin, line, TEXT_COLOR);
    }
}

/// Swatch and name for each base, top-right.
fn draw_legend<S: Surface + ?Sized>(surface: &mut S, width: f64) {
    let x = width - LEGEND_INSET;
    let y = HUD_ORIGIN.y;

    for (i, base) in Nucleotide::ALL.iter().enumerate() {
        let row = y + i as f64 * 20.0;
        let half = LEGEND_SWATCH / 2.0;
        surface.fill_circle(Point::new(x + half, row + half), LEGEND_SWATCH, base.color(), 1.0);
        surface.draw_text(Point::new(x + 15.0, row + LEGEND_SWATCH), base.name(), TEXT_COLOR);
    }
}
