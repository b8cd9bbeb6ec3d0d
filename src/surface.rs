//! The drawing surface the scene renders onto.
//!
//! The scene only ever talks to the [`Surface`] trait, so the same draw pass
//! can target the terminal framebuffer (`ui::raster`) or a
//! [`RecordingSurface`] that keeps a display list for inspection.
//!
//! Coordinates are logical canvas units (800×600). Every shape goes through
//! the current [`Transform`] before it reaches the output; the gradient
//! background does not, it always covers the whole surface.

use crate::color::Rgb;

/// Logical canvas width.
pub const CANVAS_WIDTH: f64 = 800.0;
/// Logical canvas height.
pub const CANVAS_HEIGHT: f64 = 600.0;

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Uniform scale followed by a translation: `p' = p * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub offset: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        offset: Point::new(0.0, 0.0),
    };

    /// Scales by `factor` while keeping `center` fixed.
    ///
    /// Equivalent to translate(center) · scale(factor) · translate(-center).
    pub fn zoom_about(center: Point, factor: f64) -> Self {
        Self {
            scale: factor,
            offset: Point::new(center.x * (1.0 - factor), center.y * (1.0 - factor)),
        }
    }

    /// Maps a point through the transform.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset.x,
            p.y * self.scale + self.offset.y,
        )
    }

    /// Maps a length (stroke width, diameter) through the transform.
    pub fn apply_length(&self, len: f64) -> f64 {
        len * self.scale
    }
}

/// A 2D drawing context.
pub trait Surface {
    /// Logical size of the surface.
    fn size(&self) -> (f64, f64);

    /// Fills the whole surface with a linear gradient running from `start`
    /// (color `from`) to `end` (color `to`). Points beyond either end take
    /// the end color.
    fn fill_gradient(&mut self, start: Point, from: Rgb, end: Point, to: Rgb);

    /// Replaces the current transform.
    fn set_transform(&mut self, transform: Transform);

    /// Strokes a straight line of the given width.
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgb, alpha: f64);

    /// Fills a circle centered on `center`.
    fn fill_circle(&mut self, center: Point, diameter: f64, color: Rgb, alpha: f64);

    /// Draws a single line of text with its baseline starting at `origin`.
    fn draw_text(&mut self, origin: Point, text: &str, color: Rgb);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Gradient {
        start: Point,
        from: Rgb,
        end: Point,
        to: Rgb,
    },
    SetTransform(Transform),
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Rgb,
        alpha: f64,
    },
    Circle {
        center: Point,
        diameter: f64,
        color: Rgb,
        alpha: f64,
    },
    Text {
        origin: Point,
        text: String,
        color: Rgb,
    },
}

/// A surface that only remembers what was drawn on it.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// All commands in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded circles, in draw order.
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    /// Recorded lines, in draw order.
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    /// Recorded text, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn fill_gradient(&mut self, start: Point, from: Rgb, end: Point, to: Rgb) {
        self.commands.push(DrawCommand::Gradient {
            start,
            from,
            end,
            to,
        });
    }

    fn set_transform(&mut self, transform: Transform) {
        self.commands.push(DrawCommand::SetTransform(transform));
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgb, alpha: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
            alpha,
        });
    }

    fn fill_circle(&mut self, center: Point, diameter: f64, color: Rgb, alpha: f64) {
        self.commands.push(DrawCommand::Circle {
            center,
            diameter,
            color,
            alpha,
        });
    }

    fn draw_text(&mut self, origin: Point, text: &str, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            origin,
            text: text.to_string(),
            color,
        });
    }
}
