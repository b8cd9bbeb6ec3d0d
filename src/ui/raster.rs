//! Terminal view of the canvas.
//!
//! Shapes are rasterized by tiny-skia into a pixmap with two pixels per
//! terminal cell (top and bottom half), then blitted with `▀`: the glyph's
//! foreground paints the top pixel and the cell background the bottom one.
//!
//! Text cannot be smaller than a cell, so it is kept aside as cell-aligned
//! runs and written over the pixels during the blit.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use tiny_skia::{
    FillRule, GradientStop, LineCap, LinearGradient, Paint, PathBuilder, Pixmap, Shader, SpreadMode,
    Stroke,
};

use crate::color::Rgb;
use crate::surface::{Point, Surface, Transform, CANVAS_HEIGHT, CANVAS_WIDTH};

/// Smallest shape radius, in pixels.
///
/// Every point of the plane is within this distance of a pixel center, so
/// thin lines stay connected and tiny markers never vanish.
const MIN_PIXEL_RADIUS: f64 = 0.71;

/// Upper half block.
const HALF_BLOCK: &str = "▀";

/// A line of text pinned to a cell.
///
/// The position is signed: zooming in can push the start of a line past the
/// left or top edge, and the part still on screen is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub column: i32,
    pub row: i32,
    pub text: String,
    pub color: Rgb,
}

impl TextRun {
    fn end_column(&self) -> i32 {
        self.column.saturating_add(char_count(&self.text))
    }
}

/// A tiny-skia pixmap implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Width in pixels (= columns)
    width: usize,
    /// Height in pixels (= rows * 2)
    height: usize,
    /// `None` when either dimension is zero
    pixmap: Option<Pixmap>,
    texts: Vec<TextRun>,
    /// Canvas to pixel mapping (uniform fit, centered)
    fit: Transform,
    /// Current drawing transform, in canvas units
    transform: Transform,
}

impl Framebuffer {
    /// Creates a black framebuffer covering `columns × rows` cells.
    pub fn new(columns: u16, rows: u16) -> Self {
        let width = columns as usize;
        let height = rows as usize * 2;

        let scale = (width as f64 / CANVAS_WIDTH).min(height as f64 / CANVAS_HEIGHT);
        let fit = Transform {
            scale,
            offset: Point::new(
                (width as f64 - CANVAS_WIDTH * scale) / 2.0,
                (height as f64 - CANVAS_HEIGHT * scale) / 2.0,
            ),
        };

        let mut pixmap = Pixmap::new(width as u32, height as u32);
        if let Some(pixmap) = pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::BLACK);
        }

        Self {
            width,
            height,
            pixmap,
            texts: Vec::new(),
            fit,
            transform: Transform::IDENTITY,
        }
    }

    /// Size in pixels.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        let pixmap = self.pixmap.as_ref()?;
        let color = pixmap.pixel(x as u32, y as u32)?.demultiply();
        Some(Rgb::new(color.red(), color.green(), color.blue()))
    }

    pub fn text_runs(&self) -> &[TextRun] {
        &self.texts
    }

    /// Current transform followed by the fit, as a canvas to pixel mapping.
    fn pixel_transform(&self) -> Transform {
        Transform {
            scale: self.fit.scale * self.transform.scale,
            offset: self.fit.apply(self.transform.offset),
        }
    }

    fn to_pixels(&self, p: Point) -> Point {
        self.pixel_transform().apply(p)
    }

    fn skia_transform(&self) -> tiny_skia::Transform {
        let t = self.pixel_transform();
        tiny_skia::Transform::from_row(
            t.scale as f32,
            0.0,
            0.0,
            t.scale as f32,
            t.offset.x as f32,
            t.offset.y as f32,
        )
    }

    /// Widens `size` (canvas units) so it covers at least `2 * MIN_PIXEL_RADIUS` pixels.
    fn visible_size(&self, size: f64) -> f64 {
        let scale = self.pixel_transform().scale;
        if scale > 0.0 {
            size.max(2.0 * MIN_PIXEL_RADIUS / scale)
        } else {
            size
        }
    }

    /// Finds a free row for a run starting at `row`.
    ///
    /// When the canvas is small, consecutive legend lines can land on the
    /// same cell row; later lines are pushed down instead of overwriting.
    fn free_row(&self, column: i32, row: i32, len: i32) -> i32 {
        let end = column.saturating_add(len);
        let mut row = row;
        while row < i32::MAX
            && self
                .texts
                .iter()
                .any(|t| t.row == row && t.column < end && column < t.end_column())
        {
            row += 1;
        }
        row
    }
}

fn solid_paint(color: Rgb, alpha: f64) -> Paint<'static> {
    let mut paint = Paint::default();
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    paint.set_color_rgba8(color.r, color.g, color.b, a);
    paint.anti_alias = true;
    paint
}

fn skia_color(c: Rgb) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, 255)
}

impl Surface for Framebuffer {
    fn size(&self) -> (f64, f64) {
        (CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    fn fill_gradient(&mut self, start: Point, from: Rgb, end: Point, to: Rgb) {
        let a = self.fit.apply(start);
        let b = self.fit.apply(end);
        let (width, height) = (self.width as f32, self.height as f32);
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };

        // Coincident end points degenerate to a solid fill.
        let shader = LinearGradient::new(
            tiny_skia::Point::from_xy(a.x as f32, a.y as f32),
            tiny_skia::Point::from_xy(b.x as f32, b.y as f32),
            vec![
                GradientStop::new(0.0, skia_color(from)),
                GradientStop::new(1.0, skia_color(to)),
            ],
            SpreadMode::Pad,
            tiny_skia::Transform::identity(),
        )
        .unwrap_or(Shader::SolidColor(skia_color(to)));

        let paint = Paint {
            shader,
            ..Paint::default()
        };
        if let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, width, height) {
            pixmap.fill_rect(rect, &paint, tiny_skia::Transform::identity(), None);
        }
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgb, alpha: f64) {
        let stroke = Stroke {
            width: self.visible_size(width) as f32,
            line_cap: LineCap::Round,
            ..Default::default()
        };
        let transform = self.skia_transform();
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            return;
        };

        pixmap.stroke_path(&path, &solid_paint(color, alpha), &stroke, transform, None);
    }

    fn fill_circle(&mut self, center: Point, diameter: f64, color: Rgb, alpha: f64) {
        let radius = self.visible_size(diameter) / 2.0;
        let transform = self.skia_transform();
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32) else {
            return;
        };

        pixmap.fill_path(&path, &solid_paint(color, alpha), FillRule::Winding, transform, None);
    }

    fn draw_text(&mut self, origin: Point, text: &str, color: Rgb) {
        let p = self.to_pixels(origin);
        if text.is_empty() || !p.x.is_finite() || !p.y.is_finite() {
            return;
        }
        // `as` saturates at the i32 bounds
        let column = p.x.floor() as i32;
        let row = (p.y / 2.0).floor() as i32;
        let row = self.free_row(column, row, char_count(text));

        self.texts.push(TextRun {
            column,
            row,
            text: text.to_string(),
            color,
        });
    }
}

impl Widget for &Framebuffer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = (self.width.min(u16::MAX as usize) as u16).min(area.width);
        let rows = ((self.height / 2).min(u16::MAX as usize) as u16).min(area.height);
        let rgb = |x: usize, y: usize| self.pixel(x, y).unwrap_or(Rgb::BLACK);

        for row in 0..rows {
            for column in 0..columns {
                let top = rgb(column as usize, row as usize * 2);
                let bottom = rgb(column as usize, row as usize * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }

        for run in &self.texts {
            if run.row < 0 || run.row >= rows as i32 {
                continue;
            }
            let row = run.row as u16;
            for (i, ch) in run.text.chars().enumerate() {
                let column = run.column.saturating_add(i as i32);
                if column < 0 {
                    continue;
                }
                if column >= columns as i32 {
                    break;
                }
                let column = column as u16;
                let top = rgb(column as usize, row as usize * 2);
                let bottom = rgb(column as usize, row as usize * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_char(ch)
                        .set_fg(to_color(run.color))
                        .set_bg(to_color(top.lerp(bottom, 0.5)));
                }
            }
        }
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

fn char_count(text: &str) -> i32 {
    text.chars().count().min(i32::MAX as usize) as i32
}
