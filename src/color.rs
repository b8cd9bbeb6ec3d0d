//! Colors used by the helix.
//!
//! Everything is plain 8-bit RGB. Translucency is expressed separately as an
//! alpha in `[0, 1]` when a shape is drawn, so colors stay `Copy` and
//! comparable in tests. Compositing itself happens in the rasterizer.

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Creates a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts hue/saturation/brightness to RGB.
    ///
    /// Only the fractional part of `hue` is used, so `0.25` and `1.25` give
    /// the same color. This is what lets the right-hand rainbow marker use
    /// `hue + 0.5` without wrapping it first.
    pub fn from_hsb(hue: f64, saturation: f64, brightness: f64) -> Self {
        if saturation <= 0.0 {
            let v = channel(brightness);
            return Self::new(v, v, v);
        }

        let h = (hue - hue.floor()) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
        };
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Maps a `[0, 1]` intensity to a byte, rounding like AWT does.
fn channel(v: f64) -> u8 {
    (v * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsb_primaries() {
        assert_eq!(Rgb::from_hsb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hsb(1.0 / 3.0, 1.0, 1.0), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hsb(2.0 / 3.0, 1.0, 1.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_hsb_hue_wraps() {
        assert_eq!(Rgb::from_hsb(1.25, 0.8, 1.0), Rgb::from_hsb(0.25, 0.8, 1.0));
        assert_eq!(Rgb::from_hsb(1.0, 0.7, 1.0), Rgb::from_hsb(0.0, 0.7, 1.0));
    }

    #[test]
    fn test_hsb_zero_saturation_is_gray() {
        assert_eq!(Rgb::from_hsb(0.6, 0.0, 1.0), Rgb::WHITE);
        assert_eq!(Rgb::from_hsb(0.6, 0.0, 0.0), Rgb::BLACK);
    }

    #[test]
    fn test_lerp() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(Rgb::BLACK.lerp(red, 1.0), red);
        assert_eq!(Rgb::BLACK.lerp(red, 0.0), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.lerp(Rgb::new(200, 100, 0), 0.5), Rgb::new(100, 50, 0));
        // Out-of-range factors are clamped
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 2.0), Rgb::WHITE);
    }
}
