//! Data model for the helix animation.
//!
//! This module contains the simulation state:
//! - Nucleotides and their display colors
//! - Base pairs (one rung of the ladder each)
//! - Strands (a fixed chain of base pairs)
//! - The scene: strands, visual modes and the animation clock
//!
//! Nothing here knows about terminals. Drawing lives in `ui`, input mapping
//! in `event`.

use std::f64::consts::PI;

use crate::color::Rgb;
use crate::surface::CANVAS_WIDTH;

/// Number of base pairs in a strand.
pub const PAIR_COUNT: usize = 30;
/// Horizontal radius of the helix.
pub const HELIX_RADIUS: f64 = 40.0;
/// Vertical distance between consecutive base pairs.
pub const PAIR_SPACING: f64 = 20.0;
/// Phase difference between consecutive base pairs.
pub const PHASE_STEP: f64 = PI / 5.0;
/// Vertical position of the first base pair.
pub const STRAND_TOP: f64 = 50.0;

/// Rotation added per tick at speed 1.0.
pub const ROTATION_STEP: f64 = 0.02;
/// Split level removed per tick.
pub const SPLIT_DECAY: f64 = 0.02;
/// Pulse phase advance per tick.
pub const PULSE_STEP: f64 = 0.1;
/// Relative amplitude of the pulse.
pub const PULSE_AMPLITUDE: f64 = 0.2;

pub const ZOOM_MIN: u16 = 50;
pub const ZOOM_MAX: u16 = 200;
pub const ZOOM_STEP: u16 = 10;

pub const SPEED_MIN: f64 = 0.1;
pub const SPEED_MAX: f64 = 3.0;
pub const SPEED_STEP: f64 = 0.1;

/// The four DNA bases, used purely as color tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nucleotide {
    Adenine,
    Thymine,
    Cytosine,
    Guanine,
}

impl Nucleotide {
    /// Legend order.
    pub const ALL: [Nucleotide; 4] = [
        Nucleotide::Adenine,
        Nucleotide::Thymine,
        Nucleotide::Cytosine,
        Nucleotide::Guanine,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Nucleotide::Adenine => "Adenine",
            Nucleotide::Thymine => "Thymine",
            Nucleotide::Cytosine => "Cytosine",
            Nucleotide::Guanine => "Guanine",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Nucleotide::Adenine => Rgb::new(255, 102, 102),
            Nucleotide::Thymine => Rgb::new(102, 178, 255),
            Nucleotide::Cytosine => Rgb::new(102, 255, 102),
            Nucleotide::Guanine => Rgb::new(255, 178, 102),
        }
    }

    /// Watson-Crick partner (A-T, C-G).
    pub fn complement(self) -> Nucleotide {
        match self {
            Nucleotide::Adenine => Nucleotide::Thymine,
            Nucleotide::Thymine => Nucleotide::Adenine,
            Nucleotide::Cytosine => Nucleotide::Guanine,
            Nucleotide::Guanine => Nucleotide::Cytosine,
        }
    }
}

/// Visual mode switches shared by the update and draw passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFlags {
    /// Rotation advances every tick
    pub rotating: bool,
    /// Marker offsets oscillate
    pub pulse: bool,
    /// Hue-based coloring instead of base colors
    pub rainbow: bool,
    /// Translucent halo under each marker
    pub glow: bool,
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self {
            rotating: true,
            pulse: false,
            rainbow: false,
            glow: true,
        }
    }
}

/// Startup settings for a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub modes: ModeFlags,
    pub rotation_speed: f64,
    pub zoom: u16,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            modes: ModeFlags::default(),
            rotation_speed: 1.0,
            zoom: 100,
        }
    }
}

/// One rung of the ladder: two colored markers sharing a y-coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct BasePair {
    /// Position in the strand (0-based)
    pub index: usize,
    pub left_x: f64,
    pub right_x: f64,
    pub y: f64,
    pub left: Nucleotide,
    pub right: Nucleotide,
    /// Free-running phase, only advanced while pulse mode is on
    pub pulse_phase: f64,
}

impl BasePair {
    /// Creates a base pair, picking its bases from `index % 4`.
    pub fn new(index: usize) -> Self {
        let left = match index % 4 {
            0 => Nucleotide::Adenine,
            1 => Nucleotide::Thymine,
            2 => Nucleotide::Cytosine,
            _ => Nucleotide::Guanine,
        };
        Self {
            index,
            left_x: 0.0,
            right_x: 0.0,
            y: 0.0,
            left,
            right: left.complement(),
            pulse_phase: 0.0,
        }
    }

    /// Recomputes marker positions for this frame.
    pub fn update(&mut self, origin_x: f64, origin_y: f64, rotation: f64, pulse: bool, split_level: f64) {
        let angle = rotation + self.index as f64 * PHASE_STEP;
        self.y = origin_y + self.index as f64 * PAIR_SPACING;

        let pulse_factor = if pulse {
            self.pulse_phase += PULSE_STEP;
            1.0 + PULSE_AMPLITUDE * self.pulse_phase.sin()
        } else {
            1.0
        };

        self.left_x = origin_x + angle.cos() * HELIX_RADIUS * pulse_factor;
        self.right_x = origin_x + (angle + PI).cos() * HELIX_RADIUS * pulse_factor;

        let split_offset = HELIX_RADIUS * split_level;
        self.left_x -= split_offset;
        self.right_x += split_offset;
    }

    /// Marker colors for the current modes.
    ///
    /// Rainbow hues are complementary: the right marker sits half a turn
    /// around the color wheel from the left one.
    pub fn display_colors(&self, rainbow: bool) -> (Rgb, Rgb) {
        if rainbow {
            let hue = self.index as f64 / PAIR_COUNT as f64;
            (
                Rgb::from_hsb(hue, 0.8, 1.0),
                Rgb::from_hsb(hue + 0.5, 0.8, 1.0),
            )
        } else {
            (self.left.color(), self.right.color())
        }
    }
}

/// One helix: a fixed chain of base pairs hanging from an origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Strand {
    origin_x: f64,
    origin_y: f64,
    pairs: Vec<BasePair>,
}

impl Strand {
    /// Creates a strand of [`PAIR_COUNT`] base pairs.
    pub fn new(origin_x: f64, origin_y: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pairs: (0..PAIR_COUNT).map(BasePair::new).collect(),
        }
    }

    pub fn origin_x(&self) -> f64 {
        self.origin_x
    }

    pub fn origin_y(&self) -> f64 {
        self.origin_y
    }

    pub fn pairs(&self) -> &[BasePair] {
        &self.pairs
    }

    /// Moves every base pair to its position for `rotation`.
    pub fn update(&mut self, rotation: f64, pulse: bool, split_level: f64) {
        for pair in &mut self.pairs {
            pair.update(self.origin_x, self.origin_y, rotation, pulse, split_level);
        }
    }

    /// Positions the pairs at their unpulsed radius. Pulse phases are left alone.
    pub fn place(&mut self, rotation: f64, split_level: f64) {
        self.update(rotation, false, split_level);
    }
}

/// The complete animation state.
#[derive(Debug, Clone)]
pub struct Scene {
    pub strands: Vec<Strand>,
    pub modes: ModeFlags,
    /// Accumulated rotation in radians
    pub rotation: f64,
    rotation_speed: f64,
    zoom: u16,
    split_level: f64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Scene {
    /// Creates a scene with a single strand centered on the canvas.
    ///
    /// Out-of-range speed or zoom values are clamped. The speed is otherwise
    /// kept as given; only the `+`/`-` steps snap it to tenths.
    ///
    /// Pairs start at their resting positions, so pulse mode does its first
    /// phase step on the first tick.
    pub fn new(config: SceneConfig) -> Self {
        let mut scene = Self {
            strands: vec![Strand::new(CANVAS_WIDTH / 2.0, STRAND_TOP)],
            modes: config.modes,
            rotation: 0.0,
            rotation_speed: config.rotation_speed.clamp(SPEED_MIN, SPEED_MAX),
            zoom: config.zoom.clamp(ZOOM_MIN, ZOOM_MAX),
            split_level: 0.0,
        };
        for strand in &mut scene.strands {
            strand.place(scene.rotation, scene.split_level);
        }
        scene
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    /// Zoom in percent.
    pub fn zoom(&self) -> u16 {
        self.zoom
    }

    pub fn split_level(&self) -> f64 {
        self.split_level
    }

    /// Advances the animation by one fixed frame interval.
    pub fn tick(&mut self) {
        if self.modes.rotating {
            self.rotation += ROTATION_STEP * self.rotation_speed;
        }

        if self.split_level > 0.0 {
            self.split_level = (self.split_level - SPLIT_DECAY).max(0.0);
        }

        self.update_strands();
    }

    fn update_strands(&mut self) {
        for strand in &mut self.strands {
            strand.update(self.rotation, self.modes.pulse, self.split_level);
        }
    }

    pub fn toggle_rotating(&mut self) {
        self.modes.rotating = !self.modes.rotating;
    }

    pub fn toggle_pulse(&mut self) {
        self.modes.pulse = !self.modes.pulse;
    }

    pub fn toggle_rainbow(&mut self) {
        self.modes.rainbow = !self.modes.rainbow;
    }

    pub fn toggle_glow(&mut self) {
        self.modes.glow = !self.modes.glow;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn speed_up(&mut self) {
        self.rotation_speed = round_tenth(self.rotation_speed + SPEED_STEP).min(SPEED_MAX);
    }

    pub fn speed_down(&mut self) {
        self.rotation_speed = round_tenth(self.rotation_speed - SPEED_STEP).max(SPEED_MIN);
    }

    /// Opens the helix fully, or closes it at once if it is still open.
    pub fn toggle_split(&mut self) {
        self.split_level = if self.split_level > 0.0 { 0.0 } else { 1.0 };
    }
}

/// Rounds to one decimal so repeated speed steps never drift.
fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_scene_defaults() {
        let scene = Scene::default();
        assert_eq!(scene.strands.len(), 1);
        assert_eq!(scene.strands[0].pairs().len(), PAIR_COUNT);
        assert_eq!(scene.strands[0].origin_x(), 400.0);
        assert_eq!(scene.strands[0].origin_y(), 50.0);
        assert!(scene.modes.rotating);
        assert!(scene.modes.glow);
        assert!(!scene.modes.pulse);
        assert!(!scene.modes.rainbow);
        assert_eq!(scene.zoom(), 100);
        assert_eq!(scene.rotation_speed(), 1.0);
        assert_eq!(scene.split_level(), 0.0);
    }

    #[test]
    fn test_config_is_clamped() {
        let scene = Scene::new(SceneConfig {
            modes: ModeFlags::default(),
            rotation_speed: 9.0,
            zoom: 10,
        });
        assert_eq!(scene.rotation_speed(), SPEED_MAX);
        assert_eq!(scene.zoom(), ZOOM_MIN);
    }

    #[test]
    fn test_rotation_advances_linearly() {
        for speed in [0.1, 1.0, 2.5] {
            let mut scene = Scene::new(SceneConfig {
                rotation_speed: speed,
                ..SceneConfig::default()
            });
            for n in 1..=200 {
                scene.tick();
                let expected = n as f64 * ROTATION_STEP * speed;
                assert!((scene.rotation - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_rotation_frozen_when_paused() {
        let mut scene = Scene::default();
        scene.tick();
        let before = scene.rotation;
        scene.toggle_rotating();
        for _ in 0..10 {
            scene.tick();
        }
        assert_eq!(scene.rotation, before);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut scene = Scene::default();
        scene.zoom_in();
        assert_eq!(scene.zoom(), 110);
        for _ in 0..20 {
            scene.zoom_in();
        }
        assert_eq!(scene.zoom(), ZOOM_MAX);
        for _ in 0..30 {
            scene.zoom_out();
            assert!(scene.zoom() >= ZOOM_MIN);
        }
        assert_eq!(scene.zoom(), ZOOM_MIN);
    }

    #[test]
    fn test_zoom_round_trip() {
        let mut scene = Scene::default();
        for _ in 0..3 {
            scene.zoom_in();
        }
        for _ in 0..3 {
            scene.zoom_out();
        }
        assert_eq!(scene.zoom(), 100);
    }

    #[test]
    fn test_speed_clamped_and_stepped() {
        let mut scene = Scene::default();
        scene.speed_up();
        assert!((scene.rotation_speed() - 1.1).abs() < EPS);
        for _ in 0..30 {
            scene.speed_up();
        }
        assert_eq!(scene.rotation_speed(), SPEED_MAX);
        for _ in 0..40 {
            scene.speed_down();
            assert!(scene.rotation_speed() >= SPEED_MIN);
        }
        assert_eq!(scene.rotation_speed(), SPEED_MIN);
        scene.speed_up();
        assert!((scene.rotation_speed() - 0.2).abs() < EPS);
    }

    #[test]
    fn test_split_decays_to_zero() {
        let mut scene = Scene::default();
        scene.toggle_split();
        assert_eq!(scene.split_level(), 1.0);

        for _ in 0..49 {
            scene.tick();
            assert!(scene.split_level() > 0.0);
        }
        scene.tick();
        assert_eq!(scene.split_level(), 0.0);

        scene.tick();
        assert_eq!(scene.split_level(), 0.0);
    }

    #[test]
    fn test_split_toggle_closes_immediately() {
        let mut scene = Scene::default();
        scene.toggle_split();
        scene.tick();
        assert!(scene.split_level() > 0.0);
        scene.toggle_split();
        assert_eq!(scene.split_level(), 0.0);
        scene.toggle_split();
        assert_eq!(scene.split_level(), 1.0);
    }

    #[test]
    fn test_toggles_are_involutions() {
        let mut scene = Scene::default();
        let original = scene.modes;
        scene.toggle_rotating();
        scene.toggle_pulse();
        scene.toggle_rainbow();
        scene.toggle_glow();
        assert_ne!(scene.modes, original);
        scene.toggle_rotating();
        scene.toggle_pulse();
        scene.toggle_rainbow();
        scene.toggle_glow();
        assert_eq!(scene.modes, original);
    }

    #[test]
    fn test_base_pair_colors_periodic() {
        let pairs: Vec<BasePair> = (0..8).map(BasePair::new).collect();
        assert_eq!((pairs[0].left, pairs[0].right), (Nucleotide::Adenine, Nucleotide::Thymine));
        assert_eq!((pairs[1].left, pairs[1].right), (Nucleotide::Thymine, Nucleotide::Adenine));
        assert_eq!((pairs[2].left, pairs[2].right), (Nucleotide::Cytosine, Nucleotide::Guanine));
        assert_eq!((pairs[3].left, pairs[3].right), (Nucleotide::Guanine, Nucleotide::Cytosine));
        for i in 0..4 {
            assert_eq!(pairs[i].left, pairs[i + 4].left);
            assert_eq!(pairs[i].right, pairs[i + 4].right);
        }
    }

    #[test]
    fn test_initial_geometry() {
        let scene = Scene::default();
        let pair = &scene.strands[0].pairs()[0];
        assert!((pair.left_x - 440.0).abs() < EPS);
        assert!((pair.right_x - 360.0).abs() < EPS);
        assert_eq!(pair.y, 50.0);
    }

    #[test]
    fn test_pairs_symmetric_without_split() {
        let mut scene = Scene::default();
        for pulse in [false, true] {
            scene.modes.pulse = pulse;
            for _ in 0..17 {
                scene.tick();
            }
            let strand = &scene.strands[0];
            for pair in strand.pairs() {
                assert!((pair.left_x + pair.right_x - 2.0 * strand.origin_x()).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_y_ladder_is_fixed() {
        let mut scene = Scene::default();
        for _ in 0..33 {
            scene.tick();
        }
        let pairs = scene.strands[0].pairs();
        for (i, pair) in pairs.iter().enumerate() {
            assert_eq!(pair.y, STRAND_TOP + i as f64 * PAIR_SPACING);
        }
        assert!(pairs.windows(2).all(|w| w[0].y < w[1].y));
    }

    #[test]
    fn test_split_pushes_pairs_apart() {
        let mut closed = BasePair::new(3);
        let mut open = BasePair::new(3);
        closed.update(400.0, 50.0, 0.7, false, 0.0);
        open.update(400.0, 50.0, 0.7, false, 0.5);
        assert!((closed.left_x - open.left_x - 20.0).abs() < EPS);
        assert!((open.right_x - closed.right_x - 20.0).abs() < EPS);
    }

    #[test]
    fn test_pulse_phase_only_advances_in_pulse_mode() {
        let mut pair = BasePair::new(0);
        pair.update(400.0, 50.0, 0.0, false, 0.0);
        assert_eq!(pair.pulse_phase, 0.0);
        pair.update(400.0, 50.0, 0.0, true, 0.0);
        pair.update(400.0, 50.0, 0.0, true, 0.0);
        assert!((pair.pulse_phase - 0.2).abs() < EPS);
        let expected = 400.0 + HELIX_RADIUS * (1.0 + PULSE_AMPLITUDE * 0.2f64.sin());
        assert!((pair.left_x - expected).abs() < EPS);
        pair.update(400.0, 50.0, 0.0, false, 0.0);
        assert!((pair.pulse_phase - 0.2).abs() < EPS);
    }

    #[test]
    fn test_rainbow_changes_colors_not_positions() {
        let mut plain = Scene::default();
        let mut rainbow = Scene::default();
        rainbow.toggle_rainbow();
        for _ in 0..12 {
            plain.tick();
            rainbow.tick();
        }
        let a = plain.strands[0].pairs();
        let b = rainbow.strands[0].pairs();
        for (p, q) in a.iter().zip(b) {
            assert_eq!((p.left_x, p.right_x, p.y), (q.left_x, q.right_x, q.y));
        }
        assert_ne!(a[0].display_colors(false), b[0].display_colors(true));
    }

    #[test]
    fn test_rainbow_hues_complementary() {
        let pair = BasePair::new(0);
        let (left, right) = pair.display_colors(true);
        assert_eq!(left, Rgb::from_hsb(0.0, 0.8, 1.0));
        assert_eq!(right, Rgb::from_hsb(0.5, 0.8, 1.0));
        assert_eq!(pair.display_colors(false), (Nucleotide::Adenine.color(), Nucleotide::Thymine.color()));

        let scene = Scene::default();
        let pair = &scene.strands[0].pairs()[7];
        let hue = 7.0 / PAIR_COUNT as f64;
        assert_eq!(
            pair.display_colors(true),
            (Rgb::from_hsb(hue, 0.8, 1.0), Rgb::from_hsb(hue + 0.5, 0.8, 1.0))
        );
        assert_ne!(pair.display_colors(true).0, scene.strands[0].pairs()[0].display_colors(true).0);
    }

    #[test]
    fn test_initial_speed_kept_until_stepped() {
        let mut scene = Scene::new(SceneConfig {
            rotation_speed: 1.25,
            ..SceneConfig::default()
        });
        assert_eq!(scene.rotation_speed(), 1.25);
        scene.tick();
        assert!((scene.rotation - 1.25 * ROTATION_STEP).abs() < EPS);
        scene.speed_up();
        assert!((scene.rotation_speed() - 1.4).abs() < EPS);
    }

    #[test]
    fn test_new_scene_does_not_advance_pulse() {
        let mut scene = Scene::new(SceneConfig {
            modes: ModeFlags {
                pulse: true,
                ..ModeFlags::default()
            },
            ..SceneConfig::default()
        });
        let pair = &scene.strands[0].pairs()[0];
        assert_eq!(pair.pulse_phase, 0.0);
        assert!((pair.left_x - 440.0).abs() < EPS);

        scene.tick();
        assert!((scene.strands[0].pairs()[0].pulse_phase - PULSE_STEP).abs() < EPS);
    }
}
