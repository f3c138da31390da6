use std::f32::consts::TAU;

use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

use crate::paint::Color;

/// `amplitude * sin(elapsed * frequency + phase)`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Oscillation {
    pub amplitude: f32,
    /// Angular frequency in radians per second.
    pub frequency: f32,
    pub phase: f32,
}

impl Oscillation {
    pub const NONE: Oscillation = Oscillation::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(amplitude: f32, frequency: f32, phase: f32) -> Self {
        Self { amplitude, frequency, phase }
    }

    #[inline]
    pub fn sample(&self, elapsed: f32) -> f32 {
        self.amplitude * (elapsed * self.frequency + self.phase).sin()
    }
}

/// How a solid colors its six faces.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FaceColoring {
    /// Every face uses the body color.
    #[default]
    Uniform,
    /// Front/back/left/right/top/bottom in red/green/blue/yellow/cyan/magenta.
    Palette,
}

impl FaceColoring {
    pub const PALETTE: [Color; 6] = [
        Color::RED,
        Color::GREEN,
        Color::BLUE,
        Color::YELLOW,
        Color::CYAN,
        Color::MAGENTA,
    ];
}

/// Rotation about an arbitrary axis at a fixed rate.
///
/// The angle is a pure function of elapsed time, so the pose never drifts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisSpin {
    /// Normalized rotation axis.
    pub axis: Vec3,
    pub degrees_per_second: f32,
}

impl AxisSpin {
    /// `axis` need not be normalized. A zero axis falls back to +Y.
    pub fn new(axis: Vec3, degrees_per_second: f32) -> Self {
        Self {
            axis: axis.try_normalize().unwrap_or(Vec3::Y),
            degrees_per_second,
        }
    }

    /// Angle in degrees at `elapsed`, wrapped to `[0, 360)`.
    #[inline]
    pub fn angle_at(&self, elapsed: f32) -> f32 {
        (self.degrees_per_second * elapsed).rem_euclid(360.0)
    }
}

/// A floating cube with rotation, vertical bob and depth oscillation.
///
/// `rotation`, `spin_angle`, `bob_offset` and `depth` are derived state
/// written by the animator; the rest is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidBody {
    pub x: f32,
    pub y: f32,
    /// Depth the body oscillates around.
    pub base_depth: f32,
    pub size: f32,
    pub color: Color,
    pub faces: FaceColoring,

    /// Rotation about X and Y, in degrees.
    pub rotation: Vec2,
    /// Degrees per second about X and Y.
    pub rotation_speed: Vec2,

    /// Optional spin about a free axis, applied outside the X/Y rotation.
    pub spin: Option<AxisSpin>,
    /// Current spin angle in degrees.
    pub spin_angle: f32,

    pub bob: Oscillation,
    pub depth_wave: Oscillation,

    pub bob_offset: f32,
    pub depth: f32,
}

impl SolidBody {
    pub const BOB_AMPLITUDE: f32 = 0.3;
    pub const DEPTH_AMPLITUDE_RATIO: f32 = 0.4;

    /// Body at rest: no rotation speed, no oscillation.
    pub fn fixed(position: Vec3, size: f32, color: Color) -> Self {
        Self {
            x: position.x,
            y: position.y,
            base_depth: position.z,
            size,
            color,
            faces: FaceColoring::Uniform,
            rotation: Vec2::ZERO,
            rotation_speed: Vec2::ZERO,
            spin: None,
            spin_angle: 0.0,
            bob: Oscillation::NONE,
            depth_wave: Oscillation::NONE,
            bob_offset: 0.0,
            depth: position.z,
        }
    }

    /// Body with randomized spin, bob and depth oscillation.
    ///
    /// `position.z` is the base depth; the depth amplitude is 40% of it.
    pub fn floating<R: Rng + ?Sized>(rng: &mut R, position: Vec3, size: f32, color: Color) -> Self {
        let mut body = Self::fixed(position, size, color);
        body.rotation = Vec2::new(rng.gen_range(0.0..360.0), rng.gen_range(0.0..360.0));
        body.rotation_speed = Vec2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
        body.bob = Oscillation::new(
            Self::BOB_AMPLITUDE,
            rng.gen_range(0.5..1.5),
            rng.gen_range(0.0..TAU),
        );
        body.depth_wave = Oscillation::new(
            position.z * Self::DEPTH_AMPLITUDE_RATIO,
            rng.gen_range(0.3..0.7),
            rng.gen_range(0.0..TAU),
        );
        body
    }

    pub fn with_faces(mut self, faces: FaceColoring) -> Self {
        self.faces = faces;
        self
    }

    pub fn with_rotation_speed(mut self, degrees_per_second: Vec2) -> Self {
        self.rotation_speed = degrees_per_second;
        self
    }

    pub fn with_spin(mut self, spin: AxisSpin) -> Self {
        self.spin = Some(spin);
        self
    }

    pub fn with_depth_wave(mut self, wave: Oscillation) -> Self {
        self.depth_wave = wave;
        self
    }

    /// Closed interval the depth can reach.
    #[inline]
    pub fn depth_range(&self) -> (f32, f32) {
        let a = self.depth_wave.amplitude.abs();
        (self.base_depth - a, self.base_depth + a)
    }

    /// Object-to-world transform for a unit cube.
    pub fn model(&self) -> Mat4 {
        let spin = match self.spin {
            Some(spin) => Mat4::from_axis_angle(spin.axis, self.spin_angle.to_radians()),
            None => Mat4::IDENTITY,
        };

        Mat4::from_translation(Vec3::new(self.x, self.y + self.bob_offset, -self.depth))
            * spin
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_scale(Vec3::splat(self.size))
    }
}
