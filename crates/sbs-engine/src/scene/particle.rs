use glam::Vec3;
use rand::Rng;

use crate::paint::Color;

/// Background star drifting toward the viewer.
///
/// `z` is positive distance from the eye baseline. Once it drops below
/// [`RESPAWN_DEPTH`](Self::RESPAWN_DEPTH) the particle is moved back to
/// [`Z_MAX`](Self::Z_MAX) with a fresh lateral position and speed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParticleBillboard {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub speed: f32,
    /// Nominal billboard size in pixels at `Z_MAX`.
    pub size: f32,
}

impl ParticleBillboard {
    pub const Z_MAX: f32 = 100.0;
    pub const RESPAWN_DEPTH: f32 = 1.0;
    /// Depth units per second per unit of speed.
    pub const DEPTH_SPEED: f32 = 30.0;
    /// Lateral spread numerator applied as `SPREAD / z`.
    pub const SPREAD: f32 = 50.0;

    pub const SPEED_RANGE: (f32, f32) = (0.5, 2.0);
    pub const X_RANGE: (f32, f32) = (-50.0, 50.0);
    pub const Y_RANGE: (f32, f32) = (-30.0, 30.0);

    pub const DEFAULT_SIZE: f32 = 2.0;
    pub const MIN_PIXEL_SIZE: f32 = 1.0;
    pub const MAX_PIXEL_SIZE: f32 = 8.0;

    /// Spawns a particle at a random depth in `[RESPAWN_DEPTH, Z_MAX)`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut p = Self {
            x: 0.0,
            y: 0.0,
            z: Self::Z_MAX,
            speed: Self::SPEED_RANGE.0,
            size: Self::DEFAULT_SIZE,
        };
        p.respawn(rng);
        p.z = rng.gen_range(Self::RESPAWN_DEPTH..Self::Z_MAX);
        p
    }

    /// Moves the particle back to the far plane with new lateral position and speed.
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.x = rng.gen_range(Self::X_RANGE.0..Self::X_RANGE.1);
        self.y = rng.gen_range(Self::Y_RANGE.0..Self::Y_RANGE.1);
        self.z = Self::Z_MAX;
        self.speed = rng.gen_range(Self::SPEED_RANGE.0..Self::SPEED_RANGE.1);
    }

    /// `1` at the viewer, `0` at `Z_MAX`.
    #[inline]
    pub fn brightness(&self) -> f32 {
        (1.0 - self.z / Self::Z_MAX).clamp(0.0, 1.0)
    }

    /// Slightly blue-shifted grey.
    #[inline]
    pub fn color(&self) -> Color {
        let b = self.brightness();
        Color::rgb(b, b, (b * 1.1).min(1.0))
    }

    /// World-space position with lateral spread applied.
    #[inline]
    pub fn draw_position(&self) -> Vec3 {
        let spread = Self::SPREAD / self.z;
        Vec3::new(self.x * spread, self.y * spread, -self.z)
    }

    /// On-screen billboard size, attenuated by depth.
    #[inline]
    pub fn pixel_size(&self) -> f32 {
        (self.size * (Self::Z_MAX / self.z).sqrt()).clamp(Self::MIN_PIXEL_SIZE, Self::MAX_PIXEL_SIZE)
    }

    #[inline]
    pub fn in_bounds(&self) -> bool {
        (Self::X_RANGE.0..Self::X_RANGE.1).contains(&self.x)
            && (Self::Y_RANGE.0..Self::Y_RANGE.1).contains(&self.y)
            && self.z > 0.0
            && self.z <= Self::Z_MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn at(z: f32) -> ParticleBillboard {
        ParticleBillboard { x: 10.0, y: -6.0, z, speed: 1.0, size: 2.0 }
    }

    #[test]
    fn spawn_is_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = ParticleBillboard::spawn(&mut rng);
            assert!(p.in_bounds(), "{p:?}");
            assert!(p.z >= ParticleBillboard::RESPAWN_DEPTH);
            assert!((0.5..2.0).contains(&p.speed));
        }
    }

    #[test]
    fn brightness_tracks_depth() {
        assert_eq!(at(100.0).brightness(), 0.0);
        assert!((at(50.0).brightness() - 0.5).abs() < 1e-6);
        assert!(at(2.0).brightness() > at(60.0).brightness());
    }

    #[test]
    fn color_blue_channel_saturates() {
        let c = at(1.0).color();
        assert!(c.b <= 1.0);
        assert!(c.b >= c.r);
    }

    #[test]
    fn spread_grows_as_particle_approaches() {
        let near = at(5.0).draw_position();
        let far = at(50.0).draw_position();
        assert_eq!(near.z, -5.0);
        assert!(near.x.abs() > far.x.abs());
        assert!((far.x - 10.0).abs() < 1e-5);
    }

    #[test]
    fn pixel_size_is_clamped() {
        assert_eq!(at(100.0).pixel_size(), 2.0);
        assert_eq!(at(0.01).pixel_size(), ParticleBillboard::MAX_PIXEL_SIZE);
        let tiny = ParticleBillboard { size: 0.1, ..at(100.0) };
        assert_eq!(tiny.pixel_size(), ParticleBillboard::MIN_PIXEL_SIZE);
    }
}
