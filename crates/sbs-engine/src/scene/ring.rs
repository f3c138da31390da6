use glam::{Mat4, Vec3};

use crate::paint::Color;

/// One posed sub-solid of a [`CompositeRing`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RingMember {
    /// Object-to-world transform for a unit cube.
    pub model: Mat4,
    pub color: Color,
}

/// Ring of small cubes orbiting a pivot while the whole ring tumbles.
///
/// Member poses are pure functions of elapsed time and index; `members` holds
/// the poses for the last animated instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeRing {
    pub count: usize,
    pub radius: f32,
    /// Depth of the pivot (positive distance from the viewer).
    pub pivot_depth: f32,
    pub member_size: f32,

    /// Orbit speed of members along the ring, degrees per second.
    pub orbit_speed: f32,
    /// Extra spin of each member about `(1, 1, 0)`, degrees per second.
    pub spin_speed: f32,
    /// Whole-ring rotation about Y and X, degrees per second.
    pub tumble_speed: (f32, f32),
    /// Hue drift per second.
    pub hue_speed: f32,

    members: Vec<RingMember>,
}

impl CompositeRing {
    pub const SATURATION: f32 = 0.8;
    pub const VALUE: f32 = 1.0;

    pub fn new(count: usize, radius: f32, pivot_depth: f32, member_size: f32) -> Self {
        let mut ring = Self {
            count,
            radius,
            pivot_depth,
            member_size,
            orbit_speed: 30.0,
            spin_speed: 50.0,
            tumble_speed: (20.0, 10.0),
            hue_speed: 0.1,
            members: Vec::with_capacity(count),
        };
        ring.pose(0.0);
        ring
    }

    /// Eight cubes of size 0.8 on a radius-5 circle, 25 units away.
    pub fn standard() -> Self {
        Self::new(8, 5.0, 25.0, 0.8)
    }

    /// Pivot transform: translate to the pivot, then tumble about Y and X.
    pub fn pivot(&self, elapsed: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.pivot_depth))
            * Mat4::from_rotation_y((elapsed * self.tumble_speed.0).to_radians())
            * Mat4::from_rotation_x((elapsed * self.tumble_speed.1).to_radians())
    }

    /// Angle of member `index` along the ring, in degrees.
    #[inline]
    pub fn member_angle(&self, index: usize, elapsed: f32) -> f32 {
        let step = 360.0 / self.count.max(1) as f32;
        index as f32 * step + elapsed * self.orbit_speed
    }

    pub fn member_color(&self, index: usize, elapsed: f32) -> Color {
        let hue = (index as f32 / self.count.max(1) as f32 + elapsed * self.hue_speed).rem_euclid(1.0);
        Color::from_hsv(hue, Self::SATURATION, Self::VALUE)
    }

    /// Pose of member `index` at `elapsed`.
    pub fn member(&self, index: usize, elapsed: f32) -> RingMember {
        let angle = self.member_angle(index, elapsed);
        let (sin, cos) = angle.to_radians().sin_cos();
        let spin = (angle + elapsed * self.spin_speed).to_radians();

        let model = self.pivot(elapsed)
            * Mat4::from_translation(Vec3::new(cos * self.radius, 0.0, sin * self.radius))
            * Mat4::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), spin)
            * Mat4::from_scale(Vec3::splat(self.member_size));

        RingMember { model, color: self.member_color(index, elapsed) }
    }

    /// Recomputes every member for `elapsed`.
    pub fn pose(&mut self, elapsed: f32) {
        self.members.clear();
        for i in 0..self.count {
            let m = self.member(i, elapsed);
            self.members.push(m);
        }
    }

    #[inline]
    pub fn members(&self) -> &[RingMember] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_sit_on_the_ring() {
        let ring = CompositeRing::standard();
        for t in [0.0, 1.3, 17.0] {
            let pivot = ring.pivot(t).transform_point3(Vec3::ZERO);
            for i in 0..ring.count {
                let c = ring.member(i, t).model.transform_point3(Vec3::ZERO);
                assert!(((c - pivot).length() - 5.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn member_angles_step_by_45_degrees() {
        let ring = CompositeRing::standard();
        assert_eq!(ring.member_angle(0, 0.0), 0.0);
        assert_eq!(ring.member_angle(3, 0.0), 135.0);
        assert_eq!(ring.member_angle(1, 2.0), 105.0);
    }

    #[test]
    fn member_color_is_hue_wheel() {
        let ring = CompositeRing::standard();
        let c0 = ring.member_color(0, 0.0);
        assert!((c0.r - 1.0).abs() < 1e-6);
        assert!((c0.g - 0.2).abs() < 1e-6);
        // After ten seconds the hue wraps all the way round.
        let c10 = ring.member_color(0, 10.0);
        assert!((c0.r - c10.r).abs() < 1e-4 && (c0.g - c10.g).abs() < 1e-4);
    }

    #[test]
    fn pose_is_pure() {
        let mut a = CompositeRing::standard();
        let mut b = CompositeRing::standard();
        a.pose(3.0);
        b.pose(9.0);
        b.pose(3.0);
        assert_eq!(a.members(), b.members());
        assert_eq!(a.members().len(), 8);
    }
}
