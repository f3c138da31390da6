use crate::camera::Eye;

use super::Rect;

/// Drawable surface size in physical pixels.
///
/// The surface is split into two equal horizontal halves, one per eye.
/// For odd widths the last column belongs to neither eye.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// Nominal SBS glasses mode: two 1920x1080 eyes.
    pub const SBS_1080P: SurfaceSize = SurfaceSize::new(3840, 1080);

    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A surface needs at least one pixel per eye.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width >= 2 && self.height >= 1
    }

    #[inline]
    pub const fn eye_width(self) -> u32 {
        self.width / 2
    }

    #[inline]
    pub const fn full_rect(self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Returns the half of the surface that belongs to `eye`.
    #[inline]
    pub fn eye_rect(self, eye: Eye) -> Rect {
        let w = self.eye_width();
        match eye {
            Eye::Left => Rect::new(0, 0, w, self.height),
            Eye::Right => Rect::new(w, 0, w, self.height),
        }
    }

    /// Per-eye viewport aspect ratio (`(width/2) / height`).
    #[inline]
    pub fn eye_aspect(self) -> f32 {
        self.eye_rect(Eye::Left).aspect()
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::SBS_1080P
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_split_at_midpoint() {
        let s = SurfaceSize::SBS_1080P;
        assert_eq!(s.eye_rect(Eye::Left), Rect::new(0, 0, 1920, 1080));
        assert_eq!(s.eye_rect(Eye::Right), Rect::new(1920, 0, 1920, 1080));
    }

    #[test]
    fn halves_never_overlap_for_odd_width() {
        let s = SurfaceSize::new(1001, 10);
        let l = s.eye_rect(Eye::Left);
        let r = s.eye_rect(Eye::Right);
        assert!(l.intersect(r).is_none());
        assert_eq!(l.width, r.width);
        assert!(s.full_rect().contains_rect(r));
    }

    #[test]
    fn eye_aspect_uses_half_width() {
        assert!((SurfaceSize::SBS_1080P.eye_aspect() - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn validity() {
        assert!(SurfaceSize::new(2, 1).is_valid());
        assert!(!SurfaceSize::new(1, 100).is_valid());
        assert!(!SurfaceSize::new(100, 0).is_valid());
    }
}
