/// Axis-aligned rectangle in physical pixels (top-left origin).
///
/// Used both as a viewport and as a scissor region; wgpu takes both as
/// integer pixel rectangles.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(self) -> u32 {
        self.y + self.height
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height. Returns `1.0` for empty rectangles.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, px: u32, py: u32) -> bool {
        px >= self.x && py >= self.y && px < self.right() && py < self.bottom()
    }

    /// Returns true if `other` lies entirely inside `self`.
    #[inline]
    pub fn contains_rect(self, other: Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: u32, y: u32, w: u32, h: u32) -> Rect { Rect::new(x, y, w, h) }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_interior_point() {
        assert!(r(0, 0, 10, 10).contains(5, 5));
    }

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0, 0, 10, 10).contains(0, 0));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        // Half-open [min, max): the max edge is not contained.
        assert!(!r(0, 0, 10, 10).contains(10, 10));
        assert!(!r(0, 0, 10, 10).contains(10, 5));
    }

    #[test]
    fn contains_rect_checks_all_edges() {
        let outer = r(0, 0, 100, 100);
        assert!(outer.contains_rect(r(10, 10, 90, 90)));
        assert!(!outer.contains_rect(r(10, 10, 91, 10)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let a = r(0, 0, 10, 10);
        let b = r(5, 5, 10, 10);
        assert_eq!(a.intersect(b), Some(r(5, 5, 5, 5)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        // Adjacent eye halves share an edge but no pixels.
        let left = r(0, 0, 1920, 1080);
        let right = r(1920, 0, 1920, 1080);
        assert!(left.intersect(right).is_none());
    }

    #[test]
    fn intersect_disjoint_returns_none() {
        assert!(r(0, 0, 5, 5).intersect(r(20, 20, 5, 5)).is_none());
    }

    // ── is_empty / aspect ─────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0, 0, 0, 5).is_empty());
        assert!(r(0, 0, 5, 0).is_empty());
        assert!(!r(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn aspect_of_eye_half() {
        assert!((r(0, 0, 1920, 1080).aspect() - 16.0 / 9.0).abs() < 1e-6);
        assert_eq!(r(0, 0, 0, 0).aspect(), 1.0);
    }
}
