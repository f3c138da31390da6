/// Straight-alpha RGBA color in unit range.
///
/// Scene colors are flat per-face colors; alpha is only used by the
/// translucent layers (particles, floor grid).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Converts HSV (all components in `[0, 1]`) to an opaque color.
    ///
    /// Hue wraps; saturation and value are clamped.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::rgb(v, v, v);
        }

        let h = h.rem_euclid(1.0) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match sector as u32 % 6 {
            0 => Self::rgb(v, t, p),
            1 => Self::rgb(q, v, p),
            2 => Self::rgb(p, v, t),
            3 => Self::rgb(p, q, v),
            4 => Self::rgb(t, p, v),
            _ => Self::rgb(v, p, q),
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn hsv_primaries() {
        assert!(close(Color::from_hsv(0.0, 1.0, 1.0), Color::RED));
        assert!(close(Color::from_hsv(1.0 / 3.0, 1.0, 1.0), Color::GREEN));
        assert!(close(Color::from_hsv(2.0 / 3.0, 1.0, 1.0), Color::BLUE));
    }

    #[test]
    fn hsv_zero_saturation_is_grey() {
        assert!(close(Color::from_hsv(0.42, 0.0, 0.5), Color::rgb(0.5, 0.5, 0.5)));
    }

    #[test]
    fn hsv_hue_wraps() {
        assert!(close(Color::from_hsv(1.25, 0.8, 1.0), Color::from_hsv(0.25, 0.8, 1.0)));
        assert!(close(Color::from_hsv(-0.75, 0.8, 1.0), Color::from_hsv(0.25, 0.8, 1.0)));
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = Color::rgb(0.2, 0.4, 0.6).with_alpha(0.5);
        assert_eq!(c.to_array(), [0.2, 0.4, 0.6, 0.5]);
    }
}
