use std::fmt;

/// Rejected camera parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraConfigError {
    /// `near` must be positive and strictly less than `far`.
    ClipPlanes { near: f32, far: f32 },
    /// Vertical field of view must lie in `(0, 180)` degrees.
    FieldOfView(f32),
    /// Aspect ratio must be positive and finite.
    Aspect(f32),
    /// IPD minimum and step must be positive and finite.
    IpdLimits { min: f32, step: f32 },
}

impl fmt::Display for CameraConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClipPlanes { near, far } => {
                write!(f, "invalid clip planes: need 0 < near < far (near={near}, far={far})")
            }
            Self::FieldOfView(fov) => write!(f, "invalid vertical field of view: {fov} degrees"),
            Self::Aspect(aspect) => write!(f, "invalid viewport aspect ratio: {aspect}"),
            Self::IpdLimits { min, step } => {
                write!(f, "invalid IPD limits: min={min}, step={step}")
            }
        }
    }
}

impl std::error::Error for CameraConfigError {}

/// Stereo camera parameters.
///
/// Everything except the IPD is fixed at construction. The IPD only changes
/// through [`increase_ipd`](Self::increase_ipd), [`decrease_ipd`](Self::decrease_ipd)
/// and [`set_ipd`](Self::set_ipd), all of which clamp to [`ipd_min`](Self::ipd_min).
///
/// The config is `Copy`: the compositor takes a snapshot per frame, so an IPD
/// change can never land between the two eye renders.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StereoCameraConfig {
    ipd: f32,
    fov_y_deg: f32,
    near: f32,
    far: f32,
    aspect: f32,
    ipd_min: f32,
    ipd_step: f32,
}

impl StereoCameraConfig {
    pub const DEFAULT_IPD: f32 = 0.070;
    pub const DEFAULT_FOV_Y_DEG: f32 = 55.0;
    pub const DEFAULT_NEAR: f32 = 0.1;
    pub const DEFAULT_FAR: f32 = 200.0;
    pub const DEFAULT_IPD_MIN: f32 = 0.02;
    pub const DEFAULT_IPD_STEP: f32 = 0.005;

    /// Validates and builds a config with the default IPD limits.
    ///
    /// `ipd` is clamped to the default minimum.
    pub fn new(
        ipd: f32,
        fov_y_deg: f32,
        near: f32,
        far: f32,
        aspect: f32,
    ) -> Result<Self, CameraConfigError> {
        if !(near.is_finite() && far.is_finite() && near > 0.0 && near < far) {
            return Err(CameraConfigError::ClipPlanes { near, far });
        }
        if !(fov_y_deg.is_finite() && fov_y_deg > 0.0 && fov_y_deg < 180.0) {
            return Err(CameraConfigError::FieldOfView(fov_y_deg));
        }
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(CameraConfigError::Aspect(aspect));
        }

        let mut cfg = Self {
            ipd: Self::DEFAULT_IPD,
            fov_y_deg,
            near,
            far,
            aspect,
            ipd_min: Self::DEFAULT_IPD_MIN,
            ipd_step: Self::DEFAULT_IPD_STEP,
        };
        cfg.set_ipd(ipd);
        Ok(cfg)
    }

    /// Replaces the IPD clamp minimum and adjustment step.
    pub fn with_ipd_limits(mut self, min: f32, step: f32) -> Result<Self, CameraConfigError> {
        if !(min.is_finite() && step.is_finite() && min > 0.0 && step > 0.0) {
            return Err(CameraConfigError::IpdLimits { min, step });
        }
        self.ipd_min = min;
        self.ipd_step = step;
        self.set_ipd(self.ipd);
        Ok(self)
    }

    #[inline]
    pub fn ipd(&self) -> f32 {
        self.ipd
    }

    #[inline]
    pub fn fov_y_deg(&self) -> f32 {
        self.fov_y_deg
    }

    #[inline]
    pub fn fov_y_rad(&self) -> f32 {
        self.fov_y_deg.to_radians()
    }

    #[inline]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[inline]
    pub fn far(&self) -> f32 {
        self.far
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[inline]
    pub fn ipd_min(&self) -> f32 {
        self.ipd_min
    }

    #[inline]
    pub fn ipd_step(&self) -> f32 {
        self.ipd_step
    }

    /// Sets the IPD, clamped to the minimum. Non-finite values are ignored.
    pub fn set_ipd(&mut self, ipd: f32) {
        if ipd.is_finite() {
            self.ipd = ipd.max(self.ipd_min);
        }
    }

    /// Widens the eye baseline by one step.
    pub fn increase_ipd(&mut self) -> f32 {
        self.set_ipd(self.ipd + self.ipd_step);
        self.ipd
    }

    /// Narrows the eye baseline by one step, never below the minimum.
    pub fn decrease_ipd(&mut self) -> f32 {
        self.set_ipd(self.ipd - self.ipd_step);
        self.ipd
    }
}

impl Default for StereoCameraConfig {
    fn default() -> Self {
        Self {
            ipd: Self::DEFAULT_IPD,
            fov_y_deg: Self::DEFAULT_FOV_Y_DEG,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
            aspect: 1920.0 / 1080.0,
            ipd_min: Self::DEFAULT_IPD_MIN,
            ipd_step: Self::DEFAULT_IPD_STEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_clip_planes() {
        assert!(matches!(
            StereoCameraConfig::new(0.07, 55.0, 0.0, 10.0, 1.0),
            Err(CameraConfigError::ClipPlanes { .. })
        ));
        assert!(matches!(
            StereoCameraConfig::new(0.07, 55.0, 10.0, 10.0, 1.0),
            Err(CameraConfigError::ClipPlanes { .. })
        ));
        assert!(matches!(
            StereoCameraConfig::new(0.07, 55.0, 5.0, 1.0, 1.0),
            Err(CameraConfigError::ClipPlanes { .. })
        ));
    }

    #[test]
    fn rejects_bad_fov_and_aspect() {
        assert!(matches!(
            StereoCameraConfig::new(0.07, 180.0, 0.1, 10.0, 1.0),
            Err(CameraConfigError::FieldOfView(_))
        ));
        assert!(matches!(
            StereoCameraConfig::new(0.07, 55.0, 0.1, 10.0, f32::NAN),
            Err(CameraConfigError::Aspect(_))
        ));
    }

    #[test]
    fn construction_clamps_ipd() {
        let cfg = StereoCameraConfig::new(0.0, 55.0, 0.1, 200.0, 1.0).unwrap();
        assert_eq!(cfg.ipd(), StereoCameraConfig::DEFAULT_IPD_MIN);
    }

    #[test]
    fn decrease_never_goes_below_minimum() {
        let mut cfg = StereoCameraConfig::default();
        let mut prev = cfg.ipd();
        for _ in 0..100 {
            let now = cfg.decrease_ipd();
            assert!(now <= prev);
            assert!(now >= cfg.ipd_min());
            prev = now;
        }
        assert_eq!(cfg.ipd(), cfg.ipd_min());
    }

    #[test]
    fn increase_adds_exactly_one_step() {
        let mut cfg = StereoCameraConfig::default();
        for _ in 0..20 {
            let before = cfg.ipd();
            let after = cfg.increase_ipd();
            assert!((after - before - cfg.ipd_step()).abs() < 1e-6);
        }
    }

    #[test]
    fn custom_limits_reclamp() {
        let cfg = StereoCameraConfig::default().with_ipd_limits(0.1, 0.01).unwrap();
        assert_eq!(cfg.ipd(), 0.1);
        assert!(StereoCameraConfig::default().with_ipd_limits(0.0, 0.01).is_err());
    }

    #[test]
    fn non_finite_ipd_is_ignored() {
        let mut cfg = StereoCameraConfig::default();
        cfg.set_ipd(f32::INFINITY);
        assert_eq!(cfg.ipd(), StereoCameraConfig::DEFAULT_IPD);
    }
}
