use glam::{Mat4, Vec3, Vec4};

use super::{Eye, StereoCameraConfig};

/// Projection + view pair for one eye.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EyeCamera {
    pub projection: Mat4,
    pub view: Mat4,
}

impl EyeCamera {
    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// How eye divergence is expressed.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum StereoMode {
    /// Shared symmetric frustum; eyes differ only by a horizontal camera
    /// translation of `IPD/2`. No vertical parallax.
    #[default]
    ParallelAxis,

    /// Off-axis frustum per eye plus the same camera translation.
    ///
    /// The frustum shift is `eye_offset * near / convergence_distance`.
    /// `convergence_distance` is independent of the IPD.
    AsymmetricFrustum { convergence_distance: f32 },
}

impl StereoMode {
    pub const DEFAULT_CONVERGENCE_DISTANCE: f32 = 1.0;

    /// Asymmetric-frustum mode at the default convergence distance.
    #[inline]
    pub const fn asymmetric() -> Self {
        StereoMode::AsymmetricFrustum {
            convergence_distance: Self::DEFAULT_CONVERGENCE_DISTANCE,
        }
    }

    /// Switches between the two models, keeping the default convergence.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            StereoMode::ParallelAxis => StereoMode::asymmetric(),
            StereoMode::AsymmetricFrustum { .. } => StereoMode::ParallelAxis,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StereoMode::ParallelAxis => "parallel-axis",
            StereoMode::AsymmetricFrustum { .. } => "asymmetric-frustum",
        }
    }

    /// Near-plane frustum extents `(left, right, bottom, top)` for `eye`.
    pub fn frustum_bounds(self, eye: Eye, config: &StereoCameraConfig) -> [f32; 4] {
        let near = config.near();
        let top = near * (config.fov_y_rad() * 0.5).tan();
        let bottom = -top;
        let a = config.aspect() * top;

        match self {
            StereoMode::ParallelAxis => [-a, a, bottom, top],
            StereoMode::AsymmetricFrustum { convergence_distance } => {
                let shift = eye.offset(config.ipd()) * (near / convergence_distance.max(f32::EPSILON));
                let b = a - shift;
                let c = -a - shift;
                match eye {
                    Eye::Left => [c, b, bottom, top],
                    Eye::Right => [-b, -c, bottom, top],
                }
            }
        }
    }

    /// Computes projection and view for `eye`.
    ///
    /// Pure: the result depends only on `self`, `eye` and `config`.
    pub fn projection_and_view(self, eye: Eye, config: &StereoCameraConfig) -> EyeCamera {
        let projection = match self {
            StereoMode::ParallelAxis => Mat4::perspective_rh(
                config.fov_y_rad(),
                config.aspect(),
                config.near(),
                config.far(),
            ),
            StereoMode::AsymmetricFrustum { .. } => {
                let [l, r, b, t] = self.frustum_bounds(eye, config);
                off_axis_rh(l, r, b, t, config.near(), config.far())
            }
        };

        // Moving the world by -offset places the camera at +offset.
        let view = Mat4::from_translation(Vec3::new(-eye.offset(config.ipd()), 0.0, 0.0));

        EyeCamera { projection, view }
    }
}

/// Right-handed off-center perspective projection with a `[0, 1]` depth range.
pub fn off_axis_rh(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let x_scale = 2.0 * near / (right - left);
    let y_scale = 2.0 * near / (top - bottom);
    let x_offset = (right + left) / (right - left);
    let y_offset = (top + bottom) / (top - bottom);
    let z_scale = far / (near - far);
    let z_offset = near * far / (near - far);

    Mat4::from_cols(
        Vec4::new(x_scale, 0.0, 0.0, 0.0),
        Vec4::new(0.0, y_scale, 0.0, 0.0),
        Vec4::new(x_offset, y_offset, z_scale, -1.0),
        Vec4::new(0.0, 0.0, z_offset, 0.0),
    )
}
