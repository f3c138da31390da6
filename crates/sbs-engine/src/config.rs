//! Viewer configuration.
//!
//! Plain structs with `Default` impls. The binary fills them from the command
//! line; tests build them directly.

use anyhow::Result;

pub use winit::dpi::{PhysicalPosition, PhysicalSize};

use crate::camera::{StereoCameraConfig, StereoMode};
use crate::compositor::{ClearColors, ViewMode};
use crate::coords::SurfaceSize;
use crate::device::GpuInit;
use crate::logging::LoggingConfig;
use crate::scene::ScenePreset;

/// Where and how the output window is created.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    /// Inner size in physical pixels; both eyes share it side by side.
    pub size: PhysicalSize<u32>,
    /// Outer position in desktop coordinates. Ignored when `monitor` matches.
    pub position: Option<PhysicalPosition<i32>>,
    /// Substring of the target monitor's name, e.g. `HDMI-1`.
    pub monitor: Option<String>,
    pub decorated: bool,
}

impl WindowConfig {
    pub const DEFAULT_TITLE: &'static str = "SBS Stereo Viewport";

    #[inline]
    pub fn surface(&self) -> SurfaceSize {
        SurfaceSize::new(self.size.width, self.size.height)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        let surface = SurfaceSize::SBS_1080P;
        Self {
            title: Self::DEFAULT_TITLE.to_string(),
            size: PhysicalSize::new(surface.width, surface.height),
            // Right of a 2560-wide primary display.
            position: Some(PhysicalPosition::new(2560, 0)),
            monitor: None,
            decorated: false,
        }
    }
}

/// Everything the runtime needs to start.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: StereoCameraConfig,
    pub stereo: StereoMode,
    pub scene: ScenePreset,
    pub view: ViewMode,
    /// Seed for the scene's random stream. `None` uses OS entropy.
    pub seed: Option<u64>,
    pub clear: ClearColors,
    pub gpu: GpuInit,
    pub logging: LoggingConfig,
}

impl ViewerConfig {
    /// Checks cross-field consistency.
    pub fn validate(&self) -> Result<()> {
        let surface = self.window.surface();
        anyhow::ensure!(
            surface.is_valid(),
            "window size {}x{} cannot be split into two eyes",
            surface.width,
            surface.height
        );

        let expected = surface.eye_aspect();
        if (self.camera.aspect() - expected).abs() > 1e-3 {
            log::warn!(
                "camera aspect {:.4} differs from per-eye aspect {:.4}",
                self.camera.aspect(),
                expected
            );
        }
        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: StereoCameraConfig::default(),
            stereo: StereoMode::default(),
            scene: ScenePreset::default(),
            view: ViewMode::default(),
            seed: None,
            clear: ClearColors::for_preset(ScenePreset::default()),
            gpu: GpuInit::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_sbs_glasses() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.window.surface(), SurfaceSize::SBS_1080P);
        assert_eq!(cfg.window.position, Some(PhysicalPosition::new(2560, 0)));
        assert!(!cfg.window.decorated);
        assert!((cfg.camera.aspect() - cfg.window.surface().eye_aspect()).abs() < 1e-6);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.clear, ClearColors::for_preset(cfg.scene));
    }

    #[test]
    fn rejects_unsplittable_window() {
        let mut cfg = ViewerConfig::default();
        cfg.window.size = PhysicalSize::new(1, 1080);
        assert!(cfg.validate().is_err());
    }
}
