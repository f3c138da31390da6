//! Stereo camera.
//!
//! Computes per-eye projection and view transforms for the side-by-side
//! surface. The stereo model is an explicit argument on every call; nothing
//! here keeps hidden state between frames.

mod config;
mod eye;
mod stereo;

pub use config::{CameraConfigError, StereoCameraConfig};
pub use eye::Eye;
pub use stereo::{off_axis_rh, EyeCamera, StereoMode};
