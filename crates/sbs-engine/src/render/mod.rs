//! GPU rendering subsystem.
//!
//! Executes composed [`Frame`](crate::compositor::Frame)s via wgpu. The
//! renderer owns its GPU resources (pipelines, buffers) and creates them
//! lazily on first use.
//!
//! Convention:
//! - CPU geometry is in world units; every draw carries its full MVP.
//! - Viewport and scissor are physical pixels, top-left origin.

mod ctx;
mod replay;
mod stereo;

pub use ctx::{RenderCtx, RenderTarget};
pub use replay::{replay, replay_into, stage_uniforms, DrawStep, DrawUniform, StepDraw};
pub use stereo::StereoRenderer;
