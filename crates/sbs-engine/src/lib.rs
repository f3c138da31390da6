//! Side-by-side stereo viewport engine.
//!
//! Renders an animated 3D scene twice per frame, once per eye, into the two
//! halves of a single wide surface for SBS display glasses.
//!
//! The frame pipeline is split so everything above the GPU is testable
//! headless: [`runloop::RunLoop`] owns per-frame state, [`scene::Scene`]
//! animates, [`compositor::Compositor`] records a [`compositor::Frame`] of
//! isolated per-eye draw commands, and [`render::StereoRenderer`] replays it
//! on wgpu.

pub mod animation;
pub mod camera;
pub mod compositor;
pub mod config;
pub mod coords;
pub mod device;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod runloop;
pub mod scene;
pub mod time;
pub mod window;

pub use config::{ViewerConfig, WindowConfig};
pub use window::Runtime;
