//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer,
//! the scene and the run loop.

mod runtime;

pub use runtime::Runtime;
