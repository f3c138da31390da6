//! Frame composition.
//!
//! Produces a renderer-agnostic command list per frame:
//! - one full-surface clear
//! - per eye (left first): isolate to that half, clear it, draw the scene
//!   through that eye's camera
//! - release isolation
//!
//! Every command recorded while an eye is isolated is tagged with that eye;
//! the renderer replays each `Isolate` as viewport and scissor, so no draw
//! can land in the other half.

mod compose;
mod frame;

pub use compose::{ClearColors, Compositor, ViewMode};
pub use frame::{DrawPass, Frame, FrameCmd, FrameItem};
