//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s, maps them to
//! `Intent`s through a `KeyMap`, and queues them until the next frame.

mod intent;
mod keymap;
mod types;

pub mod platform;

pub use intent::{Intent, IntentQueue};
pub use keymap::KeyMap;
pub use types::{InputEvent, Key, KeyState};
