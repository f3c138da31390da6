//! Per-frame control state.
//!
//! Owns everything the window runtime mutates between frames (camera, stereo
//! model, view mode, clocks) so it can be driven and tested without a window.

mod state;

pub use state::{LoopState, LoopStatus, RunLoop};
