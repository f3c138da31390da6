//! Time-driven entity updates.
//!
//! Particles integrate `dt`; oscillating solids and the ring are sampled at
//! `elapsed` so they never drift.

mod animator;

pub use animator::{step_ring, step_solid, Animator};
